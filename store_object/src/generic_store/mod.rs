pub mod core;
pub mod persistence;
pub mod store_object;

#[cfg(test)]
mod tests;

pub use self::core::GenericStore;
