//! Id Type module
//!
//! Record identifiers are short random alphanumeric strings.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of identifiers assigned by stores
pub const DEFAULT_ID_LENGTH: usize = 6;

/// Generate a random identifier of `length` characters from A-Z, a-z and 0-9
pub fn make_id(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
