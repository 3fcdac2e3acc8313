//! Record metadata traits
//!
//! Every collection element implements [`Record`]; catalog entities that
//! can be listed through the query engine also implement [`Queryable`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Field name of the record identifier in the persisted document
pub const ID_FIELD: &str = "_id";
/// Field name of the creation timestamp in the persisted document
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Identity and timestamps of a persisted record
pub trait Record: Clone + Send + Sync + Debug + Serialize + DeserializeOwned + 'static {
    /// Human readable collection name used in messages and logs
    fn collection_name() -> &'static str;

    /// The record identifier; empty before the record is stored
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Creation time in milliseconds since the Unix epoch
    fn created_at(&self) -> i64;

    /// Set creation and update time of a new record
    fn stamp_created(&mut self, at: i64);

    /// Set the update time
    fn stamp_updated(&mut self, at: i64);

    /// Fields an update patch may never change
    fn immutable_fields() -> &'static [&'static str] {
        &[ID_FIELD, CREATED_AT_FIELD]
    }
}

/// Catalog records understood by the query engine
pub trait Queryable: Record {
    /// Title or name of the record
    fn title(&self) -> &str;

    fn description(&self) -> Option<&str>;

    /// The numeric attribute bounded by price filters and price sort
    fn price(&self) -> f64;

    fn labels(&self) -> &[String];

    /// Stock status, for flavors that track it
    fn in_stock(&self) -> Option<bool> {
        None
    }

    /// Id of the user who created the record
    fn creator_id(&self) -> Option<&str> {
        None
    }
}
