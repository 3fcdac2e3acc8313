//! Entity models
//!
//! The persisted shapes of catalog items, toys and users. Field names on the
//! wire and on disk are camelCase with `_id` as the identifier.

use serde::{Deserialize, Serialize};
use store_object::{Queryable, Record};

/// Reference to the user who created a catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub fullname: String,
}

/// A catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Creator>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// A toy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toy {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Creator>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// A stored user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub fullname: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// A user as returned to clients, without the password
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub fullname: String,
    pub username: String,
    pub is_admin: bool,
    pub created_at: i64,
}

/// The identity carried by a login token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub fullname: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            fullname: self.fullname.clone(),
            username: self.username.clone(),
            is_admin: self.is_admin,
            created_at: self.created_at,
        }
    }

    pub fn to_mini(&self) -> MiniUser {
        MiniUser {
            id: self.id.clone(),
            fullname: self.fullname.clone(),
            is_admin: self.is_admin,
        }
    }
}

impl From<&MiniUser> for Creator {
    fn from(user: &MiniUser) -> Self {
        Creator {
            id: user.id.clone(),
            fullname: user.fullname.clone(),
        }
    }
}

impl Record for Item {
    fn collection_name() -> &'static str {
        "Item"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn stamp_created(&mut self, at: i64) {
        self.created_at = at;
        self.updated_at = at;
    }

    fn stamp_updated(&mut self, at: i64) {
        self.updated_at = at;
    }
}

impl Queryable for Item {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn creator_id(&self) -> Option<&str> {
        self.creator.as_ref().map(|c| c.id.as_str())
    }
}

impl Record for Toy {
    fn collection_name() -> &'static str {
        "Toy"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn stamp_created(&mut self, at: i64) {
        self.created_at = at;
        self.updated_at = at;
    }

    fn stamp_updated(&mut self, at: i64) {
        self.updated_at = at;
    }
}

impl Queryable for Toy {
    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn in_stock(&self) -> Option<bool> {
        Some(self.in_stock)
    }

    fn creator_id(&self) -> Option<&str> {
        self.creator.as_ref().map(|c| c.id.as_str())
    }
}

impl Record for User {
    fn collection_name() -> &'static str {
        "User"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn stamp_created(&mut self, at: i64) {
        self.created_at = at;
        self.updated_at = at;
    }

    fn stamp_updated(&mut self, at: i64) {
        self.updated_at = at;
    }

    // Usernames are fixed at signup
    fn immutable_fields() -> &'static [&'static str] {
        &["_id", "createdAt", "username"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_wire_format() {
        let item: Item = serde_json::from_value(json!({
            "_id": "a1B2c3",
            "title": "Kite",
            "price": 12,
            "labels": ["Outdoor"],
            "createdAt": 1700000000000i64
        }))
        .unwrap();

        assert_eq!(item.description, "");
        assert_eq!(item.updated_at, 0);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["_id"], json!("a1B2c3"));
        assert_eq!(json["createdAt"], json!(1700000000000i64));
        assert!(json.get("creator").is_none());
    }

    #[test]
    fn test_toy_reports_stock_and_creator() {
        let toy = Toy {
            id: "t1".to_string(),
            name: "Robot".to_string(),
            description: None,
            price: 50.0,
            labels: vec![],
            in_stock: false,
            creator: Some(Creator {
                id: "u1".to_string(),
                fullname: "Ada".to_string(),
            }),
            created_at: 0,
            updated_at: 0,
        };
        assert_eq!(toy.in_stock(), Some(false));
        assert_eq!(toy.creator_id(), Some("u1"));
        assert_eq!(toy.title(), "Robot");
        assert_eq!(serde_json::to_value(&toy).unwrap()["inStock"], json!(false));
    }

    #[test]
    fn test_public_user_has_no_password() {
        let user = User {
            id: "u1".to_string(),
            fullname: "Ada".to_string(),
            username: "ada".to_string(),
            password: "secret".to_string(),
            is_admin: true,
            created_at: 1,
            updated_at: 1,
        };
        let json = serde_json::to_value(user.to_public()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["isAdmin"], json!(true));
        assert!(user.to_mini().is_admin);
    }
}
