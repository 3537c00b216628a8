use serde::{Deserialize, Serialize};

/// A stored item row, returned verbatim as the API response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// Payload for creating an item (POST /items).
///
/// `description` is optional in the request body and defaults to empty,
/// matching the column default in the `items` table.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
