use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Detail record from the lookup API, keyed by field name.
pub type DrinkDetails = Map<String, Value>;

/// Entry in the "most liked" listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drink {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "likeCount")]
    pub like_count: i64,
    /// Any other fields the server sends along.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Drink {
    /// Shallow-merge a detail record over this drink. Detail fields win on collision.
    pub fn with_details(&self, details: DrinkDetails) -> DetailedDrink {
        let mut fields = Map::with_capacity(2 + self.extra.len() + details.len());
        fields.insert("_id".to_string(), Value::String(self.id.clone()));
        fields.insert("likeCount".to_string(), Value::from(self.like_count));
        fields.extend(self.extra.clone());
        fields.extend(details);
        DetailedDrink(fields)
    }
}

/// Order drinks most-liked first. Ties keep no particular order.
pub fn sort_by_like_count(drinks: &mut [Drink]) {
    drinks.sort_unstable_by(|a, b| b.like_count.cmp(&a.like_count));
}

/// A liked drink merged with its detail record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetailedDrink(pub Map<String, Value>);

impl DetailedDrink {
    pub fn id(&self) -> Option<&str> {
        self.0.get("_id").and_then(Value::as_str)
    }

    pub fn like_count(&self) -> Option<i64> {
        self.0.get("likeCount").and_then(Value::as_i64)
    }

    /// Display name from the lookup API (`strDrink`).
    pub fn name(&self) -> Option<&str> {
        self.0.get("strDrink").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}
