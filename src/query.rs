//! Typed builder for Appwrite list queries.
//!
//! Appwrite 1.4+ accepts queries as JSON strings of the form
//! `{"method":"equal","attribute":"status","values":["active"]}`, one per
//! `queries[]` request parameter. The builder keeps key order fixed so the
//! serialized form is deterministic.

use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Matches documents whose `attribute` equals `value`.
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self::build("equal", Some(attribute), &[value.into()])
    }

    /// Caps the number of documents in the page.
    pub fn limit(count: u64) -> Self {
        Self::build("limit", None, &[count.into()])
    }

    /// Skips the first `count` documents.
    pub fn offset(count: u64) -> Self {
        Self::build("offset", None, &[count.into()])
    }

    /// Orders the page by `attribute`, newest-style descending.
    pub fn order_desc(attribute: &str) -> Self {
        Self::build("orderDesc", Some(attribute), &[])
    }

    fn build(method: &str, attribute: Option<&str>, values: &[Value]) -> Self {
        let mut parts = vec![format!(r#""method":{}"#, json!(method))];
        if let Some(attribute) = attribute {
            parts.push(format!(r#""attribute":{}"#, json!(attribute)));
        }
        if !values.is_empty() {
            parts.push(format!(r#""values":{}"#, Value::from(values.to_vec())));
        }
        Query(format!("{{{}}}", parts.join(",")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
