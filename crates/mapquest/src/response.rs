//! Read-only helpers over raw geocoding responses
//!
//! Responses stay untyped [`Value`]s. These accessors only look up the few
//! fields every MapQuest geocoding answer carries, and return empty values
//! when a field is missing rather than failing.

use serde_json::Value;

/// Accessors for a MapQuest geocoding response
pub trait ResponseExt {
    /// `info.statuscode`; `0` means success
    fn status_code(&self) -> Option<i64>;

    /// `info.messages`
    fn messages(&self) -> Vec<&str>;

    /// Number of entries in `results`, one per submitted location
    fn result_count(&self) -> usize;

    /// `results[index].locations`
    fn locations(&self, index: usize) -> &[Value];

    /// The `options` the service applied, as echoed back
    fn applied_options(&self) -> Option<&Value>;
}

impl ResponseExt for Value {
    fn status_code(&self) -> Option<i64> {
        self.pointer("/info/statuscode").and_then(Value::as_i64)
    }

    fn messages(&self) -> Vec<&str> {
        self.pointer("/info/messages")
            .and_then(Value::as_array)
            .map(|messages| messages.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    fn result_count(&self) -> usize {
        self.get("results")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    fn locations(&self, index: usize) -> &[Value] {
        self.get("results")
            .and_then(|results| results.get(index))
            .and_then(|result| result.get("locations"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn applied_options(&self) -> Option<&Value> {
        self.get("options")
    }
}
