//! Roster record normalization
//!
//! Exported player records arrive with loosely-shaped fields (`UID` or `uid`,
//! numbers or strings). They are normalized once into a `PlayerFingerprint`
//! before any key is derived.

use serde_json::{Map, Value};

/// Placeholder used for any missing identity component.
pub const UNKNOWN: &str = "unknown";

// == Player Fingerprint ==
/// Canonical identity of one player as far as cache keys are concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerFingerprint {
    /// Unique id, or `name-club-age-position` when the record has none
    pub identity: String,
    /// Rendered overall rating, `None` when the record has none
    pub overall: Option<String>,
    /// Short position codes in record order
    pub short_positions: Vec<String>,
}

impl PlayerFingerprint {
    /// Normalizes a raw record. Non-object records have every field missing.
    pub fn from_record(record: &Value) -> Self {
        let empty = Map::new();
        let fields = record.as_object().unwrap_or(&empty);

        let identity = field(fields, &["UID", "uid"])
            .and_then(render)
            .unwrap_or_else(|| synthesize_identity(fields));

        let overall = field(fields, &["Overall", "overall"]).and_then(render);

        let short_positions = match field(fields, &["shortPositions", "short_positions"]) {
            Some(Value::Array(codes)) => codes.iter().map(render_element).collect(),
            _ => Vec::new(),
        };

        Self {
            identity,
            overall,
            short_positions,
        }
    }

    /// `identity-overall-pos1,pos2,...`, with a missing rating written as `0`.
    pub fn fingerprint(&self) -> String {
        format!(
            "{}-{}-{}",
            self.identity,
            self.overall.as_deref().unwrap_or("0"),
            self.short_positions.join(",")
        )
    }

    /// Overall rating as a number; `None` when missing or not numeric.
    pub fn overall_rating(&self) -> Option<f64> {
        self.overall.as_deref().and_then(|o| o.parse().ok())
    }
}

/// Normalizes every item of a JSON array; `None` for anything else.
pub fn normalize_roster(items: &Value) -> Option<Vec<PlayerFingerprint>> {
    items
        .as_array()
        .map(|players| players.iter().map(PlayerFingerprint::from_record).collect())
}

fn synthesize_identity(fields: &Map<String, Value>) -> String {
    ["name", "club", "age", "position"]
        .iter()
        .map(|name| {
            fields
                .get(*name)
                .and_then(render)
                .unwrap_or_else(|| UNKNOWN.to_string())
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn field<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| fields.get(*name))
        .find(|value| is_present(value))
}

/// Null, false, zero, NaN and the empty string count as missing.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a present scalar as text; `None` when it counts as missing.
fn render(value: &Value) -> Option<String> {
    if !is_present(value) {
        return None;
    }
    Some(render_element(value))
}

fn render_element(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => render_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(render_element).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Integers print without a fractional part (`80`, never `80.0`).
fn render_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_uid_variants() {
        let upper = PlayerFingerprint::from_record(&json!({"UID": "123"}));
        let lower = PlayerFingerprint::from_record(&json!({"uid": 123}));

        assert_eq!(upper.identity, "123");
        assert_eq!(lower.identity, "123");
    }

    #[test]
    fn test_empty_uid_falls_back_to_synthesized_identity() {
        let player = PlayerFingerprint::from_record(&json!({
            "UID": "",
            "name": "Kane",
            "club": "Spurs",
            "age": 30,
            "position": "ST"
        }));
        assert_eq!(player.identity, "Kane-Spurs-30-ST");
    }

    #[test]
    fn test_missing_components_render_unknown() {
        let player = PlayerFingerprint::from_record(&json!({"name": "Kane", "age": 0}));
        assert_eq!(player.identity, "Kane-unknown-unknown-unknown");
    }

    #[test]
    fn test_overall_and_positions() {
        let player = PlayerFingerprint::from_record(&json!({
            "UID": "9",
            "Overall": 88.0,
            "shortPositions": ["ST", "CF"]
        }));
        assert_eq!(player.overall.as_deref(), Some("88"));
        assert_eq!(player.overall_rating(), Some(88.0));
        assert_eq!(player.fingerprint(), "9-88-ST,CF");
    }

    #[test]
    fn test_lowercase_overall_and_fractional_rating() {
        let player = PlayerFingerprint::from_record(&json!({"uid": "9", "overall": 71.5}));
        assert_eq!(player.overall.as_deref(), Some("71.5"));
        assert_eq!(player.fingerprint(), "9-71.5-");
    }

    #[test]
    fn test_non_object_record() {
        let player = PlayerFingerprint::from_record(&json!("not a player"));
        assert_eq!(player.fingerprint(), "unknown-unknown-unknown-unknown-0-");
    }

    #[test]
    fn test_missing_rating_is_none_but_keys_as_zero() {
        let player = PlayerFingerprint::from_record(&json!({"UID": "2", "Overall": 0}));

        assert_eq!(player.overall, None);
        assert_eq!(player.overall_rating(), None);
        assert_eq!(player.fingerprint(), "2-0-");
    }

    #[test]
    fn test_non_array_positions_are_ignored() {
        let player = PlayerFingerprint::from_record(&json!({"UID": "1", "shortPositions": "ST"}));
        assert!(player.short_positions.is_empty());
    }

    #[test]
    fn test_normalize_roster() {
        assert!(normalize_roster(&json!({"UID": "1"})).is_none());
        assert!(normalize_roster(&Value::Null).is_none());

        let roster = normalize_roster(&json!([{"UID": "1"}, {"UID": "2"}])).unwrap();
        assert_eq!(roster.len(), 2);
    }
}
