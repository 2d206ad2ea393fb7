//! Ban list decoding.
//!
//! Game server exports are not consistent: depending on the version a ban
//! list is either a bare array of usernames or an array of
//! `{"username", "reason"}` objects. Every file is decoded against each
//! [`Shape`] in turn and whatever decodes is kept; a shape that does not
//! match contributes nothing.

use crate::ban::{BanEntry, eq_fold};
use serde_json::{Map, Value};
use tracing::debug;

/// The layouts a ban list file may use
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Shape {
    /// `["name", ...]`
    Names,
    /// `[{"username": "name", "reason": "text"}, ...]`
    Records,
}

impl Shape {
    /// Shapes in the order they are attempted
    pub const ALL: [Shape; 2] = [Shape::Names, Shape::Records];

    /// Decode `text` as this shape
    pub fn decode(self, text: &str) -> Result<Vec<BanEntry>, serde_json::Error> {
        match self {
            Shape::Names => {
                // null elements decode as empty names and are dropped
                let names: Vec<Option<String>> = serde_json::from_str(text)?;
                Ok(names
                    .iter()
                    .flatten()
                    .filter(|name| !name.is_empty())
                    .map(|name| BanEntry::new(name, String::new()))
                    .collect())
            }
            Shape::Records => {
                let items: Vec<Value> = serde_json::from_str(text)?;
                Ok(items.iter().filter_map(record).collect())
            }
        }
    }
}

/// Decode every shape and concatenate the results. Invalid UTF-8 is
/// replaced with U+FFFD so one bad byte only affects the name it is in.
pub fn parse(data: &[u8]) -> Vec<BanEntry> {
    let text = String::from_utf8_lossy(data);
    let mut entries = Vec::new();
    for shape in Shape::ALL {
        match shape.decode(&text) {
            Ok(found) => {
                debug!(?shape, count = found.len(), "decoded ban list shape");
                entries.extend(found);
            }
            Err(err) => {
                debug!(?shape, %err, "ban list shape did not match");
            }
        }
    }
    entries
}

/// One element of a record list. Non-objects and elements without a usable
/// username are skipped.
fn record(item: &Value) -> Option<BanEntry> {
    let obj = item.as_object()?;
    let username = field(obj, "username")?.as_str()?;
    if username.is_empty() {
        return None;
    }
    let reason = field(obj, "reason")
        .and_then(Value::as_str)
        .unwrap_or_default();
    Some(BanEntry::new(username, reason))
}

/// Exact key match first, then case-insensitive
fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).or_else(|| {
        obj.iter()
            .find(|(k, _)| eq_fold(k, key))
            .map(|(_, v)| v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn names_become_entries_without_reason() {
        let entries = parse(br#"["Alice", "", "BOB", null]"#);
        assert_eq!(
            entries,
            vec![BanEntry::new("alice", ""), BanEntry::new("bob", "")]
        );
    }

    #[test]
    fn records_keep_their_reason() {
        let data = br#"[
            {"username": "Alice", "reason": "griefing"},
            {"username": "bob"},
            {"username": "", "reason": "ignored"},
            {"reason": "no name"}
        ]"#;
        assert_eq!(
            parse(data),
            vec![
                BanEntry::new("alice", "griefing"),
                BanEntry::new("bob", ""),
            ]
        );
    }

    #[test]
    fn record_fields_match_case_insensitively() {
        let data = br#"[{"UserName": "Carol", "Reason": "spam", "extra": 1}]"#;
        assert_eq!(parse(data), vec![BanEntry::new("carol", "spam")]);
    }

    #[test]
    fn bad_record_elements_are_skipped() {
        let data = br#"[3, {"username": 5}, {"username": "dave", "reason": 7}]"#;
        assert_eq!(parse(data), vec![BanEntry::new("dave", "")]);
    }

    #[test]
    fn unrecognized_input_yields_nothing() {
        assert!(parse(b"").is_empty());
        assert!(parse(b"not json").is_empty());
        assert!(parse(br#"{"username": "alice"}"#).is_empty());
        assert!(parse(b"null").is_empty());
        assert!(parse(b"[]").is_empty());
    }

    #[test]
    fn names_shape_rejects_mixed_arrays() {
        assert!(Shape::Names.decode(r#"["a", 1]"#).is_err());
        assert!(Shape::Records.decode(r#"["a", "b"]"#).unwrap().is_empty());
    }

    #[test]
    fn invalid_utf8_only_affects_its_own_name() {
        let data = b"[{\"username\": \"alice\", \"reason\": \"spam\"}, {\"username\": \"b\xE9b\"}]";
        assert_eq!(
            parse(data),
            vec![
                BanEntry::new("alice", "spam"),
                BanEntry::new("b\u{FFFD}b", ""),
            ]
        );

        let names = b"[\"Zo\xEB\", \"eve\"]";
        assert_eq!(
            parse(names),
            vec![BanEntry::new("zo\u{FFFD}", ""), BanEntry::new("eve", "")]
        );
    }

    proptest! {
        #[test]
        fn every_name_is_lowercased(names in prop::collection::vec("[a-zA-Z0-9_]{1,12}", 0..20)) {
            let data = serde_json::to_vec(&names).unwrap();
            let entries = parse(&data);
            prop_assert_eq!(entries.len(), names.len());
            for (entry, name) in entries.iter().zip(&names) {
                prop_assert_eq!(&entry.username, &name.to_lowercase());
                prop_assert!(entry.reason.is_empty());
            }
        }

        #[test]
        fn every_record_keeps_its_reason(
            records in prop::collection::vec(("[a-zA-Z0-9_]{1,12}", "[a-z ]{0,16}"), 0..20)
        ) {
            let items: Vec<Value> = records
                .iter()
                .map(|(name, reason)| serde_json::json!({"username": name, "reason": reason}))
                .collect();
            let data = serde_json::to_vec(&items).unwrap();
            let entries = parse(&data);
            prop_assert_eq!(entries.len(), records.len());
            for (entry, (name, reason)) in entries.iter().zip(&records) {
                prop_assert_eq!(&entry.username, &name.to_lowercase());
                prop_assert_eq!(&entry.reason, reason);
            }
        }
    }
}
