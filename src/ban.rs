use serde::Serialize;

/// Prefix marking a reason that was combined from duplicate entries
pub const DUP_MARKER: &str = "[dup] ";

/// A single ban: a lowercased username and an optional reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct BanEntry {
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
}

impl BanEntry {
    /// Build an entry, normalizing the username
    pub fn new(username: &str, reason: impl Into<String>) -> Self {
        BanEntry {
            username: normalize(username),
            reason: reason.into(),
        }
    }

    /// Case-insensitive username comparison
    pub fn same_user(&self, other: &BanEntry) -> bool {
        eq_fold(&self.username, &other.username)
    }
}

/// Canonical form of a username, lowercased one character at a time so it
/// agrees with [`eq_fold`]
pub fn normalize(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).collect()
}

/// Unicode case-insensitive equality
pub fn eq_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
