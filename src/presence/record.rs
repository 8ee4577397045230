//! Presence record types and canonical ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Platform-reported attributes of a user, as carried on inbound events.
///
/// Missing fields deserialize as empty strings and `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAttrs {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_bot: bool,
    pub is_deleted: bool,
}

/// A user as observed on an event: id plus attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: i64,
    #[serde(flatten)]
    pub attrs: UserAttrs,
}

impl Participant {
    #[must_use]
    pub const fn new(user_id: i64, attrs: UserAttrs) -> Self {
        Self { user_id, attrs }
    }
}

/// Last observed presence of one user within one chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceRecord {
    pub chat_id: i64,
    pub user_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_bot: bool,
    pub is_deleted: bool,
    /// Epoch seconds of the last activity, join, or leave.
    pub last_seen: Option<i64>,
}

impl PresenceRecord {
    /// Name to show for this user: username, then first name, then the id.
    #[must_use]
    pub fn display_name(&self) -> String {
        if !self.username.is_empty() {
            self.username.clone()
        } else if !self.first_name.is_empty() {
            self.first_name.clone()
        } else {
            self.user_id.to_string()
        }
    }
}

/// Canonical ordering: `last_seen` descending with absent values last, then
/// `user_id` ascending.
#[must_use]
pub fn canonical_cmp(a: &PresenceRecord, b: &PresenceRecord) -> Ordering {
    let by_seen = match (a.last_seen, b.last_seen) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_seen.then_with(|| a.user_id.cmp(&b.user_id))
}

/// Sort records into canonical order in place.
pub fn sort_canonical(records: &mut [PresenceRecord]) {
    records.sort_by(canonical_cmp);
}

#[cfg(test)]
pub(crate) fn sample_record(user_id: i64, last_seen: Option<i64>) -> PresenceRecord {
    PresenceRecord {
        chat_id: -100,
        user_id,
        username: String::new(),
        first_name: String::new(),
        last_name: String::new(),
        is_bot: false,
        is_deleted: false,
        last_seen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallbacks() {
        let mut r = sample_record(42, None);
        assert_eq!(r.display_name(), "42");

        r.first_name = "Ada".to_string();
        assert_eq!(r.display_name(), "Ada");

        r.username = "ada_l".to_string();
        assert_eq!(r.display_name(), "ada_l");
    }

    #[test]
    fn test_canonical_order() {
        let mut records = vec![
            sample_record(5, None),
            sample_record(3, Some(100)),
            sample_record(1, Some(100)),
            sample_record(2, None),
            sample_record(9, Some(500)),
        ];
        sort_canonical(&mut records);

        let ids: Vec<i64> = records.iter().map(|r| r.user_id).collect();
        assert_eq!(ids, vec![9, 1, 3, 2, 5]);
    }

    #[test]
    fn test_user_attrs_defaults_from_partial_json() {
        let p: Participant = serde_json::from_str(r#"{"user_id": 7, "username": "x"}"#).unwrap();
        assert_eq!(p.user_id, 7);
        assert_eq!(p.attrs.username, "x");
        assert_eq!(p.attrs.first_name, "");
        assert!(!p.attrs.is_bot);
        assert!(!p.attrs.is_deleted);
    }
}
