//! Inbound presence events.
//!
//! Activity, join, and leave events all land in the store as plain upserts.
//! A leave never removes a record.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::record::Participant;
use super::store::PresenceStore;
use crate::error::RollcallError;

/// A message or other activity by a user in a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub chat_id: i64,
    /// Sender, absent for anonymous or channel posts.
    #[serde(default)]
    pub user: Option<Participant>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// One or more users joining a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinEvent {
    pub chat_id: i64,
    #[serde(default)]
    pub users: Vec<Participant>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// A user leaving or being removed from a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveEvent {
    pub chat_id: i64,
    #[serde(default)]
    pub user: Option<Participant>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Any inbound event, tagged by `kind` on the wire.
///
/// ```json
/// {"kind": "join", "chat_id": -100, "users": [{"user_id": 7, "username": "ada"}], "timestamp": 1700000000}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PresenceEvent {
    Activity(ActivityEvent),
    Join(JoinEvent),
    Leave(LeaveEvent),
}

impl PresenceEvent {
    #[must_use]
    pub const fn chat_id(&self) -> i64 {
        match self {
            Self::Activity(e) => e.chat_id,
            Self::Join(e) => e.chat_id,
            Self::Leave(e) => e.chat_id,
        }
    }
}

/// Apply one event to the store.
///
/// Returns the number of records written. Events without a user write
/// nothing.
///
/// # Errors
///
/// Returns `StorageUnavailable` if a write fails. Earlier users of a join
/// event stay written.
pub fn apply_event(store: &PresenceStore, event: &PresenceEvent) -> Result<usize, RollcallError> {
    match event {
        PresenceEvent::Activity(e) => {
            let written = store.upsert(e.chat_id, e.user.as_ref(), e.timestamp)?;
            if let Some(user) = e.user.as_ref().filter(|_| written) {
                debug!(chat_id = e.chat_id, user_id = user.user_id, "activity recorded");
            }
            Ok(usize::from(written))
        }
        PresenceEvent::Join(e) => {
            let mut count = 0;
            for user in &e.users {
                if store.upsert(e.chat_id, Some(user), e.timestamp)? {
                    info!(
                        chat_id = e.chat_id,
                        user_id = user.user_id,
                        username = %user.attrs.username,
                        "new member"
                    );
                    count += 1;
                }
            }
            Ok(count)
        }
        PresenceEvent::Leave(e) => {
            let written = store.upsert(e.chat_id, e.user.as_ref(), e.timestamp)?;
            if let Some(user) = e.user.as_ref().filter(|_| written) {
                info!(
                    chat_id = e.chat_id,
                    user_id = user.user_id,
                    username = %user.attrs.username,
                    "member left"
                );
            }
            Ok(usize::from(written))
        }
    }
}
