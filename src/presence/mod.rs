//! Presence tracking.
//!
//! Keeps the last observed presence of each user per chat, fed by activity,
//! join, and leave events.

mod admin;
mod events;
mod record;
mod store;

pub use admin::{AdminGate, ConfigAdminGate};
#[cfg(test)]
pub use admin::MockAdminGate;
pub use events::{apply_event, ActivityEvent, JoinEvent, LeaveEvent, PresenceEvent};
pub use record::{canonical_cmp, sort_canonical, Participant, PresenceRecord, UserAttrs};
pub use store::{ChatSummary, PresenceStore, Snapshot};

#[cfg(test)]
pub(crate) use record::sample_record;
