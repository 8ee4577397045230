//! Admin authorization seam.
//!
//! Report and export callers check this before reading the store; the store
//! and report engine never authorize anything themselves.

use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;

/// Answers whether a user administers a chat.
#[cfg_attr(test, automock)]
pub trait AdminGate {
    fn is_admin(&self, chat_id: i64, user_id: i64) -> bool;
}

/// Admin lists taken from configuration, keyed by chat id.
#[derive(Debug, Clone, Default)]
pub struct ConfigAdminGate {
    admins: HashMap<i64, Vec<i64>>,
}

impl ConfigAdminGate {
    #[must_use]
    pub const fn new(admins: HashMap<i64, Vec<i64>>) -> Self {
        Self { admins }
    }
}

impl AdminGate for ConfigAdminGate {
    fn is_admin(&self, chat_id: i64, user_id: i64) -> bool {
        self.admins
            .get(&chat_id)
            .is_some_and(|users| users.contains(&user_id))
    }
}
