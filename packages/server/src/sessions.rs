use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// In-process store of live admin session tokens.
///
/// Tokens are opaque UUIDs scoped to the browser session: they live until
/// explicit logout or process exit, matching the session-cookie lifetime.
#[derive(Clone, Default)]
pub struct SessionStore {
    tokens: Arc<DashMap<Uuid, DateTime<Utc>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh session token.
    pub fn issue(&self) -> Uuid {
        let token = Uuid::new_v4();
        self.tokens.insert(token, Utc::now());
        token
    }

    pub fn is_valid(&self, token: &Uuid) -> bool {
        self.tokens.contains_key(token)
    }

    /// Invalidate a token. Returns whether it was live.
    pub fn revoke(&self, token: &Uuid) -> bool {
        self.tokens.remove(token).is_some()
    }
}
