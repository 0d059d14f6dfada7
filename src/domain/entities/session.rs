//! Session objects as handed over by the authentication framework.
//!
//! The session is kept as the raw JSON object it arrived as. Only `user.email`
//! is read, and only when it is a string; everything else, explicit `null`s
//! included, is written back untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::subscription::Subscription;

pub const ACTIVE_SUBSCRIPTION_FIELD: &str = "activeSubscription";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    pub fields: Map<String, Value>,
}

impl Session {
    pub fn email(&self) -> Option<&str> {
        self.fields
            .get("user")
            .and_then(|user| user.get("email"))
            .and_then(Value::as_str)
    }
}

/// A session with the resolved subscription attached. `active_subscription`
/// is always serialized, as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedSession {
    #[serde(flatten)]
    pub session: Session,
    #[serde(rename = "activeSubscription")]
    pub active_subscription: Option<Subscription>,
}

impl EnrichedSession {
    pub fn new(mut session: Session, active_subscription: Option<Subscription>) -> Self {
        // A stale value from a previous read would otherwise be serialized twice.
        session.fields.remove(ACTIVE_SUBSCRIPTION_FIELD);
        Self {
            session,
            active_subscription,
        }
    }
}
