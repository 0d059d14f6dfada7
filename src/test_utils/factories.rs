//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::{
    cms_post::{BlockKind, CmsPost, RichTextBlock},
    session::Session,
    subscription::{Subscription, SubscriptionStatus},
};

/// Create an active subscription for `user_id`.
pub fn create_test_subscription(
    user_id: Uuid,
    overrides: impl FnOnce(&mut Subscription),
) -> Subscription {
    let mut subscription = Subscription {
        id: format!("sub_test{}", Uuid::new_v4().simple()),
        user_id,
        status: SubscriptionStatus::Active,
        price_id: Some("price_test123".to_string()),
        created_at: Some(test_datetime()),
    };
    overrides(&mut subscription);
    subscription
}

/// Create a CMS post with a title and two paragraphs, published 2021-04-01.
pub fn create_test_post(uid: &str, overrides: impl FnOnce(&mut CmsPost)) -> CmsPost {
    let mut post = CmsPost {
        uid: uid.to_string(),
        last_publication_date: Some(test_datetime()),
        title: vec![RichTextBlock::new(BlockKind::Heading1, "Test post")],
        content: vec![
            RichTextBlock::new(BlockKind::Paragraph, "First paragraph."),
            RichTextBlock::new(BlockKind::Paragraph, "Second paragraph."),
        ],
    };
    overrides(&mut post);
    post
}

/// A framework session for a signed-in user.
pub fn session_for(email: &str) -> Session {
    let raw = serde_json::json!({
        "user": { "email": email },
        "expires": "2026-11-14T00:00:00.000Z"
    });
    serde_json::from_value(raw).unwrap()
}

/// Fixed timestamp used across fixtures.
pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 4, 1, 12, 0, 0).unwrap()
}
