//! In-memory mock implementations for the user and subscription stores.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::{subscription::Subscription, user::User},
    use_cases::user::{ProvisionedUser, SubscriptionRepo, UserRepo},
};

// ============================================================================
// InMemoryUserRepo
// ============================================================================

/// In-memory implementation of UserRepo, keyed by folded email like the
/// unique index it stands in for.
#[derive(Default)]
pub struct InMemoryUserRepo {
    pub users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn upsert_by_email(
        &self,
        email: &str,
        email_folded: &str,
    ) -> AppResult<ProvisionedUser> {
        let mut users = self.users.lock().unwrap();

        if let Some(existing) = users.get(email_folded) {
            return Ok(ProvisionedUser {
                user: existing.clone(),
                created: false,
            });
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            email_folded: email_folded.to_string(),
            created_at: Some(chrono::Utc::now()),
        };
        users.insert(email_folded.to_string(), user.clone());
        Ok(ProvisionedUser {
            user,
            created: true,
        })
    }

    async fn get_by_folded_email(&self, email_folded: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(email_folded).cloned())
    }
}

/// UserRepo whose every call fails as if the database were unreachable.
#[derive(Default)]
pub struct FailingUserRepo;

#[async_trait]
impl UserRepo for FailingUserRepo {
    async fn upsert_by_email(&self, _email: &str, _folded: &str) -> AppResult<ProvisionedUser> {
        Err(AppError::Database("Database operation failed".into()))
    }

    async fn get_by_folded_email(&self, _email_folded: &str) -> AppResult<Option<User>> {
        Err(AppError::Database("Database operation failed".into()))
    }
}

// ============================================================================
// InMemorySubscriptionRepo
// ============================================================================

/// In-memory implementation of SubscriptionRepo. Tests write subscriptions
/// directly, the way the billing integration would.
#[derive(Default)]
pub struct InMemorySubscriptionRepo {
    pub subscriptions: Mutex<Vec<Subscription>>,
}

impl InMemorySubscriptionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, subscription: Subscription) {
        self.subscriptions.lock().unwrap().push(subscription);
    }
}

#[async_trait]
impl SubscriptionRepo for InMemorySubscriptionRepo {
    async fn get_active_for_user(&self, user_id: Uuid) -> AppResult<Option<Subscription>> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id && s.status.is_active())
            .min_by_key(|s| s.created_at)
            .cloned())
    }
}

#[derive(Default)]
pub struct FailingSubscriptionRepo;

#[async_trait]
impl SubscriptionRepo for FailingSubscriptionRepo {
    async fn get_active_for_user(&self, _user_id: Uuid) -> AppResult<Option<Subscription>> {
        Err(AppError::Database("Database operation failed".into()))
    }
}
