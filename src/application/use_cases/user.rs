use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::{
        session::{EnrichedSession, Session},
        subscription::Subscription,
        user::{User, fold_email},
    },
};

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Creates a user for `email_folded` unless one already exists, in a single
    /// conditional write. Returns the stored user either way.
    async fn upsert_by_email(&self, email: &str, email_folded: &str)
    -> AppResult<ProvisionedUser>;
    async fn get_by_folded_email(&self, email_folded: &str) -> AppResult<Option<User>>;
}

#[async_trait]
pub trait SubscriptionRepo: Send + Sync {
    /// Intersection of the user's subscriptions with the active ones. When several
    /// match, the oldest is returned.
    async fn get_active_for_user(&self, user_id: Uuid) -> AppResult<Option<Subscription>>;
}

#[derive(Debug, Clone)]
pub struct ProvisionedUser {
    pub user: User,
    /// False when the user already existed.
    pub created: bool,
}

/// Outcome of an active-subscription lookup. The session contract collapses
/// everything but `Active` to "no subscription"; the variants exist for logs.
#[derive(Debug)]
pub enum SubscriptionLookup {
    Active(Subscription),
    NoEmail,
    UnknownUser,
    NoActiveSubscription,
    LookupFailed(AppError),
}

impl SubscriptionLookup {
    pub fn code(&self) -> &'static str {
        match self {
            SubscriptionLookup::Active(_) => "ACTIVE",
            SubscriptionLookup::NoEmail => "NO_EMAIL",
            SubscriptionLookup::UnknownUser => "UNKNOWN_USER",
            SubscriptionLookup::NoActiveSubscription => "NO_ACTIVE_SUBSCRIPTION",
            SubscriptionLookup::LookupFailed(_) => "LOOKUP_FAILED",
        }
    }

    pub fn into_active(self) -> Option<Subscription> {
        match self {
            SubscriptionLookup::Active(sub) => Some(sub),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct AuthUseCases {
    users: Arc<dyn UserRepo>,
    subscriptions: Arc<dyn SubscriptionRepo>,
}

impl AuthUseCases {
    pub fn new(users: Arc<dyn UserRepo>, subscriptions: Arc<dyn SubscriptionRepo>) -> Self {
        Self {
            users,
            subscriptions,
        }
    }

    /// Sign-in hook: makes sure a user exists for `email` and reports whether the
    /// sign-in may proceed. Any failure refuses the sign-in.
    #[instrument(skip_all)]
    pub async fn provision_sign_in(&self, email: Option<&str>) -> bool {
        match self.ensure_user(email).await {
            Ok(provisioned) => {
                info!(
                    user_id = %provisioned.user.id,
                    created = provisioned.created,
                    "Sign-in allowed"
                );
                true
            }
            Err(err) => {
                warn!(code = err.code().as_str(), error = %err, "Sign-in refused");
                false
            }
        }
    }

    pub async fn ensure_user(&self, email: Option<&str>) -> AppResult<ProvisionedUser> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::InvalidInput("Email is required".into()))?;
        let email_folded = fold_email(email);
        self.users.upsert_by_email(email, &email_folded).await
    }

    /// Session hook: attaches the user's active subscription, or `null`.
    #[instrument(skip_all)]
    pub async fn enrich_session(&self, session: Session) -> EnrichedSession {
        let active = self.resolve_active_subscription(session.email()).await;
        EnrichedSession::new(session, active)
    }

    pub async fn resolve_active_subscription(&self, email: Option<&str>) -> Option<Subscription> {
        let lookup = self.lookup_active_subscription(email).await;
        match &lookup {
            SubscriptionLookup::LookupFailed(err) => {
                warn!(code = lookup.code(), error = %err, "Subscription lookup failed")
            }
            _ => debug!(code = lookup.code(), "Subscription resolved"),
        }
        lookup.into_active()
    }

    pub async fn lookup_active_subscription(&self, email: Option<&str>) -> SubscriptionLookup {
        let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
            return SubscriptionLookup::NoEmail;
        };

        let user = match self.users.get_by_folded_email(&fold_email(email)).await {
            Ok(Some(user)) => user,
            Ok(None) => return SubscriptionLookup::UnknownUser,
            Err(err) => return SubscriptionLookup::LookupFailed(err),
        };

        match self.subscriptions.get_active_for_user(user.id).await {
            Ok(Some(sub)) if sub.status.is_active() => SubscriptionLookup::Active(sub),
            Ok(_) => SubscriptionLookup::NoActiveSubscription,
            Err(err) => SubscriptionLookup::LookupFailed(err),
        }
    }
}
