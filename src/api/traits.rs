use crate::api::types::{ApiError, RegistrationReceipt};
use crate::models::{PropertyId, Registration, User, UserId, VisitRequest};
use async_trait::async_trait;

/// Calls consumed from the rental marketplace service
/// Kept behind a trait so the workflows can run against an in-memory fake
#[async_trait]
pub trait RentalApi: Send + Sync {
    /// Whether the user already requested a visit to the property
    async fn schedule_status(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> Result<bool, ApiError>;

    /// Request a visit; the service answers with the updated user record
    async fn schedule_visit(&self, request: &VisitRequest) -> Result<User, ApiError>;

    async fn register(&self, registration: &Registration) -> Result<RegistrationReceipt, ApiError>;

    async fn login(&self, contact_number: &str, password: &str) -> Result<User, ApiError>;
}
