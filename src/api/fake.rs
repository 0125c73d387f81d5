use crate::api::traits::RentalApi;
use crate::api::types::{ApiError, RegistrationReceipt};
use crate::models::{PropertyId, Registration, User, UserId, VisitRequest};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory `RentalApi` that records every call and answers from a script.
/// `None` replies fail with a 500.
#[derive(Default)]
pub struct FakeApi {
    pub status_reply: Mutex<Option<bool>>,
    pub visit_reply: Mutex<Option<User>>,
    pub register_reply: Mutex<Option<Result<String, (u16, String)>>>,
    pub login_reply: Mutex<Option<User>>,
    pub status_calls: Mutex<Vec<(UserId, PropertyId)>>,
    pub visit_requests: Mutex<Vec<VisitRequest>>,
    pub registrations: Mutex<Vec<Registration>>,
}

impl FakeApi {
    pub fn with_status(scheduled: bool) -> Self {
        let api = Self::default();
        *api.status_reply.lock().unwrap() = Some(scheduled);
        api
    }

    pub fn reply_to_visit(self, user: User) -> Self {
        *self.visit_reply.lock().unwrap() = Some(user);
        self
    }

    pub fn reply_to_register(self, reply: Result<&str, (u16, &str)>) -> Self {
        *self.register_reply.lock().unwrap() = Some(
            reply
                .map(str::to_string)
                .map_err(|(status, message)| (status, message.to_string())),
        );
        self
    }

    pub fn status_call_count(&self) -> usize {
        self.status_calls.lock().unwrap().len()
    }

    pub fn visit_call_count(&self) -> usize {
        self.visit_requests.lock().unwrap().len()
    }

    pub fn register_call_count(&self) -> usize {
        self.registrations.lock().unwrap().len()
    }
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}

#[async_trait]
impl RentalApi for FakeApi {
    async fn schedule_status(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> Result<bool, ApiError> {
        self.status_calls.lock().unwrap().push((user_id, property_id));
        (*self.status_reply.lock().unwrap()).ok_or_else(server_error)
    }

    async fn schedule_visit(&self, request: &VisitRequest) -> Result<User, ApiError> {
        self.visit_requests.lock().unwrap().push(request.clone());
        self.visit_reply.lock().unwrap().clone().ok_or_else(server_error)
    }

    async fn register(&self, registration: &Registration) -> Result<RegistrationReceipt, ApiError> {
        self.registrations.lock().unwrap().push(registration.clone());
        match self.register_reply.lock().unwrap().clone() {
            Some(Ok(message)) => Ok(RegistrationReceipt {
                status: 201,
                message,
            }),
            Some(Err((status, message))) => Err(ApiError::Status { status, message }),
            None => Err(server_error()),
        }
    }

    async fn login(&self, _contact_number: &str, _password: &str) -> Result<User, ApiError> {
        self.login_reply.lock().unwrap().clone().ok_or_else(server_error)
    }
}
