//! Account registration: form state, validation and submission.

pub mod form;

pub use form::{validate, FieldErrors, SignupForm};

use crate::api::RentalApi;
use crate::session::Route;
use tracing::{info, warn};

pub const SIGNUP_SUCCESS_MESSAGE: &str = "Signup successful!";

#[derive(Debug, Clone, PartialEq)]
pub enum SignupOutcome {
    /// Account created; the viewer continues to the login page
    Registered { redirect: Route },
    /// Field errors were recorded and nothing was sent
    Invalid,
    BackendError(String),
}

/// Signup page state between submissions
#[derive(Debug, Clone, Default)]
pub struct SignupPage {
    pub form: SignupForm,
    errors: FieldErrors,
    backend_error: Option<String>,
    message: Option<String>,
}

impl SignupPage {
    pub fn new(form: SignupForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn backend_error(&self) -> Option<&str> {
        self.backend_error.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub async fn submit(&mut self, api: &dyn RentalApi) -> SignupOutcome {
        self.errors = validate(&self.form);
        if !self.errors.is_empty() {
            info!("Signup form has {} invalid field(s)", self.errors.len());
            return SignupOutcome::Invalid;
        }

        match api.register(&self.form.to_registration()).await {
            Ok(receipt) => {
                info!("Registered {} ({})", self.form.user_email, receipt.message);
                self.form = SignupForm::default();
                self.backend_error = None;
                self.message = Some(SIGNUP_SUCCESS_MESSAGE.to_string());
                SignupOutcome::Registered {
                    redirect: Route::Login,
                }
            }
            Err(e) => {
                warn!("Registration failed: {}", e);
                let message = format!("Error: {}", e.user_message());
                self.backend_error = Some(message.clone());
                SignupOutcome::BackendError(message)
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::form::tests::valid_form;
    use super::form::SignupField;
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::models::ProfilePhoto;

    #[tokio::test]
    async fn invalid_form_never_reaches_service() {
        let api = FakeApi::default().reply_to_register(Ok("created"));
        let mut page = SignupPage::new(SignupForm {
            user_password: "abc123".to_string(),
            confirm_password: "abc123".to_string(),
            ..valid_form()
        });

        assert_eq!(page.submit(&api).await, SignupOutcome::Invalid);
        assert_eq!(api.register_call_count(), 0);
        assert!(page.errors().get(SignupField::UserPassword).is_some());
    }

    #[tokio::test]
    async fn success_resets_form_and_redirects() {
        let api = FakeApi::default().reply_to_register(Ok("User registered"));
        let mut form = valid_form();
        form.profile_photo = Some(ProfilePhoto {
            file_name: "me.png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        });
        let mut page = SignupPage::new(form);

        let outcome = page.submit(&api).await;

        assert_eq!(
            outcome,
            SignupOutcome::Registered {
                redirect: Route::Login
            }
        );
        assert_eq!(page.message(), Some(SIGNUP_SUCCESS_MESSAGE));
        assert_eq!(page.form, SignupForm::default());

        let sent = api.registrations.lock().unwrap();
        assert_eq!(sent[0].contact_number, "9876543210");
        assert_eq!(sent[0].profile_photo.as_ref().unwrap().file_name, "me.png");
    }

    #[tokio::test]
    async fn backend_rejection_becomes_single_message() {
        let api = FakeApi::default().reply_to_register(Err((409, "Email already registered")));
        let mut page = SignupPage::new(valid_form());

        let outcome = page.submit(&api).await;

        assert_eq!(
            outcome,
            SignupOutcome::BackendError("Error: Email already registered".to_string())
        );
        assert_eq!(page.backend_error(), Some("Error: Email already registered"));
        assert_eq!(page.form, valid_form());
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let api = FakeApi::default();
        let mut page = SignupPage::new(valid_form());
        page.submit(&api).await;
        assert!(page.backend_error().is_some());

        page.reset();

        assert_eq!(page.form, SignupForm::default());
        assert!(page.errors().is_empty());
        assert!(page.backend_error().is_none());
        assert!(page.message().is_none());
    }
}
