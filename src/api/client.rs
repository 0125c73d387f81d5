use crate::api::traits::RentalApi;
use crate::api::types::{
    message_from_body, ApiError, ClientConfig, LoginRequest, RegistrationReceipt,
};
use crate::models::{PropertyId, Registration, User, UserId, VisitRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// `RentalApi` over HTTP with JSON and multipart payloads
pub struct HttpRentalApi {
    client: Client,
    config: ClientConfig,
}

impl HttpRentalApi {
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Service returned status: {}", status);
            return Err(status_error(status, &body));
        }

        debug!("Received {} bytes", body.len());
        Ok(serde_json::from_str(&body)?)
    }
}

fn status_error(status: StatusCode, body: &str) -> ApiError {
    ApiError::Status {
        status: status.as_u16(),
        message: message_from_body(body, status.canonical_reason().unwrap_or("request failed")),
    }
}

fn registration_form(registration: &Registration) -> Form {
    let form = Form::new()
        .text("name", registration.name.clone())
        .text("email", registration.email.clone())
        .text("password", registration.password.clone())
        .text("contactNumber", registration.contact_number.clone());

    match &registration.profile_photo {
        Some(photo) => form.part(
            "profilePhoto",
            Part::bytes(photo.bytes.clone()).file_name(photo.file_name.clone()),
        ),
        None => form,
    }
}

#[async_trait]
impl RentalApi for HttpRentalApi {
    async fn schedule_status(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> Result<bool, ApiError> {
        let url = self
            .config
            .endpoint(&format!("visit/schedule/{}/{}", user_id, property_id));
        debug!("Fetching URL: {}", url);

        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    async fn schedule_visit(&self, request: &VisitRequest) -> Result<User, ApiError> {
        let url = self.config.endpoint("visit/schedule");
        debug!("Posting visit request to {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        let user: User = Self::read_json(response).await?;

        info!(
            "Visit to property {} scheduled for {} ({} visits left)",
            request.property_id, request.visit_date, user.remaining_visits
        );
        Ok(user)
    }

    async fn register(&self, registration: &Registration) -> Result<RegistrationReceipt, ApiError> {
        let url = self.config.endpoint("users/register");
        debug!("Posting registration to {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(registration_form(registration))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Only 201 counts as a created account
        if status != StatusCode::CREATED {
            warn!("Registration returned status: {}", status);
            return Err(status_error(status, &body));
        }

        Ok(RegistrationReceipt {
            status: status.as_u16(),
            message: message_from_body(&body, "Created"),
        })
    }

    async fn login(&self, contact_number: &str, password: &str) -> Result<User, ApiError> {
        let url = self.config.endpoint("users/login");
        debug!("Posting login to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                mobile_number: contact_number,
                password,
            })
            .send()
            .await?;
        Self::read_json(response).await
    }
}
