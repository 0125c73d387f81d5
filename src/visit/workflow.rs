use crate::api::{ApiError, RentalApi};
use crate::models::{Property, PropertyId, ScheduleStatus, User, UserId, VisitRequest};
use crate::session::{Route, Session, SessionEvent};
use crate::visit::quota::QuotaGate;
use crate::visit::types::{
    CardAction, ClickOutcome, Modal, StatusTicket, SubmitError, VisitState,
};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

const VISIT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Visit scheduling state for one listing card
#[derive(Debug, Clone)]
pub struct VisitWorkflow {
    property: Property,
    status: ScheduleStatus,
    modal: Option<Modal>,
    /// Identity the current status belongs to; `None` until the first sync
    identity: Option<(Option<UserId>, PropertyId)>,
    generation: u64,
}

impl VisitWorkflow {
    pub fn new(property: Property) -> Self {
        Self {
            property,
            status: ScheduleStatus::Unknown,
            modal: None,
            identity: None,
            generation: 0,
        }
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    /// Swap the listing; the next `sync` treats it as an identity change
    pub fn set_property(&mut self, property: Property) {
        self.property = property;
    }

    pub fn status(&self) -> ScheduleStatus {
        self.status
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn state(&self) -> VisitState {
        match (&self.modal, self.status) {
            (Some(modal), _) => VisitState::ModalOpen(modal.mode()),
            (None, ScheduleStatus::Unknown) => VisitState::Unknown,
            (None, ScheduleStatus::NotScheduled) => VisitState::NotScheduled,
            (None, ScheduleStatus::Scheduled) => VisitState::Scheduled,
        }
    }

    /// Check the (user, property) identity against the last one seen.
    ///
    /// On a change the status resets to `Unknown`, any modal closes and a ticket is
    /// returned for the status query. Returns `None` when nothing changed or when
    /// nobody is signed in.
    pub fn sync(&mut self, session: &Session) -> Option<StatusTicket> {
        let identity = (session.user_id(), self.property.property_id);
        if self.identity == Some(identity) {
            return None;
        }

        self.identity = Some(identity);
        self.generation += 1;
        self.status = ScheduleStatus::Unknown;
        self.modal = None;

        let user_id = identity.0?;
        Some(StatusTicket {
            generation: self.generation,
            user_id,
            property_id: identity.1,
        })
    }

    /// Apply a status answer. Returns false when the answer was not applied.
    pub fn apply_status(&mut self, ticket: StatusTicket, result: Result<bool, ApiError>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale schedule status for user {} / property {}",
                ticket.user_id, ticket.property_id
            );
            return false;
        }

        match result {
            Ok(scheduled) => {
                self.status = ScheduleStatus::from(scheduled);
                debug!(
                    "Property {} schedule status: {:?}",
                    ticket.property_id, self.status
                );
                true
            }
            Err(e) => {
                warn!(
                    "Failed to fetch schedule status for property {}: {}",
                    ticket.property_id, e
                );
                false
            }
        }
    }

    /// Query the schedule status if the identity changed since the last call
    pub async fn refresh_status(&mut self, api: &dyn RentalApi, session: &Session) {
        if let Some(ticket) = self.sync(session) {
            let result = api.schedule_status(ticket.user_id, ticket.property_id).await;
            self.apply_status(ticket, result);
        }
    }

    pub fn primary_action(&self, session: &Session) -> CardAction {
        if self.status == ScheduleStatus::Scheduled {
            CardAction::ViewDetails
        } else if session.is_authenticated() && !QuotaGate::from_session(session).is_open() {
            CardAction::QuotaExhausted
        } else {
            CardAction::ScheduleVisit
        }
    }

    pub fn click(&mut self, session: &Session) -> ClickOutcome {
        if !session.is_authenticated() {
            info!("Not signed in, redirecting to {}", Route::Login.path());
            return ClickOutcome::RedirectToLogin(Route::Login);
        }

        if let Some(modal) = &self.modal {
            return ClickOutcome::Opened(modal.mode());
        }

        // An existing visit stays viewable whatever the quota
        let modal = if self.status == ScheduleStatus::Scheduled {
            Modal::ViewingDetails
        } else if QuotaGate::from_session(session).is_open() {
            Modal::Booking {
                visit_date: String::new(),
                last_error: None,
            }
        } else {
            return ClickOutcome::QuotaExhausted;
        };

        let mode = modal.mode();
        self.modal = Some(modal);
        ClickOutcome::Opened(mode)
    }

    /// Record the picked date. Returns false when no booking form is open.
    pub fn set_visit_date(&mut self, date: impl Into<String>) -> bool {
        match &mut self.modal {
            Some(Modal::Booking { visit_date, .. }) => {
                *visit_date = date.into();
                true
            }
            _ => false,
        }
    }

    /// Close the modal and discard whatever was entered
    pub fn close(&mut self) {
        self.modal = None;
    }

    pub async fn submit(
        &mut self,
        api: &dyn RentalApi,
        session: &mut Session,
    ) -> Result<User, SubmitError> {
        let request = match self.build_request(session) {
            Ok(request) => request,
            Err(e) => {
                self.record_error(e.to_string());
                return Err(e);
            }
        };

        info!(
            "Requesting visit to property {} on {}",
            request.property_id, request.visit_date
        );

        match api.schedule_visit(&request).await {
            Ok(user) => {
                session.dispatch(SessionEvent::RecordCommitted(user.clone()));
                self.modal = None;
                // Re-derive status from the service for the committed record
                self.identity = None;
                self.refresh_status(api, session).await;
                Ok(user)
            }
            Err(e) => {
                warn!(
                    "Visit request for property {} failed: {}",
                    request.property_id, e
                );
                self.record_error(format!(
                    "Could not schedule the visit: {}. Please try again.",
                    e.user_message()
                ));
                Err(SubmitError::Request(e))
            }
        }
    }

    fn build_request(&self, session: &Session) -> Result<VisitRequest, SubmitError> {
        let raw_date = match &self.modal {
            Some(Modal::Booking { visit_date, .. }) => visit_date.trim(),
            _ => return Err(SubmitError::NotBooking),
        };
        if raw_date.is_empty() {
            return Err(SubmitError::MissingVisitDate);
        }
        let visit_date = NaiveDate::parse_from_str(raw_date, VISIT_DATE_FORMAT)
            .map_err(|_| SubmitError::InvalidVisitDate(raw_date.to_string()))?;

        let user_id = session.user_id().ok_or(SubmitError::NotAuthenticated)?;
        if !QuotaGate::from_session(session).is_open() {
            return Err(SubmitError::QuotaExhausted);
        }

        Ok(VisitRequest {
            user_id,
            property_id: self.property.property_id,
            visit_date,
        })
    }

    fn record_error(&mut self, message: String) {
        if let Some(Modal::Booking { last_error, .. }) = &mut self.modal {
            *last_error = Some(message);
        }
    }
}
