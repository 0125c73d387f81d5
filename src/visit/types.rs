use crate::api::ApiError;
use crate::models::{PropertyId, UserId};
use crate::session::Route;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    /// Date picker for a new visit request
    Booking,
    /// Read-only contact details of the lister
    ViewingDetails,
}

/// Open modal together with its transient input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Booking {
        visit_date: String,
        last_error: Option<String>,
    },
    ViewingDetails,
}

impl Modal {
    pub fn mode(&self) -> ModalMode {
        match self {
            Modal::Booking { .. } => ModalMode::Booking,
            Modal::ViewingDetails => ModalMode::ViewingDetails,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    Unknown,
    NotScheduled,
    Scheduled,
    ModalOpen(ModalMode),
}

/// What the card offers in its action area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    ScheduleVisit,
    ViewDetails,
    QuotaExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    RedirectToLogin(Route),
    QuotaExhausted,
    Opened(ModalMode),
}

/// Identity a schedule-status query was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTicket {
    pub(crate) generation: u64,
    pub user_id: UserId,
    pub property_id: PropertyId,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no booking form is open")]
    NotBooking,

    #[error("sign in to schedule a visit")]
    NotAuthenticated,

    #[error("no free visits left")]
    QuotaExhausted,

    #[error("please select a visit date")]
    MissingVisitDate,

    #[error("invalid visit date '{0}', expected YYYY-MM-DD")]
    InvalidVisitDate(String),

    #[error("visit request failed: {0}")]
    Request(#[from] ApiError),
}
