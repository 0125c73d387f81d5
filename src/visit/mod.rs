pub mod quota;
pub mod types;
pub mod workflow;

pub use types::{CardAction, ClickOutcome, Modal, ModalMode};
pub use workflow::VisitWorkflow;
