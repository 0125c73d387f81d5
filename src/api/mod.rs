pub mod client;
#[cfg(test)]
pub mod fake;
pub mod traits;
pub mod types;

pub use client::HttpRentalApi;
pub use traits::RentalApi;
pub use types::{ApiError, ClientConfig};
