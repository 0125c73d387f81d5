//! Client for the RentUp rental marketplace: listing cards, visit scheduling and signup.

pub mod api;
pub mod cli;
pub mod listing;
pub mod models;
pub mod session;
pub mod signup;
pub mod visit;
