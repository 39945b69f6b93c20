mod client;
mod detail;
mod models;

pub use client::AccountClient;
pub use detail::{describe_detail, UPDATE_FAILED_MESSAGE};
pub use models::{ProfileUpdate, User};
