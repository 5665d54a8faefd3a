// API routes and handlers

pub mod auth;
pub mod error;
pub mod extract;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod routes;
pub mod tags;

use serde::Deserialize;

pub use error::ApiError;
pub use routes::AppState;

/// Query parameters shared by the tag and ingredient list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListFilter {
    pub assigned_only: Option<i32>,
}

impl ListFilter {
    /// Any nonzero value enables the filter; absent or zero disables it
    pub fn assigned_only(&self) -> bool {
        matches!(self.assigned_only, Some(n) if n != 0)
    }
}
