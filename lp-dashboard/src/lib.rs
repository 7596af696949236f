//! Web control panel that launches, probes and embeds a target web app.

pub mod controller;
pub mod error;
pub mod flash;
pub mod health;
pub mod logger;
pub mod render;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use crate::error::{DashboardError, Result as DashboardResult};
pub use crate::flash::{Flash, FlashLevel};
pub use crate::routes::build_router;
pub use crate::state::AppState;
