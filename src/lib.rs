pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use config::AppConfig;
pub use crate::core::selector::{CandidateSelector, SearchOutcome};
pub use server::{router, AppState};
pub use utils::error::{Result, ScoutError};
