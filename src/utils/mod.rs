pub mod envelope;
pub mod error;
pub mod logger;
pub mod validation;
