//! Unified error type for the booking wizard and its storage layers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Step {step} is outside the wizard range 1-7")]
    InvalidStep { step: u8 },

    #[error("Unknown booking status: {value}")]
    InvalidStatus { value: String },

    #[error("Bookings can only be confirmed from the review step (current step: {step})")]
    NotAtReview { step: u8 },

    #[error("Submission failed: {message}")]
    Submission { message: String },

    #[error("Unable to get your location: {message}")]
    Geolocation { message: String },

    #[error("Command error: {0}")]
    Command(String),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
