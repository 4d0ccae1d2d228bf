//! Core business logic - framework-agnostic catalog, wizard, persistence,
//! submission and reporting.

/// Booking draft and finalized booking models
pub mod booking;
/// Static service catalog
pub mod catalog;
/// Current-location lookup
pub mod geolocation;
/// Whole-state snapshot storage
pub mod persistence;
/// Admin dashboard statistics and booking list queries
pub mod report;
/// Wizard step numbers
pub mod step;
/// Booking assembly and confirmation
pub mod submission;
/// Per-step advancement gates
pub mod validation;
/// Wizard reducer and persisted state machine
pub mod wizard;
