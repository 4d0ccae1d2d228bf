//! Shared test utilities for the booking service.
//!
//! This module provides common helper functions for setting up test databases
//! and building drafts, bookings and wizards with sensible defaults.

use crate::{
    core::{
        booking::{Address, Booking, BookingDraft, BookingStatus, Location, UserDetails},
        catalog::ServiceCategory,
        persistence::{MemorySnapshotStore, StatePersistence},
        wizard::BookingWizard,
    },
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes tracing output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database-backed tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A draft that passes every step gate.
///
/// # Defaults
/// * category: home / `house-cleaning`
/// * date and time: `2025-06-01` at `10:00 AM`
/// * customer: Asha, `9876543210`
pub fn filled_draft() -> BookingDraft {
    BookingDraft {
        category: Some(ServiceCategory::Home),
        sub_category: "house-cleaning".to_string(),
        location: Location::from_address("12 Oak Rd"),
        date: "2025-06-01".to_string(),
        time: "10:00 AM".to_string(),
        user_details: UserDetails {
            name: "Asha".to_string(),
            mobile: "9876543210".to_string(),
        },
        address: Address {
            house: "12".to_string(),
            street: "Oak Rd".to_string(),
            place: "Indiranagar".to_string(),
            district: "Bengaluru".to_string(),
            pincode: "560001".to_string(),
        },
    }
}

/// A finalized booking built from [`filled_draft`].
///
/// Service name and amount match the built-in House Cleaning entry; tests
/// override fields directly when they need something else.
pub fn sample_booking(id: &str, status: BookingStatus, created_at: DateTime<Utc>) -> Booking {
    let draft = filled_draft();
    Booking {
        id: id.to_string(),
        category: Some(ServiceCategory::Home),
        sub_category: draft.sub_category,
        location: draft.location,
        date: draft.date,
        time: draft.time,
        user_details: draft.user_details,
        address: draft.address,
        status,
        created_at,
        service_name: "House Cleaning".to_string(),
        total_amount: 299,
    }
}

/// A fresh wizard over an in-memory store.
///
/// The returned store shares its entries with the wizard's, so tests can
/// inspect what was written.
pub async fn memory_wizard() -> (BookingWizard<MemorySnapshotStore>, MemorySnapshotStore) {
    let store = MemorySnapshotStore::new();
    let wizard = BookingWizard::load(StatePersistence::new(store.clone())).await;
    (wizard, store)
}
