//! Admin reporting over finalized bookings.
//!
//! This module provides dashboard statistics, the searchable booking list and
//! single-booking lookup. All functions are pure and return structured data that
//! can be formatted by the admin console.

use crate::core::booking::{Booking, BookingStatus};
use chrono::NaiveDate;
use std::cmp::Reverse;

/// Number of bookings shown in the dashboard's recent list.
pub const RECENT_BOOKINGS_LIMIT: usize = 5;

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingStats {
    /// Every booking ever submitted
    pub total_bookings: usize,
    /// Bookings still awaiting confirmation
    pub pending_bookings: usize,
    /// Bookings marked completed
    pub completed_bookings: usize,
    /// Sum of `total_amount` over completed bookings only
    pub total_revenue: u64,
    /// Bookings created on `today` (UTC)
    pub today_bookings: usize,
}

/// Computes dashboard statistics.
///
/// # Arguments
/// * `bookings` - All finalized bookings
/// * `today` - The calendar day counted as "today"
#[must_use]
pub fn booking_stats(bookings: &[Booking], today: NaiveDate) -> BookingStats {
    let mut stats = BookingStats {
        total_bookings: bookings.len(),
        ..BookingStats::default()
    };

    for booking in bookings {
        match booking.status {
            BookingStatus::Pending => stats.pending_bookings += 1,
            BookingStatus::Completed => {
                stats.completed_bookings += 1;
                stats.total_revenue += u64::from(booking.total_amount);
            }
            BookingStatus::Confirmed | BookingStatus::InProgress | BookingStatus::Cancelled => {}
        }
        if booking.created_at.date_naive() == today {
            stats.today_bookings += 1;
        }
    }

    stats
}

/// The `limit` most recently created bookings, newest first.
#[must_use]
pub fn recent_bookings(bookings: &[Booking], limit: usize) -> Vec<&Booking> {
    let mut recent = newest_first(bookings.iter());
    recent.truncate(limit);
    recent
}

/// Criteria for the admin booking list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    /// Case-insensitive substring of the id, customer name or service name
    pub search: String,
    /// Only bookings with this status; `None` shows all
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    /// Whether `booking` satisfies both the search term and the status filter.
    #[must_use]
    pub fn matches(&self, booking: &Booking) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || booking.id.to_lowercase().contains(&needle)
            || booking.user_details.name.to_lowercase().contains(&needle)
            || booking.service_name.to_lowercase().contains(&needle);
        let matches_status = self.status.is_none_or(|status| booking.status == status);

        matches_search && matches_status
    }
}

/// Bookings matching `filter`, newest first.
#[must_use]
pub fn filter_bookings<'a>(bookings: &'a [Booking], filter: &BookingFilter) -> Vec<&'a Booking> {
    newest_first(bookings.iter().filter(|booking| filter.matches(booking)))
}

fn newest_first<'a>(bookings: impl Iterator<Item = &'a Booking>) -> Vec<&'a Booking> {
    let mut sorted: Vec<&Booking> = bookings.collect();
    sorted.sort_by_key(|booking| Reverse(booking.created_at));
    sorted
}
