//! Submission assembly - turns the reviewed draft into a [`Booking`].
//!
//! The booking is built from the draft plus the matching catalog entry, handed
//! to a [`SubmissionGateway`] (today a fixed delay standing in for a backend
//! call), and then recorded on the wizard.

use crate::{
    core::{
        booking::{Booking, BookingDraft, BookingStatus},
        catalog::{Catalog, ServiceCategory},
        persistence::SnapshotStore,
        step::Step,
        wizard::BookingWizard,
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Prefix of every generated booking id.
pub const BOOKING_ID_PREFIX: &str = "BK";

/// Where a reviewed draft is sent before the booking is recorded locally.
pub trait SubmissionGateway {
    fn submit(&self, draft: &BookingDraft) -> impl Future<Output = Result<()>> + Send;
}

/// Accepts every booking after a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

impl SubmissionGateway for SimulatedGateway {
    async fn submit(&self, draft: &BookingDraft) -> Result<()> {
        debug!(
            sub_category = %draft.sub_category,
            delay_ms = self.delay.as_millis(),
            "Submitting booking"
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// `BK` followed by `now` in epoch milliseconds. If that id is already
/// taken, the millisecond value is bumped until it is free.
#[must_use]
pub fn generate_booking_id(now: DateTime<Utc>, existing: &[Booking]) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = format!("{BOOKING_ID_PREFIX}{millis}");
        if !existing.iter().any(|booking| booking.id == candidate) {
            return candidate;
        }
        millis += 1;
    }
}

/// Builds a pending booking from `draft`.
///
/// A category or sub-service missing from the catalog, including no category
/// at all, yields an empty service name and a zero amount.
#[must_use]
pub fn assemble_booking(
    draft: &BookingDraft,
    catalog: &Catalog,
    id: String,
    now: DateTime<Utc>,
) -> Booking {
    let service = draft
        .category
        .and_then(|category| catalog.sub_service(category, &draft.sub_category));

    let (service_name, total_amount) = match service {
        Some(service) => (service.name.clone(), service.price),
        None => {
            warn!(
                category = draft.category.map_or("", ServiceCategory::as_str),
                sub_category = %draft.sub_category,
                "Sub-service not found in catalog, recording booking without price"
            );
            (String::new(), 0)
        }
    };

    Booking {
        id,
        category: draft.category,
        sub_category: draft.sub_category.clone(),
        location: draft.location.clone(),
        date: draft.date.clone(),
        time: draft.time.clone(),
        user_details: draft.user_details.clone(),
        address: draft.address.clone(),
        status: BookingStatus::Pending,
        created_at: now,
        service_name,
        total_amount,
    }
}

/// Confirms the draft on the review step: sends it through `gateway`,
/// assembles the booking once the gateway accepts it, records it on the
/// wizard and returns it for the success view.
///
/// The id and `created_at` are stamped after the gateway call returns.
pub async fn confirm_booking<B, G>(
    wizard: &mut BookingWizard<B>,
    catalog: &Catalog,
    gateway: &G,
) -> Result<Booking>
where
    B: SnapshotStore,
    G: SubmissionGateway,
{
    let step = wizard.current_step();
    if step != Step::REVIEW {
        return Err(Error::NotAtReview {
            step: step.number(),
        });
    }

    gateway.submit(wizard.draft()).await?;

    let now = Utc::now();
    let id = generate_booking_id(now, wizard.bookings());
    let booking = assemble_booking(wizard.draft(), catalog, id, now);
    wizard.submit(booking.clone()).await?;

    info!(
        booking_id = %booking.id,
        service = %booking.service_name,
        amount = booking.total_amount,
        "Booking confirmed"
    );
    Ok(booking)
}
