//! Booking wizard state machine.
//!
//! [`WizardState`] is a plain reducer: [`WizardState::apply`] takes one
//! [`WizardAction`] and reports whether anything changed. [`BookingWizard`]
//! owns a state together with its [`StatePersistence`] and writes a snapshot
//! after every change, so callers see a single dispatch interface.
//!
//! There is no terminal state. A submission appends the booking, clears the
//! draft and returns to the first step.

use crate::{
    core::{
        booking::{Booking, BookingDraft, BookingStatus, DraftUpdate},
        persistence::{SnapshotStore, StatePersistence},
        step::Step,
        validation,
    },
    errors::Result,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The whole wizard: draft, position and every finalized booking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub current_booking: BookingDraft,
    pub current_step: Step,
    /// Finalized bookings in submission order
    pub bookings: Vec<Booking>,
}

/// A single state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    /// Shallow-merge fields into the draft. Never validated.
    UpdateDraft(DraftUpdate),
    /// Jump straight to a step, e.g. "edit" links on the review step.
    SetStep(Step),
    /// Move forward one step if the current step's gate holds.
    AdvanceStep,
    /// Move back one step unless already on the first.
    RetreatStep,
    /// Append a finalized booking and start a fresh draft.
    Submit(Box<Booking>),
    /// Change the status of an existing booking; unknown ids are ignored.
    SetBookingStatus { id: String, status: BookingStatus },
    /// Discard the draft and return to the first step.
    Reset,
}

impl WizardState {
    /// Applies `action`, returning `true` when the state changed.
    #[must_use]
    pub fn apply(&mut self, action: WizardAction) -> bool {
        match action {
            WizardAction::UpdateDraft(update) => {
                self.current_booking.merge(update);
                true
            }
            WizardAction::SetStep(step) => {
                self.current_step = step;
                true
            }
            WizardAction::AdvanceStep => {
                if !self.can_advance() {
                    return false;
                }
                match self.current_step.next() {
                    Some(next) => {
                        self.current_step = next;
                        true
                    }
                    None => false,
                }
            }
            WizardAction::RetreatStep => match self.current_step.previous() {
                Some(previous) => {
                    self.current_step = previous;
                    true
                }
                None => false,
            },
            WizardAction::Submit(booking) => {
                self.bookings.push(*booking);
                self.current_booking = BookingDraft::default();
                self.current_step = Step::FIRST;
                true
            }
            WizardAction::SetBookingStatus { id, status } => {
                match self.bookings.iter_mut().find(|booking| booking.id == id) {
                    Some(booking) => {
                        booking.status = status;
                        true
                    }
                    None => {
                        debug!(booking_id = %id, "Ignoring status update for unknown booking");
                        false
                    }
                }
            }
            WizardAction::Reset => {
                self.current_booking = BookingDraft::default();
                self.current_step = Step::FIRST;
                true
            }
        }
    }

    /// Whether the current step's gate holds for the current draft.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        validation::can_advance(self.current_step, &self.current_booking)
    }

    /// Finds a finalized booking by id.
    #[must_use]
    pub fn booking(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|booking| booking.id == id)
    }
}

/// A wizard state bound to the storage it is persisted in.
#[derive(Debug)]
pub struct BookingWizard<B> {
    state: WizardState,
    persistence: StatePersistence<B>,
}

impl<B: SnapshotStore> BookingWizard<B> {
    /// Rehydrates from storage, falling back to a fresh state.
    pub async fn load(persistence: StatePersistence<B>) -> Self {
        let state = persistence.load().await;
        Self { state, persistence }
    }

    #[must_use]
    pub const fn state(&self) -> &WizardState {
        &self.state
    }

    #[must_use]
    pub const fn current_step(&self) -> Step {
        self.state.current_step
    }

    #[must_use]
    pub const fn draft(&self) -> &BookingDraft {
        &self.state.current_booking
    }

    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        &self.state.bookings
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.state.can_advance()
    }

    #[must_use]
    pub const fn persistence(&self) -> &StatePersistence<B> {
        &self.persistence
    }

    /// Applies `action` and persists the new state if it changed.
    ///
    /// A failed write is returned as an error; the in-memory change is kept.
    pub async fn dispatch(&mut self, action: WizardAction) -> Result<bool> {
        let changed = self.state.apply(action);
        if changed {
            self.persistence.save(&self.state).await?;
        }
        Ok(changed)
    }

    pub async fn update_draft(&mut self, update: DraftUpdate) -> Result<()> {
        self.dispatch(WizardAction::UpdateDraft(update)).await?;
        Ok(())
    }

    pub async fn set_step(&mut self, step: Step) -> Result<()> {
        self.dispatch(WizardAction::SetStep(step)).await?;
        Ok(())
    }

    /// Returns `false` when the gate is closed or the wizard is on the last step.
    pub async fn advance_step(&mut self) -> Result<bool> {
        self.dispatch(WizardAction::AdvanceStep).await
    }

    /// Returns `false` when already on the first step.
    pub async fn retreat_step(&mut self) -> Result<bool> {
        self.dispatch(WizardAction::RetreatStep).await
    }

    /// Appends a finalized booking. Completeness is the caller's concern.
    pub async fn submit(&mut self, booking: Booking) -> Result<()> {
        let id = booking.id.clone();
        self.dispatch(WizardAction::Submit(Box::new(booking))).await?;
        info!(booking_id = %id, total = self.state.bookings.len(), "Booking recorded");
        Ok(())
    }

    /// Returns `false` (and writes nothing) when no booking has `id`.
    pub async fn set_booking_status(&mut self, id: &str, status: BookingStatus) -> Result<bool> {
        let changed = self
            .dispatch(WizardAction::SetBookingStatus {
                id: id.to_string(),
                status,
            })
            .await?;
        if changed {
            info!(booking_id = %id, %status, "Booking status updated");
        }
        Ok(changed)
    }

    pub async fn reset(&mut self) -> Result<()> {
        self.dispatch(WizardAction::Reset).await?;
        Ok(())
    }
}
