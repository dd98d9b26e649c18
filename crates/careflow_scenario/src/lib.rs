// --- File: crates/careflow_scenario/src/lib.rs ---
//! Sequential scenario runner exercising the CareFlow API end to end.
//!
//! The run is a linear state machine: health → list slots → book →
//! reschedule → cancel. Each step awaits the previous one; any transport,
//! status or decode error is terminal. Absence of data at an optional point
//! (no slots, no second slot) is not an error and short-circuits only the
//! dependent step.

use careflow_client::{ApiClientError, BookRequest, CareFlowClient, RescheduleRequest};
use careflow_config::RunnerConfig;
use tracing::{info, warn};

/// Terminal state of a scenario run.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioOutcome {
    /// Book (and possibly reschedule) succeeded and the booking was cancelled.
    Completed {
        booking_id: String,
        rescheduled: bool,
    },
    /// The server offered no slots for the requested date. Defined as a
    /// no-op success, not a failure.
    NoSlots,
    /// The book response carried no `booking_id`. Most likely the slot went
    /// to a concurrent caller between listing and booking; there is no id to
    /// clean up, so no compensating cancel is attempted.
    BookingUnconfirmed,
}

impl ScenarioOutcome {
    /// Process exit code for this outcome: 0 for success (including the
    /// empty-calendar no-op), 1 when booking yielded no id.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScenarioOutcome::Completed { .. } | ScenarioOutcome::NoSlots => 0,
            ScenarioOutcome::BookingUnconfirmed => 1,
        }
    }
}

/// Drives the five scenario steps against a [`CareFlowClient`].
pub struct ScenarioRunner {
    client: CareFlowClient,
    patient_ref: String,
    visit_type: String,
    cancel_reason: Option<String>,
    provider: Option<String>,
}

impl ScenarioRunner {
    pub fn new(client: CareFlowClient, runner_config: &RunnerConfig) -> Self {
        Self {
            client,
            patient_ref: runner_config.patient_ref.clone(),
            visit_type: runner_config.visit_type.clone(),
            cancel_reason: runner_config.cancel_reason.clone(),
            provider: runner_config.provider.clone(),
        }
    }

    /// Runs the full scenario for the given date (YYYY-MM-DD).
    ///
    /// Values only flow forward: the slot list feeds book and reschedule,
    /// the booking id feeds reschedule and cancel. No state is shared
    /// beyond that.
    pub async fn run(&self, date: &str) -> Result<ScenarioOutcome, ApiClientError> {
        // Step 1: health check
        let health = self.client.health().await?;
        info!(
            "[Runner] Health: ok={}, api_key_present={}",
            health.ok, health.api_key_present
        );

        // Step 2: list slots, server order preserved
        let slots = self
            .client
            .list_slots(Some(date), self.provider.as_deref())
            .await?;
        info!("[Runner] {} slot(s) offered for {}", slots.len(), date);
        let Some(first_slot) = slots.first() else {
            info!("[Runner] Calendar is empty for {}. Nothing to book.", date);
            return Ok(ScenarioOutcome::NoSlots);
        };

        // Step 3: book the first slot
        let book_request = BookRequest::for_slot(first_slot, &self.patient_ref, &self.visit_type);
        let booked = self.client.book(&book_request).await?;
        let Some(booking_id) = booked.booking_id else {
            // The slot likely went to a concurrent caller between list and
            // book. There is no id to cancel, so the run just reports.
            warn!(
                "[Runner] Book response carried no booking_id (status: {:?}). \
                 Treating as a lost race.",
                booked.status
            );
            return Ok(ScenarioOutcome::BookingUnconfirmed);
        };
        info!(
            "[Runner] Booked {} with {} as booking {}",
            first_slot.start, first_slot.provider, booking_id
        );

        // Step 4: reschedule onto the second slot, skipped when there is none
        let mut rescheduled = false;
        if let Some(second_slot) = slots.get(1) {
            let moved = self
                .client
                .reschedule(&RescheduleRequest::to_slot(&booking_id, second_slot))
                .await?;
            info!(
                "[Runner] Rescheduled booking {} to {} (status: {:?})",
                moved.booking_id, second_slot.start, moved.status
            );
            rescheduled = true;
        } else {
            info!("[Runner] Only one slot offered; skipping reschedule.");
        }

        // Step 5: cancel whatever the booking ended up as
        let cancelled = self
            .client
            .cancel(&booking_id, self.cancel_reason.as_deref())
            .await?;
        info!(
            "[Runner] Cancelled booking {} (reason: {:?})",
            cancelled.booking_id, cancelled.reason
        );

        Ok(ScenarioOutcome::Completed {
            booking_id,
            rescheduled,
        })
    }
}
