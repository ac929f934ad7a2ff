//! Runs actuator commands off the async executor and outside room locks.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::actuator::{Actuator, ActuatorError};
use crate::domain::events::PourAction;
use crate::domain::rules::is_valid_actuator;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::ErrorCode;

/// Default duration for a raw pour when the caller gives none.
pub const DEFAULT_RAW_POUR_SECS: f64 = 1.0;
/// Stop id that halts every pump.
pub const STOP_ALL: u8 = 0;

#[derive(Clone)]
pub struct PourDispatcher {
    actuator: Arc<dyn Actuator>,
}

impl PourDispatcher {
    pub fn new(actuator: Arc<dyn Actuator>) -> Self {
        Self { actuator }
    }

    /// Fire-and-forget: pours run in order on the blocking pool. Failures
    /// are logged and never reach the caller, whose state change stands.
    pub fn dispatch(&self, actions: Vec<PourAction>) -> JoinHandle<()> {
        let actuator = Arc::clone(&self.actuator);
        tokio::task::spawn_blocking(move || {
            for action in actions {
                let duration = Duration::from_secs_f64(action.duration_seconds);
                if let Err(e) = actuator.pour_out(action.actuator_id, duration) {
                    error!(
                        actuator_id = action.actuator_id,
                        seconds = action.duration_seconds,
                        error = %e,
                        "pour failed"
                    );
                }
            }
        })
    }

    /// Raw pour that waits for completion and reports failures.
    pub async fn pour_now(&self, actuator_id: u8, seconds: Option<f64>) -> Result<(), AppError> {
        if !is_valid_actuator(actuator_id) {
            return Err(DomainError::validation(
                ValidationKind::InvalidActuator,
                format!("actuator_id must be 1..=4, got {actuator_id}"),
            )
            .into());
        }
        let seconds = seconds.unwrap_or(DEFAULT_RAW_POUR_SECS);
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                format!("duration must be a positive number of seconds, got {seconds}"),
            ));
        }

        info!(actuator_id, seconds, "raw pour requested");
        let actuator = Arc::clone(&self.actuator);
        self.blocking(move || actuator.pour_out(actuator_id, Duration::from_secs_f64(seconds)))
            .await
    }

    /// Stop one pump, or every pump for [`STOP_ALL`].
    pub async fn stop(&self, actuator_id: u8) -> Result<(), AppError> {
        let actuator = Arc::clone(&self.actuator);
        if actuator_id == STOP_ALL {
            return self.blocking(move || actuator.emergency_stop()).await;
        }
        self.blocking(move || actuator.stop(actuator_id)).await
    }

    /// Synchronous emergency stop for shutdown.
    pub fn emergency_stop(&self) {
        if let Err(e) = self.actuator.emergency_stop() {
            error!(error = %e, "emergency stop failed");
        }
    }

    async fn blocking<F>(&self, command: F) -> Result<(), AppError>
    where
        F: FnOnce() -> Result<(), ActuatorError> + Send + 'static,
    {
        tokio::task::spawn_blocking(command)
            .await
            .map_err(|e| AppError::Internal {
                code: ErrorCode::ActuatorFailure,
                detail: format!("actuator task aborted: {e}"),
            })?
            .map_err(AppError::from)
    }
}
