//! Liquid-dispensing outputs.
//!
//! The [`Actuator`] trait is the only surface the rest of the crate sees.
//! [`PumpController`] drives an H-bridge per pump through a [`PinDriver`];
//! the simulated driver logs the same transitions the sysfs one writes.

mod pins;
mod recording;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::rules::ACTUATOR_IDS;
use crate::error::AppError;
use crate::errors::ErrorCode;

pub use pins::{PinDriver, SimulatedPins, SysfsPins};
pub use recording::{ActuatorCall, RecordingActuator};

#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("unknown actuator {0}")]
    UnknownActuator(u8),
    #[error("pin i/o failed: {0}")]
    Io(#[from] io::Error),
}

impl From<ActuatorError> for AppError {
    fn from(err: ActuatorError) -> Self {
        match err {
            ActuatorError::UnknownActuator(id) => AppError::invalid(
                ErrorCode::InvalidActuator,
                format!("actuator {id} does not exist"),
            ),
            ActuatorError::Io(e) => AppError::Internal {
                code: ErrorCode::ActuatorFailure,
                detail: format!("actuator failure: {e}"),
            },
        }
    }
}

/// Timed pour/stop commands.
///
/// `pour_out` blocks for the full duration; callers run it off the async
/// executor. `emergency_stop` must win over any pour in flight.
pub trait Actuator: Send + Sync {
    fn pour_out(&self, id: u8, duration: Duration) -> Result<(), ActuatorError>;

    fn stop(&self, id: u8) -> Result<(), ActuatorError>;

    fn emergency_stop(&self) -> Result<(), ActuatorError>;
}

/// BCM pin pair (in1, in2) for each pump.
pub const PUMP_PINS: [(u8, (u32, u32)); 4] = [(1, (22, 27)), (2, (17, 4)), (3, (19, 13)), (4, (6, 5))];

fn pins_for(id: u8) -> Result<(u32, u32), ActuatorError> {
    PUMP_PINS
        .iter()
        .find(|(pump, _)| *pump == id)
        .map(|(_, pins)| *pins)
        .ok_or(ActuatorError::UnknownActuator(id))
}

pub struct PumpController {
    driver: Box<dyn PinDriver>,
}

impl PumpController {
    pub fn new(driver: Box<dyn PinDriver>) -> Result<Self, ActuatorError> {
        for (pump, (in1, in2)) in PUMP_PINS {
            driver.export_output(in1)?;
            driver.export_output(in2)?;
            info!(actuator_id = pump, driver = driver.name(), "pump initialised");
        }
        Ok(Self { driver })
    }

    pub fn simulated() -> Self {
        Self {
            driver: Box::new(SimulatedPins),
        }
    }

    pub fn driver_name(&self) -> &'static str {
        self.driver.name()
    }

    fn set_motor(&self, id: u8, in1: bool, in2: bool) -> Result<(), ActuatorError> {
        let (pin1, pin2) = pins_for(id)?;
        self.driver.write(pin1, in1)?;
        self.driver.write(pin2, in2)?;
        Ok(())
    }
}

impl Actuator for PumpController {
    fn pour_out(&self, id: u8, duration: Duration) -> Result<(), ActuatorError> {
        info!(actuator_id = id, seconds = duration.as_secs_f64(), "pour started");
        self.set_motor(id, true, false)?;
        std::thread::sleep(duration);
        self.stop(id)
    }

    fn stop(&self, id: u8) -> Result<(), ActuatorError> {
        info!(actuator_id = id, "pump stopped");
        self.set_motor(id, false, false)
    }

    fn emergency_stop(&self) -> Result<(), ActuatorError> {
        warn!("emergency stop: all pumps off");
        // Keep going after a failure so every pump gets the off command.
        let mut first_err = None;
        for id in ACTUATOR_IDS {
            if let Err(e) = self.stop(id) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

/// Which pin driver to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverChoice {
    Simulated,
    Sysfs(PathBuf),
    /// Sysfs when the root exists, otherwise simulated.
    Auto(PathBuf),
}

/// Build the controller; a physical driver that fails to initialise falls
/// back to simulation.
pub fn build_controller(choice: &DriverChoice) -> PumpController {
    let root = match choice {
        DriverChoice::Simulated => return PumpController::simulated(),
        DriverChoice::Sysfs(root) => root.clone(),
        DriverChoice::Auto(root) if root.is_dir() => root.clone(),
        DriverChoice::Auto(_) => {
            info!("no GPIO sysfs root found; using simulated pumps");
            return PumpController::simulated();
        }
    };

    match PumpController::new(Box::new(SysfsPins::new(root))) {
        Ok(controller) => controller,
        Err(e) => {
            warn!(error = %e, "GPIO init failed; using simulated pumps");
            PumpController::simulated()
        }
    }
}
