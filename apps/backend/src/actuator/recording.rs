use std::io;
use std::time::Duration;

use parking_lot::Mutex;

use super::{Actuator, ActuatorError};
use crate::domain::rules::is_valid_actuator;

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    PourOut { id: u8, seconds: f64 },
    Stop { id: u8 },
    EmergencyStop,
}

/// Records commands instead of driving pins, and never sleeps.
///
/// Used by tests and by anything that needs to observe dispatched pours.
#[derive(Debug, Default)]
pub struct RecordingActuator {
    calls: Mutex<Vec<ActuatorCall>>,
    fail: bool,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command is recorded and then fails with an I/O error.
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<ActuatorCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: ActuatorCall) -> Result<(), ActuatorError> {
        self.calls.lock().push(call);
        if self.fail {
            return Err(ActuatorError::Io(io::Error::other("injected failure")));
        }
        Ok(())
    }
}

impl Actuator for RecordingActuator {
    fn pour_out(&self, id: u8, duration: Duration) -> Result<(), ActuatorError> {
        if !is_valid_actuator(id) {
            return Err(ActuatorError::UnknownActuator(id));
        }
        self.record(ActuatorCall::PourOut {
            id,
            seconds: duration.as_secs_f64(),
        })
    }

    fn stop(&self, id: u8) -> Result<(), ActuatorError> {
        if !is_valid_actuator(id) {
            return Err(ActuatorError::UnknownActuator(id));
        }
        self.record(ActuatorCall::Stop { id })
    }

    fn emergency_stop(&self) -> Result<(), ActuatorError> {
        self.record(ActuatorCall::EmergencyStop)
    }
}
