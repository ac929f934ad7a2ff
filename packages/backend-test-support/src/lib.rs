//! Helpers shared by the backend's HTTP integration tests.
//!
//! Deliberately independent of backend types: assertions work on raw
//! responses so the error contract is checked as clients see it.

pub mod logging;
pub mod problem_details;
pub mod responses;
