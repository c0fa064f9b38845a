//! Remote grading service client
//!
//! The service is consumed through the `GradingService` capability trait
//! so commands and tests never depend on the HTTP transport directly.

mod assignment;
mod client;
mod import;
pub mod types;

pub use assignment::AssignmentClient;
pub use client::{GradingService, HttpGradingService, DEFAULT_ASSIGNMENT_POINTS};
pub use import::{import_rubric, ImportSummary};

#[cfg(test)]
pub(crate) mod testing;
