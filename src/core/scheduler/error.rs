//! Scheduler error types

use core::fmt;

/// Scheduler-level errors
///
/// The taxonomy is deliberately minimal: every fallible registry operation
/// reports failure through one of these variants and has no other side
/// effect. Whether a failed registration is fatal is the embedding program's
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// Every slot in the target registry is occupied
    RegistryFull,
    /// The handle refers to a slot that is empty (already removed or never
    /// registered)
    NoSuchTask,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::RegistryFull => write!(f, "task registry full"),
            SchedulerError::NoSuchTask => write!(f, "no task at handle"),
        }
    }
}
