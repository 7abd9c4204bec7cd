//! Questions: capability-gated observations

use std::fmt;

use crate::actor::Actor;
use crate::error::Result;

/// An atomic observation of the system under test.
///
/// Answers are plain values for the caller to assert on. A readable but
/// unexpected value is a valid answer, not an error; only a failure to
/// observe at all belongs in
/// [`ScreenplayError::ObservationFailure`](crate::ScreenplayError::ObservationFailure).
pub trait Question: fmt::Display {
    type Answer;

    fn answered_by(&self, actor: &mut Actor) -> Result<Self::Answer>;
}
