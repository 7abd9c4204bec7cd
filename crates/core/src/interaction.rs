//! Interactions and the attemptable-step boundary

use std::fmt;

use crate::actor::Actor;
use crate::error::Result;
use crate::task::Task;

/// An atomic, capability-gated change to the system under test.
///
/// Implementations resolve the ability they need through
/// [`Actor::ability_to`] or [`Actor::ability_to_mut`] and return its
/// error untouched. Failures of the external action itself belong in
/// [`ScreenplayError::InteractionFailure`](crate::ScreenplayError::InteractionFailure).
pub trait Interaction: fmt::Display {
    fn perform_as(&self, actor: &mut Actor) -> Result<()>;
}

/// What an attemptable step turns out to be.
pub enum Activity<'a> {
    /// Perform directly against the actor
    Interaction(&'a dyn Interaction),

    /// Expand into sub-steps
    Task(&'a dyn Task),
}

/// Anything an actor can attempt.
///
/// Each step declares exactly one [`Activity`], so a type can never be
/// dispatched as both an interaction and a task:
///
/// ```
/// use screenplay_core::{Activity, Actor, Interaction, Performable, Result};
/// use std::fmt;
///
/// struct Wave;
///
/// impl fmt::Display for Wave {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "Wave")
///     }
/// }
///
/// impl Interaction for Wave {
///     fn perform_as(&self, _actor: &mut Actor) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// impl Performable for Wave {
///     fn activity(&self) -> Activity<'_> {
///         Activity::Interaction(self)
///     }
/// }
/// ```
pub trait Performable: fmt::Display {
    fn activity(&self) -> Activity<'_>;
}

impl<P: Performable + ?Sized> Performable for &P {
    fn activity(&self) -> Activity<'_> {
        (**self).activity()
    }
}

impl<P: Performable + ?Sized> Performable for Box<P> {
    fn activity(&self) -> Activity<'_> {
        (**self).activity()
    }
}

/// Coarse classification used in logs and narration
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Interaction,
    Task,
    Question,
}

impl Activity<'_> {
    pub fn kind(&self) -> StepKind {
        match self {
            Activity::Interaction(_) => StepKind::Interaction,
            Activity::Task(_) => StepKind::Task,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            StepKind::Interaction => "interaction",
            StepKind::Task => "task",
            StepKind::Question => "question",
        };
        f.write_str(kind)
    }
}
