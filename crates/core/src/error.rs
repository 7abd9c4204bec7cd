//! Error types for screenplay dispatch

use std::fmt;

use thiserror::Error;

/// Result type alias using [`ScreenplayError`]
pub type Result<T> = std::result::Result<T, ScreenplayError>;

/// Everything an actor can fail with.
///
/// `MissingAbility` means the test itself is wired wrong; the
/// `*Failure` variants mean the system under test misbehaved. The two
/// families never overlap.
#[derive(Error, Debug)]
pub enum ScreenplayError {
    #[error("Invalid actor name: {0:?}")]
    InvalidName(String),

    #[error("Could not construct ability {ability}: {source}")]
    AbilityConstruction {
        ability: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("{actor} does not have the ability {ability}")]
    MissingAbility { actor: String, ability: &'static str },

    #[error("Interaction failed: {interaction} - {source}")]
    InteractionFailure {
        interaction: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Observation failed: {question} - {source}")]
    ObservationFailure {
        question: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Task nested too deep: {task} (limit: {limit})")]
    TaskTooDeep { task: String, limit: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ScreenplayError {
    /// Wrap an external failure raised while performing an interaction.
    pub fn interaction(interaction: impl fmt::Display, source: impl Into<anyhow::Error>) -> Self {
        Self::InteractionFailure {
            interaction: interaction.to_string(),
            source: source.into(),
        }
    }

    /// Wrap an external failure raised while answering a question.
    pub fn observation(question: impl fmt::Display, source: impl Into<anyhow::Error>) -> Self {
        Self::ObservationFailure {
            question: question.to_string(),
            source: source.into(),
        }
    }

    /// True when the actor lacked a capability, i.e. the test is mis-wired.
    pub fn is_missing_ability(&self) -> bool {
        matches!(self, Self::MissingAbility { .. })
    }

    /// True when the external system failed an interaction or observation.
    pub fn is_external_failure(&self) -> bool {
        matches!(
            self,
            Self::InteractionFailure { .. } | Self::ObservationFailure { .. }
        )
    }

    /// Recover the original error raised by an ability, if it has type `E`.
    pub fn downcast_source<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        match self {
            Self::AbilityConstruction { source, .. }
            | Self::InteractionFailure { source, .. }
            | Self::ObservationFailure { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}
