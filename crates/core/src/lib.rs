//! Screenplay Core
//!
//! Capability-gated dispatch for behaviour-oriented tests:
//! - Actors are granted abilities, keyed by type
//! - Interactions change the system under test through those abilities
//! - Tasks group interactions and other tasks, expanded depth-first
//! - Questions observe the system and hand back plain values
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Actor                                                       │
//! │    ├── called(name) / who_can::<Ability>()                  │
//! │    ├── ability_to::<Ability>()  ── MissingAbility gate      │
//! │    ├── attempts_to(&[&dyn Performable])                     │
//! │    │     ├── Activity::Interaction ─> perform_as(actor)     │
//! │    │     └── Activity::Task ─> steps(), depth-first         │
//! │    └── sees(&Question) ─> answered_by(actor)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  AbilityRegistry: TypeId ─> one instance per type           │
//! │  Narrator: observes every step (Journal records them)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core knows nothing about browsers or any other backend; those
//! arrive as [`Ability`] implementations from outside.

pub mod ability;
pub mod actor;
pub mod config;
pub mod error;
pub mod interaction;
pub mod narration;
pub mod question;
pub mod task;

pub use ability::{Ability, AbilityRegistry};
pub use actor::Actor;
pub use config::{NarrationConfig, ScreenplayConfig};
pub use error::{Result, ScreenplayError};
pub use interaction::{Activity, Interaction, Performable, StepKind};
pub use narration::{Journal, Narrator, StepEvent, StepRecord};
pub use question::Question;
pub use task::{Sequence, Task};
