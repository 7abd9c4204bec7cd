//! Browser questions

use std::fmt;

use screenplay_core::{Actor, Question, Result, ScreenplayError};

use crate::browsing::StubBrowsing;
use crate::target::{Locate, Target};

/// The title of the open page
#[derive(Debug, Clone, Copy, Default)]
pub struct Title;

impl Question for Title {
    type Answer = String;

    fn answered_by(&self, actor: &mut Actor) -> Result<String> {
        actor
            .ability_to::<StubBrowsing>()?
            .title()
            .map_err(|e| ScreenplayError::observation(self, e))
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the page title")
    }
}

/// The URL of the open page
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentUrl;

impl Question for CurrentUrl {
    type Answer = String;

    fn answered_by(&self, actor: &mut Actor) -> Result<String> {
        actor
            .ability_to::<StubBrowsing>()?
            .current_url()
            .map_err(|e| ScreenplayError::observation(self, e))
    }
}

impl fmt::Display for CurrentUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the current URL")
    }
}

/// The visible text of a target
#[derive(Debug, Clone)]
pub struct Text {
    target: Target,
}

impl Text {
    pub fn of(target: impl Locate) -> Self {
        Self {
            target: target.target(),
        }
    }
}

impl Question for Text {
    type Answer = String;

    fn answered_by(&self, actor: &mut Actor) -> Result<String> {
        actor
            .ability_to::<StubBrowsing>()?
            .text_of(&self.target)
            .map_err(|e| ScreenplayError::observation(self, e))
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the text of {}", self.target)
    }
}

/// The current input value of a target
#[derive(Debug, Clone)]
pub struct Value {
    target: Target,
}

impl Value {
    pub fn of(target: impl Locate) -> Self {
        Self {
            target: target.target(),
        }
    }
}

impl Question for Value {
    type Answer = String;

    fn answered_by(&self, actor: &mut Actor) -> Result<String> {
        actor
            .ability_to::<StubBrowsing>()?
            .value_of(&self.target)
            .map_err(|e| ScreenplayError::observation(self, e))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the value of {}", self.target)
    }
}

/// Whether a target is on the open page
#[derive(Debug, Clone)]
pub struct Presence {
    target: Target,
}

impl Presence {
    pub fn of(target: impl Locate) -> Self {
        Self {
            target: target.target(),
        }
    }
}

impl Question for Presence {
    type Answer = bool;

    fn answered_by(&self, actor: &mut Actor) -> Result<bool> {
        actor
            .ability_to::<StubBrowsing>()?
            .is_present(&self.target)
            .map_err(|e| ScreenplayError::observation(self, e))
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "whether {} is present", self.target)
    }
}
