//! Targets: named locators handed to interactions and questions

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a locator string should be matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Css,
    Xpath,
    Id,
    Name,
    LinkText,
}

impl Strategy {
    fn as_str(&self) -> &'static str {
        match self {
            Strategy::Css => "css",
            Strategy::Xpath => "xpath",
            Strategy::Id => "id",
            Strategy::Name => "name",
            Strategy::LinkText => "link text",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A described locator, e.g. "the login button" at `#login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub description: String,
    pub locator: String,
    #[serde(default)]
    pub strategy: Strategy,
}

impl Target {
    /// Start a target from its human description
    pub fn the(description: impl Into<String>) -> TargetBuilder {
        TargetBuilder {
            description: description.into(),
        }
    }

    /// A CSS target described by its own selector
    pub fn css(locator: impl Into<String>) -> Self {
        let locator = locator.into();
        Self {
            description: locator.clone(),
            locator,
            strategy: Strategy::Css,
        }
    }

    /// Same target, matched with a different strategy
    pub fn found(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Second half of [`Target::the`]
pub struct TargetBuilder {
    description: String,
}

impl TargetBuilder {
    pub fn located_by(self, locator: impl Into<String>) -> Target {
        self.located(Strategy::Css, locator)
    }

    pub fn located(self, strategy: Strategy, locator: impl Into<String>) -> Target {
        Target {
            description: self.description,
            locator: locator.into(),
            strategy,
        }
    }
}

/// Anything that can stand in for a target.
///
/// Page objects implement this; bare strings are treated as CSS selectors.
pub trait Locate {
    fn target(&self) -> Target;
}

impl Locate for Target {
    fn target(&self) -> Target {
        self.clone()
    }
}

impl Locate for &Target {
    fn target(&self) -> Target {
        (*self).clone()
    }
}

impl Locate for &str {
    fn target(&self) -> Target {
        Target::css(*self)
    }
}

impl Locate for String {
    fn target(&self) -> Target {
        Target::css(self.as_str())
    }
}
