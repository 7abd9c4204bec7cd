//! Browser interactions

use std::fmt;

use screenplay_core::{Activity, Actor, Interaction, Performable, Result, ScreenplayError};

use crate::browsing::StubBrowsing;
use crate::error::BrowsingError;
use crate::target::{Locate, Strategy, Target};

/// Open a URL, absolute or relative to the served site's base URL
#[derive(Debug, Clone)]
pub struct Open {
    url: String,
}

impl Open {
    pub fn browser_on(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Interaction for Open {
    fn perform_as(&self, actor: &mut Actor) -> Result<()> {
        actor
            .ability_to_mut::<StubBrowsing>()?
            .visit(&self.url)
            .map_err(|e| ScreenplayError::interaction(self, e))
    }
}

impl fmt::Display for Open {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Open the browser on {}", self.url)
    }
}

impl Performable for Open {
    fn activity(&self) -> Activity<'_> {
        Activity::Interaction(self)
    }
}

/// Click a target
#[derive(Debug, Clone)]
pub struct Click {
    target: Target,
}

impl Click {
    pub fn on(target: impl Locate) -> Self {
        Self {
            target: target.target(),
        }
    }
}

impl Interaction for Click {
    fn perform_as(&self, actor: &mut Actor) -> Result<()> {
        actor
            .ability_to_mut::<StubBrowsing>()?
            .click(&self.target)
            .map_err(|e| ScreenplayError::interaction(self, e))
    }
}

impl fmt::Display for Click {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Click on {}", self.target)
    }
}

impl Performable for Click {
    fn activity(&self) -> Activity<'_> {
        Activity::Interaction(self)
    }
}

/// Type text into a target.
///
/// Either `Enter::the_text("x").into_the(field)` or
/// `Enter::into(field).the_words("x")`; `found` changes how the
/// locator is matched.
#[derive(Debug, Clone)]
pub struct Enter {
    target: Option<Target>,
    text: Option<String>,
}

impl Enter {
    pub fn the_text(text: impl Into<String>) -> Self {
        Self {
            target: None,
            text: Some(text.into()),
        }
    }

    pub fn into(target: impl Locate) -> Self {
        Self {
            target: Some(target.target()),
            text: None,
        }
    }

    pub fn into_the(mut self, target: impl Locate) -> Self {
        self.target = Some(target.target());
        self
    }

    pub fn the_words(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Match the target's locator with `strategy` instead
    pub fn found(mut self, strategy: Strategy) -> Self {
        self.target = self.target.map(|t| t.found(strategy));
        self
    }
}

impl Interaction for Enter {
    fn perform_as(&self, actor: &mut Actor) -> Result<()> {
        let browser = actor.ability_to_mut::<StubBrowsing>()?;

        let Some(target) = &self.target else {
            return Err(ScreenplayError::interaction(
                self,
                BrowsingError::NoTarget(self.to_string()),
            ));
        };
        let Some(text) = &self.text else {
            return Err(ScreenplayError::interaction(
                self,
                BrowsingError::NothingToType(target.to_string()),
            ));
        };

        browser
            .send_keys(target, text)
            .map_err(|e| ScreenplayError::interaction(self, e))
    }
}

impl fmt::Display for Enter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.text.as_deref().unwrap_or("");
        match &self.target {
            Some(target) => write!(f, "Enter {:?} into {}", text, target),
            None => write!(f, "Enter {:?}", text),
        }
    }
}

impl Performable for Enter {
    fn activity(&self) -> Activity<'_> {
        Activity::Interaction(self)
    }
}
