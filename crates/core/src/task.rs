//! Tasks: ordered composites of interactions and other tasks

use std::fmt;

use crate::interaction::{Activity, Performable};

/// An ordered, finite sequence of sub-steps.
///
/// A task does nothing by itself; the attempting actor walks its steps
/// depth-first. Steps are produced on demand so a named task can build
/// them from its own parameters:
///
/// ```ignore
/// impl Task for LogIn {
///     fn steps(&self) -> Vec<Box<dyn Performable + '_>> {
///         vec![
///             Box::new(Enter::the_text(&self.user).into_the(USERNAME)),
///             Box::new(Click::on(SUBMIT)),
///         ]
///     }
/// }
/// ```
///
/// A task must not contain itself, directly or transitively.
pub trait Task: fmt::Display {
    fn steps(&self) -> Vec<Box<dyn Performable + '_>>;
}

/// A task assembled inline from owned steps
pub struct Sequence {
    name: String,
    steps: Vec<Box<dyn Performable>>,
}

impl Sequence {
    /// Start an empty sequence
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step
    pub fn then(mut self, step: impl Performable + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Task for Sequence {
    fn steps(&self) -> Vec<Box<dyn Performable + '_>> {
        self.steps
            .iter()
            .map(|step| Box::new(&**step) as Box<dyn Performable + '_>)
            .collect()
    }
}

impl Performable for Sequence {
    fn activity(&self) -> Activity<'_> {
        Activity::Task(self)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps: Vec<String> = self.steps.iter().map(|s| s.to_string()).collect();
        f.debug_struct("Sequence")
            .field("name", &self.name)
            .field("steps", &steps)
            .finish()
    }
}
