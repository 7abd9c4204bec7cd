//! The actor: capability registry plus the attempt/ask verbs

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::ability::{short_type_name, Ability, AbilityRegistry};
use crate::config::ScreenplayConfig;
use crate::error::{Result, ScreenplayError};
use crate::interaction::{Activity, Performable, StepKind};
use crate::narration::{Narrator, StepEvent};
use crate::question::Question;

/// Someone who uses the system under test.
///
/// The actor is the only thing that knows where abilities live.
/// Interactions and questions ask it for the ability they need and
/// fail with [`ScreenplayError::MissingAbility`] when it was never
/// granted.
pub struct Actor {
    name: String,
    abilities: AbilityRegistry,
    config: ScreenplayConfig,
    narrators: Vec<Box<dyn Narrator>>,
    /// Depth at which the next nested step or question runs
    depth: usize,
}

impl Actor {
    /// Create an actor with the default configuration.
    pub fn called(name: impl Into<String>) -> Result<Self> {
        Self::called_with(name, ScreenplayConfig::default())
    }

    /// Create an actor with a specific configuration.
    pub fn called_with(name: impl Into<String>, config: ScreenplayConfig) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScreenplayError::InvalidName(name));
        }
        config.validate()?;

        debug!(actor = %name, "Actor created");
        Ok(Self {
            name,
            abilities: AbilityRegistry::new(),
            config,
            narrators: Vec::new(),
            depth: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ScreenplayConfig {
        &self.config
    }

    /// Grant a freshly constructed `T`, replacing any earlier instance.
    pub fn who_can<T: Ability>(mut self) -> Result<Self> {
        let ability = T::construct().map_err(|source| ScreenplayError::AbilityConstruction {
            ability: T::name(),
            source,
        })?;

        if self.abilities.grant(ability).is_some() {
            warn!(actor = %self.name, ability = T::name(), "Replaced previously granted ability");
        } else {
            info!(actor = %self.name, ability = T::name(), "Ability granted");
        }
        Ok(self)
    }

    /// Attach a narrator that hears about every step.
    pub fn with_narrator(mut self, narrator: impl Narrator + 'static) -> Self {
        self.narrators.push(Box::new(narrator));
        self
    }

    /// Whether `T` has been granted.
    pub fn can<T: Ability>(&self) -> bool {
        self.abilities.contains::<T>()
    }

    /// Names of every granted ability, sorted.
    pub fn abilities(&self) -> Vec<&'static str> {
        self.abilities.names()
    }

    /// The granted instance of `T`.
    pub fn ability_to<T: Ability>(&self) -> Result<&T> {
        let actor = &self.name;
        self.abilities
            .get::<T>()
            .ok_or_else(|| missing_ability::<T>(actor))
    }

    /// The granted instance of `T`, mutably.
    pub fn ability_to_mut<T: Ability>(&mut self) -> Result<&mut T> {
        let actor = &self.name;
        self.abilities
            .get_mut::<T>()
            .ok_or_else(|| missing_ability::<T>(actor))
    }

    /// Attempt each step in order, expanding tasks depth-first.
    ///
    /// Stops at the first failure and returns it unchanged; later steps
    /// are never started.
    pub fn attempts_to(&mut self, steps: &[&dyn Performable]) -> Result<()> {
        let depth = self.depth;
        for step in steps {
            self.attempt(*step, depth)?;
        }
        Ok(())
    }

    /// Ask a question and return its answer untouched.
    pub fn sees<Q: Question + ?Sized>(&mut self, question: &Q) -> Result<Q::Answer> {
        let description = question.to_string();
        debug!(actor = %self.name, question = %description, "Asking");

        let narrate = self.config.narration.record_questions;
        let depth = self.depth;
        let started = Instant::now();
        if narrate {
            self.announce_start(&description, StepKind::Question, depth);
        }

        self.depth = depth + 1;
        let answer = question.answered_by(self);
        self.depth = depth;

        if let Err(e) = &answer {
            warn!(actor = %self.name, question = %description, error = %e, "Question failed");
        }
        if narrate {
            self.announce_finish(&description, StepKind::Question, depth, started, answer.as_ref().err());
        }
        answer
    }

    /// Alias of [`Actor::sees`].
    pub fn asks<Q: Question + ?Sized>(&mut self, question: &Q) -> Result<Q::Answer> {
        self.sees(question)
    }

    fn attempt(&mut self, step: &dyn Performable, depth: usize) -> Result<()> {
        let description = step.to_string();
        let limit = self.config.max_task_depth;
        if depth > limit {
            warn!(actor = %self.name, step = %description, limit, "Task nesting limit exceeded");
            return Err(ScreenplayError::TaskTooDeep {
                task: description,
                limit,
            });
        }

        let activity = step.activity();
        let kind = activity.kind();
        debug!(actor = %self.name, step = %description, %kind, depth, "Attempting");

        let started = Instant::now();
        self.announce_start(&description, kind, depth);

        let outer = self.depth;
        self.depth = depth + 1;
        let outcome = match activity {
            Activity::Interaction(interaction) => interaction.perform_as(self),
            Activity::Task(task) => task
                .steps()
                .iter()
                .try_for_each(|sub| self.attempt(&**sub, depth + 1)),
        };
        self.depth = outer;

        if let Err(e) = &outcome {
            warn!(actor = %self.name, step = %description, error = %e, "Step failed");
        }
        self.announce_finish(&description, kind, depth, started, outcome.as_ref().err());
        outcome
    }

    fn announce_start(&mut self, description: &str, kind: StepKind, depth: usize) {
        if !self.config.narration.enabled {
            return;
        }
        let event = StepEvent {
            actor: &self.name,
            description,
            kind,
            depth,
        };
        for narrator in &mut self.narrators {
            narrator.on_step_started(&event);
        }
    }

    fn announce_finish(
        &mut self,
        description: &str,
        kind: StepKind,
        depth: usize,
        started: Instant,
        error: Option<&ScreenplayError>,
    ) {
        if !self.config.narration.enabled {
            return;
        }
        let event = StepEvent {
            actor: &self.name,
            description,
            kind,
            depth,
        };
        let elapsed = started.elapsed();
        for narrator in &mut self.narrators {
            narrator.on_step_finished(&event, elapsed, error);
        }
    }
}

fn missing_ability<T: Ability>(actor: &str) -> ScreenplayError {
    ScreenplayError::MissingAbility {
        actor: actor.to_string(),
        ability: T::name(),
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(short_type_name::<Self>())
            .field("name", &self.name)
            .field("abilities", &self.abilities)
            .field("narrators", &self.narrators.len())
            .finish()
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::Interaction;
    use crate::narration::Journal;
    use crate::task::{Sequence, Task};
    use std::cell::Cell;
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use parking_lot::Mutex;
    use test_case::test_case;

    static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

    /// Stub ability that records every call made on it.
    struct Notepad {
        id: usize,
        lines: Vec<String>,
        touches: Cell<usize>,
    }

    impl Notepad {
        fn touch(&self) -> &Self {
            self.touches.set(self.touches.get() + 1);
            self
        }

        fn write(&mut self, line: &str) {
            self.touch();
            self.lines.push(line.to_string());
        }
    }

    impl Ability for Notepad {
        fn construct() -> anyhow::Result<Self> {
            Ok(Self {
                id: NEXT_ID.fetch_add(1, Ordering::SeqCst),
                lines: Vec::new(),
                touches: Cell::new(0),
            })
        }
    }

    struct Broken;

    impl Ability for Broken {
        fn construct() -> anyhow::Result<Self> {
            anyhow::bail!("no display available")
        }
    }

    struct Write(&'static str);

    impl fmt::Display for Write {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Write {}", self.0)
        }
    }

    impl Interaction for Write {
        fn perform_as(&self, actor: &mut Actor) -> Result<()> {
            actor.ability_to_mut::<Notepad>()?.write(self.0);
            Ok(())
        }
    }

    impl Performable for Write {
        fn activity(&self) -> Activity<'_> {
            Activity::Interaction(self)
        }
    }

    struct Fail;

    impl fmt::Display for Fail {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Fail")
        }
    }

    impl Interaction for Fail {
        fn perform_as(&self, actor: &mut Actor) -> Result<()> {
            actor.ability_to::<Notepad>()?.touch();
            Err(ScreenplayError::interaction(self, anyhow::anyhow!("page crashed")))
        }
    }

    impl Performable for Fail {
        fn activity(&self) -> Activity<'_> {
            Activity::Interaction(self)
        }
    }

    struct LineCount;

    impl fmt::Display for LineCount {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("the number of lines")
        }
    }

    impl Question for LineCount {
        type Answer = usize;

        fn answered_by(&self, actor: &mut Actor) -> Result<usize> {
            Ok(actor.ability_to::<Notepad>()?.touch().lines.len())
        }
    }

    /// Writes down how many lines there were, asking first
    struct Recount;

    impl fmt::Display for Recount {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Recount")
        }
    }

    impl Interaction for Recount {
        fn perform_as(&self, actor: &mut Actor) -> Result<()> {
            let count = actor.sees(&LineCount)?;
            actor.ability_to_mut::<Notepad>()?.write(&count.to_string());
            Ok(())
        }
    }

    impl Performable for Recount {
        fn activity(&self) -> Activity<'_> {
            Activity::Interaction(self)
        }
    }

    /// A task that contains itself
    struct Forever;

    impl fmt::Display for Forever {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Forever")
        }
    }

    impl Task for Forever {
        fn steps(&self) -> Vec<Box<dyn Performable + '_>> {
            vec![Box::new(Forever)]
        }
    }

    impl Performable for Forever {
        fn activity(&self) -> Activity<'_> {
            Activity::Task(self)
        }
    }

    /// Narrator that captures start events as plain strings
    #[derive(Clone, Default)]
    struct Transcript(Arc<Mutex<Vec<String>>>);

    impl Narrator for Transcript {
        fn on_step_started(&mut self, step: &StepEvent<'_>) {
            self.0.lock().push(format!("{}:{}", step.depth, step.description));
        }

        fn on_step_finished(
            &mut self,
            _step: &StepEvent<'_>,
            _elapsed: std::time::Duration,
            _error: Option<&ScreenplayError>,
        ) {
        }
    }

    fn lines(actor: &Actor) -> Vec<String> {
        actor.ability_to::<Notepad>().unwrap().lines.clone()
    }

    fn touches(actor: &Actor) -> usize {
        actor.ability_to::<Notepad>().unwrap().touches.get()
    }

    #[test]
    fn test_called() {
        let actor = Actor::called("eddy").unwrap();
        assert_eq!(actor.name(), "eddy");
        assert!(actor.abilities().is_empty());
        assert_eq!(actor.to_string(), "eddy");
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "spaces")]
    #[test_case("\t\n" ; "whitespace")]
    fn test_called_rejects_blank_names(name: &str) {
        let err = Actor::called(name).unwrap_err();
        assert!(matches!(err, ScreenplayError::InvalidName(_)));
    }

    #[test]
    fn test_called_with_rejects_invalid_config() {
        let config = ScreenplayConfig::default().with_max_task_depth(0);
        let err = Actor::called_with("eddy", config).unwrap_err();
        assert!(matches!(err, ScreenplayError::InvalidConfig(_)));
    }

    #[test]
    fn test_who_can_then_ability_to() {
        let actor = Actor::called("eddy").unwrap().who_can::<Notepad>().unwrap();
        assert!(actor.can::<Notepad>());
        assert!(actor.ability_to::<Notepad>().is_ok());
        assert_eq!(actor.abilities(), vec!["Notepad"]);
    }

    #[test]
    fn test_ability_to_before_granting() {
        let actor = Actor::called("eddy").unwrap();
        match actor.ability_to::<Notepad>() {
            Err(ScreenplayError::MissingAbility { actor, ability }) => {
                assert_eq!(actor, "eddy");
                assert_eq!(ability, "Notepad");
            }
            other => panic!("expected MissingAbility, got {:?}", other.map(|n| n.id)),
        }
    }

    #[test]
    fn test_regrant_replaces_instance() {
        let actor = Actor::called("eddy").unwrap().who_can::<Notepad>().unwrap();
        let first = actor.ability_to::<Notepad>().unwrap().id;

        let actor = actor.who_can::<Notepad>().unwrap();
        let second = actor.ability_to::<Notepad>().unwrap().id;

        assert_ne!(first, second);
        assert_eq!(actor.abilities().len(), 1);
    }

    #[test]
    fn test_construction_failure_at_grant_time() {
        let err = Actor::called("eddy").unwrap().who_can::<Broken>().unwrap_err();
        match err {
            ScreenplayError::AbilityConstruction { ability, source } => {
                assert_eq!(ability, "Broken");
                assert_eq!(source.to_string(), "no display available");
            }
            other => panic!("expected AbilityConstruction, got {}", other),
        }
    }

    #[test]
    fn test_attempts_to_nothing_is_noop() {
        let mut actor = Actor::called("eddy").unwrap();
        actor.attempts_to(&[]).unwrap();

        let mut actor = actor.who_can::<Notepad>().unwrap();
        actor.attempts_to(&[]).unwrap();
        assert!(lines(&actor).is_empty());
        assert_eq!(touches(&actor), 0);
    }

    #[test]
    fn test_attempts_to_in_order() {
        let mut actor = Actor::called("eddy").unwrap().who_can::<Notepad>().unwrap();
        actor.attempts_to(&[&Write("one"), &Write("two")]).unwrap();
        assert_eq!(lines(&actor), vec!["one", "two"]);
    }

    #[test]
    fn test_nested_task_depth_first() {
        let mut actor = Actor::called("eddy").unwrap().who_can::<Notepad>().unwrap();
        let task = Sequence::named("outer")
            .then(Sequence::named("sub").then(Write("i1")).then(Write("i2")))
            .then(Write("i3"));

        actor.attempts_to(&[&task, &Write("after")]).unwrap();
        assert_eq!(lines(&actor), vec!["i1", "i2", "i3", "after"]);
    }

    #[test]
    fn test_fail_fast() {
        let mut actor = Actor::called("eddy").unwrap().who_can::<Notepad>().unwrap();
        let task = Sequence::named("doomed").then(Write("i1")).then(Fail).then(Write("i3"));

        let err = actor.attempts_to(&[&task, &Write("never")]).unwrap_err();
        assert!(err.is_external_failure());
        assert_eq!(lines(&actor), vec!["i1"]);
    }

    #[test]
    fn test_missing_ability_propagates_from_interaction() {
        let mut actor = Actor::called("eddy").unwrap();
        let err = actor.attempts_to(&[&Write("one")]).unwrap_err();
        assert!(err.is_missing_ability());
    }

    #[test]
    fn test_sees_returns_answer() {
        let mut actor = Actor::called("eddy").unwrap().who_can::<Notepad>().unwrap();
        actor.attempts_to(&[&Write("a"), &Write("b")]).unwrap();
        assert_eq!(actor.sees(&LineCount).unwrap(), 2);
        assert_eq!(actor.asks(&LineCount).unwrap(), 2);
    }

    #[test]
    fn test_sees_without_ability() {
        let mut actor = Actor::called("eddy").unwrap();
        assert!(actor.sees(&LineCount).unwrap_err().is_missing_ability());
    }

    #[test_case(1 ; "one")]
    #[test_case(4 ; "four")]
    #[test_case(ScreenplayConfig::MAX_TASK_DEPTH_CEILING ; "ceiling")]
    fn test_self_containing_task_hits_limit(limit: usize) {
        let config = ScreenplayConfig::default().with_max_task_depth(limit);
        let mut actor = Actor::called_with("eddy", config).unwrap();

        match actor.attempts_to(&[&Forever]).unwrap_err() {
            ScreenplayError::TaskTooDeep { task, limit: reported } => {
                assert_eq!(task, "Forever");
                assert_eq!(reported, limit);
            }
            other => panic!("expected TaskTooDeep, got {}", other),
        }
    }

    #[test]
    fn test_nesting_up_to_limit_is_allowed() {
        let config = ScreenplayConfig::default().with_max_task_depth(2);
        let mut actor = Actor::called_with("eddy", config)
            .unwrap()
            .who_can::<Notepad>()
            .unwrap();

        // Write sits at depth 2.
        let ok = Sequence::named("a").then(Sequence::named("b").then(Write("deep")));
        actor.attempts_to(&[&ok]).unwrap();

        // Write sits at depth 3.
        let too_deep = Sequence::named("a")
            .then(Sequence::named("b").then(Sequence::named("c").then(Write("deeper"))));
        let err = actor.attempts_to(&[&too_deep]).unwrap_err();
        assert!(matches!(err, ScreenplayError::TaskTooDeep { .. }));
        assert_eq!(lines(&actor), vec!["deep"]);
    }

    #[test]
    fn test_narration_follows_dispatch() {
        let transcript = Transcript::default();
        let mut actor = Actor::called("eddy")
            .unwrap()
            .who_can::<Notepad>()
            .unwrap()
            .with_narrator(transcript.clone());

        let task = Sequence::named("jot").then(Write("x"));
        actor.attempts_to(&[&task]).unwrap();
        actor.sees(&LineCount).unwrap();

        assert_eq!(
            *transcript.0.lock(),
            vec!["0:jot", "1:Write x", "0:the number of lines"]
        );
    }

    #[test]
    fn test_nested_question_narrated_below_its_step() {
        let transcript = Transcript::default();
        let mut actor = Actor::called("eddy")
            .unwrap()
            .who_can::<Notepad>()
            .unwrap()
            .with_narrator(transcript.clone());

        let task = Sequence::named("jot").then(Write("x")).then(Recount);
        actor.attempts_to(&[&task, &Recount]).unwrap();
        actor.sees(&LineCount).unwrap();

        assert_eq!(
            *transcript.0.lock(),
            vec![
                "0:jot",
                "1:Write x",
                "1:Recount",
                "2:the number of lines",
                "0:Recount",
                "1:the number of lines",
                "0:the number of lines",
            ]
        );
        assert_eq!(lines(&actor), vec!["x", "1", "2"]);
    }

    #[test]
    fn test_narration_disabled() {
        let mut config = ScreenplayConfig::default();
        config.narration.enabled = false;
        let journal = Journal::new();
        let mut actor = Actor::called_with("eddy", config)
            .unwrap()
            .who_can::<Notepad>()
            .unwrap()
            .with_narrator(journal.clone());

        actor.attempts_to(&[&Write("x")]).unwrap();
        assert!(journal.is_empty());
    }

    #[test]
    fn test_questions_not_narrated_when_excluded() {
        let mut config = ScreenplayConfig::default();
        config.narration.record_questions = false;
        let journal = Journal::new();
        let mut actor = Actor::called_with("eddy", config)
            .unwrap()
            .who_can::<Notepad>()
            .unwrap()
            .with_narrator(journal.clone());

        actor.attempts_to(&[&Write("x")]).unwrap();
        actor.sees(&LineCount).unwrap();
        assert_eq!(journal.descriptions(), vec!["Write x"]);
    }

    #[test]
    fn test_journal_marks_failed_parents() {
        let journal = Journal::new();
        let mut actor = Actor::called("eddy")
            .unwrap()
            .who_can::<Notepad>()
            .unwrap()
            .with_narrator(journal.clone());

        let task = Sequence::named("doomed").then(Fail);
        assert!(actor.attempts_to(&[&task]).is_err());

        let records = journal.records();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| !r.success));
        assert_eq!(records[1].depth, 1);
    }

    #[test]
    fn test_actor_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Actor>();
    }
}
