//! Abilities and the per-actor capability registry

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

/// A capability an actor can be granted, e.g. a browser session.
///
/// Abilities are built without arguments so that any instance is
/// interchangeable until it is granted. Anything the ability needs to
/// know about its backend it must discover for itself.
pub trait Ability: Any + Send {
    /// Build a fresh instance.
    fn construct() -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Name used in diagnostics. Defaults to the Rust type name.
    fn name() -> &'static str
    where
        Self: Sized,
    {
        short_type_name::<Self>()
    }
}

/// Type name without its module path.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    // Generic parameters can contain `::` too; only strip the outer path.
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

struct AbilitySlot {
    name: &'static str,
    value: Box<dyn Any + Send>,
}

/// Type-keyed storage holding at most one instance per ability type.
#[derive(Default)]
pub struct AbilityRegistry {
    slots: HashMap<TypeId, AbilitySlot>,
}

impl AbilityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `ability`, returning the instance it replaced, if any.
    pub fn grant<T: Ability>(&mut self, ability: T) -> Option<T> {
        let slot = AbilitySlot {
            name: T::name(),
            value: Box::new(ability),
        };

        self.slots
            .insert(TypeId::of::<T>(), slot)
            .and_then(|previous| previous.value.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Borrow the instance of `T`.
    pub fn get<T: Ability>(&self) -> Option<&T> {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.downcast_ref::<T>())
    }

    /// Mutably borrow the instance of `T`.
    pub fn get_mut<T: Ability>(&mut self) -> Option<&mut T> {
        self.slots
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.value.downcast_mut::<T>())
    }

    /// Whether an instance of `T` is stored.
    pub fn contains<T: Ability>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }

    /// Diagnostic names of every stored ability, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.slots.values().map(|slot| slot.name).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl std::fmt::Debug for AbilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
