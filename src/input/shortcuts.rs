//! Host-wide keyboard shortcut table with scoped registration.
//!
//! The host owns one [`ShortcutRegistry`] and routes global key presses
//! through it. Each editor session registers its bindings on open and keeps
//! the returned [`ShortcutScope`]; dropping the scope removes the bindings, so
//! a closed editor never reacts to keys again.

use super::modifiers::Modifiers;
use crate::config::{Action, KeyBinding};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct Scopes {
    next_id: u64,
    /// Registration order; the last entry is the active scope
    entries: Vec<(u64, HashMap<KeyBinding, Action>)>,
}

impl Scopes {
    fn resolve_top(&self, key: &str, modifiers: &Modifiers) -> Option<Action> {
        let (_, bindings) = self.entries.last()?;
        lookup(bindings, key, modifiers)
    }
}

fn lookup(bindings: &HashMap<KeyBinding, Action>, key: &str, modifiers: &Modifiers) -> Option<Action> {
    bindings
        .iter()
        .find(|(binding, _)| {
            binding.matches(key, modifiers.primary(), modifiers.shift, modifiers.alt)
        })
        .map(|(_, action)| *action)
}

/// Global listener table shared by every editor the host opens.
#[derive(Debug, Clone, Default)]
pub struct ShortcutRegistry {
    scopes: Rc<RefCell<Scopes>>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a set of bindings; they stay live until the scope is dropped.
    pub fn register(&self, bindings: HashMap<KeyBinding, Action>) -> ShortcutScope {
        let mut scopes = self.scopes.borrow_mut();
        let id = scopes.next_id;
        scopes.next_id += 1;
        scopes.entries.push((id, bindings));
        log::debug!("Registered shortcut scope {}", id);

        ShortcutScope {
            id,
            scopes: Rc::downgrade(&self.scopes),
        }
    }

    /// Resolves a key press against the most recently registered live scope.
    pub fn resolve(&self, key: &str, modifiers: &Modifiers) -> Option<Action> {
        self.scopes.borrow().resolve_top(key, modifiers)
    }

    /// Number of scopes currently registered.
    pub fn active_scopes(&self) -> usize {
        self.scopes.borrow().entries.len()
    }
}

/// Registration guard returned by [`ShortcutRegistry::register`].
#[derive(Debug)]
pub struct ShortcutScope {
    id: u64,
    scopes: Weak<RefCell<Scopes>>,
}

impl ShortcutScope {
    /// True while this scope is the one receiving shortcuts.
    pub fn is_active(&self) -> bool {
        let Some(scopes) = self.scopes.upgrade() else {
            return false;
        };
        let top = scopes.borrow().entries.last().map(|(id, _)| *id);
        top == Some(self.id)
    }

    /// Resolves a key press, but only while this scope is active.
    pub fn resolve(&self, key: &str, modifiers: &Modifiers) -> Option<Action> {
        let scopes = self.scopes.upgrade()?;
        let scopes = scopes.borrow();
        let (top_id, bindings) = scopes.entries.last()?;
        if *top_id != self.id {
            return None;
        }
        lookup(bindings, key, modifiers)
    }
}

impl Drop for ShortcutScope {
    fn drop(&mut self) {
        if let Some(scopes) = self.scopes.upgrade() {
            scopes.borrow_mut().entries.retain(|(id, _)| *id != self.id);
            log::debug!("Released shortcut scope {}", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeybindingsConfig;

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::new()
        }
    }

    fn bindings() -> HashMap<KeyBinding, Action> {
        KeybindingsConfig::default().build_action_map().unwrap()
    }

    #[test]
    fn dropping_scope_deregisters_bindings() {
        let registry = ShortcutRegistry::new();
        let scope = registry.register(bindings());
        assert_eq!(registry.resolve("z", &ctrl()), Some(Action::Undo));

        drop(scope);
        assert_eq!(registry.active_scopes(), 0);
        assert_eq!(registry.resolve("z", &ctrl()), None);
    }

    #[test]
    fn meta_triggers_ctrl_bindings() {
        let registry = ShortcutRegistry::new();
        let _scope = registry.register(bindings());
        let meta = Modifiers {
            meta: true,
            ..Modifiers::new()
        };
        assert_eq!(registry.resolve("y", &meta), Some(Action::Redo));
        assert_eq!(registry.resolve("y", &Modifiers::new()), None);
    }

    #[test]
    fn latest_scope_shadows_earlier_ones() {
        let registry = ShortcutRegistry::new();
        let first = registry.register(bindings());
        let second = registry.register(HashMap::new());

        assert!(!first.is_active());
        assert!(second.is_active());
        assert_eq!(first.resolve("z", &ctrl()), None);
        assert_eq!(registry.resolve("z", &ctrl()), None);

        drop(second);
        assert!(first.is_active());
        assert_eq!(first.resolve("z", &ctrl()), Some(Action::Undo));
    }

    #[test]
    fn scope_outliving_registry_is_inert() {
        let registry = ShortcutRegistry::new();
        let scope = registry.register(bindings());
        drop(registry);
        assert!(!scope.is_active());
        assert_eq!(scope.resolve("z", &ctrl()), None);
    }
}
