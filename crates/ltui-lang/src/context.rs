#![forbid(unsafe_code)]

//! Type-keyed scoped publication and lookup.
//!
//! The host framework's provider mechanism is modeled as a thread-local
//! registry: entering a [`LanguageScope`] pushes it onto the stack for
//! its language-key type, and [`lookup`] returns the nearest (most
//! recently entered) scope's snapshot. Keying by `TypeId` means scopes
//! over distinct key types never collide.
//!
//! # Invariants
//!
//! 1. The nearest publication wins: nested scopes shadow outer ones for
//!    the same key type until their guard drops.
//! 2. A guard unpublishes exactly its own entry, even when guards are
//!    dropped out of LIFO order during teardown.
//! 3. All publication and lookup happens on one thread; the registry is
//!    thread-local, matching the single-threaded render model.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | No scope entered | Tree not wrapped in a `LanguageScope` | [`lookup`] panics (programmer error) |
//! | Scope of wrong key type | Mismatched language enums | Not found; other key types are invisible |

use std::any::{Any, TypeId, type_name};
use std::cell::{Cell, RefCell};

use ahash::AHashMap;

use crate::scope::LanguageScope;
use crate::state::{LanguageKey, LanguageState};

struct PublishedScope {
    id: u64,
    scope: Box<dyn Any>,
}

thread_local! {
    static REGISTRY: RefCell<AHashMap<TypeId, Vec<PublishedScope>>> =
        RefCell::new(AHashMap::new());
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Publish a scope for its key type; called by [`LanguageScope::enter`].
pub(crate) fn publish<L: LanguageKey>(scope: &LanguageScope<L>) -> ScopeGuard {
    let key = TypeId::of::<L>();
    let id = NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });
    REGISTRY.with(|registry| {
        registry
            .borrow_mut()
            .entry(key)
            .or_default()
            .push(PublishedScope {
                id,
                scope: Box::new(scope.clone()),
            });
    });
    ScopeGuard { key, id }
}

/// Snapshot of the nearest entered scope for the key type `L`.
///
/// # Panics
///
/// Panics when no scope of this key type is entered on the current
/// thread. A missing scope is an integration error — the application
/// forgot to wrap its tree in a [`LanguageScope`] — so this fails fast
/// rather than degrading.
#[must_use]
pub fn lookup<L: LanguageKey>() -> LanguageState<L> {
    try_lookup::<L>().unwrap_or_else(|| {
        panic!(
            "no LanguageScope<{}> entered on this thread; \
             wrap the tree in a LanguageScope and hold its enter() guard",
            type_name::<L>()
        )
    })
}

/// Non-failing variant of [`lookup`].
#[must_use]
pub fn try_lookup<L: LanguageKey>() -> Option<LanguageState<L>> {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .get(&TypeId::of::<L>())
            .and_then(|stack| stack.last())
            .and_then(|published| published.scope.downcast_ref::<LanguageScope<L>>())
            .map(LanguageScope::state)
    })
}

/// RAII guard returned by [`LanguageScope::enter`].
///
/// Dropping it unpublishes that scope; an outer scope of the same key
/// type (if any) becomes visible again.
#[must_use = "dropping this guard unpublishes the scope"]
#[derive(Debug)]
pub struct ScopeGuard {
    key: TypeId,
    id: u64,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        REGISTRY.with(|registry| {
            let mut registry = registry.borrow_mut();
            if let Some(stack) = registry.get_mut(&self.key) {
                stack.retain(|published| published.id != self.id);
                if stack.is_empty() {
                    registry.remove(&self.key);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Lang {
        German,
        English,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Dialect {
        Bavarian,
        Saxon,
    }

    #[test]
    fn lookup_finds_entered_scope() {
        let scope = LanguageScope::new(Lang::German);
        let _guard = scope.enter();
        let state = lookup::<Lang>();
        assert_eq!(state.selected_language(), Some(&Lang::German));
    }

    #[test]
    fn try_lookup_without_scope_is_none() {
        assert!(try_lookup::<Lang>().is_none());
    }

    #[test]
    #[should_panic(expected = "no LanguageScope")]
    fn lookup_without_scope_panics() {
        let _ = lookup::<Lang>();
    }

    #[test]
    fn guard_drop_unpublishes() {
        let scope = LanguageScope::new(Lang::German);
        {
            let _guard = scope.enter();
            assert!(try_lookup::<Lang>().is_some());
        }
        assert!(try_lookup::<Lang>().is_none());
    }

    #[test]
    fn nearest_scope_wins() {
        let outer = LanguageScope::new(Lang::German);
        let inner = LanguageScope::with_selection(Lang::German, Some(Lang::English));
        let _outer_guard = outer.enter();
        {
            let _inner_guard = inner.enter();
            assert_eq!(
                lookup::<Lang>().selected_language(),
                Some(&Lang::English)
            );
        }
        assert_eq!(lookup::<Lang>().selected_language(), Some(&Lang::German));
    }

    #[test]
    fn out_of_order_guard_drop_removes_own_entry() {
        let outer = LanguageScope::new(Lang::German);
        let inner = LanguageScope::with_selection(Lang::German, Some(Lang::English));
        let outer_guard = outer.enter();
        let inner_guard = inner.enter();

        // Tear down the outer guard first; the inner scope must remain
        // the visible one.
        drop(outer_guard);
        assert_eq!(lookup::<Lang>().selected_language(), Some(&Lang::English));

        drop(inner_guard);
        assert!(try_lookup::<Lang>().is_none());
    }

    #[test]
    fn key_types_do_not_collide() {
        let lang = LanguageScope::new(Lang::German);
        let dialect = LanguageScope::new(Dialect::Bavarian);
        let _lang_guard = lang.enter();
        let _dialect_guard = dialect.enter();

        assert_eq!(lookup::<Lang>().selected_language(), Some(&Lang::German));
        assert_eq!(
            lookup::<Dialect>().selected_language(),
            Some(&Dialect::Bavarian)
        );

        dialect.select(Dialect::Saxon);
        assert_eq!(lookup::<Lang>().selected_language(), Some(&Lang::German));
        assert_eq!(
            lookup::<Dialect>().selected_language(),
            Some(&Dialect::Saxon)
        );
    }

    #[test]
    fn lookup_reflects_selection_changes() {
        let scope = LanguageScope::new(Lang::German);
        let _guard = scope.enter();
        assert_eq!(lookup::<Lang>().selected_language(), Some(&Lang::German));

        scope.select(Lang::English);
        assert_eq!(lookup::<Lang>().selected_language(), Some(&Lang::English));
    }
}
