#![forbid(unsafe_code)]

//! The stateful coordinator that owns the selected language.
//!
//! A [`LanguageScope`] is created once per subtree root (typically once
//! per application). It holds the mutable "currently selected language"
//! and, whenever the selection actually changes, constructs a fresh
//! [`LanguageState`] snapshot and rebroadcasts it to subscribers.
//!
//! # Invariants
//!
//! 1. The published selection is `tracked ?? initial ?? default` — first
//!    non-empty wins — so consumers always observe a concrete language.
//! 2. `select(l)` where `l` equals the current effective selection is a
//!    no-op: no version bump, no notification.
//! 3. Subscribers are notified in registration order; dead subscribers
//!    (dropped [`Subscription`] guards) are pruned lazily on rebroadcast.
//! 4. Once `select` has run there is no path back to "no explicit
//!    selection". Constructing a new scope is the only reset.
//!
//! # Failure Modes
//!
//! - **Re-entrant select**: permitted. Notification collects callbacks
//!   and releases the interior borrow before invoking them, so a
//!   subscriber may itself call `select`.
//! - **Subscriber leak**: holding a [`Subscription`] guard forever keeps
//!   its callback alive; dropped guards are cleaned on the next
//!   rebroadcast.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{info, info_span};
use web_time::Instant;

use crate::context::{self, ScopeGuard};
use crate::state::{LanguageKey, LanguageState};

type ListenerRc<L> = Rc<dyn Fn(&LanguageState<L>)>;
type ListenerWeak<L> = Weak<dyn Fn(&LanguageState<L>)>;

struct ScopeShared<L: LanguageKey> {
    default_language: L,
    initial_selection: Option<L>,
    tracked: Option<L>,
    version: u64,
    /// Subscribers stored as weak references, pruned on rebroadcast.
    subscribers: Vec<ListenerWeak<L>>,
}

/// Shared-handle owner of the selected language for one subtree.
///
/// Cloning a `LanguageScope` creates a new handle to the **same** inner
/// state — both handles see the same selection and share subscribers.
pub struct LanguageScope<L: LanguageKey> {
    shared: Rc<RefCell<ScopeShared<L>>>,
}

impl<L: LanguageKey> Clone for LanguageScope<L> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<L: LanguageKey> fmt::Debug for LanguageScope<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("LanguageScope")
            .field("default_language", &shared.default_language)
            .field("tracked", &shared.tracked)
            .field("version", &shared.version)
            .field("subscriber_count", &shared.subscribers.len())
            .finish()
    }
}

impl<L: LanguageKey> LanguageScope<L> {
    /// Create a scope with no explicit selection; text resolves against
    /// `default_language` until [`LanguageScope::select`] is called.
    #[must_use]
    pub fn new(default_language: L) -> Self {
        Self::with_selection(default_language, None)
    }

    /// Create a scope with an optional initial selection, visible
    /// immediately through the published snapshot.
    #[must_use]
    pub fn with_selection(default_language: L, selected_language: Option<L>) -> Self {
        Self {
            shared: Rc::new(RefCell::new(ScopeShared {
                default_language,
                initial_selection: selected_language,
                tracked: None,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// The fallback language, fixed at construction.
    #[must_use]
    pub fn default_language(&self) -> L {
        self.shared.borrow().default_language.clone()
    }

    /// The selection consumers observe: `tracked ?? initial ?? default`.
    #[must_use]
    pub fn effective_selection(&self) -> L {
        let shared = self.shared.borrow();
        shared
            .tracked
            .clone()
            .or_else(|| shared.initial_selection.clone())
            .unwrap_or_else(|| shared.default_language.clone())
    }

    /// Whether [`LanguageScope::select`] has been called at least once.
    #[must_use]
    pub fn has_explicit_selection(&self) -> bool {
        self.shared.borrow().tracked.is_some()
    }

    /// Construct a fresh published snapshot.
    ///
    /// The snapshot's mutation callback routes back to this scope, so
    /// any consumer holding the state can drive a selection change.
    #[must_use]
    pub fn state(&self) -> LanguageState<L> {
        let shared = self.shared.borrow();
        let effective = shared
            .tracked
            .clone()
            .or_else(|| shared.initial_selection.clone())
            .unwrap_or_else(|| shared.default_language.clone());
        let handle = self.clone();
        LanguageState::new(
            shared.default_language.clone(),
            Some(effective),
            Rc::new(move |language| handle.select(language)),
        )
    }

    /// The mutation entry point: record an explicit selection and, when
    /// the effective selection changed, rebroadcast a fresh snapshot.
    ///
    /// Selecting the language that is already effective is a no-op.
    pub fn select(&self, language: L) {
        let previous = self.state();
        self.shared.borrow_mut().tracked = Some(language);
        let fresh = self.state();
        if !LanguageState::should_notify_dependents(&previous, &fresh) {
            return;
        }
        self.shared.borrow_mut().version += 1;
        self.notify(&fresh);
    }

    /// Subscribe to rebroadcasts. The callback receives each fresh
    /// snapshot after a selection change.
    ///
    /// Returns a [`Subscription`] guard; dropping it unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&LanguageState<L>) + 'static) -> Subscription {
        let strong: ListenerRc<L> = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        self.shared.borrow_mut().subscribers.push(weak);
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Publish this scope for type-keyed lookup on the current thread.
    ///
    /// Descendant resolvers find it via [`crate::context::lookup`] until
    /// the returned guard is dropped.
    #[must_use = "dropping this guard unpublishes the scope"]
    pub fn enter(&self) -> ScopeGuard {
        context::publish(self)
    }

    /// Rebroadcast count. Increments by 1 per effective selection change;
    /// useful for dirty-checking in render loops.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.shared.borrow().version
    }

    /// Number of registered subscribers, including dead ones not yet
    /// pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.borrow().subscribers.len()
    }

    /// Notify live subscribers in registration order, pruning dead ones.
    fn notify(&self, fresh: &LanguageState<L>) {
        // Collect live callbacks first so no borrow is held during calls.
        let callbacks: Vec<ListenerRc<L>> = {
            let mut shared = self.shared.borrow_mut();
            shared.subscribers.retain(|weak| weak.strong_count() > 0);
            shared.subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        if callbacks.is_empty() {
            return;
        }

        let dependents = callbacks.len() as u64;
        let started = Instant::now();
        let _span = info_span!(
            "language.rebroadcast",
            dependents,
            duration_us = tracing::field::Empty
        )
        .entered();

        for callback in &callbacks {
            callback(fresh);
        }

        let duration_us = started.elapsed().as_micros() as u64;
        tracing::Span::current().record("duration_us", duration_us);
        info!(
            rebroadcast_duration_us = duration_us,
            dependents, "language selection rebroadcast"
        );
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the `Subscription` drops the strong reference to the
/// callback; the scope's weak entry fails to upgrade on the next
/// rebroadcast and is pruned.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
