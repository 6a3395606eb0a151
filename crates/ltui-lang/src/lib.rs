#![forbid(unsafe_code)]

//! Language selection state and scoped broadcast for LingoTUI.
//!
//! Applications pick an opaque language key type (usually a small enum),
//! attach per-language string mappings to their text nodes, and wrap the
//! widget tree in a [`LanguageScope`]. The scope owns the currently
//! selected language and rebroadcasts a fresh [`LanguageState`] snapshot
//! to subscribers whenever the selection actually changes.
//!
//! # Role in LingoTUI
//! `ltui-lang` is the propagation core: selection state, the two-level
//! resolution rule, and the type-keyed publish/lookup mechanism. It knows
//! nothing about spans, styling, or rendering.
//!
//! # How it fits in the system
//! `ltui-text` resolvers read the nearest [`LanguageState`] at render
//! time and apply [`Translations::resolve`] to every multilingual field.
//! Hosts subscribe to a scope to schedule re-renders on rebroadcast.

pub mod context;
pub mod scope;
pub mod state;

pub use context::{ScopeGuard, lookup, try_lookup};
pub use scope::{LanguageScope, Subscription};
pub use state::{LanguageKey, LanguageState, Translations};
