#![forbid(unsafe_code)]

//! Translation mappings, the resolution rule, and the published state.
//!
//! # Invariants
//!
//! 1. **Resolution is total**: `resolve` never fails. Worst case it
//!    returns `None`, which flat-text callers render as `""`.
//! 2. **Selected wins**: when the selected language is present in the
//!    mapping it is returned even if the default is also present.
//! 3. **Partial mappings are normal**: a missing key is an expected
//!    state, not an error.
//! 4. **Snapshots are immutable**: a [`LanguageState`] never changes
//!    after construction; selection changes produce a fresh snapshot.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing selected key | Mapping lacks the selected language | Falls back to the default language |
//! | Missing default key | Mapping lacks both languages | `resolve` returns `None` |
//! | No scope entered | `lookup` without a `LanguageScope` | Panic (programmer error, see [`crate::context`]) |

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use ahash::AHashMap;

/// An opaque language key: any cheap, comparable, hashable value.
///
/// In practice this is a small application-defined enum. The key set is
/// fixed for the lifetime of one scope instance.
pub trait LanguageKey: Clone + Eq + Hash + fmt::Debug + 'static {}

impl<T: Clone + Eq + Hash + fmt::Debug + 'static> LanguageKey for T {}

/// A partial mapping from language key to the literal string for that
/// language, attached to a text-bearing node.
///
/// # Example
///
/// ```
/// use ltui_lang::Translations;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum Lang {
///     German,
///     English,
/// }
///
/// let greeting = Translations::new()
///     .with(Lang::German, "Guten Tag")
///     .with(Lang::English, "Hello");
///
/// assert_eq!(greeting.resolve(&Lang::German, None), Some("Guten Tag"));
/// assert_eq!(
///     greeting.resolve(&Lang::German, Some(&Lang::English)),
///     Some("Hello")
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Translations<L: LanguageKey> {
    entries: AHashMap<L, String>,
}

impl<L: LanguageKey> Translations<L> {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: AHashMap::new(),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, language: L, text: impl Into<String>) -> Self {
        self.entries.insert(language, text.into());
        self
    }

    /// Insert or replace the string for a language.
    pub fn insert(&mut self, language: L, text: impl Into<String>) {
        self.entries.insert(language, text.into());
    }

    /// Look up the string for a language.
    #[must_use]
    pub fn get(&self, language: &L) -> Option<&str> {
        self.entries.get(language).map(String::as_str)
    }

    /// Whether the mapping has an entry for a language.
    #[must_use]
    pub fn contains(&self, language: &L) -> bool {
        self.entries.contains_key(language)
    }

    /// Number of languages in the mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the languages present in the mapping.
    pub fn languages(&self) -> impl Iterator<Item = &L> {
        self.entries.keys()
    }

    /// Languages from `reference` that this mapping lacks, in `reference`
    /// order. Useful for translation-coverage checks in tests and tools.
    #[must_use]
    pub fn missing_languages(&self, reference: &[L]) -> Vec<L> {
        reference
            .iter()
            .filter(|language| !self.entries.contains_key(language))
            .cloned()
            .collect()
    }

    /// Apply the two-level resolution rule.
    ///
    /// Returns the string for `selected` when it is set and present,
    /// otherwise the string for `default_language`, otherwise `None`.
    #[must_use]
    pub fn resolve(&self, default_language: &L, selected: Option<&L>) -> Option<&str> {
        if let Some(language) = selected {
            if let Some(text) = self.entries.get(language) {
                return Some(text);
            }
        }
        self.entries.get(default_language).map(String::as_str)
    }

    /// [`Translations::resolve`], with `""` as the flat-text empty value.
    #[must_use]
    pub fn resolve_or_empty(&self, default_language: &L, selected: Option<&L>) -> &str {
        self.resolve(default_language, selected).unwrap_or("")
    }
}

impl<L: LanguageKey, S: Into<String>> FromIterator<(L, S)> for Translations<L> {
    fn from_iter<I: IntoIterator<Item = (L, S)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(language, text)| (language, text.into()))
                .collect(),
        }
    }
}

/// The immutable snapshot a [`crate::scope::LanguageScope`] publishes to
/// the tree below it.
///
/// Holds the scope's default language, the effective selection, and the
/// mutation entry point. Consumers treat it as read-only; the scope never
/// mutates a published snapshot, it constructs and rebroadcasts a new one.
pub struct LanguageState<L: LanguageKey> {
    default_language: L,
    selected_language: Option<L>,
    on_language_selected: Rc<dyn Fn(L)>,
}

impl<L: LanguageKey> LanguageState<L> {
    /// Construct a snapshot.
    ///
    /// Normally done by [`crate::scope::LanguageScope::state`]; public so
    /// hosts that thread context explicitly can build their own.
    #[must_use]
    pub fn new(
        default_language: L,
        selected_language: Option<L>,
        on_language_selected: Rc<dyn Fn(L)>,
    ) -> Self {
        Self {
            default_language,
            selected_language,
            on_language_selected,
        }
    }

    /// The author-specified fallback language, fixed for the scope's
    /// lifetime.
    #[must_use]
    pub fn default_language(&self) -> &L {
        &self.default_language
    }

    /// The currently selected language, if any.
    #[must_use]
    pub fn selected_language(&self) -> Option<&L> {
        self.selected_language.as_ref()
    }

    /// The language text resolves against: the selection when present,
    /// the default otherwise.
    #[must_use]
    pub fn effective_language(&self) -> &L {
        self.selected_language
            .as_ref()
            .unwrap_or(&self.default_language)
    }

    /// Invoke the mutation entry point. The owning scope updates its
    /// selection and rebroadcasts; this snapshot itself is unchanged.
    pub fn select(&self, language: L) {
        (self.on_language_selected)(language);
    }

    /// Apply the resolution rule with this snapshot's languages.
    #[must_use]
    pub fn resolve<'a>(&self, translations: &'a Translations<L>) -> Option<&'a str> {
        translations.resolve(&self.default_language, self.selected_language.as_ref())
    }

    /// [`LanguageState::resolve`] with `""` as the empty value.
    #[must_use]
    pub fn resolve_or_empty<'a>(&self, translations: &'a Translations<L>) -> &'a str {
        self.resolve(translations).unwrap_or("")
    }

    /// The sole rebroadcast trigger: true iff the two snapshots differ in
    /// their selected language. Default-language and callback identity
    /// never force a rebroadcast.
    #[must_use]
    pub fn should_notify_dependents(old: &Self, new: &Self) -> bool {
        old.selected_language != new.selected_language
    }

    /// Nearest published snapshot for this key type.
    ///
    /// # Panics
    ///
    /// Panics when no [`crate::scope::LanguageScope`] of this key type has
    /// been entered on the current thread. See [`crate::context::lookup`].
    #[must_use]
    pub fn lookup() -> Self {
        crate::context::lookup::<L>()
    }

    /// Non-failing variant of [`LanguageState::lookup`].
    #[must_use]
    pub fn try_lookup() -> Option<Self> {
        crate::context::try_lookup::<L>()
    }
}

impl<L: LanguageKey> Clone for LanguageState<L> {
    fn clone(&self) -> Self {
        Self {
            default_language: self.default_language.clone(),
            selected_language: self.selected_language.clone(),
            on_language_selected: Rc::clone(&self.on_language_selected),
        }
    }
}

impl<L: LanguageKey> fmt::Debug for LanguageState<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageState")
            .field("default_language", &self.default_language)
            .field("selected_language", &self.selected_language)
            .finish_non_exhaustive()
    }
}
