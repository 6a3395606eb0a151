#![forbid(unsafe_code)]

//! LingoTUI public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the language layer and the text resolvers and offers a
//! lightweight prelude for day-to-day usage.
//!
//! ```
//! use ltui::prelude::*;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Lang {
//!     German,
//!     English,
//! }
//!
//! let scope = LanguageScope::new(Lang::German);
//! let greeting = Translations::new()
//!     .with(Lang::German, "Guten Tag")
//!     .with(Lang::English, "Hello");
//!
//! assert_eq!(scope.state().resolve(&greeting), Some("Guten Tag"));
//! scope.select(Lang::English);
//! assert_eq!(scope.state().resolve(&greeting), Some("Hello"));
//! ```

// --- Language layer re-exports ---------------------------------------------

pub use ltui_lang::{
    LanguageKey, LanguageScope, LanguageState, ScopeGuard, Subscription, Translations, lookup,
    try_lookup,
};

// --- Text layer re-exports -------------------------------------------------

pub use ltui_text::{
    HoverHandlers, InlineAlignment, MouseCursor, MultilingualRichText, MultilingualSpan,
    MultilingualText, PlainSpan, PlainTextSpan, Rgb, SelectionRegistrar, Style, StyleFlags,
    TapRecognizer, TextAlign, TextBaseline, TextContent, TextHost, TextOptions, TextOverflow,
    TextSpan, WidgetHandle, WidgetSpan, lower,
};

/// Common imports for applications embedding LingoTUI.
pub mod prelude {
    pub use ltui_lang::{LanguageKey, LanguageScope, LanguageState, Translations};
    pub use ltui_text::{
        MultilingualRichText, MultilingualSpan, MultilingualText, Style, TextHost, TextSpan,
        WidgetSpan,
    };
}
