#![forbid(unsafe_code)]

//! Multilingual span trees and text resolvers for LingoTUI.
//!
//! Text-bearing nodes carry [`ltui_lang::Translations`] mappings instead
//! of fixed strings. At render time a resolver reads the nearest
//! [`ltui_lang::LanguageState`], applies the two-level resolution rule to
//! every multilingual field, lowers rich span trees to plain resolved
//! spans, and hands the result to the host's text primitive.
//!
//! # Role in LingoTUI
//! `ltui-text` owns the span vocabulary and the resolvers. Styling and
//! interaction types here are pure passthrough payloads — the layer never
//! interprets them, it delivers them unchanged to the host.
//!
//! # How it fits in the system
//! `ltui-lang` supplies selection state and resolution; hosts implement
//! [`TextHost`] and schedule re-renders from a scope subscription.

pub mod interact;
pub mod lower;
pub mod span;
pub mod style;
pub mod widget;

pub use interact::{HoverHandlers, TapRecognizer};
pub use lower::{PlainSpan, PlainTextSpan, lower};
pub use span::{InlineAlignment, MultilingualSpan, TextBaseline, TextSpan, WidgetHandle, WidgetSpan};
pub use style::{MouseCursor, Rgb, Style, StyleFlags, TextAlign, TextOverflow};
pub use widget::{
    MultilingualRichText, MultilingualText, SelectionRegistrar, TextContent, TextHost, TextOptions,
};
