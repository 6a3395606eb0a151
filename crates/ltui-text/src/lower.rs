#![forbid(unsafe_code)]

//! Span-tree lowering: multilingual in, resolved plain spans out.
//!
//! `lower` walks a [`MultilingualSpan`] tree once, resolving every
//! translation mapping against one `(default, selected)` pair and
//! copying all passthrough payloads verbatim.
//!
//! # Invariants
//!
//! 1. Child order and tree shape are preserved exactly.
//! 2. Widget leaves keep their handle identity; lowering never touches
//!    the embedded widget.
//! 3. A span whose mapping is absent lowers to `text: None`; a mapping
//!    that exists but misses both languages lowers to `Some("")`. The
//!    distinction lets hosts elide spans that never had text.

use ltui_lang::{LanguageKey, LanguageState};

use crate::interact::{HoverHandlers, TapRecognizer};
use crate::span::{MultilingualSpan, TextSpan, WidgetSpan};
use crate::style::{MouseCursor, Style};

/// A resolved span tree node, ready for the host's span primitive.
#[derive(Clone, Debug)]
pub enum PlainSpan {
    Text(PlainTextSpan),
    Widget(WidgetSpan),
}

impl PlainSpan {
    /// Concatenate the resolved text of the tree in order, skipping
    /// widget leaves. Useful for hosts without rich rendering and for
    /// assertions in tests.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_plain_text(&mut out);
        out
    }

    fn collect_plain_text(&self, out: &mut String) {
        match self {
            PlainSpan::Widget(_) => {}
            PlainSpan::Text(span) => {
                if let Some(text) = &span.text {
                    out.push_str(text);
                }
                for child in &span.children {
                    child.collect_plain_text(out);
                }
            }
        }
    }
}

/// A resolved text node: plain strings where the mappings were, every
/// passthrough field untouched.
#[derive(Clone, Debug)]
pub struct PlainTextSpan {
    /// Resolved text; `None` when the source span had no mapping.
    pub text: Option<String>,
    /// Resolved accessibility label; `None` when no label mapping.
    pub semantics_label: Option<String>,
    pub style: Style,
    pub recognizer: Option<TapRecognizer>,
    pub hover: HoverHandlers,
    pub cursor: MouseCursor,
    pub locale_tag: Option<String>,
    pub spell_out: Option<bool>,
    /// Lowered children, in source order.
    pub children: Vec<PlainSpan>,
}

/// Lower one span tree against a language state.
#[must_use]
pub fn lower<L: LanguageKey>(span: &MultilingualSpan<L>, state: &LanguageState<L>) -> PlainSpan {
    match span {
        MultilingualSpan::Widget(widget) => PlainSpan::Widget(widget.clone()),
        MultilingualSpan::Text(text_span) => PlainSpan::Text(lower_text(text_span, state)),
    }
}

fn lower_text<L: LanguageKey>(span: &TextSpan<L>, state: &LanguageState<L>) -> PlainTextSpan {
    PlainTextSpan {
        text: span
            .text_translations()
            .map(|map| state.resolve_or_empty(map).to_owned()),
        semantics_label: span
            .label_translations()
            .map(|map| state.resolve_or_empty(map).to_owned()),
        style: span.span_style(),
        recognizer: span.tap_recognizer().cloned(),
        hover: span.hover_handlers().clone(),
        cursor: span.effective_cursor(),
        locale_tag: span.locale_hint().map(str::to_owned),
        spell_out: span.spell_out_hint(),
        children: span
            .child_spans()
            .iter()
            .map(|child| lower(child, state))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::WidgetHandle;
    use crate::style::StyleFlags;
    use ltui_lang::Translations;
    use std::rc::Rc;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Lang {
        German,
        English,
    }

    fn state(selected: Option<Lang>) -> LanguageState<Lang> {
        LanguageState::new(Lang::German, selected, Rc::new(|_| {}))
    }

    fn greeting() -> Translations<Lang> {
        Translations::new()
            .with(Lang::German, "Guten Tag")
            .with(Lang::English, "Hello")
    }

    fn farewell() -> Translations<Lang> {
        Translations::new()
            .with(Lang::German, "Tsch\u{fc}ss")
            .with(Lang::English, "Bye")
    }

    fn as_text(span: &PlainSpan) -> &PlainTextSpan {
        match span {
            PlainSpan::Text(text) => text,
            PlainSpan::Widget(_) => panic!("expected a text span"),
        }
    }

    #[test]
    fn siblings_resolve_independently_in_order() {
        let tree: MultilingualSpan<Lang> = TextSpan::container()
            .child(TextSpan::new(greeting()))
            .child(TextSpan::new(farewell()))
            .into();

        let lowered = lower(&tree, &state(Some(Lang::English)));
        let root = as_text(&lowered);
        assert_eq!(root.text, None);
        assert_eq!(root.children.len(), 2);
        assert_eq!(as_text(&root.children[0]).text.as_deref(), Some("Hello"));
        assert_eq!(as_text(&root.children[1]).text.as_deref(), Some("Bye"));
        assert_eq!(lowered.to_plain_text(), "HelloBye");
    }

    #[test]
    fn shape_and_order_preserved() {
        let tree: MultilingualSpan<Lang> = TextSpan::new(greeting())
            .child(
                TextSpan::new(farewell()).child(WidgetSpan::new("spinner")),
            )
            .child(WidgetSpan::new("badge"))
            .into();

        let lowered = lower(&tree, &state(None));
        let root = as_text(&lowered);
        assert_eq!(root.children.len(), 2);

        let nested = as_text(&root.children[0]);
        assert_eq!(nested.children.len(), 1);
        assert!(matches!(nested.children[0], PlainSpan::Widget(_)));
        assert!(matches!(root.children[1], PlainSpan::Widget(_)));
    }

    #[test]
    fn widget_leaves_keep_identity() {
        let handle: WidgetHandle = Rc::new("gauge");
        let tree: MultilingualSpan<Lang> =
            WidgetSpan::from_handle(Rc::clone(&handle)).into();

        let lowered = lower(&tree, &state(Some(Lang::English)));
        match lowered {
            PlainSpan::Widget(widget) => assert!(Rc::ptr_eq(widget.widget(), &handle)),
            PlainSpan::Text(_) => panic!("widget span must lower to itself"),
        }
    }

    #[test]
    fn absent_mapping_lowers_to_none() {
        let tree: MultilingualSpan<Lang> = TextSpan::container().into();
        assert_eq!(as_text(&lower(&tree, &state(None))).text, None);
    }

    #[test]
    fn exhausted_mapping_lowers_to_empty_string() {
        let only_english = Translations::new().with(Lang::English, "Hello");
        let exhausted = LanguageState::new(Lang::German, Some(Lang::German), Rc::new(|_| {}));
        let tree: MultilingualSpan<Lang> = TextSpan::new(only_english).into();
        assert_eq!(
            as_text(&lower(&tree, &exhausted)).text.as_deref(),
            Some("")
        );
    }

    #[test]
    fn label_resolves_against_its_own_mapping() {
        let label = Translations::new()
            .with(Lang::German, "Begr\u{fc}\u{df}ung")
            .with(Lang::English, "Greeting");
        let tree: MultilingualSpan<Lang> =
            TextSpan::new(greeting()).semantics_label(label).into();

        let lowered = lower(&tree, &state(Some(Lang::English)));
        let root = as_text(&lowered);
        assert_eq!(root.text.as_deref(), Some("Hello"));
        assert_eq!(root.semantics_label.as_deref(), Some("Greeting"));

        let german = lower(&tree, &state(None));
        assert_eq!(
            as_text(&german).semantics_label.as_deref(),
            Some("Begr\u{fc}\u{df}ung")
        );
    }

    #[test]
    fn passthrough_fields_survive_lowering() {
        let tree: MultilingualSpan<Lang> = TextSpan::new(greeting())
            .style(Style::new().bold())
            .recognizer(TapRecognizer::new(|| {}))
            .locale_tag("de-DE")
            .spell_out(true)
            .into();

        let lowered = lower(&tree, &state(None));
        let root = as_text(&lowered);
        assert!(root.style.has_attr(StyleFlags::BOLD));
        assert!(root.recognizer.is_some());
        assert_eq!(root.cursor, MouseCursor::Click);
        assert_eq!(root.locale_tag.as_deref(), Some("de-DE"));
        assert_eq!(root.spell_out, Some(true));
    }

    #[test]
    fn lowering_is_language_sensitive_but_cursor_is_not() {
        let span = TextSpan::new(greeting()).recognizer(TapRecognizer::new(|| {}));
        let tree: MultilingualSpan<Lang> = span.into();

        let german = lower(&tree, &state(None));
        let english = lower(&tree, &state(Some(Lang::English)));
        assert_eq!(as_text(&german).text.as_deref(), Some("Guten Tag"));
        assert_eq!(as_text(&english).text.as_deref(), Some("Hello"));
        assert_eq!(as_text(&german).cursor, as_text(&english).cursor);
    }
}
