#![forbid(unsafe_code)]

//! The multilingual span tree.
//!
//! A span tree is an ordered, rooted, finite tree over exactly two node
//! kinds: [`TextSpan`], which carries its own translation mapping and
//! styling plus child spans, and [`WidgetSpan`], which embeds an opaque
//! sub-widget with no language dependency. Spans are immutable and built
//! bottom-up, so cycles are unrepresentable.
//!
//! # Invariants
//!
//! 1. Child order is significant and preserved by lowering.
//! 2. A [`TextSpan`] with no mapping is a valid container node.
//! 3. The effective cursor is computed from construction data only —
//!    explicit cursor wins, else `Click` with a recognizer, else
//!    `Defer` — and never depends on the selected language.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use ltui_lang::{LanguageKey, Translations};

use crate::interact::{HoverHandlers, TapRecognizer};
use crate::style::{MouseCursor, Style};

/// Opaque handle to a host widget embedded in a span tree.
pub type WidgetHandle = Rc<dyn Any>;

/// Vertical placement of an embedded widget within the line box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InlineAlignment {
    /// Sit on the text baseline.
    #[default]
    Baseline,
    Top,
    Middle,
    Bottom,
}

/// Which baseline [`InlineAlignment::Baseline`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    Alphabetic,
    Ideographic,
}

/// One node of a multilingual span tree.
#[derive(Clone, Debug)]
pub enum MultilingualSpan<L: LanguageKey> {
    Text(TextSpan<L>),
    Widget(WidgetSpan),
}

impl<L: LanguageKey> From<TextSpan<L>> for MultilingualSpan<L> {
    fn from(span: TextSpan<L>) -> Self {
        Self::Text(span)
    }
}

impl<L: LanguageKey> From<WidgetSpan> for MultilingualSpan<L> {
    fn from(span: WidgetSpan) -> Self {
        Self::Widget(span)
    }
}

/// A text node: its own translation mapping, styling, interaction
/// payloads, and ordered children.
#[derive(Clone, Debug)]
pub struct TextSpan<L: LanguageKey> {
    text: Option<Translations<L>>,
    semantics_label: Option<Translations<L>>,
    style: Style,
    recognizer: Option<TapRecognizer>,
    hover: HoverHandlers,
    explicit_cursor: Option<MouseCursor>,
    locale_tag: Option<String>,
    spell_out: Option<bool>,
    children: Vec<MultilingualSpan<L>>,
}

impl<L: LanguageKey> TextSpan<L> {
    /// A span with its own translated text.
    #[must_use]
    pub fn new(text: Translations<L>) -> Self {
        Self {
            text: Some(text),
            semantics_label: None,
            style: Style::new(),
            recognizer: None,
            hover: HoverHandlers::default(),
            explicit_cursor: None,
            locale_tag: None,
            spell_out: None,
            children: Vec::new(),
        }
    }

    /// A container span with no text of its own, only children.
    #[must_use]
    pub fn container() -> Self {
        Self {
            text: None,
            semantics_label: None,
            style: Style::new(),
            recognizer: None,
            hover: HoverHandlers::default(),
            explicit_cursor: None,
            locale_tag: None,
            spell_out: None,
            children: Vec::new(),
        }
    }

    /// Attach a translated accessibility label; resolves by the same
    /// rule as the text, against its own mapping.
    #[must_use]
    pub fn semantics_label(mut self, label: Translations<L>) -> Self {
        self.semantics_label = Some(label);
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Attach a tap recognizer. Without an explicit cursor this also
    /// makes the effective cursor `Click`.
    #[must_use]
    pub fn recognizer(mut self, recognizer: TapRecognizer) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    #[must_use]
    pub fn hover(mut self, hover: HoverHandlers) -> Self {
        self.hover = hover;
        self
    }

    /// Pin the cursor shape, overriding the recognizer-based default.
    #[must_use]
    pub fn cursor(mut self, cursor: MouseCursor) -> Self {
        self.explicit_cursor = Some(cursor);
        self
    }

    /// Host shaping hint (e.g. a BCP-47 tag); passthrough only.
    #[must_use]
    pub fn locale_tag(mut self, tag: impl Into<String>) -> Self {
        self.locale_tag = Some(tag.into());
        self
    }

    /// Screen-reader spell-out hint; passthrough only.
    #[must_use]
    pub fn spell_out(mut self, spell_out: bool) -> Self {
        self.spell_out = Some(spell_out);
        self
    }

    /// Append one child span.
    #[must_use]
    pub fn child(mut self, child: impl Into<MultilingualSpan<L>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a sequence of child spans, preserving order.
    #[must_use]
    pub fn children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<MultilingualSpan<L>>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn text_translations(&self) -> Option<&Translations<L>> {
        self.text.as_ref()
    }

    #[must_use]
    pub fn label_translations(&self) -> Option<&Translations<L>> {
        self.semantics_label.as_ref()
    }

    #[must_use]
    pub fn span_style(&self) -> Style {
        self.style
    }

    #[must_use]
    pub fn tap_recognizer(&self) -> Option<&TapRecognizer> {
        self.recognizer.as_ref()
    }

    #[must_use]
    pub fn hover_handlers(&self) -> &HoverHandlers {
        &self.hover
    }

    /// The effective cursor: explicit wins, else `Click` when a
    /// recognizer is present, else `Defer`.
    #[must_use]
    pub fn effective_cursor(&self) -> MouseCursor {
        self.explicit_cursor.unwrap_or(if self.recognizer.is_some() {
            MouseCursor::Click
        } else {
            MouseCursor::Defer
        })
    }

    #[must_use]
    pub fn locale_hint(&self) -> Option<&str> {
        self.locale_tag.as_deref()
    }

    #[must_use]
    pub fn spell_out_hint(&self) -> Option<bool> {
        self.spell_out
    }

    #[must_use]
    pub fn child_spans(&self) -> &[MultilingualSpan<L>] {
        &self.children
    }
}

/// An embedded host widget inside a span tree. Carries no language
/// dependency; lowering passes it through unchanged.
#[derive(Clone)]
pub struct WidgetSpan {
    child: WidgetHandle,
    alignment: InlineAlignment,
    baseline: Option<TextBaseline>,
    style: Style,
}

impl WidgetSpan {
    /// Embed a host widget.
    #[must_use]
    pub fn new(child: impl Any) -> Self {
        Self::from_handle(Rc::new(child))
    }

    /// Embed an already shared host widget handle.
    #[must_use]
    pub fn from_handle(child: WidgetHandle) -> Self {
        Self {
            child,
            alignment: InlineAlignment::default(),
            baseline: None,
            style: Style::new(),
        }
    }

    #[must_use]
    pub fn alignment(mut self, alignment: InlineAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = Some(baseline);
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The embedded widget, untouched by this layer.
    #[must_use]
    pub fn widget(&self) -> &WidgetHandle {
        &self.child
    }

    #[must_use]
    pub fn inline_alignment(&self) -> InlineAlignment {
        self.alignment
    }

    #[must_use]
    pub fn baseline_kind(&self) -> Option<TextBaseline> {
        self.baseline
    }

    #[must_use]
    pub fn span_style(&self) -> Style {
        self.style
    }
}

impl fmt::Debug for WidgetSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetSpan")
            .field("alignment", &self.alignment)
            .field("baseline", &self.baseline)
            .field("style", &self.style)
            .finish_non_exhaustive()
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

    fn hello() -> Translations<Lang> {
        Translations::new()
            .with(Lang::German, "Hallo")
            .with(Lang::English, "Hello")
    }

    #[test]
    fn cursor_defaults_to_defer() {
        let span = TextSpan::new(hello());
        assert_eq!(span.effective_cursor(), MouseCursor::Defer);
    }

    #[test]
    fn recognizer_defaults_cursor_to_click() {
        let span = TextSpan::new(hello()).recognizer(TapRecognizer::new(|| {}));
        assert_eq!(span.effective_cursor(), MouseCursor::Click);
    }

    #[test]
    fn explicit_cursor_wins_over_recognizer_default() {
        let span = TextSpan::new(hello())
            .recognizer(TapRecognizer::new(|| {}))
            .cursor(MouseCursor::Text);
        assert_eq!(span.effective_cursor(), MouseCursor::Text);

        let no_recognizer = TextSpan::new(hello()).cursor(MouseCursor::Click);
        assert_eq!(no_recognizer.effective_cursor(), MouseCursor::Click);
    }

    #[test]
    fn container_span_has_no_text() {
        let span: TextSpan<Lang> = TextSpan::container();
        assert!(span.text_translations().is_none());
        assert!(span.child_spans().is_empty());
    }

    #[test]
    fn children_preserve_order() {
        let span = TextSpan::container()
            .child(TextSpan::new(hello()))
            .child(WidgetSpan::new("divider"))
            .children(vec![TextSpan::new(hello()), TextSpan::container()]);
        assert_eq!(span.child_spans().len(), 4);
        assert!(matches!(span.child_spans()[0], MultilingualSpan::Text(_)));
        assert!(matches!(span.child_spans()[1], MultilingualSpan::Widget(_)));
    }

    #[test]
    fn widget_span_keeps_handle_identity() {
        let handle: WidgetHandle = Rc::new(42u32);
        let span = WidgetSpan::from_handle(Rc::clone(&handle));
        assert!(Rc::ptr_eq(span.widget(), &handle));
        assert_eq!(span.widget().downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    fn widget_span_passthrough_fields() {
        let span = WidgetSpan::new(())
            .alignment(InlineAlignment::Middle)
            .baseline(TextBaseline::Ideographic)
            .style(Style::new().bold());
        assert_eq!(span.inline_alignment(), InlineAlignment::Middle);
        assert_eq!(span.baseline_kind(), Some(TextBaseline::Ideographic));
        assert!(span.span_style().has_attr(crate::style::StyleFlags::BOLD));
    }
}
