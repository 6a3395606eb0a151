#![forbid(unsafe_code)]

//! The text resolvers and the host primitive they delegate to.
//!
//! [`MultilingualText`] is the leaf consumers place in their tree: flat
//! mode carries one translation mapping, rich mode carries a span tree.
//! At render time it reads the nearest published language state, resolves
//! every multilingual field, and hands plain values to the host's
//! [`TextHost`] primitive with all other fields untouched.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | No scope entered | `render` without a `LanguageScope` | Panic (programmer error) |
//! | Incomplete mapping | Selected and default keys both missing | Renders `""`, never fails |

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use ltui_lang::{LanguageKey, LanguageState, Translations};

use crate::lower::{PlainSpan, lower};
use crate::span::MultilingualSpan;
use crate::style::{Style, TextAlign, TextOverflow};

/// Opaque selection-registrar handle, passed through to the host.
pub type SelectionRegistrar = Rc<dyn Any>;

/// What a text node renders: exactly one of a flat mapping or a span
/// tree. The enum makes the exclusivity a construction-time property.
#[derive(Clone, Debug)]
pub enum TextContent<L: LanguageKey> {
    Plain(Translations<L>),
    Rich(MultilingualSpan<L>),
}

/// Resolved, host-facing options accompanying a draw call. Everything
/// here is delivered verbatim from the resolver's builder fields; only
/// `semantics_label` has been through resolution.
#[derive(Clone)]
pub struct TextOptions {
    pub style: Style,
    pub align: TextAlign,
    pub overflow: TextOverflow,
    pub max_lines: Option<u16>,
    pub soft_wrap: bool,
    pub semantics_label: Option<String>,
    pub selection: Option<SelectionRegistrar>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            style: Style::new(),
            align: TextAlign::default(),
            overflow: TextOverflow::default(),
            max_lines: None,
            soft_wrap: true,
            semantics_label: None,
            selection: None,
        }
    }
}

impl fmt::Debug for TextOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextOptions")
            .field("style", &self.style)
            .field("align", &self.align)
            .field("overflow", &self.overflow)
            .field("max_lines", &self.max_lines)
            .field("soft_wrap", &self.soft_wrap)
            .field("semantics_label", &self.semantics_label)
            .field("selection", &self.selection.is_some())
            .finish()
    }
}

/// The host's pre-existing text rendering primitive.
///
/// This layer resolves; the host renders. Implementations receive fully
/// resolved plain values and must not re-resolve anything.
pub trait TextHost {
    /// Render a flat string.
    fn draw_text(&mut self, text: &str, options: &TextOptions);

    /// Render a resolved span tree.
    fn draw_spans(&mut self, root: &PlainSpan, options: &TextOptions);
}

/// A text leaf that resolves its translation mapping at render time.
#[derive(Clone, Debug)]
pub struct MultilingualText<L: LanguageKey> {
    content: TextContent<L>,
    semantics_label: Option<Translations<L>>,
    style: Style,
    align: TextAlign,
    overflow: TextOverflow,
    max_lines: Option<u16>,
    soft_wrap: bool,
}

impl<L: LanguageKey> MultilingualText<L> {
    /// Flat mode: one translation mapping.
    #[must_use]
    pub fn new(translations: Translations<L>) -> Self {
        Self::with_content(TextContent::Plain(translations))
    }

    /// Rich mode: a span tree root.
    #[must_use]
    pub fn rich(root: impl Into<MultilingualSpan<L>>) -> Self {
        Self::with_content(TextContent::Rich(root.into()))
    }

    fn with_content(content: TextContent<L>) -> Self {
        Self {
            content,
            semantics_label: None,
            style: Style::new(),
            align: TextAlign::default(),
            overflow: TextOverflow::default(),
            max_lines: None,
            soft_wrap: true,
        }
    }

    /// Translated accessibility label for the whole node.
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

    #[must_use]
    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn overflow(mut self, overflow: TextOverflow) -> Self {
        self.overflow = overflow;
        self
    }

    #[must_use]
    pub fn max_lines(mut self, max_lines: u16) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    #[must_use]
    pub fn soft_wrap(mut self, soft_wrap: bool) -> Self {
        self.soft_wrap = soft_wrap;
        self
    }

    #[must_use]
    pub fn content(&self) -> &TextContent<L> {
        &self.content
    }

    /// Render against the nearest published language state.
    ///
    /// # Panics
    ///
    /// Panics when no scope of this key type is entered; see
    /// [`ltui_lang::lookup`].
    pub fn render(&self, host: &mut impl TextHost) {
        let state = LanguageState::<L>::lookup();
        self.render_with(&state, host);
    }

    /// Render against an explicitly threaded language state.
    pub fn render_with(&self, state: &LanguageState<L>, host: &mut impl TextHost) {
        let _span = tracing::debug_span!("widget_render", widget = "MultilingualText").entered();
        let options = self.options(state, None);
        match &self.content {
            TextContent::Plain(translations) => {
                host.draw_text(state.resolve_or_empty(translations), &options);
            }
            TextContent::Rich(root) => {
                host.draw_spans(&lower(root, state), &options);
            }
        }
    }

    fn options(&self, state: &LanguageState<L>, selection: Option<SelectionRegistrar>) -> TextOptions {
        TextOptions {
            style: self.style,
            align: self.align,
            overflow: self.overflow,
            max_lines: self.max_lines,
            soft_wrap: self.soft_wrap,
            semantics_label: self
                .semantics_label
                .as_ref()
                .map(|label| state.resolve_or_empty(label).to_owned()),
            selection,
        }
    }
}

/// The always-rich resolver, plus a selection-registrar passthrough for
/// hosts with selectable span trees.
#[derive(Clone)]
pub struct MultilingualRichText<L: LanguageKey> {
    inner: MultilingualText<L>,
    selection: Option<SelectionRegistrar>,
}

impl<L: LanguageKey> fmt::Debug for MultilingualRichText<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultilingualRichText")
            .field("inner", &self.inner)
            .field("selection", &self.selection.is_some())
            .finish()
    }
}

impl<L: LanguageKey> MultilingualRichText<L> {
    #[must_use]
    pub fn new(root: impl Into<MultilingualSpan<L>>) -> Self {
        Self {
            inner: MultilingualText::rich(root),
            selection: None,
        }
    }

    /// Opaque registrar handed to the host with every draw.
    #[must_use]
    pub fn selection_registrar(mut self, registrar: SelectionRegistrar) -> Self {
        self.selection = Some(registrar);
        self
    }

    #[must_use]
    pub fn semantics_label(mut self, label: Translations<L>) -> Self {
        self.inner = self.inner.semantics_label(label);
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.inner = self.inner.style(style);
        self
    }

    #[must_use]
    pub fn align(mut self, align: TextAlign) -> Self {
        self.inner = self.inner.align(align);
        self
    }

    #[must_use]
    pub fn overflow(mut self, overflow: TextOverflow) -> Self {
        self.inner = self.inner.overflow(overflow);
        self
    }

    #[must_use]
    pub fn max_lines(mut self, max_lines: u16) -> Self {
        self.inner = self.inner.max_lines(max_lines);
        self
    }

    /// Render against the nearest published language state.
    ///
    /// # Panics
    ///
    /// Panics when no scope of this key type is entered.
    pub fn render(&self, host: &mut impl TextHost) {
        let state = LanguageState::<L>::lookup();
        self.render_with(&state, host);
    }

    /// Render against an explicitly threaded language state.
    pub fn render_with(&self, state: &LanguageState<L>, host: &mut impl TextHost) {
        let _span =
            tracing::debug_span!("widget_render", widget = "MultilingualRichText").entered();
        let options = self.inner.options(state, self.selection.clone());
        let TextContent::Rich(root) = &self.inner.content else {
            unreachable!("MultilingualRichText only constructs rich content");
        };
        host.draw_spans(&lower(root, state), &options);
    }
}
