#![forbid(unsafe_code)]

//! Language switcher demo.
//!
//! Renders a small multilingual screen onto a plain stdout host, then
//! walks through the available languages via the published state's
//! mutation entry point. Every frame after the first is painted by the
//! scope subscription, exactly as a host frame loop would do it.

use std::cell::RefCell;
use std::rc::Rc;

use ltui::prelude::*;
use ltui::{PlainSpan, TextAlign, TextOptions, lookup};
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Lang {
    German,
    English,
    French,
}

struct LangInfo {
    key: Lang,
    native: &'static str,
}

const LANGUAGES: &[LangInfo] = &[
    LangInfo {
        key: Lang::German,
        native: "Deutsch",
    },
    LangInfo {
        key: Lang::English,
        native: "English",
    },
    LangInfo {
        key: Lang::French,
        native: "Fran\u{e7}ais",
    },
];

const SCREEN_WIDTH: usize = 44;

fn title() -> Translations<Lang> {
    Translations::new()
        .with(Lang::German, "Sprachumschalter")
        .with(Lang::English, "Language Switcher")
        .with(Lang::French, "S\u{e9}lecteur de langue")
}

fn greeting() -> Translations<Lang> {
    Translations::new()
        .with(Lang::German, "Guten Tag")
        .with(Lang::English, "Hello")
        .with(Lang::French, "Bonjour")
}

fn hint() -> Translations<Lang> {
    // Deliberately missing French: falls back to the default language.
    Translations::new()
        .with(Lang::German, "Die Auswahl gilt sofort.")
        .with(Lang::English, "The selection applies immediately.")
}

/// Width-aware stdout host: resolved text in, aligned lines out.
struct StdoutHost;

impl StdoutHost {
    fn print_aligned(&self, text: &str, align: TextAlign) {
        let width = text.width();
        let padding = SCREEN_WIDTH.saturating_sub(width);
        let line = match align {
            TextAlign::Left => format!("{text}{}", " ".repeat(padding)),
            TextAlign::Right => format!("{}{text}", " ".repeat(padding)),
            TextAlign::Center => {
                let left = padding / 2;
                format!(
                    "{}{text}{}",
                    " ".repeat(left),
                    " ".repeat(padding - left)
                )
            }
        };
        println!("| {line} |");
    }
}

impl TextHost for StdoutHost {
    fn draw_text(&mut self, text: &str, options: &TextOptions) {
        self.print_aligned(text, options.align);
    }

    fn draw_spans(&mut self, root: &PlainSpan, options: &TextOptions) {
        self.print_aligned(&root.to_plain_text(), options.align);
    }
}

struct Screen {
    title: MultilingualText<Lang>,
    body: MultilingualRichText<Lang>,
    hint: MultilingualText<Lang>,
}

impl Screen {
    fn new() -> Self {
        let name = Translations::new()
            .with(Lang::German, ", Welt!")
            .with(Lang::English, ", world!")
            .with(Lang::French, ", le monde !");
        Self {
            title: MultilingualText::new(title()).align(TextAlign::Center),
            body: MultilingualRichText::new(
                TextSpan::container()
                    .child(TextSpan::new(greeting()).style(Style::new().bold()))
                    .child(TextSpan::new(name)),
            ),
            hint: MultilingualText::new(hint()).align(TextAlign::Right),
        }
    }

    fn paint(&self, state: &LanguageState<Lang>, host: &mut StdoutHost) {
        let native = LANGUAGES
            .iter()
            .find(|info| Some(&info.key) == state.selected_language())
            .map_or("?", |info| info.native);

        println!("+{}+", "-".repeat(SCREEN_WIDTH + 2));
        self.title.render_with(state, host);
        self.body.render_with(state, host);
        self.hint.render_with(state, host);
        host.print_aligned(&format!("[{native}]"), TextAlign::Left);
        println!("+{}+", "-".repeat(SCREEN_WIDTH + 2));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let scope = LanguageScope::new(Lang::German);
    let _guard = scope.enter();

    let screen = Rc::new(Screen::new());
    let host = Rc::new(RefCell::new(StdoutHost));

    // First frame, painted directly.
    screen.paint(&scope.state(), &mut host.borrow_mut());

    // Every further frame comes from the rebroadcast.
    let repaint_screen = Rc::clone(&screen);
    let repaint_host = Rc::clone(&host);
    let _sub = scope.subscribe(move |state| {
        repaint_screen.paint(state, &mut repaint_host.borrow_mut());
    });

    for info in LANGUAGES {
        // The same entry point an embedded language menu would use.
        lookup::<Lang>().select(info.key);
    }
}
