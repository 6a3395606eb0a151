#![forbid(unsafe_code)]

//! Interaction passthrough types.
//!
//! Spans may carry a tap recognizer and hover handlers. This layer never
//! fires them from input — it only carries them through lowering so the
//! host's hit-testing can. The helpers that invoke the callbacks exist
//! for hosts and tests.

use std::fmt;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// A tap/click recognizer attached to a text span.
#[derive(Clone)]
pub struct TapRecognizer {
    on_tap: Callback,
}

impl TapRecognizer {
    #[must_use]
    pub fn new(on_tap: impl Fn() + 'static) -> Self {
        Self {
            on_tap: Rc::new(on_tap),
        }
    }

    /// Invoke the recognizer; called by the host on a hit.
    pub fn tap(&self) {
        (self.on_tap)();
    }
}

impl fmt::Debug for TapRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapRecognizer").finish_non_exhaustive()
    }
}

/// Hover enter/exit handlers attached to a text span.
#[derive(Clone, Default)]
pub struct HoverHandlers {
    on_enter: Option<Callback>,
    on_exit: Option<Callback>,
}

impl HoverHandlers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_enter(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_enter = Some(Rc::new(callback));
        self
    }

    #[must_use]
    pub fn on_exit(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_exit = Some(Rc::new(callback));
        self
    }

    /// Whether neither handler is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.on_enter.is_none() && self.on_exit.is_none()
    }

    /// Invoke the enter handler, if any; called by the host.
    pub fn fire_enter(&self) {
        if let Some(callback) = &self.on_enter {
            callback();
        }
    }

    /// Invoke the exit handler, if any; called by the host.
    pub fn fire_exit(&self) {
        if let Some(callback) = &self.on_exit {
            callback();
        }
    }
}

impl fmt::Debug for HoverHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoverHandlers")
            .field("on_enter", &self.on_enter.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn tap_invokes_callback() {
        let hits = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&hits);
        let recognizer = TapRecognizer::new(move || counter.set(counter.get() + 1));

        recognizer.tap();
        recognizer.clone().tap();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn hover_fires_matching_handler() {
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));
        let enter_log = Rc::clone(&log);
        let exit_log = Rc::clone(&log);
        let hover = HoverHandlers::new()
            .on_enter(move || enter_log.borrow_mut().push("enter"))
            .on_exit(move || exit_log.borrow_mut().push("exit"));

        assert!(!hover.is_empty());
        hover.fire_enter();
        hover.fire_exit();
        assert_eq!(*log.borrow(), vec!["enter", "exit"]);
    }

    #[test]
    fn empty_handlers_are_inert() {
        let hover = HoverHandlers::new();
        assert!(hover.is_empty());
        hover.fire_enter();
        hover.fire_exit();
    }
}
