//! Recording UI for tests.
//!
//! ```
//! use pyensure::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Scanning");
//! ui.error("Failed to install numpy");
//!
//! assert!(ui.has_message("Scanning"));
//! assert!(ui.has_error("numpy"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// One call made on a [`MockUI`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Message(String),
    Success(String),
    Warning(String),
    Error(String),
    Detail(String),
    KeyValue(String, String),
    Data(String),
    Header(String),
    SpinnerStarted(String),
}

/// `UserInterface` that records every call in order, regardless of mode.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    events: Vec<UiEvent>,
    spinner_results: Rc<RefCell<Vec<(bool, String)>>>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `mode` from `output_mode()`.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Everything recorded so far.
    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    fn texts(&self, pick: impl Fn(&UiEvent) -> Option<&String>) -> Vec<String> {
        self.events.iter().filter_map(pick).cloned().collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Message(m) => Some(m),
            _ => None,
        })
    }

    pub fn successes(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Success(m) => Some(m),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Warning(m) => Some(m),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Error(m) => Some(m),
            _ => None,
        })
    }

    pub fn details(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Detail(m) => Some(m),
            _ => None,
        })
    }

    /// Lines printed through `data`.
    pub fn data_lines(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Data(m) => Some(m),
            _ => None,
        })
    }

    /// Messages spinners were started with.
    pub fn spinners(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::SpinnerStarted(m) => Some(m),
            _ => None,
        })
    }

    pub fn pairs(&self) -> Vec<(String, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::KeyValue(k, v) => Some((k.clone(), v.clone())),
                _ => None,
            })
            .collect()
    }

    /// How spinners finished, as `(succeeded, message)`.
    pub fn spinner_results(&self) -> Vec<(bool, String)> {
        self.spinner_results.borrow().clone()
    }

    pub fn has_message(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }

    pub fn has_success(&self, needle: &str) -> bool {
        self.successes().iter().any(|m| m.contains(needle))
    }

    pub fn has_warning(&self, needle: &str) -> bool {
        self.warnings().iter().any(|m| m.contains(needle))
    }

    pub fn has_error(&self, needle: &str) -> bool {
        self.errors().iter().any(|m| m.contains(needle))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.events.push(UiEvent::Message(msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.events.push(UiEvent::Success(msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.events.push(UiEvent::Warning(msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.events.push(UiEvent::Error(msg.to_string()));
    }

    fn detail(&mut self, msg: &str) {
        self.events.push(UiEvent::Detail(msg.to_string()));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.events
            .push(UiEvent::KeyValue(key.to_string(), value.to_string()));
    }

    fn data(&mut self, text: &str) {
        self.events.push(UiEvent::Data(text.to_string()));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.events
            .push(UiEvent::SpinnerStarted(message.to_string()));
        Box::new(MockSpinner {
            results: self.spinner_results.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.events.push(UiEvent::Header(title.to_string()));
    }
}

/// Spinner handed out by [`MockUI`]; reports how it finished back to the UI.
#[derive(Debug)]
pub struct MockSpinner {
    results: Rc<RefCell<Vec<(bool, String)>>>,
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.results.borrow_mut().push((true, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.results.borrow_mut().push((false, msg.to_string()));
    }
}
