//! Deterministic page runtime for interactive widget pages.
//!
//! A [`Page`] parses an HTML fixture into a small DOM, wires the widgets it
//! recognises (animated box, modal, loading spinner, counters, theme toggle,
//! ...) and lets tests drive it with clicks, hovers, key presses and typed
//! text. All deferred work runs on a simulated clock that only moves when the
//! caller advances it.
//!
//! The [`AnimationController`] is usable on its own against any [`Surface`].

use std::collections::{HashMap, VecDeque};
use std::error::Error as StdError;
use std::fmt;

mod controller;
mod dom;
mod dom_utils;
mod events;
mod html;
mod page;
mod rng;
mod scheduler;
mod selector;
mod session;
mod storage;
mod trace;
pub mod widgets;


pub use controller::{AnimationController, SessionTask, Surface};
pub use dom::NodeId;
pub use events::EventKind;
pub use page::{DEFAULT_CLASS_STAGGER_MS, Page, PageConfig, WidgetIds};
pub use rng::Rng;
pub use scheduler::{PendingTimer, TimerId};
pub use session::{
    AnimationSession, BoxAnimation, ControllerTimings, LoadingPhase, ModalAnimation, SessionId,
    SessionKind, SessionStep, animation_duration,
};
pub use storage::Theme;

pub(crate) use dom::{Dom, Element};
pub(crate) use dom_utils::*;
pub(crate) use events::{Action, EventState, ListenerStore};
pub(crate) use html::{is_void_tag, parse_html};
pub(crate) use scheduler::{ScheduledTask, SchedulerState, TimerTask};
pub(crate) use selector::Selector;
pub(crate) use session::SessionStore;
pub(crate) use storage::LocalStorage;
pub(crate) use trace::TraceState;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    Timer(String),
    InvalidInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
            Self::Timer(msg) => write!(f, "timer error: {msg}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl StdError for Error {}
