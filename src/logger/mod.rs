// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The logger tree.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use crate::DEFAULT_THRESHOLD;
use crate::EnvThresholds;
use crate::Error;
use crate::ErrorKind;
use crate::Handler;
use crate::Level;
use crate::LogEvent;
use crate::RawLevel;
use crate::Severity;
use crate::Trap;
use crate::create_log_event;
use crate::handler::default_handlers;

mod builder;
mod history;
mod inherit;
mod singleton;


pub use self::builder::LoggerBuilder;
pub use self::history::History;
pub use self::inherit::InheritPolicy;
pub use self::singleton::ROOT_NAME;
pub use self::singleton::root;

/// A unique token identifying one logger node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoggerId(u64);

impl LoggerId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        LoggerId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// How two loggers compare for equality.
///
/// Equality never looks at configuration. By default it compares identity tokens; two loggers
/// that both use [`Comparison::ByName`] are equal when their names are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Comparison {
    /// Compare identity tokens.
    #[default]
    Identity,
    /// Compare names.
    ByName,
}

type EventFilter = dyn Fn(&LogEvent) -> bool + Send + Sync;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) name: String,
    pub(crate) propagate: bool,
    pub(crate) enabled: bool,
    pub(crate) threshold: Severity,
    pub(crate) handlers: Vec<Arc<dyn Handler>>,
    pub(crate) history: History,
    pub(crate) indentation: usize,
    pub(crate) trap: Arc<dyn Trap>,
    filter: Option<Arc<EventFilter>>,
}

struct Node {
    id: LoggerId,
    parent: Option<Logger>,
    comparison: Comparison,
    state: Mutex<State>,
}

/// A node in the logger tree.
///
/// `Logger` is a cheap handle: clones refer to the same node. Every node except the
/// [root](root) has exactly one parent, fixed at creation. Parents do not keep track of their
/// children.
///
/// Configuration is plain shared state. Each node guards it with its own lock, which is never
/// held while handlers run, so handlers may read the logger they are called with.
///
/// # Examples
///
/// ```
/// use logtree::Level;
///
/// let db = logtree::root().get_child("db");
/// db.set_threshold(Level::Info).unwrap();
/// db.set_handlers(vec![]);
///
/// db.info("connected").unwrap();
/// db.debug("handshake done").unwrap();
///
/// let history = db.history();
/// assert_eq!(history.len(), 1);
/// assert_eq!(history.last().unwrap().message(), "connected");
/// ```
#[derive(Clone)]
pub struct Logger {
    node: Arc<Node>,
}

impl Logger {
    /// Create a new [`LoggerBuilder`].
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    /// Create the root logger with default settings.
    ///
    /// # Errors
    ///
    /// Return a [`RootAlreadyExists`](ErrorKind::RootAlreadyExists) error if the root logger has
    /// already been created, explicitly or through [`root`].
    pub fn create_root() -> Result<Logger, Error> {
        Logger::builder(ROOT_NAME).build()
    }

    fn from_parts(
        name: String,
        parent: Option<Logger>,
        comparison: Comparison,
        trap: Arc<dyn Trap>,
    ) -> Logger {
        let state = State {
            name,
            propagate: false,
            enabled: true,
            threshold: Severity::Known(DEFAULT_THRESHOLD),
            handlers: vec![],
            history: History::new(),
            indentation: 0,
            trap,
            filter: None,
        };

        Logger {
            node: Arc::new(Node {
                id: LoggerId::next(),
                parent,
                comparison,
                state: Mutex::new(state),
            }),
        }
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, State> {
        self.node
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a child of this logger, applying the given inheritance policy.
    ///
    /// The child's trap and comparison mode always follow this logger.
    pub fn create_child(&self, name: impl Into<String>, policy: &InheritPolicy) -> Logger {
        let child = Logger::from_parts(
            name.into(),
            Some(self.clone()),
            self.comparison(),
            self.trap(),
        );
        let parent = self.state().clone();
        child.inherit_from(&parent, policy);
        child
    }

    /// Create a child of this logger with the default inheritance policy.
    pub fn get_child(&self, name: impl Into<String>) -> Logger {
        self.create_child(name, &InheritPolicy::default())
    }

    /// Re-apply an inheritance policy from this logger's parent.
    ///
    /// # Errors
    ///
    /// Return a [`CannotInheritWithoutParent`](ErrorKind::CannotInheritWithoutParent) error on
    /// the root logger.
    pub fn inherit(&self, policy: &InheritPolicy) -> Result<(), Error> {
        let parent = self.parent().ok_or_else(|| {
            Error::new(
                ErrorKind::CannotInheritWithoutParent,
                "cannot inherit if parent is None",
            )
            .with_context("logger", self.name())
        })?;
        let parent = parent.state().clone();
        self.inherit_from(&parent, policy);
        Ok(())
    }

    fn inherit_from(&self, parent: &State, policy: &InheritPolicy) {
        let mut state = self.state();
        if policy.name {
            state.name = parent.name.clone();
        }
        state.propagate = policy.propagate && parent.propagate;
        state.history = if policy.history {
            parent.history.clone()
        } else {
            History::new()
        };
        state.indentation = if policy.indentation {
            parent.indentation
        } else {
            0
        };
        state.enabled = !policy.enabled || parent.enabled;
        state.threshold = if policy.threshold {
            parent.threshold
        } else {
            Severity::Known(DEFAULT_THRESHOLD)
        };
        state.handlers = if policy.handlers {
            parent.handlers.clone()
        } else {
            default_handlers()
        };
    }

    /// The unique token of this logger.
    pub fn id(&self) -> LoggerId {
        self.node.id
    }

    /// The parent, or `None` for the root logger.
    pub fn parent(&self) -> Option<&Logger> {
        self.node.parent.as_ref()
    }

    /// Whether this logger has no parent.
    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    /// How this logger compares for equality.
    pub fn comparison(&self) -> Comparison {
        self.node.comparison
    }

    /// The name of this logger.
    pub fn name(&self) -> String {
        self.state().name.clone()
    }

    /// Rename this logger. Names need not be unique.
    pub fn set_name(&self, name: impl Into<String>) {
        self.state().name = name.into();
    }

    /// Whether events are forwarded to the parent.
    pub fn propagate(&self) -> bool {
        self.state().propagate
    }

    /// Set whether events are forwarded to the parent.
    ///
    /// The root logger must not propagate; see [`log`](Self::log).
    pub fn set_propagate(&self, propagate: bool) {
        self.state().propagate = propagate;
    }

    /// Whether this logger handles events at all.
    pub fn enabled(&self) -> bool {
        self.state().enabled
    }

    /// Enable or disable this logger. A disabled logger neither records nor propagates.
    pub fn set_enabled(&self, enabled: bool) {
        self.state().enabled = enabled;
    }

    /// The lowest severity this logger records.
    pub fn threshold(&self) -> Severity {
        self.state().threshold
    }

    /// Set the threshold. Custom integer levels are accepted.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidLevel`](ErrorKind::InvalidLevel) error if the value is neither a level
    /// nor an integer.
    pub fn set_threshold(&self, threshold: impl Into<RawLevel>) -> Result<(), Error> {
        let threshold = Level::normalize_or_int(threshold)?;
        self.state().threshold = threshold;
        Ok(())
    }

    /// Set the threshold from environment directives matching this logger's name, if any.
    pub fn apply_env_thresholds(&self, env: &EnvThresholds) {
        let name = self.name();
        if let Some(threshold) = env.threshold_for(&name) {
            self.state().threshold = threshold;
        }
    }

    /// The handlers, in attachment order.
    pub fn handlers(&self) -> Vec<Arc<dyn Handler>> {
        self.state().handlers.clone()
    }

    /// Replace the handlers. An empty list discards every event after recording it.
    pub fn set_handlers(&self, handlers: Vec<Arc<dyn Handler>>) {
        self.state().handlers = handlers;
    }

    /// Attach a handler after the existing ones.
    pub fn add_handler(&self, handler: impl Handler) {
        self.state().handlers.push(Arc::new(handler));
    }

    /// A handle to this logger's history.
    pub fn history(&self) -> History {
        self.state().history.clone()
    }

    /// Record into the given history from now on.
    pub fn set_history(&self, history: History) {
        self.state().history = history;
    }

    /// The current indentation depth.
    pub fn indentation(&self) -> usize {
        self.state().indentation
    }

    /// Set the indentation directly. Prefer [`indent`](Self::indent) for scoped changes.
    pub fn set_indentation(&self, indentation: usize) {
        self.state().indentation = indentation;
    }

    /// The sink warnings are sent to.
    pub fn trap(&self) -> Arc<dyn Trap> {
        self.state().trap.clone()
    }

    /// Replace the sink warnings are sent to.
    pub fn set_trap(&self, trap: impl Trap) {
        self.state().trap = Arc::new(trap);
    }

    /// Replace the default "level at or above threshold" decision with a custom predicate.
    pub fn set_filter(&self, filter: impl Fn(&LogEvent) -> bool + Send + Sync + 'static) {
        self.state().filter = Some(Arc::new(filter));
    }

    /// Restore the default threshold decision.
    pub fn clear_filter(&self) {
        self.state().filter = None;
    }

    /// Create a [`LogEvent`]. See [`create_log_event`].
    pub fn create_log_event(
        &self,
        message: impl fmt::Display,
        level: impl Into<RawLevel>,
        indentation: usize,
        source_hint: u32,
        exception: Option<anyhow::Error>,
    ) -> LogEvent {
        create_log_event(message, level, indentation, source_hint, exception)
    }

    /// Whether this logger is enabled for the given level.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidLevel`](ErrorKind::InvalidLevel) error if the value is neither a level
    /// nor an integer.
    pub fn is_enabled_for(&self, level: impl Into<RawLevel>) -> Result<bool, Error> {
        let level = Level::normalize_or_int(level)?;
        Ok(level >= self.threshold())
    }

    /// Whether the event is dropped before any other decision.
    pub fn is_disabled(&self, _event: &LogEvent) -> bool {
        !self.enabled()
    }

    /// Whether the event is forwarded to the parent.
    pub fn should_propagate(&self, _event: &LogEvent) -> bool {
        self.propagate()
    }

    /// Whether the event passes this logger's filter, by default its threshold.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidLevel`](ErrorKind::InvalidLevel) error if the default decision is used
    /// and the event level is neither a level nor an integer.
    pub fn should_be_logged(&self, event: &LogEvent) -> Result<bool, Error> {
        let filter = self.state().filter.clone();
        match filter {
            Some(filter) => Ok(filter(event)),
            None => self.is_enabled_for(event.level().clone()),
        }
    }

    /// Append the event to the history, then dispatch it to every handler.
    ///
    /// This does not check whether the event should be logged.
    pub fn record(&self, event: &LogEvent) -> Result<(), Error> {
        self.history().push(event.clone());
        self.call_handlers(event)
    }

    /// Dispatch the event to every handler in attachment order.
    ///
    /// The first failing handler aborts the dispatch and its error is returned.
    pub fn call_handlers(&self, event: &LogEvent) -> Result<(), Error> {
        let handlers = self.handlers();
        for handler in handlers.iter() {
            handler.handle(self, event)?;
        }
        Ok(())
    }

    /// Forward the event to the parent's [`log`](Self::log).
    ///
    /// # Errors
    ///
    /// Return a [`NoParent`](ErrorKind::NoParent) error on the root logger, or whatever the
    /// parent's `log` returns.
    pub fn actually_propagate(&self, event: &LogEvent) -> Result<(), Error> {
        match self.parent() {
            Some(parent) => parent.log(event),
            None => Err(Error::new(
                ErrorKind::NoParent,
                "cannot propagate without a parent",
            )
            .with_context("logger", self.name())),
        }
    }

    /// Submit an event to this logger.
    ///
    /// The decision is made in this order:
    ///
    /// 1. A disabled logger does nothing, not even propagate.
    /// 2. A root logger with `propagate` set reports
    ///    [`RootMustNotPropagate`](ErrorKind::RootMustNotPropagate) to its trap and does nothing.
    /// 3. If [`should_be_logged`](Self::should_be_logged), the event is recorded: appended to the
    ///    history, then dispatched to the handlers.
    /// 4. If `propagate` is set, the same event is submitted to the parent.
    ///
    /// Recording and propagation are independent: an event may be recorded here and again by
    /// ancestors.
    ///
    /// # Errors
    ///
    /// Return the first handler error, here or in an ancestor, or an
    /// [`InvalidLevel`](ErrorKind::InvalidLevel) error if the event level cannot be normalized.
    pub fn log(&self, event: &LogEvent) -> Result<(), Error> {
        if self.is_disabled(event) {
            return Ok(());
        }

        let propagate = self.should_propagate(event);
        if propagate && self.is_root() {
            let err = Error::new(
                ErrorKind::RootMustNotPropagate,
                "root logger should not propagate; set enabled to false if you want to disable it",
            )
            .with_context("logger", self.name());
            self.trap().trap(&err);
            return Ok(());
        }

        if self.should_be_logged(event)? {
            self.record(event)?;
        }

        if propagate {
            self.actually_propagate(event)?;
        }

        Ok(())
    }

    /// Log a message at the given level, which may be a custom integer level.
    #[track_caller]
    pub fn log_at(
        &self,
        level: impl Into<RawLevel>,
        message: impl fmt::Display,
    ) -> Result<(), Error> {
        self.predefined_log(level, message, false, None, Location::caller())
    }

    fn predefined_log(
        &self,
        level: impl Into<RawLevel>,
        message: impl fmt::Display,
        include_exception: bool,
        exception: Option<anyhow::Error>,
        location: &Location<'_>,
    ) -> Result<(), Error> {
        if include_exception && exception.is_none() {
            let err = Error::new(
                ErrorKind::MissingTracebackContext,
                "no traceback available, but one was requested",
            )
            .with_context("logger", self.name())
            .with_context("line", location.line());
            self.trap().trap(&err);
        }

        let event = self.create_log_event(
            message,
            level,
            self.indentation(),
            location.line(),
            exception,
        );
        self.log(&event)
    }
}

macro_rules! leveled_methods {
    ($($level:ident: $plain:ident, $with_exception:ident, $doc:literal;)*) => {
        impl Logger {
            $(
                #[doc = concat!("Log a message at the ", $doc, " level.")]
                #[track_caller]
                pub fn $plain(&self, message: impl fmt::Display) -> Result<(), Error> {
                    self.predefined_log(Level::$level, message, false, None, Location::caller())
                }

                #[doc = concat!("Log a message at the ", $doc, " level with the error being handled.")]
                ///
                /// Passing `None` means an error was requested but none is available: a
                /// [`MissingTracebackContext`](ErrorKind::MissingTracebackContext) warning is
                /// sent to the trap and the event is logged without one.
                #[track_caller]
                pub fn $with_exception(
                    &self,
                    message: impl fmt::Display,
                    exception: Option<anyhow::Error>,
                ) -> Result<(), Error> {
                    self.predefined_log(Level::$level, message, true, exception, Location::caller())
                }
            )*
        }
    };
}

leveled_methods! {
    Debug: debug, debug_exc, "debug";
    Info: info, info_exc, "info";
    Warning: warning, warning_exc, "warning";
    Error: error, error_exc, "error";
    Critical: critical, critical_exc, "critical";
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.node, &other.node) {
            return true;
        }
        match (self.comparison(), other.comparison()) {
            (Comparison::ByName, Comparison::ByName) => self.name() == other.name(),
            _ => self.id() == other.id(),
        }
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Logger")
            .field("id", &self.node.id)
            .field("name", &state.name)
            .field("parent", &self.node.parent.as_ref().map(Logger::id))
            .field("propagate", &state.propagate)
            .field("enabled", &state.enabled)
            .field("threshold", &state.threshold)
            .field("indentation", &state.indentation)
            .field("handlers", &state.handlers)
            .field("history", &state.history)
            .finish()
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Logger {}>", self.name())
    }
}
