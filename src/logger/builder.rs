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

use std::sync::Arc;

use super::Comparison;
use super::History;
use super::Logger;
use super::singleton::install_root;
use crate::DEFAULT_THRESHOLD;
use crate::EnvThresholds;
use crate::Error;
use crate::Handler;
use crate::Level;
use crate::RawLevel;
use crate::Severity;
use crate::Trap;
use crate::handler::default_handlers;
use crate::trap::DefaultTrap;

/// A builder for configuring a [`Logger`] explicitly.
///
/// Unlike [`Logger::create_child`], the builder applies no inheritance: every attribute not set
/// on the builder takes its default, except the trap and the comparison mode which follow the
/// parent when there is one.
///
/// A builder without a parent builds the root logger. This only succeeds once per process.
///
/// ## Examples
///
/// ```
/// use logtree::Level;
/// use logtree::Logger;
/// use logtree::handler::NoHandler;
///
/// let logger = Logger::builder("worker")
///     .parent(logtree::root())
///     .handler(NoHandler::default())
///     .threshold(Level::Debug)
///     .propagate(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.parent(), Some(logtree::root()));
/// assert!(logger.propagate());
/// ```
#[must_use = "call `build` to create the logger"]
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    parent: Option<Logger>,
    handlers: Option<Vec<Arc<dyn Handler>>>,
    history: Option<History>,
    propagate: bool,
    indentation: usize,
    enabled: bool,
    threshold: Option<RawLevel>,
    comparison: Option<Comparison>,
    trap: Option<Arc<dyn Trap>>,
}

impl LoggerBuilder {
    pub(super) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            handlers: None,
            history: None,
            propagate: false,
            indentation: 0,
            enabled: true,
            threshold: None,
            comparison: None,
            trap: None,
        }
    }

    /// Set the parent. Without one, [`build`](Self::build) creates the root logger.
    pub fn parent(mut self, parent: &Logger) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Add a handler. Once any handler is added, the default handlers are not used.
    pub fn handler(mut self, handler: impl Handler) -> Self {
        self.handlers
            .get_or_insert_with(Vec::new)
            .push(Arc::new(handler));
        self
    }

    /// Replace the handlers. An empty list is allowed and discards every event.
    pub fn handlers(mut self, handlers: Vec<Arc<dyn Handler>>) -> Self {
        self.handlers = Some(handlers);
        self
    }

    /// Record into the given history, possibly shared with another logger.
    pub fn history(mut self, history: History) -> Self {
        self.history = Some(history);
        self
    }

    /// Whether events are forwarded to the parent. Default to `false`.
    pub fn propagate(mut self, propagate: bool) -> Self {
        self.propagate = propagate;
        self
    }

    /// The starting indentation. Default to `0`.
    pub fn indentation(mut self, indentation: usize) -> Self {
        self.indentation = indentation;
        self
    }

    /// Whether the logger is enabled. Default to `true`.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// The threshold. Default to [`DEFAULT_THRESHOLD`]. Custom integer levels are accepted.
    pub fn threshold(mut self, threshold: impl Into<RawLevel>) -> Self {
        self.threshold = Some(threshold.into());
        self
    }

    /// Take the threshold from environment directives matching the logger name, if any.
    ///
    /// ```
    /// use logtree::EnvThresholds;
    /// use logtree::Level;
    /// use logtree::Logger;
    ///
    /// let env = EnvThresholds::parse("warn,db=debug");
    /// let db = Logger::builder("db")
    ///     .parent(logtree::root())
    ///     .env_thresholds(&env)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(db.threshold(), Level::Debug);
    /// ```
    pub fn env_thresholds(mut self, env: &EnvThresholds) -> Self {
        if let Some(threshold) = env.threshold_for(&self.name) {
            self.threshold = Some(threshold.into());
        }
        self
    }

    /// How the logger compares for equality. Default to the parent's mode, or
    /// [`Comparison::Identity`] for the root.
    pub fn comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = Some(comparison);
        self
    }

    /// The sink for warnings. Default to the parent's trap, or [`DefaultTrap`] for the root.
    pub fn trap(mut self, trap: impl Trap) -> Self {
        self.trap = Some(Arc::new(trap));
        self
    }

    /// Build the logger.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidLevel`] error if the threshold cannot be normalized, or a
    /// [`RootAlreadyExists`] error if no parent is set and the root logger already exists.
    ///
    /// [`InvalidLevel`]: crate::ErrorKind::InvalidLevel
    /// [`RootAlreadyExists`]: crate::ErrorKind::RootAlreadyExists
    pub fn build(self) -> Result<Logger, Error> {
        let threshold = match &self.threshold {
            Some(raw) => Level::normalize_or_int(raw.clone())?,
            None => Severity::Known(DEFAULT_THRESHOLD),
        };

        if self.parent.is_some() {
            return Ok(self.assemble(threshold));
        }
        install_root(move || self.assemble(threshold))
    }

    /// Build a parentless logger without going through the root gate.
    pub(super) fn build_unparented(self) -> Logger {
        debug_assert!(self.parent.is_none());
        let threshold = Severity::Known(DEFAULT_THRESHOLD);
        self.assemble(threshold)
    }

    fn assemble(self, threshold: Severity) -> Logger {
        let comparison = self
            .comparison
            .or_else(|| self.parent.as_ref().map(Logger::comparison))
            .unwrap_or_default();
        let trap = self
            .trap
            .or_else(|| self.parent.as_ref().map(Logger::trap))
            .unwrap_or_else(|| Arc::new(DefaultTrap::default()));

        let logger = Logger::from_parts(self.name, self.parent, comparison, trap);
        {
            let mut state = logger.state();
            state.handlers = self.handlers.unwrap_or_else(default_handlers);
            state.history = self.history.unwrap_or_default();
            state.propagate = self.propagate;
            state.indentation = self.indentation;
            state.enabled = self.enabled;
            state.threshold = threshold;
        }
        logger
    }
}
