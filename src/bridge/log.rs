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

use crate::Error;
use crate::ErrorKind;
use crate::Level;
use crate::Logger;
use crate::RawLevel;
use crate::env::TRACE;

/// Forwards records of the `log` crate to a [`Logger`].
///
/// Levels map to their namesakes, with `Warn` as [`Level::Warning`]. `Trace` maps to the custom
/// level `5`, below [`Level::Debug`]. The record line becomes the source hint.
///
/// Handler failures cannot be returned through `log::Log`, so they are sent to the logger's trap.
#[derive(Debug, Clone)]
pub struct LogBridge {
    logger: Logger,
}

impl LogBridge {
    /// Create a bridge forwarding to the given logger.
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// The logger records are forwarded to.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

fn to_raw_level(level: log::Level) -> RawLevel {
    match level {
        log::Level::Error => Level::Error.into(),
        log::Level::Warn => Level::Warning.into(),
        log::Level::Info => Level::Info.into(),
        log::Level::Debug => Level::Debug.into(),
        log::Level::Trace => TRACE.into(),
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.logger.enabled()
            && self
                .logger
                .is_enabled_for(to_raw_level(metadata.level()))
                .unwrap_or(false)
    }

    fn log(&self, record: &log::Record) {
        let event = self.logger.create_log_event(
            record.args(),
            to_raw_level(record.level()),
            self.logger.indentation(),
            record.line().unwrap_or(0),
            None,
        );

        if let Err(err) = self.logger.log(&event) {
            let err = err.with_context("target", record.target());
            self.logger.trap().trap(&err);
        }
    }

    fn flush(&self) {}
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_boxed_logger`] with a [`LogBridge`], so all records from the
/// log crate are forwarded to the given logger.
///
/// This function will set the global maximum log level to `Trace`. To override this, call
/// [`log::set_max_level`] after this function.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// if let Err(err) = logtree::bridge::try_setup_log_crate(logtree::root()) {
///     eprintln!("failed to setup log crate: {err}");
/// }
/// ```
pub fn try_setup_log_crate(logger: &Logger) -> Result<(), Error> {
    log::set_boxed_logger(Box::new(LogBridge::new(logger.clone()))).map_err(|err| {
        Error::new(ErrorKind::Unexpected, "log crate global logger already set").with_source(err)
    })?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger.
///
/// See [`try_setup_log_crate`].
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
pub fn setup_log_crate(logger: &Logger) {
    try_setup_log_crate(logger).expect(
        "logtree::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}
