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

use std::fmt;
use std::io;
use std::io::Write;
use std::sync::Mutex;
use std::sync::PoisonError;

use jiff::tz::TimeZone;

use crate::Error;
use crate::Level;
use crate::LogEvent;
use crate::Logger;
use crate::RawLevel;
use crate::color::LevelColor;
use crate::format::optional_format;
use crate::handler::Handler;
use crate::time::render_timestamp;

/// The template a [`StreamHandler`] renders events with unless configured otherwise.
pub const DEFAULT_FORMAT: &str = "[{name} {level} {time} line: {line}] {indentation}{message}";

/// A handler that writes formatted events to a stream.
///
/// The template may use the keys `name`, `level`, `time`, `line`, `indentation` and `message`.
/// Unknown keys are left as they are. If the event carries an error, its chain is rendered on
/// the following lines. Every event ends with a newline.
///
/// The stream is never opened or closed by the handler.
///
/// # Examples
///
/// ```
/// use logtree::handler::StreamHandler;
///
/// let handler = StreamHandler::stderr()
///     .with_format("{level}: {message}")
///     .with_colors(false);
/// ```
pub struct StreamHandler {
    writer: Mutex<Box<dyn Write + Send>>,
    format: String,
    flush: bool,
    use_colors: bool,
    format_message: bool,
    level_width: usize,
    colors: LevelColor,
    tz: TimeZone,
}

impl StreamHandler {
    /// Create a handler writing to the given stream.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            format: DEFAULT_FORMAT.to_string(),
            flush: true,
            use_colors: true,
            format_message: true,
            level_width: 8,
            colors: LevelColor::default(),
            tz: TimeZone::system(),
        }
    }

    /// Create a handler writing to standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Set the template. Default to [`DEFAULT_FORMAT`].
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Whether to flush the stream after each event. Default to `true`.
    pub fn with_flush(mut self, flush: bool) -> Self {
        self.flush = flush;
        self
    }

    /// Whether to color level labels. Default to `true`.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Whether to render the template at all. When off, the bare message is written.
    pub fn with_format_message(mut self, format_message: bool) -> Self {
        self.format_message = format_message;
        self
    }

    /// The width level labels are left-justified to. Default to `8`.
    pub fn with_level_width(mut self, width: usize) -> Self {
        self.level_width = width;
        self
    }

    /// Set the level color table.
    pub fn with_level_color(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// The time zone timestamps are rendered in. Default to the system time zone.
    pub fn with_timezone(mut self, tz: TimeZone) -> Self {
        self.tz = tz;
        self
    }

    /// Render a level label: padded to the label width, then colored if enabled.
    ///
    /// Custom integer levels render as their number. Anything else renders as given.
    pub fn level_to_str(&self, level: &RawLevel) -> String {
        let severity = Level::normalize_or_int(level.clone()).ok();
        let label = match (&severity, level) {
            (Some(severity), _) => severity.to_string(),
            (None, RawLevel::Text(text)) => text.clone(),
            (None, raw) => raw.to_string(),
        };
        let label = format!("{label:<width$}", width = self.level_width);
        self.colors
            .colorize_label(!self.use_colors, severity, &label)
    }

    /// Render the event with the template, without the error chain or the trailing newline.
    pub fn format_line(&self, logger: &Logger, event: &LogEvent) -> Result<String, Error> {
        let name = logger.name();
        let level = self.level_to_str(event.level());
        let time = render_timestamp(event.timestamp(), &self.tz)?;
        let line = format!("{:05}", event.source_hint());
        let indentation = "  ".repeat(event.indentation());

        Ok(optional_format(
            &self.format,
            &[
                ("name", &name),
                ("level", &level),
                ("time", &time),
                ("line", &line),
                ("indentation", &indentation),
                ("message", event.message()),
            ],
        ))
    }

    /// Render the full output for the event.
    pub fn format_message(&self, logger: &Logger, event: &LogEvent) -> Result<String, Error> {
        let mut output = if self.format_message {
            self.format_line(logger, event)?
        } else {
            event.message().to_string()
        };

        if let Some(exception) = event.exception() {
            output.push('\n');
            output.push_str(&format!("{exception:?}"));
        }
        output.push('\n');
        Ok(output)
    }
}

impl Handler for StreamHandler {
    fn handle(&self, logger: &Logger, event: &LogEvent) -> Result<(), Error> {
        let output = self.format_message(logger, event)?;

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer
            .write_all(output.as_bytes())
            .map_err(Error::from_io_error)?;
        if self.flush {
            writer.flush().map_err(Error::from_io_error)?;
        }
        Ok(())
    }
}

impl fmt::Debug for StreamHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandler")
            .field("format", &self.format)
            .field("flush", &self.flush)
            .field("use_colors", &self.use_colors)
            .field("format_message", &self.format_message)
            .field("level_width", &self.level_width)
            .field("tz", &self.tz)
            .finish_non_exhaustive()
    }
}
