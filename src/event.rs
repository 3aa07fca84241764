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

//! Log events.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use crate::level::RawLevel;

/// One logging occurrence.
///
/// Events are immutable once created. The level is kept exactly as it was given; loggers
/// normalize it when they decide whether to record the event.
#[derive(Clone, Debug)]
pub struct LogEvent {
    message: String,
    level: RawLevel,
    // seconds since the unix epoch
    timestamp: f64,
    indentation: usize,
    source_hint: u32,
    exception: Option<Arc<anyhow::Error>>,
}

impl LogEvent {
    /// The message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The level, as given at creation.
    pub fn level(&self) -> &RawLevel {
        &self.level
    }

    /// The creation time, in seconds since the Unix epoch.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// The indentation depth of the creating logger at creation time.
    pub fn indentation(&self) -> usize {
        self.indentation
    }

    /// The source line the event was created from.
    pub fn source_hint(&self) -> u32 {
        self.source_hint
    }

    /// The error associated with this event, if any.
    pub fn exception(&self) -> Option<&anyhow::Error> {
        self.exception.as_deref()
    }

    /// Return a copy of this event stamped with the given time.
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Create a [`LogEvent`] stamped with the current wall-clock time.
///
/// Arguments are copied verbatim. The message is rendered to text; the level is not validated.
///
/// # Examples
///
/// ```
/// use logtree::RawLevel;
///
/// let event = logtree::create_log_event("foo, bar?", 10, 2, 63, None);
/// assert_eq!(event.message(), "foo, bar?");
/// assert_eq!(event.level(), &RawLevel::Int(10));
/// assert_eq!(event.indentation(), 2);
/// assert_eq!(event.source_hint(), 63);
/// assert!(event.exception().is_none());
/// ```
pub fn create_log_event(
    message: impl fmt::Display,
    level: impl Into<RawLevel>,
    indentation: usize,
    source_hint: u32,
    exception: Option<anyhow::Error>,
) -> LogEvent {
    let timestamp = match SystemTime::now().duration_since(SystemTime::UNIX_EPOCH) {
        Ok(dur) => dur.as_secs_f64(),
        Err(err) => -err.duration().as_secs_f64(),
    };

    LogEvent {
        message: message.to_string(),
        level: level.into(),
        timestamp,
        indentation,
        source_hint,
        exception: exception.map(Arc::new),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    #[test]
    fn test_create_log_event_keeps_raw_level() {
        let event = create_log_event("hi", "not a level", 0, 1, None);
        assert_eq!(event.level(), &RawLevel::Text("not a level".to_string()));

        let event = create_log_event(42, Level::Info, 3, 7, None);
        assert_eq!(event.message(), "42");
        assert_eq!(event.level(), &RawLevel::Level(Level::Info));
        assert_eq!(event.indentation(), 3);
        assert_eq!(event.source_hint(), 7);
    }

    #[test]
    fn test_create_log_event_stamps_time() {
        let before = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_secs_f64();
        let event = create_log_event("hi", 10, 0, 0, None);
        assert!(event.timestamp() >= before);
        assert_eq!(event.with_timestamp(0.0).timestamp(), 0.0);
    }

    #[test]
    fn test_create_log_event_with_exception() {
        let event = create_log_event("hi", 40, 0, 0, Some(anyhow::anyhow!("division by zero")));
        let exception = event.exception().unwrap();
        assert_eq!(exception.to_string(), "division by zero");

        // clones share the exception
        let cloned = event.clone();
        assert!(std::ptr::eq(
            cloned.exception().unwrap(),
            event.exception().unwrap()
        ));
    }
}
