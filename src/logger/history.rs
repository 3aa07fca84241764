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
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::LogEvent;

/// The append-only sequence of events a logger has recorded.
///
/// Cloning a `History` yields another handle to the same sequence. This is how a child logger
/// shares its history with its parent when inheriting it.
#[derive(Clone, Default)]
pub struct History {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl History {
    /// Create a new, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn push(&self, event: LogEvent) {
        self.lock().push(event);
    }

    /// The number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no event has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// A snapshot of the recorded events, oldest first.
    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    /// The most recently recorded event.
    pub fn last(&self) -> Option<LogEvent> {
        self.lock().last().cloned()
    }

    /// Whether both handles refer to the same sequence.
    pub fn is_shared_with(&self, other: &History) -> bool {
        Arc::ptr_eq(&self.events, &other.events)
    }
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_log_event;

    #[test]
    fn test_shared_handles() {
        let history = History::new();
        let shared = history.clone();
        assert!(history.is_shared_with(&shared));
        assert!(!history.is_shared_with(&History::new()));

        shared.push(create_log_event("first", 10, 0, 0, None));
        shared.push(create_log_event("second", 20, 0, 0, None));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().message(), "second");

        let messages = history
            .events()
            .iter()
            .map(|e| e.message().to_string())
            .collect::<Vec<_>>();
        assert_eq!(messages, ["first", "second"]);
    }
}
