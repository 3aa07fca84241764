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

//! Scoped changes to a logger, undone when the guard is dropped.
//!
//! Guards are restored on every exit path, including unwinding.

use crate::Error;
use crate::Level;
use crate::Logger;
use crate::RawLevel;
use crate::Severity;

/// Keeps a logger indented by one extra level while alive.
#[must_use = "the indentation is undone as soon as the guard is dropped"]
#[derive(Debug)]
pub struct IndentGuard<'a> {
    logger: &'a Logger,
    depth: usize,
}

impl IndentGuard<'_> {
    /// The indentation installed by this guard.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Drop for IndentGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.logger.state();
        state.indentation = state.indentation.saturating_sub(1);
    }
}

/// Keeps a threshold installed on a logger while alive.
///
/// On drop the previous threshold is restored exactly, even if it was changed in between.
#[must_use = "the threshold is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ThresholdGuard<'a> {
    logger: &'a Logger,
    previous: Severity,
}

impl ThresholdGuard<'_> {
    /// The threshold that will be restored.
    pub fn previous(&self) -> Severity {
        self.previous
    }
}

impl Drop for ThresholdGuard<'_> {
    fn drop(&mut self) {
        self.logger.state().threshold = self.previous;
    }
}

impl Logger {
    /// Increase the indentation by one until the returned guard is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// let logger = logtree::root().get_child("indent-doc");
    /// {
    ///     let guard = logger.indent();
    ///     assert_eq!(guard.depth(), 1);
    ///     assert_eq!(logger.indentation(), 1);
    /// }
    /// assert_eq!(logger.indentation(), 0);
    /// ```
    pub fn indent(&self) -> IndentGuard<'_> {
        let mut state = self.state();
        state.indentation += 1;
        IndentGuard {
            logger: self,
            depth: state.indentation,
        }
    }

    /// Install a threshold until the returned guard is dropped.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidLevel`](crate::ErrorKind::InvalidLevel) error if the value is neither a
    /// level nor an integer. The threshold is left untouched.
    pub fn change_threshold(
        &self,
        threshold: impl Into<RawLevel>,
    ) -> Result<ThresholdGuard<'_>, Error> {
        let threshold = Level::normalize_or_int(threshold)?;
        let mut state = self.state();
        let previous = state.threshold;
        state.threshold = threshold;
        Ok(ThresholdGuard {
            logger: self,
            previous,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::panic;
    use std::panic::AssertUnwindSafe;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_nested_indent() {
        let logger = crate::root().get_child("nested");
        let outer = logger.indent();
        let inner = logger.indent();
        assert_eq!(outer.depth(), 1);
        assert_eq!(inner.depth(), 2);
        drop(inner);
        assert_eq!(logger.indentation(), 1);
        drop(outer);
        assert_eq!(logger.indentation(), 0);
    }

    #[test]
    fn test_indent_restored_on_unwind() {
        let logger = crate::root().get_child("unwind");
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = logger.indent();
            assert_eq!(logger.indentation(), 1);
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(logger.indentation(), 0);
    }

    #[test]
    fn test_threshold_restored() {
        let logger = crate::root().get_child("scoped");
        logger.set_threshold(Level::Error).unwrap();
        {
            let guard = logger.change_threshold("debug").unwrap();
            assert_eq!(guard.previous(), Level::Error);
            assert_eq!(logger.threshold(), Level::Debug);

            // the guard wins over changes made in between
            logger.set_threshold(Level::Info).unwrap();
        }
        assert_eq!(logger.threshold(), Level::Error);

        {
            let _guard = logger.change_threshold(35).unwrap();
            assert_eq!(logger.threshold(), Severity::Custom(35));
        }
        assert_eq!(logger.threshold(), Level::Error);
    }

    #[test]
    fn test_invalid_threshold() {
        let logger = crate::root().get_child("invalid");
        let err = logger.change_threshold("loud").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLevel);
        assert_eq!(logger.threshold(), crate::DEFAULT_THRESHOLD);
    }
}
