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

//! Traps receive the errors a logger cannot return to its caller.

use std::fmt;

use crate::Error;

mod default;

pub use self::default::DefaultTrap;

/// A sink for non-fatal errors.
///
/// Loggers deliver warning-class errors here, such as [`RootMustNotPropagate`] and
/// [`MissingTracebackContext`]. The `log` crate bridge also reports handler failures here.
///
/// [`RootMustNotPropagate`]: crate::ErrorKind::RootMustNotPropagate
/// [`MissingTracebackContext`]: crate::ErrorKind::MissingTracebackContext
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Handle an error.
    fn trap(&self, err: &Error);
}
