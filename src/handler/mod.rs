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

//! Dispatch recorded events to their final destination.

use std::fmt;
use std::sync::Arc;

use crate::Error;
use crate::LogEvent;
use crate::Logger;

mod stream;

pub use self::stream::DEFAULT_FORMAT;
pub use self::stream::StreamHandler;

/// A destination for recorded events.
///
/// Handlers must not mutate events. They may read the state of the logger the event is
/// dispatched from, such as its name.
pub trait Handler: fmt::Debug + Send + Sync + 'static {
    /// Dispatch an event.
    ///
    /// An error aborts the dispatch to the remaining handlers and is returned from
    /// [`Logger::log`].
    fn handle(&self, logger: &Logger, event: &LogEvent) -> Result<(), Error>;
}

/// A handler that discards every event.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct NoHandler {}

impl Handler for NoHandler {
    fn handle(&self, _logger: &Logger, _event: &LogEvent) -> Result<(), Error> {
        Ok(())
    }
}

/// The handlers a logger gets when none are given: one [`StreamHandler`] on standard error.
pub fn default_handlers() -> Vec<Arc<dyn Handler>> {
    vec![Arc::new(StreamHandler::stderr())]
}
