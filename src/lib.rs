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

//! Logtree provides hierarchical, leveled loggers.
//!
//! # Overview
//!
//! Loggers form a tree under a single process-wide [root]. Each logger has a threshold, an
//! ordered list of [handlers](handler::Handler) and a history of the events it recorded. A child
//! copies what its [`InheritPolicy`] says from its parent when it is created, and may forward
//! every event it sees to its parent when `propagate` is set.
//!
//! Warnings the caller cannot act on, such as a root logger configured to propagate, are sent to
//! the logger's [trap](trap::Trap) instead of being returned.
//!
//! # Examples
//!
//! Log through a child of the root:
//!
//! ```
//! use logtree::Level;
//!
//! let logger = logtree::root().get_child("app");
//! logger.set_threshold(Level::Info).unwrap();
//!
//! logger.info("started").unwrap();
//! {
//!     let _indent = logger.indent();
//!     logger.info("loading configuration").unwrap();
//! }
//! logger.debug("not recorded").unwrap();
//!
//! assert_eq!(logger.history().len(), 2);
//! ```
//!
//! Configure a logger explicitly, with a custom template:
//!
//! ```
//! use logtree::InheritPolicy;
//! use logtree::Level;
//! use logtree::Logger;
//! use logtree::handler::StreamHandler;
//!
//! let parent = logtree::root().get_child("service");
//! let worker = Logger::builder("worker")
//!     .parent(&parent)
//!     .handler(StreamHandler::stderr().with_format("{level}: {message}"))
//!     .threshold(Level::Debug)
//!     .build()
//!     .unwrap();
//! worker.debug("polling").unwrap();
//!
//! let sibling = parent.create_child("sibling", &InheritPolicy::all());
//! assert_eq!(sibling.name(), "service");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(feature = "bridge-log")]
pub mod bridge;
pub mod color;
pub mod handler;
pub mod scope;
pub mod trap;

mod env;
mod error;
mod event;
mod format;
mod level;
mod logger;
mod time;

pub use self::env::DEFAULT_THRESHOLD_ENV;
pub use self::env::EnvThresholds;
pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::event::LogEvent;
pub use self::event::create_log_event;
pub use self::format::optional_format;
pub use self::handler::Handler;
pub use self::level::DEFAULT_THRESHOLD;
pub use self::level::Level;
pub use self::level::RawLevel;
pub use self::level::Severity;
pub use self::logger::Comparison;
pub use self::logger::History;
pub use self::logger::InheritPolicy;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;
pub use self::logger::LoggerId;
pub use self::logger::ROOT_NAME;
pub use self::logger::root;
pub use self::trap::Trap;
