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

//! Thresholds from [`env_filter`](https://crates.io/crates/env_filter) directives.

use std::borrow::Cow;

use log::LevelFilter;
use log::Metadata;

use crate::Level;
use crate::Severity;

/// The default environment variable for thresholds.
pub const DEFAULT_THRESHOLD_ENV: &str = "LOGTREE_LOG";

/// The severity `trace` directives map to. It sits below [`Level::Debug`].
pub(crate) const TRACE: Severity = Severity::Custom(5);

/// The severity `off` directives map to. No predefined level reaches it.
pub(crate) const OFF: Severity = Severity::Custom(i64::MAX);

/// Thresholds keyed by logger name, parsed from directives such as `warn,db=debug,db::pool=off`.
///
/// A directive `name=level` applies to every logger whose name starts with `name`; the longest
/// matching directive wins. A bare `level` applies to every other logger. Loggers matched by no
/// directive keep their threshold.
///
/// Read [the `env_logger` documentation](https://docs.rs/env_logger/#enabling-logging) for the
/// directive syntax.
///
/// # Examples
///
/// ```
/// use logtree::EnvThresholds;
/// use logtree::Level;
///
/// let env = EnvThresholds::parse("db=info");
/// assert_eq!(env.threshold_for("db"), Some(Level::Info.into()));
/// assert_eq!(env.threshold_for("http"), None);
/// ```
#[derive(Debug)]
pub struct EnvThresholds {
    // the same directives, with the fallback set to the most and the least verbose level
    permissive: env_filter::Filter,
    strict: env_filter::Filter,
}

impl EnvThresholds {
    /// Parse a directive string.
    ///
    /// Invalid directives are ignored and reported on standard error by `env_filter`.
    pub fn parse(directives: &str) -> Self {
        let build = |fallback: LevelFilter| {
            let mut builder = env_filter::Builder::new();
            builder.filter_level(fallback);
            builder.parse(directives);
            builder.build()
        };

        EnvThresholds {
            permissive: build(LevelFilter::Trace),
            strict: build(LevelFilter::Off),
        }
    }

    /// Read directives from the given environment variable, if set.
    ///
    /// ```
    /// use logtree::EnvThresholds;
    ///
    /// assert!(EnvThresholds::from_env("LOGTREE_DOC_UNSET_VARIABLE").is_none());
    /// ```
    pub fn from_env<'a, E>(name: E) -> Option<Self>
    where
        E: Into<Cow<'a, str>>,
    {
        let name = name.into();
        std::env::var(&*name).ok().map(|s| EnvThresholds::parse(&s))
    }

    /// Read directives from the given environment variable, or use `default` if it is not set.
    pub fn from_env_or<'a, 'b, E, V>(name: E, default: V) -> Self
    where
        E: Into<Cow<'a, str>>,
        V: Into<Cow<'b, str>>,
    {
        EnvThresholds::from_env(name).unwrap_or_else(|| EnvThresholds::parse(&default.into()))
    }

    /// Read directives from [`DEFAULT_THRESHOLD_ENV`], if set.
    pub fn from_default_env() -> Option<Self> {
        EnvThresholds::from_env(DEFAULT_THRESHOLD_ENV)
    }

    /// The threshold for a logger name, or `None` if no directive applies to it.
    pub fn threshold_for(&self, name: &str) -> Option<Severity> {
        match (
            most_verbose(&self.strict, name),
            most_verbose(&self.permissive, name),
        ) {
            (Some(level), _) => Some(to_severity(level)),
            // only the fallback differs between the two filters
            (None, Some(log::Level::Trace)) => None,
            (None, _) => Some(OFF),
        }
    }
}

fn most_verbose(filter: &env_filter::Filter, name: &str) -> Option<log::Level> {
    [
        log::Level::Trace,
        log::Level::Debug,
        log::Level::Info,
        log::Level::Warn,
        log::Level::Error,
    ]
    .into_iter()
    .find(|level| {
        let metadata = Metadata::builder().level(*level).target(name).build();
        filter.enabled(&metadata)
    })
}

fn to_severity(level: log::Level) -> Severity {
    match level {
        log::Level::Trace => TRACE,
        log::Level::Debug => Severity::Known(Level::Debug),
        log::Level::Info => Severity::Known(Level::Info),
        log::Level::Warn => Severity::Known(Level::Warning),
        log::Level::Error => Severity::Known(Level::Error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_directives() {
        let env = EnvThresholds::parse("warn,db=debug,db::pool=off,http=trace");
        assert_eq!(env.threshold_for("db"), Some(Level::Debug.into()));
        assert_eq!(env.threshold_for("db::query"), Some(Level::Debug.into()));
        assert_eq!(env.threshold_for("db::pool"), Some(OFF));
        assert_eq!(env.threshold_for("http"), Some(TRACE));
        assert_eq!(env.threshold_for("cache"), Some(Level::Warning.into()));
    }

    #[test]
    fn test_unmatched_names() {
        let env = EnvThresholds::parse("db=error");
        assert_eq!(env.threshold_for("db"), Some(Level::Error.into()));
        assert_eq!(env.threshold_for("cache"), None);

        let env = EnvThresholds::parse("");
        assert_eq!(env.threshold_for("anything"), None);
    }

    #[test]
    fn test_global_only() {
        let env = EnvThresholds::parse("info");
        assert_eq!(env.threshold_for("db"), Some(Level::Info.into()));
        assert_eq!(env.threshold_for("root"), Some(Level::Info.into()));
    }

    #[test]
    fn test_apply_to_logger() {
        let logger = crate::root().get_child("env-applied");
        logger.apply_env_thresholds(&EnvThresholds::parse("env-applied=info"));
        assert_eq!(logger.threshold(), Level::Info);

        logger.apply_env_thresholds(&EnvThresholds::parse("other=debug"));
        assert_eq!(logger.threshold(), Level::Info);
    }
}
