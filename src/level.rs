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

//! Severity levels and their coercion rules.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::str::FromStr;

use crate::Error;
use crate::ErrorKind;

/// The threshold a logger starts with when it does not inherit one.
pub const DEFAULT_THRESHOLD: Level = Level::Warning;

/// An enum representing the available verbosity levels of the logger.
///
/// From least to most severe:
///
/// - `Debug` (10)
/// - `Info` (20)
/// - `Warning` (30)
/// - `Error` (40)
/// - `Critical` (50)
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Level {
    /// Designates lower priority information.
    Debug = 10,
    /// Designates useful information.
    Info = 20,
    /// Designates hazardous situations.
    Warning = 30,
    /// Designates very serious errors.
    Error = 40,
    /// Designates errors the application cannot recover from.
    Critical = 50,
}

impl Level {
    /// All levels, from least to most severe.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// The canonical upper-case name of this level.
    pub const fn name(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// The numeric value of this level.
    pub const fn value(&self) -> i64 {
        *self as u8 as i64
    }

    /// Normalize a level-like value to a known [`Level`].
    ///
    /// Accepts a [`Level`], an integer equal to a level value, a decimal string equal to a level
    /// value, or a level name (case-insensitive, `warn` and `fatal` included).
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::InvalidLevel`] error naming the input if nothing matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use logtree::Level;
    ///
    /// assert_eq!(Level::normalize("wArNiNg").unwrap(), Level::Warning);
    /// assert_eq!(Level::normalize(40).unwrap(), Level::Error);
    /// assert!(Level::normalize(35).is_err());
    /// ```
    pub fn normalize(value: impl Into<RawLevel>) -> Result<Level, Error> {
        let raw = value.into();
        match &raw {
            RawLevel::Level(level) => Some(*level),
            RawLevel::Int(n) => Level::from_value(*n),
            RawLevel::Text(s) => match parse_int(s) {
                Some(n) => Level::from_value(n),
                None => Level::from_name(s),
            },
        }
        .ok_or_else(|| invalid_level(&raw))
    }

    /// Normalize a level-like value, falling back to a raw integer for custom levels.
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::InvalidLevel`] error if the value is neither a known level nor an
    /// integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use logtree::Level;
    /// use logtree::Severity;
    ///
    /// assert_eq!(Level::normalize_or_int("10").unwrap(), Severity::Known(Level::Debug));
    /// assert_eq!(Level::normalize_or_int("35").unwrap(), Severity::Custom(35));
    /// assert!(Level::normalize_or_int("foobar").is_err());
    /// ```
    pub fn normalize_or_int(value: impl Into<RawLevel>) -> Result<Severity, Error> {
        let raw = value.into();
        let severity = match &raw {
            RawLevel::Level(level) => Severity::Known(*level),
            RawLevel::Int(n) => Severity::from_value(*n),
            RawLevel::Text(s) => match parse_int(s) {
                Some(n) => Severity::from_value(n),
                None => match Level::from_name(s) {
                    Some(level) => Severity::Known(level),
                    None => return Err(invalid_level(&raw)),
                },
            },
        };
        Ok(severity)
    }

    fn from_value(value: i64) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.value() == value)
    }

    fn from_name(name: &str) -> Option<Level> {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warning" | "warn" => Some(Level::Warning),
            "error" => Some(Level::Error),
            "critical" | "fatal" => Some(Level::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::normalize(s)
    }
}

impl TryFrom<i64> for Level {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Error> {
        Level::normalize(value)
    }
}

fn parse_int(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

fn invalid_level(raw: &RawLevel) -> Error {
    Error::new(ErrorKind::InvalidLevel, format!("invalid level: {raw}"))
}

/// A level as given by a caller, before normalization.
///
/// Events keep the level they were created with; it is only normalized when a logger decides
/// whether to record the event.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RawLevel {
    /// An already typed level.
    Level(Level),
    /// A numeric level, known or custom.
    Int(i64),
    /// A level name or a decimal number.
    Text(String),
}

impl fmt::Display for RawLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawLevel::Level(level) => write!(f, "{}", level.name()),
            RawLevel::Int(n) => write!(f, "{n}"),
            RawLevel::Text(s) => write!(f, "'{s}'"),
        }
    }
}

impl From<Level> for RawLevel {
    fn from(level: Level) -> Self {
        RawLevel::Level(level)
    }
}

impl From<Severity> for RawLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Known(level) => RawLevel::Level(level),
            Severity::Custom(n) => RawLevel::Int(n),
        }
    }
}

impl From<&str> for RawLevel {
    fn from(s: &str) -> Self {
        RawLevel::Text(s.to_owned())
    }
}

impl From<String> for RawLevel {
    fn from(s: String) -> Self {
        RawLevel::Text(s)
    }
}

macro_rules! impl_raw_level_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RawLevel {
                fn from(n: $t) -> Self {
                    RawLevel::Int(n as i64)
                }
            }
        )*
    };
}

impl_raw_level_from_int!(i8, i16, i32, i64, u8, u16, u32);

// values beyond `i64::MAX` saturate, so they stay above every predefined level
macro_rules! impl_raw_level_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RawLevel {
                fn from(n: $t) -> Self {
                    RawLevel::Int(i64::try_from(n).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

impl_raw_level_from_wide_int!(u64, usize);

/// A normalized severity: either a known [`Level`] or a custom integer.
///
/// Severities compare by their numeric value.
#[derive(Copy, Clone, Debug)]
pub enum Severity {
    /// One of the predefined levels.
    Known(Level),
    /// A custom level outside the predefined set.
    Custom(i64),
}

impl Severity {
    fn from_value(value: i64) -> Severity {
        match Level::from_value(value) {
            Some(level) => Severity::Known(level),
            None => Severity::Custom(value),
        }
    }

    /// The numeric value of this severity.
    pub fn value(&self) -> i64 {
        match self {
            Severity::Known(level) => level.value(),
            Severity::Custom(n) => *n,
        }
    }

    /// The known level, if this severity is one.
    pub fn level(&self) -> Option<Level> {
        match self {
            Severity::Known(level) => Some(*level),
            Severity::Custom(_) => None,
        }
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        Severity::Known(level)
    }
}

impl PartialEq for Severity {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for Severity {}

impl Hash for Severity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl PartialEq<Level> for Severity {
    fn eq(&self, other: &Level) -> bool {
        self.value() == other.value()
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Known(level) => f.pad(level.name()),
            Severity::Custom(n) => f.pad(&n.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        for a in Level::ALL {
            for b in Level::ALL {
                assert_eq!(
                    Level::normalize(a).unwrap() < Level::normalize(b).unwrap(),
                    a.value() < b.value()
                );
            }
        }
    }

    #[test]
    fn test_coercion_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::normalize(level.name()).unwrap(), level);
            assert_eq!(Level::normalize(level.value()).unwrap(), level);
            assert_eq!(Level::normalize(level).unwrap(), level);
            assert_eq!(Level::normalize(level.name().to_lowercase()).unwrap(), level);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Level::normalize("warn").unwrap(), Level::Warning);
        assert_eq!(Level::normalize("WARN").unwrap(), Level::Warning);
        assert_eq!(Level::normalize("fatal").unwrap(), Level::Critical);
        assert_eq!(Level::normalize("FATAL").unwrap(), Level::Critical);
        // alias matching is exact
        assert!(Level::normalize("warnin").is_err());
        assert!(Level::normalize("fatality").is_err());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(Level::normalize(20).unwrap(), Level::Info);
        assert_eq!(Level::normalize(50).unwrap(), Level::Critical);
        assert_eq!(Level::normalize("40").unwrap(), Level::Error);
        assert_eq!(Level::normalize("10").unwrap(), Level::Debug);
        assert_eq!(Level::normalize("eRROR").unwrap(), Level::Error);

        let err = Level::normalize(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLevel);
        assert_eq!(err.message(), "invalid level: 0");
        assert_eq!(Level::normalize(51).unwrap_err().message(), "invalid level: 51");
        assert_eq!(Level::normalize("0").unwrap_err().message(), "invalid level: '0'");
        assert_eq!(Level::normalize("35").unwrap_err().message(), "invalid level: '35'");
        assert_eq!(
            Level::normalize("foobar").unwrap_err().message(),
            "invalid level: 'foobar'"
        );
    }

    #[test]
    fn test_normalize_or_int() {
        assert_eq!(Level::normalize_or_int(20).unwrap(), Level::Info);
        assert_eq!(Level::normalize_or_int(50).unwrap(), Level::Critical);
        assert_eq!(Level::normalize_or_int(0).unwrap(), Severity::Custom(0));
        assert_eq!(Level::normalize_or_int(51).unwrap(), Severity::Custom(51));
        assert_eq!(Level::normalize_or_int("40").unwrap(), Level::Error);
        assert_eq!(Level::normalize_or_int("35").unwrap(), Severity::Custom(35));
        assert_eq!(Level::normalize_or_int("wArNIng").unwrap(), Level::Warning);

        let err = Level::normalize_or_int("foobar").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLevel);
        assert_eq!(err.message(), "invalid level: 'foobar'");
    }

    #[test]
    fn test_try_from_int() {
        assert_eq!(Level::try_from(30_i64).unwrap(), Level::Warning);
        assert_eq!(Level::try_from(50_i64).unwrap(), Level::Critical);
        let err = Level::try_from(35_i64).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLevel);
        assert_eq!(err.message(), "invalid level: 35");
    }

    #[test]
    fn test_wide_integers() {
        assert_eq!(Level::normalize(40_usize).unwrap(), Level::Error);
        assert_eq!(Level::normalize(10_u64).unwrap(), Level::Debug);
        assert_eq!(RawLevel::from(u64::MAX), RawLevel::Int(i64::MAX));
        assert_eq!(
            Level::normalize_or_int(u64::MAX).unwrap(),
            Severity::Custom(i64::MAX)
        );
        assert!(Level::normalize(usize::MAX).is_err());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Custom(29) < Severity::Known(Level::Warning));
        assert!(Severity::Custom(31) > Severity::Known(Level::Warning));
        assert_eq!(Severity::Custom(30), Severity::Known(Level::Warning));
        assert_eq!(Severity::Custom(69).to_string(), "69");
        assert_eq!(format!("{:<8}|", Severity::Known(Level::Info)), "INFO    |");
    }
}
