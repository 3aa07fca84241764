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

//! Color utilities.

use colored::Color;
use colored::ColoredString;
use colored::Colorize;

use crate::Level;
use crate::Severity;

/// The terminal style of one level label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelStyle {
    /// Foreground color.
    pub foreground: Color,
    /// Background color, if any.
    pub background: Option<Color>,
    /// Render in bold.
    pub bold: bool,
    /// Render underlined.
    pub underline: bool,
    /// Render blinking.
    pub blink: bool,
}

impl LevelStyle {
    /// A style with only a foreground color.
    pub const fn foreground(color: Color) -> Self {
        Self {
            foreground: color,
            background: None,
            bold: false,
            underline: false,
            blink: false,
        }
    }

    fn apply(&self, label: &str) -> ColoredString {
        let mut styled = label.color(self.foreground);
        if let Some(background) = self.background {
            styled = styled.on_color(background);
        }
        if self.bold {
            styled = styled.bold();
        }
        if self.underline {
            styled = styled.underline();
        }
        if self.blink {
            styled = styled.blink();
        }
        styled
    }
}

/// Styles for different log levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelColor {
    /// Style for debug level labels.
    pub debug: LevelStyle,
    /// Style for info level labels.
    pub info: LevelStyle,
    /// Style for warning level labels.
    pub warning: LevelStyle,
    /// Style for error level labels.
    pub error: LevelStyle,
    /// Style for critical level labels.
    pub critical: LevelStyle,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            debug: LevelStyle::foreground(Color::Blue),
            info: LevelStyle::foreground(Color::Cyan),
            warning: LevelStyle::foreground(Color::Yellow),
            error: LevelStyle::foreground(Color::Red),
            critical: LevelStyle {
                foreground: Color::Red,
                background: Some(Color::Yellow),
                bold: true,
                underline: true,
                blink: true,
            },
        }
    }
}

impl LevelColor {
    /// Return the style of a known level.
    pub fn style(&self, level: Level) -> &LevelStyle {
        match level {
            Level::Debug => &self.debug,
            Level::Info => &self.info,
            Level::Warning => &self.warning,
            Level::Error => &self.error,
            Level::Critical => &self.critical,
        }
    }

    /// Colorize an already padded label. Custom severities are left uncolored.
    pub fn colorize_label(
        &self,
        no_color: bool,
        severity: Option<Severity>,
        label: &str,
    ) -> String {
        match severity.and_then(|s| s.level()) {
            Some(level) if !no_color => self.style(level).apply(label).to_string(),
            _ => label.to_string(),
        }
    }
}
