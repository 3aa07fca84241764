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

/// Which attributes a child copies from its parent.
///
/// Inheritance is a one-time copy at the moment it is applied, not a live link. The history is
/// the exception: an inherited history is shared, so parent and child append to the same
/// sequence.
///
/// Attributes not inherited take a fixed default:
///
/// | attribute     | default                        |
/// |---------------|--------------------------------|
/// | `name`        | the child's own name           |
/// | `propagate`   | `false`                        |
/// | `history`     | a fresh, empty history         |
/// | `indentation` | `0`                            |
/// | `enabled`     | `true`                         |
/// | `threshold`   | [`DEFAULT_THRESHOLD`]          |
/// | `handlers`    | [`default_handlers`]           |
///
/// The default policy inherits only `threshold` and `handlers`, so siblings agree on what gets
/// logged while keeping their own logging state.
///
/// [`DEFAULT_THRESHOLD`]: crate::DEFAULT_THRESHOLD
/// [`default_handlers`]: crate::handler::default_handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InheritPolicy {
    /// Take the parent's name instead of the requested one.
    pub name: bool,
    /// Copy the parent's `propagate` flag.
    pub propagate: bool,
    /// Share the parent's history.
    pub history: bool,
    /// Copy the parent's current indentation.
    pub indentation: bool,
    /// Copy the parent's `enabled` flag.
    pub enabled: bool,
    /// Copy the parent's threshold.
    pub threshold: bool,
    /// Copy the parent's handlers.
    pub handlers: bool,
}

impl Default for InheritPolicy {
    fn default() -> Self {
        Self {
            name: false,
            propagate: false,
            history: false,
            indentation: false,
            enabled: false,
            threshold: true,
            handlers: true,
        }
    }
}

impl InheritPolicy {
    /// A policy that copies every attribute.
    pub const fn all() -> Self {
        Self {
            name: true,
            propagate: true,
            history: true,
            indentation: true,
            enabled: true,
            threshold: true,
            handlers: true,
        }
    }

    /// A policy that copies nothing.
    pub const fn none() -> Self {
        Self {
            name: false,
            propagate: false,
            history: false,
            indentation: false,
            enabled: false,
            threshold: false,
            handlers: false,
        }
    }
}
