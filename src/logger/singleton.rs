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

use std::sync::OnceLock;

use crate::Error;
use crate::ErrorKind;
use crate::Logger;

/// The name of the root logger when it is created implicitly.
pub const ROOT_NAME: &str = "root";

static ROOT: OnceLock<Logger> = OnceLock::new();

/// Return the process-wide root logger, creating it with default settings on first use.
///
/// To configure the root at startup, build it explicitly before anything calls this function:
///
/// ```
/// use logtree::Level;
/// use logtree::Logger;
///
/// let root = Logger::builder("app").threshold(Level::Info).build().unwrap();
/// assert_eq!(&root, logtree::root());
/// ```
pub fn root() -> &'static Logger {
    ROOT.get_or_init(|| Logger::builder(ROOT_NAME).build_unparented())
}

/// Install a parentless logger as the root. Only the first call in a process succeeds.
pub(crate) fn install_root(make: impl FnOnce() -> Logger) -> Result<Logger, Error> {
    let mut created = false;
    let root = ROOT.get_or_init(|| {
        created = true;
        make()
    });

    if created {
        Ok(root.clone())
    } else {
        Err(Error::new(
            ErrorKind::RootAlreadyExists,
            "cannot create a new logger: root logger already exists; use it, or make a child logger from it",
        )
        .with_context("root", root.name()))
    }
}
