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

use std::io;
use std::sync::Arc;
use std::sync::Mutex;

use logtree::Error;
use logtree::ErrorKind;
use logtree::Handler;
use logtree::InheritPolicy;
use logtree::Level;
use logtree::LogEvent;
use logtree::Logger;
use logtree::RawLevel;
use logtree::Trap;

#[derive(Debug)]
struct Failing;

impl Handler for Failing {
    fn handle(&self, _logger: &Logger, _event: &LogEvent) -> Result<(), Error> {
        let err = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        Err(Error::from_io_error(err))
    }
}

#[derive(Debug, Clone, Default)]
struct CaptureTrap(Arc<Mutex<Vec<String>>>);

impl Trap for CaptureTrap {
    fn trap(&self, err: &Error) {
        self.0.lock().unwrap().push(format!("{:?} {err}", err.kind()));
    }
}

#[test]
fn test_log_crate_bridge() {
    let trap = CaptureTrap::default();
    let logger = logtree::root().create_child("bridge", &InheritPolicy::none());
    logger.set_handlers(vec![]);
    logger.set_trap(trap.clone());
    logger.set_threshold(Level::Info).unwrap();

    logtree::bridge::try_setup_log_crate(&logger).unwrap();
    assert!(logtree::bridge::try_setup_log_crate(&logger).is_err());

    log::info!("hello {}", "bridge");
    log::debug!("dropped");
    log::warn!("careful");
    assert!(log::log_enabled!(log::Level::Error));
    assert!(!log::log_enabled!(log::Level::Debug));

    let events = logger.history().events();
    let messages = events.iter().map(|e| e.message()).collect::<Vec<_>>();
    assert_eq!(messages, ["hello bridge", "careful"]);
    assert_eq!(events[0].level(), &RawLevel::Level(Level::Info));
    assert_eq!(events[1].level(), &RawLevel::Level(Level::Warning));
    assert!(events[0].source_hint() > 0);

    // trace sits below debug
    logger.set_threshold(5).unwrap();
    log::trace!("fine grained");
    let event = logger.history().last().unwrap();
    assert_eq!(event.message(), "fine grained");
    assert_eq!(event.level(), &RawLevel::Int(5));

    // handler failures go to the trap
    logger.set_handlers(vec![Arc::new(Failing)]);
    log::error!(target: "storage", "write failed");
    let trapped = trap.0.lock().unwrap().clone();
    assert_eq!(trapped.len(), 1);
    assert!(trapped[0].starts_with(&format!("{:?}", ErrorKind::Io)));
    assert!(trapped[0].contains("storage"));
}
