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
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use logtree::Error;
use logtree::ErrorKind;
use logtree::Level;
use logtree::Logger;
use logtree::Trap;
use logtree::handler::StreamHandler;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
struct CaptureTrap(Arc<Mutex<Vec<ErrorKind>>>);

impl Trap for CaptureTrap {
    fn trap(&self, err: &Error) {
        self.0.lock().unwrap().push(err.kind());
    }
}

// the root is process-wide, so every check runs in this single test
#[test]
fn test_root_logger() {
    let buffer = Buffer::default();
    let trap = CaptureTrap::default();
    let root = Logger::builder(logtree::ROOT_NAME)
        .handler(StreamHandler::new(buffer.clone()).with_colors(false))
        .trap(trap.clone())
        .build()
        .unwrap();

    assert_eq!(&root, logtree::root());
    assert_eq!(root.name(), "root");
    assert!(root.is_root());
    assert!(root.parent().is_none());
    assert_eq!(root.threshold(), Level::Warning);
    assert!(!root.propagate());

    // the root is created exactly once
    let err = Logger::create_root().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RootAlreadyExists);
    let err = Logger::builder("another").build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RootAlreadyExists);

    let err = root.inherit(&logtree::InheritPolicy::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CannotInheritWithoutParent);

    root.critical("disk full").unwrap();
    root.info("below threshold").unwrap();
    let contents = buffer.contents();
    assert!(contents.starts_with("[root CRITICAL "), "{contents}");
    assert!(contents.ends_with("] disk full\n"), "{contents}");
    assert_eq!(contents.lines().count(), 1);
    assert_eq!(root.history().len(), 1);

    let event = root.history().last().unwrap();
    let err = root.actually_propagate(&event).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoParent);

    // a propagating root warns and does nothing else
    root.set_propagate(true);
    root.critical("ignored").unwrap();
    root.set_propagate(false);
    assert_eq!(*trap.0.lock().unwrap(), [ErrorKind::RootMustNotPropagate]);
    assert_eq!(root.history().len(), 1);
    assert_eq!(buffer.contents(), contents);

    // children reach the root through propagation
    let child = root.get_child("db");
    child.set_handlers(vec![]);
    child.set_propagate(true);
    child.error("lost connection").unwrap();
    assert_eq!(child.history().len(), 1);
    assert_eq!(root.history().len(), 2);
    assert!(buffer.contents().contains("[root ERROR "));
    assert!(buffer.contents().ends_with("] lost connection\n"));
}
