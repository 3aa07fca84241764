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

use jiff::tz::TimeZone;
use logtree::InheritPolicy;
use logtree::Level;
use logtree::handler::StreamHandler;

#[test]
fn test_file_backed_stream() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let handler = StreamHandler::new(file.reopen().unwrap())
        .with_format("{name} {level}|{indentation}{message}")
        .with_colors(false)
        .with_timezone(TimeZone::fixed(jiff::tz::offset(2)));

    let logger = logtree::root().create_child("e2e", &InheritPolicy::none());
    logger.set_handlers(vec![]);
    logger.add_handler(handler);
    logger.set_threshold(Level::Debug).unwrap();

    logger.info("start").unwrap();
    {
        let _indent = logger.indent();
        logger.debug("step").unwrap();
        logger.log_at(15, "custom").unwrap();
    }
    logger
        .error_exc("giving up", Some(anyhow::anyhow!("disk quota exceeded")))
        .unwrap();

    let contents = std::fs::read_to_string(file.path()).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("e2e INFO    |start"));
    assert_eq!(lines.next(), Some("e2e DEBUG   |  step"));
    assert_eq!(lines.next(), Some("e2e 15      |  custom"));
    assert_eq!(lines.next(), Some("e2e ERROR   |giving up"));
    assert_eq!(lines.next(), Some("disk quota exceeded"));
    assert!(contents.ends_with('\n'));
}
