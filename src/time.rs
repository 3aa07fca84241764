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

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Error;
use crate::ErrorKind;

/// Render seconds since the Unix epoch as `YYYY-MM-DD HH:MM:SS[.ffffff]+HH:MM`.
///
/// The fractional part is omitted when the timestamp falls on a whole second.
pub(crate) fn render_timestamp(seconds: f64, tz: &TimeZone) -> Result<String, Error> {
    let nanos = (seconds * 1e9).round() as i128;
    let timestamp = Timestamp::from_nanosecond(nanos).map_err(|err| {
        Error::new(ErrorKind::Unexpected, "failed to convert event timestamp")
            .with_context("seconds", seconds)
            .with_source(err)
    })?;

    let zoned = timestamp.to_zoned(tz.clone());
    let rendered = if timestamp.subsec_nanosecond() == 0 {
        zoned.strftime("%Y-%m-%d %H:%M:%S%:z").to_string()
    } else {
        zoned.strftime("%Y-%m-%d %H:%M:%S.%6f%:z").to_string()
    };
    Ok(rendered)
}
