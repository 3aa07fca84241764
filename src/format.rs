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

/// Substitute `{key}` placeholders in `template` with the supplied values.
///
/// Placeholders without a supplied value are kept literally instead of failing. `{{` and `}}`
/// render as single braces.
///
/// # Examples
///
/// ```
/// use logtree::optional_format;
///
/// assert_eq!(
///     optional_format("Hello, {foo} world! {bar}", &[("foo", "hi")]),
///     "Hello, hi world! {bar}"
/// );
/// ```
pub fn optional_format(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
            continue;
        }

        // tail starts with '{', look for the matching '}' before any other '{'
        match tail[1..].find(['{', '}']) {
            Some(end) if tail.as_bytes()[end + 1] == b'}' => {
                let key = &tail[1..end + 1];
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&tail[..end + 2]),
                }
                rest = &tail[end + 2..];
            }
            _ => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_format() {
        assert_eq!(optional_format("Hello, world!", &[]), "Hello, world!");
        assert_eq!(optional_format("Hello, world!", &[("foo", "hi")]), "Hello, world!");
        assert_eq!(
            optional_format("Hello, world!", &[("foo", "hi"), ("bar", "bye")]),
            "Hello, world!"
        );
        assert_eq!(optional_format("Hello, {foo} world!", &[]), "Hello, {foo} world!");
        assert_eq!(
            optional_format("Hello, {foo} world!", &[("foo", "hi")]),
            "Hello, hi world!"
        );
        assert_eq!(
            optional_format("Hello, {foo} world! {bar}", &[("foo", "hi")]),
            "Hello, hi world! {bar}"
        );
        assert_eq!(
            optional_format("Hello, {foo} world! {bar}", &[("bar", "bye")]),
            "Hello, {foo} world! bye"
        );
        assert_eq!(
            optional_format("Hello, {foo} world! {bar}", &[("foo", "hi"), ("bar", "bye")]),
            "Hello, hi world! bye"
        );
    }

    #[test]
    fn test_optional_format_braces() {
        assert_eq!(optional_format("{{foo}}", &[("foo", "hi")]), "{foo}");
        assert_eq!(optional_format("a { b", &[]), "a { b");
        assert_eq!(optional_format("a } b", &[]), "a } b");
        assert_eq!(optional_format("{{{foo}", &[("foo", "hi")]), "{hi");
        assert_eq!(optional_format("{a{foo}", &[("foo", "hi")]), "{ahi");
        assert_eq!(optional_format("{foo}{foo}", &[("foo", "hi")]), "hihi");
        assert_eq!(optional_format("{}", &[]), "{}");
    }
}
