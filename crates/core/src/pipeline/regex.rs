//! Regular expressions used by pipeline elements
//!
//! Patterns are compiled on first use and the outcome is cached, including a
//! failed compilation: an element with a broken pattern stays broken and is
//! reported as disabled instead of being recompiled for every path.
//!
//! Replacement templates use the ECMAScript `String.prototype.replace`
//! syntax that stored pipelines are written in, not the `regex` crate's own
//! `$name` syntax.

use once_cell::sync::OnceCell;
use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A pattern plus its case sensitivity, compiled lazily and thread-safely
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegexSpec {
    pub pattern: String,
    #[serde(default)]
    pub ignore_case: bool,
    #[serde(skip)]
    compiled: OnceCell<Option<Regex>>,
}

impl RegexSpec {
    pub fn new(pattern: impl Into<String>, ignore_case: bool) -> Self {
        Self {
            pattern: pattern.into(),
            ignore_case,
            compiled: OnceCell::new(),
        }
    }

    /// The compiled expression, or `None` if the pattern does not compile
    pub fn compiled(&self) -> Option<&Regex> {
        self.compiled
            .get_or_init(|| {
                match RegexBuilder::new(&self.pattern)
                    .case_insensitive(self.ignore_case)
                    .build()
                {
                    Ok(regex) => Some(regex),
                    Err(e) => {
                        warn!("Disabling invalid regex {:?}: {}", self.pattern, e);
                        None
                    }
                }
            })
            .as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.compiled().is_some()
    }
}

impl PartialEq for RegexSpec {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.ignore_case == other.ignore_case
    }
}

impl Eq for RegexSpec {}

/// Replace every match of `regex` in `haystack`, expanding `template` for
/// each match.
pub fn replace_all(regex: &Regex, haystack: &str, template: &str) -> String {
    let mut result = String::with_capacity(haystack.len());
    let mut last_end = 0;
    for caps in regex.captures_iter(haystack) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        result.push_str(&haystack[last_end..whole.start()]);
        expand_template(&caps, haystack, template, &mut result);
        last_end = whole.end();
    }
    result.push_str(&haystack[last_end..]);
    result
}

/// Append the expansion of an ECMAScript replacement template to `out`.
///
/// Supported tokens: `$$`, `$&` (whole match), `` $` `` (text before the
/// match), `$'` (text after the match), `$n` and `$nn` (capture groups, `$0`
/// being the whole match). A group reference past the last group is copied
/// literally; a group that did not participate expands to nothing.
pub fn expand_template(caps: &Captures<'_>, haystack: &str, template: &str, out: &mut String) {
    let Some(whole) = caps.get(0) else {
        return;
    };
    let group_count = caps.len();
    let bytes = template.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' || i + 1 >= bytes.len() {
            i += 1;
            continue;
        }

        let (expansion, consumed): (Option<&str>, usize) = match bytes[i + 1] {
            b'$' => (Some("$"), 2),
            b'&' => (Some(whole.as_str()), 2),
            b'`' => (Some(&haystack[..whole.start()]), 2),
            b'\'' => (Some(&haystack[whole.end()..]), 2),
            d if d.is_ascii_digit() => {
                let one = usize::from(d - b'0');
                let two = bytes
                    .get(i + 2)
                    .filter(|c| c.is_ascii_digit())
                    .map(|c| one * 10 + usize::from(c - b'0'));
                match two {
                    Some(n) if n < group_count => {
                        (Some(caps.get(n).map_or("", |m| m.as_str())), 3)
                    }
                    _ if one < group_count => {
                        (Some(caps.get(one).map_or("", |m| m.as_str())), 2)
                    }
                    _ => (None, 2),
                }
            }
            _ => (None, 1),
        };

        match expansion {
            Some(text) => {
                out.push_str(&template[literal_start..i]);
                out.push_str(text);
                i += consumed;
                literal_start = i;
            }
            None => i += consumed,
        }
    }
    out.push_str(&template[literal_start..]);
}
