//! Sources and destinations of the value stack elements
//!
//! Range offsets count characters of the path as it is when the element
//! runs, after every earlier element has been applied.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::regex::RegexSpec;
use super::text::char_range;

/// What a push element puts on the stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PushSource {
    EntirePath,
    /// Characters `[begin, end)`; requires `begin < end`
    Range { begin: usize, end: usize },
    /// A capture group of the first match, empty when nothing matches
    Regex {
        regex: RegexSpec,
        #[serde(default)]
        group: usize,
    },
    Fixed { value: String },
}

impl PushSource {
    /// Value pushed for `path`. Never fails: anything that cannot be
    /// computed yields an empty string so later pops stay balanced.
    pub fn value_for(&self, path: &str) -> String {
        match self {
            PushSource::EntirePath => path.to_string(),
            PushSource::Range { begin, end } => {
                if begin >= end {
                    return String::new();
                }
                match char_range(path, *begin, *end) {
                    Some((start, stop)) if start < path.len() => path[start..stop].to_string(),
                    _ => String::new(),
                }
            }
            PushSource::Regex { regex, group } => regex
                .compiled()
                .and_then(|re| re.captures(path))
                .and_then(|caps| caps.get(*group))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            PushSource::Fixed { value } => value.clone(),
        }
    }
}

/// Where a pop element puts the value it takes off the stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PopDestination {
    EntirePath,
    /// Replace characters `[begin, end)`; an empty range inserts
    Range { begin: usize, end: usize },
    /// Replace the first match
    Regex { regex: RegexSpec },
    Prepend,
    Append,
    Discard,
}

impl PopDestination {
    pub fn apply(&self, path: &mut String, value: String) {
        match self {
            PopDestination::EntirePath => *path = value,
            PopDestination::Range { begin, end } => {
                // Unlike pushes, an empty range is accepted here
                if begin > end {
                    trace!("Pop range {}..{} is reversed, path unchanged", begin, end);
                    return;
                }
                if let Some((start, stop)) = char_range(path, *begin, *end) {
                    path.replace_range(start..stop, &value);
                }
            }
            PopDestination::Regex { regex } => {
                let Some(re) = regex.compiled() else {
                    return;
                };
                let Some(found) = re.find(path) else {
                    return;
                };
                let range = found.range();
                path.replace_range(range, &value);
            }
            PopDestination::Prepend => path.insert_str(0, &value),
            PopDestination::Append => path.push_str(&value),
            PopDestination::Discard => {}
        }
    }
}
