//! Path transformation pipelines
//!
//! A [`Pipeline`] is an ordered list of [`PipelineElement`]s applied to one
//! path at a time. Each run threads the path and a fresh [`ValueStack`]
//! through every element in order; a separate pass collects the global
//! [`PipelineOptions`].
//!
//! Validation is strict and returns errors; running a pipeline never fails.
//! An element that cannot do its job leaves the path as it found it.

pub mod element;
pub mod host;
pub mod plugins;
pub mod regex;
pub mod stack;
pub mod text;
pub mod validation;

pub use element::PipelineElement;
pub use host::DRIVE_LABEL_MARKER;
pub use self::regex::RegexSpec;
pub use stack::{PopDestination, PushSource};
pub use validation::ValidationContext;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;
use crate::interfaces::{Context, PluginProvider};
use crate::types::{PipelineOptions, ValueStack};

/// Ordered, immutable sequence of elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline {
    elements: Vec<PipelineElement>,
}

impl Pipeline {
    pub fn new(elements: Vec<PipelineElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[PipelineElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Validate every element in order, sharing `visited` so that nested
    /// command references can detect cycles.
    pub fn validate(
        &self,
        plugins: Option<&dyn PluginProvider>,
        visited: &mut ValidationContext,
    ) -> Result<()> {
        debug!("Validating pipeline of {} elements", self.elements.len());
        for element in &self.elements {
            element.validate(plugins, visited)?;
        }
        Ok(())
    }

    /// Run the pipeline on `path` in place, using the real OS services
    pub fn modify_path(&self, path: &mut String, plugins: Option<&dyn PluginProvider>) {
        self.modify_path_in(path, &Context::new(plugins));
    }

    /// Run the pipeline on `path` in place with explicit collaborators
    pub fn modify_path_in(&self, path: &mut String, ctx: &Context<'_>) {
        let mut stack = ValueStack::new();
        for element in &self.elements {
            element.modify_path_with_stack(path, &mut stack, ctx);
            trace!("After {}: {}", element.kind(), path);
        }
        if !stack.is_empty() {
            trace!("{} values left on the stack", stack.len());
        }
    }

    /// Convenience wrapper returning the transformed copy of `path`
    pub fn apply(&self, path: &str, ctx: &Context<'_>) -> String {
        let mut result = path.to_string();
        self.modify_path_in(&mut result, ctx);
        result
    }

    pub fn modify_options(&self, options: &mut PipelineOptions) {
        for element in &self.elements {
            element.modify_options(options);
        }
    }

    /// Options produced by this pipeline starting from the defaults
    pub fn options(&self) -> PipelineOptions {
        let mut options = PipelineOptions::default();
        self.modify_options(&mut options);
        options
    }

    /// True only if every element is enabled for `file` in `parent_path`
    pub fn should_be_enabled_for(
        &self,
        parent_path: &str,
        file: &str,
        plugins: Option<&dyn PluginProvider>,
    ) -> bool {
        self.should_be_enabled_in(parent_path, file, &Context::new(plugins))
    }

    /// Same as [`Pipeline::should_be_enabled_for`] with explicit collaborators
    pub fn should_be_enabled_in(&self, parent_path: &str, file: &str, ctx: &Context<'_>) -> bool {
        self.elements
            .iter()
            .all(|element| element.should_be_enabled_for(parent_path, file, ctx))
    }
}

impl From<Vec<PipelineElement>> for Pipeline {
    fn from(elements: Vec<PipelineElement>) -> Self {
        Self::new(elements)
    }
}

impl FromIterator<PipelineElement> for Pipeline {
    fn from_iter<I: IntoIterator<Item = PipelineElement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::host::tests::FakeSystem;

    fn run(pipeline: &Pipeline, input: &str) -> String {
        let system = FakeSystem::default();
        pipeline.apply(input, &Context::new(None).with_system(&system))
    }

    #[test]
    fn test_elements_see_previous_results() {
        let insert_then_match = Pipeline::new(vec![
            PipelineElement::find_replace("tmp", "cache"),
            PipelineElement::regex("cache", "CACHE", false),
        ]);
        let match_then_insert = Pipeline::new(vec![
            PipelineElement::regex("cache", "CACHE", false),
            PipelineElement::find_replace("tmp", "cache"),
        ]);
        assert_eq!(run(&insert_then_match, "/tmp/x"), "/CACHE/x");
        assert_eq!(run(&match_then_insert, "/tmp/x"), "/cache/x");
    }

    #[test]
    fn test_independent_elements_commute() {
        let a = PipelineElement::BackToForwardSlashes;
        let b = PipelineElement::find_replace("Bob", "Alice");
        let ab = Pipeline::new(vec![a.clone(), b.clone()]);
        let ba = Pipeline::new(vec![b, a]);
        assert_eq!(run(&ab, r"C:\Users\Bob"), run(&ba, r"C:\Users\Bob"));
    }

    #[test]
    fn test_stack_is_fresh_per_path() {
        let pipeline = Pipeline::new(vec![
            PipelineElement::pop(PopDestination::Append),
            PipelineElement::push(PushSource::EntirePath),
        ]);
        assert_eq!(run(&pipeline, "first"), "first");
        assert_eq!(run(&pipeline, "second"), "second");
    }

    #[test]
    fn test_push_fixed_then_pop_entire() {
        let pipeline = Pipeline::new(vec![
            PipelineElement::push(PushSource::Fixed { value: "X".into() }),
            PipelineElement::pop(PopDestination::EntirePath),
        ]);
        assert_eq!(run(&pipeline, "P"), "X");
    }

    #[test]
    fn test_swap_and_duplicate() {
        let pipeline = Pipeline::new(vec![
            PipelineElement::push(PushSource::Fixed { value: "a".into() }),
            PipelineElement::push(PushSource::Fixed { value: "b".into() }),
            PipelineElement::SwapStackValues,
            PipelineElement::pop(PopDestination::Append),
            PipelineElement::DuplicateStackValue,
            PipelineElement::pop(PopDestination::Prepend),
            PipelineElement::pop(PopDestination::Prepend),
        ]);
        // After swap the top is "a"; "b" is then duplicated and prepended twice
        assert_eq!(run(&pipeline, "-"), "bb-a");
    }

    #[test]
    fn test_options_last_writer_wins() {
        let pipeline = Pipeline::new(vec![
            PipelineElement::PathsSeparator {
                separator: ",".into(),
            },
            PipelineElement::RecursiveCopy,
            PipelineElement::PathsSeparator {
                separator: ";".into(),
            },
        ]);
        let options = pipeline.options();
        assert_eq!(options.paths_separator, ";");
        assert!(options.copy_paths_recursively);
    }

    #[test]
    fn test_setter_applied_twice_is_stable() {
        let pipeline = Pipeline::new(vec![PipelineElement::PathsSeparator {
            separator: ",".into(),
        }]);
        let mut options = PipelineOptions::default();
        pipeline.modify_options(&mut options);
        let once = options.clone();
        pipeline.modify_options(&mut options);
        assert_eq!(options, once);
    }

    #[test]
    fn test_recursive_flag_is_monotonic() {
        let mut options = PipelineOptions::default();
        Pipeline::new(vec![PipelineElement::RecursiveCopy]).modify_options(&mut options);
        Pipeline::new(vec![PipelineElement::PathsSeparator {
            separator: " ".into(),
        }])
        .modify_options(&mut options);
        assert!(options.copy_paths_recursively);
    }

    #[test]
    fn test_enabled_requires_all_elements() {
        let pipeline = Pipeline::new(vec![
            PipelineElement::Quotes,
            PipelineElement::regex("[", "", false),
        ]);
        assert!(!pipeline.should_be_enabled_for("/", "f", None));
        assert!(Pipeline::new(vec![PipelineElement::Quotes]).should_be_enabled_for("/", "f", None));
    }

    #[test]
    fn test_shared_pipeline_compiles_regex_once_across_threads() {
        let pipeline = Pipeline::new(vec![
            PipelineElement::regex(r"^([A-Z]):\\", "/mnt/$1/", false),
            PipelineElement::BackToForwardSlashes,
        ]);
        let broken = Pipeline::new(vec![PipelineElement::regex("(", "x", false)]);

        let results: Vec<(String, bool, bool)> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (
                            run(&pipeline, r"C:\data\file"),
                            pipeline.should_be_enabled_for("/", "f", None),
                            broken.should_be_enabled_for("/", "f", None),
                        )
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (path, enabled, broken_enabled) in results {
            assert_eq!(path, "/mnt/C/data/file");
            assert!(enabled);
            assert!(!broken_enabled);
        }
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let pipeline = Pipeline::new(vec![PipelineElement::Quotes, PipelineElement::RecursiveCopy]);
        insta::assert_snapshot!(
            serde_json::to_string(&pipeline).unwrap(),
            @r#"[{"type":"quotes"},{"type":"recursive_copy"}]"#
        );
    }
}
