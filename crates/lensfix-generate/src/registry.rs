use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::FixtureError;
use crate::gallery;
use crate::writer::FixtureWriter;

/// Required prefix of every example entry point.
pub const ENTRY_POINT_PREFIX: &str = "generate";

/// One example definition producing one or more fixtures.
#[async_trait]
pub trait ExampleGenerator: Send + Sync {
    /// Registry key, e.g. `metric-basic`.
    fn name(&self) -> &'static str;

    /// Entry point name, e.g. `generateMetricBasic`.
    fn entry_point(&self) -> &'static str;

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError>;
}

/// Explicit set of examples, keyed and iterated by name.
#[derive(Default)]
pub struct ExampleRegistry {
    examples: BTreeMap<String, Box<dyn ExampleGenerator>>,
}

impl ExampleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in example gallery.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        gallery::register(&mut registry);
        registry
    }

    pub fn register(&mut self, example: Box<dyn ExampleGenerator>) {
        let name = example.name().to_string();
        if self.examples.insert(name.clone(), example).is_some() {
            warn!(event = "example_replaced", example = %name, "duplicate example name");
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.examples.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn ExampleGenerator> {
        self.examples.get(name).map(|example| &**example)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ExampleGenerator> {
        self.examples.values().map(|example| &**example)
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Look up `name` and check its entry point naming.
    pub fn resolve(&self, name: &str) -> Result<&dyn ExampleGenerator, FixtureError> {
        let example = self.get(name).ok_or_else(|| FixtureError::Discovery {
            example: name.to_string(),
            reason: "example is not registered".to_string(),
        })?;

        let entry_point = example.entry_point();
        if !entry_point.starts_with(ENTRY_POINT_PREFIX) {
            return Err(FixtureError::Discovery {
                example: name.to_string(),
                reason: format!(
                    "entry point {entry_point:?} does not start with `{ENTRY_POINT_PREFIX}`"
                ),
            });
        }

        Ok(example)
    }
}
