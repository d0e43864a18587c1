//! Stage construction helper
//!
//! Builder for the named environment a group of cases runs against. Test
//! code assembles a stage, names it and places props on it; the engine
//! itself never constructs stages.

use simpletest_core::Value;

/// A constructed stage: a name and the props placed on it.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    name: String,
    props: Vec<(String, Value)>,
}

impl Stage {
    /// Start building an empty stage.
    pub fn create() -> StageBuilder {
        StageBuilder {
            stage: Stage::default(),
        }
    }

    /// The stage's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a prop by name. Props shadow earlier ones with the same
    /// name, so the latest placement wins.
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// All props in placement order.
    pub fn props(&self) -> &[(String, Value)] {
        &self.props
    }
}

/// Fluent builder returned by [`Stage::create`].
#[derive(Debug, Default)]
pub struct StageBuilder {
    stage: Stage,
}

impl StageBuilder {
    /// Name the stage.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.stage.name = name.into();
        self
    }

    /// Place a named prop on the stage.
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.stage.props.push((name.into(), value.into()));
        self
    }

    /// Finish construction.
    pub fn construct(self) -> Stage {
        self.stage
    }
}
