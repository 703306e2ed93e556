// crates/instana-core/src/path.rs
// ============================================================================
// Module: Attribute Paths
// Description: Locations of values inside a state tree.
// Purpose: Bind diagnostics to the attribute the operator has to fix.
// Dependencies: std
// ============================================================================

use std::fmt;

// ============================================================================
// SECTION: Steps
// ============================================================================

/// One step from a parent value to a child value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Named attribute of an object.
    Attribute(String),
    /// Position in a list or set.
    Index(usize),
    /// Key of a map.
    Key(String),
}

// ============================================================================
// SECTION: Path
// ============================================================================

/// Path from the resource root to a nested value.
///
/// Renders as `rules[0].rule.error_rate` or `custom_properties["env"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AttributePath {
    /// Steps from the root.
    steps: Vec<PathStep>,
}

impl AttributePath {
    /// The resource root.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            steps: Vec::new(),
        }
    }

    /// Path to a top-level attribute.
    #[must_use]
    pub fn attribute(name: &str) -> Self {
        Self::root().child(name)
    }

    /// Extends the path with an attribute name.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        self.with(PathStep::Attribute(name.to_string()))
    }

    /// Extends the path with a list index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.with(PathStep::Index(index))
    }

    /// Extends the path with a map key.
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        self.with(PathStep::Key(key.to_string()))
    }

    /// Returns the steps from the root.
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Returns true for the resource root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Clones the path and appends a step.
    fn with(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self {
            steps,
        }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Attribute(name) if position == 0 => write!(f, "{name}")?,
                PathStep::Attribute(name) => write!(f, ".{name}")?,
                PathStep::Index(index) => write!(f, "[{index}]")?,
                PathStep::Key(key) => write!(f, "[\"{key}\"]")?,
            }
        }
        Ok(())
    }
}
