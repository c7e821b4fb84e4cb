//! Statistics result tree.
//!
//! Calculators report through a small n-ary tree: grouping nodes carry a
//! statistic name and children, leaf nodes carry a value broken down by an
//! optional split key (an author id, an ISO week label, ...).
//!
//! ```text
//! statistics
//! └── average-posts-per-user          (grouping node, named after the stat)
//!     ├── average-posts-per-user      split_key=user_1  value=1.25  units=posts
//!     └── average-posts-per-user      split_key=user_2  value=1.0   units=posts
//! ```

use serde::{Deserialize, Serialize};

/// A node in the statistics result tree.
///
/// No validation is performed; calculators are responsible for producing a
/// well-formed shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsNode {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    split_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    units: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<StatisticsNode>,
}

impl StatisticsNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_split_key(mut self, split_key: impl Into<String>) -> Self {
        self.split_key = Some(split_key.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn split_key(&self) -> Option<&str> {
        self.split_key.as_deref()
    }

    pub fn set_split_key(&mut self, split_key: impl Into<String>) {
        self.split_key = Some(split_key.into());
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = Some(value);
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    pub fn set_units(&mut self, units: impl Into<String>) {
        self.units = Some(units.into());
    }

    pub fn children(&self) -> &[StatisticsNode] {
        &self.children
    }

    /// Append a child, preserving call order.
    pub fn add_child(&mut self, child: StatisticsNode) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&StatisticsNode> {
        self.children.iter().find(|c| c.name == name)
    }
}
