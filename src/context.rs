use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;
use thiserror::Error;

use crate::store::FeatureToggle;

pub type Variables = HashMap<String, Value>;

/// Metadata key holding the course instance id of a document.
pub const COURSE_KEY: &str = "course";

/// Where the filtered text is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterContext {
    /// `None` when the text is not shown inside a course.
    pub course_instance_id: Option<u64>,
}

impl FilterContext {
    pub fn course(course_instance_id: u64) -> Self {
        Self {
            course_instance_id: Some(course_instance_id),
        }
    }

    pub fn outside_course() -> Self {
        Self::default()
    }

    /// Reads the course from document metadata, accepting a number or a
    /// numeric string.
    pub fn from_metadata(metadata: &Variables) -> Self {
        let course_instance_id = match metadata.get(COURSE_KEY) {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        Self { course_instance_id }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("invalid stash settings: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Per-course stash toggles.
///
/// ```yaml
/// default_enabled: false
/// courses:
///   12: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StashSettings {
    #[serde(default)]
    pub default_enabled: bool,
    #[serde(default)]
    pub courses: HashMap<u64, bool>,
}

impl StashSettings {
    pub fn from_yaml(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn enable(mut self, course_instance_id: u64) -> Self {
        self.courses.insert(course_instance_id, true);
        self
    }
}

impl FeatureToggle for StashSettings {
    fn is_enabled(&self, course_instance_id: u64) -> bool {
        self.courses
            .get(&course_instance_id)
            .copied()
            .unwrap_or(self.default_enabled)
    }
}
