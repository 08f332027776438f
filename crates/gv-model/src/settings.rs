//! Per-model settings, loadable from YAML or JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelResult;

/// Target representation of the discretised equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvertFormat {
    /// Keep the expression trees as they are.
    ExpressionTree,
    Python,
    #[default]
    Casadi,
}

/// Solver hand-off and verification flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Run the (slow) output variable check during verification.
    pub debug_mode: bool,
    pub use_jacobian: bool,
    pub use_simplify: bool,
    pub convert_to_format: ConvertFormat,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            use_jacobian: true,
            use_simplify: true,
            convert_to_format: ConvertFormat::Casadi,
        }
    }
}

impl ModelSettings {
    pub fn from_yaml_str(content: &str) -> ModelResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load_yaml(path: &Path) -> ModelResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn save_yaml(&self, path: &Path) -> ModelResult<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> ModelResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_json(&self, path: &Path) -> ModelResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
