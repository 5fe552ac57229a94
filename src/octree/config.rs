//! Octree configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::core::types::Vec3;
use super::location::MAX_DEPTH;

/// Geometry and limits of an octree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Center of the cubic volume.
    pub center: [f32; 3],
    /// Distance from the center to each face.
    pub size: f32,
    /// Deepest level a leaf may reach before insertion gives up. At most 21.
    pub max_depth: u32,
    /// Nodes to reserve room for up front.
    pub capacity_hint: usize,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            center: [0.0; 3],
            size: 100.0,
            max_depth: MAX_DEPTH,
            capacity_hint: 0,
        }
    }
}

impl OctreeConfig {
    pub fn new(center: Vec3, size: f32) -> Self {
        Self {
            center: center.to_array(),
            size,
            ..Default::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_capacity_hint(mut self, capacity_hint: usize) -> Self {
        self.capacity_hint = capacity_hint;
        self
    }

    pub fn center(&self) -> Vec3 {
        Vec3::from_array(self.center)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.center().is_finite() {
            return Err(Error::InvalidConfig(format!("center {:?} is not finite", self.center)));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(Error::InvalidConfig(format!("size must be positive, got {}", self.size)));
        }
        if !(1..=MAX_DEPTH).contains(&self.max_depth) {
            return Err(Error::InvalidConfig(format!(
                "max_depth must be within 1..={}, got {}",
                MAX_DEPTH, self.max_depth
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded octree config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        let config = OctreeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_depth, MAX_DEPTH);
        assert_eq!(config.center(), Vec3::ZERO);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = OctreeConfig::from_json_str(r#"{ "center": [100, 101, 102] }"#).unwrap();
        assert_eq!(config.center(), Vec3::new(100.0, 101.0, 102.0));
        assert_eq!(config.size, 100.0);
        assert_eq!(config.capacity_hint, 0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            OctreeConfig::from_json_str(r#"{ "size": 0 }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            OctreeConfig::from_json_str(r#"{ "max_depth": 22 }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(OctreeConfig::new(Vec3::ZERO, 1.0).with_max_depth(0).validate().is_err());
        assert!(OctreeConfig::new(Vec3::new(f32::NAN, 0.0, 0.0), 1.0).validate().is_err());
        assert!(matches!(OctreeConfig::from_json_str("{ size: 1 }"), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let written = OctreeConfig::new(Vec3::new(1.0, 2.0, 3.0), 16.0)
            .with_max_depth(8)
            .with_capacity_hint(64);
        file.write_all(written.to_json().unwrap().as_bytes()).unwrap();

        let loaded = OctreeConfig::load(file.path()).unwrap();
        assert_eq!(loaded, written);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = OctreeConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
