use serde::{Deserialize, Serialize};

/// Packing configuration shared by every atlas of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackerConfig {
    /// Atlas width in pixels.
    pub max_width: u32,
    /// Atlas height in pixels.
    pub max_height: u32,
    /// Rotate items wider than tall by 90° before packing.
    pub allow_rotation: bool,
    /// Pad composited canvases to power-of-two sides. Placement is unaffected.
    pub power_of_two: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            max_width: 1024,
            max_height: 1024,
            allow_rotation: true,
            power_of_two: false,
        }
    }
}

impl PackerConfig {
    /// Validates the configuration parameters.
    ///
    /// Atlas dimensions must both be non-zero.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::TreePackerError;

        if self.max_width == 0 || self.max_height == 0 {
            return Err(TreePackerError::InvalidConfig(format!(
                "atlas dimensions must be positive, got {}x{}",
                self.max_width, self.max_height
            )));
        }
        Ok(())
    }

    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn allow_rotation(mut self, v: bool) -> Self {
        self.cfg.allow_rotation = v;
        self
    }
    pub fn pow2(mut self, v: bool) -> Self {
        self.cfg.power_of_two = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}
