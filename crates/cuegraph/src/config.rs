//! Configuration types for SoundCue graph conversion.
//!
//! This module provides configuration structures that control how the graph
//! is laid out and how the editor text is exported. All types implement
//! [`serde::Deserialize`] for loading from external sources; every field has
//! a default, so an empty document is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and export settings.
//! - [`LayoutConfig`] - Grid steps and spacing used by the layout engine.
//! - [`ExportConfig`] - Fallback paths and identity token generation.
//!
//! # Example
//!
//! ```
//! # use cuegraph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().x_step(), 420);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

/// Default export path used when the export names no SoundCue asset.
pub const DEFAULT_BASE_PATH: &str = "/Game/NewSoundCue.NewSoundCue";

/// Attenuation settings used when an attenuation node references none.
pub const DEFAULT_ATTENUATION_PATH: &str =
    "/Game/Sounds/Attenuation/Default_Attenuation.Default_Attenuation";

/// Top-level application configuration combining layout and export settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and export configurations.
    pub fn new(layout: LayoutConfig, export: ExportConfig) -> Self {
        Self { layout, export }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Returns the export configuration for modification.
    pub fn export_mut(&mut self) -> &mut ExportConfig {
        &mut self.export
    }

    /// Check that the configured values can produce a layout.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        let layout = &self.layout;
        if layout.x_step <= 0 {
            return Err(format!("layout.x_step must be positive, got {}", layout.x_step));
        }
        if layout.y_step <= 0 {
            return Err(format!("layout.y_step must be positive, got {}", layout.y_step));
        }
        if layout.region_gap < 0 {
            return Err(format!(
                "layout.region_gap must not be negative, got {}",
                layout.region_gap
            ));
        }
        if !(layout.min_gap_ratio.is_finite() && layout.min_gap_ratio >= 0.0) {
            return Err(format!(
                "layout.min_gap_ratio must be a non-negative number, got {}",
                layout.min_gap_ratio
            ));
        }
        Ok(())
    }
}

/// Grid steps and spacing of the layout engine, in editor units.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance between depth columns.
    x_step: i64,

    /// Vertical distance between lanes.
    y_step: i64,

    /// Vertical gap left between the regions of separate roots.
    region_gap: i64,

    /// Minimum vertical gap between nodes of a column, as a fraction of `y_step`.
    min_gap_ratio: f64,
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    pub fn new(x_step: i64, y_step: i64, region_gap: i64, min_gap_ratio: f64) -> Self {
        Self {
            x_step,
            y_step,
            region_gap,
            min_gap_ratio,
        }
    }

    pub fn x_step(&self) -> i64 {
        self.x_step
    }

    pub fn y_step(&self) -> i64 {
        self.y_step
    }

    pub fn region_gap(&self) -> i64 {
        self.region_gap
    }

    pub fn min_gap_ratio(&self) -> f64 {
        self.min_gap_ratio
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            x_step: 420,
            y_step: 250,
            region_gap: 800,
            min_gap_ratio: 0.7,
        }
    }
}

/// Export settings: fallback paths and identity token generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// SoundCue export path used when the export does not name one.
    default_base_path: String,

    /// Attenuation settings path used when an attenuation node resolves none.
    attenuation_fallback: String,

    /// Generate sequential tokens instead of random ones, making the output
    /// byte-reproducible.
    stable_tokens: bool,

    /// Seed for random token generation. Entropy is used when absent.
    seed: Option<u64>,
}

impl ExportConfig {
    pub fn default_base_path(&self) -> &str {
        &self.default_base_path
    }

    pub fn attenuation_fallback(&self) -> &str {
        &self.attenuation_fallback
    }

    pub fn stable_tokens(&self) -> bool {
        self.stable_tokens
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Enable or disable sequential tokens.
    pub fn with_stable_tokens(mut self, stable_tokens: bool) -> Self {
        self.stable_tokens = stable_tokens;
        self
    }

    /// Set the seed for random tokens.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set the attenuation fallback path.
    pub fn with_attenuation_fallback(mut self, path: impl Into<String>) -> Self {
        self.attenuation_fallback = path.into();
        self
    }

    /// Enable or disable sequential tokens in place.
    pub fn set_stable_tokens(&mut self, stable_tokens: bool) {
        self.stable_tokens = stable_tokens;
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_base_path: DEFAULT_BASE_PATH.to_string(),
            attenuation_fallback: DEFAULT_ATTENUATION_PATH.to_string(),
            stable_tokens: false,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout().x_step(), 420);
        assert_eq!(config.layout().y_step(), 250);
        assert_eq!(config.layout().region_gap(), 800);
        assert_eq!(config.export().default_base_path(), DEFAULT_BASE_PATH);
        assert!(!config.export().stable_tokens());
        assert_eq!(config.export().seed(), None);
    }

    #[test]
    fn test_validate_rejects_zero_step() {
        let config = AppConfig::new(LayoutConfig::new(420, 0, 800, 0.7), ExportConfig::default());
        assert!(config.validate().unwrap_err().contains("y_step"));
    }

    #[test]
    fn test_validate_rejects_negative_ratio() {
        let config = AppConfig::new(LayoutConfig::new(420, 250, 800, -1.0), ExportConfig::default());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_builders() {
        let export = ExportConfig::default()
            .with_stable_tokens(true)
            .with_seed(Some(7))
            .with_attenuation_fallback("/Game/Att/Custom.Custom");
        assert!(export.stable_tokens());
        assert_eq!(export.seed(), Some(7));
        assert_eq!(export.attenuation_fallback(), "/Game/Att/Custom.Custom");
    }
}
