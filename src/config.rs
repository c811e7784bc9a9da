use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    ofx,
};

/// Main configuration for the clip host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Host behaviour settings
    #[serde(default)]
    pub host: HostConfig,

    /// Values served for clips that have no live source
    #[serde(default)]
    pub clip: ClipDefaults,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.clip.validate()?;
        Ok(())
    }
}

/// Host behaviour configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Trace every action dispatched into a plugin
    pub debug_actions: bool,
}

impl HostConfig {
    /// Tracing filter directive matching these settings
    pub fn log_directive(&self, verbose: bool) -> String {
        let base = if verbose { "debug" } else { "info" };
        if self.debug_actions && !verbose {
            format!("{},ofx_clip_host::clip=debug", base)
        } else {
            base.to_string()
        }
    }
}

/// Clip values for hosts without a live timeline
///
/// Also serves as a ready made [`ClipValues`](crate::clip::ClipValues) source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipDefaults {
    /// Bit depth negotiated for the clip
    pub pixel_depth: String,

    /// Component layout negotiated for the clip
    pub components: String,

    /// Bit depth before mapping
    pub unmapped_pixel_depth: String,

    /// Component layout before mapping
    pub unmapped_components: String,

    /// Premultiplication state of delivered images
    pub premultiplication: String,

    /// Pixel aspect ratio (> 0)
    pub pixel_aspect_ratio: f64,

    /// Frames per second (> 0)
    pub frame_rate: f64,

    /// First and last frame
    pub frame_range: [f64; 2],

    /// Frames per second before mapping
    pub unmapped_frame_rate: f64,

    /// First and last frame before mapping
    pub unmapped_frame_range: [f64; 2],

    /// Fielding of delivered images
    pub field_order: String,

    /// Whether the clip is connected
    pub connected: bool,

    /// Whether images can be fetched between frames
    pub continuous_samples: bool,
}

impl Default for ClipDefaults {
    fn default() -> Self {
        Self {
            pixel_depth: ofx::BIT_DEPTH_NONE.to_string(),
            components: ofx::IMAGE_COMPONENT_NONE.to_string(),
            unmapped_pixel_depth: ofx::BIT_DEPTH_NONE.to_string(),
            unmapped_components: ofx::IMAGE_COMPONENT_NONE.to_string(),
            premultiplication: ofx::IMAGE_OPAQUE.to_string(),
            pixel_aspect_ratio: 1.0,
            frame_rate: 25.0,
            frame_range: [0.0, 0.0],
            unmapped_frame_rate: 25.0,
            unmapped_frame_range: [0.0, 0.0],
            field_order: ofx::IMAGE_FIELD_NONE.to_string(),
            connected: false,
            continuous_samples: false,
        }
    }
}

impl ClipDefaults {
    fn validate(&self) -> Result<()> {
        if self.pixel_aspect_ratio <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "clip.pixel_aspect_ratio".to_string(),
                value: self.pixel_aspect_ratio.to_string()
            }.into());
        }

        for (key, rate) in [
            ("clip.frame_rate", self.frame_rate),
            ("clip.unmapped_frame_rate", self.unmapped_frame_rate),
        ] {
            if rate <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: rate.to_string()
                }.into());
            }
        }

        for (key, [start, end]) in [
            ("clip.frame_range", self.frame_range),
            ("clip.unmapped_frame_range", self.unmapped_frame_range),
        ] {
            if start > end {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: format!("{}-{}", start, end)
                }.into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let mut original_config = Config::default();
        original_config.host.debug_actions = true;
        original_config.clip.frame_range = [1.0, 48.0];

        // Save and load
        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert!(loaded_config.host.debug_actions);
        assert_eq!(original_config.clip, loaded_config.clip);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(&file_path, "[clip]\nframe_rate = 30.0\n").unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert_eq!(config.clip.frame_rate, 30.0);
        assert_eq!(config.clip.pixel_aspect_ratio, 1.0);
        assert!(!config.host.debug_actions);
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::from_file("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn test_invalid_frame_rate() {
        let mut config = Config::default();
        config.clip.frame_rate = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_frame_range() {
        let mut config = Config::default();
        config.clip.frame_range = [10.0, 1.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_directive() {
        let host = HostConfig { debug_actions: true };
        assert_eq!(host.log_directive(false), "info,ofx_clip_host::clip=debug");
        assert_eq!(host.log_directive(true), "debug");
        assert_eq!(HostConfig::default().log_directive(false), "info");
    }
}
