//! Configuration for the density hierarchy
//!
//! This module holds the resolution profile table and the working band of
//! resolutions, and re-exports the profile types from `hexscale-types`.
use serde::de::Error;
use std::path::Path;

use crate::error::{HexScaleError, Result};

pub use hexscale_types::profile::{
    DEFAULT_PROFILES, DEFAULT_RES_MAX, DEFAULT_RES_MIN, PROFILE_COUNT, ResolutionProfile,
};

/// Hierarchy configuration
///
/// # Example
///
/// ```rust
/// use hexscale::Config;
///
/// let config = Config::default();
/// assert_eq!(config.res_min, 3);
/// assert_eq!(config.res_max, 11);
///
/// let json = r#"{ "res_min": 4, "res_max": 10 }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.profile(8).target, 1);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Coarsest resolution that gets materialized
    #[serde(default = "Config::default_res_min")]
    pub res_min: u8,

    /// Finest resolution; residents are ingested here
    #[serde(default = "Config::default_res_max")]
    pub res_max: u8,

    /// One profile per resolution, 0 through 12
    #[serde(default = "Config::default_profiles")]
    pub profiles: Vec<ResolutionProfile>,
}

impl Config {
    const fn default_res_min() -> u8 {
        DEFAULT_RES_MIN
    }

    const fn default_res_max() -> u8 {
        DEFAULT_RES_MAX
    }

    fn default_profiles() -> Vec<ResolutionProfile> {
        DEFAULT_PROFILES.to_vec()
    }

    pub fn with_resolution_band(mut self, res_min: u8, res_max: u8) -> Self {
        self.res_min = res_min;
        self.res_max = res_max;
        self
    }

    /// Replace the profile for a single resolution.
    ///
    /// # Panics
    ///
    /// Panics if `resolution` is above 12.
    pub fn with_profile(mut self, resolution: u8, profile: ResolutionProfile) -> Self {
        assert!(
            (resolution as usize) < PROFILE_COUNT,
            "Resolution must be between 0 and 12"
        );
        if self.profiles.len() < PROFILE_COUNT {
            self.profiles.resize(PROFILE_COUNT, ResolutionProfile::sentinel());
        }
        self.profiles[resolution as usize] = profile;
        self
    }

    /// Profile for `resolution`. Resolutions past the table get the sentinel.
    #[inline]
    pub fn profile(&self, resolution: u8) -> ResolutionProfile {
        self.profiles
            .get(resolution as usize)
            .copied()
            .unwrap_or_else(ResolutionProfile::sentinel)
    }

    /// Whether `resolution` lies in `[res_min, res_max]`.
    #[inline]
    pub fn in_band(&self, resolution: u8) -> bool {
        (self.res_min..=self.res_max).contains(&resolution)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.profiles.len() != PROFILE_COUNT {
            return Err(format!(
                "Profile table must have {} entries, got {}",
                PROFILE_COUNT,
                self.profiles.len()
            ));
        }

        if self.res_max as usize >= PROFILE_COUNT {
            return Err(format!(
                "res_max must be at most {}, got {}",
                PROFILE_COUNT - 1,
                self.res_max
            ));
        }

        if self.res_min > self.res_max {
            return Err(format!(
                "res_min ({}) must not be finer than res_max ({})",
                self.res_min, self.res_max
            ));
        }

        for (resolution, profile) in self.profiles.iter().enumerate() {
            if profile.target == 0 {
                return Err(format!(
                    "Density target for resolution {} must be greater than zero",
                    resolution
                ));
            }
            if profile.max == 0 {
                return Err(format!(
                    "Density max for resolution {} must be greater than zero",
                    resolution
                ));
            }
            if profile.target > profile.max {
                log::warn!(
                    "Resolution {} has target {} above max {}; occupied cells are always clipped",
                    resolution,
                    profile.target,
                    profile.max
                );
            }
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load a config file, choosing the format by extension (`.json`, `.toml`).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                Config::from_json(&contents).map_err(|e| HexScaleError::InvalidConfig(e.to_string()))
            }
            #[cfg(feature = "toml")]
            Some("toml") => {
                Config::from_toml(&contents).map_err(|e| HexScaleError::InvalidConfig(e.to_string()))
            }
            other => Err(HexScaleError::InvalidConfig(format!(
                "Unsupported config format: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            res_min: DEFAULT_RES_MIN,
            res_max: DEFAULT_RES_MAX,
            profiles: DEFAULT_PROFILES.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "Resolution must be between 0 and 12")]
    fn test_with_profile_past_table_panics() {
        let _ = Config::default().with_profile(13, ResolutionProfile::new(1, 1, 1));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.profile(4), ResolutionProfile::new(1, 250, 800));
        assert_eq!(config.profile(11), ResolutionProfile::sentinel());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = Config::default()
            .with_resolution_band(4, 10)
            .with_profile(10, ResolutionProfile::new(1, 2, 3));
        let json = config.to_json().unwrap();
        let parsed = Config::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_inverted_band() {
        let json = r#"{ "res_min": 9, "res_max": 5 }"#;
        assert!(Config::from_json(json).is_err());
    }

    #[test]
    fn test_rejects_short_table() {
        let json = r#"{ "profiles": [ { "siblings": 2, "target": 1, "max": 1 } ] }"#;
        assert!(Config::from_json(json).is_err());
    }

    #[test]
    fn test_rejects_zero_target() {
        let config = Config::default().with_profile(7, ResolutionProfile::new(2, 0, 20));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let json = r#"{ "res_min": 3, "resolution_max": 11 }"#;
        assert!(Config::from_json(json).is_err());
    }

    #[test]
    fn test_in_band() {
        let config = Config::default();
        assert!(!config.in_band(2));
        assert!(config.in_band(3));
        assert!(config.in_band(11));
        assert!(!config.in_band(12));
    }

    #[test]
    fn test_from_path_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        std::fs::write(&path, r#"{ "res_min": 5 }"#).unwrap();

        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.res_min, 5);
        assert_eq!(config.res_max, DEFAULT_RES_MAX);
    }

    #[test]
    fn test_from_path_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.yaml");
        std::fs::write(&path, "res_min: 5").unwrap();

        assert!(matches!(
            Config::from_path(&path),
            Err(HexScaleError::InvalidConfig(_))
        ));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default().with_resolution_band(4, 10);
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }
}
