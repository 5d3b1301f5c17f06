//! YAML configuration for the converter
//!
//! `meaconv new-config <path>` writes the defaults below as a starting point.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::params::ManualParameters;

/// Converter settings, serializable to YAML
///
/// ```yml
/// manual:
///   l: '10'
///   vbs: '0'
///   w: '10'
/// force_manual: false
/// max_file_bytes: null
/// compression_level: 6
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Manual values, used for W always and for L/Vbs when not in the file name
    pub manual: ManualParameters,
    /// Ignore file names and use the manual values for every file
    pub force_manual: bool,
    /// Reject files larger than this many bytes
    pub max_file_bytes: Option<u64>,
    /// Deflate level for the download archive, 0-9
    pub compression_level: u32,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            manual: ManualParameters::default(),
            force_manual: false,
            max_file_bytes: None,
            compression_level: 6,
        }
    }
}

impl ConverterConfig {
    /// Read the configuration in a YAML file
    pub fn read_config_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Err(ConvertError::ConfigNotFound(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Write the configuration to a YAML file
    pub fn write_config_file(&self, config_path: &Path) -> Result<()> {
        let yaml_str = serde_yaml::to_string(self)?;
        std::fs::write(config_path, yaml_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("meaconv.yml");

        let config = ConverterConfig {
            manual: ManualParameters {
                l: "0.18".to_string(),
                vbs: "-0.9".to_string(),
                w: "5".to_string(),
            },
            force_manual: true,
            max_file_bytes: Some(1024),
            compression_level: 9,
        };
        config.write_config_file(&path)?;

        assert_eq!(ConverterConfig::read_config_file(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: ConverterConfig =
            serde_yaml::from_str("force_manual: true\nmanual:\n  w: '2'\n").unwrap();
        assert!(config.force_manual);
        assert_eq!(config.manual.w, "2");
        assert_eq!(config.manual.l, "10");
        assert_eq!(config.compression_level, 6);
    }

    #[test]
    fn test_bare_numbers_keep_source_text() {
        let config: ConverterConfig =
            serde_yaml::from_str("manual:\n  l: 0.50\n  vbs: 1.0e-3\n  w: 10.0\n").unwrap();
        assert_eq!(config.manual.l, "0.50");
        assert_eq!(config.manual.vbs, "1.0e-3");
        assert_eq!(config.manual.w, "10.0");
    }

    #[test]
    fn test_bare_numbers_reach_page_header() {
        use crate::filename::ParsedParameters;
        use crate::mea_writer::MeaWriter;
        use crate::params::resolve;
        use chrono::NaiveDate;

        let config: ConverterConfig =
            serde_yaml::from_str("manual:\n  l: 0.50\n  vbs: -0.0\n  w: 10.0\n").unwrap();
        let params = resolve(&ParsedParameters::default(), &config.manual, false);

        let mut writer = MeaWriter::new();
        writer.write_header(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(), &params);
        assert!(writer.finish().contains("{Vbs=-0.0,W=10.0,L=0.50,T=25}"));
    }

    #[test]
    fn test_missing_file() {
        let result = ConverterConfig::read_config_file(Path::new("/nonexistent/meaconv.yml"));
        assert!(matches!(result, Err(ConvertError::ConfigNotFound(_))));
    }
}
