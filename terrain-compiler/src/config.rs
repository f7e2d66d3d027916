use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{CompileError, Result};

/// Marker lines delimiting the template region of a host file. Lines are
/// compared after trimming surrounding whitespace.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Sentinels {
    pub start: String,
    pub end: String,
}

impl Default for Sentinels {
    fn default() -> Self {
        Self {
            start: "// start".to_string(),
            end: "// end".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub data_file_path: PathBuf,
    pub template_file_path: PathBuf,
    pub output_file_path: PathBuf,
    #[serde(default)]
    pub sentinels: Sentinels,
    /// Written once after the last expansion.
    #[serde(default = "default_terminator")]
    pub terminator: String,
}

fn default_terminator() -> String {
    "}".to_string()
}

impl GeneratorConfig {
    pub fn new(
        data_file_path: impl Into<PathBuf>,
        template_file_path: impl Into<PathBuf>,
        output_file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            data_file_path: data_file_path.into(),
            template_file_path: template_file_path.into(),
            output_file_path: output_file_path.into(),
            sentinels: Sentinels::default(),
            terminator: default_terminator(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| CompileError::io(path, e))?;
        let config = Self::from_ron(&raw)?;
        tracing::trace!(target: "config", "loaded {:?} from {}", config, path.display());
        Ok(config)
    }

    pub fn from_ron(raw: &str) -> Result<Self> {
        let config: Self = ron::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sentinels.start.trim().is_empty() || self.sentinels.end.trim().is_empty() {
            return Err(CompileError::Config(
                "sentinels must not be blank".to_string(),
            ));
        }
        if self.sentinels.start.trim() == self.sentinels.end.trim() {
            return Err(CompileError::Config(format!(
                "start and end sentinels are both `{}`",
                self.sentinels.start.trim()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let config = GeneratorConfig::from_ron(
            r#"(
                data_file_path: "data/terrain_data.txt",
                template_file_path: "data/Terrain.js",
                output_file_path: "out/Terrain.gen.js",
            )"#,
        )
        .unwrap();

        assert_eq!(
            config,
            GeneratorConfig::new(
                "data/terrain_data.txt",
                "data/Terrain.js",
                "out/Terrain.gen.js"
            )
        );
        assert_eq!(config.sentinels.start, "// start");
        assert_eq!(config.sentinels.end, "// end");
        assert_eq!(config.terminator, "}");
    }

    #[test]
    fn parses_overridden_markers() {
        let config = GeneratorConfig::from_ron(
            r##"(
                data_file_path: "a",
                template_file_path: "b",
                output_file_path: "c",
                sentinels: (start: "# begin"),
                terminator: "};",
            )"##,
        )
        .unwrap();

        assert_eq!(config.sentinels.start, "# begin");
        assert_eq!(config.sentinels.end, "// end");
        assert_eq!(config.terminator, "};");
    }

    #[test]
    fn missing_path_is_a_parse_error() {
        let error = GeneratorConfig::from_ron(r#"(data_file_path: "a")"#).unwrap_err();
        assert!(matches!(error, CompileError::ConfigParse(_)));
    }

    #[test]
    fn identical_sentinels_are_rejected() {
        let mut config = GeneratorConfig::new("a", "b", "c");
        config.sentinels.end = " // start ".to_string();
        assert!(matches!(config.validate(), Err(CompileError::Config(_))));
    }

    #[test]
    fn from_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = GeneratorConfig::from_file(dir.path().join("terrain.ron")).unwrap_err();
        assert!(matches!(error, CompileError::Io { .. }));
    }
}
