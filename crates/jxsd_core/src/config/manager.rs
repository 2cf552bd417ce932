//! Config manager for loading and saving the project config file.
//!
//! Key features:
//! - Atomic writes (write to temp file, then rename)
//! - Commented config generation for `jxsd init`
//! - Unknown top-level sections are reported, never rewritten; the
//!   config file belongs to the user

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use toml_edit::DocumentMut;

use super::settings::Settings;
use crate::model::NamespaceBinding;

/// Top-level sections a config file may contain.
const KNOWN_SECTIONS: [&str; 6] = [
    "paths",
    "filters",
    "schemas",
    "generator",
    "classpath",
    "logging",
];

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to parse config for inspection: {0}")]
    EditParseError(#[from] toml_edit::TomlError),

    #[error("Config file not found: {0} (run `jxsd init` to create one)")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages the project configuration file.
pub struct ConfigManager {
    /// Path to the config file.
    config_path: PathBuf,
    /// Current settings loaded in memory.
    settings: Settings,
}

impl ConfigManager {
    /// Create a new config manager with the given config file path.
    ///
    /// Does not load the config - call `load()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Directory the config file lives in; relative paths in the
    /// config resolve against it.
    pub fn project_dir(&self) -> PathBuf {
        self.config_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a mutable reference to the current settings.
    ///
    /// Note: Changes made here are only in memory until `save()` is
    /// called.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Whether the config file exists on disk.
    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Load config from file.
    ///
    /// Returns NotFound if the file doesn't exist. Unknown top-level
    /// sections are logged and otherwise ignored.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        for section in unknown_sections(&content)? {
            tracing::warn!(
                "Ignoring unknown section [{}] in {}",
                section,
                self.config_path.display()
            );
        }
        self.settings = toml::from_str(&content)?;
        Ok(())
    }

    /// Load config from file, writing commented defaults first if the
    /// file doesn't exist yet.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            tracing::info!(
                "Config file not found, creating default at {}",
                self.config_path.display()
            );
            self.save()?;
        }
        self.load()
    }

    /// Save the current settings atomically, with section comments.
    pub fn save(&self) -> ConfigResult<()> {
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    /// Generate config content with helpful comments.
    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::new();

        output.push_str("# jxsd configuration\n");
        output.push_str("# Generates XML schemas from JAXB-annotated Java sources.\n\n");

        output.push_str("# Source, output, and working directories (relative to this file)\n");
        output.push_str("[paths]\n");
        push_section(&mut output, &self.settings.paths)?;
        output.push('\n');

        output.push_str("# Source file selection patterns\n");
        output.push_str("[filters]\n");
        push_section(&mut output, &self.settings.filters)?;
        output.push('\n');

        output.push_str("# Namespace-to-file bindings, applied in file order\n");
        if self.settings.schemas.is_empty() {
            output.push_str("# [[schemas]]\n");
            output.push_str("# namespace = \"http://example.com/orders\"\n");
            output.push_str("# file = \"orders.xsd\"\n\n");
        } else {
            #[derive(Serialize)]
            struct SchemaList<'a> {
                schemas: &'a [NamespaceBinding],
            }
            output.push_str(&toml::to_string_pretty(&SchemaList {
                schemas: &self.settings.schemas,
            })?);
            output.push('\n');
        }

        output.push_str("# Generator task and host tool\n");
        output.push_str("[generator]\n");
        push_section(&mut output, &self.settings.generator)?;
        output.push('\n');

        output.push_str("# Classpath sources: compiled code, the generator tool, extras\n");
        output.push_str("[classpath]\n");
        push_section(&mut output, &self.settings.classpath)?;
        output.push('\n');

        output.push_str("# Logging\n");
        output.push_str("[logging]\n");
        push_section(&mut output, &self.settings.logging)?;

        Ok(output)
    }

    /// Write content to config file atomically.
    ///
    /// Writes to a temp file first, then renames.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.config_path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}

/// Serialize a section struct as bare key-value lines.
fn push_section<T: Serialize>(output: &mut String, section: &T) -> ConfigResult<()> {
    let content = toml::to_string_pretty(section)?;
    for line in content.lines() {
        output.push_str(line);
        output.push('\n');
    }
    Ok(())
}

/// Top-level keys in `content` that no known section claims.
fn unknown_sections(content: &str) -> Result<Vec<String>, toml_edit::TomlError> {
    let doc: DocumentMut = content.parse()?;
    Ok(doc
        .iter()
        .map(|(key, _)| key)
        .filter(|key| !KNOWN_SECTIONS.contains(key))
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn save_creates_commented_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("jxsd.toml");

        let manager = ConfigManager::new(&config_path);
        manager.save().unwrap();

        assert!(config_path.exists());
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[paths]"));
        assert!(content.contains("[generator]"));
        assert!(content.contains("# [[schemas]]"));
        assert!(content.contains("task_class"));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("jxsd.toml");

        let manager = ConfigManager::new(&config_path);
        manager.save().unwrap();

        let mut reloaded = ConfigManager::new(&config_path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings().paths.input_dir, "src/main/java");
    }

    #[test]
    fn load_or_create_writes_defaults_when_missing() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("jxsd.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert!(config_path.exists());
        assert_eq!(manager.settings().paths.output_dir, "build/generated/schemas");
    }

    #[test]
    fn load_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("absent.toml"));

        let err = manager.load().unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("jxsd init"));
    }

    #[test]
    fn load_reads_custom_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("jxsd.toml");
        fs::write(
            &config_path,
            "[paths]\ninput_dir = \"custom/java\"\n\n[[schemas]]\nnamespace = \"http://x\"\nfile = \"x.xsd\"\n",
        )
        .unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load().unwrap();

        assert_eq!(manager.settings().paths.input_dir, "custom/java");
        assert_eq!(manager.settings().schemas.len(), 1);
    }

    #[test]
    fn bindings_survive_save_and_reload_in_order() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("jxsd.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.settings_mut().schemas = vec![
            NamespaceBinding::new("http://b.example.com", "b.xsd"),
            NamespaceBinding::new("http://a.example.com", "a.xsd"),
        ];
        manager.save().unwrap();

        let mut reloaded = ConfigManager::new(&config_path);
        reloaded.load().unwrap();
        let files: Vec<_> = reloaded
            .settings()
            .schemas
            .iter()
            .map(|b| b.file.as_str())
            .collect();
        assert_eq!(files, vec!["b.xsd", "a.xsd"]);
    }

    #[test]
    fn unknown_sections_are_detected() {
        let content = "[paths]\ninput_dir = \"src\"\n\n[legacy]\nold_key = 1\n";
        let unknown = unknown_sections(content).unwrap();
        assert_eq!(unknown, vec!["legacy".to_string()]);
    }

    #[test]
    fn atomic_write_creates_no_temp_on_success() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("jxsd.toml");

        let manager = ConfigManager::new(&config_path);
        manager.save().unwrap();

        let temp_path = config_path.with_extension("toml.tmp");
        assert!(!temp_path.exists());
    }
}
