//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML
//! tables. Namespace bindings are an array of tables so their order in
//! the file is the order they reach the generator in.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::generator::AntLauncher;
use crate::logging::{LogConfig, LogLevel};
use crate::model::{
    Classpath, ClasspathSources, DuplicateNamespaceError, GenerationRequest, NamespaceBinding,
    NamespaceMappings, DEFAULT_TASK_CLASS,
};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory layout.
    #[serde(default)]
    pub paths: PathSettings,

    /// Source file selection.
    #[serde(default)]
    pub filters: FilterSettings,

    /// Namespace-to-file bindings, in file order.
    #[serde(default)]
    pub schemas: Vec<NamespaceBinding>,

    /// Generator task configuration.
    #[serde(default)]
    pub generator: GeneratorSettings,

    /// Classpath sources.
    #[serde(default)]
    pub classpath: ClasspathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paths: PathSettings::default(),
            filters: FilterSettings::default(),
            schemas: Vec::new(),
            generator: GeneratorSettings::default(),
            classpath: ClasspathSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Directory configuration. Relative paths resolve against the
/// project directory holding the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Root of the annotated Java sources.
    #[serde(default = "default_input_dir")]
    pub input_dir: String,

    /// Directory generated schemas are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Scratch directory for the rendered build file.
    #[serde(default = "default_work_dir")]
    pub work_dir: String,

    /// Directory for run log files.
    #[serde(default = "default_logs_dir")]
    pub logs_dir: String,
}

fn default_input_dir() -> String {
    "src/main/java".to_string()
}

fn default_output_dir() -> String {
    "build/generated/schemas".to_string()
}

fn default_work_dir() -> String {
    ".jxsd-work".to_string()
}

fn default_logs_dir() -> String {
    ".jxsd-logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            work_dir: default_work_dir(),
            logs_dir: default_logs_dir(),
        }
    }
}

/// Source selection patterns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Inclusion patterns, in order. Empty means all sources.
    #[serde(default)]
    pub includes: Vec<String>,

    /// Exclusion patterns, in order.
    #[serde(default)]
    pub excludes: Vec<String>,
}

/// Generator task configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Fully qualified generator task class.
    #[serde(default = "default_task_class")]
    pub task_class: String,

    /// Episode file path. Blank disables episode output.
    #[serde(default)]
    pub episode: String,

    /// Ant executable used to drive the generator.
    #[serde(default = "default_ant_executable")]
    pub ant_executable: String,

    /// JAVA_HOME for the generator process. Unset inherits the
    /// environment.
    #[serde(default)]
    pub java_home: Option<String>,
}

fn default_task_class() -> String {
    DEFAULT_TASK_CLASS.to_string()
}

fn default_ant_executable() -> String {
    "ant".to_string()
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            task_class: default_task_class(),
            episode: String::new(),
            ant_executable: default_ant_executable(),
            java_home: None,
        }
    }
}

/// Classpath sources, each a list of jar or directory paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClasspathSettings {
    /// Compiled application classes and their dependencies.
    #[serde(default)]
    pub compile: Vec<String>,

    /// The generator tool and its runtime.
    #[serde(default)]
    pub tool: Vec<String>,

    /// Extra entries appended after the tool classpath.
    #[serde(default)]
    pub tool_additions: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Log the full directive list before each run.
    #[serde(default)]
    pub verbose_arguments: bool,

    /// Keep the rendered build file after successful runs.
    #[serde(default)]
    pub keep_build_file: bool,

    /// Number of tool output lines shown after a failure.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Show timestamps in run log output.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            verbose_arguments: false,
            keep_build_file: false,
            error_tail: default_error_tail(),
            show_timestamps: true,
        }
    }
}

impl Settings {
    /// Build the generation request, resolving relative paths against
    /// `base_dir`.
    pub fn to_request(&self, base_dir: &Path) -> Result<GenerationRequest, DuplicateNamespaceError> {
        let schemas = NamespaceMappings::from_bindings(self.schemas.iter().cloned())?;

        let episode = if self.generator.episode.trim().is_empty() {
            String::new()
        } else {
            absolutize(base_dir, self.generator.episode.trim())
                .to_string_lossy()
                .into_owned()
        };

        Ok(
            GenerationRequest::new(
                absolutize(base_dir, &self.paths.input_dir),
                absolutize(base_dir, &self.paths.output_dir),
            )
            .with_includes(self.filters.includes.clone())
            .with_excludes(self.filters.excludes.clone())
            .with_schemas(schemas)
            .with_episode(episode)
            .with_task_class(self.generator.task_class.clone()),
        )
    }

    /// Build the classpath sources, resolving relative entries against
    /// `base_dir`.
    pub fn to_classpaths(&self, base_dir: &Path) -> ClasspathSources {
        let resolve = |entries: &[String]| {
            Classpath::from_entries(entries.iter().map(|e| absolutize(base_dir, e)))
        };
        ClasspathSources::new()
            .with_compile(resolve(&self.classpath.compile))
            .with_tool(resolve(&self.classpath.tool))
            .with_tool_additions(resolve(&self.classpath.tool_additions))
    }

    /// Build the Ant launcher configured by these settings.
    pub fn launcher(&self, base_dir: &Path) -> AntLauncher {
        AntLauncher::new(absolutize(base_dir, &self.paths.work_dir))
            .with_executable(self.generator.ant_executable.clone())
            .with_java_home(self.generator.java_home.as_ref().map(PathBuf::from))
            .with_keep_build_file(self.logging.keep_build_file)
    }

    /// Run logger configuration derived from the logging section.
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.logging.level,
            error_tail: self.logging.error_tail as usize,
            show_timestamps: self.logging.show_timestamps,
        }
    }

    /// Resolved log directory.
    pub fn logs_dir(&self, base_dir: &Path) -> PathBuf {
        absolutize(base_dir, &self.paths.logs_dir)
    }
}

fn absolutize(base: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
