//! Error types for the generation orchestrator.
//!
//! Two layers: RequestError covers everything wrong with the request
//! itself (bad directories, conflicting bindings, missing tool
//! classpath), GenerationError covers the full run including launch
//! and generator failures.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::generator::LaunchError;
use crate::model::DuplicateNamespaceError;

/// A configuration problem detected before anything is launched.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The source directory does not exist.
    #[error("Input directory does not exist: {0}")]
    InputDirMissing(PathBuf),

    /// The source directory exists but cannot be read.
    #[error("Input directory is not readable: {path}: {source}")]
    InputDirUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input and output point at the same directory.
    #[error("Input and output directory are the same: {0}")]
    InputEqualsOutput(PathBuf),

    /// A namespace was bound to two files.
    #[error(transparent)]
    DuplicateNamespace(#[from] DuplicateNamespaceError),

    /// A task class was named but no classpath can load it.
    #[error(
        "No tool classpath configured for generator task class '{task_class}'; \
         add the jar providing it to [classpath].tool"
    )]
    MissingToolClasspath { task_class: String },
}

impl RequestError {
    /// Create a missing tool classpath error.
    pub fn missing_tool_classpath(task_class: impl Into<String>) -> Self {
        Self::MissingToolClasspath {
            task_class: task_class.into(),
        }
    }
}

/// A failed generation run.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The request was invalid.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The generator process could not be started.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// File I/O around the run failed.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// The host tool could not load the generator task class.
    #[error(
        "Generator task class '{task_class}' could not be resolved (exit code {exit_code}); \
         check that [classpath].tool carries the generator jars:\n{diagnostics}"
    )]
    Resolution {
        task_class: String,
        exit_code: i32,
        diagnostics: String,
    },

    /// The generator ran and rejected the sources.
    #[error("Schema generation failed with exit code {exit_code}:\n{diagnostics}")]
    Generator { exit_code: i32, diagnostics: String },
}

impl GenerationError {
    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a task resolution error.
    pub fn resolution(
        task_class: impl Into<String>,
        exit_code: i32,
        diagnostics: impl Into<String>,
    ) -> Self {
        Self::Resolution {
            task_class: task_class.into(),
            exit_code,
            diagnostics: diagnostics.into(),
        }
    }

    /// Create a generator failure carrying the tool diagnostics verbatim.
    pub fn generator(exit_code: i32, diagnostics: impl Into<String>) -> Self {
        Self::Generator {
            exit_code,
            diagnostics: diagnostics.into(),
        }
    }
}

/// Result type for request validation.
pub type RequestResult<T> = Result<T, RequestError>;

/// Result type for generation runs.
pub type GenerationResult<T> = Result<T, GenerationError>;
