//! Low-level Ant launcher for the generator task.
//!
//! Writes the rendered build file into a work directory and runs Ant
//! on it synchronously. The launcher reports any exit code as a normal
//! outcome; deciding what a nonzero exit means is the orchestrator's
//! job, not the launcher's.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use super::buildfile;
use super::directive::GeneratorInvocation;

/// File name the rendered build file is written under.
pub const BUILD_FILE_NAME: &str = "schemagen-build.xml";

/// Captured output of a finished generator process.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit code (-1 when terminated by a signal).
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    /// The command line that was executed.
    pub command: String,
}

impl ToolOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    /// Diagnostics for error reporting. Ant writes most failures to
    /// stderr; falls back to stdout when stderr is empty.
    pub fn diagnostics(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        self.stdout.trim().to_string()
    }
}

/// Errors raised before the generator produced an exit code.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Failed to run {tool}: {message}")]
    Spawn { tool: String, message: String },

    #[error("I/O error while {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Something that can run a composed generator invocation.
///
/// The orchestrator only depends on this trait, so tests substitute a
/// recording implementation and never need a JVM.
pub trait SchemagenRunner {
    fn run(&self, invocation: &GeneratorInvocation) -> Result<ToolOutput, LaunchError>;
}

/// Runs invocations through an external Ant process.
#[derive(Debug, Clone)]
pub struct AntLauncher {
    ant_executable: String,
    work_dir: PathBuf,
    java_home: Option<PathBuf>,
    keep_build_file: bool,
}

impl AntLauncher {
    /// Create a launcher writing its build file into `work_dir`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            ant_executable: "ant".to_string(),
            work_dir: work_dir.into(),
            java_home: None,
            keep_build_file: false,
        }
    }

    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.ant_executable = executable.into();
        self
    }

    pub fn with_java_home(mut self, java_home: Option<PathBuf>) -> Self {
        self.java_home = java_home;
        self
    }

    /// Keep the rendered build file after a successful run. It is
    /// always kept after a failed one.
    pub fn with_keep_build_file(mut self, keep: bool) -> Self {
        self.keep_build_file = keep;
        self
    }

    pub fn build_file_path(&self) -> PathBuf {
        self.work_dir.join(BUILD_FILE_NAME)
    }
}

impl SchemagenRunner for AntLauncher {
    fn run(&self, invocation: &GeneratorInvocation) -> Result<ToolOutput, LaunchError> {
        fs::create_dir_all(&self.work_dir)
            .map_err(|e| LaunchError::io("creating work directory", e))?;

        let build_file = self.build_file_path();
        fs::write(&build_file, buildfile::render(invocation))
            .map_err(|e| LaunchError::io("writing build file", e))?;

        let mut cmd = Command::new(&self.ant_executable);
        cmd.arg("-f").arg(&build_file);
        if let Some(ref java_home) = self.java_home {
            cmd.env("JAVA_HOME", java_home);
        }

        let command = format!("{} -f {}", self.ant_executable, build_file.display());
        tracing::debug!("Running: {}", command);

        let output = cmd.output().map_err(|e| LaunchError::Spawn {
            tool: self.ant_executable.clone(),
            message: e.to_string(),
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        if exit_code == 0 && !self.keep_build_file {
            let _ = fs::remove_file(&build_file);
        }

        Ok(ToolOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            command,
        })
    }
}

/// Whether a failed run looks like the task class could not be loaded,
/// as opposed to the generator rejecting the sources.
///
/// Ant reports an unresolvable taskdef as "taskdef class ... cannot be
/// found"; the class loader surfaces as ClassNotFoundException or
/// NoClassDefFoundError once the task starts resolving its own
/// runtime.
pub fn is_task_resolution_failure(output: &ToolOutput) -> bool {
    let text = format!("{}\n{}", output.stdout, output.stderr).to_lowercase();
    (text.contains("taskdef class") && text.contains("cannot be found"))
        || text.contains("classnotfoundexception")
        || text.contains("noclassdeffounderror")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::directive::InvocationBuilder;
    use crate::model::{Classpath, ClasspathSources, GenerationRequest};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_test_invocation() -> GeneratorInvocation {
        let request = GenerationRequest::new("/project/src", "/project/out");
        let classpaths = ClasspathSources::new()
            .with_tool(Classpath::from_entries([PathBuf::from("jaxb-xjc.jar")]));
        InvocationBuilder::new(&request, &classpaths).build()
    }

    fn output_with(exit_code: i32, stdout: &str, stderr: &str) -> ToolOutput {
        ToolOutput {
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            command: "ant -f build.xml".to_string(),
        }
    }

    #[test]
    fn missing_executable_is_spawn_error() {
        let dir = TempDir::new().unwrap();
        let launcher =
            AntLauncher::new(dir.path()).with_executable("jxsd-test-no-such-tool");

        let err = launcher.run(&make_test_invocation()).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { ref tool, .. } if tool == "jxsd-test-no-such-tool"));

        // The build file was already written when the spawn failed.
        assert!(launcher.build_file_path().exists());
    }

    #[test]
    fn unresolvable_taskdef_is_resolution_failure() {
        let output = output_with(
            1,
            "",
            "BUILD FAILED\nbuild.xml:3: taskdef class com.sun.tools.jxc.SchemaGenTask cannot be found\n using the classloader AntClassLoader[]",
        );
        assert!(is_task_resolution_failure(&output));
    }

    #[test]
    fn class_not_found_is_resolution_failure() {
        let output = output_with(
            1,
            "java.lang.ClassNotFoundException: com.sun.xml.bind.v2.ContextFactory",
            "",
        );
        assert!(is_task_resolution_failure(&output));
    }

    #[test]
    fn source_error_is_not_resolution_failure() {
        let output = output_with(
            1,
            "",
            "BUILD FAILED\nerror: Class1.java:10: cannot find symbol",
        );
        assert!(!is_task_resolution_failure(&output));
    }

    #[test]
    fn diagnostics_prefer_stderr() {
        let output = output_with(1, "progress lines", "the actual failure");
        assert_eq!(output.diagnostics(), "the actual failure");

        let output = output_with(1, "stdout only failure\n", "  ");
        assert_eq!(output.diagnostics(), "stdout only failure");
    }
}
