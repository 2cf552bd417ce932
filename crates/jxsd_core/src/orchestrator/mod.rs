//! Schema generation orchestrator.
//!
//! Drives one generator run through a two-step lifecycle:
//!
//! 1. `configure` validates the request and binds it to a runner
//! 2. `execute` composes the invocation, launches the generator once,
//!    and classifies the outcome
//!
//! No generator process is started before the request re-validates at
//! execution time, so a request that cannot run never touches the
//! output directory.

mod errors;

pub use errors::{GenerationError, GenerationResult, RequestError, RequestResult};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::Local;

use crate::generator::{
    is_task_resolution_failure, AntLauncher, GeneratorInvocation, InvocationBuilder,
    SchemagenRunner,
};
use crate::logging::RunLogger;
use crate::model::{
    collect_generated_files, ClasspathSources, GenerationRequest, InvocationReport,
};

/// Orchestrates a single schema generation run.
///
/// Generic over the runner so tests can substitute a recording fake;
/// production code uses the default [`AntLauncher`].
#[derive(Debug)]
pub struct SchemaGeneration<R = AntLauncher> {
    request: GenerationRequest,
    classpaths: ClasspathSources,
    runner: R,
    logger: Option<Arc<RunLogger>>,
    verbose_arguments: bool,
}

impl SchemaGeneration<AntLauncher> {
    /// Validate a request and bind it to the default Ant launcher.
    ///
    /// Rejects requests that could never run: a missing or unreadable
    /// input directory, input and output pointing at the same place,
    /// or a custom task class with no tool classpath to load it from.
    /// Validation has no side effects; nothing is created yet.
    pub fn configure(
        request: GenerationRequest,
        classpaths: ClasspathSources,
    ) -> RequestResult<Self> {
        validate_request(&request, &classpaths)?;

        let work_dir = std::env::temp_dir().join("jxsd-work");
        Ok(Self {
            request,
            classpaths,
            runner: AntLauncher::new(work_dir),
            logger: None,
            verbose_arguments: false,
        })
    }
}

impl<R> SchemaGeneration<R> {
    /// Replace the runner, keeping the validated request.
    pub fn with_runner<R2: SchemagenRunner>(self, runner: R2) -> SchemaGeneration<R2> {
        SchemaGeneration {
            request: self.request,
            classpaths: self.classpaths,
            runner,
            logger: self.logger,
            verbose_arguments: self.verbose_arguments,
        }
    }

    /// Attach a run logger. The run is logged to its file in addition
    /// to the tracing output.
    pub fn with_logger(mut self, logger: Arc<RunLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Also log the full directive list at info level before running.
    pub fn with_verbose_arguments(mut self, verbose: bool) -> Self {
        self.verbose_arguments = verbose;
        self
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Compose the invocation without running it (dry-run support).
    pub fn plan(&self) -> GeneratorInvocation {
        InvocationBuilder::new(&self.request, &self.classpaths).build()
    }

    fn run_log(&self, f: impl FnOnce(&RunLogger)) {
        if let Some(ref logger) = self.logger {
            f(logger);
        }
    }
}

impl<R: SchemagenRunner> SchemaGeneration<R> {
    /// Run the generator once and report the outcome.
    ///
    /// Re-validates the request, creates the output directory (existing
    /// files are left alone), launches the generator, and classifies a
    /// nonzero exit as either a task resolution failure or a generator
    /// failure. Diagnostics are passed through verbatim.
    pub fn execute(self) -> GenerationResult<InvocationReport> {
        // The input directory may have vanished since configure; fail
        // before creating anything.
        validate_request(&self.request, &self.classpaths)?;

        fs::create_dir_all(&self.request.output_dir)
            .map_err(|e| GenerationError::io("creating output directory", e))?;

        let invocation = self.plan();

        tracing::info!(
            "Generating schemas from {} into {}",
            self.request.input_dir.display(),
            self.request.output_dir.display()
        );
        let argument_summary: Vec<String> = invocation
            .arguments()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        tracing::info!(
            "Arguments for schema generation: {}",
            argument_summary.join(", ")
        );

        self.run_log(|logger| {
            logger.phase("Schema generation");
            logger.validation(&format!(
                "Input: {} -> Output: {}",
                self.request.input_dir.display(),
                self.request.output_dir.display()
            ));
        });
        if self.verbose_arguments {
            self.run_log(|logger| logger.log_directives_pretty(&invocation));
        }

        let started_at = Local::now().to_rfc3339();
        let output = self.runner.run(&invocation)?;

        self.run_log(|logger| {
            logger.command(&output.command);
            for line in output.stdout.lines() {
                logger.output_line(line, false);
            }
            for line in output.stderr.lines() {
                logger.output_line(line, true);
            }
        });

        if !output.succeeded() {
            self.run_log(|logger| logger.show_tail("schemagen output"));

            if is_task_resolution_failure(&output) {
                let err = GenerationError::resolution(
                    &self.request.task_class,
                    output.exit_code,
                    output.diagnostics(),
                );
                self.run_log(|logger| logger.error(&err.to_string()));
                return Err(err);
            }

            let err = GenerationError::generator(output.exit_code, output.diagnostics());
            self.run_log(|logger| logger.error(&err.to_string()));
            return Err(err);
        }

        let generated_files = collect_generated_files(&self.request.output_dir);
        tracing::info!(
            "Schema generation finished: {} file(s) in {}",
            generated_files.len(),
            self.request.output_dir.display()
        );
        self.run_log(|logger| {
            logger.success(&format!("{} schema file(s) written", generated_files.len()));
            logger.flush();
        });

        Ok(InvocationReport {
            exit_code: output.exit_code,
            command: output.command,
            generated_files,
            started_at,
            log_path: self.logger.as_ref().map(|l| l.log_path().to_path_buf()),
        })
    }
}

fn validate_request(
    request: &GenerationRequest,
    classpaths: &ClasspathSources,
) -> RequestResult<()> {
    if !request.input_dir.is_dir() {
        return Err(RequestError::InputDirMissing(request.input_dir.clone()));
    }
    fs::read_dir(&request.input_dir).map_err(|e| RequestError::InputDirUnreadable {
        path: request.input_dir.clone(),
        source: e,
    })?;

    if same_directory(&request.input_dir, &request.output_dir) {
        return Err(RequestError::InputEqualsOutput(request.input_dir.clone()));
    }

    if request.uses_custom_task_class() && classpaths.tool.is_empty() {
        return Err(RequestError::missing_tool_classpath(&request.task_class));
    }

    Ok(())
}

/// Compare two directories, resolving symlinks when both exist. The
/// output directory usually does not exist yet, in which case the raw
/// paths are compared.
fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
