//! Generator invocation: directive composition, build file rendering,
//! and the Ant launcher.

mod buildfile;
mod directive;
mod launcher;

pub use buildfile::render;
pub use directive::{
    format_directives_pretty, Directive, GeneratorInvocation, InvocationBuilder, TaskRegistration,
    TASK_NAME,
};
pub use launcher::{
    is_task_resolution_failure, AntLauncher, LaunchError, SchemagenRunner, ToolOutput,
    BUILD_FILE_NAME,
};
