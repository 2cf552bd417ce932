//! Data models for schema generation.
//!
//! This module contains the core data structures consumed by the
//! orchestrator:
//! - The generation request (directories, filters, bindings, episode)
//! - Classpath collections and their ordered composition
//! - The invocation report returned after a run

mod classpath;
mod report;
mod request;

pub use classpath::{path_list_separator, Classpath, ClasspathSources};
pub use report::{collect_generated_files, InvocationReport};
pub use request::{
    DuplicateNamespaceError, GenerationRequest, NamespaceBinding, NamespaceMappings,
    DEFAULT_TASK_CLASS,
};
