//! Generation request types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Generator task implementation used when the request does not name one.
pub const DEFAULT_TASK_CLASS: &str = "com.sun.tools.jxc.SchemaGenTask";

/// A single namespace-to-file binding.
///
/// The generator writes the schema for `namespace` into `file` (a name
/// relative to the output directory, not a path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceBinding {
    /// XML namespace URI.
    pub namespace: String,
    /// Schema file name the namespace is written to.
    pub file: String,
}

impl NamespaceBinding {
    pub fn new(namespace: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            file: file.into(),
        }
    }
}

/// Error returned when a namespace is bound twice.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Duplicate namespace mapping: {0}")]
pub struct DuplicateNamespaceError(pub String);

/// Ordered set of namespace bindings, unique by namespace.
///
/// Insertion order is preserved; it determines the order of the bind
/// directives handed to the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMappings {
    bindings: Vec<NamespaceBinding>,
}

impl NamespaceMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds mappings from a binding list, rejecting duplicate namespaces.
    pub fn from_bindings(
        bindings: impl IntoIterator<Item = NamespaceBinding>,
    ) -> Result<Self, DuplicateNamespaceError> {
        let mut mappings = Self::new();
        for binding in bindings {
            mappings.insert(binding)?;
        }
        Ok(mappings)
    }

    /// Appends a binding, rejecting a namespace that is already bound.
    pub fn insert(&mut self, binding: NamespaceBinding) -> Result<(), DuplicateNamespaceError> {
        if self.bindings.iter().any(|b| b.namespace == binding.namespace) {
            return Err(DuplicateNamespaceError(binding.namespace));
        }
        self.bindings.push(binding);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamespaceBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<'a> IntoIterator for &'a NamespaceMappings {
    type Item = &'a NamespaceBinding;
    type IntoIter = std::slice::Iter<'a, NamespaceBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

/// Everything a single generator run needs besides the classpaths.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Root directory of the annotated Java sources.
    pub input_dir: PathBuf,
    /// Directory the schema files are written into.
    pub output_dir: PathBuf,
    /// Source inclusion patterns, in order. Empty means "all sources".
    pub includes: Vec<String>,
    /// Source exclusion patterns, in order.
    pub excludes: Vec<String>,
    /// Namespace-to-file bindings, in order.
    pub schemas: NamespaceMappings,
    /// Episode file path. Blank disables episode output.
    pub episode: String,
    /// Fully qualified generator task class.
    pub task_class: String,
}

impl GenerationRequest {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            includes: Vec::new(),
            excludes: Vec::new(),
            schemas: NamespaceMappings::new(),
            episode: String::new(),
            task_class: DEFAULT_TASK_CLASS.to_string(),
        }
    }

    pub fn with_includes(mut self, includes: Vec<String>) -> Self {
        self.includes = includes;
        self
    }

    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }

    pub fn with_schemas(mut self, schemas: NamespaceMappings) -> Self {
        self.schemas = schemas;
        self
    }

    pub fn with_episode(mut self, episode: impl Into<String>) -> Self {
        self.episode = episode.into();
        self
    }

    pub fn with_task_class(mut self, task_class: impl Into<String>) -> Self {
        self.task_class = task_class.into();
        self
    }

    /// Whether an episode file was requested. Blank and whitespace-only
    /// values disable episode output entirely.
    pub fn episode_enabled(&self) -> bool {
        !self.episode.trim().is_empty()
    }

    /// Whether the request overrides the stock generator task class.
    pub fn uses_custom_task_class(&self) -> bool {
        self.task_class != DEFAULT_TASK_CLASS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mappings_preserve_insertion_order() {
        let mappings = NamespaceMappings::from_bindings([
            NamespaceBinding::new("http://b.example.com", "b.xsd"),
            NamespaceBinding::new("http://a.example.com", "a.xsd"),
        ])
        .unwrap();

        let files: Vec<_> = mappings.iter().map(|b| b.file.as_str()).collect();
        assert_eq!(files, vec!["b.xsd", "a.xsd"]);
    }

    #[test]
    fn mappings_reject_duplicate_namespace() {
        let mut mappings = NamespaceMappings::new();
        mappings
            .insert(NamespaceBinding::new("http://example.com/ns", "one.xsd"))
            .unwrap();

        let err = mappings
            .insert(NamespaceBinding::new("http://example.com/ns", "two.xsd"))
            .unwrap_err();
        assert!(err.to_string().contains("http://example.com/ns"));
        assert_eq!(mappings.len(), 1);
    }

    #[test]
    fn same_file_for_two_namespaces_is_allowed() {
        let mappings = NamespaceMappings::from_bindings([
            NamespaceBinding::new("http://a.example.com", "shared.xsd"),
            NamespaceBinding::new("http://b.example.com", "shared.xsd"),
        ]);
        assert!(mappings.is_ok());
    }

    #[test]
    fn blank_episode_is_disabled() {
        let request = GenerationRequest::new("src", "out");
        assert!(!request.episode_enabled());

        let request = request.with_episode("   ");
        assert!(!request.episode_enabled());

        let request = request.with_episode("build/sun-jaxb.episode");
        assert!(request.episode_enabled());
    }

    #[test]
    fn default_task_class_is_not_custom() {
        let request = GenerationRequest::new("src", "out");
        assert!(!request.uses_custom_task_class());

        let request = request.with_task_class("com.example.MySchemaGen");
        assert!(request.uses_custom_task_class());
    }
}
