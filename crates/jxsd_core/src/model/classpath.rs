//! Classpath collections and composition.

use std::path::PathBuf;

/// Platform path-list separator, as the JVM expects it.
pub fn path_list_separator() -> char {
    if cfg!(windows) {
        ';'
    } else {
        ':'
    }
}

/// An ordered list of classpath entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classpath {
    entries: Vec<PathBuf>,
}

impl Classpath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn push(&mut self, entry: impl Into<PathBuf>) {
        self.entries.push(entry.into());
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Renders the entries as a single platform path list.
    pub fn as_path_string(&self) -> String {
        let separator = path_list_separator().to_string();
        self.entries
            .iter()
            .map(|entry| entry.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(&separator)
    }

    /// Appends every entry of `other`, keeping duplicates.
    pub fn extend_from(&mut self, other: &Classpath) {
        self.entries.extend(other.entries.iter().cloned());
    }
}

impl FromIterator<PathBuf> for Classpath {
    fn from_iter<T: IntoIterator<Item = PathBuf>>(iter: T) -> Self {
        Self::from_entries(iter)
    }
}

/// The three classpath sources a generator run draws from.
///
/// `tool` carries the generator task implementation itself and is the
/// only classpath used to register the task. The merged execution
/// classpath is `compile` followed by `tool` followed by
/// `tool_additions`; entries are never deduplicated.
#[derive(Debug, Clone, Default)]
pub struct ClasspathSources {
    /// Compiled application classes and their dependencies.
    pub compile: Classpath,
    /// The generator tool and its runtime.
    pub tool: Classpath,
    /// Extra entries appended after the tool classpath.
    pub tool_additions: Classpath,
}

impl ClasspathSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compile(mut self, compile: Classpath) -> Self {
        self.compile = compile;
        self
    }

    pub fn with_tool(mut self, tool: Classpath) -> Self {
        self.tool = tool;
        self
    }

    pub fn with_tool_additions(mut self, tool_additions: Classpath) -> Self {
        self.tool_additions = tool_additions;
        self
    }

    /// Composes the execution classpath: compile, then tool, then
    /// additions, in source order with duplicates preserved.
    pub fn merged(&self) -> Classpath {
        let mut merged = Classpath::new();
        merged.extend_from(&self.compile);
        merged.extend_from(&self.tool);
        merged.extend_from(&self.tool_additions);
        merged
    }
}
