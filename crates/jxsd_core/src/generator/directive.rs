//! Generator invocation builder.
//!
//! Builds the directive list for a schemagen invocation based on a
//! GenerationRequest and its classpath sources. Handles task arguments,
//! namespace bindings, source filters, and the execution classpath.
//!
//! # Directive Order
//!
//! The generator consumes directives positionally, so order is part of
//! the contract:
//!
//! - Task arguments first: `destdir`, `srcdir`, `includeantruntime`,
//!   then `episode` only when one was requested
//! - Namespace bindings in request order
//! - Include patterns, then exclude patterns, each in request order
//! - The merged execution classpath last

use crate::model::{ClasspathSources, GenerationRequest};

/// Name the generator task is registered under.
pub const TASK_NAME: &str = "schemagen";

/// A single instruction handed to the generator task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// A plain task argument.
    Argument { name: String, value: String },
    /// A namespace-to-file schema binding.
    BindSchema { namespace: String, file: String },
    /// A source inclusion pattern.
    Include(String),
    /// A source exclusion pattern.
    Exclude(String),
    /// An entry of the execution classpath.
    ClasspathElement(String),
}

/// Registration of the generator task with the host tool.
///
/// The registration classpath is the tool classpath only. Compile and
/// addition entries join the task later through the execution
/// classpath, never the registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRegistration {
    /// Name the task is invoked as.
    pub task_name: String,
    /// Fully qualified task implementation class.
    pub class_name: String,
    /// Classpath the implementation class is loaded from.
    pub classpath: String,
}

/// A fully composed generator invocation: the task registration plus
/// the ordered directive list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInvocation {
    pub registration: TaskRegistration,
    pub directives: Vec<Directive>,
}

impl GeneratorInvocation {
    /// Iterates over the plain task arguments, in order.
    pub fn arguments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.directives.iter().filter_map(|d| match d {
            Directive::Argument { name, value } => Some((name.as_str(), value.as_str())),
            _ => None,
        })
    }
}

/// Builder for a generator invocation.
///
/// Borrows the request and classpath sources; `build` produces the
/// directive list in contract order.
pub struct InvocationBuilder<'a> {
    request: &'a GenerationRequest,
    classpaths: &'a ClasspathSources,
}

impl<'a> InvocationBuilder<'a> {
    pub fn new(request: &'a GenerationRequest, classpaths: &'a ClasspathSources) -> Self {
        Self {
            request,
            classpaths,
        }
    }

    /// Build the complete invocation.
    pub fn build(&self) -> GeneratorInvocation {
        let mut directives = Vec::new();

        self.add_arguments(&mut directives);
        self.add_schema_bindings(&mut directives);
        self.add_filters(&mut directives);
        self.add_execution_classpath(&mut directives);

        GeneratorInvocation {
            registration: TaskRegistration {
                task_name: TASK_NAME.to_string(),
                class_name: self.request.task_class.clone(),
                classpath: self.classpaths.tool.as_path_string(),
            },
            directives,
        }
    }

    /// Add the plain task arguments.
    fn add_arguments(&self, directives: &mut Vec<Directive>) {
        directives.push(argument(
            "destdir",
            self.request.output_dir.to_string_lossy(),
        ));
        directives.push(argument("srcdir", self.request.input_dir.to_string_lossy()));
        directives.push(argument("includeantruntime", "false"));

        // A blank episode value means no episode file at all, not an
        // episode file with an empty path.
        if self.request.episode_enabled() {
            directives.push(argument("episode", self.request.episode.trim()));
        }
    }

    /// Add one bind directive per namespace mapping, in request order.
    fn add_schema_bindings(&self, directives: &mut Vec<Directive>) {
        for binding in &self.request.schemas {
            directives.push(Directive::BindSchema {
                namespace: binding.namespace.clone(),
                file: binding.file.clone(),
            });
        }
    }

    /// Add include patterns, then exclude patterns.
    ///
    /// No catch-all include is injected when the include list is empty;
    /// the generator's own default selection applies.
    fn add_filters(&self, directives: &mut Vec<Directive>) {
        for pattern in &self.request.includes {
            directives.push(Directive::Include(pattern.clone()));
        }
        for pattern in &self.request.excludes {
            directives.push(Directive::Exclude(pattern.clone()));
        }
    }

    /// Add the merged execution classpath as the final directive.
    fn add_execution_classpath(&self, directives: &mut Vec<Directive>) {
        directives.push(Directive::ClasspathElement(
            self.classpaths.merged().as_path_string(),
        ));
    }
}

fn argument(name: &str, value: impl AsRef<str>) -> Directive {
    Directive::Argument {
        name: name.to_string(),
        value: value.as_ref().to_string(),
    }
}

/// Format an invocation for readable display (one directive per line).
pub fn format_directives_pretty(invocation: &GeneratorInvocation) -> String {
    let mut result = String::new();
    result.push_str(&format!(
        "taskdef {} = {}\n",
        invocation.registration.task_name, invocation.registration.class_name
    ));

    for directive in &invocation.directives {
        match directive {
            Directive::Argument { name, value } => {
                result.push_str(&format!("  {} = {}\n", name, value));
            }
            Directive::BindSchema { namespace, file } => {
                result.push_str(&format!("  schema {} -> {}\n", namespace, file));
            }
            Directive::Include(pattern) => {
                result.push_str(&format!("  include {}\n", pattern));
            }
            Directive::Exclude(pattern) => {
                result.push_str(&format!("  exclude {}\n", pattern));
            }
            Directive::ClasspathElement(path) => {
                result.push_str(&format!("  classpath {}\n", path));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classpath, NamespaceBinding, NamespaceMappings};
    use std::path::PathBuf;

    fn make_test_request() -> GenerationRequest {
        GenerationRequest::new("/project/src/main/java", "/project/build/schemas")
    }

    fn make_test_classpaths() -> ClasspathSources {
        ClasspathSources::new()
            .with_compile(Classpath::from_entries([PathBuf::from("classes")]))
            .with_tool(Classpath::from_entries([PathBuf::from("jaxb-xjc.jar")]))
            .with_tool_additions(Classpath::from_entries([PathBuf::from("extra.jar")]))
    }

    fn argument_names(invocation: &GeneratorInvocation) -> Vec<&str> {
        invocation.arguments().map(|(name, _)| name).collect()
    }

    #[test]
    fn builds_base_arguments_in_order() {
        let request = make_test_request();
        let classpaths = make_test_classpaths();

        let invocation = InvocationBuilder::new(&request, &classpaths).build();

        assert_eq!(
            argument_names(&invocation),
            vec!["destdir", "srcdir", "includeantruntime"]
        );
        assert!(invocation
            .arguments()
            .any(|(name, value)| name == "includeantruntime" && value == "false"));
    }

    #[test]
    fn blank_episode_omits_argument() {
        let request = make_test_request().with_episode("   ");
        let classpaths = make_test_classpaths();

        let invocation = InvocationBuilder::new(&request, &classpaths).build();

        assert!(!argument_names(&invocation).contains(&"episode"));
    }

    #[test]
    fn episode_argument_follows_base_arguments() {
        let request = make_test_request().with_episode("build/sun-jaxb.episode");
        let classpaths = make_test_classpaths();

        let invocation = InvocationBuilder::new(&request, &classpaths).build();

        assert_eq!(
            argument_names(&invocation),
            vec!["destdir", "srcdir", "includeantruntime", "episode"]
        );
    }

    #[test]
    fn registration_uses_tool_classpath_only() {
        let request = make_test_request();
        let classpaths = make_test_classpaths();

        let invocation = InvocationBuilder::new(&request, &classpaths).build();

        assert_eq!(invocation.registration.classpath, "jaxb-xjc.jar");
        assert_eq!(
            invocation.registration.class_name,
            "com.sun.tools.jxc.SchemaGenTask"
        );
    }

    #[test]
    fn execution_classpath_is_last_and_merged() {
        let request = make_test_request();
        let classpaths = make_test_classpaths();

        let invocation = InvocationBuilder::new(&request, &classpaths).build();

        let last = invocation.directives.last().unwrap();
        let sep = crate::model::path_list_separator();
        assert_eq!(
            *last,
            Directive::ClasspathElement(format!("classes{sep}jaxb-xjc.jar{sep}extra.jar"))
        );
    }

    #[test]
    fn bindings_precede_filters_in_request_order() {
        let schemas = NamespaceMappings::from_bindings([
            NamespaceBinding::new("http://b.example.com", "b.xsd"),
            NamespaceBinding::new("http://a.example.com", "a.xsd"),
        ])
        .unwrap();
        let request = make_test_request()
            .with_schemas(schemas)
            .with_includes(vec!["**/api/*.java".to_string()])
            .with_excludes(vec!["**/internal/*.java".to_string()]);
        let classpaths = make_test_classpaths();

        let invocation = InvocationBuilder::new(&request, &classpaths).build();

        let shaped: Vec<&Directive> = invocation
            .directives
            .iter()
            .filter(|d| !matches!(d, Directive::Argument { .. }))
            .collect();
        assert!(matches!(shaped[0], Directive::BindSchema { file, .. } if file == "b.xsd"));
        assert!(matches!(shaped[1], Directive::BindSchema { file, .. } if file == "a.xsd"));
        assert!(matches!(shaped[2], Directive::Include(p) if p == "**/api/*.java"));
        assert!(matches!(shaped[3], Directive::Exclude(p) if p == "**/internal/*.java"));
        assert!(matches!(shaped[4], Directive::ClasspathElement(_)));
    }

    #[test]
    fn filters_keep_their_own_orders() {
        let request = make_test_request()
            .with_includes(vec!["**/api/*.java".to_string(), "**/model/*.java".to_string()])
            .with_excludes(vec!["**/Test*.java".to_string(), "**/internal/*.java".to_string()]);
        let classpaths = make_test_classpaths();

        let invocation = InvocationBuilder::new(&request, &classpaths).build();

        let includes: Vec<&str> = invocation
            .directives
            .iter()
            .filter_map(|d| match d {
                Directive::Include(p) => Some(p.as_str()),
                _ => None,
            })
            .collect();
        let excludes: Vec<&str> = invocation
            .directives
            .iter()
            .filter_map(|d| match d {
                Directive::Exclude(p) => Some(p.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(includes, vec!["**/api/*.java", "**/model/*.java"]);
        assert_eq!(excludes, vec!["**/Test*.java", "**/internal/*.java"]);
    }

    #[test]
    fn rebuilding_yields_identical_invocation() {
        let schemas = NamespaceMappings::from_bindings([NamespaceBinding::new(
            "http://example.com/orders",
            "orders.xsd",
        )])
        .unwrap();
        let request = make_test_request()
            .with_schemas(schemas)
            .with_episode("build/sun-jaxb.episode");
        let classpaths = make_test_classpaths();

        let first = InvocationBuilder::new(&request, &classpaths).build();
        let second = InvocationBuilder::new(&request, &classpaths).build();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_includes_add_no_catch_all() {
        let request = make_test_request();
        let classpaths = make_test_classpaths();

        let invocation = InvocationBuilder::new(&request, &classpaths).build();

        assert!(!invocation
            .directives
            .iter()
            .any(|d| matches!(d, Directive::Include(_))));
    }

    #[test]
    fn pretty_format_lists_every_directive() {
        let request = make_test_request().with_episode("ep.episode");
        let classpaths = make_test_classpaths();
        let invocation = InvocationBuilder::new(&request, &classpaths).build();

        let pretty = format_directives_pretty(&invocation);
        assert!(pretty.contains("taskdef schemagen"));
        assert!(pretty.contains("destdir = /project/build/schemas"));
        assert!(pretty.contains("episode = ep.episode"));
        assert!(pretty.contains("classpath "));
    }
}
