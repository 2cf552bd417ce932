//! Ant build file rendering.
//!
//! Turns a composed invocation into a minimal single-target Ant build
//! file: a `taskdef` registering the generator task, followed by the
//! task element itself with its nested directives. Rendering is pure
//! so the exact XML can be tested without launching anything.

use crate::generator::directive::{Directive, GeneratorInvocation};

/// Render an invocation as a complete Ant build file.
///
/// Task arguments become attributes on the task element; bindings and
/// filters become nested elements in directive order; classpath
/// entries are grouped into a single nested `<classpath>` at the end.
pub fn render(invocation: &GeneratorInvocation) -> String {
    let registration = &invocation.registration;
    let mut xml = String::new();

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<project name=\"schema-generation\" default=\"generate\" basedir=\".\">\n");
    xml.push_str("  <target name=\"generate\">\n");
    xml.push_str(&format!(
        "    <taskdef name=\"{}\" classname=\"{}\" classpath=\"{}\"/>\n",
        escape(&registration.task_name),
        escape(&registration.class_name),
        escape(&registration.classpath)
    ));

    xml.push_str(&format!("    <{}", escape(&registration.task_name)));
    for (name, value) in invocation.arguments() {
        xml.push_str(&format!(" {}=\"{}\"", name, escape(value)));
    }
    xml.push_str(">\n");

    for directive in &invocation.directives {
        match directive {
            Directive::BindSchema { namespace, file } => {
                xml.push_str(&format!(
                    "      <schema namespace=\"{}\" file=\"{}\"/>\n",
                    escape(namespace),
                    escape(file)
                ));
            }
            Directive::Include(pattern) => {
                xml.push_str(&format!("      <include name=\"{}\"/>\n", escape(pattern)));
            }
            Directive::Exclude(pattern) => {
                xml.push_str(&format!("      <exclude name=\"{}\"/>\n", escape(pattern)));
            }
            Directive::Argument { .. } | Directive::ClasspathElement(_) => {}
        }
    }

    let classpath_entries: Vec<&str> = invocation
        .directives
        .iter()
        .filter_map(|d| match d {
            Directive::ClasspathElement(path) => Some(path.as_str()),
            _ => None,
        })
        .collect();
    if !classpath_entries.is_empty() {
        xml.push_str("      <classpath>\n");
        for path in classpath_entries {
            xml.push_str(&format!(
                "        <pathelement path=\"{}\"/>\n",
                escape(path)
            ));
        }
        xml.push_str("      </classpath>\n");
    }

    xml.push_str(&format!("    </{}>\n", escape(&registration.task_name)));
    xml.push_str("  </target>\n");
    xml.push_str("</project>\n");
    xml
}

/// Escape a value for use inside an XML attribute.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
