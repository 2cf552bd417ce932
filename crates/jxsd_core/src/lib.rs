//! jxsd core - schema generation from Java sources
//!
//! This crate contains the orchestration logic for driving an external
//! Java-to-XSD schema generator (the JAXB `schemagen` Ant task). It turns a
//! declarative description of one generation run - source directory, output
//! directory, include/exclude filters, namespace-to-file bindings, episode
//! file, tool classpath - into a single correctly-ordered invocation of the
//! generator, and surfaces every failure to the caller.
//!
//! The crate has no CLI dependencies; the `jxsd` binary is a thin shim on
//! top of it.

pub mod config;
pub mod generator;
pub mod logging;
pub mod model;
pub mod orchestrator;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
