//! Named text resources and inclusion-marker expansion.
//!
//! A lesson bundle is a set of named text resources. Screen scripts live at
//! `states/NAME.state`; anything may pull in another resource with
//! `<!-- Inject NAME -->`, which is replaced by that resource's (expanded)
//! text before parsing.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{AutomatonError, AutomatonResult};

/// Opening inclusion marker.
pub const INJECT_OPEN: &str = "<!-- Inject ";
/// Closing inclusion marker.
pub const INJECT_CLOSE: &str = "-->";

/// Resource name of a screen's script.
pub fn screen_resource(screen: &str) -> String {
    format!("states/{screen}.state")
}

/// Something that can hand out resource text by name.
pub trait ScriptSource {
    /// Raw text of the named resource.
    fn read(&self, name: &str) -> AutomatonResult<String>;

    /// All resource names, sorted.
    fn names(&self) -> Vec<String>;

    /// Names of every screen script (`states/NAME.state` -> `NAME`).
    fn screens(&self) -> Vec<String> {
        self.names()
            .iter()
            .filter_map(|n| n.strip_prefix("states/")?.strip_suffix(".state"))
            .map(str::to_string)
            .collect()
    }
}

/// In-memory resources.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(name.into(), text.into());
    }

    /// Add a resource (builder pattern).
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    /// Add a screen script under `states/NAME.state`.
    pub fn with_screen(self, screen: &str, text: impl Into<String>) -> Self {
        self.with(screen_resource(screen), text)
    }
}

impl ScriptSource for MemorySource {
    fn read(&self, name: &str) -> AutomatonResult<String> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| AutomatonError::ResourceNotFound {
                name: name.to_string(),
            })
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Resources loaded from files under a root directory.
///
/// Names are paths relative to the root with `/` separators. Everything is
/// read up front so a running session never touches the filesystem.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    files: MemorySource,
}

impl DirectorySource {
    /// Load every regular file below `root`.
    pub fn load(root: impl AsRef<Path>) -> AutomatonResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(AutomatonError::ResourceNotFound {
                name: root.display().to_string(),
            });
        }

        let mut files = MemorySource::new();
        for entry in WalkDir::new(&root).follow_links(true) {
            let entry = entry.map_err(|e| AutomatonError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&root) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let text = std::fs::read_to_string(entry.path())?;
            debug!(resource = %name, bytes = text.len(), "resource_loaded");
            files.insert(name, text);
        }

        info!(root = %root.display(), resources = files.entries.len(), "bundle_loaded");
        Ok(Self { files })
    }
}

impl ScriptSource for DirectorySource {
    fn read(&self, name: &str) -> AutomatonResult<String> {
        self.files.read(name)
    }

    fn names(&self) -> Vec<String> {
        self.files.names()
    }
}

/// Read a resource and expand every inclusion marker in it, recursively.
pub fn read_expanded(source: &dyn ScriptSource, name: &str) -> AutomatonResult<String> {
    let mut chain = Vec::new();
    expand_resource(source, name, &mut chain)
}

fn expand_resource(
    source: &dyn ScriptSource,
    name: &str,
    chain: &mut Vec<String>,
) -> AutomatonResult<String> {
    if chain.iter().any(|n| n == name) {
        let mut cycle = chain.clone();
        cycle.push(name.to_string());
        return Err(AutomatonError::InclusionCycle { chain: cycle });
    }

    let text = source.read(name)?;
    chain.push(name.to_string());
    let expanded = expand_text(source, name, &text, chain)?;
    chain.pop();
    Ok(expanded)
}

fn expand_text(
    source: &dyn ScriptSource,
    resource: &str,
    text: &str,
    chain: &mut Vec<String>,
) -> AutomatonResult<String> {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(site) = rest.find(INJECT_OPEN) {
        result.push_str(&rest[..site]);

        let after_open = &rest[site + INJECT_OPEN.len()..];
        let close = after_open
            .find(INJECT_CLOSE)
            .ok_or_else(|| AutomatonError::UnterminatedInclusion {
                resource: resource.to_string(),
            })?;

        let included = after_open[..close].trim();
        result.push_str(&expand_resource(source, included, chain)?);
        rest = &after_open[close + INJECT_CLOSE.len()..];
    }

    result.push_str(rest);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_unchanged() {
        let source = MemorySource::new().with("a", "hello\nworld");
        assert_eq!(read_expanded(&source, "a").unwrap(), "hello\nworld");
    }

    #[test]
    fn test_nested_inclusion() {
        let source = MemorySource::new()
            .with("page", "<p><!-- Inject header --></p>!")
            .with("header", "[<!-- Inject  title  -->]")
            .with("title", "Stars");
        assert_eq!(read_expanded(&source, "page").unwrap(), "<p>[Stars]</p>!");
    }

    #[test]
    fn test_same_resource_twice_is_not_a_cycle() {
        let source = MemorySource::new()
            .with("page", "<!-- Inject x --> and <!-- Inject x -->")
            .with("x", "X");
        assert_eq!(read_expanded(&source, "page").unwrap(), "X and X");
    }

    #[test]
    fn test_unterminated_marker() {
        let source = MemorySource::new().with("page", "before <!-- Inject oops");
        assert!(matches!(
            read_expanded(&source, "page"),
            Err(AutomatonError::UnterminatedInclusion { resource }) if resource == "page"
        ));
    }

    #[test]
    fn test_cycle_is_reported() {
        let source = MemorySource::new()
            .with("a", "<!-- Inject b -->")
            .with("b", "<!-- Inject a -->");
        match read_expanded(&source, "a") {
            Err(AutomatonError::InclusionCycle { chain }) => {
                assert_eq!(chain, vec!["a", "b", "a"]);
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_include() {
        let source = MemorySource::new().with("a", "<!-- Inject nope -->");
        assert!(matches!(
            read_expanded(&source, "a"),
            Err(AutomatonError::ResourceNotFound { name }) if name == "nope"
        ));
    }

    #[test]
    fn test_screens_lists_state_scripts() {
        let source = MemorySource::new()
            .with_screen("Welcome", "")
            .with_screen("Draw", "")
            .with("html/welcome.html", "");
        assert_eq!(source.screens(), vec!["Draw", "Welcome"]);
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("states")).unwrap();
        std::fs::write(dir.path().join("states/Start.state"), "Reactor X").unwrap();
        std::fs::write(dir.path().join("intro.html"), "hi").unwrap();

        let source = DirectorySource::load(dir.path()).unwrap();
        assert_eq!(source.read("states/Start.state").unwrap(), "Reactor X");
        assert_eq!(source.screens(), vec!["Start"]);
        assert!(source.read("missing").is_err());
    }

    #[test]
    fn test_directory_source_requires_a_directory() {
        assert!(DirectorySource::load("/definitely/not/here").is_err());
    }
}
