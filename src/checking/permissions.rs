//! Permissions must be declared in the manifest before either the catalog
//! or the plugin code may rely on them.

use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

use crate::loading::Source;
use crate::parsing::{calls, parse_single_literal, CallMarker};
use crate::problem::{Finding, Locator};

/// Call sites whose single literal argument names a permission.
pub const PERMISSION_CALLS: &[&str] = &["hasPermission", "setPermission", "permission"];

/// Extensions of plugin source files scanned for permission checks.
pub const SOURCE_EXTENSIONS: &[&str] = &["java", "kt"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionProblem {
    Missing(Vec<String>),
    NoSources(String),
    NoSection,
}

impl PermissionProblem {
    pub fn message(&self) -> String {
        match self {
            PermissionProblem::Missing(names) => {
                format!("missing permissions: {}", names.join(", "))
            }
            PermissionProblem::NoSources(root) => {
                format!("no plugin sources found under {}", root)
            }
            PermissionProblem::NoSection => "no permissions section".to_string(),
        }
    }
}

/// Where permission names come from. Declarations beyond what is required
/// are tolerated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionUniverse {
    pub declared: BTreeSet<String>,
    pub catalog: BTreeSet<String>,
    pub code: BTreeSet<String>,
}

impl PermissionUniverse {
    pub fn required(&self) -> BTreeSet<String> {
        self.catalog
            .union(&self.code)
            .cloned()
            .collect()
    }

    /// Required but not declared, in sorted order.
    pub fn missing(&self) -> Vec<String> {
        self.required()
            .difference(&self.declared)
            .cloned()
            .collect()
    }
}

/// Permission names referenced in one source file.
pub fn code_permissions(text: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();

    for name in PERMISSION_CALLS {
        for (_, arguments) in calls(text, CallMarker::call(name)) {
            let [argument] = arguments.as_slice() else {
                continue;
            };
            if let Some(literal) = parse_single_literal(argument) {
                let value = literal
                    .value
                    .trim();
                if !value.is_empty() {
                    found.insert(value.to_string());
                }
            }
        }
    }

    found
}

/// Permission names referenced anywhere in the source tree. Files that
/// cannot be read are skipped.
pub fn scan_sources(source: &impl Source, root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();

    for path in source.walk(root, SOURCE_EXTENSIONS) {
        match source.read(&path) {
            Ok(text) => found.extend(code_permissions(&text)),
            Err(error) => debug!("Skipping {}: {}", path.display(), error),
        }
    }

    debug!("Code references {} permissions", found.len());
    found
}

/// The single error listing every missing permission, if there are any.
pub fn validate_permissions(universe: &PermissionUniverse, artifact: &str) -> Vec<Finding> {
    let missing = universe.missing();
    if missing.is_empty() {
        Vec::new()
    } else {
        vec![Finding::error(
            Locator::artifact(artifact),
            PermissionProblem::Missing(missing),
        )]
    }
}
