//! Declared permissions from a plugin manifest. Only the indentation
//! structure is read: the `permissions:` section header, then every key
//! indented by exactly two spaces until the first line that is not.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub permissions: BTreeSet<String>,
    pub has_section: bool,
}

pub fn parse_manifest(text: &str) -> Manifest {
    let mut manifest = Manifest::default();

    for line in text.lines() {
        if !manifest.has_section {
            if crate::regex!(r"^permissions\s*:\s*$").is_match(line.trim()) {
                manifest.has_section = true;
            }
            continue;
        }

        if !line.starts_with("  ") {
            break;
        }

        if let Some(cap) = crate::regex!(r"^\s{2}([A-Za-z0-9_.-]+)\s*:\s*$").captures(line) {
            if let Some(name) = cap.get(1) {
                manifest
                    .permissions
                    .insert(
                        name.as_str()
                            .to_string(),
                    );
            }
        }
    }

    manifest
}
