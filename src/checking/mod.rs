//! The individual artifact checkers and the audit that runs them all.

mod cards;
mod catalog;
mod contract;
mod manifest;
mod permissions;
mod recipes;

// Re-export all public symbols
pub use cards::*;
pub use catalog::*;
pub use contract::*;
pub use manifest::*;
pub use permissions::*;
pub use recipes::*;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::loading::Source;
use crate::problem::{Finding, Locator, Report};

/// Where each artifact lives, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub catalog: PathBuf,
    pub cards: PathBuf,
    pub client: PathBuf,
    pub server: PathBuf,
    pub manifest: PathBuf,
    pub sources: PathBuf,
    /// Tried in order when the server file is not where `server` says.
    pub server_fallbacks: Vec<PathBuf>,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            catalog: PathBuf::from("axiom-mod-integration/src/main/java/com/axiom/ui/CommandCatalog.java"),
            cards: PathBuf::from("axiom-mod-integration/src/main/resources/assets/axiomui/religions.json"),
            client: PathBuf::from("axiom-mod-integration/src/main/java/com/axiom/ui/AxiomUiClientEvents.java"),
            server: PathBuf::from("axiom-plugin/src/main/java/com/axiom/infra/network/ModCommunicationHandler.java"),
            manifest: PathBuf::from("axiom-plugin/src/main/resources/plugin.yml"),
            sources: PathBuf::from("axiom-plugin/src/main/java"),
            server_fallbacks: vec![
                PathBuf::from("axiom-plugin/src/main/java/com/axiom/infra/network/ModCommunicationHandler.java"),
                PathBuf::from("axiom-plugin/src/main/java/com/axiom/network/ModCommunicationHandler.java"),
            ],
        }
    }
}

impl Layout {
    /// The configured server file if it exists, otherwise the first
    /// fallback that does. With none present the configured path is kept,
    /// so that reading it reports the failure.
    pub fn resolve_server<'l>(&'l self, source: &impl Source) -> &'l Path {
        if source.exists(&self.server) {
            return self
                .server
                .as_path();
        }

        match self
            .server_fallbacks
            .iter()
            .find(|path| source.exists(path))
        {
            Some(path) => {
                debug!("Using server file {}", path.display());
                path.as_path()
            }
            None => self
                .server
                .as_path(),
        }
    }
}

/// How a path is named in findings: its file name, or the whole path if
/// it has none.
pub fn label(path: &Path) -> String {
    path.file_name()
        .map(|name| {
            name.to_string_lossy()
                .into_owned()
        })
        .unwrap_or_else(|| {
            path.display()
                .to_string()
        })
}

fn read(source: &impl Source, path: &Path, report: &mut Report) -> Option<String> {
    match source.read(path) {
        Ok(text) => Some(text),
        Err(error) => {
            debug!(?error);
            report.push(Finding::error(Locator::artifact(&label(path)), &error));
            None
        }
    }
}

/// Run every check against the artifacts at the given layout. Each
/// artifact is read exactly once; an artifact that cannot be read is
/// reported and the checks depending on it are skipped, but everything
/// else still runs.
pub fn audit(source: &impl Source, layout: &Layout) -> Report {
    let mut report = Report::new();

    let shape = CatalogShape::default();
    let catalog = match read(source, &layout.catalog, &mut report) {
        Some(text) => validate_catalog(&text, &shape),
        None => Catalog::default(),
    };
    info!(
        "Catalog: {} commands, {} findings",
        catalog
            .records
            .len(),
        catalog
            .findings
            .len()
    );
    report.extend(catalog.findings);

    if let Some(text) = read(source, &layout.cards, &mut report) {
        let cards = validate_cards(&text, &label(&layout.cards));
        info!(
            "Cards: {} cards, {} findings",
            cards
                .records
                .len(),
            cards
                .findings
                .len()
        );
        report.extend(cards.findings);
    }

    let server = layout.resolve_server(source);
    let client_text = read(source, &layout.client, &mut report);
    let server_text = read(source, server, &mut report);
    if let (Some(client), Some(server)) = (client_text, server_text) {
        let findings = validate_contract(&client, &server);
        info!("Contract: {} findings", findings.len());
        report.extend(findings);
    }

    let manifest_label = label(&layout.manifest);
    let manifest = read(source, &layout.manifest, &mut report).map(|text| parse_manifest(&text));

    if !source.exists(&layout.sources) {
        report.push(Finding::warning(
            Locator::artifact(&manifest_label),
            PermissionProblem::NoSources(
                layout
                    .sources
                    .display()
                    .to_string(),
            ),
        ));
    }
    let code = scan_sources(source, &layout.sources);

    // An unreadable manifest declares nothing, so everything required is
    // still reported missing.
    let manifest = manifest.unwrap_or_else(|| Manifest {
        permissions: BTreeSet::new(),
        has_section: true,
    });
    if !manifest.has_section {
        report.push(Finding::warning(
            Locator::artifact(&manifest_label),
            PermissionProblem::NoSection,
        ));
    }

    let universe = PermissionUniverse {
        declared: manifest.permissions,
        catalog: catalog.permissions,
        code,
    };
    let findings = validate_permissions(&universe, &manifest_label);
    info!(
        "Permissions: {} required, {} declared, {} missing",
        universe
            .required()
            .len(),
        universe
            .declared
            .len(),
        universe
            .missing()
            .len()
    );
    report.extend(findings);

    report
}
