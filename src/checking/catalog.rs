//! Validation of the command catalog: every `new CommandInfo(...)`
//! declaration in the catalog source, mapped to a CommandRecord.

use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::language::CommandRecord;
use crate::parsing::{calls, parse_single_literal, quoted_literals, CallMarker, StringLiteral};
use crate::problem::{Finding, Locator};

/// Number of constructor arguments in a command declaration.
pub const COMMAND_ARITY: usize = 9;

/// How command declarations are written in the catalog source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogShape<'a> {
    pub artifact: &'a str,
    pub constructor: &'a str,
    pub arity: usize,
    pub category_prefix: &'a str,
}

impl Default for CatalogShape<'_> {
    fn default() -> Self {
        CatalogShape {
            artifact: "CommandCatalog",
            constructor: "CommandInfo",
            arity: COMMAND_ARITY,
            category_prefix: "CommandCategory.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogProblem {
    NoRecords(String),
    Arity { expected: usize, found: usize },
    UnreadableCommand,
    CommandPrefix(String),
    DuplicateCommand { command: String, first: usize },
    EmptyField(&'static str),
    MissingCategory(String),
    EmptyPermission,
    InvalidFlag(String),
    AliasPrefix(String),
    AliasIsCommand(String),
    DuplicateAlias(String),
    AliasCollision { alias: String, first: usize },
    ExamplePrefix(String),
    UnrecognizedEscape { field: &'static str, escape: char },
}

impl CatalogProblem {
    pub fn message(&self) -> String {
        match self {
            CatalogProblem::NoRecords(constructor) => format!("no {} records found", constructor),
            CatalogProblem::Arity { expected, found } => {
                format!("expected {} arguments, found {}", expected, found)
            }
            CatalogProblem::UnreadableCommand => "could not read the command".to_string(),
            CatalogProblem::CommandPrefix(command) => {
                format!("command must start with '/': {}", command)
            }
            CatalogProblem::DuplicateCommand { command, first } => {
                format!("duplicate command '{}' (first declared in #{})", command, first)
            }
            CatalogProblem::EmptyField(field) => format!("empty {}", field),
            CatalogProblem::MissingCategory(token) => format!("category is not set: {}", token),
            CatalogProblem::EmptyPermission => "empty permission".to_string(),
            CatalogProblem::InvalidFlag(value) => {
                format!("requiresNation must be true or false: {}", value)
            }
            CatalogProblem::AliasPrefix(alias) => format!("alias must start with '/': {}", alias),
            CatalogProblem::AliasIsCommand(alias) => {
                format!("alias is the same as the command: {}", alias)
            }
            CatalogProblem::DuplicateAlias(alias) => format!("duplicate alias: {}", alias),
            CatalogProblem::AliasCollision { alias, first } => {
                format!("alias '{}' collides with an existing command (#{})", alias, first)
            }
            CatalogProblem::ExamplePrefix(example) => {
                format!("example must start with '/': {}", example)
            }
            CatalogProblem::UnrecognizedEscape { field, escape } => {
                format!("unrecognized escape '\\{}' in {}", escape, field)
            }
        }
    }
}

/// Commands and aliases share one namespace across the whole catalog. The
/// first record to claim a name owns it; later claims are told who got
/// there first.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    owners: HashMap<String, usize>,
}

impl Namespace {
    pub fn new() -> Namespace {
        Namespace::default()
    }

    /// Claim a name for the given record, or return the index of the
    /// record that already owns it.
    pub fn claim(&mut self, name: &str, index: usize) -> Result<(), usize> {
        match self
            .owners
            .get(name)
        {
            Some(first) => Err(*first),
            None => {
                self.owners
                    .insert(name.to_string(), index);
                Ok(())
            }
        }
    }
}

/// Result of validating a catalog source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub records: Vec<CommandRecord>,
    pub permissions: BTreeSet<String>,
    pub findings: Vec<Finding>,
}

/// Validate every declaration in the catalog source. All problems are
/// collected; nothing stops at the first one.
pub fn validate_catalog(text: &str, shape: &CatalogShape) -> Catalog {
    let mut catalog = Catalog::default();
    let mut namespace = Namespace::new();

    let blocks = calls(text, CallMarker::constructor(shape.constructor));
    if blocks.is_empty() {
        catalog
            .findings
            .push(Finding::error(
                Locator::artifact(shape.artifact),
                CatalogProblem::NoRecords(shape.constructor.to_string()),
            ));
        return catalog;
    }

    for (i, (_, arguments)) in blocks
        .iter()
        .enumerate()
    {
        let mut record = RecordCheck {
            index: i + 1,
            shape,
            findings: &mut catalog.findings,
            permissions: &mut catalog.permissions,
        };

        if let Some(command) = record.validate(arguments, &mut namespace) {
            catalog
                .records
                .push(command);
        }
    }

    debug!(
        "Catalog: {} record{}, {} finding{}",
        catalog
            .records
            .len(),
        if catalog.records.len() == 1 { "" } else { "s" },
        catalog
            .findings
            .len(),
        if catalog.findings.len() == 1 { "" } else { "s" }
    );

    catalog
}

// Validation state for one declaration. A usable permission is recorded
// even when other fields of the declaration are rejected.
struct RecordCheck<'c, 'a> {
    index: usize,
    shape: &'c CatalogShape<'a>,
    findings: &'c mut Vec<Finding>,
    permissions: &'c mut BTreeSet<String>,
}

impl<'c, 'a> RecordCheck<'c, 'a> {
    fn locator(&self) -> Locator {
        Locator::record(self.shape.artifact, self.index)
    }

    fn error(&mut self, problem: CatalogProblem) {
        let finding = Finding::error(self.locator(), problem);
        self.findings
            .push(finding);
    }

    fn warning(&mut self, problem: CatalogProblem) {
        let finding = Finding::warning(self.locator(), problem);
        self.findings
            .push(finding);
    }

    fn literal(&mut self, field: &'static str, argument: &str) -> Option<String> {
        let literal = parse_single_literal(argument)?;
        self.escapes(field, &literal);
        Some(literal.value)
    }

    fn escapes(&mut self, field: &'static str, literal: &StringLiteral) {
        for escape in &literal.unrecognized {
            self.warning(CatalogProblem::UnrecognizedEscape {
                field,
                escape: *escape,
            });
        }
    }

    fn list_field(&mut self, field: &'static str, argument: &str) -> Vec<String> {
        let literals = quoted_literals(argument);
        for literal in &literals {
            self.escapes(field, literal);
        }
        literals
            .into_iter()
            .map(|literal| literal.value)
            .collect()
    }

    fn validate(&mut self, arguments: &[&str], namespace: &mut Namespace) -> Option<CommandRecord> {
        let expected = self
            .shape
            .arity;
        if arguments.len() != expected {
            self.error(CatalogProblem::Arity {
                expected,
                found: arguments.len(),
            });
            return None;
        }

        let command = self.literal("command", arguments[0]);
        let display_name = self.literal("displayName", arguments[1]);
        let short_desc = self.literal("shortDesc", arguments[2]);
        let full_desc = self.literal("fullDesc", arguments[3]);
        let category = arguments[4].trim();
        let aliases = self.list_field("aliases", arguments[5]);
        let examples = self.list_field("examples", arguments[6]);
        let permission = self.literal("permission", arguments[7]);
        let requires_nation = arguments[8].trim();

        match &command {
            Some(command) if !command.is_empty() => {
                if !command.starts_with('/') {
                    self.error(CatalogProblem::CommandPrefix(command.clone()));
                }
                if let Err(first) = namespace.claim(command, self.index) {
                    self.error(CatalogProblem::DuplicateCommand {
                        command: command.clone(),
                        first,
                    });
                }
            }
            _ => self.error(CatalogProblem::UnreadableCommand),
        }

        let display_name = self.nonblank("displayName", display_name);
        let short_desc = self.nonblank("shortDesc", short_desc);
        let full_desc = self.nonblank("fullDesc", full_desc);

        if !self.is_category(category) {
            self.error(CatalogProblem::MissingCategory(category.to_string()));
        }

        let permission = match permission {
            Some(value) if !value
                .trim()
                .is_empty() =>
            {
                self.permissions
                    .insert(
                        value
                            .trim()
                            .to_string(),
                    );
                Some(value)
            }
            _ => {
                self.error(CatalogProblem::EmptyPermission);
                None
            }
        };

        let requires_nation = match requires_nation {
            "true" => Some(true),
            "false" => Some(false),
            other => {
                self.error(CatalogProblem::InvalidFlag(other.to_string()));
                None
            }
        };

        self.check_aliases(command.as_deref(), &aliases, namespace);

        for example in &examples {
            if !example.starts_with('/') {
                self.error(CatalogProblem::ExamplePrefix(example.clone()));
            }
        }

        Some(CommandRecord {
            command: command.filter(|command| !command.is_empty())?,
            display_name: display_name?,
            short_desc: short_desc?,
            full_desc: full_desc?,
            category: category.to_string(),
            aliases,
            examples,
            permission: permission?,
            requires_nation: requires_nation?,
        })
    }

    fn nonblank(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        match value {
            Some(value) if !value
                .trim()
                .is_empty() =>
            {
                Some(value)
            }
            _ => {
                self.error(CatalogProblem::EmptyField(field));
                None
            }
        }
    }

    // The category is an enum constant, not a literal: the qualifying type
    // followed by a Java identifier.
    fn is_category(&self, token: &str) -> bool {
        match token.strip_prefix(self.shape.category_prefix) {
            Some(name) => {
                let mut chars = name.chars();
                chars
                    .next()
                    .is_some_and(|c| c.is_alphabetic() || c == '_')
                    && chars.all(|c| c.is_alphanumeric() || c == '_')
            }
            None => false,
        }
    }

    fn check_aliases(&mut self, command: Option<&str>, aliases: &[String], namespace: &mut Namespace) {
        let mut seen = BTreeSet::new();

        for alias in aliases {
            if !alias.starts_with('/') {
                self.error(CatalogProblem::AliasPrefix(alias.clone()));
            }
            if Some(alias.as_str()) == command {
                self.error(CatalogProblem::AliasIsCommand(alias.clone()));
            }
            if !seen.insert(alias.as_str()) {
                self.error(CatalogProblem::DuplicateAlias(alias.clone()));
            }

            // A name already owned by this same record has been reported
            // above as a self-collision or a repeated alias.
            if let Err(first) = namespace.claim(alias, self.index) {
                if first != self.index {
                    self.error(CatalogProblem::AliasCollision {
                        alias: alias.clone(),
                        first,
                    });
                }
            }
        }
    }
}
