use std::fmt;

use crate::checking::{CardProblem, CatalogProblem, ContractProblem, PermissionProblem, RecipeProblem};
use crate::language::LoadingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Violates a required invariant and fails the run.
    Error,
    /// Worth reporting, but never affects the exit status.
    Warning,
}

/// Where a finding applies: a numbered record within an artifact
/// (1-origin, as people count), or an artifact as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Record { artifact: String, index: usize },
    Artifact(String),
}

impl Locator {
    pub fn record(artifact: &str, index: usize) -> Locator {
        Locator::Record {
            artifact: artifact.to_string(),
            index,
        }
    }

    pub fn artifact(artifact: &str) -> Locator {
        Locator::Artifact(artifact.to_string())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Record { artifact, index } => write!(f, "{}[{}]", artifact, index),
            Locator::Artifact(artifact) => write!(f, "{}", artifact),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    Unreadable { problem: String, details: String },
    Catalog(CatalogProblem),
    Card(CardProblem),
    Contract(ContractProblem),
    Permission(PermissionProblem),
    Recipe(RecipeProblem),
}

impl Problem {
    pub fn message(&self) -> String {
        match self {
            Problem::Unreadable { problem, details } => {
                if details.is_empty() {
                    problem.to_lowercase()
                } else {
                    format!("{}: {}", problem.to_lowercase(), details)
                }
            }
            Problem::Catalog(problem) => problem.message(),
            Problem::Card(problem) => problem.message(),
            Problem::Contract(problem) => problem.message(),
            Problem::Permission(problem) => problem.message(),
            Problem::Recipe(problem) => problem.message(),
        }
    }
}

impl From<&LoadingError<'_>> for Problem {
    fn from(error: &LoadingError<'_>) -> Problem {
        Problem::Unreadable {
            problem: error
                .problem
                .clone(),
            details: error
                .details
                .clone(),
        }
    }
}

impl From<CatalogProblem> for Problem {
    fn from(problem: CatalogProblem) -> Problem {
        Problem::Catalog(problem)
    }
}

impl From<CardProblem> for Problem {
    fn from(problem: CardProblem) -> Problem {
        Problem::Card(problem)
    }
}

impl From<ContractProblem> for Problem {
    fn from(problem: ContractProblem) -> Problem {
        Problem::Contract(problem)
    }
}

impl From<PermissionProblem> for Problem {
    fn from(problem: PermissionProblem) -> Problem {
        Problem::Permission(problem)
    }
}

impl From<RecipeProblem> for Problem {
    fn from(problem: RecipeProblem) -> Problem {
        Problem::Recipe(problem)
    }
}

/// One reported inconsistency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub locator: Locator,
    pub problem: Problem,
}

impl Finding {
    pub fn error(locator: Locator, problem: impl Into<Problem>) -> Finding {
        Finding {
            severity: Severity::Error,
            locator,
            problem: problem.into(),
        }
    }

    pub fn warning(locator: Locator, problem: impl Into<Problem>) -> Finding {
        Finding {
            severity: Severity::Warning,
            locator,
            problem: problem.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.locator,
            self.problem
                .message()
        )
    }
}
