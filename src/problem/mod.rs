// Findings accumulated across a validation run

mod finding;
mod report;

// Re-export all public symbols
pub use finding::*;
pub use report::*;
