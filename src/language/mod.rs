// Records recovered from the audited artifacts

mod card;
mod command;
mod error;

// Re-export all public symbols
pub use card::*;
pub use command::*;
pub use error::*;
