//! Consistency audit across a command catalog, a client/server request
//! contract, and a permission manifest.

pub mod checking;
pub mod language;
pub mod loading;
pub mod parsing;
pub mod problem;
pub mod regex;
pub mod rendering;
