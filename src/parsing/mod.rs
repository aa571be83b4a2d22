//! Recover call arguments and string literals from source text without
//! parsing the host language.

mod arguments;
mod extract;
mod literal;
mod scanner;

// Re-export all public symbols
pub use arguments::*;
pub use extract::*;
pub use literal::*;
pub use scanner::*;

use tracing::debug;

/// The top-level arguments of every call matching the marker, in source
/// order, along with where each call's argument text begins.
pub fn calls<'i>(source: &'i str, marker: CallMarker<'_>) -> Vec<(usize, Vec<&'i str>)> {
    let name = marker.name();
    let result: Vec<_> = extract_blocks(source, marker)
        .map(|block| (block.offset, split_arguments(block.text)))
        .collect();

    debug!(
        "Found {} call{} to {}",
        result.len(),
        if result.len() == 1 { "" } else { "s" },
        name
    );
    result
}
