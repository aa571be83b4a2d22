//! Entries of the religion card catalog

use serde::Deserialize;

/// One religion card as described in the card catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReligionCard {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub symbol: String,
    pub color: String,
    pub details: Vec<String>,
}
