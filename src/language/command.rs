//! Entries of the command catalog

/// One command declaration, with its arguments mapped to named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub command: String,
    pub display_name: String,
    pub short_desc: String,
    pub full_desc: String,
    pub category: String,
    pub aliases: Vec<String>,
    pub examples: Vec<String>,
    pub permission: String,
    pub requires_nation: bool,
}

impl CommandRecord {
    /// The category enum constant without its qualifying type, so
    /// `CommandCategory.NATION` gives `NATION`.
    pub fn category_name(&self) -> &str {
        match self
            .category
            .rsplit_once('.')
        {
            Some((_, name)) => name,
            None => &self.category,
        }
    }
}
