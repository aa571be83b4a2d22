//! Validation of the religion card catalog, a JSON list of card objects.

use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::language::ReligionCard;
use crate::problem::{Finding, Locator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardProblem {
    InvalidDocument(String),
    NotAList,
    NotAnObject,
    EmptyId,
    InvalidId(String),
    DuplicateId { id: String, first: usize },
    EmptyField(&'static str),
    InvalidColor(String),
    EmptyDetails,
    BlankDetail,
}

impl CardProblem {
    pub fn message(&self) -> String {
        match self {
            CardProblem::InvalidDocument(details) => format!("invalid document: {}", details),
            CardProblem::NotAList => "must be a non-empty list".to_string(),
            CardProblem::NotAnObject => "entry is not an object".to_string(),
            CardProblem::EmptyId => "empty id".to_string(),
            CardProblem::InvalidId(id) => format!("id has invalid characters: {}", id),
            CardProblem::DuplicateId { id, first } => {
                format!("duplicate id: {} (first used in #{})", id, first)
            }
            CardProblem::EmptyField(field) => format!("empty field {}", field),
            CardProblem::InvalidColor(color) => format!("invalid color: {}", color),
            CardProblem::EmptyDetails => "details must be a non-empty list".to_string(),
            CardProblem::BlankDetail => "blank line in details".to_string(),
        }
    }
}

/// Result of validating a card catalog document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cards {
    pub records: Vec<ReligionCard>,
    pub findings: Vec<Finding>,
}

/// Validate the card catalog. A document that is not valid JSON, or not a
/// non-empty list, gets a single finding against the artifact as a whole.
pub fn validate_cards(text: &str, artifact: &str) -> Cards {
    let mut cards = Cards::default();

    let document: Value = match serde_json::from_str(text) {
        Ok(document) => document,
        Err(error) => {
            debug!(?error);
            cards
                .findings
                .push(Finding::error(
                    Locator::artifact(artifact),
                    CardProblem::InvalidDocument(error.to_string()),
                ));
            return cards;
        }
    };

    let entries = match document.as_array() {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            cards
                .findings
                .push(Finding::error(Locator::artifact(artifact), CardProblem::NotAList));
            return cards;
        }
    };

    let mut seen: HashMap<String, usize> = HashMap::new();

    for (i, entry) in entries
        .iter()
        .enumerate()
    {
        let index = i + 1;
        let before = cards
            .findings
            .len();

        let object = match entry.as_object() {
            Some(object) => object,
            None => {
                cards
                    .findings
                    .push(Finding::error(
                        Locator::record(artifact, index),
                        CardProblem::NotAnObject,
                    ));
                continue;
            }
        };

        for problem in check_entry(object, index, &mut seen) {
            cards
                .findings
                .push(Finding::error(Locator::record(artifact, index), problem));
        }

        if cards
            .findings
            .len()
            == before
        {
            match serde_json::from_value::<ReligionCard>(entry.clone()) {
                Ok(card) => cards
                    .records
                    .push(card),
                Err(error) => debug!(?error),
            }
        }
    }

    debug!(
        "Cards: {} record{}",
        cards
            .records
            .len(),
        if cards.records.len() == 1 { "" } else { "s" }
    );

    cards
}

fn check_entry(
    object: &Map<String, Value>,
    index: usize,
    seen: &mut HashMap<String, usize>,
) -> Vec<CardProblem> {
    let mut problems = Vec::new();

    match object
        .get("id")
        .and_then(Value::as_str)
    {
        Some(id) if !id
            .trim()
            .is_empty() =>
        {
            if !crate::regex!(r"^[a-z0-9_-]+$").is_match(id) {
                problems.push(CardProblem::InvalidId(id.to_string()));
            } else if let Some(first) = seen.get(id) {
                problems.push(CardProblem::DuplicateId {
                    id: id.to_string(),
                    first: *first,
                });
            } else {
                seen.insert(id.to_string(), index);
            }
        }
        _ => problems.push(CardProblem::EmptyId),
    }

    for key in ["name", "tagline", "symbol"] {
        let present = object
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|value| {
                !value
                    .trim()
                    .is_empty()
            });
        if !present {
            problems.push(CardProblem::EmptyField(key));
        }
    }

    let color = object.get("color");
    let valid = color
        .and_then(Value::as_str)
        .is_some_and(|color| crate::regex!(r"^#[0-9A-Fa-f]{6}$").is_match(color));
    if !valid {
        let shown = match color {
            Some(Value::String(color)) => color.clone(),
            Some(other) => other.to_string(),
            None => "null".to_string(),
        };
        problems.push(CardProblem::InvalidColor(shown));
    }

    match object
        .get("details")
        .and_then(Value::as_array)
    {
        Some(details) if !details.is_empty() => {
            let blank = details
                .iter()
                .any(|detail| !matches!(detail.as_str(), Some(line) if !line.trim().is_empty()));
            if blank {
                problems.push(CardProblem::BlankDetail);
            }
        }
        _ => problems.push(CardProblem::EmptyDetails),
    }

    problems
}
