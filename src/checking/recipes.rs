//! Validation of crafting recipe overrides, a JSON object mapping recipe
//! ids to their original and modified ingredient lists.

use serde_json::{Map, Value};
use tracing::debug;

use crate::problem::{Finding, Locator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeProblem {
    InvalidDocument(String),
    NotAnObject,
    NoRecipes,
    EmptyId,
    RecipeNotAnObject,
    MissingList(&'static str),
    EmptyList(&'static str),
    IngredientNotAnObject { list: &'static str, index: usize },
    EmptyItem { list: &'static str, index: usize },
    ItemFormat { list: &'static str, index: usize, item: String },
    InvalidCount { list: &'static str, index: usize },
    ReasonNotString,
}

impl RecipeProblem {
    pub fn message(&self) -> String {
        match self {
            RecipeProblem::InvalidDocument(details) => format!("invalid JSON: {}", details),
            RecipeProblem::NotAnObject => "top-level JSON must be an object".to_string(),
            RecipeProblem::NoRecipes => "'recipes' must be an object".to_string(),
            RecipeProblem::EmptyId => "recipe id must be a non-empty string".to_string(),
            RecipeProblem::RecipeNotAnObject => "recipe must be an object".to_string(),
            RecipeProblem::MissingList(list) => format!("missing '{}'", list),
            RecipeProblem::EmptyList(list) => format!("'{}' must be a non-empty list", list),
            RecipeProblem::IngredientNotAnObject { list, index } => {
                format!("'{}'[{}] must be an object", list, index)
            }
            RecipeProblem::EmptyItem { list, index } => {
                format!("'{}'[{}].item must be a non-empty string", list, index)
            }
            RecipeProblem::ItemFormat { list, index, item } => {
                format!("'{}'[{}].item has unexpected format: {}", list, index, item)
            }
            RecipeProblem::InvalidCount { list, index } => {
                format!("'{}'[{}].count must be a positive int", list, index)
            }
            RecipeProblem::ReasonNotString => "'reason' should be a string".to_string(),
        }
    }
}

/// Result of validating a recipe document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipes {
    pub count: usize,
    pub findings: Vec<Finding>,
}

impl Recipes {
    pub fn errors(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.is_error())
            .count()
    }

    pub fn warnings(&self) -> usize {
        self.findings
            .len()
            - self.errors()
    }
}

/// Validate a recipe document. A document that is not valid JSON, or is
/// not shaped as `{"recipes": {...}}`, gets a single error against the
/// artifact. Findings for a recipe are located by the recipe's id.
pub fn validate_recipes(text: &str, artifact: &str) -> Recipes {
    let mut result = Recipes::default();

    let fatal = |problem: RecipeProblem| Recipes {
        count: 0,
        findings: vec![Finding::error(Locator::artifact(artifact), problem)],
    };

    let document: Value = match serde_json::from_str(text) {
        Ok(document) => document,
        Err(error) => {
            debug!(?error);
            return fatal(RecipeProblem::InvalidDocument(error.to_string()));
        }
    };

    let Some(document) = document.as_object() else {
        return fatal(RecipeProblem::NotAnObject);
    };

    let Some(recipes) = document
        .get("recipes")
        .and_then(Value::as_object)
    else {
        return fatal(RecipeProblem::NoRecipes);
    };

    result.count = recipes.len();

    for (id, recipe) in recipes {
        if id.is_empty() {
            result
                .findings
                .push(Finding::error(Locator::artifact(artifact), RecipeProblem::EmptyId));
            continue;
        }

        let locator = Locator::artifact(id);

        let Some(recipe) = recipe.as_object() else {
            result
                .findings
                .push(Finding::error(locator, RecipeProblem::RecipeNotAnObject));
            continue;
        };

        check_recipe(recipe, &locator, &mut result.findings);
    }

    debug!(
        "Recipes: {} checked, {} error(s), {} warning(s)",
        result.count,
        result.errors(),
        result.warnings()
    );
    result
}

fn check_recipe(recipe: &Map<String, Value>, locator: &Locator, findings: &mut Vec<Finding>) {
    for list in ["original", "modified"] {
        let Some(value) = recipe.get(list) else {
            findings.push(Finding::error(locator.clone(), RecipeProblem::MissingList(list)));
            continue;
        };

        let ingredients = match value.as_array() {
            Some(ingredients) if !ingredients.is_empty() => ingredients,
            _ => {
                findings.push(Finding::error(locator.clone(), RecipeProblem::EmptyList(list)));
                continue;
            }
        };

        for (index, ingredient) in ingredients
            .iter()
            .enumerate()
        {
            let Some(ingredient) = ingredient.as_object() else {
                findings.push(Finding::error(
                    locator.clone(),
                    RecipeProblem::IngredientNotAnObject { list, index },
                ));
                continue;
            };

            match ingredient
                .get("item")
                .and_then(Value::as_str)
            {
                Some(item) if !item.is_empty() => {
                    if !crate::regex!(r"^[a-z0-9_.-]+:[a-z0-9_./-]+$").is_match(item) {
                        findings.push(Finding::warning(
                            locator.clone(),
                            RecipeProblem::ItemFormat {
                                list,
                                index,
                                item: item.to_string(),
                            },
                        ));
                    }
                }
                _ => findings.push(Finding::error(
                    locator.clone(),
                    RecipeProblem::EmptyItem { list, index },
                )),
            }

            let positive = ingredient
                .get("count")
                .and_then(Value::as_i64)
                .is_some_and(|count| count > 0);
            if !positive {
                findings.push(Finding::error(
                    locator.clone(),
                    RecipeProblem::InvalidCount { list, index },
                ));
            }
        }
    }

    if let Some(reason) = recipe.get("reason") {
        if !reason.is_null() && !reason.is_string() {
            findings.push(Finding::warning(locator.clone(), RecipeProblem::ReasonNotString));
        }
    }
}

#[cfg(test)]
mod check {
    use super::*;

    fn lines(recipes: &Recipes) -> Vec<String> {
        recipes
            .findings
            .iter()
            .map(|finding| finding.to_string())
            .collect()
    }

    #[test]
    fn well_formed() {
        let text = r#"
{
    "recipes": {
        "iron_sword": {
            "original": [{"item": "minecraft:iron_ingot", "count": 2}],
            "modified": [{"item": "minecraft:iron_ingot", "count": 3}],
            "reason": "balance"
        },
        "bread": {
            "original": [{"item": "minecraft:wheat", "count": 3}],
            "modified": [{"item": "minecraft:wheat", "count": 2}]
        }
    }
}
        "#
        .trim_ascii();
        let recipes = validate_recipes(text, "recipes.json");
        assert_eq!(recipes.count, 2);
        assert!(recipes
            .findings
            .is_empty());
    }

    #[test]
    fn document_shape() {
        let recipes = validate_recipes("{", "recipes.json");
        assert_eq!(recipes.errors(), 1);
        assert!(lines(&recipes)[0].starts_with("recipes.json: invalid JSON: "));

        assert_eq!(
            lines(&validate_recipes("[]", "recipes.json")),
            vec!["recipes.json: top-level JSON must be an object"]
        );
        assert_eq!(
            lines(&validate_recipes(r#"{"recipes": []}"#, "recipes.json")),
            vec!["recipes.json: 'recipes' must be an object"]
        );
    }

    #[test]
    fn ingredient_rules() {
        let text = r#"
{
    "recipes": {
        "axe": {
            "original": [{"item": "Minecraft:Stick", "count": 1}, {"item": "", "count": 0}, 5],
            "modified": [],
            "reason": 7
        },
        "bow": 3,
        "pick": {"modified": [{"item": "minecraft:stick", "count": 1.5}]}
    }
}
        "#
        .trim_ascii();
        let recipes = validate_recipes(text, "recipes.json");
        assert_eq!(recipes.count, 3);
        assert_eq!(
            lines(&recipes),
            vec![
                "axe: 'original'[0].item has unexpected format: Minecraft:Stick",
                "axe: 'original'[1].item must be a non-empty string",
                "axe: 'original'[1].count must be a positive int",
                "axe: 'original'[2] must be an object",
                "axe: 'modified' must be a non-empty list",
                "axe: 'reason' should be a string",
                "bow: recipe must be an object",
                "pick: missing 'original'",
                "pick: 'modified'[0].count must be a positive int",
            ]
        );
        assert_eq!(recipes.errors(), 7);
        assert_eq!(recipes.warnings(), 2);
    }

    #[test]
    fn document_order() {
        let text = r#"{"recipes": {"zeta": 1, "alpha": 2}}"#;
        assert_eq!(
            lines(&validate_recipes(text, "recipes.json")),
            vec![
                "zeta: recipe must be an object",
                "alpha: recipe must be an object",
            ]
        );
    }
}
