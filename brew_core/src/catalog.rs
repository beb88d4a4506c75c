//! Default catalog of espresso recipes.
//!
//! Four hardcoded drinks, consumed only for display. Order matters for
//! presentation.

use crate::types::{RatioComponent, Recipe};
use once_cell::sync::Lazy;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_RECIPES: Lazy<Vec<Recipe>> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default recipes
pub fn default_recipes() -> &'static [Recipe] {
    &DEFAULT_RECIPES
}

/// Builds the default recipe catalog
///
/// **Note**: For production use, prefer `default_recipes()` which returns a
/// cached reference. This function is retained for testing and custom
/// catalog creation.
pub fn build_default_catalog() -> Vec<Recipe> {
    build_default_catalog_internal()
}

/// Case-insensitive recipe lookup by name
pub fn find_recipe(name: &str) -> Option<&'static Recipe> {
    let wanted = name.trim();
    DEFAULT_RECIPES
        .iter()
        .find(|recipe| recipe.name.eq_ignore_ascii_case(wanted))
}

fn component(label: &str, parts: u32) -> RatioComponent {
    RatioComponent {
        label: label.into(),
        parts,
    }
}

fn build_default_catalog_internal() -> Vec<Recipe> {
    vec![
        Recipe {
            name: "Latte".into(),
            description: "1 shot espresso · 8–10 oz steamed milk · Thin foam".into(),
            ratio_label: "1:4".into(),
            ratio_components: vec![component("Espresso", 1), component("Milk", 4)],
            instructions: vec![
                "Pull 1 shot of espresso.".into(),
                "Steam 8–10 oz milk with thin foam.".into(),
                "Pour milk over espresso.".into(),
            ],
        },
        Recipe {
            name: "Flat White".into(),
            description: "2 shots (ristretto) · 4–6 oz micro-foam".into(),
            ratio_label: "1:3".into(),
            ratio_components: vec![component("Ristretto", 1), component("Micro-foam", 3)],
            instructions: vec![
                "Pull 2 ristretto shots.".into(),
                "Steam 4–6 oz milk to silky micro-foam.".into(),
                "Pour and integrate.".into(),
            ],
        },
        Recipe {
            name: "Cappuccino".into(),
            description: "1 shot · Equal parts milk & foam".into(),
            ratio_label: "1:1:1".into(),
            ratio_components: vec![
                component("Espresso", 1),
                component("Milk", 1),
                component("Foam", 1),
            ],
            instructions: vec![
                "Pull 1 shot of espresso.".into(),
                "Steam milk for equal parts milk and foam.".into(),
                "Combine in equal portions.".into(),
            ],
        },
        Recipe {
            name: "Cortado".into(),
            description: "1 shot · 1 part steamed milk".into(),
            ratio_label: "1:1".into(),
            ratio_components: vec![component("Espresso", 1), component("Milk", 1)],
            instructions: vec![
                "Pull 1 shot of espresso.".into(),
                "Add equal part steamed milk (no foam).".into(),
            ],
        },
    ]
}

/// Validate a recipe catalog for consistency and completeness
///
/// Returns a list of validation errors, or empty Vec if valid.
pub fn validate(recipes: &[Recipe]) -> Vec<String> {
    let mut errors = Vec::new();

    if recipes.is_empty() {
        errors.push("Catalog has no recipes".to_string());
    }

    for recipe in recipes {
        if recipe.name.is_empty() {
            errors.push("Recipe has empty name".to_string());
            continue;
        }

        if recipe.description.is_empty() {
            errors.push(format!("Recipe '{}' has empty description", recipe.name));
        }
        if recipe.instructions.is_empty() {
            errors.push(format!("Recipe '{}' has no instructions", recipe.name));
        }
        if recipe.ratio_components.is_empty() {
            errors.push(format!("Recipe '{}' has no ratio components", recipe.name));
        }

        for part in &recipe.ratio_components {
            if part.label.is_empty() {
                errors.push(format!(
                    "Recipe '{}' has a ratio component with an empty label",
                    recipe.name
                ));
            }
            if part.parts == 0 {
                errors.push(format!(
                    "Recipe '{}': ratio component '{}' has zero parts",
                    recipe.name, part.label
                ));
            }
        }

        // Ratio label arity must match the component count, e.g. "1:1:1"
        // describes three segments
        let label_arity = recipe.ratio_label.split(':').count();
        if label_arity != recipe.ratio_components.len() {
            errors.push(format!(
                "Recipe '{}': ratio label '{}' describes {} parts but {} components are defined",
                recipe.name,
                recipe.ratio_label,
                label_arity,
                recipe.ratio_components.len()
            ));
        }
    }

    let mut names: Vec<&str> = recipes.iter().map(|r| r.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    if names.len() != recipes.len() {
        errors.push("Catalog contains duplicate recipe names".to_string());
    }

    errors
}
