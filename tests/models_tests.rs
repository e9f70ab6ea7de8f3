//! Tests for the catalog and its data structures.

use std::collections::{BTreeMap, HashMap};

use mixmax::data::builtin_catalog;
use mixmax::models::{Catalog, CatalogError, Ingredient, TransformationRule};

fn catalog() -> Catalog {
    builtin_catalog().expect("Failed to build the embedded catalog")
}

#[test]
fn test_ingredient_lookup() {
    let catalog = catalog();

    let cuke = catalog.ingredient("Cuke").expect("Cuke should exist");
    assert_eq!(cuke.base_effects, vec!["Energizing".to_string()]);
    assert_eq!(cuke.price, 2);
    assert_eq!(cuke.rules.len(), 7);

    assert!(catalog.ingredient("Moon Dust").is_none());
}

#[test]
fn test_ingredient_names_are_sorted() {
    let catalog = catalog();
    let names = catalog.ingredient_names();

    assert_eq!(names.len(), 16);
    assert_eq!(names.first().map(String::as_str), Some("Addy"));
    assert_eq!(names.last().map(String::as_str), Some("Viagra"));

    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted, "ingredient order must be lexicographic");
}

#[test]
fn test_base_products() {
    let catalog = catalog();

    assert_eq!(catalog.base_products(), vec!["Cocaine", "Meth", "Weed"]);
    assert_eq!(catalog.base_price("Weed"), Some(35));
    assert_eq!(catalog.base_price("Meth"), Some(70));
    assert_eq!(catalog.base_price("Cocaine"), Some(150));
    assert_eq!(catalog.base_price("Plutonium"), None);
}

#[test]
fn test_effect_universe_is_derived_from_all_tables() {
    let catalog = catalog();

    // Base effects, rule targets, and rule triggers all count.
    assert!(catalog.is_valid_effect("Energizing"));
    assert!(catalog.is_valid_effect("Zombifying"));
    assert!(catalog.is_valid_effect("Schizophrenic"));

    assert!(!catalog.is_valid_effect("Lethal"));
    assert!(!catalog.is_valid_effect(""));

    assert_eq!(catalog.effect_count(), 34);
}

#[test]
fn test_multiplier_lookup() {
    let catalog = catalog();

    assert_eq!(catalog.multiplier("Anti-Gravity"), Some(0.54));
    assert_eq!(catalog.multiplier("Toxic"), Some(0.0));
    assert_eq!(catalog.multiplier("Lethal"), None);
}

#[test]
fn test_partition_effects_filters_and_deduplicates() {
    let catalog = catalog();

    let (valid, invalid) = catalog.partition_effects([
        "Energizing",
        "Sparkly",
        "Euphoric",
        "Energizing",
        "Radioactive",
    ]);

    assert_eq!(valid.len(), 2);
    assert!(valid.contains("Energizing"));
    assert!(valid.contains("Euphoric"));
    assert_eq!(
        invalid,
        vec!["Sparkly".to_string(), "Radioactive".to_string()]
    );
}

#[test]
fn test_partition_ingredients_preserves_order_and_duplicates() {
    let catalog = catalog();

    let (valid, invalid) =
        catalog.partition_ingredients(["Cuke", "Moon Dust", "Cuke", "Battery"]);

    assert_eq!(
        valid,
        vec!["Cuke".to_string(), "Cuke".to_string(), "Battery".to_string()]
    );
    assert_eq!(invalid, vec!["Moon Dust".to_string()]);
}

#[test]
fn test_catalog_rejects_duplicate_ingredients() {
    let duplicate = Ingredient {
        name: "Binder".to_string(),
        base_effects: vec!["Sticky".to_string()],
        price: 3,
        rules: vec![],
    };
    let result = Catalog::new(
        vec![duplicate.clone(), duplicate],
        HashMap::new(),
        BTreeMap::new(),
    );
    assert_eq!(
        result.err(),
        Some(CatalogError::DuplicateIngredient("Binder".to_string()))
    );
}

#[test]
fn test_universe_includes_rule_only_effects() {
    let ingredients = vec![Ingredient {
        name: "Binder".to_string(),
        base_effects: vec!["Sticky".to_string()],
        price: 3,
        rules: vec![TransformationRule {
            target_effect: "Smooth".to_string(),
            trigger_effects: vec!["Rough".to_string()],
        }],
    }];
    let catalog = Catalog::new(ingredients, HashMap::new(), BTreeMap::new()).unwrap();

    assert!(catalog.is_valid_effect("Sticky"));
    assert!(catalog.is_valid_effect("Smooth"));
    assert!(catalog.is_valid_effect("Rough"));
    assert_eq!(catalog.effect_count(), 3);
}
