//! Data loading functionality for Mixmax.
//!
//! This module handles loading the catalog tables from CSV files located
//! in the `data/` directory, and exposes the same tables embedded into the
//! binary for use without a data directory (the wasm build relies on this).

use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::models::{
    BaseProductRow, Catalog, CatalogError, Ingredient, IngredientRow, MultiplierRow, RuleRow,
    TransformationRule,
};

const INGREDIENTS_CSV: &str = include_str!("../data/ingredients.csv");
const RULES_CSV: &str = include_str!("../data/rules.csv");
const MULTIPLIERS_CSV: &str = include_str!("../data/effect_multipliers.csv");
const BASE_PRODUCTS_CSV: &str = include_str!("../data/base_products.csv");

/// Parses a ";"-separated list cell (e.g., "Munchies;Slippery") into names.
///
/// Empty segments are dropped.
fn parse_effect_list(cell: &str) -> Vec<String> {
    cell.split(';')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn read_rows<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>, csv::Error> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    rdr.deserialize().collect()
}

/// Loads the ingredient table from a CSV file.
///
/// # CSV Format
///
/// Expected columns: `name, base_effects, price` where `base_effects` is a
/// ";"-separated list of effect names.
pub fn load_ingredients(path: &Path) -> Result<Vec<IngredientRow>, Box<dyn Error>> {
    Ok(read_rows(File::open(path)?)?)
}

/// Loads the transformation rule table from a CSV file.
///
/// # CSV Format
///
/// Expected columns: `ingredient, target_effect, trigger_effects` where
/// `trigger_effects` is a ";"-separated list of effect names.
pub fn load_rules(path: &Path) -> Result<Vec<RuleRow>, Box<dyn Error>> {
    Ok(read_rows(File::open(path)?)?)
}

/// Loads the effect multiplier table from a CSV file.
///
/// # CSV Format
///
/// Expected columns: `effect, multiplier`.
pub fn load_multipliers(path: &Path) -> Result<Vec<MultiplierRow>, Box<dyn Error>> {
    Ok(read_rows(File::open(path)?)?)
}

/// Loads the base product table from a CSV file.
///
/// # CSV Format
///
/// Expected columns: `name, base_price`.
pub fn load_base_products(path: &Path) -> Result<Vec<BaseProductRow>, Box<dyn Error>> {
    Ok(read_rows(File::open(path)?)?)
}

/// Assembles a [`Catalog`] from raw table rows.
///
/// Rules are attached to their ingredient in row order. A rule row naming an
/// ingredient that is not in the ingredient table is rejected, as is a
/// duplicated ingredient name.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownRuleIngredient`] or
/// [`CatalogError::DuplicateIngredient`] on inconsistent tables.
pub fn assemble_catalog(
    ingredient_rows: Vec<IngredientRow>,
    rule_rows: Vec<RuleRow>,
    multiplier_rows: Vec<MultiplierRow>,
    product_rows: Vec<BaseProductRow>,
) -> Result<Catalog, CatalogError> {
    let mut ingredients: Vec<Ingredient> = Vec::with_capacity(ingredient_rows.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(ingredient_rows.len());

    for row in ingredient_rows {
        if index.contains_key(&row.name) {
            return Err(CatalogError::DuplicateIngredient(row.name));
        }
        index.insert(row.name.clone(), ingredients.len());
        ingredients.push(Ingredient {
            name: row.name,
            base_effects: parse_effect_list(&row.base_effects),
            price: row.price,
            rules: Vec::new(),
        });
    }

    for row in rule_rows {
        let Some(&i) = index.get(&row.ingredient) else {
            return Err(CatalogError::UnknownRuleIngredient {
                ingredient: row.ingredient,
                target_effect: row.target_effect,
            });
        };
        ingredients[i].rules.push(TransformationRule {
            target_effect: row.target_effect,
            trigger_effects: parse_effect_list(&row.trigger_effects),
        });
    }

    let multipliers: HashMap<String, f64> = multiplier_rows
        .into_iter()
        .map(|row| (row.effect, row.multiplier))
        .collect();
    let base_prices: BTreeMap<String, i64> = product_rows
        .into_iter()
        .map(|row| (row.name, row.base_price))
        .collect();

    Catalog::new(ingredients, multipliers, base_prices)
}

/// Loads the complete catalog from a data directory.
///
/// Expects `ingredients.csv`, `rules.csv`, `effect_multipliers.csv`, and
/// `base_products.csv` inside `data_dir`.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use mixmax::data::load_catalog;
///
/// let catalog = load_catalog(Path::new("data")).unwrap();
/// println!("Loaded {} ingredients", catalog.ingredient_count());
/// ```
pub fn load_catalog(data_dir: &Path) -> Result<Catalog, Box<dyn Error>> {
    let ingredients = load_ingredients(&data_dir.join("ingredients.csv"))?;
    let rules = load_rules(&data_dir.join("rules.csv"))?;
    let multipliers = load_multipliers(&data_dir.join("effect_multipliers.csv"))?;
    let products = load_base_products(&data_dir.join("base_products.csv"))?;
    Ok(assemble_catalog(ingredients, rules, multipliers, products)?)
}

/// Builds the catalog from the tables embedded in the binary.
///
/// This is the dataset the wasm build and the CLI's default mode use; it is
/// byte-identical to the CSV files shipped under `data/`.
pub fn builtin_catalog() -> Result<Catalog, Box<dyn Error>> {
    let ingredients = read_rows(INGREDIENTS_CSV.as_bytes())?;
    let rules = read_rows(RULES_CSV.as_bytes())?;
    let multipliers = read_rows(MULTIPLIERS_CSV.as_bytes())?;
    let products = read_rows(BASE_PRODUCTS_CSV.as_bytes())?;
    Ok(assemble_catalog(ingredients, rules, multipliers, products)?)
}
