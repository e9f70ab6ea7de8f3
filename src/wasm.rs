//! WebAssembly bindings for Mixmax.
//!
//! This module provides JavaScript-accessible functions over the embedded
//! catalog. All functions take and return JSON strings so the web side
//! never has to deal with wasm-specific types.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::data::builtin_catalog;
use crate::mixer::{apply_sequence, calculate_price, find_shortest_sequence, find_top_mixes};
use crate::models::{Catalog, EffectSet, RankBy, SearchOutcome};

/// JavaScript-friendly input for the mix calculation.
#[derive(Debug, Clone, Deserialize)]
pub struct JsMixInput {
    /// Ingredients applied in order
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub start_effects: Vec<String>,
    /// When set, the final effect set is also priced for this product
    #[serde(default)]
    pub base_product: Option<String>,
}

/// JavaScript-friendly mix step output.
#[derive(Debug, Clone, Serialize)]
pub struct JsMixStep {
    pub ingredient: String,
    pub effects: Vec<String>,
}

/// JavaScript-friendly mix calculation result.
#[derive(Debug, Clone, Serialize)]
pub struct JsMixResult {
    pub success: bool,
    pub error: Option<String>,
    pub ignored_effects: Vec<String>,
    pub ignored_ingredients: Vec<String>,
    pub steps: Vec<JsMixStep>,
    pub final_effects: Vec<String>,
    pub price: Option<i64>,
}

/// JavaScript-friendly input for the shortest-sequence search.
#[derive(Debug, Clone, Deserialize)]
pub struct JsShortestInput {
    pub target_effects: Vec<String>,
    #[serde(default)]
    pub start_effects: Vec<String>,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    8
}

/// JavaScript-friendly shortest-sequence result.
#[derive(Debug, Clone, Serialize)]
pub struct JsShortestResult {
    pub success: bool,
    pub error: Option<String>,
    pub ignored_effects: Vec<String>,
    pub found: bool,
    pub sequence: Vec<String>,
    pub final_effects: Vec<String>,
}

/// JavaScript-friendly input for the top-K ranked search.
#[derive(Debug, Clone, Deserialize)]
pub struct JsTopMixesInput {
    pub base_product: String,
    pub max_depth: usize,
    #[serde(default = "default_num_results")]
    pub num_results: usize,
    /// "price", "profit", or "profit_margin"; defaults to price
    #[serde(default)]
    pub rank_by: Option<RankBy>,
}

fn default_num_results() -> usize {
    10
}

/// JavaScript-friendly ranked mix output.
#[derive(Debug, Clone, Serialize)]
pub struct JsRankedMix {
    pub price: i64,
    pub sequence: Vec<String>,
    pub effects: Vec<String>,
    pub cost: i64,
    pub profit: i64,
    pub profit_margin: f64,
}

/// JavaScript-friendly top-K search result.
#[derive(Debug, Clone, Serialize)]
pub struct JsTopMixesResult {
    pub success: bool,
    pub error: Option<String>,
    pub results: Vec<JsRankedMix>,
}

fn effect_list(effects: &EffectSet) -> Vec<String> {
    effects.iter().cloned().collect()
}

fn catalog_or_error() -> Result<Catalog, String> {
    builtin_catalog().map_err(|e| format!("Catalog error: {}", e))
}

fn mix_failure(message: String) -> String {
    serde_json::to_string(&JsMixResult {
        success: false,
        error: Some(message),
        ignored_effects: vec![],
        ignored_ingredients: vec![],
        steps: vec![],
        final_effects: vec![],
        price: None,
    })
    .unwrap_or_default()
}

fn shortest_failure(message: String) -> String {
    serde_json::to_string(&JsShortestResult {
        success: false,
        error: Some(message),
        ignored_effects: vec![],
        found: false,
        sequence: vec![],
        final_effects: vec![],
    })
    .unwrap_or_default()
}

fn top_mixes_failure(message: String) -> String {
    serde_json::to_string(&JsTopMixesResult {
        success: false,
        error: Some(message),
        results: vec![],
    })
    .unwrap_or_default()
}

/// Applies an ingredient sequence and reports every intermediate state.
///
/// Takes a JSON string input and returns a JSON string result.
#[wasm_bindgen]
pub fn mix(input_json: &str) -> String {
    let input: JsMixInput = match serde_json::from_str(input_json) {
        Ok(i) => i,
        Err(e) => return mix_failure(format!("Invalid input: {}", e)),
    };
    let catalog = match catalog_or_error() {
        Ok(c) => c,
        Err(e) => return mix_failure(e),
    };

    let (start, ignored_effects) = catalog.partition_effects(&input.start_effects);
    let (sequence, ignored_ingredients) = catalog.partition_ingredients(&input.ingredients);

    let steps = apply_sequence(&catalog, &start, &sequence);
    let final_effects = steps.last().map_or_else(|| start.clone(), |s| s.effects.clone());

    let price = match &input.base_product {
        Some(product) => match calculate_price(&catalog, product, &final_effects) {
            Ok(p) => Some(p),
            Err(e) => return mix_failure(e.to_string()),
        },
        None => None,
    };

    serde_json::to_string(&JsMixResult {
        success: true,
        error: None,
        ignored_effects,
        ignored_ingredients,
        steps: steps
            .iter()
            .map(|s| JsMixStep {
                ingredient: s.ingredient.clone(),
                effects: effect_list(&s.effects),
            })
            .collect(),
        final_effects: effect_list(&final_effects),
        price,
    })
    .unwrap_or_default()
}

/// Runs the shortest-sequence search over the embedded catalog.
///
/// Takes a JSON string input and returns a JSON string result.
#[wasm_bindgen]
pub fn shortest(input_json: &str) -> String {
    let input: JsShortestInput = match serde_json::from_str(input_json) {
        Ok(i) => i,
        Err(e) => return shortest_failure(format!("Invalid input: {}", e)),
    };
    let catalog = match catalog_or_error() {
        Ok(c) => c,
        Err(e) => return shortest_failure(e),
    };

    let (target, mut ignored_effects) = catalog.partition_effects(&input.target_effects);
    let (start, ignored_start) = catalog.partition_effects(&input.start_effects);
    ignored_effects.extend(ignored_start);

    let ingredients = catalog.ingredient_names();
    let outcome = find_shortest_sequence(&catalog, &target, &start, &ingredients, input.max_depth);

    let (found, sequence) = match outcome {
        SearchOutcome::AlreadySatisfied => (true, Vec::new()),
        SearchOutcome::Found(sequence) => (true, sequence),
        SearchOutcome::NotFound => (false, Vec::new()),
    };
    let final_effects = apply_sequence(&catalog, &start, &sequence)
        .last()
        .map_or_else(|| start.clone(), |s| s.effects.clone());

    serde_json::to_string(&JsShortestResult {
        success: true,
        error: None,
        ignored_effects,
        found,
        sequence,
        final_effects: effect_list(&final_effects),
    })
    .unwrap_or_default()
}

/// Runs the top-K ranked search over the embedded catalog.
///
/// Takes a JSON string input and returns a JSON string result.
#[wasm_bindgen]
pub fn top_mixes(input_json: &str) -> String {
    let input: JsTopMixesInput = match serde_json::from_str(input_json) {
        Ok(i) => i,
        Err(e) => return top_mixes_failure(format!("Invalid input: {}", e)),
    };
    let catalog = match catalog_or_error() {
        Ok(c) => c,
        Err(e) => return top_mixes_failure(e),
    };

    let rank_by = input.rank_by.unwrap_or(RankBy::Price);
    let results = match find_top_mixes(
        &catalog,
        &input.base_product,
        input.max_depth,
        input.num_results,
        rank_by,
    ) {
        Ok(results) => results,
        Err(e) => return top_mixes_failure(e.to_string()),
    };

    serde_json::to_string(&JsTopMixesResult {
        success: true,
        error: None,
        results: results
            .iter()
            .map(|mix| JsRankedMix {
                price: mix.price,
                sequence: mix.sequence.clone(),
                effects: effect_list(&mix.effects),
                cost: mix.cost,
                profit: mix.profit,
                profit_margin: mix.profit_margin,
            })
            .collect(),
    })
    .unwrap_or_default()
}

/// Get the list of ingredients in the embedded catalog.
/// Returns a JSON array of names, base effects, and purchase prices.
#[wasm_bindgen]
pub fn get_ingredients() -> String {
    #[derive(Serialize)]
    struct IngredientInfo {
        name: String,
        base_effects: Vec<String>,
        price: i64,
        rule_count: usize,
    }

    let catalog = match catalog_or_error() {
        Ok(c) => c,
        Err(_) => return "[]".to_string(),
    };

    let infos: Vec<IngredientInfo> = catalog
        .ingredients()
        .map(|ingredient| IngredientInfo {
            name: ingredient.name.clone(),
            base_effects: ingredient.base_effects.clone(),
            price: ingredient.price,
            rule_count: ingredient.rules.len(),
        })
        .collect();

    serde_json::to_string(&infos).unwrap_or_default()
}

/// Get the version of the calculator.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
