//! Data models and structures for Mixmax.
//!
//! This module contains the core data structures used throughout the
//! application: ingredients and their transformation rules, the read-only
//! [`Catalog`] registry, and the result types produced by the search
//! routines in [`crate::mixer`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The set of effects currently present on a product.
///
/// A `BTreeSet` gives structural equality and hashing (two sets built in
/// different orders compare equal and hash identically, so they collapse to
/// one search node) plus sorted iteration for stable display output.
pub type EffectSet = BTreeSet<String>;

/// A conditional effect replacement tied to one ingredient.
///
/// If any effect in `trigger_effects` is present in the state *before* the
/// ingredient is applied, the rule fires: `target_effect` is added and every
/// trigger effect that was present is removed.
///
/// # Example
///
/// ```
/// use mixmax::models::TransformationRule;
///
/// let rule = TransformationRule {
///     target_effect: "Euphoric".to_string(),
///     trigger_effects: vec!["Toxic".to_string()],
/// };
///
/// assert_eq!(rule.target_effect, "Euphoric");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationRule {
    /// Effect added when the rule fires
    pub target_effect: String,
    /// Effects that trigger the rule; those present pre-application are removed
    pub trigger_effects: Vec<String>,
}

/// A named additive action applied once per mixing step.
///
/// Each ingredient always adds its `base_effects` and may fire any number of
/// its `rules` against the pre-application state.
#[derive(Debug, Clone)]
pub struct Ingredient {
    /// The ingredient name (e.g., "Cuke", "Mega Bean")
    pub name: String,
    /// Effects unconditionally added on every application
    pub base_effects: Vec<String>,
    /// Purchase cost of one unit of this ingredient
    pub price: i64,
    /// Conditional replacement rules, evaluated independently per application
    pub rules: Vec<TransformationRule>,
}

/// Errors raised while assembling a [`Catalog`] from raw data tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate ingredient '{0}' in catalog data")]
    DuplicateIngredient(String),

    #[error("rule targeting '{target_effect}' references unknown ingredient '{ingredient}'")]
    UnknownRuleIngredient {
        ingredient: String,
        target_effect: String,
    },
}

/// Errors raised by the pricing function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("unknown base product '{0}'")]
    UnknownProduct(String),
}

/// Immutable registry of ingredients, transformation rules, effect price
/// multipliers, and base products.
///
/// A `Catalog` is constructed once (see [`crate::data`]) and passed by
/// reference into the engine and search routines; it is never mutated after
/// construction. The set of all valid effect names is derived at
/// construction time as the union of every base effect, rule target, and
/// rule trigger, and is used to validate caller-supplied names before they
/// reach the engine.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Ingredients keyed by name; `BTreeMap` iteration order is the
    /// lexicographic total order the searches rely on for determinism.
    ingredients: BTreeMap<String, Ingredient>,
    /// Price multiplier per effect; effects absent here contribute 0.0
    multipliers: HashMap<String, f64>,
    /// Base price per product name
    base_prices: BTreeMap<String, i64>,
    /// Every effect name that can occur in this catalog
    valid_effects: HashSet<String>,
}

impl Catalog {
    /// Builds a catalog from assembled ingredients and pricing tables.
    ///
    /// The valid-effect universe is derived from the ingredients' base
    /// effects and rules.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateIngredient`] if two ingredients
    /// share a name.
    pub fn new(
        ingredients: Vec<Ingredient>,
        multipliers: HashMap<String, f64>,
        base_prices: BTreeMap<String, i64>,
    ) -> Result<Self, CatalogError> {
        let mut by_name = BTreeMap::new();
        let mut valid_effects = HashSet::new();

        for ingredient in ingredients {
            for effect in &ingredient.base_effects {
                valid_effects.insert(effect.clone());
            }
            for rule in &ingredient.rules {
                valid_effects.insert(rule.target_effect.clone());
                for trigger in &rule.trigger_effects {
                    valid_effects.insert(trigger.clone());
                }
            }
            if let Some(previous) = by_name.insert(ingredient.name.clone(), ingredient) {
                return Err(CatalogError::DuplicateIngredient(previous.name));
            }
        }

        Ok(Catalog {
            ingredients: by_name,
            multipliers,
            base_prices,
            valid_effects,
        })
    }

    /// Looks up an ingredient by name.
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.get(name)
    }

    /// Iterates all ingredients in lexicographic name order.
    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.values()
    }

    /// Returns every ingredient name in lexicographic order.
    ///
    /// This is the canonical ingredient iteration order for the search
    /// routines; using it makes search results reproducible.
    pub fn ingredient_names(&self) -> Vec<String> {
        self.ingredients.keys().cloned().collect()
    }

    /// Number of ingredients in the catalog.
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    /// Looks up the base price of a product, if it is known.
    pub fn base_price(&self, product: &str) -> Option<i64> {
        self.base_prices.get(product).copied()
    }

    /// Returns every base product name in lexicographic order.
    pub fn base_products(&self) -> Vec<&str> {
        self.base_prices.keys().map(String::as_str).collect()
    }

    /// Looks up the price multiplier for an effect.
    ///
    /// Returns `None` for effects without a defined multiplier; the pricing
    /// function treats those as contributing 0.0.
    pub fn multiplier(&self, effect: &str) -> Option<f64> {
        self.multipliers.get(effect).copied()
    }

    /// Whether `name` is an effect that can occur in this catalog.
    pub fn is_valid_effect(&self, name: &str) -> bool {
        self.valid_effects.contains(name)
    }

    /// Number of distinct effects in the derived universe.
    pub fn effect_count(&self) -> usize {
        self.valid_effects.len()
    }

    /// Splits caller-supplied effect names into the valid set and the
    /// invalid remainder.
    ///
    /// Invalid names are returned in input order so callers can warn about
    /// them; the valid names come back deduplicated as an [`EffectSet`].
    pub fn partition_effects<I, S>(&self, names: I) -> (EffectSet, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut valid = EffectSet::new();
        let mut invalid = Vec::new();
        for name in names {
            let name = name.as_ref();
            if self.is_valid_effect(name) {
                valid.insert(name.to_string());
            } else {
                invalid.push(name.to_string());
            }
        }
        (valid, invalid)
    }

    /// Splits caller-supplied ingredient names into valid and invalid lists.
    ///
    /// Order and duplicates are preserved for the valid part, since an
    /// ingredient may legitimately appear several times in a sequence.
    pub fn partition_ingredients<I, S>(&self, names: I) -> (Vec<String>, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut valid = Vec::new();
        let mut invalid = Vec::new();
        for name in names {
            let name = name.as_ref();
            if self.ingredients.contains_key(name) {
                valid.push(name.to_string());
            } else {
                invalid.push(name.to_string());
            }
        }
        (valid, invalid)
    }
}

/// One step of an applied ingredient sequence: the ingredient and the
/// effect set after applying it.
#[derive(Debug, Clone)]
pub struct MixStep {
    /// Ingredient applied at this step
    pub ingredient: String,
    /// Effects present after this step
    pub effects: EffectSet,
}

/// Outcome of the shortest-sequence search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The starting state already contains every target effect
    AlreadySatisfied,
    /// Shortest ingredient sequence reaching a superset of the target
    Found(Vec<String>),
    /// Search exhausted up to the depth bound without a qualifying state
    NotFound,
}

/// Ranking key for the top-K price search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankBy {
    /// Final sell price
    Price,
    /// Sell price minus total cost
    Profit,
    /// Profit divided by total cost
    ProfitMargin,
}

/// A scored mix produced by the top-K search.
#[derive(Debug, Clone)]
pub struct RankedMix {
    /// Final sell price of the mixed product
    pub price: i64,
    /// Ingredient sequence that first reached this effect set
    pub sequence: Vec<String>,
    /// Effects present on the finished product
    pub effects: EffectSet,
    /// Base product price plus the cost of every ingredient in the sequence
    pub cost: i64,
    /// `price - cost`
    pub profit: i64,
    /// `profit / cost`, rounded to two decimals
    pub profit_margin: f64,
}

// ============================================================================
// CSV Row Structures
// ============================================================================

/// CSV row structure for the ingredient table.
#[derive(Debug, Deserialize)]
pub struct IngredientRow {
    /// Ingredient name
    pub name: String,
    /// Base effects, ";"-separated
    pub base_effects: String,
    /// Purchase cost per unit
    pub price: i64,
}

/// CSV row structure for the transformation rule table.
#[derive(Debug, Deserialize)]
pub struct RuleRow {
    /// Ingredient the rule belongs to
    pub ingredient: String,
    /// Effect added when the rule fires
    pub target_effect: String,
    /// Trigger effects, ";"-separated
    pub trigger_effects: String,
}

/// CSV row structure for the effect multiplier table.
#[derive(Debug, Deserialize)]
pub struct MultiplierRow {
    /// Effect name
    pub effect: String,
    /// Price multiplier contributed by the effect
    pub multiplier: f64,
}

/// CSV row structure for the base product table.
#[derive(Debug, Deserialize)]
pub struct BaseProductRow {
    /// Base product name
    pub name: String,
    /// Price of the unmixed product
    pub base_price: i64,
}
