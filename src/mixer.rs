//! Mixing simulation and search algorithms for Mixmax.
//!
//! This module contains the core logic: the transition engine that computes
//! how one ingredient changes a product's effect set, the breadth-first
//! search for the shortest sequence reaching a target effect set, the
//! exhaustive ranked enumeration of reachable mixes, and the pricing
//! function that scores them.

use std::collections::{HashSet, VecDeque};

use crate::models::{Catalog, EffectSet, MixStep, PriceError, RankBy, RankedMix, SearchOutcome};

/// Applies a single ingredient to an effect set.
///
/// The transition happens in two phases:
///
/// 1. Every base effect of the ingredient is added (set union).
/// 2. Each of the ingredient's transformation rules is checked against the
///    state as it was *before* this application. A rule whose trigger
///    effects intersect that snapshot fires: its present triggers are
///    collected for removal and its target effect for addition. Rules are
///    independent; one rule firing never affects whether another fires in
///    the same step. All removals are applied before all additions.
///
/// An unknown ingredient name is treated as a no-op (callers are expected
/// to filter names through [`Catalog::partition_ingredients`] first), and
/// an ingredient whose base effects are already present and whose rules do
/// not fire returns a set equal to the input.
///
/// # Example
///
/// ```
/// use mixmax::data::builtin_catalog;
/// use mixmax::mixer::apply_ingredient;
/// use mixmax::models::EffectSet;
///
/// let catalog = builtin_catalog().unwrap();
/// let result = apply_ingredient(&catalog, &EffectSet::new(), "Cuke");
/// assert!(result.contains("Energizing"));
/// ```
pub fn apply_ingredient(catalog: &Catalog, state: &EffectSet, ingredient: &str) -> EffectSet {
    let mut result = state.clone();

    let Some(ingredient) = catalog.ingredient(ingredient) else {
        return result;
    };

    for effect in &ingredient.base_effects {
        result.insert(effect.clone());
    }

    // Rules trigger off the pre-application snapshot, never off effects
    // added earlier in this same call.
    let mut to_remove = EffectSet::new();
    let mut to_add = EffectSet::new();
    for rule in &ingredient.rules {
        let mut fired = false;
        for trigger in &rule.trigger_effects {
            if state.contains(trigger) {
                to_remove.insert(trigger.clone());
                fired = true;
            }
        }
        if fired {
            to_add.insert(rule.target_effect.clone());
        }
    }

    for effect in &to_remove {
        result.remove(effect);
    }
    result.extend(to_add);

    result
}

/// Applies a sequence of ingredients in order, recording the state after
/// each step.
///
/// # Arguments
///
/// * `start` - Effects present before the first ingredient
/// * `sequence` - Ingredient names to apply, in order
///
/// # Returns
///
/// One [`MixStep`] per applied ingredient; the last step holds the final
/// effect set. An empty sequence yields an empty step list.
pub fn apply_sequence(catalog: &Catalog, start: &EffectSet, sequence: &[String]) -> Vec<MixStep> {
    let mut current = start.clone();
    let mut steps = Vec::with_capacity(sequence.len());
    for ingredient in sequence {
        current = apply_ingredient(catalog, &current, ingredient);
        steps.push(MixStep {
            ingredient: ingredient.clone(),
            effects: current.clone(),
        });
    }
    steps
}

/// Finds the shortest ingredient sequence whose resulting effect set is a
/// superset of `target`, using breadth-first search.
///
/// Nodes are effect sets, edges are single ingredient applications, and
/// `ingredients` fixes the neighbor iteration order — pass
/// [`Catalog::ingredient_names`] for the canonical lexicographic order.
/// Because BFS visits states by non-decreasing sequence length and the
/// ingredient order is fixed, the first qualifying state found is the
/// deterministic minimum-length answer. A visited set keyed on the effect
/// set itself prevents re-expanding any state reached earlier, and states
/// discovered at exactly `max_depth` are still tested against the target
/// but not expanded further.
///
/// # Arguments
///
/// * `target` - Effects that must all be present (assumed pre-validated)
/// * `start` - Effects already on the product
/// * `ingredients` - Ingredient universe in a stable iteration order
/// * `max_depth` - Maximum number of ingredients to add
///
/// # Returns
///
/// [`SearchOutcome::AlreadySatisfied`] if `target` is already contained in
/// `start` (this includes an empty target), [`SearchOutcome::Found`] with
/// the shortest sequence otherwise, or [`SearchOutcome::NotFound`] when the
/// bounded search space holds no qualifying state. Exhaustion is a normal
/// result, not an error.
pub fn find_shortest_sequence(
    catalog: &Catalog,
    target: &EffectSet,
    start: &EffectSet,
    ingredients: &[String],
    max_depth: usize,
) -> SearchOutcome {
    if target.is_subset(start) {
        return SearchOutcome::AlreadySatisfied;
    }

    let mut visited: HashSet<EffectSet> = HashSet::new();
    visited.insert(start.clone());
    let mut queue: VecDeque<(EffectSet, Vec<String>)> = VecDeque::new();
    queue.push_back((start.clone(), Vec::new()));

    while let Some((state, sequence)) = queue.pop_front() {
        if sequence.len() >= max_depth {
            continue;
        }

        for ingredient in ingredients {
            let next = apply_ingredient(catalog, &state, ingredient);
            if visited.contains(&next) {
                continue;
            }
            visited.insert(next.clone());

            let mut next_sequence = sequence.clone();
            next_sequence.push(ingredient.clone());
            if target.is_subset(&next) {
                return SearchOutcome::Found(next_sequence);
            }
            queue.push_back((next, next_sequence));
        }
    }

    SearchOutcome::NotFound
}

/// Enumerates every effect set reachable within `max_depth` ingredient
/// applications and returns the top `k` mixes by the requested ranking key.
///
/// Unlike [`find_shortest_sequence`] this traversal never stops early:
/// every dequeued state - including the bare base product and states at the
/// depth limit - is scored with its price, total cost (base price plus the
/// purchase price of each ingredient in the recorded sequence), profit, and
/// profit margin. Deduplication is by resulting state, not by sequence:
/// when two different sequences reach the same effect set, only the
/// first-discovered sequence is scored and kept. That can hide a cheaper
/// path to the same state found later, which is accepted behavior here
/// rather than a guarantee about path cost.
///
/// Ties under the ranking key keep their discovery order (the sort is
/// stable).
///
/// # Errors
///
/// Returns [`PriceError::UnknownProduct`] if `base_product` is not in the
/// catalog's price table.
pub fn find_top_mixes(
    catalog: &Catalog,
    base_product: &str,
    max_depth: usize,
    k: usize,
    rank_by: RankBy,
) -> Result<Vec<RankedMix>, PriceError> {
    let base_price = catalog
        .base_price(base_product)
        .ok_or_else(|| PriceError::UnknownProduct(base_product.to_string()))?;

    let ingredients = catalog.ingredient_names();

    let start = EffectSet::new();
    let mut visited: HashSet<EffectSet> = HashSet::new();
    visited.insert(start.clone());
    let mut queue: VecDeque<(EffectSet, Vec<String>)> = VecDeque::new();
    queue.push_back((start, Vec::new()));

    let mut results: Vec<RankedMix> = Vec::new();

    while let Some((state, sequence)) = queue.pop_front() {
        let price = calculate_price(catalog, base_product, &state)?;
        let cost = base_price
            + sequence
                .iter()
                .filter_map(|name| catalog.ingredient(name))
                .map(|ingredient| ingredient.price)
                .sum::<i64>();
        let profit = price - cost;
        let profit_margin = round_to_cents(profit as f64 / cost as f64);

        results.push(RankedMix {
            price,
            sequence: sequence.clone(),
            effects: state.clone(),
            cost,
            profit,
            profit_margin,
        });

        if sequence.len() >= max_depth {
            continue;
        }

        for ingredient in &ingredients {
            let next = apply_ingredient(catalog, &state, ingredient);
            if visited.contains(&next) {
                continue;
            }
            visited.insert(next.clone());
            let mut next_sequence = sequence.clone();
            next_sequence.push(ingredient.clone());
            queue.push_back((next, next_sequence));
        }
    }

    match rank_by {
        RankBy::Price => results.sort_by(|a, b| b.price.cmp(&a.price)),
        RankBy::Profit => results.sort_by(|a, b| b.profit.cmp(&a.profit)),
        RankBy::ProfitMargin => results.sort_by(|a, b| {
            b.profit_margin
                .partial_cmp(&a.profit_margin)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
    }
    results.truncate(k);

    Ok(results)
}

/// Calculates the sell price of a base product carrying a set of effects.
///
/// The price is `base_price * (1 + sum of effect multipliers)`, rounded to
/// the nearest integer with halves away from zero. An effect with no entry
/// in the multiplier table contributes 0.0; that is a documented policy for
/// sparse tables, not an error.
///
/// # Errors
///
/// Returns [`PriceError::UnknownProduct`] if `base_product` is not in the
/// catalog's price table.
///
/// # Example
///
/// ```
/// use mixmax::data::builtin_catalog;
/// use mixmax::mixer::calculate_price;
/// use mixmax::models::EffectSet;
///
/// let catalog = builtin_catalog().unwrap();
/// assert_eq!(calculate_price(&catalog, "Weed", &EffectSet::new()).unwrap(), 35);
/// ```
pub fn calculate_price(
    catalog: &Catalog,
    base_product: &str,
    effects: &EffectSet,
) -> Result<i64, PriceError> {
    let base_price = catalog
        .base_price(base_product)
        .ok_or_else(|| PriceError::UnknownProduct(base_product.to_string()))?;

    let multiplier_sum: f64 = effects
        .iter()
        .map(|effect| catalog.multiplier(effect).unwrap_or(0.0))
        .sum();

    Ok((base_price as f64 * (1.0 + multiplier_sum)).round() as i64)
}

/// Rounds to two decimal places, halves away from zero.
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
