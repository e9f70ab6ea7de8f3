//! Display and formatting utilities for Mixmax.
//!
//! This module provides functions for formatting effect sets and ingredient
//! sequences and for displaying search results to the user in a readable
//! format.

use crate::mixer::apply_sequence;
use crate::models::{Catalog, EffectSet, MixStep, RankBy, RankedMix, SearchOutcome};

/// Formats an effect set as a sorted, bracketed list.
///
/// # Example
///
/// ```
/// use mixmax::display::format_effects;
/// use mixmax::models::EffectSet;
///
/// let mut effects = EffectSet::new();
/// effects.insert("Energizing".to_string());
/// effects.insert("Euphoric".to_string());
///
/// assert_eq!(format_effects(&effects), "[Energizing, Euphoric]");
/// assert_eq!(format_effects(&EffectSet::new()), "[]");
/// ```
pub fn format_effects(effects: &EffectSet) -> String {
    let names: Vec<&str> = effects.iter().map(String::as_str).collect();
    format!("[{}]", names.join(", "))
}

/// Formats an ingredient sequence as a bracketed list, preserving order.
///
/// # Example
///
/// ```
/// use mixmax::display::format_sequence;
///
/// let sequence = vec!["Cuke".to_string(), "Gasoline".to_string()];
/// assert_eq!(format_sequence(&sequence), "[Cuke, Gasoline]");
/// assert_eq!(format_sequence(&[]), "[]");
/// ```
pub fn format_sequence(sequence: &[String]) -> String {
    format!("[{}]", sequence.join(", "))
}

/// Prints a non-fatal warning about ignored invalid names.
///
/// Does nothing when `names` is empty.
pub fn warn_ignored(kind: &str, names: &[String]) {
    if !names.is_empty() {
        eprintln!("[WARNING] Ignored invalid {}: {}", kind, names.join(", "));
    }
}

/// Displays an applied ingredient sequence step by step.
///
/// Each step shows the resulting effect set plus what the step added and
/// removed relative to the previous state.
pub fn display_mix_steps(start: &EffectSet, steps: &[MixStep]) {
    println!();
    println!("[MIXING STEPS]");
    println!("----------------------------------------------------------------");
    println!("  Initial Effects: {}", format_effects(start));

    let mut previous = start.clone();
    for (i, step) in steps.iter().enumerate() {
        println!();
        println!("  Step {}: {}", i + 1, step.ingredient);
        if step.effects == previous {
            println!("    Result:  (no change)");
        } else {
            let added: Vec<&str> = step
                .effects
                .difference(&previous)
                .map(String::as_str)
                .collect();
            let removed: Vec<&str> = previous
                .difference(&step.effects)
                .map(String::as_str)
                .collect();
            println!("    Result:  {}", format_effects(&step.effects));
            if !added.is_empty() {
                println!("    Added:   {}", added.join(", "));
            }
            if !removed.is_empty() {
                println!("    Removed: {}", removed.join(", "));
            }
        }
        previous = step.effects.clone();
    }

    let final_effects = steps.last().map_or(start, |step| &step.effects);
    println!();
    println!(
        "  Final Effects after {} steps: {}",
        steps.len(),
        format_effects(final_effects)
    );
}

/// Displays the outcome of a shortest-sequence search.
///
/// For a found sequence the resulting effect set is recomputed so it can be
/// shown alongside the ingredients.
pub fn display_shortest_outcome(
    catalog: &Catalog,
    outcome: &SearchOutcome,
    start: &EffectSet,
    max_depth: usize,
) {
    println!();
    match outcome {
        SearchOutcome::AlreadySatisfied => {
            println!("Starting product already meets the target criteria.");
            println!("  Sequence (0 added ingredients): []");
            println!("  Resulting Effects: {}", format_effects(start));
        }
        SearchOutcome::Found(sequence) => {
            let steps = apply_sequence(catalog, start, sequence);
            let final_effects = steps.last().map_or(start, |step| &step.effects);
            println!("Solution Found!");
            println!(
                "  Sequence ({} added ingredients): {}",
                sequence.len(),
                format_sequence(sequence)
            );
            println!("  Resulting Effects: {}", format_effects(final_effects));
        }
        SearchOutcome::NotFound => {
            println!(
                "No solution found adding up to {} ingredients.",
                max_depth
            );
        }
    }
}

/// Displays the ranked results of the top-K mix search.
pub fn display_top_mixes(
    base_product: &str,
    base_price: i64,
    results: &[RankedMix],
    rank_by: RankBy,
) {
    println!();
    println!("+================================================================+");
    println!("|                    TOP RANKED MIX RESULTS                      |");
    println!("+================================================================+");
    println!();
    println!("  Base Product: {} (${})", base_product, base_price);
    println!("  Ranked By:    {}", rank_label(rank_by));

    if results.is_empty() {
        println!();
        println!("  No results found (check max ingredients).");
        return;
    }

    println!();
    println!("----------------------------------------------------------------");
    for (i, mix) in results.iter().enumerate() {
        let sequence = if mix.sequence.is_empty() {
            "[] (unmixed)".to_string()
        } else {
            format_sequence(&mix.sequence)
        };
        println!(
            "  {}. Price: ${}   Cost: ${}   Profit: ${}   Margin: {:.2}",
            i + 1,
            mix.price,
            mix.cost,
            mix.profit,
            mix.profit_margin
        );
        println!(
            "     Sequence ({} ingredients): {}",
            mix.sequence.len(),
            sequence
        );
        println!("     Effects: {}", format_effects(&mix.effects));
    }
}

fn rank_label(rank_by: RankBy) -> &'static str {
    match rank_by {
        RankBy::Price => "price",
        RankBy::Profit => "profit",
        RankBy::ProfitMargin => "profit margin",
    }
}
