//! # Mixmax
//!
//! A command-line tool and library for simulating ingredient mixing and
//! searching for the most valuable product mixes.
//!
//! Adding an ingredient to a product always contributes the ingredient's
//! base effects and may fire transformation rules that replace effects
//! already present. This crate provides:
//!
//! - The transition engine that computes the effect set after one
//!   ingredient application
//! - A breadth-first search for the shortest ingredient sequence that
//!   achieves a target set of effects
//! - An exhaustive bounded enumeration of reachable mixes, ranked by
//!   price, profit, or profit margin
//! - The pricing model mapping a base product and its effects to a price
//!
//! ## Modules
//!
//! - [`models`] - Core data structures: ingredients, rules, the catalog,
//!   and search result types
//! - [`data`] - CSV catalog loading and the embedded dataset
//! - [`mixer`] - The transition engine, both searches, and pricing
//! - [`display`] - Output formatting and display utilities
//!
//! ## Example Usage
//!
//! ```
//! use mixmax::data::builtin_catalog;
//! use mixmax::mixer::find_shortest_sequence;
//! use mixmax::models::{EffectSet, SearchOutcome};
//!
//! let catalog = builtin_catalog().unwrap();
//!
//! // Which single ingredient gives a Bright-Eyed product?
//! let (target, _invalid) = catalog.partition_effects(["Bright-Eyed"]);
//! let ingredients = catalog.ingredient_names();
//! let outcome = find_shortest_sequence(&catalog, &target, &EffectSet::new(), &ingredients, 8);
//!
//! assert_eq!(outcome, SearchOutcome::Found(vec!["Battery".to_string()]));
//! ```
//!
//! ## Search Characteristics
//!
//! Both searches are bounded by a maximum sequence length. The shortest
//! search stops at the first qualifying state and is guaranteed minimal;
//! the ranked search visits every reachable state once (states, not
//! sequences, are deduplicated) and is therefore exponential in the depth
//! bound - keep `max_depth` small.

pub mod data;
pub mod display;
pub mod mixer;
pub mod models;
pub mod wasm;
