//! Mixmax - Command Line Interface
//!
//! This is the main entry point for the mixing calculator.
//! Run with `--help` to see all available subcommands.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

use mixmax::{
    data::{builtin_catalog, load_catalog},
    display::{
        display_mix_steps, display_shortest_outcome, display_top_mixes, format_effects,
        warn_ignored,
    },
    mixer::{apply_sequence, calculate_price, find_shortest_sequence, find_top_mixes},
    models::{Catalog, EffectSet, RankBy},
};

/// Command-line arguments for Mixmax.
#[derive(Parser, Debug)]
#[command(name = "mixmax")]
#[command(author, version, about = "Simulate ingredient mixing and search for the most valuable product mixes", long_about = None)]
struct Cli {
    /// Directory containing the catalog CSV files (built-in dataset if omitted)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the final effects of an ingredient sequence
    Effects {
        /// Sequence of ingredients to add, in order (e.g. "Mega Bean" "Cuke")
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// Effects already present before mixing
        #[arg(long, num_args = 0..)]
        start_effects: Vec<String>,

        /// Display name for the starting product
        #[arg(long)]
        product_name: Option<String>,
    },

    /// Find the shortest ingredient sequence achieving target effects
    Shortest {
        /// Effects that must all be present in the result
        #[arg(required = true)]
        target_effects: Vec<String>,

        /// Effects already present before mixing
        #[arg(long, num_args = 0..)]
        start_effects: Vec<String>,

        /// Display name for the starting product
        #[arg(long)]
        product_name: Option<String>,

        /// Maximum number of additional ingredients to try
        #[arg(long, default_value_t = 8)]
        max_ingredients: usize,
    },

    /// Find the most valuable mixes for a base product
    Expensive {
        /// The starting base product
        base_product: String,

        /// Maximum number of ingredients to mix
        max_ingredients: usize,

        /// Number of top results to display
        #[arg(long, default_value_t = 10)]
        num_results: usize,

        /// Ranking key for the results
        #[arg(long, value_enum, default_value_t = RankBy::Price)]
        rank_by: RankBy,
    },

    /// Calculate the price for a base product and effect list
    Price {
        /// The starting base product
        base_product: String,

        /// Effects present on the finished product
        #[arg(required = true)]
        effects: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let catalog = match &cli.data_dir {
        Some(dir) => {
            if !dir.exists() {
                eprintln!("Error: data directory '{}' not found.", dir.display());
                std::process::exit(1);
            }
            load_catalog(dir)?
        }
        None => builtin_catalog()?,
    };

    println!("Mixmax - Product Mixing Calculator");
    println!("================================================================");
    println!(
        "Loaded {} ingredients, {} effects, {} base products.",
        catalog.ingredient_count(),
        catalog.effect_count(),
        catalog.base_products().len()
    );

    match cli.command {
        Command::Effects {
            ingredients,
            start_effects,
            product_name,
        } => run_effects(&catalog, &ingredients, &start_effects, product_name.as_deref()),
        Command::Shortest {
            target_effects,
            start_effects,
            product_name,
            max_ingredients,
        } => run_shortest(
            &catalog,
            &target_effects,
            &start_effects,
            product_name.as_deref(),
            max_ingredients,
        ),
        Command::Expensive {
            base_product,
            max_ingredients,
            num_results,
            rank_by,
        } => run_expensive(&catalog, &base_product, max_ingredients, num_results, rank_by)?,
        Command::Price {
            base_product,
            effects,
        } => run_price(&catalog, &base_product, &effects)?,
    }

    Ok(())
}

/// Display name for a starting product, mirroring the effect list when no
/// explicit name was given.
fn start_display_name(product_name: Option<&str>, start: &EffectSet) -> String {
    match product_name {
        Some(name) => name.to_string(),
        None if start.is_empty() => "Empty product".to_string(),
        None => "Unnamed product".to_string(),
    }
}

fn run_effects(
    catalog: &Catalog,
    ingredients: &[String],
    start_effects: &[String],
    product_name: Option<&str>,
) {
    let (start, invalid_effects) = catalog.partition_effects(start_effects);
    warn_ignored("starting effects", &invalid_effects);
    let (sequence, invalid_ingredients) = catalog.partition_ingredients(ingredients);
    warn_ignored("ingredients", &invalid_ingredients);

    if sequence.is_empty() {
        eprintln!("[WARNING] No valid ingredients in the sequence to apply.");
        return;
    }

    println!();
    println!("Calculating Effects");
    println!(
        "  Starting product: {}",
        start_display_name(product_name, &start)
    );
    if !start.is_empty() {
        println!("  Starting effects: {}", format_effects(&start));
    }

    let steps = apply_sequence(catalog, &start, &sequence);
    display_mix_steps(&start, &steps);
}

fn run_shortest(
    catalog: &Catalog,
    target_effects: &[String],
    start_effects: &[String],
    product_name: Option<&str>,
    max_ingredients: usize,
) {
    let (target, invalid_targets) = catalog.partition_effects(target_effects);
    warn_ignored("target effects", &invalid_targets);
    let (start, invalid_start) = catalog.partition_effects(start_effects);
    warn_ignored("starting effects", &invalid_start);

    if target.is_empty() {
        eprintln!("[WARNING] No valid target effects remain; the empty sequence satisfies the request.");
    }

    println!();
    println!(
        "Searching for shortest sequence (max {} added ingredients)",
        max_ingredients
    );
    println!(
        "  Starting product: {}",
        start_display_name(product_name, &start)
    );
    if !start.is_empty() {
        println!("  Starting effects: {}", format_effects(&start));
    }
    println!("  Target effects:   {}", format_effects(&target));

    let ingredients = catalog.ingredient_names();
    let outcome = find_shortest_sequence(catalog, &target, &start, &ingredients, max_ingredients);
    display_shortest_outcome(catalog, &outcome, &start, max_ingredients);
}

fn run_expensive(
    catalog: &Catalog,
    base_product: &str,
    max_ingredients: usize,
    num_results: usize,
    rank_by: RankBy,
) -> Result<(), Box<dyn Error>> {
    let Some(base_price) = catalog.base_price(base_product) else {
        eprintln!("Error: unknown base product '{}'.", base_product);
        eprintln!("Valid options: {}", catalog.base_products().join(", "));
        std::process::exit(1);
    };

    let results = find_top_mixes(catalog, base_product, max_ingredients, num_results, rank_by)?;
    display_top_mixes(base_product, base_price, &results, rank_by);
    Ok(())
}

fn run_price(
    catalog: &Catalog,
    base_product: &str,
    effects: &[String],
) -> Result<(), Box<dyn Error>> {
    let (valid, invalid) = catalog.partition_effects(effects);
    warn_ignored("effects", &invalid);

    if valid.is_empty() {
        eprintln!("Error: no valid effects provided for price calculation.");
        std::process::exit(1);
    }

    if catalog.base_price(base_product).is_none() {
        eprintln!("Error: unknown base product '{}'.", base_product);
        eprintln!("Valid options: {}", catalog.base_products().join(", "));
        std::process::exit(1);
    }

    let price = calculate_price(catalog, base_product, &valid)?;
    println!();
    println!("Calculating Price");
    println!("  Base Product:     {}", base_product);
    println!("  Effects (valid):  {}", format_effects(&valid));
    println!("  Calculated Price: ${}", price);
    Ok(())
}
