//! Tests for display and formatting utilities.

use mixmax::display::{format_effects, format_sequence};
use mixmax::models::EffectSet;

fn effects(names: &[&str]) -> EffectSet {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn test_format_effects_empty() {
    assert_eq!(format_effects(&EffectSet::new()), "[]");
}

#[test]
fn test_format_effects_is_sorted() {
    // Insertion order does not matter; output is always sorted.
    let set = effects(&["Toxic", "Energizing", "Euphoric"]);
    assert_eq!(format_effects(&set), "[Energizing, Euphoric, Toxic]");
}

#[test]
fn test_format_effects_single() {
    assert_eq!(format_effects(&effects(&["Bright-Eyed"])), "[Bright-Eyed]");
}

#[test]
fn test_format_sequence_empty() {
    assert_eq!(format_sequence(&[]), "[]");
}

#[test]
fn test_format_sequence_preserves_order() {
    let sequence = vec![
        "Mega Bean".to_string(),
        "Cuke".to_string(),
        "Mega Bean".to_string(),
    ];
    assert_eq!(format_sequence(&sequence), "[Mega Bean, Cuke, Mega Bean]");
}
