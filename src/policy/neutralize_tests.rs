//! Tests for the neutralization transform.

use super::*;

#[test]
fn test_clinical_label_stripped() {
    let out = neutralize("He is a narcissist and everyone knows it.");
    assert!(!out.text.to_lowercase().contains("narcissist"));
    assert!(out.replacements >= 1);
}

#[test]
fn test_absolutes_become_probabilistic() {
    let out = neutralize("She always interrupts and never listens.");
    assert!(out.text.contains("often"));
    assert!(out.text.contains("rarely"));
    assert!(!out.text.contains("always"));
    assert!(!out.text.contains("never"));
    assert_eq!(out.replacements, 2);
}

#[test]
fn test_clean_text_unchanged() {
    let input = "We talked calmly about our plans for the week.";
    let out = neutralize(input);
    assert_eq!(out.text, input);
    assert_eq!(out.replacements, 0);
}

#[test]
fn test_case_insensitive() {
    let out = neutralize("My partner is TOXIC.");
    assert!(!out.text.to_lowercase().contains("toxic"));
}

#[test]
fn test_gaslighting_reworded() {
    let out = neutralize("I think he is gaslighting me.");
    assert!(!out.text.contains("gaslighting"));
    assert!(out.text.contains("distort shared reality"));
}

#[test]
fn test_deterministic() {
    let input = "He is a narcissist who always lies.";
    assert_eq!(neutralize(input), neutralize(input));
}

#[test]
fn test_diagnosis_shorthand_neutralized() {
    let out = neutralize("I'm sure she has BPD.");
    assert!(!out.text.to_lowercase().contains("bpd"));
    assert!(out.text.contains("clinician"));
}
