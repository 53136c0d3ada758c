//! Entropy-based password strength policy.
//!
//! Entropy is estimated as `length * log2(base)`, where `base` is the size of
//! the character pool implied by the classes present in the password, and
//! `length` discounts runs of repeated or sequential characters, walked in
//! either direction.

use std::collections::HashSet;

use super::errors::PasswordError;

/// Minimum estimated entropy a password must reach.
pub const MIN_ENTROPY_BITS: f64 = 60.0;

const REPLACE_CHARS: &str = "!@$&*";
const SEPARATOR_CHARS: &str = "_-., ";
const OTHER_SPECIAL_CHARS: &str = "\"#%'()+/:;<=>?[\\]^{|}~";
const LOWER_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGIT_CHARS: &str = "0123456789";

const SEQUENCES: [&str; 5] = [
    "0123456789",
    "qwertyuiop",
    "asdfghjkl",
    "zxcvbnm",
    "abcdefghijklmnopqrstuvwxyz",
];

/// Check a password against a minimum entropy.
///
/// # Errors
/// * `InsecurePassword` - Estimated entropy is below `min_bits`
pub fn validate_password(password: &str, min_bits: f64) -> Result<(), PasswordError> {
    let actual = entropy(password);
    if actual < min_bits {
        return Err(PasswordError::InsecurePassword {
            actual,
            minimum: min_bits,
        });
    }
    Ok(())
}

/// Estimate the entropy of a password in bits.
pub fn entropy(password: &str) -> f64 {
    let base = pool_size(password);
    if base == 0 {
        return 0.0;
    }
    effective_length(password) as f64 * (base as f64).log2()
}

fn pool_size(password: &str) -> usize {
    let classes = [
        REPLACE_CHARS,
        SEPARATOR_CHARS,
        OTHER_SPECIAL_CHARS,
        LOWER_CHARS,
        UPPER_CHARS,
        DIGIT_CHARS,
    ];

    let distinct: HashSet<char> = password.chars().collect();
    let mut present = [false; 6];
    let mut base = 0;

    for c in distinct {
        match classes.iter().position(|class| class.contains(c)) {
            Some(index) => present[index] = true,
            None => base += 1,
        }
    }

    base + classes
        .iter()
        .zip(present)
        .filter(|(_, present)| *present)
        .map(|(class, _)| class.chars().count())
        .sum::<usize>()
}

fn effective_length(password: &str) -> usize {
    let mut chars = collapse_repeats(password.chars().collect());
    for sequence in SEQUENCES {
        chars = collapse_sequence(chars, sequence);
        let reversed: String = sequence.chars().rev().collect();
        chars = collapse_sequence(chars, &reversed);
    }
    chars.len()
}

/// Drop every character beyond the second in a run of identical characters.
fn collapse_repeats(chars: Vec<char>) -> Vec<char> {
    let mut kept: Vec<char> = Vec::with_capacity(chars.len());
    for c in chars {
        let run = kept.iter().rev().take_while(|&&k| k == c).count();
        if run < 2 {
            kept.push(c);
        }
    }
    kept
}

/// Drop every character beyond the second in a run that walks forward
/// through `sequence` (e.g. "1234" keeps "12").
fn collapse_sequence(chars: Vec<char>, sequence: &str) -> Vec<char> {
    let sequence: Vec<char> = sequence.chars().collect();
    let position = |c: char| sequence.iter().position(|&s| s == c);

    let mut kept: Vec<char> = Vec::with_capacity(chars.len());
    let mut run = 0;
    let mut previous: Option<usize> = None;

    for c in chars {
        let current = position(c);
        run = match (previous, current) {
            (Some(p), Some(n)) if n == p + 1 => run + 1,
            (_, Some(_)) => 1,
            _ => 0,
        };
        previous = current;

        if run <= 2 {
            kept.push(c);
        }
    }
    kept
}
