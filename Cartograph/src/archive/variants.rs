//! Path spelling variants
//!
//! Some client installations store the same directory under different
//! casings (`Interface\WorldMap` vs `Interface\WORLDMAP`). Each rule rewrites a
//! logical path into one alternative spelling; the candidates are the original
//! path followed by every rule that applies, in rule order.

use serde::{Deserialize, Serialize};

/// One rewrite applied to a logical archive path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathVariantRule {
    /// Replace `segment` with its all-uppercase spelling.
    Uppercase { segment: String },
    /// Replace `segment` with its all-lowercase spelling.
    Lowercase { segment: String },
    /// Replace every occurrence of `from` with `to`.
    Replace { from: String, to: String },
}

impl PathVariantRule {
    /// Rewrite `path`, or `None` if the rule does not match (case-sensitive).
    #[must_use]
    pub fn apply(&self, path: &str) -> Option<String> {
        match self {
            Self::Uppercase { segment } => substitute(path, segment, &segment.to_uppercase()),
            Self::Lowercase { segment } => substitute(path, segment, &segment.to_lowercase()),
            Self::Replace { from, to } => substitute(path, from, to),
        }
    }
}

fn substitute(path: &str, from: &str, to: &str) -> Option<String> {
    if from.is_empty() || !path.contains(from) {
        return None;
    }
    Some(path.replace(from, to))
}

/// Candidate spellings for `path`, original first, without duplicates.
#[must_use]
pub fn path_variants(path: &str, rules: &[PathVariantRule]) -> Vec<String> {
    let mut candidates = vec![path.to_string()];
    for variant in rules.iter().filter_map(|rule| rule.apply(path)) {
        if !candidates.contains(&variant) {
            candidates.push(variant);
        }
    }
    candidates
}
