//! Input normalization and advisory diagnostics.
//!
//! The layout never rejects input. Degenerate weights are mapped to zero and
//! reported here so hosts can surface them.

use crate::model::Group;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

/// Map a raw weight to the value used by the layout.
///
/// NaN, infinities and negative numbers become `0.0`.
#[must_use]
pub fn normalize_weight(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// How serious a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Layout is well defined but the cell is invisible.
    Warning,
    /// The input breaks a data-model invariant.
    Error,
}

/// Something odd about a treemap input.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// No groups at all.
    #[error("input has no groups")]
    EmptyInput,
    /// Every weight is zero; all cells collapse to zero area.
    #[error("total value is zero")]
    ZeroTotal,
    /// Group key seen more than once.
    #[error("duplicate group key `{key}`")]
    DuplicateGroupKey {
        /// Offending key
        key: String,
    },
    /// Group with no items.
    #[error("group `{group}` has no items")]
    EmptyGroup {
        /// Group key
        group: String,
    },
    /// Item weight is exactly zero.
    #[error("item `{item}` in group `{group}` has zero value")]
    ZeroWeight {
        /// Group key
        group: String,
        /// Item key
        item: String,
    },
    /// Item weight is negative; treated as zero.
    #[error("item `{item}` in group `{group}` has negative value {value}")]
    NegativeWeight {
        /// Group key
        group: String,
        /// Item key
        item: String,
        /// Raw value
        value: f64,
    },
    /// Item weight is NaN or infinite; treated as zero.
    #[error("item `{item}` in group `{group}` has non-finite value")]
    NonFiniteWeight {
        /// Group key
        group: String,
        /// Item key
        item: String,
    },
}

impl Diagnostic {
    /// Severity of this finding.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::DuplicateGroupKey { .. } | Self::NonFiniteWeight { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// Inspect `groups` and list everything the layout will paper over.
#[must_use]
pub fn diagnose(groups: &[Group]) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    if groups.is_empty() {
        out.push(Diagnostic::EmptyInput);
        return out;
    }

    let mut seen = HashSet::new();
    for group in groups {
        if !seen.insert(group.key.as_str()) {
            out.push(Diagnostic::DuplicateGroupKey {
                key: group.key.clone(),
            });
        }
        if group.is_empty() {
            out.push(Diagnostic::EmptyGroup {
                group: group.key.clone(),
            });
        }
        for item in &group.items {
            let (group, name) = (group.key.clone(), item.key.clone());
            if !item.value.is_finite() {
                out.push(Diagnostic::NonFiniteWeight { group, item: name });
            } else if item.value < 0.0 {
                out.push(Diagnostic::NegativeWeight {
                    group,
                    item: name,
                    value: item.value,
                });
            } else if item.value == 0.0 {
                out.push(Diagnostic::ZeroWeight { group, item: name });
            }
        }
    }

    if crate::model::total_value(groups) <= 0.0 {
        out.push(Diagnostic::ZeroTotal);
    }
    out
}
