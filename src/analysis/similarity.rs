//! Similarity scoring between two methods.
//!
//! The base score normalizes the tree edit distance by the larger tree size.
//! On top of that sit the size-ratio floor and short-function penalty (both
//! optional) and a multiplicative structural penalty chain driven by the
//! feature sets, with the final penalty clamped to [0.1, 1].

use crate::analysis::structure::StructuralFeatures;
use crate::apted::AptedEngine;
use crate::config::DetectorOptions;
use crate::core::MethodInfo;
use std::collections::HashSet;

/// Similarity in [0, 1] between two methods. Allocates a fresh engine; the
/// detector reuses pooled engines via [`score_with_engine`].
pub fn similarity(a: &MethodInfo, b: &MethodInfo, options: &DetectorOptions) -> f64 {
    let mut engine = AptedEngine::new(options.apted);
    score_with_engine(a, b, options, &mut engine)
}

pub(crate) fn score_with_engine(
    a: &MethodInfo,
    b: &MethodInfo,
    options: &DetectorOptions,
    engine: &mut AptedEngine,
) -> f64 {
    let s1 = a.token_count();
    let s2 = b.token_count();
    let max_size = s1.max(s2);
    if max_size == 0 {
        return 1.0;
    }

    let distance = engine.distance(a.tree(), b.tree());
    let tsed = (1.0 - distance / max_size as f64).max(0.0);

    let mut sim = tsed;
    if options.size_penalty {
        let ratio = s1.min(s2) as f64 / max_size as f64;
        if ratio < 0.1 {
            sim = tsed * (ratio * 10.0);
        } else if ratio < 0.3 {
            sim = tsed * (0.7 + ratio);
        }
        let avg_lines = (a.line_count() + b.line_count()) as f64 / 2.0;
        if avg_lines < 10.0 {
            sim *= avg_lines / 10.0;
        }
    }

    let penalty = structural_penalty(
        a.features(),
        b.features(),
        distance,
        max_size,
        options.apted.rename_cost,
    );
    (sim * penalty).clamp(0.0, 1.0)
}

fn structural_penalty(
    f1: &StructuralFeatures,
    f2: &StructuralFeatures,
    distance: f64,
    max_size: usize,
    rename_cost: f64,
) -> f64 {
    let mut penalty = 1.0;

    let complexity_diff =
        (f1.control_flow_complexity as f64 - f2.control_flow_complexity as f64).abs();
    if complexity_diff > 3.0 {
        penalty *= 0.80;
    } else if complexity_diff > 1.0 {
        penalty *= 0.95;
    }

    if !f1.loop_types.is_empty() && !f2.loop_types.is_empty() && f1.loop_types != f2.loop_types {
        penalty *= 0.90;
    }

    let conditional_diff = f1.conditional_count.abs_diff(f2.conditional_count);
    if conditional_diff > 2 {
        penalty *= 0.85;
    }

    let call_max = f1.method_call_count.max(f2.method_call_count);
    if call_max > 0 {
        let call_diff = f1.method_call_count.abs_diff(f2.method_call_count);
        if call_diff as f64 > 0.5 * call_max as f64 {
            penalty *= 0.90;
        }
    }

    let var_max = f1.variable_count.max(f2.variable_count);
    if var_max > 0 {
        let var_diff = f1.variable_count.abs_diff(f2.variable_count);
        if var_diff as f64 > 0.4 * var_max as f64 {
            penalty *= 0.95;
        }
    }

    if f1.max_nesting_level.abs_diff(f2.max_nesting_level) > 2 {
        penalty *= 0.90;
    }

    let edit_ratio = distance / max_size as f64;
    if edit_ratio > 0.4 {
        penalty *= 0.8f64.powf(edit_ratio);
    }

    let value_similarity = (0.7 * jaccard(&f1.identifiers, &f2.identifiers)
        + 0.3 * jaccard(&f1.literals, &f2.literals))
        * (1.0 - rename_cost);
    if value_similarity < 0.3 {
        penalty *= 0.85;
    } else if value_similarity < 0.5 {
        penalty *= 0.95;
    }

    penalty.clamp(0.1, 1.0)
}

/// Jaccard index; two empty sets are identical and score 1.
fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}
