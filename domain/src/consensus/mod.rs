//! Reconciliation of independently generated candidate results
//!
//! Several pipelines answer the same request; this module merges their
//! coerced outputs into one confident result. Selection favors the
//! candidate with the richest structured breakdown: a model that
//! itemized the plate is trusted over one that only guessed totals.
//!
//! Merge rules:
//!
//! - The **primary** is the survivor whose breakdown item count is
//!   largest (ties go to the first seen).
//! - If the primary has a breakdown, aggregate numeric totals are the
//!   exact sum of each item's individual contribution.
//! - Otherwise, aggregate numeric totals are the arithmetic mean across
//!   all survivors.
//! - Qualitative fields are taken from the primary only.

use serde_json::{Number, Value};

/// Where a feature's breakdown and totals live inside its result object.
///
/// Pointers use JSON Pointer syntax (`/itemBreakdown/items`).
#[derive(Debug, Clone)]
pub struct MergePlan {
    /// Pointer to the array of breakdown items
    pub items: String,
    /// Pointer, within one item, to its numeric contribution object
    pub item_totals: String,
    /// Pointer to the aggregate totals object being recomputed
    pub totals: String,
}

impl MergePlan {
    pub fn new(
        items: impl Into<String>,
        item_totals: impl Into<String>,
        totals: impl Into<String>,
    ) -> Self {
        Self {
            items: items.into(),
            item_totals: item_totals.into(),
            totals: totals.into(),
        }
    }
}

/// How the aggregate totals of a merged result were computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Summed over the primary's breakdown items
    SummedBreakdown,
    /// Averaged across all survivors (no candidate had a breakdown)
    MeanOfSurvivors,
}

/// The outcome of merging candidate results.
#[derive(Debug, Clone)]
pub struct ConsensusOutcome {
    /// The merged result object
    pub merged: Value,
    /// Index of the primary candidate in the input slice
    pub primary_index: usize,
    /// Breakdown item count of the primary
    pub breakdown_len: usize,
    /// How totals were aggregated
    pub aggregation: Aggregation,
}

/// Merge candidate results according to a plan.
///
/// Returns `None` when no candidates survive — the caller surfaces that
/// as a consensus failure.
pub fn merge_candidates(candidates: &[Value], plan: &MergePlan) -> Option<ConsensusOutcome> {
    if candidates.is_empty() {
        return None;
    }

    // Largest breakdown wins; ties go to the first seen
    let mut primary_index = 0;
    let mut breakdown_len = items_len(&candidates[0], plan);
    for (i, candidate) in candidates.iter().enumerate().skip(1) {
        let len = items_len(candidate, plan);
        if len > breakdown_len {
            primary_index = i;
            breakdown_len = len;
        }
    }

    let mut merged = candidates[primary_index].clone();

    let aggregation = if breakdown_len > 0 {
        sum_breakdown(&mut merged, plan);
        Aggregation::SummedBreakdown
    } else {
        mean_totals(&mut merged, candidates, plan);
        Aggregation::MeanOfSurvivors
    };

    Some(ConsensusOutcome {
        merged,
        primary_index,
        breakdown_len,
        aggregation,
    })
}

fn items_len(candidate: &Value, plan: &MergePlan) -> usize {
    candidate
        .pointer(&plan.items)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Recompute each numeric field of the totals object as the exact sum of
/// the per-item contributions.
fn sum_breakdown(merged: &mut Value, plan: &MergePlan) {
    let items: Vec<Value> = merged
        .pointer(&plan.items)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let Some(totals) = merged.pointer_mut(&plan.totals).and_then(Value::as_object_mut) else {
        return;
    };

    for (field, value) in totals.iter_mut() {
        if !value.is_number() {
            continue;
        }
        let sum: f64 = items
            .iter()
            .filter_map(|item| item.pointer(&plan.item_totals))
            .filter_map(|contrib| contrib.get(field))
            .filter_map(Value::as_f64)
            .sum();
        *value = Value::Number(to_number(sum));
    }
}

/// Recompute each numeric field of the totals object as the mean of the
/// survivors' corresponding fields.
fn mean_totals(merged: &mut Value, candidates: &[Value], plan: &MergePlan) {
    let count = candidates.len() as f64;

    let totals_snapshot: Vec<(String, Value)> = merged
        .pointer(&plan.totals)
        .and_then(Value::as_object)
        .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default();

    for (field, value) in totals_snapshot {
        if !value.is_number() {
            continue;
        }
        let sum: f64 = candidates
            .iter()
            .filter_map(|c| c.pointer(&plan.totals))
            .filter_map(|t| t.get(&field))
            .filter_map(Value::as_f64)
            .sum();
        if let Some(slot) = merged
            .pointer_mut(&plan.totals)
            .and_then(|t| t.get_mut(&field))
        {
            *slot = Value::Number(to_number(sum / count));
        }
    }
}

/// Keep whole results as integers so merged values compare cleanly.
fn to_number(f: f64) -> Number {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
        Number::from(f as i64)
    } else {
        Number::from_f64(f).unwrap_or_else(|| Number::from(0))
    }
}
