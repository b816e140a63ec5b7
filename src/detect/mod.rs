//! Duplicate detection pipeline.
//!
//! Eligible methods are indexed once, candidate pairs pass the Bloom
//! admission filter at half the similarity threshold, surviving pairs are
//! scored in parallel, and groups are assembled single-threaded from the
//! pre-assigned indices so the output is reproducible regardless of worker
//! interleaving.

use crate::analysis::similarity::score_with_engine;
use crate::apted::pool::MemoPool;
use crate::apted::AptedEngine;
use crate::config::{self, DetectorOptions};
use crate::core::errors::Result;
use crate::core::{DuplicateEntry, DuplicateGroup, MethodInfo, ParsedFile};
use crate::fingerprint::might_be_similar;
use rayon::prelude::*;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Refactoring value of a duplicate pair: combined line count scaled by how
/// similar the pair is.
pub fn impact(a: &MethodInfo, b: &MethodInfo, similarity: f64) -> f64 {
    (a.line_count() + b.line_count()) as f64 * similarity
}

pub struct DuplicateDetector {
    options: DetectorOptions,
    threshold: f64,
    method_pattern: Option<Regex>,
    memo_pool: MemoPool,
}

impl DuplicateDetector {
    pub fn new(options: DetectorOptions, threshold: f64) -> Result<Self> {
        config::validate_threshold(threshold)?;
        options.validate()?;
        let method_pattern = options
            .include_method_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()?;
        Ok(Self {
            options,
            threshold,
            method_pattern,
            memo_pool: MemoPool::new(),
        })
    }

    /// Run the full pipeline over the parsed files. Groups borrow the method
    /// records; they are ordered by total impact descending, entries by
    /// impact descending, ties broken by method index ascending.
    pub fn detect<'a>(&self, files: &'a [ParsedFile]) -> Vec<DuplicateGroup<'a>> {
        let methods: Vec<&'a MethodInfo> = files
            .iter()
            .flat_map(|file| file.methods.iter())
            .filter(|method| self.is_eligible(method))
            .collect();
        debug!(eligible = methods.len(), "filtered methods");

        let admission_threshold = 0.5 * self.threshold;
        let mut candidates = Vec::new();
        for i in 0..methods.len() {
            for j in (i + 1)..methods.len() {
                if might_be_similar(
                    methods[i].fingerprint(),
                    methods[j].fingerprint(),
                    admission_threshold,
                ) {
                    candidates.push((i, j));
                }
            }
        }
        debug!(candidates = candidates.len(), "admitted pairs");

        let scored: Vec<(usize, usize, f64)> = candidates
            .par_iter()
            .map(|&(i, j)| {
                let mut engine =
                    AptedEngine::with_memo(self.options.apted, self.memo_pool.acquire());
                let score = score_with_engine(methods[i], methods[j], &self.options, &mut engine);
                self.memo_pool.release(engine.into_memo());
                (i, j, score)
            })
            .collect();

        let surviving = scored
            .into_iter()
            .filter(|&(_, _, score)| score >= self.threshold);

        let mut by_representative: BTreeMap<usize, Vec<(usize, f64)>> = BTreeMap::new();
        for (i, j, score) in surviving {
            by_representative.entry(i).or_default().push((j, score));
        }

        let mut processed = vec![false; methods.len()];
        let mut groups: Vec<(usize, DuplicateGroup<'a>)> = Vec::new();
        for (representative, pairs) in by_representative {
            if processed[representative] {
                continue;
            }
            let mut entries = Vec::new();
            for (j, score) in pairs {
                if processed[j] {
                    continue;
                }
                entries.push(DuplicateEntry {
                    method: methods[j],
                    similarity: score,
                    impact: impact(methods[representative], methods[j], score),
                });
                processed[j] = true;
            }
            if entries.is_empty() {
                continue;
            }
            processed[representative] = true;
            // Entries were pushed in index order; the stable sort keeps that
            // order for equal impacts.
            entries.sort_by(|a, b| {
                b.impact
                    .partial_cmp(&a.impact)
                    .unwrap_or(Ordering::Equal)
            });
            groups.push((
                representative,
                DuplicateGroup {
                    representative: methods[representative],
                    entries,
                },
            ));
        }

        groups.sort_by(|(ia, ga), (ib, gb)| {
            gb.total_impact()
                .partial_cmp(&ga.total_impact())
                .unwrap_or(Ordering::Equal)
                .then(ia.cmp(ib))
        });
        debug!(groups = groups.len(), "assembled duplicate groups");
        groups.into_iter().map(|(_, group)| group).collect()
    }

    fn is_eligible(&self, method: &MethodInfo) -> bool {
        let lines = method.line_count();
        if lines < self.options.min_lines || lines > self.options.max_lines {
            return false;
        }
        if method.token_count() < self.options.min_tokens {
            return false;
        }
        match &self.method_pattern {
            Some(pattern) => pattern.is_match(method.full_name()),
            None => true,
        }
    }
}

/// One-shot convenience over [`DuplicateDetector`].
pub fn detect<'a>(
    files: &'a [ParsedFile],
    options: &DetectorOptions,
    threshold: f64,
) -> Result<Vec<DuplicateGroup<'a>>> {
    Ok(DuplicateDetector::new(options.clone(), threshold)?.detect(files))
}
