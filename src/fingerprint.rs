//! Per-method admission fingerprint.
//!
//! A 128-bit Bloom filter over node values (and kind codes for valueless
//! nodes) plus a node-kind histogram. The Bloom filter backs the cheap
//! "might be similar" prefilter that runs before any edit-distance work; the
//! histogram feeds a weighted similarity used as a diagnostic.

use crate::core::kinds::SyntaxKind;
use crate::core::tree::TreeNode;
use std::collections::HashMap;

const BLOOM_BITS: u64 = 128;

/// Multipliers for the three value hashes.
const VALUE_MULTIPLIERS: [u64; 3] = [31, 37, 41];

/// Multiplier and offset for the single kind hash.
const KIND_MULTIPLIER: u64 = 31;
const KIND_OFFSET: u64 = 0x9e37_79b9;

#[derive(Debug, Clone, Default)]
pub struct Fingerprint {
    bloom: [u64; 2],
    histogram: HashMap<SyntaxKind, u32>,
}

impl Fingerprint {
    /// Walk the tree once, counting kinds and inserting each node into the
    /// Bloom filter: valued nodes by their value under three multiplicative
    /// hashes, valueless nodes by their kind code under one.
    pub fn build(tree: &TreeNode) -> Self {
        let mut fp = Fingerprint::default();
        tree.walk(&mut |node| {
            *fp.histogram.entry(node.kind()).or_insert(0) += 1;
            if node.value().is_empty() {
                fp.insert_kind(node.kind());
            } else {
                fp.insert_value(node.value());
            }
        });
        fp
    }

    fn insert_value(&mut self, value: &str) {
        for mult in VALUE_MULTIPLIERS {
            let mut h: u64 = 0;
            for byte in value.as_bytes() {
                h = h.wrapping_mul(mult).wrapping_add(*byte as u64);
            }
            self.set_bit(h % BLOOM_BITS);
        }
    }

    fn insert_kind(&mut self, kind: SyntaxKind) {
        let h = (kind.code() as u64)
            .wrapping_mul(KIND_MULTIPLIER)
            .wrapping_add(KIND_OFFSET);
        self.set_bit(h % BLOOM_BITS);
    }

    fn set_bit(&mut self, bit: u64) {
        self.bloom[(bit / 64) as usize] |= 1u64 << (bit % 64);
    }

    pub fn popcount(&self) -> u32 {
        self.bloom[0].count_ones() + self.bloom[1].count_ones()
    }

    pub fn intersection_count(&self, other: &Fingerprint) -> u32 {
        (self.bloom[0] & other.bloom[0]).count_ones()
            + (self.bloom[1] & other.bloom[1]).count_ones()
    }

    pub fn histogram(&self) -> &HashMap<SyntaxKind, u32> {
        &self.histogram
    }
}

/// Cheap admission predicate. Deliberately permissive: the ratio test is a
/// fast-path accept, and any non-empty intersection also passes, so the only
/// rejected pairs are those whose non-empty filters are fully disjoint.
pub fn might_be_similar(a: &Fingerprint, b: &Fingerprint, tau: f64) -> bool {
    let pa = a.popcount();
    let pb = b.popcount();
    if pa == 0 || pb == 0 {
        return true;
    }
    let intersection = a.intersection_count(b);
    let ratio = intersection as f64 / pa.max(pb) as f64;
    if ratio > tau {
        return true;
    }
    intersection > 0
}

/// Importance weight of a kind in the histogram similarity. Control flow
/// dominates; identifiers and primitive literals barely register.
fn importance(kind: SyntaxKind) -> f64 {
    use SyntaxKind as K;
    match kind {
        K::IfStatement
        | K::ElseClause
        | K::ForStatement
        | K::WhileStatement
        | K::DoStatement
        | K::ForEachStatement => 2.0,
        K::SwitchStatement
        | K::SwitchSection
        | K::SwitchExpression
        | K::SwitchExpressionArm
        | K::ConditionalExpression => 1.8,
        K::MethodDeclaration
        | K::ConstructorDeclaration
        | K::LocalFunctionStatement
        | K::LambdaExpression
        | K::AnonymousMethodExpression => 1.5,
        K::TryStatement | K::CatchClause | K::FinallyClause | K::ThrowStatement
        | K::ThrowExpression => 1.5,
        K::InvocationExpression
        | K::ObjectCreationExpression
        | K::ImplicitObjectCreationExpression => 1.3,
        K::AddExpression
        | K::SubtractExpression
        | K::MultiplyExpression
        | K::DivideExpression
        | K::ModuloExpression => 1.2,
        K::EqualsExpression
        | K::NotEqualsExpression
        | K::LessThanExpression
        | K::LessThanOrEqualExpression
        | K::GreaterThanExpression
        | K::GreaterThanOrEqualExpression
        | K::IsExpression
        | K::IsPatternExpression => 1.1,
        K::SimpleAssignmentExpression
        | K::AddAssignmentExpression
        | K::SubtractAssignmentExpression
        | K::MultiplyAssignmentExpression
        | K::DivideAssignmentExpression
        | K::ModuloAssignmentExpression
        | K::AndAssignmentExpression
        | K::OrAssignmentExpression
        | K::ExclusiveOrAssignmentExpression
        | K::LeftShiftAssignmentExpression
        | K::RightShiftAssignmentExpression
        | K::CoalesceAssignmentExpression
        | K::LogicalAndExpression
        | K::LogicalOrExpression
        | K::LogicalNotExpression => 1.0,
        K::ElementAccessExpression
        | K::ElementBindingExpression
        | K::ArrayCreationExpression
        | K::ImplicitArrayCreationExpression
        | K::InitializerExpression => 0.9,
        K::LocalDeclarationStatement | K::VariableDeclaration | K::VariableDeclarator => 0.8,
        K::Identifier
        | K::QualifiedName
        | K::GenericName
        | K::PredefinedType
        | K::IntegerLiteral
        | K::RealLiteral
        | K::StringLiteral
        | K::CharacterLiteral
        | K::BooleanLiteral
        | K::NullLiteral => 0.5,
        _ => 0.3,
    }
}

/// Weighted, normalized L1 similarity between two kind histograms. Used as a
/// diagnostic signal, not in the scoring pipeline.
pub fn histogram_similarity(a: &Fingerprint, b: &Fingerprint) -> f64 {
    let mut kinds: Vec<SyntaxKind> = a.histogram.keys().copied().collect();
    for kind in b.histogram.keys() {
        if !a.histogram.contains_key(kind) {
            kinds.push(*kind);
        }
    }
    if kinds.is_empty() {
        return 1.0;
    }

    let mut weighted_diff = 0.0;
    let mut total_weight = 0.0;
    for kind in kinds {
        let c1 = a.histogram.get(&kind).copied().unwrap_or(0) as f64;
        let c2 = b.histogram.get(&kind).copied().unwrap_or(0) as f64;
        let diff = (c1 - c2).abs() / c1.max(c2);
        let weight = importance(kind);
        weighted_diff += diff * weight;
        total_weight += weight;
    }
    1.0 - weighted_diff / total_weight
}
