//! One-pass structural features of a method tree.
//!
//! A single depth-first traversal collects the control-flow shape and the
//! lexical material (identifier and literal values) that the similarity
//! scorer uses for its penalty chain.

use crate::core::kinds::{KindCategory, SyntaxKind};
use crate::core::tree::TreeNode;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    For,
    While,
    Do,
    ForEach,
}

#[derive(Debug, Clone, Default)]
pub struct StructuralFeatures {
    /// +1 per loop, if, and conditional expression; +2 per switch or try.
    pub control_flow_complexity: u32,
    /// Loop kinds in traversal order.
    pub loop_types: Vec<LoopKind>,
    pub conditional_count: u32,
    pub method_call_count: u32,
    pub variable_count: u32,
    pub max_nesting_level: u32,
    pub identifiers: HashSet<String>,
    pub literals: HashSet<String>,
}

/// Compute all features in one traversal.
pub fn analyze(tree: &TreeNode) -> StructuralFeatures {
    let mut features = StructuralFeatures::default();
    visit(tree, 0, &mut features);
    features
}

fn visit(node: &TreeNode, depth: u32, features: &mut StructuralFeatures) {
    use SyntaxKind as K;

    let mut next_depth = depth;
    match node.kind() {
        K::ForStatement | K::WhileStatement | K::DoStatement | K::ForEachStatement => {
            let kind = match node.kind() {
                K::ForStatement => LoopKind::For,
                K::WhileStatement => LoopKind::While,
                K::DoStatement => LoopKind::Do,
                _ => LoopKind::ForEach,
            };
            features.control_flow_complexity += 1;
            features.loop_types.push(kind);
            next_depth = depth + 1;
            features.max_nesting_level = features.max_nesting_level.max(next_depth);
        }
        K::IfStatement | K::ConditionalExpression => {
            features.control_flow_complexity += 1;
            features.conditional_count += 1;
            next_depth = depth + 1;
            features.max_nesting_level = features.max_nesting_level.max(next_depth);
        }
        K::SwitchStatement | K::SwitchExpression => {
            features.control_flow_complexity += 2;
            features.conditional_count += 1;
            next_depth = depth + 1;
            features.max_nesting_level = features.max_nesting_level.max(next_depth);
        }
        K::TryStatement => {
            features.control_flow_complexity += 2;
            next_depth = depth + 1;
            features.max_nesting_level = features.max_nesting_level.max(next_depth);
        }
        K::InvocationExpression => features.method_call_count += 1,
        K::VariableDeclarator => features.variable_count += 1,
        _ => {}
    }

    if !node.value().is_empty() {
        match node.kind().category() {
            KindCategory::SimpleIdentifier
            | KindCategory::QualifiedIdentifier
            | KindCategory::GenericIdentifier => {
                features.identifiers.insert(node.value().to_string());
            }
            KindCategory::NumericLiteral
            | KindCategory::StringLiteral
            | KindCategory::BoolLiteral => {
                features.literals.insert(node.value().to_string());
            }
            _ => {}
        }
    }

    for child in node.children() {
        visit(child, next_depth, features);
    }
}
