//! Method extraction.
//!
//! The detector core consumes anything that can turn a source file into a
//! [`ParsedFile`]; the only implementation shipped here is the C# extractor.

pub mod csharp;

use crate::core::errors::{Error, Result};
use crate::core::kinds::SyntaxKind;
use crate::core::tree::TreeNode;
use crate::core::ParsedFile;
use std::path::Path;

pub use csharp::CSharpExtractor;

/// Turns source text into method records with normalized trees.
pub trait MethodExtractor {
    fn extract_source(&mut self, source: &str, path: &Path) -> Result<ParsedFile>;

    fn extract_file(&mut self, path: &Path) -> Result<ParsedFile> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::FileSystem {
            message: "failed to read source file".to_string(),
            path: path.to_path_buf(),
            source: Some(e),
        })?;
        self.extract_source(&source, path)
    }
}

/// Block-elision normalization: a block holding exactly one statement under a
/// control-flow construct is replaced by that statement, so `if (x) s;` and
/// `if (x) { s; }` produce the same tree.
pub(crate) fn unwrap_single_statement_block(node: TreeNode) -> TreeNode {
    if node.kind() == SyntaxKind::Block && node.children().len() == 1 {
        node.into_children().swap_remove(0)
    } else {
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_statement_block_is_elided() {
        let inner = TreeNode::leaf(SyntaxKind::ReturnStatement);
        let inner_id = inner.id();
        let block = TreeNode::new(SyntaxKind::Block, "", vec![inner]);
        let unwrapped = unwrap_single_statement_block(block);
        assert_eq!(unwrapped.kind(), SyntaxKind::ReturnStatement);
        assert_eq!(unwrapped.id(), inner_id);
    }

    #[test]
    fn multi_statement_block_is_kept() {
        let block = TreeNode::new(
            SyntaxKind::Block,
            "",
            vec![
                TreeNode::leaf(SyntaxKind::ReturnStatement),
                TreeNode::leaf(SyntaxKind::BreakStatement),
            ],
        );
        let kept = unwrap_single_statement_block(block);
        assert_eq!(kept.kind(), SyntaxKind::Block);
        assert_eq!(kept.children().len(), 2);
    }

    #[test]
    fn non_block_nodes_pass_through() {
        let node = TreeNode::new(
            SyntaxKind::ExpressionStatement,
            "",
            vec![TreeNode::leaf(SyntaxKind::NullLiteral)],
        );
        let kept = unwrap_single_statement_block(node);
        assert_eq!(kept.kind(), SyntaxKind::ExpressionStatement);
    }
}
