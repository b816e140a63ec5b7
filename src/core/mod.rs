//! Core data model: method records, parsed files, and duplicate groups.

pub mod errors;
pub mod kinds;
pub mod tree;

use crate::analysis::structure::{self, StructuralFeatures};
use crate::fingerprint::Fingerprint;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tree::TreeNode;

/// A single extracted callable: method, constructor, local function, or
/// property accessor with a body. Immutable after creation; the structural
/// features are computed at most once, on first use.
#[derive(Debug, Clone)]
pub struct MethodInfo {
    name: String,
    full_name: String,
    file: PathBuf,
    start_line: usize,
    end_line: usize,
    line_count: usize,
    token_count: usize,
    parameters: Vec<String>,
    is_async: bool,
    attributes: Vec<String>,
    class_context: Option<String>,
    tree: TreeNode,
    fingerprint: Fingerprint,
    features: OnceCell<StructuralFeatures>,
}

impl MethodInfo {
    /// Line numbers are 1-based and inclusive. The fingerprint and token
    /// count are derived from the tree here, once.
    pub fn new(
        name: impl Into<String>,
        class_context: Option<String>,
        file: impl Into<PathBuf>,
        start_line: usize,
        end_line: usize,
        tree: TreeNode,
    ) -> Self {
        let name = name.into();
        let full_name = match &class_context {
            Some(class) => format!("{class}.{name}"),
            None => name.clone(),
        };
        let fingerprint = Fingerprint::build(&tree);
        let token_count = tree.size();
        Self {
            name,
            full_name,
            file: file.into(),
            start_line,
            end_line,
            line_count: end_line.saturating_sub(start_line) + 1,
            token_count,
            parameters: Vec::new(),
            is_async: false,
            attributes: Vec::new(),
            class_context,
            tree,
            fingerprint,
            features: OnceCell::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<String>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_async(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<String>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class-qualified name when the method is nested in a type.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn start_line(&self) -> usize {
        self.start_line
    }

    pub fn end_line(&self) -> usize {
        self.end_line
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Subtree size of the method's root node.
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn is_async(&self) -> bool {
        self.is_async
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn class_context(&self) -> Option<&str> {
        self.class_context.as_deref()
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Structural features, computed on first access and memoized.
    pub fn features(&self) -> &StructuralFeatures {
        self.features.get_or_init(|| structure::analyze(&self.tree))
    }
}

/// A parsed source file and the methods extracted from it.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub methods: Vec<MethodInfo>,
}

impl ParsedFile {
    pub fn new(path: impl Into<PathBuf>, methods: Vec<MethodInfo>) -> Self {
        Self {
            path: path.into(),
            methods,
        }
    }
}

/// One duplicate of a group's representative.
#[derive(Debug, Clone)]
pub struct DuplicateEntry<'a> {
    pub method: &'a MethodInfo,
    pub similarity: f64,
    pub impact: f64,
}

/// A representative method and the methods found to duplicate it. Groups
/// borrow method records from the parsed files; they never own them.
#[derive(Debug, Clone)]
pub struct DuplicateGroup<'a> {
    pub representative: &'a MethodInfo,
    pub entries: Vec<DuplicateEntry<'a>>,
}

impl<'a> DuplicateGroup<'a> {
    pub fn total_impact(&self) -> f64 {
        self.entries.iter().map(|e| e.impact).sum()
    }

    /// Representative plus duplicates.
    pub fn method_count(&self) -> usize {
        1 + self.entries.len()
    }

    pub fn total_lines(&self) -> usize {
        self.representative.line_count()
            + self
                .entries
                .iter()
                .map(|e| e.method.line_count())
                .sum::<usize>()
    }
}
