//! C# method extraction on top of tree-sitter.
//!
//! Walks the grammar tree for method declarations, constructors, local
//! functions, and property accessors with bodies, converting each one into
//! the neutral kind taxonomy. The conversion keeps only named grammar nodes,
//! wraps `else` alternatives in a synthetic clause node, and applies the
//! block-elision normalization under control-flow constructs.

use super::{unwrap_single_statement_block, MethodExtractor};
use crate::core::errors::{Error, Result};
use crate::core::kinds::SyntaxKind;
use crate::core::tree::TreeNode;
use crate::core::{MethodInfo, ParsedFile};
use std::path::Path;
use tree_sitter::{Node, Parser};

pub struct CSharpExtractor {
    parser: Parser,
}

impl CSharpExtractor {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
            .map_err(|e| Error::Internal(format!("failed to load C# grammar: {e}")))?;
        Ok(Self { parser })
    }
}

impl MethodExtractor for CSharpExtractor {
    fn extract_source(&mut self, source: &str, path: &Path) -> Result<ParsedFile> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::parse(path, "parser produced no tree"))?;
        let mut methods = Vec::new();
        collect_methods(tree.root_node(), source, path, None, &mut methods);
        Ok(ParsedFile::new(path, methods))
    }
}

fn collect_methods(
    node: Node,
    source: &str,
    path: &Path,
    class_context: Option<&str>,
    methods: &mut Vec<MethodInfo>,
) {
    let mut context = class_context;
    match node.kind() {
        "class_declaration" | "struct_declaration" | "record_declaration"
        | "interface_declaration" => {
            if let Some(name) = field_text(node, "name", source) {
                context = Some(name);
            }
        }
        "method_declaration" | "constructor_declaration" | "local_function_statement" => {
            if let Some(name) = field_text(node, "name", source) {
                if let Some(method) = build_method(node, name, source, path, class_context) {
                    methods.push(method);
                }
            }
        }
        "property_declaration" => {
            collect_accessors(node, source, path, class_context, methods);
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_methods(child, source, path, context, methods);
    }
}

/// Property accessors with bodies become methods named `get_X`/`set_X`;
/// an expression-bodied property counts as its getter.
fn collect_accessors(
    node: Node,
    source: &str,
    path: &Path,
    class_context: Option<&str>,
    methods: &mut Vec<MethodInfo>,
) {
    let Some(property_name) = field_text(node, "name", source) else {
        return;
    };

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "arrow_expression_clause" {
            let name = format!("get_{property_name}");
            if let Some(method) = build_method(node, &name, source, path, class_context) {
                methods.push(method);
            }
        }
        if child.kind() != "accessor_list" {
            continue;
        }
        let mut accessors = child.walk();
        for accessor in child.named_children(&mut accessors) {
            if accessor.kind() != "accessor_declaration" || !has_body(accessor) {
                continue;
            }
            let keyword = accessor_keyword(accessor, source).unwrap_or("get");
            let name = format!("{keyword}_{property_name}");
            if let Some(method) = build_method(accessor, &name, source, path, class_context) {
                methods.push(method);
            }
        }
    }
}

fn has_body(node: Node) -> bool {
    let mut cursor = node.walk();
    let result = node
        .named_children(&mut cursor)
        .any(|c| matches!(c.kind(), "block" | "arrow_expression_clause"));
    result
}

fn accessor_keyword<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Ok(text) = child.utf8_text(source.as_bytes()) {
            if matches!(text, "get" | "set" | "init" | "add" | "remove") {
                return Some(text);
            }
        }
    }
    None
}

fn build_method(
    node: Node,
    name: &str,
    source: &str,
    path: &Path,
    class_context: Option<&str>,
) -> Option<MethodInfo> {
    let tree = convert_node(node, source)?;
    let start_line = node.start_position().row + 1;
    let end_line = node.end_position().row + 1;
    Some(
        MethodInfo::new(
            name,
            class_context.map(str::to_string),
            path,
            start_line,
            end_line,
            tree,
        )
        .with_parameters(parameter_names(node, source))
        .with_async(has_async_modifier(node, source))
        .with_attributes(attribute_names(node, source)),
    )
}

fn parameter_names(node: Node, source: &str) -> Vec<String> {
    let mut names = Vec::new();
    if let Some(list) = node.child_by_field_name("parameters") {
        let mut cursor = list.walk();
        for parameter in list.named_children(&mut cursor) {
            if parameter.kind() == "parameter" {
                if let Some(name) = field_text(parameter, "name", source) {
                    names.push(name.to_string());
                }
            }
        }
    }
    names
}

fn has_async_modifier(node: Node, source: &str) -> bool {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor).any(|child| {
        (child.kind() == "modifier" || !child.is_named())
            && child.utf8_text(source.as_bytes()) == Ok("async")
    });
    result
}

fn attribute_names(node: Node, source: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "attribute_list" {
            continue;
        }
        let mut attrs = child.walk();
        for attribute in child.named_children(&mut attrs) {
            if attribute.kind() == "attribute" {
                if let Some(name) = field_text(attribute, "name", source) {
                    names.push(name.to_string());
                }
            }
        }
    }
    names
}

fn field_text<'s>(node: Node, field: &str, source: &'s str) -> Option<&'s str> {
    node.child_by_field_name(field)
        .and_then(|n| n.utf8_text(source.as_bytes()).ok())
}

fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Convert a grammar node into the neutral tree. Unnamed tokens and comments
/// disappear; unknown named nodes survive as `Unknown` so the shape of
/// unsupported constructs still participates in matching.
fn convert_node(node: Node, source: &str) -> Option<TreeNode> {
    if !node.is_named() || node.kind() == "comment" {
        return None;
    }

    let converted = match node.kind() {
        // Value-bearing leaves.
        "identifier" => TreeNode::leaf_with_value(SyntaxKind::Identifier, node_text(node, source)),
        "qualified_name" => {
            TreeNode::leaf_with_value(SyntaxKind::QualifiedName, node_text(node, source))
        }
        "predefined_type" => {
            TreeNode::leaf_with_value(SyntaxKind::PredefinedType, node_text(node, source))
        }
        "generic_name" => convert_generic_name(node, source),
        "integer_literal" => {
            TreeNode::leaf_with_value(SyntaxKind::IntegerLiteral, node_text(node, source))
        }
        "real_literal" => {
            TreeNode::leaf_with_value(SyntaxKind::RealLiteral, node_text(node, source))
        }
        "string_literal" | "verbatim_string_literal" | "raw_string_literal" => {
            TreeNode::leaf_with_value(SyntaxKind::StringLiteral, node_text(node, source))
        }
        "character_literal" => {
            TreeNode::leaf_with_value(SyntaxKind::CharacterLiteral, node_text(node, source))
        }
        "boolean_literal" => {
            TreeNode::leaf_with_value(SyntaxKind::BooleanLiteral, node_text(node, source))
        }
        "null_literal" => TreeNode::leaf(SyntaxKind::NullLiteral),

        // Control flow with block elision.
        "if_statement" => convert_if(node, source),
        "for_statement" | "while_statement" | "do_statement" | "for_each_statement"
        | "foreach_statement" => {
            let children = convert_children(node, source)
                .into_iter()
                .map(unwrap_single_statement_block)
                .collect();
            TreeNode::new(map_kind(node, source), "", children)
        }

        _ => TreeNode::new(map_kind(node, source), "", convert_children(node, source)),
    };
    Some(converted)
}

fn convert_children(node: Node, source: &str) -> Vec<TreeNode> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter_map(|child| convert_node(child, source))
        .collect()
}

fn convert_if(node: Node, source: &str) -> TreeNode {
    let mut children = Vec::new();
    if let Some(condition) = node.child_by_field_name("condition") {
        children.extend(convert_node(condition, source));
    }
    if let Some(consequence) = node.child_by_field_name("consequence") {
        if let Some(tree) = convert_node(consequence, source) {
            children.push(unwrap_single_statement_block(tree));
        }
    }
    if let Some(alternative) = node.child_by_field_name("alternative") {
        if let Some(tree) = convert_node(alternative, source) {
            children.push(TreeNode::new(
                SyntaxKind::ElseClause,
                "",
                vec![unwrap_single_statement_block(tree)],
            ));
        }
    }
    TreeNode::new(SyntaxKind::IfStatement, "", children)
}

fn convert_generic_name(node: Node, source: &str) -> TreeNode {
    let mut value = node_text(node, source);
    let mut children = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => value = node_text(child, source),
            "type_argument_list" => children.extend(convert_node(child, source)),
            _ => {}
        }
    }
    TreeNode::new(SyntaxKind::GenericName, value, children)
}

fn map_kind(node: Node, source: &str) -> SyntaxKind {
    use SyntaxKind as K;
    match node.kind() {
        "binary_expression" => binary_kind(node, source),
        "prefix_unary_expression" => prefix_unary_kind(node, source),
        "postfix_unary_expression" => postfix_unary_kind(node, source),
        "assignment_expression" => assignment_kind(node, source),

        "block" => K::Block,
        "if_statement" => K::IfStatement,
        "conditional_expression" => K::ConditionalExpression,
        "switch_statement" => K::SwitchStatement,
        "switch_section" => K::SwitchSection,
        "switch_expression" => K::SwitchExpression,
        "switch_expression_arm" => K::SwitchExpressionArm,
        "for_statement" => K::ForStatement,
        "while_statement" => K::WhileStatement,
        "do_statement" => K::DoStatement,
        "for_each_statement" | "foreach_statement" => K::ForEachStatement,
        "break_statement" => K::BreakStatement,
        "continue_statement" => K::ContinueStatement,
        "return_statement" => K::ReturnStatement,
        "yield_statement" => K::YieldStatement,
        "goto_statement" => K::GotoStatement,
        "throw_statement" => K::ThrowStatement,
        "throw_expression" => K::ThrowExpression,
        "try_statement" => K::TryStatement,
        "catch_clause" => K::CatchClause,
        "finally_clause" => K::FinallyClause,
        "using_statement" => K::UsingStatement,
        "lock_statement" => K::LockStatement,
        "expression_statement" => K::ExpressionStatement,

        "invocation_expression" => K::InvocationExpression,
        "member_access_expression" => K::MemberAccessExpression,
        "conditional_access_expression" => K::ConditionalAccessExpression,
        "member_binding_expression" => K::MemberBindingExpression,
        "element_access_expression" => K::ElementAccessExpression,
        "element_binding_expression" => K::ElementBindingExpression,
        "object_creation_expression" => K::ObjectCreationExpression,
        "implicit_object_creation_expression" => K::ImplicitObjectCreationExpression,
        "array_creation_expression" => K::ArrayCreationExpression,
        "implicit_array_creation_expression" => K::ImplicitArrayCreationExpression,
        "initializer_expression" => K::InitializerExpression,
        "interpolated_string_expression" => K::InterpolatedString,
        "interpolation" => K::Interpolation,
        "tuple_expression" => K::TupleExpression,
        "parenthesized_expression" => K::ParenthesizedExpression,
        "await_expression" => K::AwaitExpression,
        "lambda_expression" => K::LambdaExpression,
        "anonymous_method_expression" => K::AnonymousMethodExpression,

        "cast_expression" => K::CastExpression,
        "as_expression" => K::AsExpression,
        "is_expression" => K::IsExpression,
        "is_pattern_expression" => K::IsPatternExpression,
        "typeof_expression" => K::TypeOfExpression,
        "sizeof_expression" => K::SizeOfExpression,
        "default_expression" => K::DefaultLiteral,

        "this_expression" => K::ThisExpression,
        "base_expression" => K::BaseExpression,

        "method_declaration" => K::MethodDeclaration,
        "constructor_declaration" => K::ConstructorDeclaration,
        "local_function_statement" => K::LocalFunctionStatement,
        "property_declaration" => K::PropertyDeclaration,
        "accessor_declaration" => K::AccessorDeclaration,
        "local_declaration_statement" => K::LocalDeclarationStatement,
        "variable_declaration" => K::VariableDeclaration,
        "variable_declarator" => K::VariableDeclarator,
        "parameter" => K::Parameter,
        "parameter_list" => K::ParameterList,
        "argument" => K::Argument,
        "argument_list" => K::ArgumentList,
        "attribute_list" => K::AttributeList,
        "attribute" => K::Attribute,
        "equals_value_clause" => K::EqualsValueClause,
        "arrow_expression_clause" => K::ArrowExpressionClause,

        "type_argument_list" => K::TypeArgumentList,
        "array_type" => K::ArrayType,
        "nullable_type" => K::NullableType,
        "compilation_unit" => K::CompilationUnit,
        "namespace_declaration" | "file_scoped_namespace_declaration" => K::NamespaceDeclaration,
        "class_declaration" => K::ClassDeclaration,
        "struct_declaration" => K::StructDeclaration,
        "record_declaration" => K::RecordDeclaration,
        "interface_declaration" => K::InterfaceDeclaration,
        "enum_declaration" => K::EnumDeclaration,

        _ => K::Unknown,
    }
}

fn binary_kind(node: Node, source: &str) -> SyntaxKind {
    use SyntaxKind as K;
    match operator_text(node, source) {
        Some("+") => K::AddExpression,
        Some("-") => K::SubtractExpression,
        Some("*") => K::MultiplyExpression,
        Some("/") => K::DivideExpression,
        Some("%") => K::ModuloExpression,
        Some("<<") => K::LeftShiftExpression,
        Some(">>") => K::RightShiftExpression,
        Some(">>>") => K::UnsignedRightShiftExpression,
        Some("&&") => K::LogicalAndExpression,
        Some("||") => K::LogicalOrExpression,
        Some("&") => K::BitwiseAndExpression,
        Some("|") => K::BitwiseOrExpression,
        Some("^") => K::ExclusiveOrExpression,
        Some("==") => K::EqualsExpression,
        Some("!=") => K::NotEqualsExpression,
        Some("<") => K::LessThanExpression,
        Some("<=") => K::LessThanOrEqualExpression,
        Some(">") => K::GreaterThanExpression,
        Some(">=") => K::GreaterThanOrEqualExpression,
        Some("??") => K::CoalesceExpression,
        Some("is") => K::IsExpression,
        Some("as") => K::AsExpression,
        _ => K::Unknown,
    }
}

fn prefix_unary_kind(node: Node, source: &str) -> SyntaxKind {
    use SyntaxKind as K;
    match first_token(node, source) {
        Some("!") => K::LogicalNotExpression,
        Some("-") => K::UnaryMinusExpression,
        Some("+") => K::UnaryPlusExpression,
        Some("~") => K::BitwiseNotExpression,
        Some("++") => K::PreIncrementExpression,
        Some("--") => K::PreDecrementExpression,
        _ => K::Unknown,
    }
}

fn postfix_unary_kind(node: Node, source: &str) -> SyntaxKind {
    use SyntaxKind as K;
    match last_token(node, source) {
        Some("++") => K::PostIncrementExpression,
        Some("--") => K::PostDecrementExpression,
        _ => K::Unknown,
    }
}

fn assignment_kind(node: Node, source: &str) -> SyntaxKind {
    use SyntaxKind as K;
    match operator_text(node, source) {
        Some("=") => K::SimpleAssignmentExpression,
        Some("+=") => K::AddAssignmentExpression,
        Some("-=") => K::SubtractAssignmentExpression,
        Some("*=") => K::MultiplyAssignmentExpression,
        Some("/=") => K::DivideAssignmentExpression,
        Some("%=") => K::ModuloAssignmentExpression,
        Some("&=") => K::AndAssignmentExpression,
        Some("|=") => K::OrAssignmentExpression,
        Some("^=") => K::ExclusiveOrAssignmentExpression,
        Some("<<=") => K::LeftShiftAssignmentExpression,
        Some(">>=") => K::RightShiftAssignmentExpression,
        Some("??=") => K::CoalesceAssignmentExpression,
        _ => K::SimpleAssignmentExpression,
    }
}

const OPERATOR_TOKENS: &[&str] = &[
    "+", "-", "*", "/", "%", "<<", ">>", ">>>", "&&", "||", "&", "|", "^", "==", "!=", "<", "<=",
    ">", ">=", "??", "is", "as", "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=",
    ">>=", "??=",
];

/// Operator of a binary or assignment expression: the `operator` field when
/// the grammar exposes one, otherwise the first token that looks like an
/// operator.
fn operator_text<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    if let Some(op) = node.child_by_field_name("operator") {
        return op.utf8_text(source.as_bytes()).ok();
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.is_named() {
            continue;
        }
        if let Ok(text) = child.utf8_text(source.as_bytes()) {
            if OPERATOR_TOKENS.contains(&text) {
                return Some(text);
            }
        }
    }
    None
}

fn first_token<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    let mut cursor = node.walk();
    let result = node
        .children(&mut cursor)
        .find(|c| !c.is_named())
        .and_then(|c| c.utf8_text(source.as_bytes()).ok());
    result
}

fn last_token<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    let mut cursor = node.walk();
    let mut last = None;
    for child in node.children(&mut cursor) {
        if !child.is_named() {
            last = child.utf8_text(source.as_bytes()).ok();
        }
    }
    last
}
