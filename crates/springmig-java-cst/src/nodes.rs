// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Node types for the Java CST subset.
//!
//! # Node Identity
//!
//! Every tree node carries a [`NodeId`], a process-unique identifier assigned
//! at construction. Nodes are immutable values: an edit produces a new node
//! that keeps the original id, so "was this exact node replaced" checks during
//! a single traversal compare ids, never addresses. Nodes synthesized by an
//! edit (a copied literal, a new assignment argument) draw fresh ids.
//!
//! # Trivia
//!
//! Each node owns its leading trivia in `prefix`: the exact whitespace and
//! comments between the previous token and the node's first token. Printing a
//! tree concatenates prefixes and token text, which makes the round trip
//! byte-exact for unmodified subtrees. Interior spacing that belongs to no
//! child node (the space before a `)`, the spacing around `=`) is stored in
//! dedicated fields on the owning node.
//!
//! # Resolved Types
//!
//! Annotations carry the fully-qualified name of their type in
//! `resolved_type`, populated by the parser from the compilation unit's
//! imports. Recipes match annotations against this field only; the written
//! name (`name`) is display/printing data.

use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(0);

/// A stable, process-unique identifier for a CST node.
///
/// Ids are preserved across `with_*` style edits and compared to decide
/// whether two values refer to the same source node within one traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Allocate a fresh id.
    pub fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Coarse node classification, used by cursor frames during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    CompilationUnit,
    Class,
    Method,
    Variable,
}

// ============================================================================
// Literals and annotation arguments
// ============================================================================

/// The semantic value of a Java literal.
///
/// `Other` holds the raw source text of literals the recipe catalog never
/// interprets (floats, hex, long suffixes); they still round-trip through
/// `value_source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    Str(String),
    Char(char),
    Int(i64),
    Bool(bool),
    Null,
    Other(String),
}

impl LiteralValue {
    /// True for `null` and for the empty string, the two value shapes the
    /// copy recipe treats as "nothing to copy".
    pub fn is_null_or_empty(&self) -> bool {
        match self {
            LiteralValue::Null => true,
            LiteralValue::Str(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// A literal expression. `value_source` is the exact source text, quote
/// style included, and is what printing emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub id: NodeId,
    pub prefix: String,
    pub value: LiteralValue,
    pub value_source: String,
}

impl Literal {
    /// Build a literal that did not come from source (fresh id).
    pub fn synthesized(value: LiteralValue, value_source: impl Into<String>, prefix: impl Into<String>) -> Self {
        Literal {
            id: NodeId::fresh(),
            prefix: prefix.into(),
            value,
            value_source: value_source.into(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Semantic equality, ignoring trivia and identity.
    pub fn same_value(&self, other: &Literal) -> bool {
        self.value == other.value
    }
}

/// A `name = literal` annotation argument. `eq_prefix` is the spacing before
/// the `=`; the spacing after it lives in the value literal's prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: NodeId,
    pub prefix: String,
    pub name: String,
    pub eq_prefix: String,
    pub value: Literal,
}

impl Assignment {
    /// Build a `name = value` argument with conventional spacing (fresh ids).
    pub fn synthesized(name: impl Into<String>, value: Literal, prefix: impl Into<String>) -> Self {
        Assignment {
            id: NodeId::fresh(),
            prefix: prefix.into(),
            name: name.into(),
            eq_prefix: " ".to_string(),
            value: value.with_prefix(" "),
        }
    }
}

/// One argument of an annotation: a bare literal (the implicit `value`
/// attribute) or a named assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationArg {
    Literal(Literal),
    Assignment(Assignment),
}

impl AnnotationArg {
    pub fn prefix(&self) -> &str {
        match self {
            AnnotationArg::Literal(l) => &l.prefix,
            AnnotationArg::Assignment(a) => &a.prefix,
        }
    }

    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        match self {
            AnnotationArg::Literal(mut l) => {
                l.prefix = prefix.into();
                AnnotationArg::Literal(l)
            }
            AnnotationArg::Assignment(mut a) => {
                a.prefix = prefix.into();
                AnnotationArg::Assignment(a)
            }
        }
    }
}

/// The parenthesized argument list of an annotation. Present even when empty
/// (`@Foo()`); an annotation without parens has no `AnnotationArguments` at
/// all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationArguments {
    pub args: Vec<AnnotationArg>,
    /// Whitespace between the last argument (or the `(`) and the `)`.
    pub rparen_prefix: String,
}

/// An annotation use such as `@RequestParam(value = "q")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub id: NodeId,
    pub prefix: String,
    /// The name exactly as written, possibly qualified.
    pub name: String,
    /// Fully-qualified type name resolved through imports, when known.
    pub resolved_type: Option<String>,
    pub arguments: Option<AnnotationArguments>,
}

impl Annotation {
    /// True when this annotation resolved to the given fully-qualified type.
    pub fn is_of_type(&self, fully_qualified: &str) -> bool {
        self.resolved_type.as_deref() == Some(fully_qualified)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// Declaration modifier keywords the subset accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Synchronized,
    Native,
    Transient,
    Volatile,
    Strictfp,
}

impl ModifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModifierKind::Public => "public",
            ModifierKind::Protected => "protected",
            ModifierKind::Private => "private",
            ModifierKind::Abstract => "abstract",
            ModifierKind::Static => "static",
            ModifierKind::Final => "final",
            ModifierKind::Synchronized => "synchronized",
            ModifierKind::Native => "native",
            ModifierKind::Transient => "transient",
            ModifierKind::Volatile => "volatile",
            ModifierKind::Strictfp => "strictfp",
        }
    }

    /// Classify a keyword, or `None` when the word is not a modifier.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "public" => ModifierKind::Public,
            "protected" => ModifierKind::Protected,
            "private" => ModifierKind::Private,
            "abstract" => ModifierKind::Abstract,
            "static" => ModifierKind::Static,
            "final" => ModifierKind::Final,
            "synchronized" => ModifierKind::Synchronized,
            "native" => ModifierKind::Native,
            "transient" => ModifierKind::Transient,
            "volatile" => ModifierKind::Volatile,
            "strictfp" => ModifierKind::Strictfp,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    pub id: NodeId,
    pub prefix: String,
    pub kind: ModifierKind,
}

/// A name token with its leading trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub prefix: String,
    pub name: String,
}

/// An uninterpreted span of source (type-parameter clauses, throws clauses,
/// field initializers). Printed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSpan {
    pub prefix: String,
    pub text: String,
}

/// A type expression captured as raw source text (`String`, `List<Foo>`,
/// `int[]`, `Object...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    pub id: NodeId,
    pub prefix: String,
    pub source: String,
}

/// An opaque `{ ... }` block, braces included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub prefix: String,
    pub text: String,
}

/// Distinguishes the two contexts a [`VariableDecl`] appears in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarTail {
    /// A method parameter: no initializer, no terminator of its own.
    Parameter,
    /// A field: optional `= ...` initializer and a `;`.
    Field {
        initializer: Option<RawSpan>,
        semi_prefix: String,
    },
}

/// A single-variable declaration: a method parameter or a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    pub id: NodeId,
    pub prefix: String,
    pub leading_annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    pub type_expr: TypeExpr,
    pub name: Ident,
    pub tail: VarTail,
}

impl VariableDecl {
    pub fn has_annotation_of_type(&self, fully_qualified: &str) -> bool {
        self.leading_annotations.iter().any(|a| a.is_of_type(fully_qualified))
    }
}

/// A method or constructor declaration. `return_type` is `None` for
/// constructors. The body is opaque: the recipe catalog never edits inside
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub id: NodeId,
    pub prefix: String,
    pub leading_annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    pub type_params: Option<RawSpan>,
    pub return_type: Option<TypeExpr>,
    pub name: Ident,
    /// Whitespace between the name and the `(`.
    pub lparen_prefix: String,
    pub params: Vec<VariableDecl>,
    /// Whitespace between the last parameter (or the `(`) and the `)`.
    pub rparen_prefix: String,
    pub throws: Option<RawSpan>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Method(MethodDecl),
    Field(VariableDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassBody {
    /// Whitespace before the `{`.
    pub lbrace_prefix: String,
    pub members: Vec<Member>,
    /// Whitespace before the `}`.
    pub rbrace_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub id: NodeId,
    pub prefix: String,
    pub leading_annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    /// Whitespace between the modifiers (or annotations) and the `class`
    /// keyword.
    pub kind_prefix: String,
    pub name: Ident,
    pub type_params: Option<RawSpan>,
    pub body: ClassBody,
}

// ============================================================================
// Compilation unit
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDecl {
    pub id: NodeId,
    pub prefix: String,
    /// Whitespace between `package` and the path.
    pub path_prefix: String,
    pub path: String,
    /// Whitespace before the `;`.
    pub semi_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub id: NodeId,
    pub prefix: String,
    /// Whitespace between `import` and the path.
    pub path_prefix: String,
    /// The dotted path as written, `.*` wildcards included.
    pub path: String,
    /// Whitespace before the `;`.
    pub semi_prefix: String,
}

/// One parsed source file.
///
/// `prefix` holds trivia before the first construct; `eof` holds trailing
/// trivia after the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub id: NodeId,
    pub prefix: String,
    pub package: Option<PackageDecl>,
    pub imports: Vec<Import>,
    pub classes: Vec<ClassDecl>,
    pub eof: String,
}

impl CompilationUnit {
    /// Every annotation in the unit, in source order (class annotations,
    /// then member and parameter annotations per class).
    pub fn annotations(&self) -> Vec<&Annotation> {
        let mut out = Vec::new();
        for class in &self.classes {
            out.extend(class.leading_annotations.iter());
            for member in &class.body.members {
                match member {
                    Member::Method(m) => {
                        out.extend(m.leading_annotations.iter());
                        for p in &m.params {
                            out.extend(p.leading_annotations.iter());
                        }
                    }
                    Member::Field(f) => out.extend(f.leading_annotations.iter()),
                }
            }
        }
        out
    }

    /// True when the unit references the fully-qualified type anywhere: as a
    /// resolved annotation type or as an import. Used by recipe
    /// applicability pre-checks.
    pub fn uses_type(&self, fully_qualified: &str) -> bool {
        self.imports.iter().any(|i| i.path == fully_qualified)
            || self
                .annotations()
                .iter()
                .any(|a| a.is_of_type(fully_qualified))
    }

    /// True when any annotation (not import) still references the type.
    /// Import removal consults this after a rewrite.
    pub fn references_annotation_type(&self, fully_qualified: &str) -> bool {
        self.annotations().iter().any(|a| a.is_of_type(fully_qualified))
    }
}
