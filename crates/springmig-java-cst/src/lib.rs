// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A Java parser subset and Concrete Syntax Tree (CST) library for springmig.
//!
//! This crate is the AST-engine seam of the migration tool: it parses the
//! slice of Java that annotation-migration recipes care about into a CST
//! that preserves all whitespace and formatting, and prints it back
//! byte-exactly. On top of the tree it provides the rewriting visitor
//! infrastructure (per-node callbacks, cursor, parent-scoped message board)
//! and the import side channel that recipes use while rewriting.
//!
//! # Quick Start
//!
//! ```
//! use springmig_java_cst::{parse_compilation_unit, Codegen};
//!
//! let source = "import javax.ws.rs.DefaultValue;\n\nclass C {\n    void m(@DefaultValue(\"x\") String s) {\n    }\n}\n";
//! let unit = parse_compilation_unit(source).expect("parse error");
//!
//! // Round-trip: printing an unmodified tree reproduces the input.
//! assert_eq!(unit.to_source(), source);
//!
//! // Annotation types are resolved through the unit's imports.
//! assert_eq!(
//!     unit.annotations()[0].resolved_type.as_deref(),
//!     Some("javax.ws.rs.DefaultValue"),
//! );
//! ```
//!
//! # Rewriting
//!
//! Implement [`JavaVisitor`], overriding the callbacks for the node kinds to
//! rewrite; run it with a fresh [`TraversalContext`] per tree, then apply the
//! context's recorded import operations:
//!
//! ```ignore
//! let mut ctx = TraversalContext::new();
//! let unit = my_visitor.visit_compilation_unit(unit, &mut ctx);
//! let unit = apply_import_ops(unit, &ctx);
//! ```

/// Node types for the Java CST subset.
pub mod nodes;
pub use nodes::{
    Annotation, AnnotationArg, AnnotationArguments, Assignment, Block, ClassBody, ClassDecl,
    CompilationUnit, Ident, Import, Literal, LiteralValue, Member, MethodDecl, Modifier,
    ModifierKind, NodeId, NodeKind, PackageDecl, RawSpan, TypeExpr, VarTail, VariableDecl,
};

/// Code generation back to source text.
pub mod codegen;
pub use codegen::{Codegen, CodegenState};

/// The recursive-descent parser for the subset.
pub mod parser;
pub use parser::{parse_compilation_unit, ParseError};

/// Visitor infrastructure for CST rewriting.
pub mod visitor;
pub use visitor::{
    walk_class_declaration, walk_compilation_unit, walk_method_declaration,
    walk_variable_declarations, CursorFrame, JavaVisitor, Message, TraversalContext,
};

/// Import bookkeeping applied after a rewrite.
pub mod imports;
pub use imports::{add_import, apply_import_ops, maybe_remove_import};
