// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Rewriting visitor infrastructure for the Java CST.
//!
//! # Traversal Model
//!
//! [`JavaVisitor`] exposes one callback per rewritable node kind; each
//! default implementation delegates to the matching `walk_*` function, which
//! rebuilds the node from the callbacks' results (depth-first, children
//! before the enclosing declaration's post-processing). Visitors return new
//! node values; nothing is mutated in place. `visit_annotation` returns an
//! `Option` — returning `None` removes the annotation from its parent's
//! leading-annotation list.
//!
//! # Traversal Context
//!
//! [`TraversalContext`] is scratch state scoped to one tree visitation:
//!
//! - a **cursor**: walk functions push a [`CursorFrame`] per container node,
//!   so a callback can ask what declaration it is nested in
//!   ([`TraversalContext::parent_frame`]);
//! - a **message board**: a child callback posts a [`Message`] against its
//!   parent's node id; the parent reads it back once control returns
//!   ([`TraversalContext::poll_message`] reads once and clears);
//! - an **import side channel**: [`TraversalContext::add_import`] /
//!   [`TraversalContext::maybe_remove_import`] record requests that the
//!   recipe driver applies to the finished unit (see
//!   [`apply_import_ops`](crate::imports::apply_import_ops)).
//!
//! Contexts are cheap; build a fresh one per visitation and drop it on
//! return.

use std::collections::HashMap;

use crate::nodes::{
    Annotation, ClassBody, ClassDecl, CompilationUnit, Member, MethodDecl, NodeId, NodeKind,
    VariableDecl,
};

/// A message posted on the traversal context's board.
///
/// Closed set: the native visitor catalog communicates only annotation
/// removals upward.
#[derive(Debug, Clone)]
pub enum Message {
    /// The given annotation was removed from the declaration the message is
    /// addressed to. Carries the removed node so the parent can repair
    /// surrounding trivia.
    AnnotationRemoved(Annotation),
}

/// One entry of the cursor stack: the container node being walked.
#[derive(Debug, Clone)]
pub struct CursorFrame {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Resolved types of the container's leading annotations, captured
    /// before its children are visited.
    pub annotation_types: Vec<String>,
}

/// Per-visitation scratch state. See the module docs.
#[derive(Debug, Default)]
pub struct TraversalContext {
    cursor: Vec<CursorFrame>,
    messages: HashMap<(NodeId, &'static str), Message>,
    import_adds: Vec<String>,
    import_removals: Vec<String>,
}

impl TraversalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The innermost container currently being walked.
    pub fn parent_frame(&self) -> Option<&CursorFrame> {
        self.cursor.last()
    }

    /// Post a message addressed to the given node; read it back with
    /// [`poll_message`](Self::poll_message). A second message with the same
    /// key overwrites the first.
    pub fn put_message(&mut self, target: NodeId, key: &'static str, message: Message) {
        self.messages.insert((target, key), message);
    }

    /// Read-once: returns the message and clears it from the board.
    pub fn poll_message(&mut self, target: NodeId, key: &'static str) -> Option<Message> {
        self.messages.remove(&(target, key))
    }

    /// Request that an import for the type be added to the unit.
    pub fn add_import(&mut self, fully_qualified: impl Into<String>) {
        self.import_adds.push(fully_qualified.into());
    }

    /// Request best-effort removal of the import for the type. The request
    /// is ignored when the finished unit still references the type.
    pub fn maybe_remove_import(&mut self, fully_qualified: impl Into<String>) {
        self.import_removals.push(fully_qualified.into());
    }

    pub fn pending_import_adds(&self) -> &[String] {
        &self.import_adds
    }

    pub fn pending_import_removals(&self) -> &[String] {
        &self.import_removals
    }

    fn push_frame(&mut self, frame: CursorFrame) {
        self.cursor.push(frame);
    }

    fn pop_frame(&mut self) {
        self.cursor.pop();
    }
}

fn annotation_types(annotations: &[Annotation]) -> Vec<String> {
    annotations
        .iter()
        .filter_map(|a| a.resolved_type.clone())
        .collect()
}

/// A rewriting visitor over the Java CST.
///
/// Implementations override the callbacks they care about; every default
/// walks into children and rebuilds the node unchanged, so an untouched
/// subtree compares equal to its input.
pub trait JavaVisitor {
    fn visit_compilation_unit(
        &mut self,
        unit: CompilationUnit,
        ctx: &mut TraversalContext,
    ) -> CompilationUnit {
        walk_compilation_unit(self, unit, ctx)
    }

    fn visit_class_declaration(
        &mut self,
        class: ClassDecl,
        ctx: &mut TraversalContext,
    ) -> ClassDecl {
        walk_class_declaration(self, class, ctx)
    }

    fn visit_method_declaration(
        &mut self,
        method: MethodDecl,
        ctx: &mut TraversalContext,
    ) -> MethodDecl {
        walk_method_declaration(self, method, ctx)
    }

    fn visit_variable_declarations(
        &mut self,
        decl: VariableDecl,
        ctx: &mut TraversalContext,
    ) -> VariableDecl {
        walk_variable_declarations(self, decl, ctx)
    }

    /// Visit one annotation. Return `None` to remove it from its parent's
    /// leading-annotation list; the parent's callback is responsible for any
    /// trivia repair.
    fn visit_annotation(
        &mut self,
        annotation: Annotation,
        _ctx: &mut TraversalContext,
    ) -> Option<Annotation> {
        Some(annotation)
    }
}

pub fn walk_compilation_unit<V: JavaVisitor + ?Sized>(
    visitor: &mut V,
    unit: CompilationUnit,
    ctx: &mut TraversalContext,
) -> CompilationUnit {
    ctx.push_frame(CursorFrame {
        id: unit.id,
        kind: NodeKind::CompilationUnit,
        annotation_types: Vec::new(),
    });
    let CompilationUnit {
        id,
        prefix,
        package,
        imports,
        classes,
        eof,
    } = unit;
    let classes = classes
        .into_iter()
        .map(|c| visitor.visit_class_declaration(c, ctx))
        .collect();
    ctx.pop_frame();
    CompilationUnit {
        id,
        prefix,
        package,
        imports,
        classes,
        eof,
    }
}

pub fn walk_class_declaration<V: JavaVisitor + ?Sized>(
    visitor: &mut V,
    class: ClassDecl,
    ctx: &mut TraversalContext,
) -> ClassDecl {
    ctx.push_frame(CursorFrame {
        id: class.id,
        kind: NodeKind::Class,
        annotation_types: annotation_types(&class.leading_annotations),
    });
    let ClassDecl {
        id,
        prefix,
        leading_annotations,
        modifiers,
        kind_prefix,
        name,
        type_params,
        body,
    } = class;
    let leading_annotations = leading_annotations
        .into_iter()
        .filter_map(|a| visitor.visit_annotation(a, ctx))
        .collect();
    let ClassBody {
        lbrace_prefix,
        members,
        rbrace_prefix,
    } = body;
    let members = members
        .into_iter()
        .map(|member| match member {
            Member::Method(m) => Member::Method(visitor.visit_method_declaration(m, ctx)),
            Member::Field(f) => Member::Field(visitor.visit_variable_declarations(f, ctx)),
        })
        .collect();
    ctx.pop_frame();
    ClassDecl {
        id,
        prefix,
        leading_annotations,
        modifiers,
        kind_prefix,
        name,
        type_params,
        body: ClassBody {
            lbrace_prefix,
            members,
            rbrace_prefix,
        },
    }
}

pub fn walk_method_declaration<V: JavaVisitor + ?Sized>(
    visitor: &mut V,
    method: MethodDecl,
    ctx: &mut TraversalContext,
) -> MethodDecl {
    ctx.push_frame(CursorFrame {
        id: method.id,
        kind: NodeKind::Method,
        annotation_types: annotation_types(&method.leading_annotations),
    });
    let MethodDecl {
        id,
        prefix,
        leading_annotations,
        modifiers,
        type_params,
        return_type,
        name,
        lparen_prefix,
        params,
        rparen_prefix,
        throws,
        body,
    } = method;
    let leading_annotations = leading_annotations
        .into_iter()
        .filter_map(|a| visitor.visit_annotation(a, ctx))
        .collect();
    let params = params
        .into_iter()
        .map(|p| visitor.visit_variable_declarations(p, ctx))
        .collect();
    ctx.pop_frame();
    MethodDecl {
        id,
        prefix,
        leading_annotations,
        modifiers,
        type_params,
        return_type,
        name,
        lparen_prefix,
        params,
        rparen_prefix,
        throws,
        body,
    }
}

pub fn walk_variable_declarations<V: JavaVisitor + ?Sized>(
    visitor: &mut V,
    decl: VariableDecl,
    ctx: &mut TraversalContext,
) -> VariableDecl {
    ctx.push_frame(CursorFrame {
        id: decl.id,
        kind: NodeKind::Variable,
        annotation_types: annotation_types(&decl.leading_annotations),
    });
    let VariableDecl {
        id,
        prefix,
        leading_annotations,
        modifiers,
        type_expr,
        name,
        tail,
    } = decl;
    let leading_annotations = leading_annotations
        .into_iter()
        .filter_map(|a| visitor.visit_annotation(a, ctx))
        .collect();
    ctx.pop_frame();
    VariableDecl {
        id,
        prefix,
        leading_annotations,
        modifiers,
        type_expr,
        name,
        tail,
    }
}
