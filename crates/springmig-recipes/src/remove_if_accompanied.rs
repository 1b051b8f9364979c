// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Remove an annotation, but only where a second annotation accompanies it.
//!
//! Removal is decided at the annotation callback: the visitor consults the
//! cursor for the enclosing declaration's annotation types and, when the
//! companion is present, drops the annotation and posts an
//! [`AnnotationRemoved`](Message::AnnotationRemoved) message against that
//! declaration's id. The declaration callback polls the message after its
//! children are rebuilt and repairs the trivia the removal disturbed:
//!
//! - removing the only annotation hands its prefix to the declaration's next
//!   construct (first modifier, else type parameters, else type, else name);
//! - removing the first of several hands its prefix to the new first
//!   annotation, unless the two prefixes already matched.

use tracing::debug;

use springmig_java_cst::{
    apply_import_ops, walk_class_declaration, walk_method_declaration,
    walk_variable_declarations, Annotation, ClassDecl, CompilationUnit, JavaVisitor, Message,
    MethodDecl, TraversalContext, VariableDecl,
};

use crate::error::{require_type_name, RecipeConfigError};

const ANNOTATION_REMOVED_KEY: &str = "annotationRemoved";

/// Removes one annotation type from declarations that also carry a second,
/// required annotation type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveAnnotationIfAccompanied {
    annotation_type_to_remove: String,
    additional_annotation_type: String,
}

impl RemoveAnnotationIfAccompanied {
    pub fn new(
        annotation_type_to_remove: impl Into<String>,
        additional_annotation_type: impl Into<String>,
    ) -> Result<Self, RecipeConfigError> {
        Ok(RemoveAnnotationIfAccompanied {
            annotation_type_to_remove: require_type_name(
                "annotationTypeToRemove",
                annotation_type_to_remove,
            )?,
            additional_annotation_type: require_type_name(
                "additionalAnnotationType",
                additional_annotation_type,
            )?,
        })
    }

    pub fn display_name(&self) -> String {
        "Remove an annotation when another annotation accompanies it".to_string()
    }

    pub fn description(&self) -> String {
        format!(
            "Remove `@{}` from declarations that also carry `@{}`, dropping \
             its import when it is no longer referenced.",
            self.annotation_type_to_remove, self.additional_annotation_type,
        )
    }

    pub fn run(&self, unit: CompilationUnit) -> CompilationUnit {
        if !unit.uses_type(&self.annotation_type_to_remove) {
            return unit;
        }
        let mut visitor = RemoveAnnotationIfAccompaniedVisitor { recipe: self };
        let mut ctx = TraversalContext::new();
        let unit = visitor.visit_compilation_unit(unit, &mut ctx);
        apply_import_ops(unit, &ctx)
    }
}

struct RemoveAnnotationIfAccompaniedVisitor<'a> {
    recipe: &'a RemoveAnnotationIfAccompanied,
}

impl RemoveAnnotationIfAccompaniedVisitor<'_> {
    /// After a walk dropped an annotation, fix the prefix of whatever now
    /// leads the declaration. `original` is the pre-walk annotation list;
    /// index checks run against it because `remaining` no longer contains
    /// the removed node.
    fn repair_leading_annotations(
        remaining: &mut [Annotation],
        original: &[Annotation],
        removed: &Annotation,
    ) {
        if original.first().map(|a| a.id) != Some(removed.id) {
            return;
        }
        if let Some(next) = remaining.first_mut() {
            if next.prefix != removed.prefix {
                next.prefix = removed.prefix.clone();
            }
        }
    }
}

impl JavaVisitor for RemoveAnnotationIfAccompaniedVisitor<'_> {
    fn visit_annotation(
        &mut self,
        annotation: Annotation,
        ctx: &mut TraversalContext,
    ) -> Option<Annotation> {
        if !annotation.is_of_type(&self.recipe.annotation_type_to_remove) {
            return Some(annotation);
        }
        let Some(parent) = ctx.parent_frame() else {
            return Some(annotation);
        };
        if !parent
            .annotation_types
            .iter()
            .any(|t| t == &self.recipe.additional_annotation_type)
        {
            return Some(annotation);
        }
        let target = parent.id;
        debug!(
            annotation = %self.recipe.annotation_type_to_remove,
            "removing accompanied annotation"
        );
        ctx.put_message(
            target,
            ANNOTATION_REMOVED_KEY,
            Message::AnnotationRemoved(annotation.clone()),
        );
        ctx.maybe_remove_import(&self.recipe.annotation_type_to_remove);
        None
    }

    fn visit_method_declaration(
        &mut self,
        method: MethodDecl,
        ctx: &mut TraversalContext,
    ) -> MethodDecl {
        let original = method.leading_annotations.clone();
        let mut method = walk_method_declaration(self, method, ctx);
        let Some(Message::AnnotationRemoved(removed)) =
            ctx.poll_message(method.id, ANNOTATION_REMOVED_KEY)
        else {
            return method;
        };
        if original.len() == 1 && original[0].id == removed.id {
            // The sole annotation is gone; its prefix moves to the next
            // construct of the declaration.
            if let Some(modifier) = method.modifiers.first_mut() {
                modifier.prefix = removed.prefix;
            } else if let Some(type_params) = method.type_params.as_mut() {
                type_params.prefix = removed.prefix;
            } else if let Some(return_type) = method.return_type.as_mut() {
                return_type.prefix = removed.prefix;
            } else {
                method.name.prefix = removed.prefix;
            }
        } else {
            Self::repair_leading_annotations(
                &mut method.leading_annotations,
                &original,
                &removed,
            );
        }
        method
    }

    fn visit_variable_declarations(
        &mut self,
        decl: VariableDecl,
        ctx: &mut TraversalContext,
    ) -> VariableDecl {
        let original = decl.leading_annotations.clone();
        let mut decl = walk_variable_declarations(self, decl, ctx);
        let Some(Message::AnnotationRemoved(removed)) =
            ctx.poll_message(decl.id, ANNOTATION_REMOVED_KEY)
        else {
            return decl;
        };
        if original.len() == 1 && original[0].id == removed.id {
            if let Some(modifier) = decl.modifiers.first_mut() {
                modifier.prefix = removed.prefix;
            } else {
                decl.type_expr.prefix = removed.prefix;
            }
        } else {
            Self::repair_leading_annotations(&mut decl.leading_annotations, &original, &removed);
        }
        decl
    }

    fn visit_class_declaration(
        &mut self,
        class: ClassDecl,
        ctx: &mut TraversalContext,
    ) -> ClassDecl {
        let original = class.leading_annotations.clone();
        let mut class = walk_class_declaration(self, class, ctx);
        let Some(Message::AnnotationRemoved(removed)) =
            ctx.poll_message(class.id, ANNOTATION_REMOVED_KEY)
        else {
            return class;
        };
        if original.len() == 1 && original[0].id == removed.id {
            if let Some(modifier) = class.modifiers.first_mut() {
                modifier.prefix = removed.prefix;
            } else {
                class.kind_prefix = removed.prefix;
            }
        } else {
            Self::repair_leading_annotations(&mut class.leading_annotations, &original, &removed);
        }
        class
    }
}
