// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Copy an attribute value between two annotations on the same declaration.
//!
//! The motivating migration: JAX-RS expresses a parameter default as a
//! separate `@javax.ws.rs.DefaultValue("x")` annotation, while Spring folds
//! it into `@RequestParam(defaultValue = "x")`. This recipe carries the
//! value across; a companion
//! [`RemoveAnnotationIfAccompanied`](crate::RemoveAnnotationIfAccompanied)
//! pass then drops the source annotation.

use tracing::debug;

use springmig_java_cst::{
    apply_import_ops, CompilationUnit, JavaVisitor, TraversalContext, VariableDecl,
    walk_variable_declarations,
};

use crate::attrs;
use crate::error::{require_attribute_name, require_type_name, RecipeConfigError};

/// Copies a source annotation's attribute onto a target annotation wherever
/// both annotations sit on the same variable declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyAnnotationAttribute {
    source_annotation_type: String,
    source_attribute_name: String,
    target_annotation_type: String,
    target_attribute_name: String,
}

impl CopyAnnotationAttribute {
    pub fn new(
        source_annotation_type: impl Into<String>,
        source_attribute_name: impl Into<String>,
        target_annotation_type: impl Into<String>,
        target_attribute_name: impl Into<String>,
    ) -> Result<Self, RecipeConfigError> {
        Ok(CopyAnnotationAttribute {
            source_annotation_type: require_type_name(
                "sourceAnnotationType",
                source_annotation_type,
            )?,
            source_attribute_name: require_attribute_name(
                "sourceAttributeName",
                source_attribute_name,
            )?,
            target_annotation_type: require_type_name(
                "targetAnnotationType",
                target_annotation_type,
            )?,
            target_attribute_name: require_attribute_name(
                "targetAttributeName",
                target_attribute_name,
            )?,
        })
    }

    pub fn display_name(&self) -> String {
        "Copy an annotation attribute onto another annotation".to_string()
    }

    pub fn description(&self) -> String {
        format!(
            "Copy the `{}` attribute of `@{}` into the `{}` attribute of `@{}` \
             on declarations that carry both annotations.",
            self.source_attribute_name,
            self.source_annotation_type,
            self.target_attribute_name,
            self.target_annotation_type,
        )
    }

    pub fn run(&self, unit: CompilationUnit) -> CompilationUnit {
        if !unit.uses_type(&self.source_annotation_type) {
            return unit;
        }
        let mut visitor = CopyAnnotationAttributeVisitor { recipe: self };
        let mut ctx = TraversalContext::new();
        let unit = visitor.visit_compilation_unit(unit, &mut ctx);
        apply_import_ops(unit, &ctx)
    }
}

struct CopyAnnotationAttributeVisitor<'a> {
    recipe: &'a CopyAnnotationAttribute,
}

impl JavaVisitor for CopyAnnotationAttributeVisitor<'_> {
    fn visit_variable_declarations(
        &mut self,
        decl: VariableDecl,
        ctx: &mut TraversalContext,
    ) -> VariableDecl {
        let decl = walk_variable_declarations(self, decl, ctx);
        if decl.leading_annotations.len() < 2
            || !decl.has_annotation_of_type(&self.recipe.source_annotation_type)
            || !decl.has_annotation_of_type(&self.recipe.target_annotation_type)
        {
            return decl;
        }

        let source_value = decl
            .leading_annotations
            .iter()
            .filter(|a| a.is_of_type(&self.recipe.source_annotation_type))
            .find_map(|a| attrs::attribute_value(a, &self.recipe.source_attribute_name))
            .cloned();
        let Some(source_value) = source_value else {
            return decl;
        };
        if source_value.value.is_null_or_empty() {
            debug!(
                attribute = %self.recipe.source_attribute_name,
                "source attribute is null or empty, nothing to copy"
            );
            return decl;
        }

        let VariableDecl {
            id,
            prefix,
            leading_annotations,
            modifiers,
            type_expr,
            name,
            tail,
        } = decl;
        let mut changed = false;
        let leading_annotations = leading_annotations
            .into_iter()
            .map(|a| {
                if a.is_of_type(&self.recipe.target_annotation_type) {
                    let before = a.clone();
                    let after =
                        attrs::set_attribute(a, &self.recipe.target_attribute_name, &source_value);
                    if after != before {
                        changed = true;
                    }
                    after
                } else {
                    a
                }
            })
            .collect();
        if changed {
            debug!(
                target = %self.recipe.target_annotation_type,
                attribute = %self.recipe.target_attribute_name,
                "copied annotation attribute"
            );
        }
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
}
