// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Recipe composition: the closed recipe catalog and sequential pipelines.

use tracing::debug;

use springmig_java_cst::CompilationUnit;

use crate::copy_attribute::CopyAnnotationAttribute;
use crate::declarative::DeclarativeRecipe;
use crate::remove_if_accompanied::RemoveAnnotationIfAccompanied;

/// The closed set of runnable recipes.
///
/// Every recipe transforms a whole compilation unit and returns the input
/// unchanged (byte-identical after printing) when nothing applies.
#[derive(Debug, Clone)]
pub enum Recipe {
    CopyAnnotationAttribute(CopyAnnotationAttribute),
    RemoveAnnotationIfAccompanied(RemoveAnnotationIfAccompanied),
    Declarative(DeclarativeRecipe),
}

impl Recipe {
    pub fn display_name(&self) -> String {
        match self {
            Recipe::CopyAnnotationAttribute(r) => r.display_name(),
            Recipe::RemoveAnnotationIfAccompanied(r) => r.display_name(),
            Recipe::Declarative(r) => r.display_name().to_string(),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Recipe::CopyAnnotationAttribute(r) => r.description(),
            Recipe::RemoveAnnotationIfAccompanied(r) => r.description(),
            Recipe::Declarative(r) => r.description(),
        }
    }

    pub fn run(&self, unit: CompilationUnit) -> CompilationUnit {
        match self {
            Recipe::CopyAnnotationAttribute(r) => r.run(unit),
            Recipe::RemoveAnnotationIfAccompanied(r) => r.run(unit),
            Recipe::Declarative(r) => r.run(unit),
        }
    }
}

impl From<CopyAnnotationAttribute> for Recipe {
    fn from(recipe: CopyAnnotationAttribute) -> Self {
        Recipe::CopyAnnotationAttribute(recipe)
    }
}

impl From<RemoveAnnotationIfAccompanied> for Recipe {
    fn from(recipe: RemoveAnnotationIfAccompanied) -> Self {
        Recipe::RemoveAnnotationIfAccompanied(recipe)
    }
}

impl From<DeclarativeRecipe> for Recipe {
    fn from(recipe: DeclarativeRecipe) -> Self {
        Recipe::Declarative(recipe)
    }
}

/// An ordered sequence of recipes run against one compilation unit.
///
/// Each recipe receives the previous recipe's output, so a later step sees
/// the edits of an earlier one.
#[derive(Debug, Clone, Default)]
pub struct RecipePipeline {
    name: String,
    recipes: Vec<Recipe>,
}

impl RecipePipeline {
    pub fn new(name: impl Into<String>) -> Self {
        RecipePipeline {
            name: name.into(),
            recipes: Vec::new(),
        }
    }

    pub fn with_recipe(mut self, recipe: impl Into<Recipe>) -> Self {
        self.recipes.push(recipe.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn run(&self, unit: CompilationUnit) -> CompilationUnit {
        debug!(pipeline = %self.name, steps = self.recipes.len(), "running pipeline");
        self.recipes
            .iter()
            .fold(unit, |unit, recipe| recipe.run(unit))
    }
}

/// The stock JAX-RS parameter migration: fold `@DefaultValue` into
/// `@RequestParam(defaultValue = ...)`, then remove the now-redundant
/// `@DefaultValue`.
pub fn replace_request_parameter_properties() -> RecipePipeline {
    let copy = CopyAnnotationAttribute::new(
        "javax.ws.rs.DefaultValue",
        "value",
        "org.springframework.web.bind.annotation.RequestParam",
        "defaultValue",
    )
    .expect("stock recipe options are valid");
    let remove = RemoveAnnotationIfAccompanied::new(
        "javax.ws.rs.DefaultValue",
        "org.springframework.web.bind.annotation.RequestParam",
    )
    .expect("stock recipe options are valid");
    RecipePipeline::new("Replace request parameter properties")
        .with_recipe(copy)
        .with_recipe(remove)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_pipeline_has_copy_then_remove() {
        let pipeline = replace_request_parameter_properties();
        assert_eq!(pipeline.recipes().len(), 2);
        assert!(matches!(
            pipeline.recipes()[0],
            Recipe::CopyAnnotationAttribute(_)
        ));
        assert!(matches!(
            pipeline.recipes()[1],
            Recipe::RemoveAnnotationIfAccompanied(_)
        ));
    }
}
