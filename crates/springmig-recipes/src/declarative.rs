// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Declarative recipe definitions.
//!
//! A [`DeclaredRecipe`] is data: a catalog type id plus an untyped option
//! map, the shape a YAML or JSON recipe file deserializes into. A
//! [`RecipeLoader`] resolves each entry into a runnable [`Recipe`];
//! [`DeclarativeRecipe::resolve`] resolves a whole list up front, so a bad
//! entry fails the load before any tree is touched rather than midway
//! through a rewrite.

use serde::{Deserialize, Serialize};
use tracing::debug;

use springmig_java_cst::CompilationUnit;

use crate::copy_attribute::CopyAnnotationAttribute;
use crate::error::RecipeLoadError;
use crate::pipeline::Recipe;
use crate::remove_if_accompanied::RemoveAnnotationIfAccompanied;

/// Catalog id of [`CopyAnnotationAttribute`].
pub const COPY_ANNOTATION_ATTRIBUTE_ID: &str = "springmig.CopyAnnotationAttribute";
/// Catalog id of [`RemoveAnnotationIfAccompanied`].
pub const REMOVE_ANNOTATION_IF_ACCOMPANIED_ID: &str = "springmig.RemoveAnnotationIfAccompanied";

/// One entry of a declarative recipe definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclaredRecipe {
    /// Catalog id of the recipe to instantiate.
    #[serde(rename = "type")]
    pub type_id: String,
    /// Recipe options, keyed by camelCase option name.
    #[serde(default)]
    pub options: serde_json::Value,
}

impl DeclaredRecipe {
    pub fn new(type_id: impl Into<String>, options: serde_json::Value) -> Self {
        DeclaredRecipe {
            type_id: type_id.into(),
            options,
        }
    }
}

/// Resolves declared entries into runnable recipes.
pub trait RecipeLoader {
    fn resolve(&self, declared: &DeclaredRecipe) -> Result<Recipe, RecipeLoadError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CopyAnnotationAttributeOptions {
    source_annotation_type: String,
    source_attribute_name: String,
    target_annotation_type: String,
    target_attribute_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RemoveAnnotationIfAccompaniedOptions {
    annotation_type_to_remove: String,
    additional_annotation_type: String,
}

/// The built-in catalog loader: knows every recipe in [`Recipe`]'s closed
/// set by its catalog id.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogLoader;

impl CatalogLoader {
    fn options<T: serde::de::DeserializeOwned>(
        declared: &DeclaredRecipe,
    ) -> Result<T, RecipeLoadError> {
        serde_json::from_value(declared.options.clone()).map_err(|source| {
            RecipeLoadError::InvalidOptions {
                id: declared.type_id.clone(),
                source,
            }
        })
    }
}

impl RecipeLoader for CatalogLoader {
    fn resolve(&self, declared: &DeclaredRecipe) -> Result<Recipe, RecipeLoadError> {
        match declared.type_id.as_str() {
            COPY_ANNOTATION_ATTRIBUTE_ID => {
                let options: CopyAnnotationAttributeOptions = Self::options(declared)?;
                CopyAnnotationAttribute::new(
                    options.source_annotation_type,
                    options.source_attribute_name,
                    options.target_annotation_type,
                    options.target_attribute_name,
                )
                .map(Recipe::from)
                .map_err(|source| RecipeLoadError::InvalidConfiguration {
                    id: declared.type_id.clone(),
                    source,
                })
            }
            REMOVE_ANNOTATION_IF_ACCOMPANIED_ID => {
                let options: RemoveAnnotationIfAccompaniedOptions = Self::options(declared)?;
                RemoveAnnotationIfAccompanied::new(
                    options.annotation_type_to_remove,
                    options.additional_annotation_type,
                )
                .map(Recipe::from)
                .map_err(|source| RecipeLoadError::InvalidConfiguration {
                    id: declared.type_id.clone(),
                    source,
                })
            }
            _ => Err(RecipeLoadError::UnknownRecipe {
                id: declared.type_id.clone(),
            }),
        }
    }
}

/// A recipe assembled from declared entries.
///
/// Running one is equivalent to running its resolved recipes in order.
#[derive(Debug, Clone)]
pub struct DeclarativeRecipe {
    name: String,
    display_name: String,
    recipes: Vec<Recipe>,
}

impl DeclarativeRecipe {
    /// Resolve every declared entry through the loader. Fails on the first
    /// unresolvable entry, without running anything.
    pub fn resolve(
        name: impl Into<String>,
        display_name: impl Into<String>,
        declared: &[DeclaredRecipe],
        loader: &dyn RecipeLoader,
    ) -> Result<Self, RecipeLoadError> {
        let recipes = declared
            .iter()
            .map(|entry| loader.resolve(entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DeclarativeRecipe {
            name: name.into(),
            display_name: display_name.into(),
            recipes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> String {
        format!(
            "Declarative recipe `{}` composed of {} resolved steps.",
            self.name,
            self.recipes.len(),
        )
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn run(&self, unit: CompilationUnit) -> CompilationUnit {
        debug!(recipe = %self.name, steps = self.recipes.len(), "running declarative recipe");
        self.recipes
            .iter()
            .fold(unit, |unit, recipe| recipe.run(unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_recipe_id_fails_resolution() {
        let declared = DeclaredRecipe::new("springmig.DoesNotExist", json!({}));
        let err = CatalogLoader.resolve(&declared).unwrap_err();
        assert!(matches!(err, RecipeLoadError::UnknownRecipe { id } if id == "springmig.DoesNotExist"));
    }

    #[test]
    fn missing_option_fails_resolution() {
        let declared = DeclaredRecipe::new(
            COPY_ANNOTATION_ATTRIBUTE_ID,
            json!({ "sourceAnnotationType": "javax.ws.rs.DefaultValue" }),
        );
        let err = CatalogLoader.resolve(&declared).unwrap_err();
        assert!(matches!(err, RecipeLoadError::InvalidOptions { .. }));
    }

    #[test]
    fn invalid_configuration_is_distinguished_from_bad_shape() {
        let declared = DeclaredRecipe::new(
            REMOVE_ANNOTATION_IF_ACCOMPANIED_ID,
            json!({
                "annotationTypeToRemove": "DefaultValue",
                "additionalAnnotationType": "org.springframework.web.bind.annotation.RequestParam",
            }),
        );
        let err = CatalogLoader.resolve(&declared).unwrap_err();
        assert!(matches!(err, RecipeLoadError::InvalidConfiguration { .. }));
    }

    #[test]
    fn resolution_fails_before_anything_runs() {
        let declared = vec![
            DeclaredRecipe::new(
                COPY_ANNOTATION_ATTRIBUTE_ID,
                json!({
                    "sourceAnnotationType": "javax.ws.rs.DefaultValue",
                    "sourceAttributeName": "value",
                    "targetAnnotationType": "org.springframework.web.bind.annotation.RequestParam",
                    "targetAttributeName": "defaultValue",
                }),
            ),
            DeclaredRecipe::new("springmig.DoesNotExist", json!({})),
        ];
        let result = DeclarativeRecipe::resolve("test", "Test", &declared, &CatalogLoader);
        assert!(matches!(
            result,
            Err(RecipeLoadError::UnknownRecipe { .. })
        ));
    }

    #[test]
    fn declared_entries_deserialize_from_json() {
        let raw = r#"{
            "type": "springmig.RemoveAnnotationIfAccompanied",
            "options": {
                "annotationTypeToRemove": "javax.ws.rs.DefaultValue",
                "additionalAnnotationType": "org.springframework.web.bind.annotation.RequestParam"
            }
        }"#;
        let declared: DeclaredRecipe = serde_json::from_str(raw).unwrap();
        let recipe = CatalogLoader.resolve(&declared).unwrap();
        assert!(matches!(recipe, Recipe::RemoveAnnotationIfAccompanied(_)));
    }
}
