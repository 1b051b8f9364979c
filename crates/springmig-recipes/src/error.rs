// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Error types for recipe configuration and declarative resolution.
//!
//! Misconfiguration surfaces when a recipe is constructed, before it ever
//! sees a tree; declarative load failures surface when a declared entry is
//! resolved, so a pipeline entry that fails to resolve is never partially
//! applied.

use thiserror::Error;

/// A recipe was constructed with unusable options.
#[derive(Debug, Error)]
pub enum RecipeConfigError {
    /// A required option string was empty.
    #[error("option '{option}' must not be empty")]
    EmptyOption { option: &'static str },

    /// An annotation type option was not a fully-qualified name.
    #[error("option '{option}' must be a fully-qualified type name, got '{value}'")]
    NotFullyQualified { option: &'static str, value: String },
}

/// A declared recipe could not be resolved into a runnable one.
#[derive(Debug, Error)]
pub enum RecipeLoadError {
    /// The declared type id names no recipe in the catalog.
    #[error("unknown recipe id '{id}'")]
    UnknownRecipe { id: String },

    /// The declared option map did not deserialize into the recipe's
    /// options.
    #[error("invalid options for recipe '{id}': {source}")]
    InvalidOptions {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// The options deserialized but failed the recipe's own validation.
    #[error("invalid configuration for recipe '{id}': {source}")]
    InvalidConfiguration {
        id: String,
        #[source]
        source: RecipeConfigError,
    },
}

/// Validate a fully-qualified annotation type option.
pub(crate) fn require_type_name(
    option: &'static str,
    value: impl Into<String>,
) -> Result<String, RecipeConfigError> {
    let value = value.into();
    if value.is_empty() {
        return Err(RecipeConfigError::EmptyOption { option });
    }
    if !value.contains('.') {
        return Err(RecipeConfigError::NotFullyQualified { option, value });
    }
    Ok(value)
}

/// Validate an attribute-name option.
pub(crate) fn require_attribute_name(
    option: &'static str,
    value: impl Into<String>,
) -> Result<String, RecipeConfigError> {
    let value = value.into();
    if value.is_empty() {
        return Err(RecipeConfigError::EmptyOption { option });
    }
    Ok(value)
}
