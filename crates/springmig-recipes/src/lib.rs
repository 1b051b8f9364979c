// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Annotation-migration recipes for moving JAX-RS code to Spring MVC.
//!
//! A recipe is a whole-compilation-unit rewrite built on the
//! `springmig-java-cst` visitor infrastructure. The catalog is small and
//! closed:
//!
//! - [`CopyAnnotationAttribute`] copies an attribute value from one
//!   annotation to another on the same declaration;
//! - [`RemoveAnnotationIfAccompanied`] removes an annotation where a second
//!   one accompanies it, repairing whitespace and imports;
//! - [`RecipePipeline`] runs recipes in sequence, each seeing the previous
//!   one's output;
//! - [`DeclarativeRecipe`] assembles a pipeline from data
//!   ([`DeclaredRecipe`] entries resolved through a [`RecipeLoader`]).
//!
//! Every recipe leaves non-matching code byte-identical and is idempotent:
//! running it twice prints the same bytes as running it once.
//!
//! # Example
//!
//! ```
//! use springmig_java_cst::{parse_compilation_unit, Codegen};
//! use springmig_recipes::replace_request_parameter_properties;
//!
//! let source = "\
//! import org.springframework.web.bind.annotation.RequestParam;
//! import javax.ws.rs.DefaultValue;
//!
//! class C {
//!     String m(@DefaultValue(\"7\") @RequestParam(value = \"q\") String q) {
//!         return q;
//!     }
//! }
//! ";
//! let unit = parse_compilation_unit(source).expect("parse error");
//! let unit = replace_request_parameter_properties().run(unit);
//! assert_eq!(
//!     unit.to_source(),
//!     "\
//! import org.springframework.web.bind.annotation.RequestParam;
//!
//! class C {
//!     String m(@RequestParam(defaultValue = \"7\", value = \"q\") String q) {
//!         return q;
//!     }
//! }
//! ",
//! );
//! ```

/// Attribute access on annotation argument lists.
pub mod attrs;
pub use attrs::{attribute_value, set_attribute, VALUE_ATTRIBUTE_NAME};

/// Error types.
pub mod error;
pub use error::{RecipeConfigError, RecipeLoadError};

/// The copy-attribute recipe.
pub mod copy_attribute;
pub use copy_attribute::CopyAnnotationAttribute;

/// The conditional-remove recipe.
pub mod remove_if_accompanied;
pub use remove_if_accompanied::RemoveAnnotationIfAccompanied;

/// Recipe composition.
pub mod pipeline;
pub use pipeline::{replace_request_parameter_properties, Recipe, RecipePipeline};

/// Declarative recipe definitions.
pub mod declarative;
pub use declarative::{
    CatalogLoader, DeclarativeRecipe, DeclaredRecipe, RecipeLoader,
    COPY_ANNOTATION_ATTRIBUTE_ID, REMOVE_ANNOTATION_IF_ACCOMPANIED_ID,
};
