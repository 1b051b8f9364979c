// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Import bookkeeping for rewritten compilation units.
//!
//! Visitors never touch the import list directly; they record requests on the
//! [`TraversalContext`](crate::TraversalContext) and the recipe driver calls
//! [`apply_import_ops`] on the finished tree. Removal is best-effort: a type
//! that is still referenced by any annotation in the unit keeps its import.

use tracing::debug;

use crate::nodes::{CompilationUnit, Import, NodeId};
use crate::visitor::TraversalContext;

/// Apply the context's pending import additions and removals to the unit.
pub fn apply_import_ops(unit: CompilationUnit, ctx: &TraversalContext) -> CompilationUnit {
    let mut unit = unit;
    for fqn in ctx.pending_import_removals() {
        unit = maybe_remove_import(unit, fqn);
    }
    for fqn in ctx.pending_import_adds() {
        unit = add_import(unit, fqn);
    }
    unit
}

/// Add an import for the type unless one is already present.
///
/// The new import lands after the last existing import (or before the first
/// class when there are none), on its own line.
pub fn add_import(mut unit: CompilationUnit, fully_qualified: &str) -> CompilationUnit {
    if unit.imports.iter().any(|i| i.path == fully_qualified) {
        return unit;
    }
    debug!(type_name = fully_qualified, "adding import");
    let prefix = if unit.imports.is_empty() && unit.package.is_none() {
        String::new()
    } else {
        "\n".to_string()
    };
    unit.imports.push(Import {
        id: NodeId::fresh(),
        prefix,
        path_prefix: " ".to_string(),
        path: fully_qualified.to_string(),
        semi_prefix: String::new(),
    });
    unit
}

/// Remove the import for the type if no annotation in the unit references it
/// anymore. No-op when the import is absent or the type is still used.
pub fn maybe_remove_import(mut unit: CompilationUnit, fully_qualified: &str) -> CompilationUnit {
    if unit.references_annotation_type(fully_qualified) {
        return unit;
    }
    let Some(index) = unit.imports.iter().position(|i| i.path == fully_qualified) else {
        return unit;
    };
    debug!(type_name = fully_qualified, "removing unused import");
    let removed = unit.imports.remove(index);
    // The head import owns the gap to whatever came before it; hand its
    // prefix to the new head so that gap survives.
    if index == 0 {
        if let Some(next) = unit.imports.first_mut() {
            next.prefix = removed.prefix;
        } else if unit.package.is_none() {
            // The last import is gone; without a package declaration the
            // first class now leads the file and inherits the gap.
            if let Some(class) = unit.classes.first_mut() {
                class.prefix = removed.prefix;
            }
        }
    }
    unit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Codegen;
    use crate::parser::parse_compilation_unit;

    const TWO_IMPORTS: &str = "import org.springframework.web.bind.annotation.RequestParam;\nimport javax.ws.rs.DefaultValue;\n\nclass C {\n    void m(@RequestParam(value = \"q\") String s) {\n    }\n}\n";

    #[test]
    fn unused_import_is_removed() {
        let unit = parse_compilation_unit(TWO_IMPORTS).unwrap();
        let unit = maybe_remove_import(unit, "javax.ws.rs.DefaultValue");
        assert_eq!(
            unit.to_source(),
            "import org.springframework.web.bind.annotation.RequestParam;\n\nclass C {\n    void m(@RequestParam(value = \"q\") String s) {\n    }\n}\n"
        );
    }

    #[test]
    fn referenced_import_is_kept() {
        let unit = parse_compilation_unit(TWO_IMPORTS).unwrap();
        let unit = maybe_remove_import(unit, "org.springframework.web.bind.annotation.RequestParam");
        assert_eq!(unit.to_source(), TWO_IMPORTS);
    }

    #[test]
    fn removing_the_head_import_keeps_the_following_gap() {
        let source = "import javax.ws.rs.DefaultValue;\nimport org.springframework.web.bind.annotation.RequestParam;\n\nclass C {\n    void m(@RequestParam(value = \"q\") String s) {\n    }\n}\n";
        let unit = parse_compilation_unit(source).unwrap();
        let unit = maybe_remove_import(unit, "javax.ws.rs.DefaultValue");
        assert_eq!(
            unit.to_source(),
            "import org.springframework.web.bind.annotation.RequestParam;\n\nclass C {\n    void m(@RequestParam(value = \"q\") String s) {\n    }\n}\n"
        );
    }

    #[test]
    fn removing_the_only_import_moves_the_gap_off_the_class() {
        let source = "import javax.ws.rs.DefaultValue;\n\nclass C {\n    void m(String s) {\n    }\n}\n";
        let unit = parse_compilation_unit(source).unwrap();
        let unit = maybe_remove_import(unit, "javax.ws.rs.DefaultValue");
        assert_eq!(unit.to_source(), "class C {\n    void m(String s) {\n    }\n}\n");
    }

    #[test]
    fn add_import_appends_on_its_own_line() {
        let unit = parse_compilation_unit(TWO_IMPORTS).unwrap();
        let unit = add_import(unit, "org.springframework.web.bind.annotation.RequestHeader");
        assert!(unit
            .to_source()
            .contains("import javax.ws.rs.DefaultValue;\nimport org.springframework.web.bind.annotation.RequestHeader;"));
    }

    #[test]
    fn add_import_is_idempotent() {
        let unit = parse_compilation_unit(TWO_IMPORTS).unwrap();
        let before = unit.to_source();
        let unit = add_import(unit, "javax.ws.rs.DefaultValue");
        assert_eq!(unit.to_source(), before);
    }
}
