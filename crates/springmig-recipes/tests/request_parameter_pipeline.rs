// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! End-to-end tests for the stock request-parameter migration pipeline:
//! copy `@DefaultValue` into `@RequestParam(defaultValue = ...)`, remove
//! `@DefaultValue`, drop its import.

use difference::assert_diff;
use itertools::Itertools;
use serde_json::json;
use springmig_java_cst::{parse_compilation_unit, Codegen, CompilationUnit};
use springmig_recipes::{
    replace_request_parameter_properties, CatalogLoader, DeclarativeRecipe, DeclaredRecipe,
    COPY_ANNOTATION_ATTRIBUTE_ID, REMOVE_ANNOTATION_IF_ACCOMPANIED_ID,
};

/// Helper to visualize whitespace differences in test output
fn visualize(s: &str) -> String {
    s.replace(' ', "▩").lines().join("↩\n")
}

fn assert_source(generated: &str, expected: &str) {
    if generated != expected {
        let got = visualize(generated);
        let expected = visualize(expected);
        assert_diff!(expected.as_ref(), got.as_ref(), "", 0);
    }
}

fn migrate(input: &str) -> CompilationUnit {
    let unit = parse_compilation_unit(input).unwrap();
    replace_request_parameter_properties().run(unit)
}

const SINGLE_PARAMETER: &str = r#"import org.springframework.web.bind.annotation.RequestParam;
import javax.ws.rs.DefaultValue;

class ControllerClass {
    public String methodWithDefaultedParameters(@DefaultValue("default-value") @RequestParam(value = "q") String searchString) {
        return "Hello";
    }
}
"#;

#[test]
fn migrates_a_defaulted_request_parameter() {
    assert_source(
        &migrate(SINGLE_PARAMETER).to_source(),
        r#"import org.springframework.web.bind.annotation.RequestParam;

class ControllerClass {
    public String methodWithDefaultedParameters(@RequestParam(defaultValue = "default-value", value = "q") String searchString) {
        return "Hello";
    }
}
"#,
    );
}

#[test]
fn migrates_a_multiline_parameter_list() {
    let input = r#"import org.springframework.web.bind.annotation.RequestParam;
import org.springframework.web.bind.annotation.RequestHeader;
import javax.ws.rs.DefaultValue;

class ControllerClass {
    public String methodWithDefaultedParameters(
        @DefaultValue("default-value-1") @RequestParam(value = "p1") String parameter1,
        @RequestParam(value = "p2") String parameter2,
        String parameter3,
        @DefaultValue("default-value-4") @RequestHeader(value = "myOwnHeader") String myHeader,
        @DefaultValue(value = "default-value-5") @RequestParam("p5") String parameter5
    ) {
        return "Hello";
    }
}
"#;
    // The header parameter has no @RequestParam companion, so both its
    // @DefaultValue and the import stay.
    let expected = r#"import org.springframework.web.bind.annotation.RequestParam;
import org.springframework.web.bind.annotation.RequestHeader;
import javax.ws.rs.DefaultValue;

class ControllerClass {
    public String methodWithDefaultedParameters(
        @RequestParam(defaultValue = "default-value-1", value = "p1") String parameter1,
        @RequestParam(value = "p2") String parameter2,
        String parameter3,
        @DefaultValue("default-value-4") @RequestHeader(value = "myOwnHeader") String myHeader,
        @RequestParam(defaultValue = "default-value-5", value = "p5") String parameter5
    ) {
        return "Hello";
    }
}
"#;
    assert_source(&migrate(input).to_source(), expected);
}

#[test]
fn unit_without_default_value_is_untouched() {
    let input = "import org.springframework.web.bind.annotation.RequestParam;\n\nclass C {\n    void m(@RequestParam(value = \"q\") String s) {\n    }\n}\n";
    assert_source(&migrate(input).to_source(), input);
}

#[test]
fn migration_is_idempotent() {
    let pipeline = replace_request_parameter_properties();
    let once = migrate(SINGLE_PARAMETER);
    let twice = pipeline.run(once.clone());
    assert_eq!(twice.to_source(), once.to_source());
}

#[test]
fn declarative_definition_matches_the_stock_pipeline() {
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
        DeclaredRecipe::new(
            REMOVE_ANNOTATION_IF_ACCOMPANIED_ID,
            json!({
                "annotationTypeToRemove": "javax.ws.rs.DefaultValue",
                "additionalAnnotationType": "org.springframework.web.bind.annotation.RequestParam",
            }),
        ),
    ];
    let recipe = DeclarativeRecipe::resolve(
        "replace-request-parameter-properties",
        "Replace request parameter properties",
        &declared,
        &CatalogLoader,
    )
    .unwrap();

    let unit = parse_compilation_unit(SINGLE_PARAMETER).unwrap();
    let declarative = recipe.run(unit).to_source();
    let stock = migrate(SINGLE_PARAMETER).to_source();
    assert_eq!(declarative, stock);
}
