// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Integration tests for the copy-attribute recipe: carrying a JAX-RS
//! `@DefaultValue` into `@RequestParam(defaultValue = ...)` while leaving
//! the source annotation in place.

use difference::assert_diff;
use itertools::Itertools;
use springmig_java_cst::{parse_compilation_unit, Codegen};
use springmig_recipes::CopyAnnotationAttribute;

/// Helper to visualize whitespace differences in test output
fn visualize(s: &str) -> String {
    s.replace(' ', "▩").lines().join("↩\n")
}

fn default_value_to_request_param() -> CopyAnnotationAttribute {
    CopyAnnotationAttribute::new(
        "javax.ws.rs.DefaultValue",
        "value",
        "org.springframework.web.bind.annotation.RequestParam",
        "defaultValue",
    )
    .unwrap()
}

fn assert_rewrite(recipe: &CopyAnnotationAttribute, input: &str, expected: &str) {
    let unit = parse_compilation_unit(input).unwrap();
    let generated = recipe.run(unit).to_source();
    if generated != expected {
        let got = visualize(&generated);
        let expected = visualize(expected);
        assert_diff!(expected.as_ref(), got.as_ref(), "", 0);
    }
}

fn assert_unchanged(recipe: &CopyAnnotationAttribute, input: &str) {
    assert_rewrite(recipe, input, input);
}

const IMPORTS: &str = "import org.springframework.web.bind.annotation.RequestParam;\nimport javax.ws.rs.DefaultValue;\n";

fn controller(parameters: &str) -> String {
    format!(
        "{IMPORTS}\nclass ControllerClass {{\n    public String methodWithDefaultedParameters({parameters}) {{\n        return \"Hello\";\n    }}\n}}\n"
    )
}

#[test]
fn copies_default_value_into_request_param() {
    assert_rewrite(
        &default_value_to_request_param(),
        &controller("@DefaultValue(\"default-value\") @RequestParam(value = \"q\") String searchString"),
        &controller("@DefaultValue(\"default-value\") @RequestParam(defaultValue = \"default-value\", value = \"q\") String searchString"),
    );
}

#[test]
fn annotation_order_does_not_matter() {
    assert_rewrite(
        &default_value_to_request_param(),
        &controller("@RequestParam(value = \"q\") @DefaultValue(\"default-value\") String searchString"),
        &controller("@RequestParam(defaultValue = \"default-value\", value = \"q\") @DefaultValue(\"default-value\") String searchString"),
    );
}

#[test]
fn expands_bare_literal_target_argument() {
    assert_rewrite(
        &default_value_to_request_param(),
        &controller("@DefaultValue(\"default-value\") @RequestParam(\"q\") String searchString"),
        &controller("@DefaultValue(\"default-value\") @RequestParam(defaultValue = \"default-value\", value = \"q\") String searchString"),
    );
}

#[test]
fn adds_argument_list_to_target_without_one() {
    assert_rewrite(
        &default_value_to_request_param(),
        &controller("@DefaultValue(\"default-value\") @RequestParam String searchString"),
        &controller("@DefaultValue(\"default-value\") @RequestParam(defaultValue = \"default-value\") String searchString"),
    );
}

#[test]
fn copying_into_the_value_attribute_uses_shorthand() {
    let recipe = CopyAnnotationAttribute::new(
        "javax.ws.rs.DefaultValue",
        "value",
        "org.springframework.web.bind.annotation.RequestParam",
        "value",
    )
    .unwrap();
    assert_rewrite(
        &recipe,
        &controller("@DefaultValue(\"default-value\") @RequestParam String searchString"),
        &controller("@DefaultValue(\"default-value\") @RequestParam(\"default-value\") String searchString"),
    );
}

#[test]
fn replaces_a_differing_existing_value() {
    assert_rewrite(
        &default_value_to_request_param(),
        &controller("@DefaultValue(\"new\") @RequestParam(defaultValue = \"old\", value = \"q\") String searchString"),
        &controller("@DefaultValue(\"new\") @RequestParam(defaultValue = \"new\", value = \"q\") String searchString"),
    );
}

#[test]
fn source_annotation_also_written_as_named_assignment() {
    assert_rewrite(
        &default_value_to_request_param(),
        &controller("@DefaultValue(value = \"default-value\") @RequestParam(value = \"q\") String searchString"),
        &controller("@DefaultValue(value = \"default-value\") @RequestParam(defaultValue = \"default-value\", value = \"q\") String searchString"),
    );
}

#[test]
fn equal_existing_value_is_left_byte_identical() {
    assert_unchanged(
        &default_value_to_request_param(),
        &controller("@DefaultValue(\"q\") @RequestParam(defaultValue = \"q\") String searchString"),
    );
}

#[test]
fn parameter_without_target_annotation_is_untouched() {
    assert_unchanged(
        &default_value_to_request_param(),
        &controller("@DefaultValue(\"default-value\") String searchString"),
    );
}

#[test]
fn parameter_without_source_annotation_is_untouched() {
    assert_unchanged(
        &default_value_to_request_param(),
        &controller("@RequestParam(value = \"q\") String searchString"),
    );
}

#[test]
fn annotations_on_separate_parameters_do_not_interact() {
    assert_unchanged(
        &default_value_to_request_param(),
        &controller("@DefaultValue(\"default-value\") String a, @RequestParam(value = \"q\") String b"),
    );
}

#[test]
fn empty_source_value_is_not_copied() {
    assert_unchanged(
        &default_value_to_request_param(),
        &controller("@DefaultValue(\"\") @RequestParam(value = \"q\") String searchString"),
    );
}

#[test]
fn unit_without_source_type_is_untouched() {
    assert_unchanged(
        &default_value_to_request_param(),
        "import org.springframework.web.bind.annotation.RequestParam;\n\nclass C {\n    void m(@RequestParam(value = \"q\") String s) {\n    }\n}\n",
    );
}

#[test]
fn running_twice_matches_running_once() {
    let recipe = default_value_to_request_param();
    let input = controller(
        "@DefaultValue(\"default-value\") @RequestParam(value = \"q\") String searchString",
    );
    let once = recipe.run(parse_compilation_unit(&input).unwrap());
    let twice = recipe.run(once.clone());
    assert_eq!(twice.to_source(), once.to_source());
}
