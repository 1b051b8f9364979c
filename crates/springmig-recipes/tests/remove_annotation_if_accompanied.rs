// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Integration tests for the conditional-remove recipe: dropping an
//! annotation only where a companion annotation sits on the same
//! declaration, with whitespace and import repair.

use difference::assert_diff;
use itertools::Itertools;
use springmig_java_cst::{parse_compilation_unit, Codegen};
use springmig_recipes::RemoveAnnotationIfAccompanied;

/// Helper to visualize whitespace differences in test output
fn visualize(s: &str) -> String {
    s.replace(' ', "▩").lines().join("↩\n")
}

fn default_value_when_request_param() -> RemoveAnnotationIfAccompanied {
    RemoveAnnotationIfAccompanied::new(
        "javax.ws.rs.DefaultValue",
        "org.springframework.web.bind.annotation.RequestParam",
    )
    .unwrap()
}

fn assert_rewrite(recipe: &RemoveAnnotationIfAccompanied, input: &str, expected: &str) {
    let unit = parse_compilation_unit(input).unwrap();
    let generated = recipe.run(unit).to_source();
    if generated != expected {
        let got = visualize(&generated);
        let expected = visualize(expected);
        assert_diff!(expected.as_ref(), got.as_ref(), "", 0);
    }
}

fn assert_unchanged(recipe: &RemoveAnnotationIfAccompanied, input: &str) {
    assert_rewrite(recipe, input, input);
}

#[test]
fn removes_accompanied_annotation_and_its_import() {
    assert_rewrite(
        &default_value_when_request_param(),
        "import org.springframework.web.bind.annotation.RequestParam;\nimport javax.ws.rs.DefaultValue;\n\nclass C {\n    void m(@DefaultValue(\"7\") @RequestParam(value = \"q\") String s) {\n    }\n}\n",
        "import org.springframework.web.bind.annotation.RequestParam;\n\nclass C {\n    void m(@RequestParam(value = \"q\") String s) {\n    }\n}\n",
    );
}

#[test]
fn removal_works_when_the_annotation_comes_second() {
    assert_rewrite(
        &default_value_when_request_param(),
        "import org.springframework.web.bind.annotation.RequestParam;\nimport javax.ws.rs.DefaultValue;\n\nclass C {\n    void m(@RequestParam(value = \"q\") @DefaultValue(\"7\") String s) {\n    }\n}\n",
        "import org.springframework.web.bind.annotation.RequestParam;\n\nclass C {\n    void m(@RequestParam(value = \"q\") String s) {\n    }\n}\n",
    );
}

#[test]
fn removal_from_the_middle_of_the_annotation_list() {
    assert_rewrite(
        &default_value_when_request_param(),
        "import org.springframework.web.bind.annotation.RequestParam;\nimport javax.ws.rs.DefaultValue;\n\nclass C {\n    void m(@RequestParam(value = \"q\") @DefaultValue(\"7\") @Deprecated String s) {\n    }\n}\n",
        "import org.springframework.web.bind.annotation.RequestParam;\n\nclass C {\n    void m(@RequestParam(value = \"q\") @Deprecated String s) {\n    }\n}\n",
    );
}

#[test]
fn unaccompanied_annotation_is_kept() {
    assert_unchanged(
        &default_value_when_request_param(),
        "import javax.ws.rs.DefaultValue;\n\nclass C {\n    void m(@DefaultValue(\"7\") String s) {\n    }\n}\n",
    );
}

#[test]
fn companion_on_another_parameter_does_not_count() {
    assert_unchanged(
        &default_value_when_request_param(),
        "import org.springframework.web.bind.annotation.RequestParam;\nimport javax.ws.rs.DefaultValue;\n\nclass C {\n    void m(@DefaultValue(\"7\") String a, @RequestParam(value = \"q\") String b) {\n    }\n}\n",
    );
}

#[test]
fn import_is_kept_while_another_use_remains() {
    assert_rewrite(
        &default_value_when_request_param(),
        "import org.springframework.web.bind.annotation.RequestParam;\nimport javax.ws.rs.DefaultValue;\n\nclass C {\n    void m(@DefaultValue(\"7\") @RequestParam(value = \"q\") String a, @DefaultValue(\"8\") String b) {\n    }\n}\n",
        "import org.springframework.web.bind.annotation.RequestParam;\nimport javax.ws.rs.DefaultValue;\n\nclass C {\n    void m(@RequestParam(value = \"q\") String a, @DefaultValue(\"8\") String b) {\n    }\n}\n",
    );
}

#[test]
fn removes_method_level_annotation() {
    let recipe = RemoveAnnotationIfAccompanied::new(
        "javax.ws.rs.Produces",
        "org.springframework.web.bind.annotation.GetMapping",
    )
    .unwrap();
    assert_rewrite(
        &recipe,
        "import org.springframework.web.bind.annotation.GetMapping;\nimport javax.ws.rs.Produces;\n\nclass C {\n    @Produces(\"application/json\")\n    @GetMapping(\"/things\")\n    public String things() {\n        return \"[]\";\n    }\n}\n",
        "import org.springframework.web.bind.annotation.GetMapping;\n\nclass C {\n    @GetMapping(\"/things\")\n    public String things() {\n        return \"[]\";\n    }\n}\n",
    );
}

#[test]
fn removes_class_level_annotation() {
    let recipe = RemoveAnnotationIfAccompanied::new(
        "javax.ws.rs.Path",
        "org.springframework.stereotype.Controller",
    )
    .unwrap();
    assert_rewrite(
        &recipe,
        "import org.springframework.stereotype.Controller;\nimport javax.ws.rs.Path;\n\n@Path(\"/api\")\n@Controller\npublic class MyController {\n}\n",
        "import org.springframework.stereotype.Controller;\n\n@Controller\npublic class MyController {\n}\n",
    );
}

#[test]
fn sole_annotation_removal_repairs_the_declaration_prefix() {
    // Configured with the companion equal to the removed type, the recipe
    // strips every occurrence, including a declaration's only annotation.
    let recipe =
        RemoveAnnotationIfAccompanied::new("javax.ws.rs.Produces", "javax.ws.rs.Produces").unwrap();
    assert_rewrite(
        &recipe,
        "import javax.ws.rs.Produces;\n\nclass C {\n    @Produces(\"application/json\")\n    public String things() {\n        return \"[]\";\n    }\n}\n",
        "class C {\n    public String things() {\n        return \"[]\";\n    }\n}\n",
    );
}

#[test]
fn unit_without_the_annotation_is_untouched() {
    assert_unchanged(
        &default_value_when_request_param(),
        "import org.springframework.web.bind.annotation.RequestParam;\n\nclass C {\n    void m(@RequestParam(value = \"q\") String s) {\n    }\n}\n",
    );
}

#[test]
fn running_twice_matches_running_once() {
    let recipe = default_value_when_request_param();
    let input = "import org.springframework.web.bind.annotation.RequestParam;\nimport javax.ws.rs.DefaultValue;\n\nclass C {\n    void m(@DefaultValue(\"7\") @RequestParam(value = \"q\") String s) {\n    }\n}\n";
    let once = recipe.run(parse_compilation_unit(input).unwrap());
    let twice = recipe.run(once.clone());
    assert_eq!(twice.to_source(), once.to_source());
}
