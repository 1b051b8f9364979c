// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Read and write annotation attributes by name.
//!
//! Java annotation arguments come in two shapes: a named assignment
//! (`timeout = 500`) and a bare literal, which is shorthand for the `value`
//! attribute (`@RequestParam("q")` means `@RequestParam(value = "q")`).
//! [`attribute_value`] and [`set_attribute`] paper over that asymmetry so
//! recipes can address attributes uniformly.
//!
//! [`set_attribute`] is edit-minimal: when the attribute already holds a
//! semantically equal value the annotation comes back untouched, argument
//! ids and trivia included, so callers can detect "no change" with a plain
//! equality comparison.

use springmig_java_cst::{
    Annotation, AnnotationArg, AnnotationArguments, Assignment, Literal, NodeId,
};

/// The attribute a bare literal argument is shorthand for.
pub const VALUE_ATTRIBUTE_NAME: &str = "value";

/// Look up the literal assigned to the named attribute.
///
/// A bare literal argument matches only when `attribute_name` is `value`.
/// Returns `None` when the annotation has no argument list or no matching
/// argument.
pub fn attribute_value<'a>(annotation: &'a Annotation, attribute_name: &str) -> Option<&'a Literal> {
    let arguments = annotation.arguments.as_ref()?;
    arguments.args.iter().find_map(|arg| match arg {
        AnnotationArg::Assignment(a) if a.name == attribute_name => Some(&a.value),
        AnnotationArg::Literal(l) if attribute_name == VALUE_ATTRIBUTE_NAME => Some(l),
        _ => None,
    })
}

/// Set the named attribute to the given literal value, adding the argument
/// if it is not present yet.
///
/// - An annotation without arguments gains `(name = <value>)`, or the bare
///   shorthand `(<value>)` when the attribute is `value`.
/// - A single bare literal is rewritten in place when the attribute is
///   `value`; for any other attribute it is first expanded to an explicit
///   `value = <literal>` so the new named argument can sit alongside it.
/// - An existing assignment with a different value has its literal replaced;
///   one with an equal value is left alone.
/// - A missing attribute is prepended as the first argument, and following
///   arguments that had no leading space get one.
///
/// The returned annotation keeps the input's id and trivia; when no edit was
/// needed it compares equal to the input.
pub fn set_attribute(annotation: Annotation, attribute_name: &str, value: &Literal) -> Annotation {
    let Annotation {
        id,
        prefix,
        name,
        resolved_type,
        arguments,
    } = annotation;

    let (mut args, rparen_prefix) = match arguments {
        None => (Vec::new(), String::new()),
        Some(a) => (a.args, a.rparen_prefix),
    };

    let rebuild = |args: Vec<AnnotationArg>, rparen_prefix: String| Annotation {
        id,
        prefix: prefix.clone(),
        name: name.clone(),
        resolved_type: resolved_type.clone(),
        arguments: Some(AnnotationArguments {
            args,
            rparen_prefix,
        }),
    };

    // No arguments yet: synthesize the whole argument list.
    if args.is_empty() {
        let copied = Literal::synthesized(value.value.clone(), value.value_source.clone(), "");
        let arg = if attribute_name == VALUE_ATTRIBUTE_NAME {
            AnnotationArg::Literal(copied)
        } else {
            AnnotationArg::Assignment(Assignment::synthesized(attribute_name, copied, ""))
        };
        return rebuild(vec![arg], rparen_prefix);
    }

    // A lone bare literal is the implicit `value` attribute.
    if args.len() == 1 {
        if let AnnotationArg::Literal(lit) = &args[0] {
            if attribute_name == VALUE_ATTRIBUTE_NAME {
                if lit.same_value(value) {
                    return rebuild(args, rparen_prefix);
                }
                let mut lit = lit.clone();
                lit.value = value.value.clone();
                lit.value_source = value.value_source.clone();
                args[0] = AnnotationArg::Literal(lit);
                return rebuild(args, rparen_prefix);
            }
            // Another attribute is being added next to the shorthand, so the
            // shorthand has to become explicit first.
            let lit = lit.clone();
            let expanded = Assignment {
                id: NodeId::fresh(),
                prefix: lit.prefix.clone(),
                name: VALUE_ATTRIBUTE_NAME.to_string(),
                eq_prefix: " ".to_string(),
                value: lit.with_prefix(" "),
            };
            args[0] = AnnotationArg::Assignment(expanded);
        }
    }

    // Named scan: replace the literal of an existing assignment.
    let mut found = false;
    for arg in args.iter_mut() {
        if let AnnotationArg::Assignment(a) = arg {
            if a.name == attribute_name {
                found = true;
                if !a.value.same_value(value) {
                    a.value.value = value.value.clone();
                    a.value.value_source = value.value_source.clone();
                }
            }
        }
    }
    if found {
        return rebuild(args, rparen_prefix);
    }

    // Not present: prepend the new argument. The old head argument sat
    // directly against the `(`; now that it follows a comma, it (and any
    // other argument with empty leading trivia) needs a space.
    let copied = Literal::synthesized(value.value.clone(), value.value_source.clone(), "");
    let mut rebuilt = vec![AnnotationArg::Assignment(Assignment::synthesized(
        attribute_name,
        copied,
        "",
    ))];
    for arg in args {
        let arg = if arg.prefix().is_empty() {
            arg.with_prefix(" ")
        } else {
            arg
        };
        rebuilt.push(arg);
    }
    rebuild(rebuilt, rparen_prefix)
}
