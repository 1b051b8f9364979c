// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Code generation: turning a CST back into source text.
//!
//! Printing is a pure concatenation of stored trivia and token text, so any
//! subtree the recipes did not touch prints byte-identically to its input.

use crate::nodes::{
    Annotation, AnnotationArg, Assignment, Block, ClassBody, ClassDecl, CompilationUnit, Ident,
    Import, Literal, Member, MethodDecl, Modifier, PackageDecl, RawSpan, TypeExpr, VarTail,
    VariableDecl,
};

/// Accumulates output text during code generation.
#[derive(Debug, Default)]
pub struct CodegenState {
    out: String,
}

impl CodegenState {
    pub fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }
}

impl std::fmt::Display for CodegenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.out)
    }
}

/// Nodes that can print themselves.
pub trait Codegen {
    fn codegen(&self, state: &mut CodegenState);

    /// Convenience: print this node to a fresh string.
    fn to_source(&self) -> String {
        let mut state = CodegenState::default();
        self.codegen(&mut state);
        state.to_string()
    }
}

impl Codegen for Literal {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        state.push(&self.value_source);
    }
}

impl Codegen for Assignment {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        state.push(&self.name);
        state.push(&self.eq_prefix);
        state.push("=");
        self.value.codegen(state);
    }
}

impl Codegen for AnnotationArg {
    fn codegen(&self, state: &mut CodegenState) {
        match self {
            AnnotationArg::Literal(l) => l.codegen(state),
            AnnotationArg::Assignment(a) => a.codegen(state),
        }
    }
}

impl Codegen for Annotation {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        state.push("@");
        state.push(&self.name);
        if let Some(arguments) = &self.arguments {
            state.push("(");
            for (i, arg) in arguments.args.iter().enumerate() {
                if i > 0 {
                    state.push(",");
                }
                arg.codegen(state);
            }
            state.push(&arguments.rparen_prefix);
            state.push(")");
        }
    }
}

impl Codegen for Modifier {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        state.push(self.kind.as_str());
    }
}

impl Codegen for Ident {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        state.push(&self.name);
    }
}

impl Codegen for RawSpan {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        state.push(&self.text);
    }
}

impl Codegen for TypeExpr {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        state.push(&self.source);
    }
}

impl Codegen for Block {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        state.push(&self.text);
    }
}

impl Codegen for VariableDecl {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        for annotation in &self.leading_annotations {
            annotation.codegen(state);
        }
        for modifier in &self.modifiers {
            modifier.codegen(state);
        }
        self.type_expr.codegen(state);
        self.name.codegen(state);
        if let VarTail::Field {
            initializer,
            semi_prefix,
        } = &self.tail
        {
            if let Some(init) = initializer {
                init.codegen(state);
            }
            state.push(semi_prefix);
            state.push(";");
        }
    }
}

impl Codegen for MethodDecl {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        for annotation in &self.leading_annotations {
            annotation.codegen(state);
        }
        for modifier in &self.modifiers {
            modifier.codegen(state);
        }
        if let Some(type_params) = &self.type_params {
            type_params.codegen(state);
        }
        if let Some(return_type) = &self.return_type {
            return_type.codegen(state);
        }
        self.name.codegen(state);
        state.push(&self.lparen_prefix);
        state.push("(");
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                state.push(",");
            }
            param.codegen(state);
        }
        state.push(&self.rparen_prefix);
        state.push(")");
        if let Some(throws) = &self.throws {
            throws.codegen(state);
        }
        self.body.codegen(state);
    }
}

impl Codegen for Member {
    fn codegen(&self, state: &mut CodegenState) {
        match self {
            Member::Method(m) => m.codegen(state),
            Member::Field(f) => f.codegen(state),
        }
    }
}

impl Codegen for ClassBody {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.lbrace_prefix);
        state.push("{");
        for member in &self.members {
            member.codegen(state);
        }
        state.push(&self.rbrace_prefix);
        state.push("}");
    }
}

impl Codegen for ClassDecl {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        for annotation in &self.leading_annotations {
            annotation.codegen(state);
        }
        for modifier in &self.modifiers {
            modifier.codegen(state);
        }
        state.push(&self.kind_prefix);
        state.push("class");
        self.name.codegen(state);
        if let Some(type_params) = &self.type_params {
            type_params.codegen(state);
        }
        self.body.codegen(state);
    }
}

impl Codegen for PackageDecl {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        state.push("package");
        state.push(&self.path_prefix);
        state.push(&self.path);
        state.push(&self.semi_prefix);
        state.push(";");
    }
}

impl Codegen for Import {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        state.push("import");
        state.push(&self.path_prefix);
        state.push(&self.path);
        state.push(&self.semi_prefix);
        state.push(";");
    }
}

impl Codegen for CompilationUnit {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(&self.prefix);
        if let Some(package) = &self.package {
            package.codegen(state);
        }
        for import in &self.imports {
            import.codegen(state);
        }
        for class in &self.classes {
            class.codegen(state);
        }
        state.push(&self.eof);
    }
}
