// Copyright (c) the springmig contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A hand-written recursive-descent parser for the Java subset the recipe
//! catalog operates on.
//!
//! The grammar covers: an optional package declaration, imports, class
//! declarations, and class members (methods, constructors, fields) with
//! leading annotations and modifiers. Method bodies, type-parameter clauses,
//! throws clauses, and field initializers are captured as raw spans; the
//! recipes never look inside them. Annotation arguments are restricted to
//! literals and `name = literal` assignments, which is the full shape of the
//! JAX-RS/Spring annotations being migrated.
//!
//! Every consumed byte lands either in a token or in a node's trivia, so
//! `parse` followed by [`Codegen`](crate::Codegen) is byte-exact.
//!
//! Constructs outside the subset (interfaces, enums, nested classes,
//! non-literal annotation arguments) fail with
//! [`ParseError::Unsupported`] rather than parsing lossily.

use thiserror::Error;

use crate::nodes::{
    Annotation, AnnotationArg, AnnotationArguments, Assignment, Block, ClassBody, ClassDecl,
    CompilationUnit, Ident, Import, Literal, LiteralValue, Member, MethodDecl, Modifier,
    ModifierKind, NodeId, PackageDecl, RawSpan, TypeExpr, VarTail, VariableDecl,
};

/// Errors produced while parsing source text into a CST.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected end of input at byte {pos}")]
    UnexpectedEof { pos: usize },

    #[error("expected {expected} at byte {pos}")]
    Expected { expected: &'static str, pos: usize },

    #[error("unsupported construct at byte {pos}: {construct}")]
    Unsupported { construct: String, pos: usize },

    #[error("invalid literal at byte {pos}")]
    InvalidLiteral { pos: usize },
}

/// Parse a source file into a [`CompilationUnit`].
///
/// Annotation types are resolved against the unit's imports as part of
/// parsing: a simple name maps to the single non-wildcard import ending in
/// `.Name`, a name written fully qualified resolves to itself, and anything
/// else is left unresolved.
pub fn parse_compilation_unit(source: &str) -> Result<CompilationUnit, ParseError> {
    Parser::new(source).compilation_unit()
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    import_paths: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Parser {
            src,
            pos: 0,
            import_paths: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Low-level scanning
    // ------------------------------------------------------------------

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn expect_char(&mut self, expected: char, what: &'static str) -> Result<(), ParseError> {
        match self.peek_char() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(_) => Err(ParseError::Expected {
                expected: what,
                pos: self.pos,
            }),
            None => Err(ParseError::UnexpectedEof { pos: self.pos }),
        }
    }

    /// Consume whitespace and comments, returning the raw trivia slice.
    fn ws(&mut self) -> String {
        let start = self.pos;
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.rest().starts_with("//") => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some('/') if self.rest().starts_with("/*") => {
                    self.pos += 2;
                    match self.rest().find("*/") {
                        Some(idx) => self.pos += idx + 2,
                        None => self.pos = self.src.len(),
                    }
                }
                _ => break,
            }
        }
        self.src[start..self.pos].to_string()
    }

    fn is_ident_start(c: char) -> bool {
        c.is_alphabetic() || c == '_' || c == '$'
    }

    fn is_ident_continue(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '$'
    }

    /// Look at the identifier starting at the current position without
    /// consuming it. Empty when the next char is not an identifier start.
    fn peek_ident(&self) -> &'a str {
        let rest = self.rest();
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, c)) if Self::is_ident_start(c) => {}
            _ => return "",
        }
        for (i, c) in chars {
            if !Self::is_ident_continue(c) {
                return &rest[..i];
            }
        }
        rest
    }

    fn ident(&mut self) -> Result<&'a str, ParseError> {
        let word = self.peek_ident();
        if word.is_empty() {
            return Err(ParseError::Expected {
                expected: "identifier",
                pos: self.pos,
            });
        }
        self.pos += word.len();
        Ok(word)
    }

    /// True when the given keyword is next and not a prefix of a longer
    /// identifier. Does not consume.
    fn peek_word(&self, word: &str) -> bool {
        self.peek_ident() == word
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if self.peek_word(word) {
            self.pos += word.len();
            true
        } else {
            false
        }
    }

    /// `ident(.ident)*`, with an optional trailing `.*`.
    fn qualified_name(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.ident()?;
        while self.peek_char() == Some('.') {
            let dot = self.pos;
            self.pos += 1;
            if self.peek_char() == Some('*') {
                self.pos += 1;
                break;
            }
            if self.peek_ident().is_empty() {
                self.pos = dot;
                break;
            }
            self.ident()?;
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn ident_token(&mut self) -> Result<Ident, ParseError> {
        let prefix = self.ws();
        let name = self.ident()?.to_string();
        Ok(Ident { prefix, name })
    }

    // ------------------------------------------------------------------
    // Compilation unit
    // ------------------------------------------------------------------

    fn compilation_unit(&mut self) -> Result<CompilationUnit, ParseError> {
        let prefix = self.ws();
        let mut package = None;
        let mut imports = Vec::new();
        let mut classes = Vec::new();
        let eof;
        loop {
            let p = self.ws();
            if self.at_end() {
                eof = p;
                break;
            }
            if package.is_none()
                && imports.is_empty()
                && classes.is_empty()
                && self.peek_word("package")
            {
                package = Some(self.package_decl(p)?);
            } else if self.peek_word("import") {
                let import = self.import_decl(p)?;
                self.import_paths.push(import.path.clone());
                imports.push(import);
            } else {
                classes.push(self.class_decl(p)?);
            }
        }
        Ok(CompilationUnit {
            id: NodeId::fresh(),
            prefix,
            package,
            imports,
            classes,
            eof,
        })
    }

    fn package_decl(&mut self, prefix: String) -> Result<PackageDecl, ParseError> {
        self.eat_word("package");
        let path_prefix = self.ws();
        let path = self.qualified_name()?;
        let semi_prefix = self.ws();
        self.expect_char(';', "';'")?;
        Ok(PackageDecl {
            id: NodeId::fresh(),
            prefix,
            path_prefix,
            path,
            semi_prefix,
        })
    }

    fn import_decl(&mut self, prefix: String) -> Result<Import, ParseError> {
        self.eat_word("import");
        let path_prefix = self.ws();
        let path = self.qualified_name()?;
        let semi_prefix = self.ws();
        self.expect_char(';', "';'")?;
        Ok(Import {
            id: NodeId::fresh(),
            prefix,
            path_prefix,
            path,
            semi_prefix,
        })
    }

    // ------------------------------------------------------------------
    // Declaration headers: annotations and modifiers
    // ------------------------------------------------------------------

    fn annotations_and_modifiers(
        &mut self,
    ) -> Result<(Vec<Annotation>, Vec<Modifier>), ParseError> {
        let mut annotations = Vec::new();
        let mut modifiers = Vec::new();
        loop {
            let save = self.pos;
            let p = self.ws();
            match self.peek_char() {
                Some('@') => {
                    if !modifiers.is_empty() {
                        // Annotations interleaved with modifiers would be
                        // reordered by printing; refuse instead.
                        return Err(ParseError::Unsupported {
                            construct: "annotation after modifier".to_string(),
                            pos: self.pos,
                        });
                    }
                    annotations.push(self.annotation(p)?);
                }
                Some(c) if Self::is_ident_start(c) => {
                    let word = self.peek_ident();
                    match ModifierKind::from_keyword(word) {
                        Some(kind) => {
                            self.pos += word.len();
                            modifiers.push(Modifier {
                                id: NodeId::fresh(),
                                prefix: p,
                                kind,
                            });
                        }
                        None => {
                            self.pos = save;
                            break;
                        }
                    }
                }
                _ => {
                    self.pos = save;
                    break;
                }
            }
        }
        Ok((annotations, modifiers))
    }

    fn annotation(&mut self, prefix: String) -> Result<Annotation, ParseError> {
        self.expect_char('@', "'@'")?;
        let at_pos = self.pos;
        let name = self.qualified_name()?;
        if name == "interface" {
            return Err(ParseError::Unsupported {
                construct: "annotation type declaration".to_string(),
                pos: at_pos,
            });
        }
        let resolved_type = self.resolve_annotation_type(&name);
        let arguments = if self.peek_char() == Some('(') {
            self.bump();
            Some(self.annotation_arguments()?)
        } else {
            None
        };
        Ok(Annotation {
            id: NodeId::fresh(),
            prefix,
            name,
            resolved_type,
            arguments,
        })
    }

    fn resolve_annotation_type(&self, name: &str) -> Option<String> {
        if name.contains('.') {
            return Some(name.to_string());
        }
        let suffix = format!(".{name}");
        self.import_paths
            .iter()
            .find(|p| p.ends_with(&suffix) && !p.ends_with(".*"))
            .cloned()
    }

    fn annotation_arguments(&mut self) -> Result<AnnotationArguments, ParseError> {
        let save = self.pos;
        let p = self.ws();
        if self.peek_char() == Some(')') {
            self.bump();
            return Ok(AnnotationArguments {
                args: Vec::new(),
                rparen_prefix: p,
            });
        }
        self.pos = save;
        let mut args = Vec::new();
        loop {
            let arg_prefix = self.ws();
            args.push(self.annotation_arg(arg_prefix)?);
            let p2 = self.ws();
            match self.peek_char() {
                Some(',') if p2.is_empty() => {
                    self.bump();
                }
                Some(',') => {
                    return Err(ParseError::Unsupported {
                        construct: "whitespace before ',' in annotation arguments".to_string(),
                        pos: self.pos,
                    });
                }
                Some(')') => {
                    self.bump();
                    return Ok(AnnotationArguments {
                        args,
                        rparen_prefix: p2,
                    });
                }
                Some(_) => {
                    return Err(ParseError::Expected {
                        expected: "',' or ')'",
                        pos: self.pos,
                    });
                }
                None => return Err(ParseError::UnexpectedEof { pos: self.pos }),
            }
        }
    }

    fn annotation_arg(&mut self, prefix: String) -> Result<AnnotationArg, ParseError> {
        match self.peek_char() {
            Some(c) if Self::is_ident_start(c) => {
                let word = self.peek_ident().to_string();
                if word == "true" || word == "false" || word == "null" {
                    return Ok(AnnotationArg::Literal(self.literal(prefix)?));
                }
                self.pos += word.len();
                let eq_prefix = self.ws();
                self.expect_char('=', "'='")?;
                let value_prefix = self.ws();
                let value = self.literal(value_prefix)?;
                Ok(AnnotationArg::Assignment(Assignment {
                    id: NodeId::fresh(),
                    prefix,
                    name: word,
                    eq_prefix,
                    value,
                }))
            }
            Some(_) => Ok(AnnotationArg::Literal(self.literal(prefix)?)),
            None => Err(ParseError::UnexpectedEof { pos: self.pos }),
        }
    }

    // ------------------------------------------------------------------
    // Literals
    // ------------------------------------------------------------------

    fn literal(&mut self, prefix: String) -> Result<Literal, ParseError> {
        let start = self.pos;
        let value = match self.peek_char() {
            Some('"') => {
                let text = self.string_body()?;
                LiteralValue::Str(text)
            }
            Some('\'') => {
                let c = self.char_body()?;
                LiteralValue::Char(c)
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => self.number_body()?,
            Some(c) if Self::is_ident_start(c) => {
                let word = self.ident()?;
                match word {
                    "true" => LiteralValue::Bool(true),
                    "false" => LiteralValue::Bool(false),
                    "null" => LiteralValue::Null,
                    _ => return Err(ParseError::InvalidLiteral { pos: start }),
                }
            }
            Some(_) => return Err(ParseError::InvalidLiteral { pos: start }),
            None => return Err(ParseError::UnexpectedEof { pos: start }),
        };
        Ok(Literal {
            id: NodeId::fresh(),
            prefix,
            value,
            value_source: self.src[start..self.pos].to_string(),
        })
    }

    /// Consume a double-quoted string literal, returning the unescaped text.
    fn string_body(&mut self) -> Result<String, ParseError> {
        self.expect_char('"', "'\"'")?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => out.push(self.escape()?),
                Some(c) => out.push(c),
                None => return Err(ParseError::UnexpectedEof { pos: self.pos }),
            }
        }
    }

    fn char_body(&mut self) -> Result<char, ParseError> {
        self.expect_char('\'', "'''")?;
        let c = match self.bump() {
            Some('\\') => self.escape()?,
            Some(c) => c,
            None => return Err(ParseError::UnexpectedEof { pos: self.pos }),
        };
        self.expect_char('\'', "closing '''")?;
        Ok(c)
    }

    /// Decode the character after a backslash.
    fn escape(&mut self) -> Result<char, ParseError> {
        match self.bump() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('b') => Ok('\u{8}'),
            Some('f') => Ok('\u{c}'),
            Some('0') => Ok('\0'),
            Some('u') => {
                let hex_start = self.pos;
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = self
                        .bump()
                        .and_then(|c| c.to_digit(16))
                        .ok_or(ParseError::InvalidLiteral { pos: hex_start })?;
                    code = code * 16 + digit;
                }
                char::from_u32(code).ok_or(ParseError::InvalidLiteral { pos: hex_start })
            }
            Some(c) => Ok(c),
            None => Err(ParseError::UnexpectedEof { pos: self.pos }),
        }
    }

    /// Consume a numeric literal. Plain decimal integers become
    /// [`LiteralValue::Int`]; everything else (hex, floats, suffixed longs)
    /// keeps its raw text.
    fn number_body(&mut self) -> Result<LiteralValue, ParseError> {
        let start = self.pos;
        if matches!(self.peek_char(), Some('-') | Some('+')) {
            self.bump();
        }
        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
                self.bump();
            } else {
                break;
            }
        }
        let raw = &self.src[start..self.pos];
        let digits: String = raw.chars().filter(|c| *c != '_').collect();
        match digits.parse::<i64>() {
            Ok(n) => Ok(LiteralValue::Int(n)),
            Err(_) => Ok(LiteralValue::Other(raw.to_string())),
        }
    }

    // ------------------------------------------------------------------
    // Classes and members
    // ------------------------------------------------------------------

    fn class_decl(&mut self, prefix: String) -> Result<ClassDecl, ParseError> {
        let (leading_annotations, modifiers) = self.annotations_and_modifiers()?;
        let kind_prefix = self.ws();
        if !self.eat_word("class") {
            return Err(ParseError::Unsupported {
                construct: format!("top-level '{}' declaration", self.peek_ident()),
                pos: self.pos,
            });
        }
        let name = self.ident_token()?;
        let type_params = self.opt_angle_span()?;
        let lbrace_prefix = self.ws();
        self.expect_char('{', "'{'")?;
        let mut members = Vec::new();
        let rbrace_prefix;
        loop {
            let p = self.ws();
            match self.peek_char() {
                Some('}') => {
                    self.bump();
                    rbrace_prefix = p;
                    break;
                }
                Some(_) => members.push(self.member(p)?),
                None => return Err(ParseError::UnexpectedEof { pos: self.pos }),
            }
        }
        Ok(ClassDecl {
            id: NodeId::fresh(),
            prefix,
            leading_annotations,
            modifiers,
            kind_prefix,
            name,
            type_params,
            body: ClassBody {
                lbrace_prefix,
                members,
                rbrace_prefix,
            },
        })
    }

    fn member(&mut self, prefix: String) -> Result<Member, ParseError> {
        let (leading_annotations, modifiers) = self.annotations_and_modifiers()?;
        let type_params = self.opt_angle_span()?;
        let first_prefix = self.ws();
        let first = self.type_expr(first_prefix)?;

        let save = self.pos;
        let p = self.ws();
        if self.peek_char() == Some('(') {
            // Constructor: what we read as a type is the name.
            self.bump();
            let (params, rparen_prefix) = self.params()?;
            let throws = self.opt_throws()?;
            let body_prefix = self.ws();
            let body = self.block(body_prefix)?;
            return Ok(Member::Method(MethodDecl {
                id: NodeId::fresh(),
                prefix,
                leading_annotations,
                modifiers,
                type_params,
                return_type: None,
                name: Ident {
                    prefix: first.prefix,
                    name: first.source,
                },
                lparen_prefix: p,
                params,
                rparen_prefix,
                throws,
                body,
            }));
        }
        self.pos = save;

        let name = self.ident_token()?;
        let save2 = self.pos;
        let p2 = self.ws();
        match self.peek_char() {
            Some('(') => {
                self.bump();
                let (params, rparen_prefix) = self.params()?;
                let throws = self.opt_throws()?;
                let body_prefix = self.ws();
                let body = self.block(body_prefix)?;
                Ok(Member::Method(MethodDecl {
                    id: NodeId::fresh(),
                    prefix,
                    leading_annotations,
                    modifiers,
                    type_params,
                    return_type: Some(first),
                    name,
                    lparen_prefix: p2,
                    params,
                    rparen_prefix,
                    throws,
                    body,
                }))
            }
            Some('=') => {
                let start = self.pos;
                self.scan_initializer()?;
                let text = self.src[start..self.pos].to_string();
                self.expect_char(';', "';'")?;
                Ok(Member::Field(VariableDecl {
                    id: NodeId::fresh(),
                    prefix,
                    leading_annotations,
                    modifiers,
                    type_expr: first,
                    name,
                    tail: VarTail::Field {
                        initializer: Some(RawSpan { prefix: p2, text }),
                        semi_prefix: String::new(),
                    },
                }))
            }
            Some(';') => {
                self.bump();
                Ok(Member::Field(VariableDecl {
                    id: NodeId::fresh(),
                    prefix,
                    leading_annotations,
                    modifiers,
                    type_expr: first,
                    name,
                    tail: VarTail::Field {
                        initializer: None,
                        semi_prefix: p2,
                    },
                }))
            }
            Some(_) => {
                self.pos = save2;
                Err(ParseError::Unsupported {
                    construct: "class member (expected method or field)".to_string(),
                    pos: self.pos,
                })
            }
            None => Err(ParseError::UnexpectedEof { pos: self.pos }),
        }
    }

    fn params(&mut self) -> Result<(Vec<VariableDecl>, String), ParseError> {
        let save = self.pos;
        let p = self.ws();
        if self.peek_char() == Some(')') {
            self.bump();
            return Ok((Vec::new(), p));
        }
        self.pos = save;
        let mut params = Vec::new();
        loop {
            let param_prefix = self.ws();
            params.push(self.parameter(param_prefix)?);
            let p2 = self.ws();
            match self.peek_char() {
                Some(',') if p2.is_empty() => {
                    self.bump();
                }
                Some(',') => {
                    return Err(ParseError::Unsupported {
                        construct: "whitespace before ',' in parameter list".to_string(),
                        pos: self.pos,
                    });
                }
                Some(')') => {
                    self.bump();
                    return Ok((params, p2));
                }
                Some(_) => {
                    return Err(ParseError::Expected {
                        expected: "',' or ')'",
                        pos: self.pos,
                    });
                }
                None => return Err(ParseError::UnexpectedEof { pos: self.pos }),
            }
        }
    }

    fn parameter(&mut self, prefix: String) -> Result<VariableDecl, ParseError> {
        let (leading_annotations, modifiers) = self.annotations_and_modifiers()?;
        let type_prefix = self.ws();
        let type_expr = self.type_expr(type_prefix)?;
        let name = self.ident_token()?;
        Ok(VariableDecl {
            id: NodeId::fresh(),
            prefix,
            leading_annotations,
            modifiers,
            type_expr,
            name,
            tail: VarTail::Parameter,
        })
    }

    /// A type expression: qualified name, optional generics, optional array
    /// brackets, optional varargs ellipsis. Captured as raw text.
    fn type_expr(&mut self, prefix: String) -> Result<TypeExpr, ParseError> {
        let start = self.pos;
        self.qualified_name()?;
        if self.peek_char() == Some('<') {
            self.balanced_angles()?;
        }
        loop {
            let save = self.pos;
            let _ = self.ws();
            if self.rest().starts_with("[]") {
                self.pos += 2;
            } else {
                self.pos = save;
                break;
            }
        }
        if self.rest().starts_with("...") {
            self.pos += 3;
        }
        Ok(TypeExpr {
            id: NodeId::fresh(),
            prefix,
            source: self.src[start..self.pos].to_string(),
        })
    }

    /// `<...>` with nesting, captured raw together with its leading trivia.
    fn opt_angle_span(&mut self) -> Result<Option<RawSpan>, ParseError> {
        let save = self.pos;
        let p = self.ws();
        if self.peek_char() != Some('<') {
            self.pos = save;
            return Ok(None);
        }
        let start = self.pos;
        self.balanced_angles()?;
        Ok(Some(RawSpan {
            prefix: p,
            text: self.src[start..self.pos].to_string(),
        }))
    }

    fn balanced_angles(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            match self.bump() {
                Some('<') => depth += 1,
                Some('>') => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(_) => {}
                None => return Err(ParseError::UnexpectedEof { pos: self.pos }),
            }
        }
    }

    fn opt_throws(&mut self) -> Result<Option<RawSpan>, ParseError> {
        let save = self.pos;
        let p = self.ws();
        if !self.peek_word("throws") {
            self.pos = save;
            return Ok(None);
        }
        let start = self.pos;
        let brace = match self.rest().find('{') {
            Some(idx) => self.pos + idx,
            None => return Err(ParseError::UnexpectedEof { pos: self.pos }),
        };
        let text = self.src[start..brace].trim_end();
        self.pos = start + text.len();
        Ok(Some(RawSpan {
            prefix: p,
            text: text.to_string(),
        }))
    }

    /// An opaque `{ ... }` block, tracking nesting and skipping strings,
    /// chars, and comments so braces inside them don't count.
    fn block(&mut self, prefix: String) -> Result<Block, ParseError> {
        if self.peek_char() != Some('{') {
            return Err(ParseError::Expected {
                expected: "'{'",
                pos: self.pos,
            });
        }
        let start = self.pos;
        let mut depth = 0usize;
        loop {
            match self.peek_char() {
                Some('{') => {
                    depth += 1;
                    self.bump();
                }
                Some('}') => {
                    depth -= 1;
                    self.bump();
                    if depth == 0 {
                        break;
                    }
                }
                Some('"') => {
                    self.string_body()?;
                }
                Some('\'') => {
                    self.char_body()?;
                }
                Some('/') if self.rest().starts_with("//") || self.rest().starts_with("/*") => {
                    self.ws();
                }
                Some(_) => {
                    self.bump();
                }
                None => return Err(ParseError::UnexpectedEof { pos: self.pos }),
            }
        }
        Ok(Block {
            prefix,
            text: self.src[start..self.pos].to_string(),
        })
    }

    /// Raw field initializer text from `=` up to the terminating `;` at
    /// bracket depth zero.
    fn scan_initializer(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            match self.peek_char() {
                Some(';') if depth == 0 => return Ok(()),
                Some('(') | Some('[') | Some('{') => {
                    depth += 1;
                    self.bump();
                }
                Some(')') | Some(']') | Some('}') => {
                    depth = depth.saturating_sub(1);
                    self.bump();
                }
                Some('"') => {
                    self.string_body()?;
                }
                Some('\'') => {
                    self.char_body()?;
                }
                Some('/') if self.rest().starts_with("//") || self.rest().starts_with("/*") => {
                    self.ws();
                }
                Some(_) => {
                    self.bump();
                }
                None => return Err(ParseError::UnexpectedEof { pos: self.pos }),
            }
        }
    }
}
