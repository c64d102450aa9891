use stubcat_miette_util::codespan::Span;

use crate::cst::decls::DocComment;
use crate::cst::ident::{Ident, QIdent};
use crate::cst::types::*;
use crate::lexer::Token;
use crate::result::{ParseError, ParseErrorKind};

use super::Parser;

/// One comma-separated entry of a parameter list before grouping is resolved.
enum ParamEntry {
    /// `T` or `...T`, or a name waiting for the type of a later entry (`s` in `s, sep string`).
    Bare { span: Span, variadic: bool, typ: TypeExpr },
    /// `name T` or `name ...T`
    Named { span: Span, name: Ident, variadic: bool, typ: TypeExpr },
}

fn starts_type(tok: Option<&Token>) -> bool {
    matches!(
        tok,
        Some(
            Token::Ident(_)
                | Token::Star
                | Token::LBracket
                | Token::Map
                | Token::Chan
                | Token::Arrow
                | Token::Func
                | Token::Interface
                | Token::Struct
        )
    )
}

impl Parser {
    pub fn signature(&mut self) -> Result<Signature, ParseError> {
        let start = self.span_here();
        let params = self.parameter_list()?;
        let results = self.results()?;
        Ok(Signature { span: start.merge(self.prev_span()), params, results })
    }

    fn results(&mut self) -> Result<Vec<Param>, ParseError> {
        match self.peek() {
            Some(Token::LParen) => {
                let results = self.parameter_list()?;
                match results.iter().find(|result| result.variadic) {
                    Some(result) => Err(self.error(ParseErrorKind::VariadicResult, result.span)),
                    None => Ok(results),
                }
            }
            Some(Token::Ellipsis) => Err(self.error(ParseErrorKind::VariadicResult, self.span_here())),
            tok if starts_type(tok) => {
                let typ = self.type_expr()?;
                Ok(vec![Param { span: typ.span(), name: None, variadic: false, typ }])
            }
            _ => Ok(Vec::new()),
        }
    }

    /// `(a ...interface{})`, `(s, substr string)`, `(ResponseWriter, *Request)`
    fn parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        self.expect(Token::LParen, "`(`")?;
        let mut entries = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(&Token::RParen) {
                break;
            }
            entries.push(self.param_entry()?);
            self.skip_newlines();
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect(Token::RParen, "`,` or `)`")?;
            break;
        }
        self.group_params(entries)
    }

    fn param_entry(&mut self) -> Result<ParamEntry, ParseError> {
        let start = self.span_here();
        if self.eat(&Token::Ellipsis) {
            let typ = self.type_expr()?;
            return Ok(ParamEntry::Bare { span: start.merge(typ.span()), variadic: true, typ });
        }
        let first = self.type_expr()?;
        let name = first.as_bare_name().cloned();
        match name {
            Some(name) if self.at(&Token::Ellipsis) || starts_type(self.peek()) => {
                let variadic = self.eat(&Token::Ellipsis);
                let typ = self.type_expr()?;
                Ok(ParamEntry::Named { span: start.merge(typ.span()), name, variadic, typ })
            }
            _ => Ok(ParamEntry::Bare { span: first.span(), variadic: false, typ: first }),
        }
    }

    /// Resolve Go's parameter grouping: either every entry is an unnamed type, or every
    /// entry is named and bare names take the type of the next named entry.
    fn group_params(&self, entries: Vec<ParamEntry>) -> Result<Vec<Param>, ParseError> {
        if !entries.iter().any(|entry| matches!(entry, ParamEntry::Named { .. })) {
            return Ok(entries
                .into_iter()
                .map(|entry| match entry {
                    ParamEntry::Bare { span, variadic, typ } => Param { span, name: None, variadic, typ },
                    ParamEntry::Named { span, name, variadic, typ } => {
                        Param { span, name: Some(name), variadic, typ }
                    }
                })
                .collect());
        }

        let mut params = Vec::new();
        let mut pending: Vec<Ident> = Vec::new();
        for entry in entries {
            match entry {
                ParamEntry::Bare { variadic: false, typ, span } => match typ.as_bare_name() {
                    Some(name) => pending.push(name.clone()),
                    None => return Err(self.error(ParseErrorKind::MixedParameters, span)),
                },
                ParamEntry::Bare { span, .. } => {
                    return Err(self.error(ParseErrorKind::MixedParameters, span));
                }
                ParamEntry::Named { span, name, variadic, typ } => {
                    for name in pending.drain(..) {
                        params.push(Param {
                            span: name.span.merge(span),
                            name: Some(name),
                            variadic,
                            typ: typ.clone(),
                        });
                    }
                    params.push(Param { span, name: Some(name), variadic, typ });
                }
            }
        }
        match pending.first() {
            Some(dangling) => Err(self.error(ParseErrorKind::MixedParameters, dangling.span)),
            None => Ok(params),
        }
    }

    pub fn type_expr(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.span_here();
        match self.peek() {
            Some(Token::Ident(_)) => Ok(TypeExpr::Name(self.qualified_ident("a type")?)),
            Some(Token::Star) => {
                self.pos += 1;
                let elem = self.type_expr()?;
                Ok(TypeExpr::Pointer { span: start.merge(elem.span()), elem: Box::new(elem) })
            }
            Some(Token::LBracket) => {
                self.pos += 1;
                if self.eat(&Token::RBracket) {
                    let elem = self.type_expr()?;
                    return Ok(TypeExpr::Slice { span: start.merge(elem.span()), elem: Box::new(elem) });
                }
                let len = match self.peek() {
                    Some(Token::IntLit(len) | Token::Ident(len)) => len.clone(),
                    Some(Token::Ellipsis) => "...".to_owned(),
                    _ => return Err(self.unexpected("an array length")),
                };
                self.pos += 1;
                self.expect(Token::RBracket, "`]`")?;
                let elem = self.type_expr()?;
                Ok(TypeExpr::Array { span: start.merge(elem.span()), len, elem: Box::new(elem) })
            }
            Some(Token::Map) => {
                self.pos += 1;
                self.expect(Token::LBracket, "`[`")?;
                let key = self.type_expr()?;
                self.expect(Token::RBracket, "`]`")?;
                let value = self.type_expr()?;
                Ok(TypeExpr::Map {
                    span: start.merge(value.span()),
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            Some(Token::Chan) => {
                self.pos += 1;
                let dir = if self.eat(&Token::Arrow) { ChanDir::Send } else { ChanDir::Both };
                let elem = self.type_expr()?;
                Ok(TypeExpr::Chan { span: start.merge(elem.span()), dir, elem: Box::new(elem) })
            }
            Some(Token::Arrow) => {
                self.pos += 1;
                self.expect(Token::Chan, "`chan`")?;
                let elem = self.type_expr()?;
                Ok(TypeExpr::Chan {
                    span: start.merge(elem.span()),
                    dir: ChanDir::Recv,
                    elem: Box::new(elem),
                })
            }
            Some(Token::Func) => {
                self.pos += 1;
                let sig = self.signature()?;
                Ok(TypeExpr::Func { span: start.merge(sig.span), sig })
            }
            Some(Token::Interface) => {
                self.pos += 1;
                let elems = self.interface_body()?;
                Ok(TypeExpr::Interface { span: start.merge(self.prev_span()), elems })
            }
            Some(Token::Struct) => {
                self.pos += 1;
                let fields = self.struct_body()?;
                Ok(TypeExpr::Struct { span: start.merge(self.prev_span()), fields })
            }
            Some(Token::LParen) => {
                self.pos += 1;
                self.skip_newlines();
                let inner = self.type_expr()?;
                self.skip_newlines();
                self.expect(Token::RParen, "`)`")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("a type")),
        }
    }

    fn interface_body(&mut self) -> Result<Vec<InterfaceElem>, ParseError> {
        self.expect(Token::LBrace, "`{`")?;
        let mut elems = Vec::new();
        loop {
            let doc = self.leading_docs();
            if self.eat(&Token::RBrace) {
                break;
            }
            match (self.peek(), self.peek_nth(1)) {
                (Some(Token::Ident(_)), Some(Token::LParen)) => {
                    elems.push(InterfaceElem::Method(self.method_spec(doc)?))
                }
                (Some(Token::Ident(_)), _) => {
                    let name = self.qualified_ident("an embedded interface")?;
                    elems.push(InterfaceElem::Embed { doc, name })
                }
                (Some(Token::Tilde), _) => {
                    return Err(self.error(ParseErrorKind::Unsupported("type constraints"), self.span_here()));
                }
                _ => return Err(self.unexpected("a method or an embedded interface")),
            }
            if self.at(&Token::Pipe) {
                return Err(self.error(ParseErrorKind::Unsupported("type constraints"), self.span_here()));
            }
            self.expect_terminator(Some(&Token::RBrace), "end of interface element")?;
        }
        Ok(elems)
    }

    fn method_spec(&mut self, doc: Option<DocComment>) -> Result<MethodSpec, ParseError> {
        let name = self.expect_ident("a method name")?;
        let sig = self.signature()?;
        Ok(MethodSpec { span: name.span.merge(sig.span), doc, name, sig })
    }

    fn struct_body(&mut self) -> Result<Vec<FieldDecl>, ParseError> {
        self.expect(Token::LBrace, "`{`")?;
        let mut fields = Vec::new();
        loop {
            let doc = self.leading_docs();
            if self.eat(&Token::RBrace) {
                break;
            }
            fields.push(self.field_decl(doc)?);
            self.expect_terminator(Some(&Token::RBrace), "end of struct field")?;
        }
        Ok(fields)
    }

    /// `Method string`, `Status, Proto string`, `io.Reader`, `*Buffer`, each with an optional tag.
    fn field_decl(&mut self, doc: Option<DocComment>) -> Result<FieldDecl, ParseError> {
        let start = self.span_here();
        let embedded = match (self.peek(), self.peek_nth(1)) {
            (Some(Token::Star), _) => true,
            (Some(Token::Ident(_)), next) => matches!(
                next,
                None | Some(
                    Token::Dot
                        | Token::Newline
                        | Token::Semicolon
                        | Token::RBrace
                        | Token::StringLit(_)
                        | Token::Comment(_)
                )
            ),
            _ => return Err(self.unexpected("a struct field")),
        };

        let (names, typ) = if embedded {
            let pointer = self.eat(&Token::Star);
            let name: QIdent = self.qualified_ident("an embedded type")?;
            let typ = if pointer {
                TypeExpr::Pointer { span: start.merge(name.span), elem: Box::new(TypeExpr::Name(name)) }
            } else {
                TypeExpr::Name(name)
            };
            (Vec::new(), typ)
        } else {
            let mut names = vec![self.expect_ident("a field name")?];
            while self.eat(&Token::Comma) {
                names.push(self.expect_ident("a field name")?);
            }
            (names, self.type_expr()?)
        };

        let tag = match self.peek() {
            Some(Token::StringLit(lit)) => {
                let lit = lit.clone();
                self.pos += 1;
                Some(lit)
            }
            _ => None,
        };
        Ok(FieldDecl { span: start.merge(self.prev_span()), doc, names, typ, tag })
    }
}

#[cfg(test)]
mod tests {
    use crate::cst::types::*;
    use crate::parse_type_expr;

    #[test]
    fn qualified_pointer() {
        let typ = parse_type_expr("*io.Reader").unwrap();
        let TypeExpr::Pointer { elem, .. } = typ else { panic!("expected a pointer") };
        let TypeExpr::Name(name) = *elem else { panic!("expected a name") };
        assert_eq!(name.to_string(), "io.Reader");
    }

    #[test]
    fn channels() {
        assert!(matches!(
            parse_type_expr("<-chan struct{}").unwrap(),
            TypeExpr::Chan { dir: ChanDir::Recv, .. }
        ));
        assert!(matches!(
            parse_type_expr("chan<- int").unwrap(),
            TypeExpr::Chan { dir: ChanDir::Send, .. }
        ));
        assert!(matches!(parse_type_expr("chan int").unwrap(), TypeExpr::Chan { dir: ChanDir::Both, .. }));
    }

    #[test]
    fn maps_slices_arrays() {
        let TypeExpr::Map { key, value, .. } = parse_type_expr("map[string][]byte").unwrap() else {
            panic!("expected a map")
        };
        assert!(matches!(*key, TypeExpr::Name(_)));
        assert!(matches!(*value, TypeExpr::Slice { .. }));
        assert!(matches!(
            parse_type_expr("[32]byte").unwrap(),
            TypeExpr::Array { ref len, .. } if len == "32"
        ));
    }

    #[test]
    fn func_type() {
        let TypeExpr::Func { sig, .. } = parse_type_expr("func(key, value interface{}) bool").unwrap()
        else {
            panic!("expected a function type")
        };
        assert_eq!(sig.params.len(), 2);
        assert_eq!(sig.results.len(), 1);
    }

    #[test]
    fn empty_interface() {
        assert!(matches!(
            parse_type_expr("interface{}").unwrap(),
            TypeExpr::Interface { ref elems, .. } if elems.is_empty()
        ));
    }

    #[test]
    fn single_line_embeds() {
        let TypeExpr::Interface { elems, .. } =
            parse_type_expr("interface { Reader; Writer; Closer }").unwrap()
        else {
            panic!("expected an interface")
        };
        let names: Vec<String> = elems
            .iter()
            .map(|elem| match elem {
                InterfaceElem::Embed { name, .. } => name.to_string(),
                InterfaceElem::Method(method) => method.name.id.clone(),
            })
            .collect();
        assert_eq!(names, vec!["Reader", "Writer", "Closer"]);
    }

    #[test]
    fn struct_fields() {
        let src = "struct {\n    Method string\n    URL *URL\n    Body io.ReadCloser `json:\"body\"`\n    io.Writer\n    *Buffer\n    A, B int\n}";
        let TypeExpr::Struct { fields, .. } = parse_type_expr(src).unwrap() else {
            panic!("expected a struct")
        };
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0].names[0].id, "Method");
        assert_eq!(fields[2].tag.as_deref(), Some("`json:\"body\"`"));
        assert!(fields[3].names.is_empty());
        assert!(fields[4].names.is_empty());
        assert!(matches!(fields[4].typ, TypeExpr::Pointer { .. }));
        assert_eq!(fields[5].names.len(), 2);
    }

    #[test]
    fn multi_line_params() {
        let TypeExpr::Func { sig, .. } = parse_type_expr("func(\n    a int,\n    b string,\n)").unwrap() else {
            panic!("expected a function type")
        };
        assert_eq!(sig.params.len(), 2);
    }
}
