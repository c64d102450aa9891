use crate::cst::decls::*;
use crate::lexer::Token;
use crate::result::{ParseError, ParseErrorKind};

use super::Parser;

impl Parser {
    pub fn stub_items(&mut self) -> Result<Vec<Item>, ParseError> {
        let mut items = Vec::new();
        loop {
            let doc = self.leading_docs();
            match self.peek() {
                None => break,
                Some(Token::Package) => items.push(Item::Package(self.package_clause(doc)?)),
                Some(Token::Type) => items.extend(self.type_decl(doc)?.into_iter().map(Item::Type)),
                Some(Token::Func) => items.push(Item::Func(self.func_decl(doc)?)),
                Some(_) => return Err(self.unexpected("a `package`, `type` or `func` declaration")),
            }
            self.expect_terminator(None, "end of declaration")?;
            self.decl = None;
        }
        Ok(items)
    }

    fn package_clause(&mut self, doc: Option<DocComment>) -> Result<PackageClause, ParseError> {
        let start = self.expect(Token::Package, "`package`")?;
        let name = self.expect_ident("a package name")?;
        self.decl = Some(format!("package {name}"));
        Ok(PackageClause { span: start.merge(name.span), doc, name })
    }

    /// `type Name T` or a parenthesized group `type ( ... )`.
    fn type_decl(&mut self, doc: Option<DocComment>) -> Result<Vec<TypeSpec>, ParseError> {
        self.expect(Token::Type, "`type`")?;
        if !self.eat(&Token::LParen) {
            return Ok(vec![self.type_spec(doc)?]);
        }
        let mut specs = Vec::new();
        loop {
            let doc = self.leading_docs();
            if self.eat(&Token::RParen) {
                break;
            }
            specs.push(self.type_spec(doc)?);
            self.expect_terminator(Some(&Token::RParen), "end of type declaration")?;
        }
        Ok(specs)
    }

    fn type_spec(&mut self, doc: Option<DocComment>) -> Result<TypeSpec, ParseError> {
        let name = self.expect_ident("a type name")?;
        self.decl = Some(name.id.clone());
        // `type List[T any] ...`, as opposed to the array type in `type Buf [4]byte`
        if self.at(&Token::LBracket)
            && matches!(self.peek_nth(1), Some(Token::Ident(_)))
            && !matches!(self.peek_nth(2), Some(Token::RBracket))
        {
            return Err(self.error(ParseErrorKind::Unsupported("type parameters"), self.span_here()));
        }
        let alias = self.eat(&Token::Eq);
        let typ = self.type_expr()?;
        Ok(TypeSpec { span: name.span.merge(typ.span()), doc, name, alias, typ })
    }

    /// `func Name(...) ...` or `func (recv) Name(...) ...`, optionally followed by an empty body.
    fn func_decl(&mut self, doc: Option<DocComment>) -> Result<FuncDecl, ParseError> {
        let start = self.expect(Token::Func, "`func`")?;
        let receiver = if self.at(&Token::LParen) { Some(self.receiver()?) } else { None };
        let name = self.expect_ident("a function name")?;
        self.decl = Some(match &receiver {
            Some(receiver) => format!("{}.{name}", receiver.typ),
            None => name.id.clone(),
        });
        if self.at(&Token::LBracket) {
            return Err(self.error(ParseErrorKind::Unsupported("type parameters"), self.span_here()));
        }
        let sig = self.signature()?;
        let mut span = start.merge(sig.span);
        if self.eat(&Token::LBrace) {
            self.skip_newlines();
            if !self.at(&Token::RBrace) {
                return Err(self.error(ParseErrorKind::NonEmptyBody, self.span_here()));
            }
            span = span.merge(self.expect(Token::RBrace, "`}`")?);
        }
        Ok(FuncDecl { span, doc, receiver, name, sig })
    }

    /// `(c *Client)`, `(t Time)`, `(*Client)` or `(Client)`
    fn receiver(&mut self) -> Result<Receiver, ParseError> {
        let start = self.expect(Token::LParen, "`(`")?;
        self.skip_newlines();
        let name = match (self.peek(), self.peek_nth(1)) {
            (Some(Token::Ident(_)), Some(Token::Star | Token::Ident(_))) => {
                Some(self.expect_ident("a receiver name")?)
            }
            _ => None,
        };
        let pointer = self.eat(&Token::Star);
        let typ = self.qualified_ident("a receiver type")?;
        self.skip_newlines();
        let end = self.expect(Token::RParen, "`)`")?;
        Ok(Receiver { span: start.merge(end), name, pointer, typ })
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::cst::decls::*;
    use crate::cst::types::*;
    use crate::parse_stub;
    use crate::result::ParseErrorKind;

    fn items(src: &str) -> Vec<Item> {
        parse_stub(Url::parse("inmemory:///test.go").unwrap(), src).unwrap().items
    }

    fn error_kind(src: &str) -> ParseErrorKind {
        parse_stub(Url::parse("inmemory:///test.go").unwrap(), src).unwrap_err().kind
    }

    #[test]
    fn empty_stub() {
        assert!(items("").is_empty());
        assert!(items("\n\n// only a comment\n").is_empty());
    }

    #[test]
    fn builtin_bridge() {
        let items = items("type string string\n");
        let [Item::Type(spec)] = items.as_slice() else { panic!("expected one type") };
        assert_eq!(spec.name.id, "string");
        assert_eq!(spec.typ.as_bare_name().map(|id| id.id.as_str()), Some("string"));
        assert!(!spec.alias);
    }

    #[test]
    fn package_headers() {
        let items = items("package fmt\nfunc Println(a ...interface{}) (n int, err error)\n");
        assert!(matches!(&items[0], Item::Package(p) if p.name.id == "fmt"));
        let Item::Func(func) = &items[1] else { panic!("expected a function") };
        assert_eq!(func.sig.params.len(), 1);
        assert!(func.sig.params[0].variadic);
        assert_eq!(func.sig.results.len(), 2);
    }

    #[test]
    fn grouped_params() {
        let items = items("func Replace(s, old, new string, n int) string");
        let Item::Func(func) = &items[0] else { panic!("expected a function") };
        let names: Vec<_> =
            func.sig.params.iter().map(|p| p.name.as_ref().unwrap().id.clone()).collect();
        assert_eq!(names, vec!["s", "old", "new", "n"]);
        assert_eq!(func.sig.params[2].typ.as_bare_name().unwrap().id, "string");
        assert_eq!(func.sig.results.len(), 1);
        assert!(func.sig.results[0].name.is_none());
    }

    #[test]
    fn unnamed_params() {
        let items = items("type Handler interface {\n    ServeHTTP(ResponseWriter, *Request)\n}");
        let Item::Type(spec) = &items[0] else { panic!("expected a type") };
        let TypeExpr::Interface { elems, .. } = &spec.typ else { panic!("expected an interface") };
        let InterfaceElem::Method(method) = &elems[0] else { panic!("expected a method") };
        assert_eq!(method.sig.params.len(), 2);
        assert!(method.sig.params.iter().all(|p| p.name.is_none()));
        assert!(matches!(method.sig.params[1].typ, TypeExpr::Pointer { .. }));
    }

    #[test]
    fn methods_with_receivers() {
        let items = items("func (c *Client) Get(url string) (*Response, error)\nfunc (t Time) Sub(u Time) Duration");
        let Item::Func(get) = &items[0] else { panic!("expected a method") };
        let receiver = get.receiver.as_ref().unwrap();
        assert!(receiver.pointer);
        assert_eq!(receiver.name.as_ref().unwrap().id, "c");
        assert_eq!(receiver.typ.id.id, "Client");
        let Item::Func(sub) = &items[1] else { panic!("expected a method") };
        assert!(!sub.receiver.as_ref().unwrap().pointer);
    }

    #[test]
    fn doc_comments() {
        let items = items("// Error interface\ntype error interface {\n    Error() string\n}\n\n// unrelated\n\nfunc F()");
        let Item::Type(spec) = &items[0] else { panic!("expected a type") };
        assert_eq!(spec.doc, Some(DocComment { docs: vec!["Error interface".to_owned()] }));
        let Item::Func(func) = &items[1] else { panic!("expected a function") };
        assert!(func.doc.is_none());
    }

    #[test]
    fn trailing_comment_is_not_doc() {
        let items = items("func F() // trailing\nfunc G()");
        let Item::Func(g) = &items[1] else { panic!("expected a function") };
        assert!(g.doc.is_none());
    }

    #[test]
    fn block_comments() {
        assert_eq!(items("/* one line */ func F()").len(), 1);
        assert_eq!(items("/* a\n b */ func F()").len(), 1);
        let items = items("/** doc */ func F(a int /* inline */, b string)\n");
        let Item::Func(func) = &items[0] else { panic!("expected a function") };
        assert_eq!(func.sig.params.len(), 2);
        assert!(func.doc.is_none());
    }

    #[test]
    fn type_groups() {
        let items = items("type (\n    A int\n    B = string\n)");
        assert_eq!(items.len(), 2);
        let Item::Type(b) = &items[1] else { panic!("expected a type") };
        assert!(b.alias);
    }

    #[test]
    fn empty_body_is_accepted() {
        let items = items("func Sleep(d Duration) {\n}");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn non_empty_body_is_rejected() {
        assert_eq!(error_kind("func Sleep(d Duration) { return }"), ParseErrorKind::NonEmptyBody);
    }

    #[test]
    fn invalid_token() {
        assert_eq!(error_kind("type x @"), ParseErrorKind::InvalidToken);
    }

    #[test]
    fn mixed_params_are_rejected() {
        assert_eq!(error_kind("func F(a int, string)"), ParseErrorKind::MixedParameters);
    }

    #[test]
    fn variadic_results_are_rejected() {
        assert_eq!(error_kind("func F() ...int"), ParseErrorKind::VariadicResult);
        assert_eq!(error_kind("func F() (a ...int)"), ParseErrorKind::VariadicResult);
    }

    #[test]
    fn generics_are_rejected() {
        assert_eq!(
            error_kind("type List[T any] struct{}"),
            ParseErrorKind::Unsupported("type parameters")
        );
    }

    #[test]
    fn error_location() {
        let err = parse_stub(
            Url::parse("inmemory:///test.go").unwrap(),
            "package io\n\ntype Reader interface {\n    Read(p []byte) (n int, err error))\n}\n",
        )
        .unwrap_err();
        assert_eq!(err.line(), 4);
        assert_eq!(err.decl.as_deref(), Some("Reader"));
    }

    #[test]
    fn two_declarations_on_one_line() {
        assert!(matches!(
            error_kind("type A int type B int"),
            ParseErrorKind::UnexpectedToken { expected: "end of declaration", .. }
        ));
        assert_eq!(items("type A int; type B int").len(), 2);
    }
}
