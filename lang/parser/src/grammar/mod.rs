//! Recursive-descent parser for stub declarations.
//!
//! The whole input is lexed up front; the parser then walks the token vector.
//! Newlines are significant: they terminate declarations, interface elements and struct
//! fields, just like Go's automatic semicolons. Inside parentheses they are skipped explicitly.

mod decls;
mod types;

use stubcat_miette_util::codespan::{LineStarts, RawIndex, Span};

use crate::cst::decls::DocComment;
use crate::cst::ident::{Ident, QIdent};
use crate::lexer::{Lexer, Token};
use crate::result::{ParseError, ParseErrorKind};

pub struct Parser {
    tokens: Vec<(Token, Span)>,
    pos: usize,
    eof: Span,
    lines: LineStarts,
    /// Name of the declaration currently being parsed, attached to errors.
    decl: Option<String>,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let lines = LineStarts::new(source);
        if RawIndex::try_from(source.len()).is_err() {
            return Err(ParseError::new(ParseErrorKind::TooLarge, Span::default(), None, &lines));
        }
        let mut tokens = Vec::new();
        for tok in Lexer::new(source) {
            match tok {
                Ok((l, tok, r)) => tokens.push((tok, Span::from(l..r))),
                Err((l, _, r)) => {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidToken,
                        Span::from(l..r),
                        None,
                        &lines,
                    ));
                }
            }
        }
        log::trace!("Lexed {} tokens", tokens.len());
        let eof = Span::from(source.len()..source.len());
        Ok(Parser { tokens, pos: 0, eof, lines, decl: None })
    }

    // Token cursor
    //
    //

    fn peek(&self) -> Option<&Token> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|(tok, _)| tok)
    }

    fn at(&self, tok: &Token) -> bool {
        self.peek() == Some(tok)
    }

    /// The span of the next token, or an empty span at the end of the input.
    fn span_here(&self) -> Span {
        self.tokens.get(self.pos).map(|(_, span)| *span).unwrap_or(self.eof)
    }

    /// The span of the last consumed token.
    fn prev_span(&self) -> Span {
        match self.pos {
            0 => self.eof,
            n => self.tokens[n - 1].1,
        }
    }

    fn eat(&mut self, tok: &Token) -> bool {
        if self.at(tok) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: Token, expected: &'static str) -> Result<Span, ParseError> {
        if self.at(&tok) {
            let span = self.span_here();
            self.pos += 1;
            Ok(span)
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_ident(&mut self, expected: &'static str) -> Result<Ident, ParseError> {
        match self.peek() {
            Some(Token::Ident(id)) => {
                let ident = Ident { span: self.span_here(), id: id.clone() };
                self.pos += 1;
                Ok(ident)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    /// `Reader` or `io.Reader`
    fn qualified_ident(&mut self, expected: &'static str) -> Result<QIdent, ParseError> {
        let first = self.expect_ident(expected)?;
        if self.at(&Token::Dot) && matches!(self.peek_nth(1), Some(Token::Ident(_))) {
            self.pos += 1;
            let id = self.expect_ident("an identifier")?;
            Ok(QIdent { span: first.span.merge(id.span), qual: Some(first), id })
        } else {
            Ok(QIdent { span: first.span, qual: None, id: first })
        }
    }

    /// Skip newlines and comments where line structure does not matter.
    fn skip_newlines(&mut self) {
        while matches!(self.peek(), Some(Token::Newline | Token::Comment(_))) {
            self.pos += 1;
        }
    }

    /// Skip separators before a declaration or body element and collect the doc comment
    /// lines immediately above it. A blank line or a `;` discards what was collected so far,
    /// as does a comment that does not start its own line.
    fn leading_docs(&mut self) -> Option<DocComment> {
        let mut docs = Vec::new();
        let mut at_line_start = self.pos == 0 || self.prev_is_newline();
        let mut prev_newline = false;
        while let Some(tok) = self.peek() {
            match tok {
                Token::Newline => {
                    if prev_newline {
                        docs.clear();
                    }
                    prev_newline = true;
                    at_line_start = true;
                }
                Token::Comment(text) => {
                    if at_line_start {
                        docs.push(text.clone());
                    }
                    prev_newline = false;
                    at_line_start = false;
                }
                Token::Semicolon => {
                    docs.clear();
                    prev_newline = false;
                    at_line_start = false;
                }
                _ => break,
            }
            self.pos += 1;
        }
        if docs.is_empty() { None } else { Some(DocComment { docs }) }
    }

    fn prev_is_newline(&self) -> bool {
        self.pos > 0 && self.tokens[self.pos - 1].0 == Token::Newline
    }

    /// Succeeds if the next token ends a line-oriented element.
    fn expect_terminator(
        &self,
        closing: Option<&Token>,
        expected: &'static str,
    ) -> Result<(), ParseError> {
        match self.peek() {
            None | Some(Token::Newline | Token::Semicolon | Token::Comment(_)) => Ok(()),
            Some(tok) if Some(tok) == closing => Ok(()),
            _ => Err(self.unexpected(expected)),
        }
    }

    /// Succeeds if only newlines and comments are left.
    pub fn expect_end(&mut self) -> Result<(), ParseError> {
        self.skip_newlines();
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.unexpected("end of input")),
        }
    }

    // Errors
    //
    //

    fn error(&self, kind: ParseErrorKind, span: Span) -> ParseError {
        ParseError::new(kind, span, self.decl.clone(), &self.lines)
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            Some(tok) => self.error(
                ParseErrorKind::UnexpectedToken { found: tok.describe(), expected },
                self.span_here(),
            ),
            None => self.error(ParseErrorKind::UnexpectedEof { expected }, self.eof),
        }
    }
}
