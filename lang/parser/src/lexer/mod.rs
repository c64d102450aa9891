use std::fmt;

use logos::{Logos, SpannedIter};

#[derive(Default, Debug, Clone, PartialEq)]
pub enum LexicalError {
    #[default]
    InvalidToken,
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Logos, Clone, Debug, PartialEq)]
#[logos(skip r"[ \t\f]+", skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/", error = LexicalError)]
//                  ^^^^^^^^          ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
//                    (1)                          (2)
// Horizontal whitespace is skipped (1), newlines are tokens because they terminate declarations.
// Block comments are skipped entirely (2), only line comments can become doc comments.
pub enum Token {
    // Keywords
    //
    //
    #[token("package")]
    Package,
    #[token("type")]
    Type,
    #[token("func")]
    Func,
    #[token("interface")]
    Interface,
    #[token("struct")]
    Struct,
    #[token("map")]
    Map,
    #[token("chan")]
    Chan,

    // Parens, Braces and Brackets
    //
    //
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // Symbols
    //
    //
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("*")]
    Star,
    #[token("<-")]
    Arrow,
    #[token("=")]
    Eq,
    #[token("~")]
    Tilde,
    #[token("|")]
    Pipe,
    #[regex(r"\r?\n")]
    Newline,

    // Identifiers
    //
    // Go identifiers: a letter or underscore followed by letters, digits and underscores.
    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // Literals
    //
    // Integer literals only occur as array lengths, string literals only as struct tags.
    // String literals keep their delimiters so that tags are printed back verbatim.
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    IntLit(String),
    #[regex(r#""([^"\\\n\r]|\\.)*""#, |lex| lex.slice().to_string())]
    #[regex(r"`[^`]*`", |lex| lex.slice().to_string())]
    StringLit(String),

    // Comments
    //
    // The text after "//" with surrounding whitespace removed.
    #[regex(r"//[^\n\r]*", |lex| lex.slice()[2..].trim().to_string())]
    Comment(String),
}

impl Token {
    /// A short description of the token for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Package => "`package`".to_owned(),
            Token::Type => "`type`".to_owned(),
            Token::Func => "`func`".to_owned(),
            Token::Interface => "`interface`".to_owned(),
            Token::Struct => "`struct`".to_owned(),
            Token::Map => "`map`".to_owned(),
            Token::Chan => "`chan`".to_owned(),
            Token::LParen => "`(`".to_owned(),
            Token::RParen => "`)`".to_owned(),
            Token::LBrace => "`{`".to_owned(),
            Token::RBrace => "`}`".to_owned(),
            Token::LBracket => "`[`".to_owned(),
            Token::RBracket => "`]`".to_owned(),
            Token::Comma => "`,`".to_owned(),
            Token::Semicolon => "`;`".to_owned(),
            Token::Dot => "`.`".to_owned(),
            Token::Ellipsis => "`...`".to_owned(),
            Token::Star => "`*`".to_owned(),
            Token::Arrow => "`<-`".to_owned(),
            Token::Eq => "`=`".to_owned(),
            Token::Tilde => "`~`".to_owned(),
            Token::Pipe => "`|`".to_owned(),
            Token::Newline => "newline".to_owned(),
            Token::Ident(id) => format!("identifier `{id}`"),
            Token::IntLit(lit) => format!("integer `{lit}`"),
            Token::StringLit(lit) => format!("string {lit}"),
            Token::Comment(_) => "comment".to_owned(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A token with its byte range, or the byte range of input that could not be lexed.
pub type Spanned<Tok, Loc, Error> = Result<(Loc, Tok, Loc), (Loc, Error, Loc)>;

pub struct Lexer<'input> {
    // instead of an iterator over characters, we have a token iterator
    token_stream: SpannedIter<'input, Token>,
}

impl<'input> Lexer<'input> {
    pub fn new(input: &'input str) -> Self {
        // the Token::lexer() method is provided by the Logos trait
        Self { token_stream: Token::lexer(input).spanned() }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Spanned<Token, usize, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.token_stream.next().map(|(token, span)| match token {
            Ok(token) => Ok((span.start, token, span.end)),
            Err(err) => Err((span.start, err, span.end)),
        })
    }
}

#[cfg(test)]
mod lexer_tests {
    use super::{Lexer, Token};

    fn tokens(s: &str) -> Vec<Token> {
        Lexer::new(s).map(|tok| tok.unwrap().1).collect()
    }

    #[test]
    fn keywords_and_idents() {
        assert_eq!(
            tokens("type byte uint8"),
            vec![Token::Type, Token::Ident("byte".to_owned()), Token::Ident("uint8".to_owned())]
        );
    }

    #[test]
    fn keyword_prefix_is_ident() {
        assert_eq!(tokens("packages"), vec![Token::Ident("packages".to_owned())]);
        assert_eq!(tokens("Map"), vec![Token::Ident("Map".to_owned())]);
    }

    #[test]
    fn ellipsis_and_dot() {
        assert_eq!(
            tokens("a ...io.Reader"),
            vec![
                Token::Ident("a".to_owned()),
                Token::Ellipsis,
                Token::Ident("io".to_owned()),
                Token::Dot,
                Token::Ident("Reader".to_owned()),
            ]
        );
    }

    #[test]
    fn receive_only_channel() {
        assert_eq!(
            tokens("<-chan struct{}"),
            vec![Token::Arrow, Token::Chan, Token::Struct, Token::LBrace, Token::RBrace]
        );
    }

    #[test]
    fn newlines_are_tokens() {
        assert_eq!(
            tokens("Read()\r\nWrite()"),
            vec![
                Token::Ident("Read".to_owned()),
                Token::LParen,
                Token::RParen,
                Token::Newline,
                Token::Ident("Write".to_owned()),
                Token::LParen,
                Token::RParen,
            ]
        );
    }

    #[test]
    fn line_comment() {
        assert_eq!(
            tokens("// io package\npackage io"),
            vec![
                Token::Comment("io package".to_owned()),
                Token::Newline,
                Token::Package,
                Token::Ident("io".to_owned()),
            ]
        );
    }

    #[test]
    fn block_comment_is_skipped() {
        assert_eq!(tokens("/* skipped\n * entirely */ func"), vec![Token::Func]);
        assert_eq!(tokens("/** doc **/ func /**/"), vec![Token::Func]);
        assert_eq!(tokens("/* a * b / c */ type"), vec![Token::Type]);
    }

    #[test]
    fn struct_tags() {
        assert_eq!(
            tokens(r#"`json:"name"` "plain""#),
            vec![
                Token::StringLit(r#"`json:"name"`"#.to_owned()),
                Token::StringLit(r#""plain""#.to_owned()),
            ]
        );
    }

    #[test]
    fn invalid_token_has_span() {
        let mut lexer = Lexer::new("type x @");
        lexer.next();
        lexer.next();
        let err = lexer.next().unwrap().unwrap_err();
        assert_eq!((err.0, err.2), (7, 8));
    }
}
