use pretty::DocAllocator;
use pretty::termcolor::{Color, ColorSpec};

use super::types::*;

const KEYWORD: Color = Color::Magenta;
const TYPE: Color = Color::Red;
const FUNC: Color = Color::Blue;
const PACKAGE: Color = Color::Green;
const COMMENT: Color = Color::Cyan;

pub trait ThemeExt<'a> {
    fn keyword(&'a self, text: &'a str) -> Builder<'a>;
    fn typ(&'a self, text: &'a str) -> Builder<'a>;
    fn func(&'a self, text: &'a str) -> Builder<'a>;
    fn package(&'a self, text: &'a str) -> Builder<'a>;
    fn comment(&'a self, text: &'a str) -> Builder<'a>;
}

impl<'a> ThemeExt<'a> for Alloc<'a> {
    fn keyword(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(KEYWORD.spec())
    }

    fn typ(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(TYPE.spec())
    }

    fn func(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(FUNC.spec())
    }

    fn package(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(PACKAGE.spec())
    }

    fn comment(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(COMMENT.spec())
    }
}

pub trait ColorExt {
    fn spec(self) -> ColorSpec;
}

impl ColorExt for Color {
    fn spec(self) -> ColorSpec {
        ColorSpec::new().set_fg(Some(self)).clone()
    }
}
