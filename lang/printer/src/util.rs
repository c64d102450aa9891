use pretty::DocAllocator;

use crate::tokens::COMMA;

use super::types::*;

/// Print `items` separated by `, `.
pub fn print_comma_separated<'a, T: Print>(
    items: &'a [T],
    cfg: &PrintCfg,
    alloc: &'a Alloc<'a>,
) -> Builder<'a> {
    let sep = alloc.text(COMMA).append(alloc.space());
    alloc.intersperse(items.iter().map(|item| item.print(cfg, alloc)), sep)
}

/// Print the body of an interface or struct: one element per line, indented,
/// or `{}` when there are no elements.
pub fn print_block<'a>(
    elems: Vec<Builder<'a>>,
    cfg: &PrintCfg,
    alloc: &'a Alloc<'a>,
) -> Builder<'a> {
    if elems.is_empty() {
        return alloc.text("{}");
    }
    alloc
        .text("{")
        .append(alloc.hardline().append(alloc.intersperse(elems, alloc.hardline())).nest(cfg.indent))
        .append(alloc.hardline())
        .append(alloc.text("}"))
}
