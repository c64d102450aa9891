//! Symbols and keywords of the stub declaration syntax.
//! These constants are used when we prettyprint a catalogue back to stub text.

// Symbols
//
//

/// The symbol `,`
pub const COMMA: &str = ",";

/// The symbol `.`
pub const DOT: &str = ".";

/// The symbol `*`
pub const STAR: &str = "*";

/// The symbol `...`
pub const ELLIPSIS: &str = "...";

/// The symbol `<-`
pub const ARROW_LEFT: &str = "<-";

/// The symbol `=`
pub const EQ: &str = "=";

/// The symbol `[]`
pub const BRACKETS: &str = "[]";

/// The prefix of a line comment
pub const LINE_COMMENT: &str = "//";

// Keywords
//
//

/// The keyword `package`
pub const PACKAGE: &str = "package";

/// The keyword `type`
pub const TYPE: &str = "type";

/// The keyword `func`
pub const FUNC: &str = "func";

/// The keyword `interface`
pub const INTERFACE: &str = "interface";

/// The keyword `struct`
pub const STRUCT: &str = "struct";

/// The keyword `map`
pub const MAP: &str = "map";

/// The keyword `chan`
pub const CHAN: &str = "chan";
