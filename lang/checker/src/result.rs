use std::fmt;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use stubcat_ast::{DeclKind, MachineRepr, QualName, TypeName};

/// All violations found in one catalogue, ordered by rule and then by declaration order.
#[derive(Error, Diagnostic, Debug, Clone)]
#[error("The catalogue is inconsistent: {} violation(s) found", .0.len())]
pub struct Violations(#[related] pub Vec<Violation>);

/// A breach of one of the catalogue's consistency rules.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("{name} is declared more than once in package {package}")]
    #[diagnostic(code("C-001"))]
    DuplicateName {
        package: String,
        name: String,
        #[label("redeclared here")]
        span: Option<SourceSpan>,
        #[label("first declared here")]
        first: Option<SourceSpan>,
    },
    #[error("Method {receiver}.{method} is declared more than once in package {package}")]
    #[diagnostic(code("C-001"))]
    DuplicateMethod {
        package: String,
        receiver: String,
        method: String,
        #[label("redeclared here")]
        span: Option<SourceSpan>,
        #[label("first declared here")]
        first: Option<SourceSpan>,
    },
    #[error("Interface {interface} embeds {embed}, which is not declared")]
    #[diagnostic(code("C-002"))]
    UnresolvedEmbed {
        interface: QualName,
        embed: TypeName,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Interface {interface} embeds {embed}, which is a {kind} and not an interface")]
    #[diagnostic(code("C-002"))]
    EmbedNotInterface {
        interface: QualName,
        embed: TypeName,
        kind: DeclKind,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Interface {interface} embeds itself: {path}")]
    #[diagnostic(code("C-002"))]
    EmbedCycle {
        interface: QualName,
        /// The cycle, e.g. `io.A -> io.B -> io.A`
        path: String,
        #[label("cycle closed here")]
        span: Option<SourceSpan>,
    },
    #[error(
        "Interface {interface} has conflicting signatures for method {method}:\n  1: {first}\n  2: {second}"
    )]
    #[diagnostic(code("C-003"))]
    ConflictingMethod {
        interface: QualName,
        method: String,
        first: String,
        second: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Method {method} has receiver type {receiver}, which is not declared in package {package}")]
    #[diagnostic(code("C-004"))]
    UndefinedReceiver {
        package: String,
        receiver: String,
        method: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Method {method} in package {package} cannot be declared on {receiver} from another package")]
    #[diagnostic(code("C-004"))]
    ForeignReceiver {
        package: String,
        receiver: TypeName,
        method: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Method {method} in package {package} is declared on interface {receiver}")]
    #[diagnostic(code("C-004"), help("Interface methods belong in the interface body"))]
    InterfaceReceiver {
        package: String,
        receiver: String,
        method: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Only the last parameter of {name} can be variadic")]
    #[diagnostic(code("C-005"))]
    MisplacedVariadic {
        name: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("{name} is declared as itself, but it is not a predeclared type")]
    #[diagnostic(code("C-006"))]
    UnknownBuiltin {
        name: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Builtin {name} is declared as {found}, but the predeclared {name} is {expected}")]
    #[diagnostic(code("C-006"))]
    MismatchedBuiltin {
        name: String,
        expected: MachineRepr,
        found: MachineRepr,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Builtin {name} is declared both as {first} and as {second}")]
    #[diagnostic(code("C-006"))]
    ConflictingBuiltin {
        name: String,
        first: MachineRepr,
        second: MachineRepr,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Builtin {name} is defined as {target}, which does not resolve to a basic type")]
    #[diagnostic(code("C-006"))]
    UnresolvedBuiltin {
        name: String,
        target: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("{package}.{name} is declared as itself, which is only allowed in the builtin package")]
    #[diagnostic(code("C-006"))]
    BridgeOutsideBuiltins {
        package: String,
        name: String,
        #[label]
        span: Option<SourceSpan>,
    },
}

impl Violation {
    /// The consistency rule that this violation breaks.
    pub fn rule(&self) -> Rule {
        match self {
            Violation::DuplicateName { .. } | Violation::DuplicateMethod { .. } => Rule::Uniqueness,
            Violation::UnresolvedEmbed { .. }
            | Violation::EmbedNotInterface { .. }
            | Violation::EmbedCycle { .. } => Rule::EmbedResolution,
            Violation::ConflictingMethod { .. } => Rule::MethodSetConsistency,
            Violation::UndefinedReceiver { .. }
            | Violation::ForeignReceiver { .. }
            | Violation::InterfaceReceiver { .. } => Rule::ReceiverResolution,
            Violation::MisplacedVariadic { .. } => Rule::VariadicPlacement,
            Violation::UnknownBuiltin { .. }
            | Violation::MismatchedBuiltin { .. }
            | Violation::ConflictingBuiltin { .. }
            | Violation::UnresolvedBuiltin { .. }
            | Violation::BridgeOutsideBuiltins { .. } => Rule::BuiltinCompleteness,
        }
    }
}

/// The consistency rules, in the order in which they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    Uniqueness,
    EmbedResolution,
    MethodSetConsistency,
    ReceiverResolution,
    VariadicPlacement,
    BuiltinCompleteness,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rule::Uniqueness => "name uniqueness",
            Rule::EmbedResolution => "embed resolution",
            Rule::MethodSetConsistency => "method set consistency",
            Rule::ReceiverResolution => "receiver resolution",
            Rule::VariadicPlacement => "variadic placement",
            Rule::BuiltinCompleteness => "builtin completeness",
        };
        f.write_str(s)
    }
}
