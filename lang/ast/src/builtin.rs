//! Go's predeclared basic types and their machine representations.

use std::fmt;

use serde_derive::Serialize;

/// Name of the pseudo-package holding the predeclared identifiers.
///
/// Declarations that appear before the first `package` header of a stub belong to it.
/// Unqualified names that are not found in the current package are looked up here.
pub const BUILTIN_PACKAGE: &str = "builtin";

/// The representation a basic type has on the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MachineRepr {
    Bool,
    String,
    /// A fixed-width integer
    Int { bits: u8, signed: bool },
    /// `int` and `uint`, whose width is that of a machine word
    Word { signed: bool },
    /// An unsigned integer large enough to hold a pointer
    Uintptr,
    Float { bits: u8 },
    Complex { bits: u8 },
}

impl fmt::Display for MachineRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineRepr::Bool => write!(f, "boolean"),
            MachineRepr::String => write!(f, "string"),
            MachineRepr::Int { bits, signed: true } => write!(f, "{bits}-bit signed integer"),
            MachineRepr::Int { bits, signed: false } => write!(f, "{bits}-bit unsigned integer"),
            MachineRepr::Word { signed: true } => write!(f, "signed machine word"),
            MachineRepr::Word { signed: false } => write!(f, "unsigned machine word"),
            MachineRepr::Uintptr => write!(f, "pointer-sized unsigned integer"),
            MachineRepr::Float { bits } => write!(f, "{bits}-bit float"),
            MachineRepr::Complex { bits } => write!(f, "{bits}-bit complex"),
        }
    }
}

/// The representation of a predeclared basic type, or `None` if `name` is not one.
///
/// `byte` and `rune` are predeclared aliases and share the representation of
/// `uint8` and `int32` respectively.
pub fn predeclared_repr(name: &str) -> Option<MachineRepr> {
    let repr = match name {
        "bool" => MachineRepr::Bool,
        "string" => MachineRepr::String,
        "int8" => MachineRepr::Int { bits: 8, signed: true },
        "int16" => MachineRepr::Int { bits: 16, signed: true },
        "int32" | "rune" => MachineRepr::Int { bits: 32, signed: true },
        "int64" => MachineRepr::Int { bits: 64, signed: true },
        "uint8" | "byte" => MachineRepr::Int { bits: 8, signed: false },
        "uint16" => MachineRepr::Int { bits: 16, signed: false },
        "uint32" => MachineRepr::Int { bits: 32, signed: false },
        "uint64" => MachineRepr::Int { bits: 64, signed: false },
        "int" => MachineRepr::Word { signed: true },
        "uint" => MachineRepr::Word { signed: false },
        "uintptr" => MachineRepr::Uintptr,
        "float32" => MachineRepr::Float { bits: 32 },
        "float64" => MachineRepr::Float { bits: 64 },
        "complex64" => MachineRepr::Complex { bits: 64 },
        "complex128" => MachineRepr::Complex { bits: 128 },
        _ => return None,
    };
    Some(repr)
}

/// Whether `name` is a predeclared type, including the ones without a machine representation.
pub fn is_predeclared(name: &str) -> bool {
    matches!(name, "error" | "any" | "comparable") || predeclared_repr(name).is_some()
}
