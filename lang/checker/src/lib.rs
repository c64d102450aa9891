//! Consistency checks for stub catalogues.
//!
//! [`validate`] checks six rules, in this order:
//!
//! 1. Names are unique: per package for types and functions, per receiver type for methods.
//! 2. Embedded interfaces resolve to declared interfaces, without cycles.
//! 3. Flattened method sets do not contain one method name with two signature shapes.
//! 4. Method receivers name a type declared in the method's own package.
//! 5. Only the last parameter of a signature is variadic.
//! 6. Builtin aliases resolve to basic types with a consistent representation.
//!
//! Checking does not stop at the first violation; all violations are reported.

mod method_sets;
mod result;
mod rules;
mod scope;

use stubcat_ast::Catalogue;

pub use method_sets::*;
pub use result::*;

/// Check a catalogue against all consistency rules.
///
/// On success, returns the flattened method set of every interface.
pub fn validate(cat: &Catalogue) -> Result<MethodSets, Violations> {
    log::debug!("Checking catalogue: {}", cat.uri);
    let scope = scope::Scope::new(cat);
    let mut violations = Vec::new();

    rules::uniqueness::check(cat, &mut violations);
    let flattened = rules::embeds::flatten_all(cat, &scope);
    violations.extend(flattened.embed_violations);
    violations.extend(flattened.method_violations);
    rules::receivers::check(cat, &scope, &mut violations);
    rules::variadic::check(cat, &mut violations);
    rules::builtins::check(cat, &mut violations);

    if violations.is_empty() {
        Ok(flattened.method_sets)
    } else {
        log::debug!("Found {} violation(s) in {}", violations.len(), cat.uri);
        Err(Violations(violations))
    }
}

#[cfg(test)]
mod tests {
    use stubcat_ast::{BUILTIN_PACKAGE, Catalogue, MachineRepr, QualName};
    use stubcat_lowering::lower_stub;
    use stubcat_parser::parse_stub;
    use url::Url;

    use super::*;

    const BUILTINS: &str = include_str!("../../../stubs/go/builtins.go");

    fn catalogue(src: &str) -> Catalogue {
        let uri = Url::parse("inmemory:///builtins.go").unwrap();
        lower_stub(&parse_stub(uri, src).unwrap())
    }

    fn violations_of(src: &str) -> Vec<Violation> {
        validate(&catalogue(src)).unwrap_err().0
    }

    fn method_names(sets: &MethodSets, package: &str, name: &str) -> Vec<String> {
        sets.get(&QualName::new(package, name))
            .unwrap()
            .iter()
            .map(|method| method.spec.name.clone())
            .collect()
    }

    #[test]
    fn bundled_builtins_are_valid() {
        let sets = validate(&catalogue(BUILTINS)).unwrap();
        assert_eq!(method_names(&sets, "io", "ReadWriteCloser"), vec!["Read", "Write", "Close"]);
        assert_eq!(method_names(&sets, BUILTIN_PACKAGE, "error"), vec!["Error"]);
    }

    #[test]
    fn empty_catalogue_is_valid() {
        let sets = validate(&catalogue("")).unwrap();
        assert!(sets.is_empty());
    }

    #[test]
    fn duplicate_function() {
        let violations = violations_of(
            "package fmt\nfunc Print(a ...interface{}) (n int, err error)\nfunc Print(a ...interface{}) (n int, err error)\n",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule(), Rule::Uniqueness);
        assert!(matches!(&violations[0], Violation::DuplicateName { name, .. } if name == "Print"));
    }

    #[test]
    fn types_and_functions_share_a_namespace() {
        let violations = violations_of("package time\ntype Now struct{}\nfunc Now() Time\n");
        assert!(matches!(&violations[..], [Violation::DuplicateName { .. }]));
    }

    #[test]
    fn same_method_on_different_receivers() {
        let sets = validate(&catalogue(
            "package sync\ntype Mutex struct{}\ntype RWMutex struct{}\nfunc (m *Mutex) Lock()\nfunc (rw *RWMutex) Lock()\n",
        ));
        assert!(sets.is_ok());

        let violations = violations_of("package sync\ntype Mutex struct{}\nfunc (m *Mutex) Lock()\nfunc (m Mutex) Lock()\n");
        assert!(matches!(&violations[..], [Violation::DuplicateMethod { method, .. }] if method == "Lock"));
    }

    #[test]
    fn unresolved_embed() {
        let violations = violations_of("package io\ntype ReadNoper interface {\n    Reader\n    io.Nope\n}\ntype Reader interface {\n    Read(p []byte) (n int, err error)\n}\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule(), Rule::EmbedResolution);
        assert!(matches!(&violations[0], Violation::UnresolvedEmbed { embed, .. } if embed.name == "Nope"));
    }

    #[test]
    fn bare_embed_falls_back_to_builtin() {
        let sets = validate(&catalogue(
            "type error interface {\n    Error() string\n}\npackage fs\ntype PathError interface {\n    error\n    Path() string\n}\n",
        ))
        .unwrap();
        assert_eq!(method_names(&sets, "fs", "PathError"), vec!["Error", "Path"]);
    }

    #[test]
    fn embedding_a_struct() {
        let violations = violations_of("package os\ntype File struct{}\ntype Handle interface {\n    File\n}\n");
        assert!(matches!(&violations[..], [Violation::EmbedNotInterface { .. }]));
    }

    #[test]
    fn embed_cycle_is_reported_once() {
        let violations = violations_of("package p\ntype A interface {\n    B\n}\ntype B interface {\n    A\n}\n");
        assert_eq!(violations.len(), 1);
        let Violation::EmbedCycle { path, .. } = &violations[0] else { panic!("expected a cycle") };
        assert_eq!(path, "p.A -> p.B -> p.A");
    }

    #[test]
    fn conflicting_embedded_methods() {
        let violations = violations_of(
            "package p\ntype A interface {\n    M() int\n}\ntype B interface {\n    M() string\n}\ntype C interface {\n    A\n    B\n}\n",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule(), Rule::MethodSetConsistency);
        let Violation::ConflictingMethod { interface, first, second, .. } = &violations[0] else {
            panic!("expected a conflict")
        };
        assert_eq!(interface, &QualName::new("p", "C"));
        assert_eq!(first, "() int");
        assert_eq!(second, "() string");
    }

    #[test]
    fn same_shape_with_different_names_is_merged() {
        let sets = validate(&catalogue(
            "package p\ntype A interface {\n    Read(p []byte) (n int, err error)\n}\ntype B interface {\n    Read([]byte) (int, error)\n}\ntype C interface {\n    A\n    B\n}\n",
        ))
        .unwrap();
        assert_eq!(method_names(&sets, "p", "C"), vec!["Read"]);
    }

    #[test]
    fn undefined_receiver() {
        let violations = violations_of("package os\nfunc (f *File) Close() error\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule(), Rule::ReceiverResolution);
        assert!(matches!(&violations[0], Violation::UndefinedReceiver { receiver, .. } if receiver == "File"));
    }

    #[test]
    fn receiver_in_other_package() {
        let violations = violations_of("package http\ntype Client struct{}\npackage os\nfunc (c *http.Client) Close() error\n");
        assert!(matches!(&violations[..], [Violation::ForeignReceiver { .. }]));

        let violations = violations_of("package http\ntype Client struct{}\npackage os\nfunc (c *Client) Close() error\n");
        assert!(matches!(&violations[..], [Violation::UndefinedReceiver { .. }]));
    }

    #[test]
    fn receiver_must_be_a_type() {
        let violations = violations_of("package os\nfunc Getwd() (dir string, err error)\nfunc (g Getwd) String() string\n");
        assert!(matches!(&violations[..], [Violation::UndefinedReceiver { .. }]));
    }

    #[test]
    fn misplaced_variadic() {
        let violations = violations_of("package fmt\nfunc Printf(a ...interface{}, format string) (n int, err error)\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule(), Rule::VariadicPlacement);

        let violations = violations_of("package fmt\ntype Stringer interface {\n    Format(a ...int, b ...int)\n}\n");
        assert!(matches!(&violations[..], [Violation::MisplacedVariadic { name, .. }] if name == "fmt.Stringer.Format"));
    }

    #[test]
    fn nested_misplaced_variadic() {
        let violations = violations_of("package filepath\nfunc Walk(root string, fn func(a ...int, b int)) error\n");
        assert!(matches!(&violations[..], [Violation::MisplacedVariadic { name, .. }] if name == "filepath.Walk"));

        let violations = violations_of("package p\ntype Hooks struct {\n    OnCall func(a ...int, b int)\n}\n");
        assert!(matches!(&violations[..], [Violation::MisplacedVariadic { name, .. }] if name == "p.Hooks.OnCall"));

        let violations = violations_of("package p\ntype Visit func(a ...int, b int) error\ntype Table map[string][]*func(a ...int, b int)\n");
        assert_eq!(violations.len(), 2);

        assert!(validate(&catalogue("package p\nfunc Apply(fn func(format string, a ...any)) func(a ...int)\n")).is_ok());
    }

    #[test]
    fn interface_receiver() {
        let violations = violations_of("package io\ntype Reader interface {\n    Read(p []byte) (n int, err error)\n}\nfunc (r Reader) Extra()\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule(), Rule::ReceiverResolution);
        assert!(matches!(&violations[0], Violation::InterfaceReceiver { receiver, method, .. } if receiver == "Reader" && method == "Extra"));
    }

    #[test]
    fn flattened_names_do_not_depend_on_embed_order() {
        let decls = "type Reader interface {\n    Read(p []byte) (n int, err error)\n}\ntype Writer interface {\n    Write(p []byte) (n int, err error)\n}\ntype Closer interface {\n    Close() error\n}\n";
        let forward = validate(&catalogue(&format!("package io\n{decls}type RWC interface {{\n    Reader\n    Writer\n    Closer\n}}\n"))).unwrap();
        let permuted = validate(&catalogue(&format!("package io\n{decls}type RWC interface {{\n    Closer\n    Reader\n    Writer\n}}\n"))).unwrap();

        let forward = method_names(&forward, "io", "RWC");
        let permuted = method_names(&permuted, "io", "RWC");
        assert_eq!(forward, vec!["Read", "Write", "Close"]);
        assert_eq!(permuted, vec!["Close", "Read", "Write"]);

        let as_set = |names: &[String]| names.iter().cloned().collect::<std::collections::BTreeSet<_>>();
        assert_eq!(as_set(&forward), as_set(&permuted));
    }

    #[test]
    fn builtin_alias_with_wrong_representation() {
        let violations = violations_of("type byte uint16\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule(), Rule::BuiltinCompleteness);
        let Violation::MismatchedBuiltin { expected, found, .. } = &violations[0] else {
            panic!("expected a mismatch")
        };
        assert_eq!(*expected, MachineRepr::Int { bits: 8, signed: false });
        assert_eq!(*found, MachineRepr::Int { bits: 16, signed: false });
    }

    #[test]
    fn builtin_aliases_resolve_through_chains() {
        assert!(validate(&catalogue("type uint8 uint8\ntype byte uint8\ntype octet byte\n")).is_ok());
        assert!(matches!(
            &violations_of("type octet byte\ntype octet uint16\n")[..],
            [Violation::DuplicateName { .. }, Violation::ConflictingBuiltin { .. }]
        ));
        assert!(matches!(&violations_of("type a b\ntype b a\n")[..], [Violation::UnresolvedBuiltin { .. }, Violation::UnresolvedBuiltin { .. }]));
        assert!(matches!(&violations_of("type word machineword\n")[..], [Violation::UnresolvedBuiltin { .. }]));
    }

    #[test]
    fn builtin_alias_of_interface_is_not_checked() {
        assert!(validate(&catalogue("type error interface {\n    Error() string\n}\ntype failure error\n")).is_ok());
    }

    #[test]
    fn bridges() {
        assert!(matches!(&violations_of("type word word\n")[..], [Violation::UnknownBuiltin { .. }]));
        assert!(validate(&catalogue("type error error\ntype any any\ntype comparable comparable\n")).is_ok());
        assert!(validate(&catalogue("type error error\ntype failure error\n")).is_ok());
        assert!(matches!(
            &violations_of("package time\ntype int64 int64\n")[..],
            [Violation::BridgeOutsideBuiltins { .. }]
        ));
    }

    #[test]
    fn violations_are_exhaustive_and_ordered_by_rule() {
        let violations = violations_of(
            "type byte uint16\npackage os\nfunc (f *File) Close() error\nfunc Open(name string) error\nfunc Open(name string) error\n",
        );
        let rules: Vec<_> = violations.iter().map(Violation::rule).collect();
        assert_eq!(rules, vec![Rule::Uniqueness, Rule::ReceiverResolution, Rule::BuiltinCompleteness]);
    }
}
