//! Machine-readable views of a served catalogue.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

use serde_derive::Serialize;

use stubcat_ast::{Decl, InterfaceElem, Package, TypeBody};
use stubcat_index::Index;

use crate::result::DriverError;

#[derive(Serialize)]
struct JsonExport<'a> {
    uri: &'a str,
    summary: Summary,
    packages: &'a [Package],
    /// Flattened method names of every interface, keyed by `package.Interface`
    method_sets: BTreeMap<String, Vec<&'a str>>,
}

#[derive(Serialize)]
struct Summary {
    packages: usize,
    types: usize,
    functions: usize,
    methods: usize,
}

/// The whole catalogue as pretty-printed JSON.
pub fn export_json(index: &Index) -> Result<String, DriverError> {
    let catalogue = index.catalogue();
    let mut summary =
        Summary { packages: catalogue.packages.len(), types: 0, functions: 0, methods: 0 };
    let mut method_sets = BTreeMap::new();
    for package in &catalogue.packages {
        for decl in &package.decls {
            match decl {
                Decl::Type(typ) => {
                    summary.types += 1;
                    if typ.is_interface() {
                        let methods = index.methods_of(&package.name, &typ.name);
                        method_sets.insert(
                            format!("{}.{}", package.name, typ.name),
                            methods.iter().map(|method| method.name()).collect(),
                        );
                    }
                }
                Decl::Func(_) => summary.functions += 1,
                Decl::Method(_) => summary.methods += 1,
            }
        }
    }
    let export = JsonExport {
        uri: catalogue.uri.as_str(),
        summary,
        packages: &catalogue.packages,
        method_sets,
    };
    serde_json::to_string_pretty(&export).map_err(Arc::new).map_err(DriverError::Json)
}

/// The catalogue as a Graphviz digraph.
///
/// Packages become clusters, types and functions become nodes. Edges connect interfaces to
/// the interfaces they embed and types to their methods.
pub fn export_dot(index: &Index) -> String {
    let catalogue = index.catalogue();
    let mut out = String::new();
    let mut edges = Vec::new();

    // Writing to a `String` cannot fail.
    let _ = writeln!(out, "digraph catalogue {{");
    let _ = writeln!(out, "    rankdir=LR;");
    let _ = writeln!(out, "    node [shape=box, fontname=\"monospace\"];");
    for package in &catalogue.packages {
        let pkg = &package.name;
        let _ = writeln!(out, "    subgraph \"cluster_{pkg}\" {{");
        let _ = writeln!(out, "        label=\"{pkg}\";");
        for decl in &package.decls {
            let name = decl.name();
            match decl {
                Decl::Type(typ) => {
                    let shape = if typ.is_interface() { "ellipse" } else { "box" };
                    let _ = writeln!(out, "        \"{pkg}.{name}\" [label=\"{name}\", shape={shape}];");
                    if let TypeBody::Interface(body) = &typ.body {
                        for elem in &body.elems {
                            let InterfaceElem::Embed { name: embed, .. } = elem else { continue };
                            let target = match &embed.package {
                                Some(qual) => format!("{qual}.{}", embed.name),
                                None => match index.resolve(pkg, &embed.name) {
                                    Some((found, _)) => format!("{found}.{}", embed.name),
                                    None => format!("{pkg}.{}", embed.name),
                                },
                            };
                            edges.push(format!("\"{pkg}.{name}\" -> \"{target}\" [label=\"embeds\"]"));
                        }
                    }
                }
                Decl::Func(_) => {
                    let _ = writeln!(out, "        \"{pkg}.{name}\" [label=\"{name}()\", shape=plain];");
                }
                Decl::Method(method) => {
                    let recv = &method.receiver.typ.name;
                    let _ = writeln!(
                        out,
                        "        \"{pkg}.{recv}.{name}\" [label=\"{name}()\", shape=plain];"
                    );
                    edges.push(format!("\"{pkg}.{recv}\" -> \"{pkg}.{recv}.{name}\" [style=dashed]"));
                }
            }
        }
        let _ = writeln!(out, "    }}");
    }
    for edge in edges {
        let _ = writeln!(out, "    {edge};");
    }
    let _ = writeln!(out, "}}");
    out
}
