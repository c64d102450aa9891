use serde_derive::Serialize;
use stubcat_ast::{HashMap, MethodSpec, QualName};

/// A method of an interface after embedded interfaces have been flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatMethod {
    /// The interface whose body lists the method
    pub origin: QualName,
    pub spec: MethodSpec,
}

/// The flattened method set of every interface declared in a catalogue.
///
/// Methods are kept in embed order: an interface's own methods and the methods of
/// its embedded interfaces appear in the order in which its body lists them.
/// A method reachable through several embeds is listed once.
#[derive(Debug, Clone, Default)]
pub struct MethodSets {
    sets: HashMap<QualName, Vec<FlatMethod>>,
}

impl MethodSets {
    pub(crate) fn insert(&mut self, interface: QualName, methods: Vec<FlatMethod>) {
        self.sets.insert(interface, methods);
    }

    pub fn get(&self, interface: &QualName) -> Option<&[FlatMethod]> {
        self.sets.get(interface).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QualName, &[FlatMethod])> {
        self.sets.iter().map(|(name, methods)| (name, methods.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
