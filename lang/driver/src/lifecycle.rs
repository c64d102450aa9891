//! The states a catalogue goes through on its way to being served.
//!
//! ```text
//! Empty --read--> Loading --validate--> Validated --serve--> Served
//!                    |
//!                    \-----> LoadFailure --reset--> Empty
//! ```
//! Each state is its own type, so a catalogue can only be served after it was validated.
//! Failing to validate yields a [`LoadFailure`], from which the caller starts over with [`Empty`].

use std::fmt;
use std::sync::Arc;

use miette::NamedSource;
use url::Url;

use stubcat_ast::Catalogue;
use stubcat_checker::MethodSets;
use stubcat_index::Index;

use crate::fs::FileSource;
use crate::result::{DriverError, LoadErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Loading,
    Validated,
    Served,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Empty => "empty",
            Phase::Loading => "loading",
            Phase::Validated => "validated",
            Phase::Served => "served",
        };
        f.write_str(s)
    }
}

fn transition(uri: &Url, from: Phase, to: Phase) {
    log::debug!("{uri}: {from} -> {to}");
}

// Empty
//
//

/// No stub has been read yet.
#[derive(Debug, Default)]
pub struct Empty;

impl Empty {
    pub fn new() -> Self {
        Empty
    }

    /// Start loading from source text that is already in memory.
    pub fn load(self, uri: Url, source: String) -> Loading {
        transition(&uri, Phase::Empty, Phase::Loading);
        Loading { uri, source }
    }

    /// Read the stub at `uri` and start loading it.
    pub fn read(self, files: &mut dyn FileSource, uri: &Url) -> Result<Loading, DriverError> {
        log::debug!("Reading stub: {uri}");
        let source = files.read_to_string(uri)?;
        Ok(self.load(uri.clone(), source))
    }
}

// Loading
//
//

/// The stub text has been read but not yet checked.
#[derive(Debug)]
pub struct Loading {
    uri: Url,
    source: String,
}

impl Loading {
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parse, lower and check the stub.
    ///
    /// A parse error stops the load immediately. Otherwise every consistency violation is
    /// reported.
    pub fn validate(self) -> Result<Validated, LoadFailure> {
        let cst = match stubcat_parser::parse_stub(self.uri.clone(), &self.source) {
            Ok(cst) => cst,
            Err(err) => return Err(self.fail(err.into())),
        };
        let catalogue = stubcat_lowering::lower_stub(&cst);
        let method_sets = match stubcat_checker::validate(&catalogue) {
            Ok(method_sets) => method_sets,
            Err(violations) => return Err(self.fail(LoadErrors::from_violations(violations))),
        };
        transition(&self.uri, Phase::Loading, Phase::Validated);
        Ok(Validated {
            uri: self.uri,
            source: self.source,
            catalogue: Arc::new(catalogue),
            method_sets,
        })
    }

    fn fail(self, errors: LoadErrors) -> LoadFailure {
        log::debug!("{}: load failed with {} error(s)", self.uri, errors.len());
        transition(&self.uri, Phase::Loading, Phase::Empty);
        LoadFailure { uri: self.uri, source: self.source, errors }
    }
}

// Validated
//
//

/// The catalogue passed all consistency checks.
#[derive(Debug)]
pub struct Validated {
    uri: Url,
    source: String,
    catalogue: Arc<Catalogue>,
    method_sets: MethodSets,
}

impl Validated {
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn catalogue(&self) -> &Arc<Catalogue> {
        &self.catalogue
    }

    pub fn method_sets(&self) -> &MethodSets {
        &self.method_sets
    }

    /// Build the lookup index.
    pub fn serve(self) -> Served {
        let index = Index::new(self.catalogue, &self.method_sets);
        transition(&self.uri, Phase::Validated, Phase::Served);
        Served { uri: self.uri, index: Arc::new(index) }
    }
}

// Served
//
//

/// The catalogue is indexed and ready for queries.
#[derive(Debug, Clone)]
pub struct Served {
    uri: Url,
    index: Arc<Index>,
}

impl Served {
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn index(&self) -> &Arc<Index> {
        &self.index
    }

    pub fn into_index(self) -> Arc<Index> {
        self.index
    }
}

// LoadFailure
//
//

/// A load that did not get past validation, together with the text it failed on.
#[derive(Debug)]
pub struct LoadFailure {
    pub uri: Url,
    pub source: String,
    pub errors: LoadErrors,
}

impl LoadFailure {
    /// Start over.
    pub fn reset(self) -> Empty {
        Empty
    }

    /// The errors as a report that carries the stub text for rendering source labels.
    pub fn into_report(self) -> miette::Report {
        let LoadFailure { uri, source, errors } = self;
        miette::Report::new(errors).with_source_code(NamedSource::new(uri, source))
    }
}

impl From<(Url, DriverError)> for LoadFailure {
    fn from((uri, err): (Url, DriverError)) -> Self {
        LoadFailure { uri, source: String::new(), errors: err.into() }
    }
}

/// Run the whole lifecycle on source text that is already in memory.
pub fn load(uri: Url, source: String) -> Result<Served, LoadFailure> {
    Ok(Empty::new().load(uri, source).validate()?.serve())
}

/// Run the whole lifecycle on the stub at `uri`.
pub fn load_from(files: &mut dyn FileSource, uri: &Url) -> Result<Served, LoadFailure> {
    let loading =
        Empty::new().read(files, uri).map_err(|err| LoadFailure::from((uri.clone(), err)))?;
    Ok(loading.validate()?.serve())
}
