//! Loading stub files into served catalogues.
//!
//! A stub goes through parsing, lowering, checking and indexing (see [`lifecycle`]).
//! [`SharedCatalogue`] keeps a served catalogue available to concurrent readers while
//! allowing it to be reloaded.

mod export;
mod fs;
pub mod lifecycle;
pub mod paths;
mod render_reports;
mod result;
mod shared;

pub use export::*;
pub use fs::*;
pub use lifecycle::{Empty, LoadFailure, Loading, Phase, Served, Validated, load, load_from};
pub use paths::*;
pub use render_reports::*;
pub use result::*;
pub use shared::*;
