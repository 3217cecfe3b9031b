//! # lipigraph
//!
//! A knowledge-graph engine for ancient-script symbol datasets. Builds an
//! RDF graph from per-script image folders, answers SPARQL queries over it,
//! and exports graphs and results as Turtle, RDF/XML, JSON-LD and CSV.
//!
//! ## Architecture
//!
//! - **Ontology** (`ontology`): fixed classes, properties and namespaces
//! - **Graph store** (`store`): in-memory triple store backed by `oxigraph`
//! - **Dataset loader** (`dataset`): walks script folders into the store
//! - **Feature providers** (`features`): pluggable frequency/contour/similarity facts
//! - **Query engine** (`query`): SPARQL with the four result shapes
//! - **Exporters** (`export`, `void`): serializations, CSV, linked-data publishing
//!
//! ## Library usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use lipigraph::engine::{Engine, EngineConfig};
//! use lipigraph::features::RandomStubProvider;
//!
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//! let mut provider = RandomStubProvider::with_seed(42, vec!["yi".to_string()]);
//! let report = engine
//!     .generate(Path::new("datasets"), &["indus".to_string()], &mut provider)
//!     .unwrap();
//! println!("{report}");
//!
//! let result = engine
//!     .execute_query("SELECT ?s WHERE { ?s ?p ?o } LIMIT 5")
//!     .unwrap();
//! println!("{result}");
//! ```

pub mod dataset;
pub mod engine;
pub mod error;
pub mod export;
pub mod features;
pub mod ontology;
pub mod query;
pub mod store;
pub mod void;
