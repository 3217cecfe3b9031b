//! In-memory RDF graph store backed by oxigraph.
//!
//! The store is an append-mostly set of (subject, predicate, object) triples
//! in the default graph. Writes take `&mut self`, so the single-writer
//! discipline is checked by the borrow checker rather than by locks.

use std::path::Path;

use oxigraph::io::RdfFormat;
use oxigraph::model::{GraphNameRef, NamedNodeRef, TermRef, Triple, TripleRef};
use oxigraph::store::Store;

use crate::error::StoreError;

/// Result alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Concrete RDF syntaxes the store can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Turtle,
    RdfXml,
    JsonLd,
}

impl ExportFormat {
    /// Parse a user-supplied format name.
    pub fn from_name(name: &str) -> StoreResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(Self::Turtle),
            "rdf-xml" | "rdfxml" | "rdf" | "xml" => Ok(Self::RdfXml),
            "json-ld" | "jsonld" => Ok(Self::JsonLd),
            _ => Err(StoreError::UnsupportedFormat {
                format: name.to_string(),
            }),
        }
    }

    /// Infer the format from a file extension (`.ttl`, `.rdf`, `.jsonld`).
    pub fn from_path(path: &Path) -> StoreResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| StoreError::UnsupportedFormat {
                format: path.display().to_string(),
            })?;
        match extension.to_ascii_lowercase().as_str() {
            "ttl" => Ok(Self::Turtle),
            "rdf" => Ok(Self::RdfXml),
            "jsonld" => Ok(Self::JsonLd),
            _ => Err(StoreError::UnsupportedFormat {
                format: extension.to_string(),
            }),
        }
    }

    /// Canonical file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Turtle => "ttl",
            Self::RdfXml => "rdf",
            Self::JsonLd => "jsonld",
        }
    }

    /// Resolve to the backend parser/serializer format.
    fn rdf_format(self) -> StoreResult<RdfFormat> {
        RdfFormat::from_extension(self.extension()).ok_or_else(|| {
            StoreError::UnsupportedFormat {
                format: self.to_string(),
            }
        })
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Turtle => "turtle",
            Self::RdfXml => "rdf-xml",
            Self::JsonLd => "json-ld",
        };
        f.write_str(name)
    }
}

/// In-memory triple store with set semantics.
pub struct GraphStore {
    inner: Store,
}

impl GraphStore {
    /// Create an empty store.
    pub fn new() -> StoreResult<Self> {
        let inner = Store::new().map_err(|e| StoreError::Backend {
            message: format!("failed to create store: {e}"),
        })?;
        Ok(Self { inner })
    }

    /// Load a serialized graph from a file, inferring the format from the
    /// file extension.
    pub fn load_from_file(path: &Path) -> StoreResult<Self> {
        let format = ExportFormat::from_path(path)?;
        let data = std::fs::read(path).map_err(|e| StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut store = Self::new()?;
        store.load(&data, format)?;
        Ok(store)
    }

    /// Parse serialized graph data into this store.
    pub fn load(&mut self, data: &[u8], format: ExportFormat) -> StoreResult<()> {
        self.inner
            .load_from_reader(format.rdf_format()?, data)
            .map_err(|e| StoreError::Parse {
                message: e.to_string(),
            })
    }

    /// Insert a triple. Returns `false` if it was already present.
    pub fn insert(&mut self, triple: TripleRef<'_>) -> StoreResult<bool> {
        // oxigraph 0.5's `Store::insert` returns `()`, not the
        // was-newly-added flag this wrapper's contract promises, so derive it
        // from a membership check before inserting.
        let quad = triple.in_graph(GraphNameRef::DefaultGraph);
        if self.inner.contains(quad).map_err(|e| StoreError::Backend {
            message: format!("contains failed: {e}"),
        })? {
            return Ok(false);
        }
        self.inner.insert(quad).map_err(|e| StoreError::Backend {
            message: format!("insert failed: {e}"),
        })?;
        Ok(true)
    }

    /// Remove a triple. Returns `false` if it was absent.
    pub fn remove(&mut self, triple: TripleRef<'_>) -> StoreResult<bool> {
        let quad = triple.in_graph(GraphNameRef::DefaultGraph);
        if !self.inner.contains(quad).map_err(|e| StoreError::Backend {
            message: format!("contains failed: {e}"),
        })? {
            return Ok(false);
        }
        self.inner.remove(quad).map_err(|e| StoreError::Backend {
            message: format!("remove failed: {e}"),
        })?;
        Ok(true)
    }

    /// Whether the store contains the exact triple.
    pub fn contains(&self, triple: TripleRef<'_>) -> StoreResult<bool> {
        self.inner
            .contains(triple.in_graph(GraphNameRef::DefaultGraph))
            .map_err(|e| StoreError::Backend {
                message: format!("contains failed: {e}"),
            })
    }

    /// All triples matching the given pattern, with `None` as a wildcard.
    ///
    /// Each call restarts the scan; iteration order is unspecified.
    pub fn match_pattern(
        &self,
        subject: Option<NamedNodeRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> StoreResult<Vec<Triple>> {
        let mut triples = Vec::new();
        for quad in self.inner.quads_for_pattern(
            subject.map(Into::into),
            predicate.map(Into::into),
            object,
            Some(GraphNameRef::DefaultGraph),
        ) {
            let quad = quad.map_err(|e| StoreError::Backend {
                message: format!("pattern scan failed: {e}"),
            })?;
            triples.push(Triple::new(quad.subject, quad.predicate, quad.object));
        }
        Ok(triples)
    }

    /// Number of instances of the given class (`rdf:type` subjects).
    pub fn count_instances(&self, class: NamedNodeRef<'_>) -> StoreResult<usize> {
        Ok(self
            .match_pattern(
                None,
                Some(oxigraph::model::vocab::rdf::TYPE),
                Some(class.into()),
            )?
            .len())
    }

    /// Total triple count.
    pub fn len(&self) -> StoreResult<usize> {
        self.inner.len().map_err(|e| StoreError::Backend {
            message: format!("len failed: {e}"),
        })
    }

    /// Whether the store holds no triples.
    pub fn is_empty(&self) -> StoreResult<bool> {
        self.len().map(|n| n == 0)
    }

    /// Serialize the full store in the requested syntax.
    pub fn serialize(&self, format: ExportFormat) -> StoreResult<String> {
        let buffer = self
            .inner
            .dump_graph_to_writer(GraphNameRef::DefaultGraph, format.rdf_format()?, Vec::new())
            .map_err(|e| StoreError::Serialize {
                message: e.to_string(),
            })?;
        String::from_utf8(buffer).map_err(|e| StoreError::Serialize {
            message: format!("serializer produced invalid UTF-8: {e}"),
        })
    }

    /// Backend store handle, used by the query engine.
    pub(crate) fn inner(&self) -> &Store {
        &self.inner
    }
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore").finish()
    }
}

#[cfg(test)]
mod tests {
    use oxigraph::model::{Literal, NamedNode};

    use super::*;

    fn node(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    #[test]
    fn insert_is_idempotent() {
        let mut store = GraphStore::new().unwrap();
        let s = node("http://example.org/s");
        let p = node("http://example.org/p");
        let o = Literal::from("value");
        let triple = TripleRef::new(s.as_ref(), p.as_ref(), o.as_ref());

        assert!(store.insert(triple).unwrap());
        assert!(!store.insert(triple).unwrap());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut store = GraphStore::new().unwrap();
        let s = node("http://example.org/s");
        let p = node("http://example.org/p");
        let o = node("http://example.org/o");
        let triple = TripleRef::new(s.as_ref(), p.as_ref(), o.as_ref());

        assert!(!store.remove(triple).unwrap());
        store.insert(triple).unwrap();
        assert!(store.remove(triple).unwrap());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn match_pattern_filters_by_predicate() {
        let mut store = GraphStore::new().unwrap();
        let s = node("http://example.org/s");
        let p1 = node("http://example.org/p1");
        let p2 = node("http://example.org/p2");
        let o = node("http://example.org/o");
        store
            .insert(TripleRef::new(s.as_ref(), p1.as_ref(), o.as_ref()))
            .unwrap();
        store
            .insert(TripleRef::new(s.as_ref(), p2.as_ref(), o.as_ref()))
            .unwrap();

        let matched = store
            .match_pattern(None, Some(p1.as_ref()), None)
            .unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].predicate, p1);

        let all = store.match_pattern(None, None, None).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn turtle_round_trip_preserves_triples() {
        let mut store = GraphStore::new().unwrap();
        let s = node("http://example.org/s");
        let p = node("http://example.org/p");
        let o = Literal::from(42_i64);
        store
            .insert(TripleRef::new(s.as_ref(), p.as_ref(), o.as_ref()))
            .unwrap();

        let turtle = store.serialize(ExportFormat::Turtle).unwrap();
        let mut reloaded = GraphStore::new().unwrap();
        reloaded.load(turtle.as_bytes(), ExportFormat::Turtle).unwrap();

        assert_eq!(reloaded.len().unwrap(), store.len().unwrap());
        assert!(reloaded
            .contains(TripleRef::new(s.as_ref(), p.as_ref(), o.as_ref()))
            .unwrap());
    }

    #[test]
    fn format_from_name_and_path() {
        assert_eq!(ExportFormat::from_name("Turtle").unwrap(), ExportFormat::Turtle);
        assert_eq!(ExportFormat::from_name("rdf").unwrap(), ExportFormat::RdfXml);
        assert_eq!(ExportFormat::from_name("json-ld").unwrap(), ExportFormat::JsonLd);
        assert!(ExportFormat::from_name("n3").is_err());

        assert_eq!(
            ExportFormat::from_path(Path::new("out/kg.ttl")).unwrap(),
            ExportFormat::Turtle
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("kg.jsonld")).unwrap(),
            ExportFormat::JsonLd
        );
        assert!(ExportFormat::from_path(Path::new("kg.csv")).is_err());
        assert!(ExportFormat::from_path(Path::new("no_extension")).is_err());
    }
}
