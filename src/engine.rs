//! Engine facade: top-level API for the lipigraph system.
//!
//! The `Engine` owns the graph store and provides the public interface for
//! generating, querying, exporting and publishing knowledge graphs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::{self, LoadReport, MissingScriptPolicy};
use crate::error::LipiResult;
use crate::export::{self, PublishManifest};
use crate::features::FeatureProvider;
use crate::ontology::{self, script};
use crate::query::{self, QueryResult};
use crate::store::{ExportFormat, GraphStore};
use crate::void::{self, VoidSummary};

/// Configuration for the lipigraph engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How to treat requested scripts that have no directory on disk.
    pub missing_script_policy: MissingScriptPolicy,
    /// Creator stamped on published datasets.
    pub creator: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            missing_script_policy: MissingScriptPolicy::Skip,
            creator: "Ancient Script Researcher".to_string(),
        }
    }
}

/// The lipigraph knowledge-graph engine.
///
/// Owns a [`GraphStore`] seeded with the scripts ontology. Regeneration
/// builds a complete replacement store and swaps it in, so a failed load
/// never leaves the engine holding a half-built graph.
pub struct Engine {
    config: EngineConfig,
    store: GraphStore,
}

impl Engine {
    /// Create an engine with an empty graph holding only the ontology.
    pub fn new(config: EngineConfig) -> LipiResult<Self> {
        let mut store = GraphStore::new()?;
        ontology::define_ontology(&mut store)?;
        tracing::info!(triples = store.len()?, "initialized lipigraph engine");
        Ok(Self { config, store })
    }

    /// Create an engine from a previously exported graph file.
    pub fn from_graph_file(path: &Path, config: EngineConfig) -> LipiResult<Self> {
        let store = GraphStore::load_from_file(path)?;
        tracing::info!(path = %path.display(), triples = store.len()?, "loaded graph");
        Ok(Self { config, store })
    }

    /// Build a fresh knowledge graph from the dataset and swap it in.
    ///
    /// On error the previous graph is kept untouched.
    pub fn generate(
        &mut self,
        dataset_root: &Path,
        scripts: &[String],
        provider: &mut dyn FeatureProvider,
    ) -> LipiResult<LoadReport> {
        let mut fresh = GraphStore::new()?;
        ontology::define_ontology(&mut fresh)?;
        let report = dataset::load_scripts(
            &mut fresh,
            dataset_root,
            scripts,
            provider,
            self.config.missing_script_policy,
        )?;
        self.store = fresh;
        Ok(report)
    }

    /// Execute a SPARQL query against the current graph.
    pub fn execute_query(&self, text: &str) -> LipiResult<QueryResult> {
        Ok(query::execute(&self.store, text)?)
    }

    /// Serialize the full graph to a file.
    pub fn export(&self, path: &Path, format: Option<ExportFormat>) -> LipiResult<()> {
        export::export_store(&self.store, path, format)
    }

    /// Run a SELECT query and export its rows as CSV.
    pub fn export_query_csv(&self, query_text: &str, path: &Path) -> LipiResult<()> {
        let result = self.execute_query(query_text)?;
        export::export_result_csv(&result, path)
    }

    /// Run a CONSTRUCT or DESCRIBE query and export its triples as RDF.
    pub fn export_query_rdf(
        &self,
        query_text: &str,
        path: &Path,
        format: Option<ExportFormat>,
    ) -> LipiResult<()> {
        let result = self.execute_query(query_text)?;
        export::export_result_rdf(&result, path, format)
    }

    /// Publish the graph as a linked-data bundle under `out_dir`.
    pub fn publish(&mut self, out_dir: &Path) -> LipiResult<PublishManifest> {
        let creator = self.config.creator.clone();
        export::publish_linked_data(&mut self.store, out_dir, &creator)
    }

    /// (Re-)generate the VoID description inside the graph.
    pub fn void_description(&mut self) -> LipiResult<VoidSummary> {
        void::generate_void_description(&mut self.store)
    }

    /// Current graph statistics.
    pub fn stats(&self) -> LipiResult<GraphStats> {
        Ok(GraphStats {
            triples: self.store.len()?,
            scripts: self.store.count_instances(script::SCRIPT)?,
            symbols: self.store.count_instances(script::SYMBOL)?,
        })
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The underlying graph store.
    pub fn store(&self) -> &GraphStore {
        &self.store
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").field("config", &self.config).finish()
    }
}

/// Summary statistics for a knowledge graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    pub triples: usize,
    pub scripts: usize,
    pub symbols: usize,
}

impl std::fmt::Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "knowledge graph statistics")?;
        writeln!(f, "  triples: {}", self.triples)?;
        writeln!(f, "  scripts: {}", self.scripts)?;
        writeln!(f, "  symbols: {}", self.symbols)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::features::{FeatureProvider, SymbolFeatures};

    use super::*;

    /// Provider with fixed values, for tests that need exact counts.
    struct FixedProvider;

    impl FeatureProvider for FixedProvider {
        fn compute_features(
            &mut self,
            _script: &str,
            _symbol_id: &str,
            _image_path: &Path,
        ) -> Option<SymbolFeatures> {
            Some(SymbolFeatures {
                frequency: 5,
                contour_count: Some(3),
                similarities: Vec::new(),
            })
        }
    }

    #[test]
    fn new_engine_holds_only_the_ontology() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let stats = engine.stats().unwrap();
        assert!(stats.triples > 0);
        assert_eq!(stats.scripts, 0);
        assert_eq!(stats.symbols, 0);
    }

    #[test]
    fn failed_generate_keeps_previous_graph() {
        let dir = tempfile::TempDir::new().unwrap();
        let indus = dir.path().join("indus");
        std::fs::create_dir(&indus).unwrap();
        std::fs::write(indus.join("sign01.png"), b"img").unwrap();

        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        let mut provider = FixedProvider;
        engine
            .generate(dir.path(), &["indus".to_string()], &mut provider)
            .unwrap();
        let before = engine.stats().unwrap();
        assert_eq!(before.symbols, 1);

        let err = engine.generate(
            Path::new("/nonexistent/dataset"),
            &["indus".to_string()],
            &mut provider,
        );
        assert!(err.is_err());
        let after = engine.stats().unwrap();
        assert_eq!(after.triples, before.triples);
        assert_eq!(after.symbols, before.symbols);
    }

    #[test]
    fn generate_replaces_the_previous_graph() {
        let dir = tempfile::TempDir::new().unwrap();
        for script in ["indus", "yi"] {
            let sub = dir.path().join(script);
            std::fs::create_dir(&sub).unwrap();
            std::fs::write(sub.join("sign01.png"), b"img").unwrap();
        }

        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        let mut provider = FixedProvider;
        engine
            .generate(dir.path(), &["indus".to_string(), "yi".to_string()], &mut provider)
            .unwrap();
        assert_eq!(engine.stats().unwrap().scripts, 2);

        engine
            .generate(dir.path(), &["indus".to_string()], &mut provider)
            .unwrap();
        // The yi script from the first build is gone.
        assert_eq!(engine.stats().unwrap().scripts, 1);
    }
}
