//! Dataset loader: walks per-script image folders and populates the store.
//!
//! The dataset layout is one subdirectory per script under a root directory,
//! each holding image files named `<symbolId>.<ext>`. Feature values come
//! from an injected [`FeatureProvider`]; the loader itself never inspects
//! image contents.

use std::path::Path;

use oxigraph::model::vocab::{rdf, rdfs};
use oxigraph::model::{Literal, NamedNode, TripleRef};
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, LipiResult};
use crate::features::FeatureProvider;
use crate::ontology::{self, script};
use crate::store::GraphStore;

/// Script folders the original corpus ships with.
pub const KNOWN_SCRIPTS: &[&str] = &[
    "indus",
    "ba-shu",
    "naxi_dongba",
    "old_naxi",
    "proto_cuneiform",
    "proto_elamite",
    "standard_yi",
    "yi",
];

/// Image extensions treated as symbol glyphs, compared case-insensitively.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// What to do when a requested script has no directory under the root.
///
/// Skipping tolerates partial datasets; failing catches typos in script
/// names early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingScriptPolicy {
    #[default]
    Skip,
    Fail,
}

/// Summary of a completed load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    /// Scripts found on disk and loaded.
    pub scripts_loaded: Vec<String>,
    /// Requested scripts with no directory under the root.
    pub scripts_skipped: Vec<String>,
    /// Symbols added across all loaded scripts.
    pub symbols: usize,
    /// Triples newly added to the store.
    pub triples_added: usize,
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "loaded {} script(s): {}", self.scripts_loaded.len(), self.scripts_loaded.join(", "))?;
        if !self.scripts_skipped.is_empty() {
            writeln!(f, "skipped {} script(s): {}", self.scripts_skipped.len(), self.scripts_skipped.join(", "))?;
        }
        writeln!(f, "symbols:       {}", self.symbols)?;
        writeln!(f, "triples added: {}", self.triples_added)?;
        Ok(())
    }
}

/// Walk the dataset and populate the store with Script and Symbol triples.
///
/// A missing root is always an error; a missing per-script directory is
/// handled per `policy`. Symbols whose provider returns the no-features
/// sentinel keep their base triples only.
pub fn load_scripts(
    store: &mut GraphStore,
    root: &Path,
    scripts: &[String],
    provider: &mut dyn FeatureProvider,
    policy: MissingScriptPolicy,
) -> LipiResult<LoadReport> {
    if !root.is_dir() {
        return Err(DatasetError::RootNotFound {
            path: root.to_path_buf(),
        }
        .into());
    }

    let mut report = LoadReport {
        scripts_loaded: Vec::new(),
        scripts_skipped: Vec::new(),
        symbols: 0,
        triples_added: 0,
    };

    for name in scripts {
        let script_dir = root.join(name);
        if !script_dir.is_dir() {
            match policy {
                MissingScriptPolicy::Skip => {
                    tracing::warn!(script = %name, "script directory not found, skipping");
                    report.scripts_skipped.push(name.clone());
                    continue;
                }
                MissingScriptPolicy::Fail => {
                    return Err(DatasetError::ScriptNotFound {
                        script: name.clone(),
                        path: script_dir,
                    }
                    .into());
                }
            }
        }

        if load_script(store, name, &script_dir, provider, &mut report)? {
            report.scripts_loaded.push(name.clone());
        } else {
            report.scripts_skipped.push(name.clone());
        }
    }

    tracing::info!(
        scripts = report.scripts_loaded.len(),
        symbols = report.symbols,
        triples = report.triples_added,
        "dataset load complete"
    );
    Ok(report)
}

/// Load one script directory. Returns `false` when the script could not be
/// turned into a graph resource and was skipped.
fn load_script(
    store: &mut GraphStore,
    name: &str,
    script_dir: &Path,
    provider: &mut dyn FeatureProvider,
    report: &mut LoadReport,
) -> LipiResult<bool> {
    let Some(script_uri) = resource(name) else {
        tracing::warn!(script = %name, "script name does not form a valid IRI, skipping");
        return Ok(false);
    };

    let label = Literal::from(name);
    let mut added = 0_usize;
    added += store.insert(TripleRef::new(script_uri.as_ref(), rdf::TYPE, script::SCRIPT))? as usize;
    added += store.insert(TripleRef::new(script_uri.as_ref(), rdfs::LABEL, label.as_ref()))? as usize;
    added += store.insert(TripleRef::new(
        script_uri.as_ref(),
        script::FROM_SCRIPT,
        label.as_ref(),
    ))? as usize;

    if let Some(family) = ontology::family_for_script(name) {
        added += store.insert(TripleRef::new(script_uri.as_ref(), script::FAMILY, family))? as usize;
    }

    // Sorted scan keeps loads reproducible for a fixed provider seed.
    let mut image_paths = Vec::new();
    let entries = std::fs::read_dir(script_dir).map_err(|e| DatasetError::Io {
        path: script_dir.to_path_buf(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| DatasetError::Io {
            path: script_dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && is_image(&path) {
            image_paths.push(path);
        }
    }
    image_paths.sort();

    // Symbol ids must be unique within a script. Two files with the same
    // stem would mint the same resource, so only the first one counts.
    let mut seen = std::collections::HashSet::new();
    for path in &image_paths {
        let Some(symbol_id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !seen.insert(symbol_id.to_string()) {
            tracing::debug!(script = %name, symbol = %symbol_id, "duplicate symbol id, keeping first");
            continue;
        }
        let Some(symbol_uri) = resource(&format!("{name}_{symbol_id}")) else {
            tracing::warn!(script = %name, symbol = %symbol_id, "symbol id does not form a valid IRI, skipping");
            continue;
        };

        let symbol_label = Literal::from(symbol_id);
        added += store.insert(TripleRef::new(symbol_uri.as_ref(), rdf::TYPE, script::SYMBOL))? as usize;
        added += store.insert(TripleRef::new(
            symbol_uri.as_ref(),
            rdfs::LABEL,
            symbol_label.as_ref(),
        ))? as usize;
        added += store.insert(TripleRef::new(
            symbol_uri.as_ref(),
            script::FROM_SCRIPT,
            label.as_ref(),
        ))? as usize;
        added += store.insert(TripleRef::new(
            script_uri.as_ref(),
            script::HAS_SYMBOL,
            symbol_uri.as_ref(),
        ))? as usize;
        report.symbols += 1;

        let Some(features) = provider.compute_features(name, symbol_id, path) else {
            tracing::debug!(script = %name, symbol = %symbol_id, "no features for symbol");
            continue;
        };

        let frequency = Literal::from(features.frequency as i64);
        added += store.insert(TripleRef::new(
            symbol_uri.as_ref(),
            script::SYMBOL_FREQUENCY,
            frequency.as_ref(),
        ))? as usize;

        if let Some(contours) = features.contour_count {
            let contours = Literal::from(contours as i64);
            added += store.insert(TripleRef::new(
                symbol_uri.as_ref(),
                script::CONTOUR_COUNT,
                contours.as_ref(),
            ))? as usize;
        }

        for link in &features.similarities {
            let Some(target_uri) = resource(&link.target) else {
                continue;
            };
            let score = Literal::from(link.score);
            added += store.insert(TripleRef::new(
                symbol_uri.as_ref(),
                script::SIMILAR_TO,
                target_uri.as_ref(),
            ))? as usize;
            added += store.insert(TripleRef::new(
                symbol_uri.as_ref(),
                script::SIMILARITY_SCORE,
                score.as_ref(),
            ))? as usize;
        }
    }

    tracing::debug!(script = %name, triples = added, "script loaded");
    report.triples_added += added;
    Ok(true)
}

/// Mint a resource IRI in the scripts namespace, if the local name is valid.
fn resource(local: &str) -> Option<NamedNode> {
    NamedNode::new(format!("{}{local}", script::NS)).ok()
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            let lower = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&lower.as_str())
        })
}
