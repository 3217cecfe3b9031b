//! Exporters: full-store serialization, CSV/RDF result export, and the
//! linked-data publication bundle.

use std::path::Path;

use oxigraph::model::vocab::{rdf, xsd};
use oxigraph::model::{Literal, TripleRef};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, LipiResult};
use crate::ontology::{self, dcterms, prov, script};
use crate::query::{term_to_plain, QueryResult};
use crate::store::{ExportFormat, GraphStore};

/// Serialize the full store to a file.
///
/// The format comes from `format` when given, otherwise from the file
/// extension.
pub fn export_store(
    store: &GraphStore,
    path: &Path,
    format: Option<ExportFormat>,
) -> LipiResult<()> {
    let format = match format {
        Some(format) => format,
        None => ExportFormat::from_path(path)?,
    };
    let payload = store.serialize(format)?;
    std::fs::write(path, payload).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), %format, "exported graph");
    Ok(())
}

/// Write a tabular (SELECT) result as CSV: a header row of variable names,
/// then one row per solution. Unbound cells become empty fields.
pub fn export_result_csv(result: &QueryResult, path: &Path) -> LipiResult<()> {
    let QueryResult::Tabular(tab) = result else {
        return Err(ExportError::UnsupportedResultType {
            expected: "tabular",
            actual: result.kind(),
        }
        .into());
    };

    let mut writer = csv::Writer::from_path(path).map_err(|e| ExportError::Csv {
        message: e.to_string(),
    })?;
    writer
        .write_record(&tab.variables)
        .map_err(|e| ExportError::Csv {
            message: e.to_string(),
        })?;
    for row in &tab.rows {
        let record: Vec<String> = row
            .iter()
            .map(|cell| cell.as_ref().map(term_to_plain).unwrap_or_default())
            .collect();
        writer.write_record(&record).map_err(|e| ExportError::Csv {
            message: e.to_string(),
        })?;
    }
    writer.flush().map_err(|e| ExportError::Csv {
        message: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), rows = tab.len(), "exported CSV");
    Ok(())
}

/// Write a CONSTRUCT or DESCRIBE result as RDF by building a fresh store
/// from its triples and serializing that.
pub fn export_result_rdf(
    result: &QueryResult,
    path: &Path,
    format: Option<ExportFormat>,
) -> LipiResult<()> {
    let triples = match result {
        QueryResult::Constructed(triples) | QueryResult::Described(triples) => triples,
        other => {
            return Err(ExportError::UnsupportedResultType {
                expected: "constructed or described",
                actual: other.kind(),
            }
            .into());
        }
    };

    let mut fresh = GraphStore::new()?;
    for triple in triples {
        fresh.insert(triple.as_ref())?;
    }
    export_store(&fresh, path, format)
}

/// Manifest written alongside the published files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishManifest {
    pub creator: String,
    pub created: String,
    pub triples: usize,
    pub scripts: usize,
    pub symbols: usize,
    pub files: Vec<String>,
}

/// Publish the graph as a linked-data bundle.
///
/// Stamps the dataset resource with PROV/DCTERMS provenance, serializes the
/// graph under `data/` in every supported format, and writes an `index.html`
/// portal plus a machine-readable `manifest.json`.
pub fn publish_linked_data(
    store: &mut GraphStore,
    out_dir: &Path,
    creator: &str,
) -> LipiResult<PublishManifest> {
    let created = chrono::Utc::now().to_rfc3339();

    let creator_literal = Literal::from(creator);
    let created_literal = Literal::new_typed_literal(created.clone(), xsd::DATE_TIME);
    let description = Literal::from(
        "Knowledge graph of ancient-script symbols and their cross-script relationships",
    );
    store.insert(TripleRef::new(ontology::DATASET, rdf::TYPE, prov::ENTITY))?;
    store.insert(TripleRef::new(
        ontology::DATASET,
        dcterms::CREATOR,
        creator_literal.as_ref(),
    ))?;
    store.insert(TripleRef::new(
        ontology::DATASET,
        dcterms::CREATED,
        created_literal.as_ref(),
    ))?;
    store.insert(TripleRef::new(
        ontology::DATASET,
        dcterms::DESCRIPTION,
        description.as_ref(),
    ))?;

    let data_dir = out_dir.join("data");
    std::fs::create_dir_all(&data_dir).map_err(|e| ExportError::Io {
        path: data_dir.clone(),
        source: e,
    })?;

    let formats = [ExportFormat::Turtle, ExportFormat::RdfXml, ExportFormat::JsonLd];
    let mut files = Vec::new();
    for format in formats {
        let file = data_dir.join(format!("knowledge_graph.{}", format.extension()));
        export_store(store, &file, Some(format))?;
        files.push(format!("data/knowledge_graph.{}", format.extension()));
    }

    let manifest = PublishManifest {
        creator: creator.to_string(),
        created,
        triples: store.len()?,
        scripts: store.count_instances(script::SCRIPT)?,
        symbols: store.count_instances(script::SYMBOL)?,
        files,
    };

    let index_path = out_dir.join("index.html");
    std::fs::write(&index_path, portal_html(&manifest)).map_err(|e| ExportError::Io {
        path: index_path,
        source: e,
    })?;

    let manifest_path = out_dir.join("manifest.json");
    let manifest_json =
        serde_json::to_string_pretty(&manifest).map_err(|e| ExportError::Json {
            message: e.to_string(),
        })?;
    std::fs::write(&manifest_path, manifest_json).map_err(|e| ExportError::Io {
        path: manifest_path,
        source: e,
    })?;

    tracing::info!(out_dir = %out_dir.display(), triples = manifest.triples, "published linked data");
    Ok(manifest)
}

fn portal_html(manifest: &PublishManifest) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Ancient Script Linked Data</title>
    <meta charset="utf-8">
</head>
<body>
    <h1>Ancient Script Linked Data</h1>
    <p>This is a FAIR dataset containing {triples} triples about ancient-script symbols.</p>
    <h2>Downloads</h2>
    <ul>
        <li><a href="data/knowledge_graph.ttl">Turtle format</a></li>
        <li><a href="data/knowledge_graph.rdf">RDF/XML format</a></li>
        <li><a href="data/knowledge_graph.jsonld">JSON-LD format</a></li>
    </ul>
    <h2>Statistics</h2>
    <ul>
        <li>Scripts: {scripts}</li>
        <li>Symbols: {symbols}</li>
    </ul>
</body>
</html>"#,
        triples = manifest.triples,
        scripts = manifest.scripts,
        symbols = manifest.symbols,
    )
}
