//! Rich diagnostic error types for the lipigraph engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know exactly what went wrong and
//! how to fix it.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the lipigraph engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source chains) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum LipiError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),
}

// ---------------------------------------------------------------------------
// Dataset errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum DatasetError {
    #[error("dataset root not found: {}", path.display())]
    #[diagnostic(
        code(lipi::dataset::root_not_found),
        help(
            "The dataset root must be a directory containing one subdirectory \
             per script (e.g. indus/, proto_elamite/). Check the path and try again."
        )
    )]
    RootNotFound { path: PathBuf },

    #[error("script directory not found: {script} (looked in {})", path.display())]
    #[diagnostic(
        code(lipi::dataset::script_not_found),
        help(
            "Strict loading was requested and a named script has no directory \
             under the dataset root. Fix the script name, or load with the \
             default skip policy to tolerate partial datasets."
        )
    )]
    ScriptNotFound { script: String, path: PathBuf },

    #[error("I/O error reading {}: {source}", path.display())]
    #[diagnostic(
        code(lipi::dataset::io),
        help("Check that the directory exists and has read permissions.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("graph store backend error: {message}")]
    #[diagnostic(
        code(lipi::store::backend),
        help("The underlying triple store reported an internal error.")
    )]
    Backend { message: String },

    #[error("unsupported RDF format: {format}")]
    #[diagnostic(
        code(lipi::store::unsupported_format),
        help("Supported formats are turtle (.ttl), rdf-xml (.rdf) and json-ld (.jsonld).")
    )]
    UnsupportedFormat { format: String },

    #[error("serialization failed: {message}")]
    #[diagnostic(
        code(lipi::store::serialize),
        help("The graph could not be written in the requested syntax.")
    )]
    Serialize { message: String },

    #[error("could not parse graph data: {message}")]
    #[diagnostic(
        code(lipi::store::parse),
        help(
            "The input is not valid in the expected RDF syntax. \
             Check the file extension matches the actual serialization."
        )
    )]
    Parse { message: String },

    #[error("I/O error on {}: {source}", path.display())]
    #[diagnostic(
        code(lipi::store::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum QueryError {
    #[error("SPARQL syntax error: {message}")]
    #[diagnostic(
        code(lipi::query::syntax),
        help("The query could not be parsed. The message above points at the offending token.")
    )]
    Syntax { message: String },

    #[error("SPARQL execution error: {message}")]
    #[diagnostic(
        code(lipi::query::execution),
        help("The query parsed but failed during evaluation.")
    )]
    Execution { message: String },

    #[error("unsupported query form")]
    #[diagnostic(
        code(lipi::query::unsupported_form),
        help("Only SELECT, CONSTRUCT, ASK and DESCRIBE queries are supported.")
    )]
    UnsupportedForm,
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("cannot export a {actual} result here: expected {expected}")]
    #[diagnostic(
        code(lipi::export::unsupported_result_type),
        help(
            "CSV export takes SELECT (tabular) results; RDF export takes \
             CONSTRUCT or DESCRIBE (triple) results."
        )
    )]
    UnsupportedResultType {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("CSV write error: {message}")]
    #[diagnostic(
        code(lipi::export::csv),
        help("Check that the output path is writable.")
    )]
    Csv { message: String },

    #[error("JSON encoding error: {message}")]
    #[diagnostic(code(lipi::export::json))]
    Json { message: String },

    #[error("I/O error writing {}: {source}", path.display())]
    #[diagnostic(
        code(lipi::export::io),
        help("Check that the output directory exists and is writable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for functions returning lipigraph results.
pub type LipiResult<T> = std::result::Result<T, LipiError>;
