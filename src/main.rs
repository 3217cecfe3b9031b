//! lipigraph CLI: knowledge graphs for ancient-script symbol datasets.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use lipigraph::dataset::{KNOWN_SCRIPTS, MissingScriptPolicy};
use lipigraph::engine::{Engine, EngineConfig};
use lipigraph::features::RandomStubProvider;
use lipigraph::query::EXAMPLE_QUERIES;
use lipigraph::store::ExportFormat;

#[derive(Parser)]
#[command(name = "lipi", version, about = "Ancient-script knowledge-graph engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a knowledge graph from a dataset and save it.
    Generate {
        /// Dataset root directory (one subdirectory per script).
        #[arg(long)]
        dataset: PathBuf,

        /// Scripts to load (comma-separated directory names; defaults to
        /// the known script folders).
        #[arg(long, value_delimiter = ',')]
        scripts: Vec<String>,

        /// Output graph file (.ttl, .rdf or .jsonld).
        #[arg(long, default_value = "knowledge_graph.ttl")]
        output: PathBuf,

        /// Seed for the stub feature provider, for reproducible graphs.
        #[arg(long)]
        seed: Option<u64>,

        /// Fail when a requested script has no directory instead of skipping.
        #[arg(long)]
        strict: bool,
    },

    /// Run a SPARQL query against a saved graph.
    Query {
        /// Graph file produced by `generate` or `export`.
        #[arg(long)]
        graph: PathBuf,

        /// Query text. Mutually exclusive with --file.
        #[arg(long, conflicts_with = "file")]
        query: Option<String>,

        /// Read the query from a file.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Also export SELECT rows as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Also export CONSTRUCT/DESCRIBE triples as RDF to this path.
        #[arg(long)]
        rdf: Option<PathBuf>,

        /// RDF format for --rdf (default: by file extension).
        #[arg(long)]
        format: Option<String>,
    },

    /// Re-serialize a saved graph in another format.
    Export {
        /// Graph file to read.
        #[arg(long)]
        graph: PathBuf,

        /// Output file.
        #[arg(long)]
        output: PathBuf,

        /// Output format (default: by file extension).
        #[arg(long)]
        format: Option<String>,
    },

    /// Publish a graph as a linked-data bundle (data files + HTML portal).
    Publish {
        /// Graph file to read.
        #[arg(long)]
        graph: PathBuf,

        /// Output directory for the bundle.
        #[arg(long)]
        out_dir: PathBuf,

        /// Creator recorded in the provenance metadata.
        #[arg(long)]
        creator: Option<String>,
    },

    /// Generate a VoID description inside a graph and save it back.
    Void {
        /// Graph file to read.
        #[arg(long)]
        graph: PathBuf,

        /// Where to write the updated graph (default: in place).
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show statistics for a saved graph.
    Info {
        /// Graph file to read.
        #[arg(long)]
        graph: PathBuf,

        /// Emit statistics as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print example SPARQL queries.
    Examples,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            dataset,
            scripts,
            output,
            seed,
            strict,
        } => {
            let scripts = if scripts.is_empty() {
                KNOWN_SCRIPTS.iter().map(|s| s.to_string()).collect()
            } else {
                scripts
            };

            let config = EngineConfig {
                missing_script_policy: if strict {
                    MissingScriptPolicy::Fail
                } else {
                    MissingScriptPolicy::Skip
                },
                ..Default::default()
            };
            let mut engine = Engine::new(config)?;

            // Every loaded script is a similarity-link target for the others.
            let mut provider = match seed {
                Some(seed) => RandomStubProvider::with_seed(seed, scripts.clone()),
                None => RandomStubProvider::new(scripts.clone()),
            };

            let report = engine.generate(&dataset, &scripts, &mut provider)?;
            print!("{report}");

            engine.export(&output, None)?;
            println!("graph written to {}", output.display());
        }

        Commands::Query {
            graph,
            query,
            file,
            csv,
            rdf,
            format,
        } => {
            let text = match (query, file) {
                (Some(text), None) => text,
                (None, Some(path)) => std::fs::read_to_string(&path).into_diagnostic()?,
                _ => miette::bail!("pass a query with --query or --file"),
            };

            let engine = Engine::from_graph_file(&graph, EngineConfig::default())?;
            let result = engine.execute_query(&text)?;
            println!("{result}");

            if let Some(csv_path) = csv {
                engine.export_query_csv(&text, &csv_path)?;
                println!("CSV written to {}", csv_path.display());
            }
            if let Some(rdf_path) = rdf {
                let format = format.as_deref().map(ExportFormat::from_name).transpose()?;
                engine.export_query_rdf(&text, &rdf_path, format)?;
                println!("RDF written to {}", rdf_path.display());
            }
        }

        Commands::Export {
            graph,
            output,
            format,
        } => {
            let engine = Engine::from_graph_file(&graph, EngineConfig::default())?;
            let format = format.as_deref().map(ExportFormat::from_name).transpose()?;
            engine.export(&output, format)?;
            println!("graph written to {}", output.display());
        }

        Commands::Publish {
            graph,
            out_dir,
            creator,
        } => {
            let config = EngineConfig {
                creator: creator.unwrap_or_else(|| EngineConfig::default().creator),
                ..Default::default()
            };
            let mut engine = Engine::from_graph_file(&graph, config)?;
            let manifest = engine.publish(&out_dir)?;
            println!(
                "published {} triples ({} scripts, {} symbols) to {}",
                manifest.triples,
                manifest.scripts,
                manifest.symbols,
                out_dir.display()
            );
        }

        Commands::Void { graph, output } => {
            let mut engine = Engine::from_graph_file(&graph, EngineConfig::default())?;
            let summary = engine.void_description()?;
            print!("{summary}");

            let target = output.unwrap_or(graph);
            engine.export(&target, None)?;
            println!("graph written to {}", target.display());
        }

        Commands::Info { graph, json } => {
            let engine = Engine::from_graph_file(&graph, EngineConfig::default())?;
            let stats = engine.stats()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?);
            } else {
                print!("{stats}");
                let sample = engine.store().match_pattern(None, None, None)?;
                if !sample.is_empty() {
                    println!("  sample triples:");
                    for triple in sample.iter().take(5) {
                        println!("    {triple}");
                    }
                }
            }
        }

        Commands::Examples => {
            println!("{EXAMPLE_QUERIES}");
        }
    }

    Ok(())
}
