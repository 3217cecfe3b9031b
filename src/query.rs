//! SPARQL query execution over a [`GraphStore`].
//!
//! The engine is a thin layer over oxigraph's evaluator: it gates syntax
//! errors from execution errors, classifies the query form, and shapes the
//! results into a tagged union covering the four SPARQL result kinds.

use oxigraph::model::{Term, Triple};
use oxigraph::sparql::{Query, QueryResults};

use crate::error::QueryError;
use crate::store::GraphStore;

/// The four SPARQL query forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryForm {
    Select,
    Construct,
    Ask,
    Describe,
}

/// A SELECT result: ordered variables and rows of optional bindings.
#[derive(Debug, Clone)]
pub struct TabularResult {
    pub variables: Vec<String>,
    pub rows: Vec<Vec<Option<Term>>>,
}

impl TabularResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Shaped result of a SPARQL query.
#[derive(Debug, Clone)]
pub enum QueryResult {
    Tabular(TabularResult),
    Constructed(Vec<Triple>),
    Boolean(bool),
    Described(Vec<Triple>),
}

impl QueryResult {
    /// Row or triple count; 1 for a boolean answer.
    pub fn count(&self) -> usize {
        match self {
            Self::Tabular(tab) => tab.len(),
            Self::Constructed(triples) | Self::Described(triples) => triples.len(),
            Self::Boolean(_) => 1,
        }
    }

    /// Short name of the result shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tabular(_) => "tabular",
            Self::Constructed(_) => "constructed",
            Self::Boolean(_) => "boolean",
            Self::Described(_) => "described",
        }
    }
}

/// Execute a SPARQL query against the store.
///
/// Syntax failures surface as [`QueryError::Syntax`] before any evaluation
/// happens; failures during evaluation surface as [`QueryError::Execution`].
pub fn execute(store: &GraphStore, text: &str) -> Result<QueryResult, QueryError> {
    Query::parse(text, None).map_err(|e| QueryError::Syntax {
        message: e.to_string(),
    })?;
    let form = classify(text).ok_or(QueryError::UnsupportedForm)?;

    let results = store.inner().query(text).map_err(|e| QueryError::Execution {
        message: e.to_string(),
    })?;

    match results {
        QueryResults::Solutions(solutions) => {
            let variables: Vec<String> = solutions
                .variables()
                .iter()
                .map(|v| v.as_str().to_string())
                .collect();
            let mut rows = Vec::new();
            for solution in solutions {
                let solution = solution.map_err(|e| QueryError::Execution {
                    message: e.to_string(),
                })?;
                let row = variables
                    .iter()
                    .map(|name| solution.get(name.as_str()).cloned())
                    .collect();
                rows.push(row);
            }
            Ok(QueryResult::Tabular(TabularResult { variables, rows }))
        }
        QueryResults::Boolean(answer) => Ok(QueryResult::Boolean(answer)),
        QueryResults::Graph(triples) => {
            let mut collected = Vec::new();
            for triple in triples {
                collected.push(triple.map_err(|e| QueryError::Execution {
                    message: e.to_string(),
                })?);
            }
            match form {
                QueryForm::Construct => Ok(QueryResult::Constructed(collected)),
                QueryForm::Describe => Ok(QueryResult::Described(collected)),
                _ => Err(QueryError::UnsupportedForm),
            }
        }
    }
}

/// Determine the query form from the first form keyword outside comments.
///
/// Prologue tokens (`PREFIX`, `BASE`, prefixed names, IRIs) never form a
/// standalone form keyword, so the first token that does decides the form.
pub fn classify(text: &str) -> Option<QueryForm> {
    strip_comments(text)
        .split_whitespace()
        .find_map(form_keyword)
}

/// Match a token against the form keywords. The keyword may be glued to the
/// rest of the query (`SELECT?x`, `ASK{`) but must not continue into a
/// prefixed name (`PREFIX ask: <...>` declares a prefix, not a form).
fn form_keyword(token: &str) -> Option<QueryForm> {
    const FORMS: &[(&str, QueryForm)] = &[
        ("SELECT", QueryForm::Select),
        ("CONSTRUCT", QueryForm::Construct),
        ("ASK", QueryForm::Ask),
        ("DESCRIBE", QueryForm::Describe),
    ];
    for (keyword, form) in FORMS {
        let Some(head) = token.get(..keyword.len()) else {
            continue;
        };
        if head.eq_ignore_ascii_case(keyword) {
            let continues_name = token[keyword.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || matches!(c, ':' | '_' | '-' | '.'));
            if !continues_name {
                return Some(*form);
            }
        }
    }
    None
}

/// Drop `#` comments, leaving `#` intact inside IRI refs and string literals.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let mut in_iri = false;
        let mut in_string: Option<char> = None;
        for ch in line.chars() {
            match ch {
                '<' if in_string.is_none() => in_iri = true,
                '>' if in_string.is_none() => in_iri = false,
                '"' | '\'' => match in_string {
                    Some(quote) if quote == ch => in_string = None,
                    None if !in_iri => in_string = Some(ch),
                    _ => {}
                },
                '#' if !in_iri && in_string.is_none() => break,
                _ => {}
            }
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Plain lexical form of a term: bare IRI for named nodes, bare value for
/// literals. Used by the tabular renderer and the CSV exporter.
pub fn term_to_plain(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_string(),
        Term::Literal(literal) => literal.value().to_string(),
        other => other.to_string(),
    }
}

impl std::fmt::Display for QueryResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tabular(tab) => {
                let header = tab.variables.join("\t");
                writeln!(f, "{header}")?;
                writeln!(f, "{}", "-".repeat(header.len().max(4) * 2))?;
                for row in &tab.rows {
                    let cells: Vec<String> = row
                        .iter()
                        .map(|cell| {
                            cell.as_ref()
                                .map(term_to_plain)
                                .unwrap_or_else(|| "NULL".to_string())
                        })
                        .collect();
                    writeln!(f, "{}", cells.join("\t"))?;
                }
                write!(f, "\n{} results", tab.len())
            }
            Self::Constructed(triples) => {
                writeln!(f, "Constructed Triples:\n")?;
                for triple in triples {
                    writeln!(f, "{triple}")?;
                }
                write!(f, "\n{} triples constructed", triples.len())
            }
            Self::Described(triples) => {
                writeln!(f, "Description Results:\n")?;
                for triple in triples {
                    writeln!(f, "{triple}")?;
                }
                write!(f, "\n{} triples in description", triples.len())
            }
            Self::Boolean(answer) => write!(f, "ASK Query Result: {answer}"),
        }
    }
}

/// Sample queries over the scripts ontology, in the shape users start from.
pub const EXAMPLE_QUERIES: &str = r#"# 1. Basic Symbol Inventory
PREFIX script: <http://example.org/scripts#>
SELECT ?symbol ?freq WHERE {
  ?symbol a script:Symbol ;
          script:fromScript "indus" ;
          script:symbolFrequency ?freq .
}
ORDER BY DESC(?freq)
LIMIT 10

# 2. Cross-Script Similarity
PREFIX script: <http://example.org/scripts#>
SELECT ?indusSymbol ?otherSymbol ?script ?score WHERE {
  ?indusSymbol script:fromScript "indus" ;
               script:similarTo ?otherSymbol ;
               script:similarityScore ?score .
  ?otherSymbol script:fromScript ?script .
  FILTER (?script != "indus")
}
ORDER BY DESC(?score)
LIMIT 5

# 3. Complex Glyph Identification
PREFIX script: <http://example.org/scripts#>
SELECT ?symbol ?contours WHERE {
  ?symbol script:fromScript "indus" ;
          script:contourCount ?contours .
  FILTER (?contours > 7)
}
ORDER BY DESC(?contours)"#;
