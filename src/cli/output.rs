//! Output formatting for CLI commands.

use serde::Serialize;
use serde_json::Value;

use crate::cli::args::{OutputFormat, SolrLinkArgs};
use crate::document::GenericDocument;
use crate::error::Result;
use crate::response::{FacetCounts, QueryResults, ResponseHeader};

/// Result of a query command.
#[derive(Debug, Serialize)]
pub struct QueryOutput {
    pub num_found: u64,
    pub start: u64,
    pub qtime_ms: Option<i64>,
    pub documents: Vec<GenericDocument>,
    #[serde(skip_serializing_if = "FacetCounts::is_empty")]
    pub facets: FacetCounts,
}

impl From<QueryResults<GenericDocument>> for QueryOutput {
    fn from(results: QueryResults<GenericDocument>) -> Self {
        QueryOutput {
            num_found: results.num_found,
            start: results.start,
            qtime_ms: results.header.as_ref().map(|h| h.qtime),
            documents: results.documents,
            facets: results.facets,
        }
    }
}

/// Result of an update command.
#[derive(Debug, Serialize)]
pub struct UpdateOutput {
    pub command: &'static str,
    pub documents: Option<usize>,
    pub status: i32,
    pub qtime_ms: i64,
}

impl UpdateOutput {
    pub fn new(command: &'static str, header: &ResponseHeader) -> Self {
        UpdateOutput {
            command,
            documents: None,
            status: header.status,
            qtime_ms: header.qtime,
        }
    }

    pub fn with_documents(mut self, count: usize) -> Self {
        self.documents = Some(count);
        self
    }
}

/// Output a query result in the selected format.
pub fn output_query(result: &QueryOutput, args: &SolrLinkArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            output_query_human(result, args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output an update result in the selected format.
pub fn output_update(result: &UpdateOutput, args: &SolrLinkArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                match result.documents {
                    Some(count) => println!(
                        "{}: {count} documents (status {}, {} ms)",
                        result.command, result.status, result.qtime_ms
                    ),
                    None => println!(
                        "{}: status {}, {} ms",
                        result.command, result.status, result.qtime_ms
                    ),
                }
            }
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_json<T: Serialize>(result: &T, args: &SolrLinkArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

fn output_query_human(result: &QueryOutput, args: &SolrLinkArgs) {
    if args.verbosity() > 0 {
        let qtime = result
            .qtime_ms
            .map(|ms| format!(" in {ms} ms"))
            .unwrap_or_default();
        println!(
            "{} documents found{qtime}, showing {} from {}",
            result.num_found,
            result.documents.len(),
            result.start
        );
    }

    for (i, document) in result.documents.iter().enumerate() {
        println!();
        println!("Document {}:", i + 1);
        for (field, value) in document.as_map() {
            println!("  {field}: {}", human_value(value));
        }
    }

    let facets = &result.facets;
    if facets.is_empty() {
        return;
    }

    println!();
    println!("Facets:");
    for (field, counts) in &facets.facet_fields {
        println!("  {field}:");
        for (term, count) in counts {
            println!("    {term}: {count}");
        }
        if let Some(missing) = facets.facet_missing.get(field) {
            println!("    (missing): {missing}");
        }
    }
    for (query, count) in &facets.facet_queries {
        println!("  {query}: {count}");
    }
    for (field, range) in &facets.facet_ranges {
        println!("  {field} (range):");
        for (bucket, count) in &range.counts {
            println!("    {bucket}: {count}");
        }
    }
}

fn human_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
