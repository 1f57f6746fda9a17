//! Command line argument parsing for the solrlink CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// solrlink - query and update a Solr core from the command line
#[derive(Parser, Debug, Clone)]
#[command(name = "solrlink")]
#[command(about = "Query and update a Solr core")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SolrLinkArgs {
    /// Core URL, e.g. http://localhost:8983/solr/products
    #[arg(short, long, env = "SOLRLINK_URL")]
    pub url: Option<String>,

    /// Client configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SolrLinkArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run a query
    Query(QueryArgs),

    /// Add documents from a JSON or JSON lines file
    Add(AddArgs),

    /// Commit pending updates
    Commit(CommitArgs),

    /// Discard updates since the last commit
    Rollback,
}

/// Arguments for a query
#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Query expression
    #[arg(value_name = "QUERY", default_value = "*:*")]
    pub query: String,

    /// Offset of the first document
    #[arg(long)]
    pub start: Option<u64>,

    /// Number of documents to return
    #[arg(short, long)]
    pub rows: Option<u64>,

    /// Fields to return (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Filter query (repeatable)
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Sort order such as "price desc" (repeatable)
    #[arg(long = "sort")]
    pub sort: Vec<String>,

    /// Field to facet on (repeatable)
    #[arg(long = "facet-field")]
    pub facet_fields: Vec<String>,

    /// Facet query (repeatable)
    #[arg(long = "facet-query")]
    pub facet_queries: Vec<String>,

    /// Minimum count of a facet term
    #[arg(long)]
    pub facet_min_count: Option<u32>,

    /// Maximum number of facet terms per field
    #[arg(long)]
    pub facet_limit: Option<i32>,
}

/// Arguments for adding documents
#[derive(Parser, Debug, Clone)]
pub struct AddArgs {
    /// Document file path (JSON array, JSON object or JSON lines)
    #[arg(value_name = "DOCUMENT_FILE")]
    pub document_file: PathBuf,

    /// Commit within this many milliseconds
    #[arg(long)]
    pub commit_within: Option<u64>,

    /// Do not replace documents with the same unique key
    #[arg(long)]
    pub no_overwrite: bool,

    /// Commit after adding
    #[arg(long)]
    pub commit: bool,
}

/// Arguments for a commit
#[derive(Parser, Debug, Clone)]
pub struct CommitArgs {
    /// Return without waiting for a new searcher
    #[arg(long)]
    pub no_wait_searcher: bool,

    /// Merge away segments with deletes
    #[arg(long)]
    pub expunge_deletes: bool,

    /// Optimize down to at most this many segments
    #[arg(long)]
    pub max_segments: Option<u32>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_arguments() {
        let args = SolrLinkArgs::parse_from([
            "solrlink",
            "--url",
            "http://localhost:8983/solr/core",
            "query",
            "title:rust",
            "--rows",
            "5",
            "--fields",
            "id,title",
            "--filter",
            "in_stock:true",
            "--sort",
            "price desc",
            "--facet-field",
            "color",
        ]);

        assert_eq!(args.verbosity(), 1);
        match args.command {
            Command::Query(query) => {
                assert_eq!(query.query, "title:rust");
                assert_eq!(query.rows, Some(5));
                assert_eq!(query.fields, vec!["id", "title"]);
                assert_eq!(query.filters, vec!["in_stock:true"]);
                assert_eq!(query.sort, vec!["price desc"]);
                assert_eq!(query.facet_fields, vec!["color"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args = SolrLinkArgs::parse_from(["solrlink", "-vv", "-q", "rollback"]);
        assert_eq!(args.verbosity(), 0);
        assert!(matches!(args.command, Command::Rollback));
    }

    #[test]
    fn test_default_query_matches_everything() {
        let args = SolrLinkArgs::parse_from(["solrlink", "-f", "json", "query"]);
        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::Query(query) => assert_eq!(query.query, "*:*"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
