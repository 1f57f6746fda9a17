//! Command implementations for the solrlink CLI.

use std::fs;

use log::debug;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::client::SolrClient;
use crate::command::{AddParameters, CommitOptions};
use crate::config::ClientConfig;
use crate::document::GenericDocument;
use crate::error::Result;
use crate::query::{FacetFieldQuery, FacetParameters, FacetQuery, Query, QueryOptions, SortOrder};

/// Execute a CLI command.
pub async fn execute_command(args: SolrLinkArgs) -> Result<()> {
    let client = SolrClient::<GenericDocument>::new(load_config(&args)?)?;

    match &args.command {
        Command::Query(query_args) => run_query(&client, query_args, &args).await,
        Command::Add(add_args) => add_documents(&client, add_args, &args).await,
        Command::Commit(commit_args) => commit(&client, commit_args, &args).await,
        Command::Rollback => {
            let header = client.rollback().await?;
            output_update(&UpdateOutput::new("rollback", &header), &args)
        }
    }
}

/// Configuration file first, then `--url`.
fn load_config(args: &SolrLinkArgs) -> Result<ClientConfig> {
    let config = match &args.config {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            ClientConfig::from_file(path)?
        }
        None => ClientConfig::default().with_env_overrides(),
    };
    match &args.url {
        Some(url) => ClientConfig {
            base_url: url.clone(),
            ..config
        }
        .validated(),
        None => config.validated(),
    }
}

/// Translate query arguments into query options.
pub fn query_options(args: &QueryArgs) -> Result<QueryOptions> {
    let mut options = QueryOptions::new().with_fields(args.fields.iter().cloned());
    if let Some(start) = args.start {
        options = options.with_start(start);
    }
    if let Some(rows) = args.rows {
        options = options.with_rows(rows);
    }
    for filter in &args.filters {
        options = options.with_filter(filter.as_str());
    }
    for sort in &args.sort {
        options = options.with_order(sort.parse::<SortOrder>()?);
    }

    let facets: Vec<FacetQuery> = args
        .facet_fields
        .iter()
        .map(|field| FacetQuery::Field(FacetFieldQuery::new(field.as_str())))
        .chain(args.facet_queries.iter().map(|q| FacetQuery::query(q.as_str())))
        .collect();
    if !facets.is_empty() {
        let mut facet = FacetParameters::new(facets);
        if let Some(min_count) = args.facet_min_count {
            facet = facet.with_min_count(min_count);
        }
        if let Some(limit) = args.facet_limit {
            facet = facet.with_limit(limit);
        }
        options = options.with_facet(facet);
    }

    Ok(options)
}

async fn run_query(
    client: &SolrClient<GenericDocument>,
    args: &QueryArgs,
    cli_args: &SolrLinkArgs,
) -> Result<()> {
    let options = query_options(args)?;
    let results = client.query(&Query::raw(args.query.as_str()), &options).await?;
    output_query(&QueryOutput::from(results), cli_args)
}

async fn add_documents(
    client: &SolrClient<GenericDocument>,
    args: &AddArgs,
    cli_args: &SolrLinkArgs,
) -> Result<()> {
    let content = fs::read_to_string(&args.document_file)?;
    let documents = GenericDocument::parse_many(&content)?;
    debug!(
        "read {} documents from {}",
        documents.len(),
        args.document_file.display()
    );

    let mut parameters = AddParameters::new();
    if let Some(millis) = args.commit_within {
        parameters = parameters.with_commit_within(millis);
    }
    if args.no_overwrite {
        parameters = parameters.with_overwrite(false);
    }

    let header = client.add_range(&documents, parameters).await?;
    output_update(
        &UpdateOutput::new("add", &header).with_documents(documents.len()),
        cli_args,
    )?;

    if args.commit {
        let header = client.commit(CommitOptions::default()).await?;
        output_update(&UpdateOutput::new("commit", &header), cli_args)?;
    }
    Ok(())
}

async fn commit(
    client: &SolrClient<GenericDocument>,
    args: &CommitArgs,
    cli_args: &SolrLinkArgs,
) -> Result<()> {
    let mut options = CommitOptions::new();
    if args.no_wait_searcher {
        options = options.with_wait_searcher(false);
    }
    if args.expunge_deletes {
        options = options.with_expunge_deletes(true);
    }
    if let Some(max_segments) = args.max_segments {
        options = options.with_max_segments(max_segments);
    }

    let header = client.commit(options).await?;
    output_update(&UpdateOutput::new("commit", &header), cli_args)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::query::QueryParameterBuilder;

    fn query_args(argv: &[&str]) -> QueryArgs {
        let mut full = vec!["solrlink", "query"];
        full.extend_from_slice(argv);
        match SolrLinkArgs::parse_from(full).command {
            Command::Query(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_query_options_from_arguments() {
        let args = query_args(&[
            "--rows",
            "10",
            "--sort",
            "price desc",
            "--facet-field",
            "color",
            "--facet-query",
            "price:[0 TO 10]",
            "--facet-min-count",
            "1",
        ]);
        let options = query_options(&args).unwrap();
        let params: Vec<_> = QueryParameterBuilder::new()
            .build(&Query::all(), &options)
            .unwrap()
            .collect();
        let names: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["q", "rows", "facet", "facet.field", "facet.query", "facet.mincount", "sort"]
        );
    }

    #[test]
    fn test_bad_sort_is_rejected() {
        let args = query_args(&["--sort", "price sideways"]);
        assert!(query_options(&args).is_err());
    }

    #[test]
    fn test_url_argument_overrides_default() {
        let args = SolrLinkArgs::parse_from([
            "solrlink",
            "--url",
            "http://search:8983/solr/items",
            "rollback",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.base_url, "http://search:8983/solr/items");
    }
}
