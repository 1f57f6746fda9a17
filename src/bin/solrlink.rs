//! solrlink CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use solrlink::cli::args::*;
use solrlink::cli::commands::*;

#[tokio::main]
async fn main() {
    let args = SolrLinkArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args).await {
        eprintln!("Error: {e}");
        if let Some(body) = e.server_body() {
            eprintln!("{body}");
        }
        process::exit(1);
    }
}
