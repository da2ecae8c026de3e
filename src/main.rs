use std::path::PathBuf;

use clap::Parser;

mod app;
mod audio;
mod catalog;
mod config;
mod notify;
mod runtime;
mod ui;

/// Search the iTunes catalog and listen to track previews in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Initial search term (defaults to `search.default_term`)
    query: Option<String>,

    /// Config file to use instead of the XDG default
    #[arg(short, long, env = "CADENZA_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    runtime::run(runtime::Options {
        query: args.query,
        config: args.config,
        print_config: args.print_config,
    })
}
