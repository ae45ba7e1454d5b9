use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{prepare::PrepareArgs, show_matrix::ShowMatrixArgs};

mod file_utils;
mod parsers;
mod prepare;
mod routing_args;
mod show_matrix;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Writes the optimizer input JSON for spreadsheets
    #[command(visible_alias = "p")]
    Prepare {
        #[command(flatten)]
        args: PrepareArgs,
    },
    /// Prints the distance matrix of a spreadsheet's employees
    Matrix {
        #[command(flatten)]
        args: ShowMatrixArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Prepare { args }) => prepare::run(args).await?,
        Some(Commands::Matrix { args }) => show_matrix::run(args).await?,
        None => {}
    }

    Ok(())
}
