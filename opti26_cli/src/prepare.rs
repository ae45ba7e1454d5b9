use std::path::{Path, PathBuf};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use opti26_matrix_providers::travel_matrix_client::TravelMatrixClient;
use opti26_prep::{domain_document::parse_spreadsheet, writer::write_document};
use tracing::{error, info};

use crate::{file_utils::spreadsheet_paths, routing_args::RoutingArgs};

#[derive(Args)]
pub struct PrepareArgs {
    /// A spreadsheet, or a folder searched recursively for spreadsheets
    #[arg(short, long)]
    input: PathBuf,

    /// Output folder for the <name>_in.json files, next to each spreadsheet by default
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    routing: RoutingArgs,
}

fn output_path(spreadsheet: &Path, output: Option<&Path>) -> PathBuf {
    let stem = spreadsheet
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "spreadsheet".to_owned());
    let dir = output
        .map(Path::to_path_buf)
        .or_else(|| spreadsheet.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    dir.join(format!("{stem}_in.json"))
}

async fn prepare(
    client: &TravelMatrixClient,
    spreadsheet: &Path,
    output: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let document = parse_spreadsheet(spreadsheet, client).await?;
    let path = output_path(spreadsheet, output);
    write_document(&path, &document)?;
    Ok(path)
}

pub async fn run(args: PrepareArgs) -> anyhow::Result<()> {
    let paths = spreadsheet_paths(&args.input)?;
    info!("Preparing {} spreadsheets", paths.len());

    let client = args.routing.client();
    let bar = ProgressBar::new(paths.len() as u64);
    bar.set_style(ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} {msg}")?);

    let mut failures = 0;
    for path in &paths {
        bar.set_message(path.display().to_string());

        match prepare(&client, path, args.output.as_deref()).await {
            Ok(written) => info!("Wrote {}", written.display()),
            Err(err) => {
                failures += 1;
                error!("Failed to prepare {}: {}", path.display(), err);
            }
        }

        bar.inc(1);
    }
    bar.finish_and_clear();

    if failures > 0 {
        anyhow::bail!("{failures} of {} spreadsheets failed", paths.len());
    }

    Ok(())
}
