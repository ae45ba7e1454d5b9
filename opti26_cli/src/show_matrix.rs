use std::path::PathBuf;

use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use opti26_matrix_providers::distance_matrix::DistanceMatrix;
use opti26_prep::{employee::EmployeeRoster, workbook::Workbook};
use tracing::info;

use crate::routing_args::RoutingArgs;

#[derive(Args)]
pub struct ShowMatrixArgs {
    /// The spreadsheet to resolve distances for
    #[arg(short, long)]
    input: PathBuf,

    #[command(flatten)]
    routing: RoutingArgs,
}

fn matrix_table(labels: &[String], matrix: &DistanceMatrix) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec![String::new()];
    header.extend(labels.iter().cloned());
    table.set_header(header);

    for (label, row) in labels.iter().zip(matrix.rows()) {
        let mut cells = vec![label.clone()];
        cells.extend(row.iter().map(|distance| format!("{distance:.1}")));
        table.add_row(cells);
    }

    table
}

pub async fn run(args: ShowMatrixArgs) -> anyhow::Result<()> {
    let workbook = Workbook::open(&args.input)?.cleaned();
    let roster = EmployeeRoster::from_sheet(&workbook.employees)?;

    let matrix = args.routing.client().fetch_matrix(&roster.locations()).await;
    info!("Distances from {:?} matrix", matrix.source());

    let mut labels: Vec<String> = roster.ids().map(str::to_owned).collect();
    labels.push("office".to_owned());

    println!("{}", matrix_table(&labels, &matrix));

    Ok(())
}
