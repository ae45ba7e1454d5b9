use std::path::Path;

use opti26_matrix_providers::{
    distance_matrix::DistanceMatrix, travel_matrix_client::TravelMatrixClient,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    employee::{EmployeeRecord, EmployeeRoster},
    error::PrepError,
    ordered_map::OrderedMap,
    workbook::{Record, Workbook},
};

/// The optimizer input: employees keyed by identifier, the other sections as
/// lists of row records.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DomainDocument {
    pub employees: OrderedMap<EmployeeRecord>,
    pub vehicles: Vec<Record>,
    pub baseline: Vec<Record>,
    pub metadata: Vec<Record>,
}

impl DomainDocument {
    /// Cleans every section, resolves the distances between the employees and
    /// the office, and assembles the document.
    #[instrument(skip_all)]
    pub async fn from_workbook(
        workbook: Workbook,
        client: &TravelMatrixClient,
    ) -> Result<Self, PrepError> {
        let workbook = workbook.cleaned();
        let roster = EmployeeRoster::from_sheet(&workbook.employees)?;

        let locations = roster.locations();
        let matrix = client.fetch_matrix(&locations).await;

        info!(
            employees = roster.len(),
            vehicles = workbook.vehicles.len(),
            source = ?matrix.source(),
            "Assembled domain document"
        );

        Ok(Self::assemble(roster, &matrix, &workbook))
    }

    /// `matrix` must be indexed like [`EmployeeRoster::locations`].
    pub fn assemble(roster: EmployeeRoster, matrix: &DistanceMatrix, workbook: &Workbook) -> Self {
        DomainDocument {
            employees: roster.into_records(matrix),
            vehicles: workbook.vehicles.records(),
            baseline: workbook.baseline.records(),
            metadata: workbook.metadata.records(),
        }
    }
}

/// Reads the spreadsheet at `path` and builds its [`DomainDocument`].
pub async fn parse_spreadsheet(
    path: &Path,
    client: &TravelMatrixClient,
) -> Result<DomainDocument, PrepError> {
    let workbook = Workbook::open(path)?;
    DomainDocument::from_workbook(workbook, client).await
}
