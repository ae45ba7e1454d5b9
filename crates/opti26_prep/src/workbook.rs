use std::{io::Cursor, path::Path};

use calamine::{Data, Range, Reader};
use fxhash::FxHashMap;
use tracing::{debug, instrument};

use crate::{cell::CellValue, error::PrepError, ordered_map::OrderedMap};

pub const EMPLOYEES_SHEET: &str = "employees";
pub const VEHICLES_SHEET: &str = "vehicles";
pub const BASELINE_SHEET: &str = "baseline";
pub const METADATA_SHEET: &str = "metadata";

/// One data row, `cells` are aligned with the sheet headers.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 1-based row number in the spreadsheet, used in error messages
    number: usize,
    cells: Vec<CellValue>,
}

impl SheetRow {
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> &CellValue {
        &self.cells[index]
    }

    pub fn is_complete(&self) -> bool {
        !self.cells.iter().any(CellValue::is_missing)
    }
}

/// Column name to value, in sheet column order.
pub type Record = OrderedMap<CellValue>;

/// A worksheet: a header row followed by data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    headers: Vec<String>,
    rows: Vec<SheetRow>,
}

impl Sheet {
    /// Builds a sheet whose header sits on the first spreadsheet row. Rows are
    /// padded with empty cells, or truncated, to the header width.
    pub fn new(name: impl Into<String>, headers: Vec<CellValue>, rows: Vec<Vec<CellValue>>) -> Self {
        Self::with_first_row(name, 1, headers, rows)
    }

    fn with_first_row(
        name: impl Into<String>,
        header_row_number: usize,
        headers: Vec<CellValue>,
        rows: Vec<Vec<CellValue>>,
    ) -> Self {
        let headers = column_names(&headers);
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, mut cells)| {
                cells.resize(headers.len(), CellValue::Empty);
                SheetRow {
                    number: header_row_number + index + 1,
                    cells,
                }
            })
            .collect();

        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn from_range(name: impl Into<String>, range: &Range<Data>) -> Self {
        let header_row_number = range.start().map_or(1, |(row, _)| row as usize + 1);
        let mut rows = range
            .rows()
            .map(|row| row.iter().map(CellValue::from).collect::<Vec<_>>());

        let headers = rows.next().unwrap_or_default();
        Self::with_first_row(name, header_row_number, headers, rows.collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == column)
    }

    pub fn require_column(&self, column: &str) -> Result<usize, PrepError> {
        self.column_index(column)
            .ok_or_else(|| PrepError::MissingColumn {
                sheet: self.name.clone(),
                column: column.to_owned(),
            })
    }

    /// Drops every row with at least one missing cell.
    pub fn drop_incomplete_rows(mut self) -> Self {
        let before = self.rows.len();
        self.rows.retain(SheetRow::is_complete);

        if self.rows.len() < before {
            debug!(
                sheet = %self.name,
                "Dropped {} incomplete rows, {} left",
                before - self.rows.len(),
                self.rows.len()
            );
        }

        self
    }

    pub fn records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .cloned()
                    .zip(row.cells.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

/// Names blank headers `Unnamed: <index>` and suffixes repeated names with `.1`, `.2`, ...
fn column_names(headers: &[CellValue]) -> Vec<String> {
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();

    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let name = if header.is_missing() {
                format!("Unnamed: {index}")
            } else {
                header.to_key().unwrap_or_else(|| header.to_string())
            };

            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{name}.{count}")
            };
            *count += 1;
            unique
        })
        .collect()
}

/// The four sections of an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub employees: Sheet,
    pub vehicles: Sheet,
    pub baseline: Sheet,
    pub metadata: Sheet,
}

impl Workbook {
    /// Reads the four sections. The format (xlsx, xls, xlsb or ods) comes from
    /// the file contents, the extension is ignored.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self, PrepError> {
        let contents = std::fs::read(path)?;
        let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(contents))?;
        let sheet_names = workbook.sheet_names();

        let mut read_sheet = |name: &str| -> Result<Sheet, PrepError> {
            if !sheet_names.iter().any(|sheet_name| sheet_name == name) {
                return Err(PrepError::MissingSheet(name.to_owned()));
            }
            let range = workbook.worksheet_range(name)?;
            Ok(Sheet::from_range(name, &range))
        };

        Ok(Workbook {
            employees: read_sheet(EMPLOYEES_SHEET)?,
            vehicles: read_sheet(VEHICLES_SHEET)?,
            baseline: read_sheet(BASELINE_SHEET)?,
            metadata: read_sheet(METADATA_SHEET)?,
        })
    }

    /// Applies [`Sheet::drop_incomplete_rows`] to every section.
    pub fn cleaned(self) -> Self {
        Workbook {
            employees: self.employees.drop_incomplete_rows(),
            vehicles: self.vehicles.drop_incomplete_rows(),
            baseline: self.baseline.drop_incomplete_rows(),
            metadata: self.metadata.drop_incomplete_rows(),
        }
    }
}
