use opti26_matrix_providers::{distance_matrix::DistanceMatrix, location::Location};
use serde::{Serialize, Serializer};

use crate::{
    cell::CellValue,
    error::PrepError,
    ordered_map::OrderedMap,
    workbook::{Sheet, SheetRow},
};

pub const EMPLOYEE_ID: &str = "employee_id";
pub const PICKUP_LAT: &str = "pickup_lat";
pub const PICKUP_LNG: &str = "pickup_lng";
pub const DROP_LAT: &str = "drop_lat";
pub const DROP_LNG: &str = "drop_lng";
pub const PRIORITY: &str = "priority";
pub const EARLIEST_PICKUP: &str = "earliest_pickup";
pub const LATEST_DROP: &str = "latest_drop";
pub const VEHICLE_PREFERENCE: &str = "vehicle_preference";
pub const SHARING_PREFERENCE: &str = "sharing_preference";

/// Key of the distance to the office in [`EmployeeRecord::distances`].
pub const DROP_KEY: &str = "drop";

#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinates> for Location {
    fn from(value: Coordinates) -> Self {
        Location::new(value.lng, value.lat)
    }
}

/// Rounds to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Distance {
    /// Rounded to one decimal place
    Measured(f64),
    /// The routing service failed and the zero fallback applies
    Unresolved,
}

impl Distance {
    pub fn between(matrix: &DistanceMatrix, from: usize, to: usize) -> Distance {
        if matrix.is_unresolved() {
            return Distance::Unresolved;
        }

        matrix
            .distance(from, to)
            .map(|distance| Distance::Measured(round_to_tenth(distance)))
            .unwrap_or(Distance::Unresolved)
    }
}

impl Serialize for Distance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Distance::Measured(distance) => serializer.serialize_f64(*distance),
            // unresolved distances have always been written as a plain 0
            Distance::Unresolved => serializer.serialize_u64(0),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub priority: CellValue,
    pub pickup: Coordinates,
    pub drop: Coordinates,
    pub earliest_pickup: CellValue,
    pub latest_drop: CellValue,
    pub vehicle_preference: CellValue,
    pub sharing_preference: CellValue,
    pub distances: OrderedMap<Distance>,
}

#[derive(Debug, Clone, PartialEq)]
struct EmployeeRow {
    id: String,
    pickup: Coordinates,
    drop: Coordinates,
    priority: CellValue,
    earliest_pickup: CellValue,
    latest_drop: CellValue,
    vehicle_preference: CellValue,
    sharing_preference: CellValue,
}

struct EmployeeColumns {
    id: usize,
    pickup_lat: usize,
    pickup_lng: usize,
    drop_lat: usize,
    drop_lng: usize,
    priority: usize,
    earliest_pickup: usize,
    latest_drop: usize,
    vehicle_preference: usize,
    sharing_preference: usize,
}

impl EmployeeColumns {
    fn resolve(sheet: &Sheet) -> Result<Self, PrepError> {
        Ok(EmployeeColumns {
            id: sheet.require_column(EMPLOYEE_ID)?,
            pickup_lat: sheet.require_column(PICKUP_LAT)?,
            pickup_lng: sheet.require_column(PICKUP_LNG)?,
            drop_lat: sheet.require_column(DROP_LAT)?,
            drop_lng: sheet.require_column(DROP_LNG)?,
            priority: sheet.require_column(PRIORITY)?,
            earliest_pickup: sheet.require_column(EARLIEST_PICKUP)?,
            latest_drop: sheet.require_column(LATEST_DROP)?,
            vehicle_preference: sheet.require_column(VEHICLE_PREFERENCE)?,
            sharing_preference: sheet.require_column(SHARING_PREFERENCE)?,
        })
    }
}

fn invalid_cell(sheet: &Sheet, row: &SheetRow, index: usize, expected: &'static str) -> PrepError {
    PrepError::InvalidCell {
        sheet: sheet.name().to_owned(),
        row: row.number(),
        column: sheet.headers()[index].clone(),
        value: row.cell(index).to_string(),
        expected,
    }
}

fn coordinate(sheet: &Sheet, row: &SheetRow, index: usize) -> Result<f64, PrepError> {
    row.cell(index)
        .as_f64()
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid_cell(sheet, row, index, "a number"))
}

/// Employees in row order. The row order is the distance matrix ordering,
/// followed by the office.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRoster {
    rows: Vec<EmployeeRow>,
    office: Coordinates,
}

impl EmployeeRoster {
    /// Reads a cleaned employee sheet. The office is the drop location of the first row.
    pub fn from_sheet(sheet: &Sheet) -> Result<Self, PrepError> {
        let columns = EmployeeColumns::resolve(sheet)?;

        let rows = sheet
            .rows()
            .iter()
            .map(|row| {
                let id = row
                    .cell(columns.id)
                    .to_key()
                    .ok_or_else(|| invalid_cell(sheet, row, columns.id, "a text or number identifier"))?;

                Ok(EmployeeRow {
                    id,
                    pickup: Coordinates {
                        lat: coordinate(sheet, row, columns.pickup_lat)?,
                        lng: coordinate(sheet, row, columns.pickup_lng)?,
                    },
                    drop: Coordinates {
                        lat: coordinate(sheet, row, columns.drop_lat)?,
                        lng: coordinate(sheet, row, columns.drop_lng)?,
                    },
                    priority: row.cell(columns.priority).clone(),
                    earliest_pickup: row.cell(columns.earliest_pickup).clone(),
                    latest_drop: row.cell(columns.latest_drop).clone(),
                    vehicle_preference: row.cell(columns.vehicle_preference).clone(),
                    sharing_preference: row.cell(columns.sharing_preference).clone(),
                })
            })
            .collect::<Result<Vec<_>, PrepError>>()?;

        let office = rows.first().ok_or(PrepError::EmptyRoster)?.drop;

        Ok(EmployeeRoster { rows, office })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.id.as_str())
    }

    pub fn office(&self) -> Coordinates {
        self.office
    }

    /// Index of the office in [`EmployeeRoster::locations`].
    pub fn office_index(&self) -> usize {
        self.rows.len()
    }

    /// Pickup locations in row order, then the office.
    pub fn locations(&self) -> Vec<Location> {
        self.rows
            .iter()
            .map(|row| Location::from(row.pickup))
            .chain(std::iter::once(Location::from(self.office)))
            .collect()
    }

    /// Builds the employee records from a matrix indexed like [`EmployeeRoster::locations`].
    /// A repeated identifier overwrites the earlier record and distance entry.
    pub fn into_records(self, matrix: &DistanceMatrix) -> OrderedMap<EmployeeRecord> {
        let office_index = self.office_index();
        let mut employees = OrderedMap::with_capacity(self.rows.len());

        for (i, row) in self.rows.iter().enumerate() {
            let mut distances = OrderedMap::with_capacity(self.rows.len());
            distances.insert(DROP_KEY, Distance::between(matrix, i, office_index));

            for (j, other) in self.rows.iter().enumerate() {
                if i != j {
                    distances.insert(other.id.as_str(), Distance::between(matrix, i, j));
                }
            }

            employees.insert(
                row.id.as_str(),
                EmployeeRecord {
                    priority: row.priority.clone(),
                    pickup: row.pickup,
                    drop: row.drop,
                    earliest_pickup: row.earliest_pickup.clone(),
                    latest_drop: row.latest_drop.clone(),
                    vehicle_preference: row.vehicle_preference.clone(),
                    sharing_preference: row.sharing_preference.clone(),
                    distances,
                },
            );
        }

        employees
    }
}

#[cfg(test)]
mod tests {
    use opti26_matrix_providers::distance_matrix::DistanceMatrix;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{employee_row, employee_sheet};

    fn matrix(rows: Vec<Vec<f64>>) -> DistanceMatrix {
        DistanceMatrix::from_rows(rows.len(), rows).unwrap()
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(5000.0), 5000.0);
        assert_eq!(round_to_tenth(1234.56), 1234.6);
        assert_eq!(round_to_tenth(1234.54), 1234.5);
        assert_eq!(round_to_tenth(0.0), 0.0);
    }

    #[test]
    fn test_distance_serialization() {
        assert_eq!(serde_json::to_string(&Distance::Measured(800.0)).unwrap(), "800.0");
        assert_eq!(serde_json::to_string(&Distance::Unresolved).unwrap(), "0");
    }

    #[test]
    fn test_office_is_first_row_drop() {
        let sheet = employee_sheet(vec![
            employee_row("A", (12.97, 77.59), (12.91, 77.64)),
            employee_row("B", (12.93, 77.61), (13.0, 77.7)),
        ]);

        let roster = EmployeeRoster::from_sheet(&sheet).unwrap();

        assert_eq!(roster.office(), Coordinates { lat: 12.91, lng: 77.64 });
        assert_eq!(roster.office_index(), 2);
        assert_eq!(
            roster.locations(),
            vec![
                Location::new(77.59, 12.97),
                Location::new(77.61, 12.93),
                Location::new(77.64, 12.91),
            ]
        );
    }

    #[test]
    fn test_empty_roster() {
        let sheet = employee_sheet(vec![]);

        assert!(matches!(
            EmployeeRoster::from_sheet(&sheet),
            Err(PrepError::EmptyRoster)
        ));
    }

    #[test]
    fn test_invalid_coordinate() {
        let mut row = employee_row("A", (12.97, 77.59), (12.91, 77.64));
        row[1] = CellValue::from("north");
        let sheet = employee_sheet(vec![row]);

        match EmployeeRoster::from_sheet(&sheet) {
            Err(PrepError::InvalidCell { row, column, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(column, PICKUP_LAT);
                assert_eq!(value, "north");
            }
            other => panic!("expected an invalid cell error, got {other:?}"),
        }
    }

    #[test]
    fn test_records_use_matrix_indices() {
        let sheet = employee_sheet(vec![
            employee_row("A", (12.97, 77.59), (12.91, 77.64)),
            employee_row("B", (12.93, 77.61), (12.91, 77.64)),
            employee_row("C", (12.99, 77.55), (12.91, 77.64)),
        ]);
        let roster = EmployeeRoster::from_sheet(&sheet).unwrap();
        let matrix = matrix(vec![
            vec![0.0, 1200.44, 2500.0, 9000.06],
            vec![1300.0, 0.0, 2600.55, 7000.0],
            vec![2400.0, 2700.0, 0.0, 5000.0],
            vec![9100.0, 7100.0, 5100.0, 0.0],
        ]);

        let records = roster.into_records(&matrix);

        assert_eq!(
            serde_json::to_value(records.get("A").unwrap().distances.clone()).unwrap(),
            json!({ "drop": 9000.1, "B": 1200.4, "C": 2500.0 })
        );
        assert_eq!(
            serde_json::to_value(records.get("B").unwrap().distances.clone()).unwrap(),
            json!({ "drop": 7000.0, "A": 1300.0, "C": 2600.6 })
        );
        for (id, record) in records.iter() {
            assert!(!record.distances.contains_key(id));
            assert_eq!(record.distances.len(), 3);
        }
    }

    #[test]
    fn test_unresolved_matrix_gives_zero_distances() {
        let sheet = employee_sheet(vec![
            employee_row("A", (12.97, 77.59), (12.91, 77.64)),
            employee_row("B", (12.93, 77.61), (12.91, 77.64)),
        ]);
        let roster = EmployeeRoster::from_sheet(&sheet).unwrap();

        let records = roster.into_records(&DistanceMatrix::unresolved(3));

        for record in records.values() {
            assert!(record.distances.values().all(|d| *d == Distance::Unresolved));
        }
        assert_eq!(
            serde_json::to_string(&records.get("A").unwrap().distances).unwrap(),
            r#"{"drop":0,"B":0}"#
        );
    }

    #[test]
    fn test_duplicate_ids_overwrite() {
        let sheet = employee_sheet(vec![
            employee_row("A", (12.97, 77.59), (12.91, 77.64)),
            employee_row("B", (12.93, 77.61), (12.91, 77.64)),
            employee_row("A", (12.99, 77.55), (12.91, 77.64)),
        ]);
        let roster = EmployeeRoster::from_sheet(&sheet).unwrap();
        let matrix = matrix(vec![
            vec![0.0, 10.0, 20.0, 30.0],
            vec![11.0, 0.0, 21.0, 31.0],
            vec![12.0, 22.0, 0.0, 32.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ]);

        let records = roster.into_records(&matrix);

        assert_eq!(records.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        let a = records.get("A").unwrap();
        assert_eq!(a.pickup, Coordinates { lat: 12.99, lng: 77.55 });
        // row 2 is the later "A", its own id points at row 0
        assert_eq!(
            serde_json::to_value(a.distances.clone()).unwrap(),
            json!({ "drop": 32.0, "A": 12.0, "B": 22.0 })
        );
        // B sees the later A
        assert_eq!(
            serde_json::to_value(records.get("B").unwrap().distances.clone()).unwrap(),
            json!({ "drop": 31.0, "A": 21.0 })
        );
    }
}
