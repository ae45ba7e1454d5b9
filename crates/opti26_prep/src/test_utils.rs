use jiff::civil::time;

use crate::{
    cell::CellValue,
    employee::{
        DROP_LAT, DROP_LNG, EARLIEST_PICKUP, EMPLOYEE_ID, LATEST_DROP, PICKUP_LAT, PICKUP_LNG,
        PRIORITY, SHARING_PREFERENCE, VEHICLE_PREFERENCE,
    },
    workbook::{EMPLOYEES_SHEET, Sheet, Workbook},
};

pub fn header(names: &[&str]) -> Vec<CellValue> {
    names.iter().map(|name| CellValue::from(*name)).collect()
}

/// A complete employee row, `(lat, lng)` pairs for pickup and drop.
pub fn employee_row(id: &str, pickup: (f64, f64), drop: (f64, f64)) -> Vec<CellValue> {
    vec![
        CellValue::from(id),
        CellValue::Float(pickup.0),
        CellValue::Float(pickup.1),
        CellValue::Float(drop.0),
        CellValue::Float(drop.1),
        CellValue::Int(1),
        CellValue::Time(time(8, 0, 0, 0)),
        CellValue::Time(time(9, 30, 0, 0)),
        CellValue::from("any"),
        CellValue::from("shared"),
    ]
}

pub fn employee_sheet(rows: Vec<Vec<CellValue>>) -> Sheet {
    Sheet::new(
        EMPLOYEES_SHEET,
        header(&[
            EMPLOYEE_ID,
            PICKUP_LAT,
            PICKUP_LNG,
            DROP_LAT,
            DROP_LNG,
            PRIORITY,
            EARLIEST_PICKUP,
            LATEST_DROP,
            VEHICLE_PREFERENCE,
            SHARING_PREFERENCE,
        ]),
        rows,
    )
}

/// A workbook around `employees` with one row in every other section.
pub fn workbook(employees: Sheet) -> Workbook {
    Workbook {
        employees,
        vehicles: Sheet::new(
            "vehicles",
            header(&["vehicle_id", "capacity"]),
            vec![vec![CellValue::from("V1"), CellValue::Int(4)]],
        ),
        baseline: Sheet::new(
            "baseline",
            header(&["vehicle_id", "employee_id"]),
            vec![vec![CellValue::from("V1"), CellValue::from("A")]],
        ),
        metadata: Sheet::new(
            "metadata",
            header(&["key", "value"]),
            vec![vec![CellValue::from("shift"), CellValue::from("morning")]],
        ),
    }
}
