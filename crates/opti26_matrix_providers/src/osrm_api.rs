use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::distance_matrix::DistanceMatrix;

#[derive(Debug, Error)]
pub enum OsrmError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Response has no distances annotation")]
    MissingDistances,

    #[error("Expected a {expected}x{expected} distance matrix")]
    MalformedMatrix { expected: usize },
}

#[derive(Deserialize)]
struct TableResponse {
    /// Distances in meters, `null` entries make the whole response invalid
    distances: Option<Vec<Vec<f64>>>,
}

pub struct OsrmMatrixClientParams {
    pub osrm_url: String,
    pub timeout: Duration,
}

pub const OSRM_TABLE_API_PATH: &str = "/table/v1/driving/";

pub struct OsrmMatrixClient {
    params: OsrmMatrixClientParams,
    client: reqwest::Client,
}

impl OsrmMatrixClient {
    pub fn new(params: OsrmMatrixClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub fn table_url<P>(&self, points: &[P]) -> String
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let coordinates = points
            .iter()
            .map(|point| {
                let point: geo_types::Point = point.into();
                format!("{},{}", point.x(), point.y())
            })
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}{}{}",
            self.params.osrm_url.trim_end_matches('/'),
            OSRM_TABLE_API_PATH,
            coordinates
        )
    }

    /// Single table request, no retry.
    pub async fn fetch_matrix<P>(&self, points: &[P]) -> Result<DistanceMatrix, OsrmError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let response = self
            .client
            .get(self.table_url(points))
            .query(&[("annotations", "distance")])
            .timeout(self.params.timeout)
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(OsrmError::Api { status, message });
        }

        let table: TableResponse = response.json().await?;
        let rows = table.distances.ok_or(OsrmError::MissingDistances)?;

        DistanceMatrix::from_rows(points.len(), rows).ok_or(OsrmError::MalformedMatrix {
            expected: points.len(),
        })
    }
}
