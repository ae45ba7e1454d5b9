use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::{
    as_the_crow_flies::as_the_crow_flies_matrix,
    distance_matrix::DistanceMatrix,
    fallback_policy::FallbackPolicy,
    osrm_api::{OsrmMatrixClient, OsrmMatrixClientParams},
};

pub const DEFAULT_ROUTING_URL: &str = "http://router.project-osrm.org";
pub const DEFAULT_ROUTING_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct TravelMatrixClientConfig {
    /// Base url of the routing service, the table path is appended to it
    pub service_url: String,
    pub timeout: Duration,
    pub fallback_policy: FallbackPolicy,
}

impl Default for TravelMatrixClientConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_ROUTING_URL.to_owned(),
            timeout: DEFAULT_ROUTING_TIMEOUT,
            fallback_policy: FallbackPolicy::default(),
        }
    }
}

pub struct TravelMatrixClient {
    osrm_client: OsrmMatrixClient,
    fallback_policy: FallbackPolicy,
}

impl Default for TravelMatrixClient {
    fn default() -> Self {
        Self::new(TravelMatrixClientConfig::default())
    }
}

impl TravelMatrixClient {
    pub fn new(config: TravelMatrixClientConfig) -> Self {
        Self {
            osrm_client: OsrmMatrixClient::new(OsrmMatrixClientParams {
                osrm_url: config.service_url,
                timeout: config.timeout,
            }),
            fallback_policy: config.fallback_policy,
        }
    }

    /// Resolves the pairwise distances between `points`. Never fails: any routing
    /// error is logged and replaced by the fallback matrix.
    #[instrument(skip_all, fields(points = points.len()))]
    pub async fn fetch_matrix<P>(&self, points: &[P]) -> DistanceMatrix
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        match self.osrm_client.fetch_matrix(points).await {
            Ok(matrix) => {
                debug!("Routing service returned a {0}x{0} matrix", matrix.size());
                matrix
            }
            Err(err) => {
                warn!(
                    policy = %self.fallback_policy,
                    "Routing service failed, using fallback distances: {}", err
                );
                self.fallback_matrix(points)
            }
        }
    }

    pub fn fallback_matrix<P>(&self, points: &[P]) -> DistanceMatrix
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        match self.fallback_policy {
            FallbackPolicy::Zero => DistanceMatrix::unresolved(points.len()),
            FallbackPolicy::Geometric => as_the_crow_flies_matrix(points),
        }
    }
}
