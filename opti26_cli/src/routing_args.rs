use std::time::Duration;

use clap::Args;
use opti26_matrix_providers::{
    fallback_policy::FallbackPolicy,
    travel_matrix_client::{DEFAULT_ROUTING_URL, TravelMatrixClient, TravelMatrixClientConfig},
};

use crate::parsers;

#[derive(Args, Debug, Clone)]
pub struct RoutingArgs {
    /// Base url of the OSRM compatible routing service
    #[arg(long, env = "OPTI26_ROUTING_URL", default_value = DEFAULT_ROUTING_URL)]
    routing_url: String,

    /// Routing request timeout (e.g., "30s", "1m", "PT45S")
    #[arg(long, value_parser = parsers::parse_timeout, default_value = "30s")]
    timeout: Duration,

    /// Distances used when the routing service fails: "zero" or "geometric"
    #[arg(long, env = "OPTI26_FALLBACK_POLICY", default_value_t = FallbackPolicy::Zero)]
    fallback: FallbackPolicy,
}

impl RoutingArgs {
    pub fn client(&self) -> TravelMatrixClient {
        TravelMatrixClient::new(TravelMatrixClientConfig {
            service_url: self.routing_url.clone(),
            timeout: self.timeout,
            fallback_policy: self.fallback,
        })
    }
}
