use std::sync::Arc;

use opti26_matrix_providers::travel_matrix_client::TravelMatrixClient;

use crate::{
    config::ApiConfig,
    optimizer::{Optimizer, ProcessOptimizer},
    store::{JsonFileStore, ResultStore},
};

pub struct AppState {
    pub config: ApiConfig,
    pub matrix_client: TravelMatrixClient,
    pub optimizer: Arc<dyn Optimizer>,
    pub store: Arc<dyn ResultStore>,
}

impl AppState {
    /// Wires the external optimizer and the JSON lines store from `config`.
    pub fn from_config(config: ApiConfig) -> Self {
        Self {
            matrix_client: TravelMatrixClient::new(config.routing.clone()),
            optimizer: Arc::new(ProcessOptimizer::new(config.optimizer.clone())),
            store: Arc::new(JsonFileStore::new(config.store_path.clone())),
            config,
        }
    }
}
