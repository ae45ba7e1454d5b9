pub mod as_the_crow_flies;
pub mod distance_matrix;
pub mod fallback_policy;
pub mod location;
pub mod osrm_api;
pub mod travel_matrix_client;
