pub mod json_api;

pub use json_api::{simulate_shootout, simulate_shootout_json, ShootoutRequest, ShootoutResponse};
