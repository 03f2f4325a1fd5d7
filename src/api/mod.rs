//! Client for the plants REST API
//!
//! Two read-only listings are exposed by the server: `plants_environments`
//! (category tags) and `plants` (paginated, tagged with environment keys).
//! Everything here is json-server flavoured: `_sort`, `_order`, `_page` and
//! `_limit` query parameters, bare JSON arrays in the response body.

pub mod client;
pub mod constants;
pub mod models;
pub mod query;
pub mod resilience;

pub use client::{PlantsApi, PlantsClient};
pub use models::{Environment, Frequency, Plant, PlantId};
pub use query::{OrderBy, Query, QueryBuilder};
pub use resilience::{RetryConfig, RetryPolicy, RetryableError};
