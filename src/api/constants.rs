//! Endpoint constants for the plants REST API

/// Resource listing environment categories
pub const ENVIRONMENTS_RESOURCE: &str = "plants_environments";

/// Resource listing plants
pub const PLANTS_RESOURCE: &str = "plants";

/// Fixed page size for plant listings
pub const PAGE_LIMIT: u32 = 8;

/// First page of any listing (pages are 1-based)
pub const FIRST_PAGE: u32 = 1;

/// json-server style query parameter names
pub mod params {
    pub const SORT: &str = "_sort";
    pub const ORDER: &str = "_order";
    pub const PAGE: &str = "_page";
    pub const LIMIT: &str = "_limit";
}

/// Standard headers sent with every request
pub mod headers {
    pub const CONTENT_TYPE_JSON: &str = "application/json";
    pub const USER_AGENT: &str = "plant-select/0.1";
}

/// Build a resource endpoint URL, tolerating a trailing slash on the base
pub fn resource_endpoint(base_url: &str, resource: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), resource)
}
