//! Reusable Query object
//!
//! Represents a listing request against one resource that can be executed
//! repeatedly, e.g. once per page.

use super::orderby::OrderBy;
use crate::api::constants::{self, params};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub resource: String,
    pub orderby: Option<OrderBy>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl Query {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            orderby: None,
            page: None,
            limit: None,
        }
    }

    /// Query parameters in the order json-server documents them
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(orderby) = &self.orderby {
            for (key, value) in orderby.to_params() {
                params.push((key.to_string(), value));
            }
        }

        if let Some(page) = self.page {
            params.push((params::PAGE.to_string(), page.to_string()));
        }

        if let Some(limit) = self.limit {
            params.push((params::LIMIT.to_string(), limit.to_string()));
        }

        params
    }

    /// Generate the full request URL
    pub fn to_url(&self, base_url: &str) -> String {
        let mut url = constants::resource_endpoint(base_url, &self.resource);
        let params = self.to_query_params();

        if !params.is_empty() {
            let encoded: Vec<String> = params
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&encoded.join("&"));
        }

        url
    }
}
