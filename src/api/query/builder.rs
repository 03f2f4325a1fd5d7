//! QueryBuilder for fluent query construction

use super::orderby::OrderBy;
use super::query::Query;
use crate::api::constants::{self, ENVIRONMENTS_RESOURCE, PLANTS_RESOURCE};

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            query: Query::new(resource),
        }
    }

    /// Set ordering
    pub fn orderby(mut self, order: OrderBy) -> Self {
        self.query.orderby = Some(order);
        self
    }

    /// Select a 1-based page
    pub fn page(mut self, page: u32) -> Self {
        self.query.page = Some(page);
        self
    }

    /// Limit number of results per page
    pub fn limit(mut self, limit: u32) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Build the final Query object (reusable)
    pub fn build(self) -> Query {
        self.query
    }
}

// Queries used by the selection screen
impl QueryBuilder {
    /// Environments sorted by title
    pub fn environments() -> Self {
        Self::new(ENVIRONMENTS_RESOURCE).orderby(OrderBy::asc("title"))
    }

    /// One page of plants sorted by name, fixed page size
    pub fn plants_page(page: u32) -> Self {
        Self::new(PLANTS_RESOURCE)
            .orderby(OrderBy::asc("name"))
            .page(page)
            .limit(constants::PAGE_LIMIT)
    }
}
