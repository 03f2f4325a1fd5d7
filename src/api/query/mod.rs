//! Query building for the json-server style plants API
//!
//! Query (reusable) plus QueryBuilder (fluent), rendered as `_sort`,
//! `_order`, `_page` and `_limit` parameters.

pub mod builder;
pub mod orderby;
pub mod query;

pub use builder::QueryBuilder;
pub use orderby::OrderBy;
pub use query::Query;
