//! Sort clauses for json-server queries

use crate::api::constants::params;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderBy {
    Asc(String),
    Desc(String),
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self::Asc(field.into())
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::Desc(field.into())
    }

    pub fn field(&self) -> &str {
        match self {
            OrderBy::Asc(field) | OrderBy::Desc(field) => field,
        }
    }

    pub fn direction(&self) -> &'static str {
        match self {
            OrderBy::Asc(_) => "asc",
            OrderBy::Desc(_) => "desc",
        }
    }

    /// `_sort` and `_order` parameter pairs
    pub fn to_params(&self) -> [(&'static str, String); 2] {
        [
            (params::SORT, self.field().to_string()),
            (params::ORDER, self.direction().to_string()),
        ]
    }
}
