//! Query-string construction for collection URIs.
//!
//! Keys and values are form-urlencoded, so caller values may contain `&`,
//! `=`, spaces or non-ASCII text without corrupting the query.

use std::fmt;

use url::form_urlencoded;

use crate::error::{Result, TemplateError};

pub const PAGE: &str = "page";
pub const SIZE: &str = "size";
pub const SORT_BY: &str = "sortBy";
pub const SORT_ORDER: &str = "sortOrder";
pub const NAME: &str = "name";

/// Joins `pairs` into `?k=v&k2=v2`, preserving order. No pairs, no `?`.
pub fn construct_query<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if pairs.is_empty() {
        return String::new();
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    format!("?{}", serializer.finish())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison applied by one search constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientOperation {
    Eq,
    NegEq,
    Contains,
    NegContains,
    StartsWith,
    EndsWith,
}

/// One `(field, operator, value)` search triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub field: String,
    pub op: ClientOperation,
    pub value: String,
}

impl Constraint {
    pub fn new(field: impl Into<String>, op: ClientOperation, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

/// A page of a collection, optionally sorted.
///
/// A sort order without a sort field is rejected at construction, so a
/// `PageRequest` that exists can always be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort_by: Option<String>,
    sort_order: Option<SortOrder>,
}

impl PageRequest {
    pub fn new(
        page: u32,
        size: u32,
        sort_by: Option<String>,
        sort_order: Option<SortOrder>,
    ) -> Result<Self> {
        if sort_by.is_none() && sort_order.is_some() {
            return Err(TemplateError::Precondition(
                "sort order given without a sort field".to_string(),
            ));
        }
        Ok(Self {
            page,
            size,
            sort_by,
            sort_order,
        })
    }

    pub fn unsorted(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort_by: None,
            sort_order: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// `page`, `size`, then `sortBy`/`sortOrder` only when set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![(PAGE, self.page.to_string()), (SIZE, self.size.to_string())];
        if let Some(sort_by) = &self.sort_by {
            pairs.push((SORT_BY, sort_by.clone()));
        }
        if let Some(sort_order) = self.sort_order {
            pairs.push((SORT_ORDER, sort_order.as_str().to_string()));
        }
        pairs
    }
}
