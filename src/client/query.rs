// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Query-string construction for list filters.
//!
//! Parameters appear in the order they are pushed, which is the field order
//! of each filter struct. Absent values and empty strings are skipped
//! entirely; numbers are stringified. An empty query leaves the path alone.

use std::fmt::Display;

use url::form_urlencoded;

/// Filter bag that knows how to render itself as query parameters.
pub trait QueryFilters {
    fn to_query(&self) -> QueryString;
}

impl<F: QueryFilters + ?Sized> QueryFilters for &F {
    fn to_query(&self) -> QueryString {
        (**self).to_query()
    }
}

impl<F: QueryFilters> QueryFilters for Option<F> {
    fn to_query(&self) -> QueryString {
        self.as_ref().map(QueryFilters::to_query).unwrap_or_default()
    }
}

/// `limit`/`offset` window shared by every list filter. Always rendered
/// after the resource-specific fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    pub fn append_to(&self, query: QueryString) -> QueryString {
        query
            .number("limit", self.limit)
            .number("offset", self.offset)
    }
}

/// `"{collection}/{id}"` with `id` percent-encoded as a single path segment,
/// so `/`, `?` or `#` in an id cannot reach another endpoint.
pub fn resource_path(collection: &str, id: &str) -> String {
    let segment: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
    // byte_serialize uses form encoding, where `+` stands for a space.
    format!("{collection}/{}", segment.replace('+', "%20"))
}

/// Ordered, percent-encoded query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text parameter when it is present and non-empty.
    pub fn text(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Add a numeric (or any displayable) parameter when it is present.
    pub fn number<N: Display>(mut self, key: &'static str, value: Option<N>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `key=value&...` without a leading `?`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }

    /// Append this query to `path`, adding `?` only when there is something to add.
    pub fn apply(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", self.encode())
        }
    }
}
