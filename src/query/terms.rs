//! Terms component parameters.

use std::fmt;

use crate::query::{QueryParam, param};

/// Ordering of enumerated terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermsSort {
    Count,
    Index,
}

impl fmt::Display for TermsSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermsSort::Count => f.write_str("count"),
            TermsSort::Index => f.write_str("index"),
        }
    }
}

/// Term enumeration request. At least one field is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermsParameters {
    pub fields: Vec<String>,
    pub prefix: Option<String>,
    pub sort: Option<TermsSort>,
    pub limit: Option<i32>,
    pub lower: Option<String>,
    pub lower_include: Option<bool>,
    pub upper: Option<String>,
    pub upper_include: Option<bool>,
    pub max_count: Option<i32>,
    pub min_count: Option<i32>,
    pub raw: Option<bool>,
    pub regex: Option<String>,
}

impl TermsParameters {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TermsParameters {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_sort(mut self, sort: TermsSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_lower<S: Into<String>>(mut self, lower: S, include: Option<bool>) -> Self {
        self.lower = Some(lower.into());
        self.lower_include = include;
        self
    }

    pub fn with_upper<S: Into<String>>(mut self, upper: S, include: Option<bool>) -> Self {
        self.upper = Some(upper.into());
        self.upper_include = include;
        self
    }

    pub fn with_count_range(mut self, min_count: Option<i32>, max_count: Option<i32>) -> Self {
        self.min_count = min_count;
        self.max_count = max_count;
        self
    }

    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = Some(raw);
        self
    }

    pub fn with_regex<S: Into<String>>(mut self, regex: S) -> Self {
        self.regex = Some(regex.into());
        self
    }

    /// Parameters in wire order. Empty strings count as unset.
    ///
    /// The field list is validated by the builder before this is called.
    pub(crate) fn parameters(&self) -> Vec<QueryParam> {
        let mut params = vec![param("terms", true)];
        params.extend(self.fields.iter().map(|f| param("terms.fl", f)));

        push_text(&mut params, "terms.prefix", &self.prefix);
        if let Some(sort) = self.sort {
            params.push(param("terms.sort", sort));
        }
        if let Some(limit) = self.limit {
            params.push(param("terms.limit", limit));
        }
        push_text(&mut params, "terms.lower", &self.lower);
        if let Some(include) = self.lower_include {
            params.push(param("terms.lower.incl", include));
        }
        push_text(&mut params, "terms.upper", &self.upper);
        if let Some(include) = self.upper_include {
            params.push(param("terms.upper.incl", include));
        }
        if let Some(max_count) = self.max_count {
            params.push(param("terms.maxcount", max_count));
        }
        if let Some(min_count) = self.min_count {
            params.push(param("terms.mincount", min_count));
        }
        if let Some(raw) = self.raw {
            params.push(param("terms.raw", raw));
        }
        push_text(&mut params, "terms.regex", &self.regex);
        params
    }
}

fn push_text(params: &mut Vec<QueryParam>, name: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        params.push(param(name, value));
    }
}
