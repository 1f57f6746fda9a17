//! Sort orders.

use std::fmt;
use std::str::FromStr;

use crate::error::SolrLinkError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Asc => f.write_str("asc"),
            Order::Desc => f.write_str("desc"),
        }
    }
}

/// One sort criterion, rendered as `field asc|desc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    field: String,
    order: Order,
}

impl SortOrder {
    pub fn new<S: Into<String>>(field: S, order: Order) -> Self {
        SortOrder {
            field: field.into(),
            order,
        }
    }

    pub fn asc<S: Into<String>>(field: S) -> Self {
        Self::new(field, Order::Asc)
    }

    pub fn desc<S: Into<String>>(field: S) -> Self {
        Self::new(field, Order::Desc)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn order(&self) -> Order {
        self.order
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.order)
    }
}

impl FromStr for SortOrder {
    type Err = SolrLinkError;

    /// Parse `field`, `field asc` or `field desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let field = parts
            .next()
            .ok_or_else(|| SolrLinkError::invalid_argument("empty sort order"))?;
        let order = match parts.next().map(|o| o.to_ascii_lowercase()).as_deref() {
            None | Some("asc") => Order::Asc,
            Some("desc") => Order::Desc,
            Some(other) => {
                return Err(SolrLinkError::invalid_argument(format!(
                    "unknown sort direction '{other}'"
                )));
            }
        };
        if parts.next().is_some() {
            return Err(SolrLinkError::invalid_argument(format!(
                "unexpected trailing text in sort order '{s}'"
            )));
        }
        Ok(SortOrder::new(field, order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SortOrder::desc("price").to_string(), "price desc");
        assert_eq!(SortOrder::asc("score").to_string(), "score asc");
    }

    #[test]
    fn test_parse() {
        assert_eq!("price".parse::<SortOrder>().unwrap(), SortOrder::asc("price"));
        assert_eq!(
            "price DESC".parse::<SortOrder>().unwrap(),
            SortOrder::desc("price")
        );
        assert!("price sideways".parse::<SortOrder>().is_err());
        assert!("".parse::<SortOrder>().is_err());
    }
}
