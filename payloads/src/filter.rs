//! Client-side filtering of listing pages.
//!
//! The whole collection is fetched once and filtered in memory. There is no
//! pagination or sorting here; the input order is kept.

use crate::{Auction, Property, Vehicle};

/// Value used by filter selects to mean "no restriction".
pub const ALL: &str = "all";

/// One filter criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Whether a field value passes this criterion. Comparison ignores ASCII
    /// case and surrounding whitespace. A missing value only passes `All`.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value.is_some_and(|value| {
                value.trim().eq_ignore_ascii_case(wanted.trim())
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(value) => value,
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// Fields a listing exposes to the filter.
pub trait Listing {
    /// tipo (properties, vehicles) or categoria (auctions).
    fn kind(&self) -> Option<&str>;
    /// operacion (properties only).
    fn operation(&self) -> Option<&str> {
        None
    }
    /// estado (auctions, vehicles).
    fn status(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub kind: Selection,
    pub operation: Selection,
    pub status: Selection,
}

impl ListingFilter {
    pub fn matches<T: Listing>(&self, item: &T) -> bool {
        self.kind.matches(item.kind())
            && self.operation.matches(item.operation())
            && self.status.matches(item.status())
    }

    /// Items passing every criterion, in input order.
    pub fn apply<'a, T: Listing>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }

    pub fn is_unrestricted(&self) -> bool {
        *self == Self::default()
    }
}

impl Listing for Property {
    fn kind(&self) -> Option<&str> {
        Some(&self.tipo)
    }

    fn operation(&self) -> Option<&str> {
        Some(&self.operacion)
    }
}

impl Listing for Auction {
    fn kind(&self) -> Option<&str> {
        self.categoria.as_deref()
    }

    fn status(&self) -> Option<&str> {
        Some(&self.estado)
    }
}

impl Listing for Vehicle {
    fn kind(&self) -> Option<&str> {
        self.tipo.as_deref()
    }

    fn status(&self) -> Option<&str> {
        self.estado.as_deref()
    }
}
