//! Data hooks shared by the pages.
//!
//! Fetch hooks return a [`FetchHookReturn`]: the last fetched data, whether a
//! request is in flight, and the message of the last failure. Data from an
//! earlier fetch stays visible while a refetch runs or after it fails.

pub mod use_fetch;
pub mod use_listings;
pub mod use_media_form;
pub mod use_title;

pub use use_fetch::{FetchHookReturn, use_fetch};
pub use use_listings::{
    use_auction, use_auctions, use_properties, use_property, use_vehicle,
    use_vehicles,
};
pub use use_media_form::{MediaFormHandle, use_media_form};
pub use use_title::use_title;

/// Distinguishes "never fetched" from "fetched and empty".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    NotFetched,
    Fetched(T),
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }
}
