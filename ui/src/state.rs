use payloads::ListingFilter;
use yewdux::prelude::*;

/// Filters chosen on each listing page. Kept in the store so they survive
/// navigating to a detail page and back.
#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    pub property_filter: ListingFilter,
    pub auction_filter: ListingFilter,
    pub vehicle_filter: ListingFilter,
}
