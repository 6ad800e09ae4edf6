pub mod fields;
pub mod filter_select;
pub mod layout;
pub mod listing_card;
pub mod media_gallery;
pub mod media_picker;
pub mod toast;

pub use fields::{SelectField, TextArea, TextField};
pub use filter_select::FilterSelect;
pub use layout::MainLayout;
pub use listing_card::ListingCard;
pub use media_gallery::MediaGallery;
pub use media_picker::{MediaEntry, MediaPicker};
pub use toast::ToastContainer;
