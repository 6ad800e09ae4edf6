pub mod media;
pub mod preview;
pub mod session;
pub mod submission;

pub use media::{MediaStaging, Origin, StagedFile, StagingError};
pub use preview::{MemoryPreviews, PreviewAllocator, PreviewError, PreviewHandle};
pub use session::{
    AuctionFormSession, MediaFormSession, MediaListing, PropertyFormSession,
    VehicleFormSession,
};
pub use submission::{
    Cancellation, LoadError, Outcome, Pending, SubmitError, SubmitState,
};
