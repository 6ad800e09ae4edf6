pub mod api_client;
pub mod filter;
pub mod normalize;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};
pub use filter::{Listing, ListingFilter, Selection};
pub use requests::{Blanks, MultipartSubmission, ValidationError};
pub use responses::{Auction, ErrorBody, MediaItem, Property, Vehicle};

pub use reqwest::StatusCode;

use serde::{Deserialize, Serialize};

/// Soft upper bound on staged files per form. The picker is disabled once
/// reached.
pub const MAX_STAGED_FILES: usize = 10;

/// Advisory per-file size shown next to the picker. Never enforced.
pub const MAX_FILE_SIZE_BYTES: u64 = 100 * 1024 * 1024;

/// Identifier of a backend record. The backend emits either numeric or
/// string ids; both are kept as their string form.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct ListingId(pub String);

impl From<&str> for ListingId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One of the backend collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Real-estate listings.
    Inmobiliaria,
    /// Vehicles sold by the auctioneer.
    Martillero,
    /// Auctions.
    Subastas,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Inmobiliaria => "inmobiliaria",
            Self::Martillero => "martillero",
            Self::Subastas => "subastas",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    /// Classify a declared media type. Anything that is not `video/*` is
    /// treated as an image.
    pub fn from_mime(mime: &str) -> Self {
        if mime.trim().to_ascii_lowercase().starts_with("video/") {
            Self::Video
        } else {
            Self::Image
        }
    }

    /// Parse a `tipos_archivos` tag. Unknown tags fall back to image.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("video") {
            Self::Video
        } else {
            Self::Image
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw bytes of a file picked by the user, ready to be attached to a
/// multipart request.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    /// Declared media type, e.g. `image/jpeg`.
    pub mime: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        mime: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            data,
        }
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime)
    }
}

// Payload bytes are left out so logs stay readable.
impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::MediaKind;

    #[test]
    fn media_kind_from_mime_prefix() {
        assert_eq!(MediaKind::from_mime("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("VIDEO/webm"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime(""), MediaKind::Image);
        assert_eq!(
            MediaKind::from_mime("application/octet-stream"),
            MediaKind::Image
        );
    }

    #[test]
    fn media_kind_from_tag() {
        assert_eq!(MediaKind::from_tag("video"), MediaKind::Video);
        assert_eq!(MediaKind::from_tag("image"), MediaKind::Image);
        assert_eq!(MediaKind::from_tag("pdf"), MediaKind::Image);
    }
}
