//! Object URL previews for picked files.

use forms::{PreviewAllocator, PreviewError};
use payloads::UploadFile;
use web_sys::{Blob, BlobPropertyBag, Url};

/// Backs each preview with a `blob:` URL. Releasing revokes it.
#[derive(Default)]
pub struct BlobUrlPreviews;

impl PreviewAllocator for BlobUrlPreviews {
    fn allocate(&self, file: &UploadFile) -> Result<String, PreviewError> {
        let bytes = js_sys::Uint8Array::from(file.data.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&file.mime);

        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| PreviewError::Unavailable(format!("{e:?}")))?;
        Url::create_object_url_with_blob(&blob)
            .map_err(|e| PreviewError::Unavailable(format!("{e:?}")))
    }

    fn release(&self, locator: &str) {
        if let Err(e) = Url::revoke_object_url(locator) {
            tracing::warn!("Failed to revoke {locator}: {e:?}");
        }
    }
}
