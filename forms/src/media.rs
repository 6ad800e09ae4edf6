use crate::preview::{PreviewAllocator, PreviewError, PreviewHandle};
use payloads::responses::MediaRefs;
use payloads::{MAX_STAGED_FILES, MediaKind, UploadFile};
use std::rc::Rc;

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("No se pudo procesar el archivo {file_name}")]
    Preview {
        file_name: String,
        #[source]
        source: PreviewError,
    },
}

#[derive(Debug)]
pub enum Origin {
    /// Already stored by the backend. Never re-sent.
    Existing { url: String },
    /// Picked in this session, waiting to be uploaded.
    New {
        file: UploadFile,
        preview: PreviewHandle,
    },
}

/// One entry of the media list shown by an admin form.
#[derive(Debug)]
pub struct StagedFile {
    pub display_name: String,
    pub kind: MediaKind,
    origin: Origin,
}

impl StagedFile {
    /// Where the view renders the entry from: the stored url, or the local
    /// preview for new files.
    pub fn locator(&self) -> &str {
        match &self.origin {
            Origin::Existing { url } => url,
            Origin::New { preview, .. } => preview.locator(),
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self.origin, Origin::New { .. })
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }
}

/// Ordered media of one form session.
///
/// Entries stay in the order they were loaded or picked, which is also the
/// order new files are uploaded in. Dropping the staging releases every
/// outstanding preview.
pub struct MediaStaging {
    entries: Vec<StagedFile>,
    previews: Rc<dyn PreviewAllocator>,
    capacity: usize,
}

impl MediaStaging {
    pub fn new(previews: Rc<dyn PreviewAllocator>) -> Self {
        Self {
            entries: Vec::new(),
            previews,
            capacity: MAX_STAGED_FILES,
        }
    }

    /// Replace the entries with the stored media of a fetched record.
    pub fn initialize_from_remote(&mut self, media: &MediaRefs) {
        self.entries = media
            .items()
            .into_iter()
            .map(|item| StagedFile {
                display_name: item.name,
                kind: item.kind,
                origin: Origin::Existing { url: item.url },
            })
            .collect();
    }

    /// Stage picked files in order, allocating a preview for each.
    ///
    /// Returns how many files were staged. Files past the capacity are left
    /// out. If a preview can't be allocated the call stops there; files
    /// staged before it are kept.
    pub fn append(
        &mut self,
        files: impl IntoIterator<Item = UploadFile>,
    ) -> Result<usize, StagingError> {
        let mut staged = 0;
        for file in files {
            if self.is_full() {
                tracing::warn!(
                    "Media list is full, not staging {}",
                    file.file_name
                );
                continue;
            }
            let preview = PreviewHandle::allocate(&self.previews, &file)
                .map_err(|source| StagingError::Preview {
                    file_name: file.file_name.clone(),
                    source,
                })?;
            self.entries.push(StagedFile {
                display_name: file.file_name.clone(),
                kind: file.kind(),
                origin: Origin::New { file, preview },
            });
            staged += 1;
        }
        Ok(staged)
    }

    /// Remove the entry at `index`, releasing its preview if it has one.
    /// Returns the removed entry's name. Out of range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        if index >= self.entries.len() {
            tracing::warn!(
                "Ignoring removal of media {index}, only {} staged",
                self.entries.len()
            );
            return None;
        }
        let StagedFile {
            display_name,
            origin,
            ..
        } = self.entries.remove(index);
        drop(origin);
        Some(display_name)
    }

    /// Drop every entry, releasing all outstanding previews.
    pub fn release_all(&mut self) {
        self.entries.clear();
    }

    /// Files to upload, in staging order.
    pub fn new_files(&self) -> Vec<UploadFile> {
        self.entries
            .iter()
            .filter_map(|entry| match &entry.origin {
                Origin::New { file, .. } => Some(file.clone()),
                Origin::Existing { .. } => None,
            })
            .collect()
    }

    pub fn existing_urls(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|entry| match &entry.origin {
                Origin::Existing { url } => Some(url.as_str()),
                Origin::New { .. } => None,
            })
            .collect()
    }

    pub fn entries(&self) -> &[StagedFile] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The picker is disabled once this is true. Removal is always allowed.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.entries.len())
    }
}
