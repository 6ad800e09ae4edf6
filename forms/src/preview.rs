//! Local previews of files picked but not yet uploaded.
//!
//! A [`PreviewHandle`] owns one allocation and gives it back when dropped,
//! so a handle is released exactly once and can't be used afterwards.

use payloads::UploadFile;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("No se pudo generar la vista previa: {0}")]
    Unavailable(String),
}

/// Source of preview locators. In the browser these are object URLs.
pub trait PreviewAllocator {
    /// Allocate a locator the view can render `file` from.
    fn allocate(&self, file: &UploadFile) -> Result<String, PreviewError>;

    fn release(&self, locator: &str);
}

pub struct PreviewHandle {
    locator: String,
    allocator: Rc<dyn PreviewAllocator>,
}

impl PreviewHandle {
    pub fn allocate(
        allocator: &Rc<dyn PreviewAllocator>,
        file: &UploadFile,
    ) -> Result<Self, PreviewError> {
        let locator = allocator.allocate(file)?;
        Ok(Self {
            locator,
            allocator: allocator.clone(),
        })
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.allocator.release(&self.locator);
    }
}

impl std::fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PreviewHandle").field(&self.locator).finish()
    }
}

/// Allocator that keeps previews as `mem://` locators and tracks which are
/// still outstanding. Used natively and in tests.
#[derive(Default)]
pub struct MemoryPreviews {
    live: RefCell<HashSet<String>>,
    allocated: Cell<usize>,
    released: Cell<usize>,
    stray_releases: Cell<usize>,
    fail_after: Cell<Option<usize>>,
}

impl MemoryPreviews {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Make every allocation after the next `n` fail.
    pub fn fail_after(&self, n: usize) {
        self.fail_after.set(Some(self.allocated.get() + n));
    }

    pub fn outstanding(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn allocated(&self) -> usize {
        self.allocated.get()
    }

    pub fn released(&self) -> usize {
        self.released.get()
    }

    /// Releases of locators that weren't outstanding.
    pub fn stray_releases(&self) -> usize {
        self.stray_releases.get()
    }

    pub fn is_live(&self, locator: &str) -> bool {
        self.live.borrow().contains(locator)
    }
}

impl PreviewAllocator for MemoryPreviews {
    fn allocate(&self, file: &UploadFile) -> Result<String, PreviewError> {
        if self
            .fail_after
            .get()
            .is_some_and(|limit| self.allocated.get() >= limit)
        {
            return Err(PreviewError::Unavailable(file.file_name.clone()));
        }
        let locator = format!("mem://{}", uuid::Uuid::new_v4().simple());
        self.live.borrow_mut().insert(locator.clone());
        self.allocated.set(self.allocated.get() + 1);
        Ok(locator)
    }

    fn release(&self, locator: &str) {
        if self.live.borrow_mut().remove(locator) {
            self.released.set(self.released.get() + 1);
        } else {
            tracing::warn!("Release of unknown preview {locator}");
            self.stray_releases.set(self.stray_releases.get() + 1);
        }
    }
}
