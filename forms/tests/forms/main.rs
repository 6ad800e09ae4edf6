mod auction;
mod property;
mod vehicle;

use forms::{MemoryPreviews, PreviewAllocator};
use std::rc::Rc;

/// Browser-free preview allocator, plus the same allocator as the trait
/// object sessions take.
fn previews() -> (Rc<MemoryPreviews>, Rc<dyn PreviewAllocator>) {
    let previews = MemoryPreviews::new();
    let allocator: Rc<dyn PreviewAllocator> = previews.clone();
    (previews, allocator)
}
