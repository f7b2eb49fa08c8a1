mod batch;
mod nvd;

pub use batch::{highest_from_text, BatchObserver, REQUEST_DELAY};
pub use nvd::{NvdClient, NVD_API_URL, REQUEST_TIMEOUT};
