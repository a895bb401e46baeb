pub mod draft;
pub mod selection;
pub mod store;
pub mod types;

pub use draft::{RecordDraft, ValidDraft, MAX_GRADE, MIN_GRADE};
pub use selection::Selection;
pub use store::RecordStore;
pub use types::{FacilityRecord, RecordId};
