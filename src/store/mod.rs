pub mod journal;
pub mod normalize;
pub mod playbook;

pub use journal::{JournalData, JournalStore};
pub use playbook::{CategoryOptions, PlaybookStore};
