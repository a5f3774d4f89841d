pub mod export;
pub mod playbook;
pub mod stats;
pub mod trades;

pub use export::*;
pub use playbook::*;
pub use stats::*;
pub use trades::*;
