pub mod names;
pub mod records;

pub use names::{MAX_WORKER_NAME_LEN, NameError, sanitize_framework, validate_worker_name};
pub use records::*;
