pub mod file_info;
pub mod lock_outcome;

pub use file_info::FileInfo;
pub use lock_outcome::LockOutcome;
