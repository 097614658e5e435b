pub mod download;
pub mod frame;
pub mod loader;
pub mod value_utils;

pub use download::{DownloadOutcome, download_source, format_bytes};
pub use frame::TimeFrame;
pub use loader::{load_time_frame, parse_timestamp};
pub use value_utils::{any_to_f64, parse_f64};
