//! Utility modules

pub mod html;
pub mod paths;

pub use html::escape_html;
pub use paths::{config_path, data_dir, init_data_dir, log_file_path, logs_dir, prepare_log_file, HOME_ENV};
