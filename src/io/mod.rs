pub mod csv_export;
pub mod file;
pub mod svg_export;

pub use file::{load_session, save_session};
