//! Output writers for the cleaned article table.
//!
//! # Submodules
//!
//! - [`table`]: Renders the cleaned table as aligned text for the terminal
//! - [`json`]: Writes the cleaned table to a dated JSON file
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-10-16/
//!     ├── BBCA.json
//!     └── BBRI.json
//! ```

pub mod json;
pub mod table;
