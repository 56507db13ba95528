//! Geographic-to-pixel conversion and the export frame.

pub mod frame;
pub mod oracle;

pub use frame::{ExportFrame, is_point_in_bounds, project};
pub use oracle::{MapOracle, MercatorView};
