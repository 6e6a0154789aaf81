pub mod csv_rows;
pub mod errors;
pub mod format;
pub mod guid;
pub mod table;

pub use guid::is_valid_guid;
pub use table::Table;
