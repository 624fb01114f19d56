//! Table schemas, the tab-separated table loader and foreign-key indexes.

mod index;
mod loader;
pub mod schema;
#[allow(clippy::module_inception)]
mod table;

pub use index::ForeignKeyIndex;
pub use loader::{unescape_field, TableLoader};
pub use schema::{SectionColumns, TableSchema};
pub use table::{MalformedRow, Table};
