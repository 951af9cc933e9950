//! View models: table rows and dropdown options built from fetched data.

mod options;
mod table;

pub use options::{category_options, status_options, zone_options, SelectOption};
pub use table::{
    history_table, objects_table, zones_table, CellText, Row, TableView, HISTORY_HEADERS,
    OBJECT_HEADERS, ZONE_HEADERS,
};
