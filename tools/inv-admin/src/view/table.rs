//! Table models built from fetched lists.
//!
//! Tables are rebuilt from scratch on every refresh. Cells hold
//! [`CellText`], which can only be constructed through sanitization, so
//! fetched strings never reach the terminal with control characters in them.

use chrono::Local;
use shared_types::{HistoryEntry, InventoryObject, Zone, DEFAULT_STATUS};

pub const OBJECT_HEADERS: [&str; 8] = [
    "ID",
    "Name",
    "Description",
    "Zone",
    "Category",
    "Price",
    "Quantity",
    "Status",
];
pub const ZONE_HEADERS: [&str; 2] = ["ID", "Name"];
pub const HISTORY_HEADERS: [&str; 5] = ["Date", "Zone", "Object", "Action", "Comment"];

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Plain text safe to draw in a cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellText(String);

impl CellText {
    /// Whitespace controls become spaces; every other control character is dropped.
    pub fn new(raw: &str) -> Self {
        let text = raw
            .chars()
            .filter_map(|c| match c {
                '\n' | '\r' | '\t' => Some(' '),
                c if c.is_control() => None,
                c => Some(c),
            })
            .collect();
        CellText(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CellText {
    fn from(raw: &str) -> Self {
        CellText::new(raw)
    }
}

impl From<String> for CellText {
    fn from(raw: String) -> Self {
        CellText::new(&raw)
    }
}

impl std::fmt::Display for CellText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// A fetched record; `id` is what edit/delete act on.
    Data { id: Option<i64>, cells: Vec<CellText> },
    /// Shown instead of data rows when the list is empty.
    Placeholder { text: CellText, colspan: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Row>,
}

impl TableView {
    fn build<T>(
        headers: &[&'static str],
        items: &[T],
        empty: &str,
        row: impl Fn(&T) -> (Option<i64>, Vec<CellText>),
    ) -> Self {
        let rows = if items.is_empty() {
            vec![Row::Placeholder {
                text: CellText::new(empty),
                colspan: headers.len(),
            }]
        } else {
            items
                .iter()
                .map(|item| {
                    let (id, cells) = row(item);
                    Row::Data { id, cells }
                })
                .collect()
        };

        Self {
            headers: headers.to_vec(),
            rows,
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows (placeholder excluded).
    pub fn data_len(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r, Row::Data { .. }))
            .count()
    }

    /// Id of the data row at `index`, if any.
    pub fn row_id(&self, index: usize) -> Option<i64> {
        match self.rows.get(index)? {
            Row::Data { id, .. } => *id,
            Row::Placeholder { .. } => None,
        }
    }
}

fn text(value: Option<&str>) -> CellText {
    CellText::new(value.unwrap_or(""))
}

pub fn objects_table(objects: &[InventoryObject]) -> TableView {
    TableView::build(&OBJECT_HEADERS, objects, "No objects found", |o| {
        let status = if o.status.is_empty() {
            DEFAULT_STATUS
        } else {
            o.status.as_str()
        };
        let cells = vec![
            CellText::new(&o.id.to_string()),
            CellText::new(&o.name),
            text(o.description.as_deref()),
            text(o.zone_name.as_deref()),
            text(o.category.as_deref()),
            CellText::new(&o.price.to_string()),
            CellText::new(&o.quantity.to_string()),
            CellText::new(status),
        ];
        (Some(o.id), cells)
    })
}

pub fn zones_table(zones: &[Zone]) -> TableView {
    TableView::build(&ZONE_HEADERS, zones, "No zones found", |z| {
        (
            Some(z.id),
            vec![CellText::new(&z.id.to_string()), CellText::new(&z.name)],
        )
    })
}

pub fn history_table(history: &[HistoryEntry]) -> TableView {
    TableView::build(&HISTORY_HEADERS, history, "No history found", |h| {
        let date = h
            .modification_date
            .with_timezone(&Local)
            .format(DATE_FORMAT)
            .to_string();
        let cells = vec![
            CellText::new(&date),
            CellText::new(h.zone_name.as_deref().unwrap_or("N/A")),
            text(h.object_name.as_deref()),
            CellText::new(h.action_type.label()),
            text(h.comment.as_deref()),
        ];
        (Some(h.id), cells)
    })
}
