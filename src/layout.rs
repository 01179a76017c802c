use crate::config::LayoutOptions;
use crate::store::GalleryCard;

/// Items distributed over display columns, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout<T = GalleryCard> {
    columns: Vec<Vec<T>>,
}

impl<T> ColumnLayout<T> {
    pub fn columns(&self) -> &[Vec<T>] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of items across all columns.
    pub fn item_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }
}

/// Builds a fresh layout of `column_count` columns; item `i` lands in column `i % column_count`.
///
/// A count of zero is treated as a single column.
pub fn layout<T: Clone>(items: &[T], column_count: usize) -> ColumnLayout<T> {
    let column_count = column_count.max(1);
    let mut columns: Vec<Vec<T>> = (0..column_count)
        .map(|_| Vec::with_capacity(items.len().div_ceil(column_count)))
        .collect();
    for (index, item) in items.iter().enumerate() {
        columns[index % column_count].push(item.clone());
    }
    ColumnLayout { columns }
}

impl LayoutOptions {
    pub fn columns_for_width(&self, width: u32) -> usize {
        if width < self.tablet_min_width {
            self.mobile_columns
        } else if width < self.desktop_min_width {
            self.tablet_columns
        } else {
            self.desktop_columns
        }
    }
}
