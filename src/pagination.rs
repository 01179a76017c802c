//! Current-index tracking for the detail view.
//!
//! The index starts unset (the gallery grid is showing) and, once navigation
//! has begun, always points inside the item list. Stepping wraps around in both
//! directions. Every transition produces a [`DetailView`] for the new index.

use tracing::{debug, warn};

use crate::config::SingleItemPosition;
use crate::store::{GalleryItem, ItemStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Everything the detail page shows for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub index: usize,
    pub total: usize,
    pub title: String,
    pub year: Option<i32>,
    pub thumbnail: String,
    pub artist_name: String,
    pub artist_image: String,
    pub description: String,
    pub source: String,
    /// Fill of the position indicator in percent; `None` hides it.
    pub position: Option<f32>,
}

impl DetailView {
    fn for_item(index: usize, total: usize, item: &GalleryItem, position: Option<f32>) -> Self {
        Self {
            index,
            total,
            title: item.name.clone(),
            year: item.year,
            thumbnail: item.images.thumbnail.clone(),
            artist_name: item.artist.name.clone(),
            artist_image: item.artist.image.clone(),
            description: item.description.clone(),
            source: item.source.clone(),
            position,
        }
    }
}

/// Percentage of the list that lies before `index`: `index / (len - 1) * 100`.
pub fn position_percent(index: usize, len: usize, single_item: SingleItemPosition) -> Option<f32> {
    match len {
        0 => None,
        1 => match single_item {
            SingleItemPosition::Full => Some(100.0),
            SingleItemPosition::Hidden => None,
        },
        _ => Some(index.min(len - 1) as f32 / (len - 1) as f32 * 100.0),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pagination {
    current: Option<usize>,
    single_item: SingleItemPosition,
}

impl Pagination {
    pub fn new(single_item: SingleItemPosition) -> Self {
        Self {
            current: None,
            single_item,
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Jumps straight to `id`. Ids outside the list are ignored.
    pub fn select(&mut self, id: usize, store: &ItemStore) -> Option<DetailView> {
        if id >= store.len() {
            warn!(id, len = store.len(), "ignoring selection outside the item list");
            return None;
        }
        self.current = Some(id);
        self.view(store)
    }

    /// Moves one step in `direction`, wrapping at both ends.
    ///
    /// From the unset state `Next` lands on the first item and `Previous` on the last.
    /// Does nothing on an empty list.
    pub fn step(&mut self, direction: Direction, store: &ItemStore) -> Option<DetailView> {
        let len = store.len();
        if len == 0 {
            debug!(?direction, "navigation on empty gallery ignored");
            return None;
        }
        let next = match (self.current, direction) {
            (None, Direction::Next) => 0,
            (None, Direction::Previous) => len - 1,
            (Some(i), Direction::Next) => (i + 1) % len,
            (Some(i), Direction::Previous) => (i + len - 1) % len,
        };
        self.current = Some(next);
        self.view(store)
    }

    pub fn next(&mut self, store: &ItemStore) -> Option<DetailView> {
        self.step(Direction::Next, store)
    }

    pub fn previous(&mut self, store: &ItemStore) -> Option<DetailView> {
        self.step(Direction::Previous, store)
    }

    /// Position indicator for the current index, if any.
    pub fn position(&self, len: usize) -> Option<f32> {
        self.current
            .and_then(|index| position_percent(index, len, self.single_item))
    }

    /// Detail view for the current index.
    pub fn view(&self, store: &ItemStore) -> Option<DetailView> {
        let index = self.current?;
        let item = store.get(index)?;
        Some(DetailView::for_item(
            index,
            store.len(),
            item,
            self.position(store.len()),
        ))
    }
}
