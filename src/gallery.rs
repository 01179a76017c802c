//! Owning context for the gallery state: items, pagination, view mode, viewport and hero overlay.
//!
//! Methods are synchronous and return the view updates they cause; timers live in
//! [`crate::slideshow`] and the wiring in the manager task.

use tracing::{debug, info};

use crate::config::{Configuration, LayoutOptions};
use crate::events::ViewUpdate;
use crate::hero::{HeroModal, HeroTrigger};
use crate::layout::layout;
use crate::pagination::{Direction, Pagination};
use crate::store::ItemStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Gallery,
    Detail,
}

#[derive(Debug)]
pub struct Gallery {
    store: ItemStore,
    layout_options: LayoutOptions,
    pagination: Pagination,
    hero: HeroModal,
    mode: ViewMode,
    viewport_width: u32,
    /// Column count of the grid last emitted; `None` forces the next layout.
    rendered_columns: Option<usize>,
}

impl Gallery {
    pub fn new(store: ItemStore, cfg: &Configuration) -> Self {
        Self {
            store,
            layout_options: cfg.layout.clone(),
            pagination: Pagination::new(cfg.position_indicator.single_item),
            hero: HeroModal::default(),
            mode: ViewMode::Gallery,
            viewport_width: cfg.viewport_width,
            rendered_columns: None,
        }
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn current_index(&self) -> Option<usize> {
        self.pagination.current()
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// Lays the grid out for the current width, unless the same column count is already shown.
    fn relayout(&mut self) -> Option<ViewUpdate> {
        let columns = self.layout_options.columns_for_width(self.viewport_width);
        if self.rendered_columns == Some(columns) {
            return None;
        }
        self.rendered_columns = Some(columns);
        debug!(
            columns,
            width = self.viewport_width,
            items = self.store.len(),
            "gallery layout"
        );
        Some(ViewUpdate::Gallery(layout(self.store.cards(), columns)))
    }

    /// Initial render of the grid after the items are loaded.
    pub fn show_gallery(&mut self) -> Option<ViewUpdate> {
        self.mode = ViewMode::Gallery;
        self.rendered_columns = None;
        self.relayout()
    }

    /// Records the new width; the grid is only redistributed while it is on screen.
    pub fn resize(&mut self, width: u32) -> Option<ViewUpdate> {
        self.viewport_width = width;
        match self.mode {
            ViewMode::Gallery => self.relayout(),
            ViewMode::Detail => None,
        }
    }

    pub fn select(&mut self, id: usize) -> Option<ViewUpdate> {
        let view = self.pagination.select(id, &self.store)?;
        self.mode = ViewMode::Detail;
        info!(index = view.index, title = %view.title, "showing item");
        Some(ViewUpdate::Detail(view))
    }

    pub fn navigate(&mut self, direction: Direction) -> Option<ViewUpdate> {
        let view = self.pagination.step(direction, &self.store)?;
        self.mode = ViewMode::Detail;
        debug!(?direction, index = view.index, "navigated");
        Some(ViewUpdate::Detail(view))
    }

    /// Opens or closes the hero overlay for the item on the detail page.
    pub fn toggle_hero(&mut self) -> Option<ViewUpdate> {
        if self.mode != ViewMode::Detail && !self.hero.is_visible() {
            debug!("hero image requested outside the detail view");
            return None;
        }
        let current = self
            .pagination
            .current()
            .and_then(|index| self.store.get(index));
        Some(ViewUpdate::Hero(
            self.hero.toggle(HeroTrigger::ViewImage, current),
        ))
    }

    pub fn close_hero(&mut self) -> Option<ViewUpdate> {
        self.hero.close().map(ViewUpdate::Hero)
    }

    /// Leaves the detail view: closes the overlay and redraws the grid for the current width.
    pub fn go_home(&mut self) -> Vec<ViewUpdate> {
        let mut updates = Vec::new();
        if self.mode == ViewMode::Gallery {
            return updates;
        }
        updates.extend(self.close_hero());
        updates.extend(self.show_gallery());
        updates
    }
}
