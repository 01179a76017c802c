use std::sync::Arc;

use serde::Deserialize;

/// One artwork record as delivered by the gallery document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GalleryItem {
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub description: String,
    pub source: String,
    pub artist: Artist,
    pub images: ItemImages,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Artist {
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemImages {
    pub thumbnail: String,
    pub gallery: String,
    pub hero: HeroImages,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeroImages {
    #[serde(default)]
    pub small: Option<String>,
    pub large: String,
}

/// The card drawn for an item in the gallery grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryCard {
    /// Position of the item in load order; selecting the card selects this index.
    pub id: usize,
    pub image: String,
    pub title: String,
    pub artist: String,
}

impl GalleryCard {
    pub fn for_item(id: usize, item: &GalleryItem) -> Self {
        Self {
            id,
            image: item.images.gallery.clone(),
            title: item.name.clone(),
            artist: item.artist.name.clone(),
        }
    }
}

/// Items in fetch order plus their gallery cards. Never mutated after load.
#[derive(Debug, Clone)]
pub struct ItemStore {
    items: Arc<[GalleryItem]>,
    cards: Arc<[GalleryCard]>,
}

impl ItemStore {
    pub fn new(items: Vec<GalleryItem>) -> Self {
        let cards: Vec<GalleryCard> = items
            .iter()
            .enumerate()
            .map(|(id, item)| GalleryCard::for_item(id, item))
            .collect();
        Self {
            items: items.into(),
            cards: cards.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn cards(&self) -> &[GalleryCard] {
        &self.cards
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::empty()
    }
}
