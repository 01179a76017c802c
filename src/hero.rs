use crate::store::GalleryItem;

/// Which control fired the hero overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroTrigger {
    /// The "view image" affordance on the detail page.
    ViewImage,
    /// The close control inside the overlay.
    Close,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroView {
    pub visible: bool,
    /// Large image of the item shown when the overlay was last opened.
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HeroModal {
    view: HeroView,
}

impl HeroModal {
    pub fn is_visible(&self) -> bool {
        self.view.visible
    }

    pub fn view(&self) -> &HeroView {
        &self.view
    }

    /// Flips visibility. Unless the close control fired, loads the large image of `current`.
    pub fn toggle(&mut self, trigger: HeroTrigger, current: Option<&GalleryItem>) -> HeroView {
        self.view.visible = !self.view.visible;
        if trigger != HeroTrigger::Close {
            if let Some(item) = current {
                self.view.image = Some(item.images.hero.large.clone());
            }
        }
        self.view.clone()
    }

    /// Hides the overlay. Returns `None` when it was already hidden.
    pub fn close(&mut self) -> Option<HeroView> {
        if !self.view.visible {
            return None;
        }
        Some(self.toggle(HeroTrigger::Close, None))
    }
}
