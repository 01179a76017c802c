pub mod config;
pub mod error;
pub mod events;
pub mod gallery;
pub mod hero;
pub mod layout;
pub mod pagination;
pub mod render;
pub mod slideshow;
pub mod store;
pub mod tasks {
    pub mod input;
    pub mod loader;
    pub mod manager;
    pub mod viewer;
}
