use std::path::PathBuf;

use gallery_slideshow::config::DataSource;
use gallery_slideshow::error::LoadError;
use gallery_slideshow::tasks::loader;

const DOCUMENT: &str = r#"[
  {
    "name": "Starry Night",
    "year": 1889,
    "description": "Although The Starry Night was painted during the day in Van Gogh's ground-floor studio...",
    "source": "https://en.wikipedia.org/wiki/The_Starry_Night",
    "artist": { "image": "./assets/starry-night/artist.jpg", "name": "Vincent Van Gogh" },
    "images": {
      "thumbnail": "./assets/starry-night/thumbnail.jpg",
      "hero": { "small": "./assets/starry-night/hero-small.jpg", "large": "./assets/starry-night/hero-large.jpg" },
      "gallery": "./assets/starry-night/gallery.jpg"
    }
  },
  {
    "name": "Girl with a Pearl Earring",
    "year": 1665,
    "description": "The painting is a tronie.",
    "source": "https://en.wikipedia.org/wiki/Girl_with_a_Pearl_Earring",
    "artist": { "image": "./assets/girl-with-pearl-earring/artist.jpg", "name": "Johannes Vermeer" },
    "images": {
      "thumbnail": "./assets/girl-with-pearl-earring/thumbnail.jpg",
      "hero": { "small": "./assets/girl-with-pearl-earring/hero-small.jpg", "large": "./assets/girl-with-pearl-earring/hero-large.jpg" },
      "gallery": "./assets/girl-with-pearl-earring/gallery.jpg"
    }
  }
]"#;

fn write_document(contents: &str) -> (tempfile::TempDir, DataSource) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, contents).unwrap();
    (dir, DataSource::File(path))
}

#[tokio::test]
async fn loads_items_in_document_order() {
    let (_dir, source) = write_document(DOCUMENT);
    let store = loader::load_store(&source).await;
    assert_eq!(store.len(), 2);
    assert_eq!(store.items()[0].name, "Starry Night");
    assert_eq!(store.items()[1].artist.name, "Johannes Vermeer");
    assert_eq!(store.cards()[1].id, 1);
    assert_eq!(
        store.cards()[1].image,
        "./assets/girl-with-pearl-earring/gallery.jpg"
    );
}

#[tokio::test]
async fn missing_file_yields_empty_gallery() {
    let source = DataSource::File(PathBuf::from("/definitely/not/here/data.json"));
    match loader::fetch_items(&source).await {
        Err(LoadError::Read { path, .. }) => {
            assert_eq!(path, PathBuf::from("/definitely/not/here/data.json"))
        }
        other => panic!("expected read error, got {other:?}"),
    }
    assert!(loader::load_store(&source).await.is_empty());
}

#[tokio::test]
async fn malformed_document_yields_empty_gallery() {
    let (_dir, source) = write_document(r#"{ "items": [] }"#);
    assert!(matches!(
        loader::fetch_items(&source).await,
        Err(LoadError::Decode(_))
    ));
    assert!(loader::load_store(&source).await.is_empty());
}

#[tokio::test]
async fn unreachable_url_yields_empty_gallery() {
    let source = DataSource::parse("http://127.0.0.1:9/data.json");
    assert!(matches!(source, DataSource::Url(_)));
    assert!(matches!(
        loader::fetch_items(&source).await,
        Err(LoadError::Http { .. })
    ));
    assert!(loader::load_store(&source).await.is_empty());
}

#[tokio::test]
async fn bundled_demo_document_loads() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/data.json");
    let store = loader::load_store(&DataSource::File(path)).await;
    assert_eq!(store.len(), 5);
    assert!(store.items().iter().all(|item| item.year.is_some()));
}
