//! Plain-text drawing of view updates.

use crate::events::{SlideshowStatus, ViewUpdate};
use crate::hero::HeroView;
use crate::layout::ColumnLayout;
use crate::pagination::DetailView;

const BAR_WIDTH: usize = 20;

pub fn bar(percent: f32) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * BAR_WIDTH as f32).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        clamped
    )
}

pub fn gallery(layout: &ColumnLayout) -> String {
    let mut out = format!(
        "== gallery: {} items in {} column(s) ==\n",
        layout.item_count(),
        layout.column_count()
    );
    for (index, column) in layout.columns().iter().enumerate() {
        out.push_str(&format!("column {}:\n", index + 1));
        for card in column {
            out.push_str(&format!(
                "  [{}] {} by {} ({})\n",
                card.id, card.title, card.artist, card.image
            ));
        }
    }
    out
}

pub fn detail(view: &DetailView) -> String {
    let heading = match view.year {
        Some(year) => format!("{} ({year})", view.title),
        None => view.title.clone(),
    };
    let mut lines = vec![
        format!("== {}/{}: {heading} ==", view.index + 1, view.total),
        format!("artist: {} ({})", view.artist_name, view.artist_image),
        format!("image: {}", view.thumbnail),
        view.description.clone(),
        format!("source: {}", view.source),
    ];
    if let Some(position) = view.position {
        lines.push(format!("position {}", bar(position)));
    }
    lines.into_iter().map(|line| line + "\n").collect()
}

pub fn hero(view: &HeroView) -> String {
    match (view.visible, view.image.as_deref()) {
        (true, Some(image)) => format!("[hero] {image}\n"),
        (true, None) => "[hero] (no image)\n".to_string(),
        (false, _) => "[hero closed]\n".to_string(),
    }
}

pub fn status(status: SlideshowStatus) -> String {
    format!("[{}]\n", status.toggle_label())
}

pub fn progress(percent: Option<u8>) -> String {
    match percent {
        Some(p) => format!("slideshow {}\n", bar(f32::from(p))),
        None => "slideshow progress hidden\n".to_string(),
    }
}

pub fn update(update: &ViewUpdate) -> String {
    match update {
        ViewUpdate::Gallery(layout) => gallery(layout),
        ViewUpdate::Detail(view) => detail(view),
        ViewUpdate::SlideshowProgress(percent) => progress(*percent),
        ViewUpdate::SlideshowStatus(s) => status(*s),
        ViewUpdate::Hero(view) => hero(view),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;
    use crate::store::tests::store_of;

    #[test]
    fn bar_scales_and_clamps() {
        assert_eq!(bar(0.0), format!("[{}]   0%", ".".repeat(BAR_WIDTH)));
        assert_eq!(bar(50.0), format!("[{}{}]  50%", "#".repeat(10), ".".repeat(10)));
        assert_eq!(bar(250.0), format!("[{}] 100%", "#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn gallery_lists_every_column() {
        let store = store_of(3);
        let text = gallery(&layout(store.cards(), 2));
        assert!(text.starts_with("== gallery: 3 items in 2 column(s) =="));
        assert!(text.contains("column 2:\n  [1] art-1 by art-1 artist"));
    }

    #[test]
    fn detail_lists_fields_and_optional_position() {
        let mut view = DetailView {
            index: 1,
            total: 3,
            title: "Guernica".into(),
            year: Some(1937),
            thumbnail: "./guernica/thumbnail.jpg".into(),
            artist_name: "Pablo Picasso".into(),
            artist_image: "./guernica/artist.jpg".into(),
            description: "Mural.".into(),
            source: "https://example.org/guernica".into(),
            position: Some(50.0),
        };
        let text = detail(&view);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "== 2/3: Guernica (1937) ==");
        assert_eq!(lines[1], "artist: Pablo Picasso (./guernica/artist.jpg)");
        assert_eq!(lines[3], "Mural.");
        assert_eq!(lines[5], format!("position {}", bar(50.0)));
        assert!(text.ends_with('\n'));

        view.year = None;
        view.position = None;
        let text = detail(&view);
        assert!(text.starts_with("== 2/3: Guernica ==\n"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn status_uses_toggle_label() {
        assert_eq!(status(SlideshowStatus::Running), "[STOP SLIDESHOW]\n");
        assert_eq!(progress(None), "slideshow progress hidden\n");
    }
}
