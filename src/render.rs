/// Rendering helpers: batch planning, labels, cover fallback and scroll-edge blur

use crate::manga_data::Manga;
use crate::settings::Theme;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::ops::Range;

/// Tunables for list rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Entries appended per animation frame
    pub batch_size: usize,
    pub debounce_ms: u32,
    pub title_max_chars: usize,
    /// Lists this long or shorter never show blur indicators
    pub overflow_threshold: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            batch_size: 3,
            debounce_ms: 100,
            title_max_chars: 20,
            overflow_threshold: 3,
        }
    }
}

/// Splits a list of `total` entries into consecutive batches.
///
/// The list component pulls one batch per animation frame until exhausted.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchLoader {
    total: usize,
    batch_size: usize,
    loaded: usize,
}

impl BatchLoader {
    pub fn new(total: usize, batch_size: usize) -> Self {
        BatchLoader {
            total,
            batch_size: batch_size.max(1),
            loaded: 0,
        }
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn is_done(&self) -> bool {
        self.loaded >= self.total
    }
}

impl Iterator for BatchLoader {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.is_done() {
            return None;
        }
        let start = self.loaded;
        self.loaded = (start + self.batch_size).min(self.total);
        Some(start..self.loaded)
    }
}

/// Shorten `title` to `max_chars` characters, marking the cut with an ellipsis
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }
    let kept: String = title.chars().take(max_chars).collect();
    format!("{}…", kept)
}

pub fn chapter_label(read_chapters: u32) -> String {
    format!("Ch. {}", read_chapters)
}

pub fn format_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%Y-%m-%d").to_string()
}

/// Image source for an entry's cover
pub fn cover_src(manga: &Manga, theme: Theme) -> String {
    if manga.is_image_working && !manga.image.is_empty() {
        manga.image.clone()
    } else {
        theme.placeholder_image().to_string()
    }
}

/// Scroll position of the list container, as read from the DOM
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

/// Visibility of the top and bottom gradient indicators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlurState {
    pub top: bool,
    pub bottom: bool,
}

impl BlurState {
    pub fn compute(metrics: ScrollMetrics, list_len: usize, config: &RenderConfig) -> BlurState {
        if list_len <= config.overflow_threshold {
            return BlurState::default();
        }

        // Sub-pixel scroll offsets happen on zoomed displays
        let at_top = metrics.scroll_top <= 0.5;
        let at_bottom = metrics.scroll_top + metrics.client_height >= metrics.scroll_height - 0.5;

        BlurState {
            top: !at_top,
            bottom: !at_bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_seven_records_batch_of_three() {
        let batches: Vec<Range<usize>> = BatchLoader::new(7, 3).collect();
        assert_eq!(batches, vec![0..3, 3..6, 6..7]);
    }

    #[test]
    fn test_batch_loader_progress() {
        let mut loader = BatchLoader::new(4, 3);
        assert!(!loader.is_done());
        loader.next();
        assert_eq!(loader.loaded(), 3);
        loader.next();
        assert!(loader.is_done());
        assert_eq!(loader.next(), None);
    }

    #[test]
    fn test_batch_loader_edge_sizes() {
        assert_eq!(BatchLoader::new(0, 3).count(), 0);
        assert_eq!(BatchLoader::new(2, 0).collect::<Vec<_>>(), vec![0..1, 1..2]);
        assert_eq!(BatchLoader::new(3, 3).collect::<Vec<_>>(), vec![0..3]);
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("Short", 20), "Short");
        assert_eq!(truncate_title("Exactly twenty chars", 20), "Exactly twenty chars");
        assert_eq!(
            truncate_title("The Promised Neverland", 20),
            "The Promised Neverla…"
        );
        assert_eq!(truncate_title("進撃の巨人進撃の巨人進撃の巨人進撃の巨人進撃", 20).chars().count(), 21);
    }

    #[test]
    fn test_chapter_label() {
        assert_eq!(chapter_label(0), "Ch. 0");
        assert_eq!(chapter_label(143), "Ch. 143");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 23, 0, 0).unwrap();
        assert_eq!(format_date(&date), "2024-03-07");
    }

    #[test]
    fn test_cover_src_fallback() {
        let mut manga = Manga::new("A".to_string(), String::new(), "https://img/a.png".to_string(), 0, false, Utc::now());
        assert_eq!(cover_src(&manga, Theme::Dark), "https://img/a.png");

        manga.is_image_working = false;
        assert_eq!(cover_src(&manga, Theme::Dark), Theme::Dark.placeholder_image());

        manga.is_image_working = true;
        manga.image.clear();
        assert_eq!(cover_src(&manga, Theme::Light), Theme::Light.placeholder_image());
    }

    #[test]
    fn test_blur_hidden_for_short_lists() {
        let metrics = ScrollMetrics {
            scroll_top: 40.0,
            scroll_height: 400.0,
            client_height: 200.0,
        };
        assert_eq!(BlurState::compute(metrics, 3, &RenderConfig::default()), BlurState::default());
    }

    #[test]
    fn test_blur_follows_scroll_position() {
        let config = RenderConfig::default();
        let at = |scroll_top| ScrollMetrics {
            scroll_top,
            scroll_height: 600.0,
            client_height: 200.0,
        };

        assert_eq!(BlurState::compute(at(0.0), 8, &config), BlurState { top: false, bottom: true });
        assert_eq!(BlurState::compute(at(150.0), 8, &config), BlurState { top: true, bottom: true });
        assert_eq!(BlurState::compute(at(400.0), 8, &config), BlurState { top: true, bottom: false });
    }
}
