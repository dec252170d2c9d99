/// Pixels per rem; font sizes are expressed in rem
pub const REM_PX: f64 = 16.0;
pub const LINE_HEIGHT: f64 = 1.5;

/// A scroll container, measured in virtual pixels
pub trait ScrollSurface {
    fn scroll_top(&self) -> f64;
    /// Set the offset; implementations clamp it to the scrollable range
    fn set_scroll_top(&mut self, value: f64);
    fn scroll_height(&self) -> f64;
    fn client_height(&self) -> f64;

    fn max_scroll_top(&self) -> f64 {
        (self.scroll_height() - self.client_height()).max(0.0)
    }

    /// Nothing left to scroll. Content that fits the viewport is complete
    /// from the start.
    fn is_at_end(&self) -> bool {
        self.scroll_height() <= self.client_height() || self.scroll_top() >= self.max_scroll_top()
    }
}

/// Height of one rendered row for a font size in rem
pub fn row_height(font_size: f64) -> f64 {
    font_size * REM_PX * LINE_HEIGHT
}

/// Prompter scroll area: `content_rows` of text padded by half a viewport
/// above and below, seen through `visible_rows` terminal rows
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    content_rows: usize,
    visible_rows: usize,
    row_height: f64,
    scroll_top: f64,
}

impl Viewport {
    pub fn new(content_rows: usize, visible_rows: usize, font_size: f64) -> Self {
        Self {
            content_rows,
            visible_rows,
            row_height: row_height(font_size).max(f64::MIN_POSITIVE),
            scroll_top: 0.0,
        }
    }

    /// Adopt new dimensions, keeping the offset where it still fits
    pub fn relayout(&mut self, content_rows: usize, visible_rows: usize, font_size: f64) {
        self.content_rows = content_rows;
        self.visible_rows = visible_rows;
        self.row_height = row_height(font_size).max(f64::MIN_POSITIVE);
        let top = self.scroll_top;
        self.set_scroll_top(top);
    }

    #[cfg(test)]
    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    fn padding(&self) -> f64 {
        self.client_height() / 2.0
    }

    /// Content row shown at screen row `screen_row`, if any
    pub fn content_row_at(&self, screen_row: usize) -> Option<usize> {
        let y = self.scroll_top + screen_row as f64 * self.row_height - self.padding();
        if y < 0.0 {
            return None;
        }
        let idx = (y / self.row_height).floor() as usize;
        (idx < self.content_rows).then_some(idx)
    }

    /// Move by whole rows, as a manual seek
    pub fn scroll_rows(&mut self, rows: f64) {
        let top = self.scroll_top + rows * self.row_height;
        self.set_scroll_top(top);
    }
}

impl ScrollSurface for Viewport {
    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, value: f64) {
        let value = if value.is_finite() { value } else { 0.0 };
        self.scroll_top = value.clamp(0.0, self.max_scroll_top());
    }

    fn scroll_height(&self) -> f64 {
        self.content_rows as f64 * self.row_height + self.client_height()
    }

    fn client_height(&self) -> f64 {
        self.visible_rows as f64 * self.row_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_height_scales_with_font_size() {
        assert_eq!(row_height(4.0), 96.0);
        assert_eq!(row_height(1.0), 24.0);
    }

    #[test]
    fn scrollable_extent_is_the_content_height() {
        let viewport = Viewport::new(10, 20, 1.0);
        assert_eq!(viewport.client_height(), 480.0);
        assert_eq!(viewport.scroll_height(), 720.0);
        assert_eq!(viewport.max_scroll_top(), 240.0);
    }

    #[test]
    fn scroll_top_is_clamped() {
        let mut viewport = Viewport::new(10, 20, 1.0);
        viewport.set_scroll_top(10_000.0);
        assert_eq!(viewport.scroll_top(), 240.0);
        viewport.set_scroll_top(-5.0);
        assert_eq!(viewport.scroll_top(), 0.0);
        viewport.set_scroll_top(f64::NAN);
        assert_eq!(viewport.scroll_top(), 0.0);
    }

    #[test]
    fn empty_content_is_already_at_end() {
        let viewport = Viewport::new(0, 20, 4.0);
        assert!(viewport.scroll_height() <= viewport.client_height());
        assert!(viewport.is_at_end());
    }

    #[test]
    fn text_starts_mid_screen() {
        let viewport = Viewport::new(3, 10, 1.0);
        assert_eq!(viewport.content_row_at(4), None);
        assert_eq!(viewport.content_row_at(5), Some(0));
        assert_eq!(viewport.content_row_at(7), Some(2));
        assert_eq!(viewport.content_row_at(8), None);
    }

    #[test]
    fn scrolling_shifts_rows_up() {
        let mut viewport = Viewport::new(30, 10, 1.0);
        viewport.scroll_rows(2.0);
        assert_eq!(viewport.content_row_at(3), Some(0));
        assert_eq!(viewport.content_row_at(5), Some(2));
    }

    #[test]
    fn relayout_clamps_offset() {
        let mut viewport = Viewport::new(100, 10, 1.0);
        viewport.set_scroll_top(2_000.0);
        viewport.relayout(10, 10, 1.0);
        assert_eq!(viewport.scroll_top(), 240.0);
    }
}
