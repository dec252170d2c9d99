use super::surface::ScrollSurface;

/// Whitespace-delimited, non-empty tokens
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Expected reading time in whole seconds at `speed` words per minute
pub fn estimated_total_secs(word_count: usize, speed: f64) -> f64 {
    if word_count == 0 || !(speed > 0.0) {
        return 0.0;
    }
    (word_count as f64 / speed * 60.0).round()
}

/// Fraction of the scrollable extent already scrolled, in `0.0..=1.0`.
/// Content that fits the viewport counts as fully read.
pub fn progress(surface: &impl ScrollSurface) -> f64 {
    let max = surface.scroll_height() - surface.client_height();
    if max <= 0.0 {
        return 1.0;
    }
    (surface.scroll_top() / max).clamp(0.0, 1.0)
}

pub fn elapsed_secs(progress: f64, total_secs: f64) -> f64 {
    let elapsed = progress * total_secs;
    if elapsed.is_finite() { elapsed } else { 0.0 }
}

/// `MM:SS`, flooring both parts
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
