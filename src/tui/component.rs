use std::io;

use super::geometry::Geometry;
use super::terminal::Screen;

/// Something that occupies a box on screen and can paint itself there.
///
/// Every `draw` is a full repaint of the widget's box, in a fixed order:
///
/// 1. border (if the geometry has one)
/// 2. interior blanked with spaces
/// 3. the widget's own content, nested widgets included
///
/// Nothing is diffed against what was on screen before, so a widget never
/// needs to know what it drew last time.
pub trait Drawable {
    fn bounds(&self) -> Geometry;

    fn draw(&self, screen: &mut Screen) -> io::Result<()>;
}

/// Steps 1 and 2 of a draw.
pub fn draw_frame(screen: &mut Screen, geometry: &Geometry) -> io::Result<()> {
    screen.draw_border(geometry)?;
    screen.draw_interior(geometry)
}

/// `text` cut down to at most `width` characters.
pub fn clip(text: &str, width: u16) -> &str {
    match text.char_indices().nth(usize::from(width)) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// `text` cut down to `width` characters, ending in `...` if it was cut.
pub fn truncate_with_ellipsis(text: &str, width: u16) -> String {
    if text.chars().count() <= usize::from(width) {
        return text.to_string();
    }
    if width <= 3 {
        return ".".repeat(usize::from(width));
    }
    format!("{}...", clip(text, width - 3))
}

/// Word-wrap `text` to `width` columns, breaking words that do not fit.
/// Always yields at least one line.
pub fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    let options = textwrap::Options::new(usize::from(width.max(1)))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let mut lines: Vec<String> = textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_lines() {
        assert_eq!(wrap_lines("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_lines("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_lines("", 10), vec![""]);
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("hello", 3), "hel");
        assert_eq!(clip("hello", 5), "hello");
        assert_eq!(clip("hello", 10), "hello");
        assert_eq!(clip("hello", 0), "");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_with_ellipsis("a much longer title", 10), "a much ...");
        assert_eq!(truncate_with_ellipsis("abcdef", 2), "..");
    }
}
