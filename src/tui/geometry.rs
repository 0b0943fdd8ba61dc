//! Character-cell geometry.
//!
//! Coordinates are 1-based, matching the terminal's own cursor
//! addressing: `(x, y) = (1, 1)` is the top-left cell. A box covers
//! columns `x..=x+width-1` and rows `y..=y+height-1`; with a border, the
//! interior (where all content is drawn) is that box inset by one cell.

/// Double-line box-drawing glyphs.
pub mod glyph {
    pub const HORIZONTAL: char = '\u{2550}'; // ═
    pub const VERTICAL: char = '\u{2551}'; // ║
    pub const UPPER_LEFT: char = '\u{2554}'; // ╔
    pub const UPPER_RIGHT: char = '\u{2557}'; // ╗
    pub const LOWER_LEFT: char = '\u{255A}'; // ╚
    pub const LOWER_RIGHT: char = '\u{255D}'; // ╝
    pub const VERTICAL_RIGHT: char = '\u{2560}'; // ╠
    pub const VERTICAL_LEFT: char = '\u{2563}'; // ╣
    pub const HORIZONTAL_UP: char = '\u{2569}'; // ╩
    pub const HORIZONTAL_DOWN: char = '\u{2566}'; // ╦
}

/// The four corner glyphs of a border, overridable so that panels sitting
/// on another window's edge join it with T-junctions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corners {
    pub upper_left: char,
    pub upper_right: char,
    pub lower_left: char,
    pub lower_right: char,
}

impl Corners {
    pub const DOUBLE: Corners = Corners {
        upper_left: glyph::UPPER_LEFT,
        upper_right: glyph::UPPER_RIGHT,
        lower_left: glyph::LOWER_LEFT,
        lower_right: glyph::LOWER_RIGHT,
    };

    /// A panel in the bottom-left corner of an enclosing window.
    pub const BOTTOM_LEFT_PANEL: Corners = Corners {
        upper_left: glyph::VERTICAL_RIGHT,
        upper_right: glyph::UPPER_RIGHT,
        lower_left: glyph::LOWER_LEFT,
        lower_right: glyph::HORIZONTAL_UP,
    };

    /// A panel in the bottom-right corner of an enclosing window.
    pub const BOTTOM_RIGHT_PANEL: Corners = Corners {
        upper_left: glyph::UPPER_LEFT,
        upper_right: glyph::VERTICAL_LEFT,
        lower_left: glyph::HORIZONTAL_UP,
        lower_right: glyph::LOWER_RIGHT,
    };
}

/// Inclusive interior bounds of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub row_min: u16,
    pub row_max: u16,
    pub col_min: u16,
    pub col_max: u16,
}

impl TextBounds {
    pub fn width(&self) -> u16 {
        (self.col_max + 1).saturating_sub(self.col_min)
    }

    pub fn height(&self) -> u16 {
        (self.row_max + 1).saturating_sub(self.row_min)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    /// `None` means no border.
    pub border: Option<Corners>,
}

impl Geometry {
    /// A borderless box. Zero sizes are bumped to one cell.
    pub fn plain(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x: x.max(1),
            y: y.max(1),
            width: width.max(1),
            height: height.max(1),
            border: None,
        }
    }

    /// A box with a plain double-line border.
    pub fn bordered(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            border: Some(Corners::DOUBLE),
            ..Self::plain(x, y, width, height)
        }
    }

    pub fn with_corners(mut self, corners: Corners) -> Self {
        self.border = Some(corners);
        self
    }

    pub fn has_border(&self) -> bool {
        self.border.is_some()
    }

    /// Last column covered by the box.
    pub fn right(&self) -> u16 {
        self.x + self.width - 1
    }

    /// Last row covered by the box.
    pub fn bottom(&self) -> u16 {
        self.y + self.height - 1
    }

    /// Interior region: the box inset by one cell when bordered.
    pub fn text_bounds(&self) -> TextBounds {
        let inset = u16::from(self.has_border());
        TextBounds {
            row_min: self.y + inset,
            row_max: self.bottom().saturating_sub(inset),
            col_min: self.x + inset,
            col_max: self.right().saturating_sub(inset),
        }
    }

    /// A box of `width` x `height` centered inside this one's interior,
    /// shrunk to fit if necessary.
    pub fn centered(&self, width: u16, height: u16) -> Geometry {
        let inner = self.text_bounds();
        let width = width.min(inner.width()).max(1);
        let height = height.min(inner.height()).max(1);
        let x = inner.col_min + (inner.width().saturating_sub(width)) / 2;
        let y = inner.row_min + (inner.height().saturating_sub(height)) / 2;
        Geometry::bordered(x, y, width, height)
    }
}
