/// A background/foreground pair of SGR color codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: u8,
    pub foreground: u8,
}

impl Palette {
    /// White on cyan.
    pub const DEFAULT: Palette = Palette {
        background: 46,
        foreground: 37,
    };

    /// Cyan on white, for the selected row or focused button.
    pub const HIGHLIGHT: Palette = Palette {
        background: 47,
        foreground: 36,
    };

    /// White on red, for error boxes.
    pub const ERROR: Palette = Palette {
        background: 41,
        foreground: 37,
    };
}

impl Default for Palette {
    fn default() -> Self {
        Palette::DEFAULT
    }
}
