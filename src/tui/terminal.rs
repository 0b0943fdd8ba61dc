//! Escape-sequence output and terminal mode lifecycle.
//!
//! Everything drawn on screen goes through [`Screen`], which writes a
//! small ANSI subset directly:
//!
//! | effect         | bytes              |
//! |----------------|--------------------|
//! | move cursor    | `ESC[{row};{col}H` |
//! | clear screen   | `ESC[2J`           |
//! | hide / show    | `ESC[?25l` / `ESC[?25h` |
//! | color          | `ESC[{code}m`      |
//!
//! crossterm is only used to flip raw mode and to query the window size.

use std::io::{self, Write};
use std::panic;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{debug, info};

use super::geometry::{Geometry, glyph};
use super::palette::Palette;

const ESC: &str = "\x1b";

/// Buffered escape-sequence writer that remembers the active palette.
pub struct Screen {
    out: Box<dyn Write>,
    palette: Palette,
}

impl Screen {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self {
            out,
            palette: Palette::DEFAULT,
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::BufWriter::new(io::stdout())))
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn move_to(&mut self, row: u16, col: u16) -> io::Result<()> {
        write!(self.out, "{ESC}[{row};{col}H")
    }

    pub fn clear(&mut self) -> io::Result<()> {
        write!(self.out, "{ESC}[2J")
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        write!(self.out, "{ESC}[?25l")
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        write!(self.out, "{ESC}[?25h")
    }

    /// Switch colors: background first, then foreground.
    pub fn apply_palette(&mut self, palette: Palette) -> io::Result<()> {
        write!(self.out, "{ESC}[{}m", palette.background)?;
        write!(self.out, "{ESC}[{}m", palette.foreground)?;
        self.palette = palette;
        Ok(())
    }

    /// Run `draw` under `palette`, then put the previous palette back even
    /// if `draw` failed.
    pub fn with_palette<F>(&mut self, palette: Palette, draw: F) -> io::Result<()>
    where
        F: FnOnce(&mut Screen) -> io::Result<()>,
    {
        let previous = self.palette;
        self.apply_palette(palette)?;
        let result = draw(self);
        let restored = self.apply_palette(previous);
        result.and(restored)
    }

    pub fn put_str(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }

    pub fn put_char(&mut self, c: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.out.write_all(c.encode_utf8(&mut buf).as_bytes())
    }

    /// Write `s` starting at `(row, col)`.
    pub fn put_str_at(&mut self, row: u16, col: u16, s: &str) -> io::Result<()> {
        self.move_to(row, col)?;
        self.put_str(s)
    }

    /// Double-line border around `geometry` using its corner glyphs.
    /// Does nothing for a borderless box.
    pub fn draw_border(&mut self, geometry: &Geometry) -> io::Result<()> {
        let Some(corners) = geometry.border else {
            return Ok(());
        };
        let (top, bottom) = (geometry.y, geometry.bottom());
        let (left, right) = (geometry.x, geometry.right());

        let span = usize::from(geometry.width.saturating_sub(2));
        let horizontal: String = std::iter::repeat_n(glyph::HORIZONTAL, span).collect();

        self.move_to(top, left)?;
        self.put_char(corners.upper_left)?;
        self.put_str(&horizontal)?;
        self.put_char(corners.upper_right)?;

        for row in top + 1..bottom {
            self.move_to(row, left)?;
            self.put_char(glyph::VERTICAL)?;
            self.move_to(row, right)?;
            self.put_char(glyph::VERTICAL)?;
        }

        self.move_to(bottom, left)?;
        self.put_char(corners.lower_left)?;
        self.put_str(&horizontal)?;
        self.put_char(corners.lower_right)
    }

    /// Blank the interior of `geometry` with spaces.
    pub fn draw_interior(&mut self, geometry: &Geometry) -> io::Result<()> {
        let bounds = geometry.text_bounds();
        if bounds.is_empty() {
            return Ok(());
        }
        let blank = " ".repeat(usize::from(bounds.width()));
        for row in bounds.row_min..=bounds.row_max {
            self.put_str_at(row, bounds.col_min, &blank)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Current terminal size as `(columns, rows)`.
pub fn size() -> io::Result<(u16, u16)> {
    crossterm::terminal::size()
}

static RAW_MODE_ENABLED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

/// RAII guard for raw mode. Restores the terminal on drop and from the
/// panic hook, whichever happens first.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;
        RAW_MODE_ENABLED.store(true, Ordering::SeqCst);

        let mut stdout = io::stdout();
        write!(stdout, "{ESC}[?25l")?;
        stdout.flush()?;
        info!("Raw mode enabled");
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Reset colors, clear, home and show the cursor, and leave raw mode.
/// Only the first call after [`TerminalGuard::enter`] does anything.
pub fn restore_terminal() {
    if !RAW_MODE_ENABLED.swap(false, Ordering::SeqCst) {
        return;
    }
    let mut stdout = io::stdout();
    let _ = write!(stdout, "{ESC}[0m{ESC}[2J{ESC}[1;1H{ESC}[?25h");
    let _ = stdout.flush();
    let _ = disable_raw_mode();
    debug!("Terminal restored");
}

fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            log::error!("panic: {info}");
            previous(info);
        }));
    });
}
