//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Each frame is compared with the one drawn before it and only the changed
//! runs of each row are written. With no previous frame, or one of another
//! size, the screen is cleared and every row is written.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    pending: Vec<u8>,
    key_release_events: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            pending: Vec::with_capacity(64 * 1024),
            key_release_events: false,
        }
    }

    /// Whether the terminal agreed to report key releases.
    ///
    /// Without them a held soft drop is released on a timeout.
    pub fn key_release_events(&self) -> bool {
        self.key_release_events
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.key_release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.pending.clear();
        self.pending
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        if self.key_release_events {
            self.pending.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.write_pending()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.pending.clear();
        if self.key_release_events {
            self.pending.queue(PopKeyboardEnhancementFlags)?;
        }
        self.pending
            .queue(SetAttribute(Attribute::Reset))?
            .queue(ResetColor)?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.write_pending()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers keep one `FrameBuffer` and pass it every frame. After the
    /// draw the caller holds the previous frame, ready to be overwritten.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.pending.clear();
        let shown = self.last.take();
        encode_frame(shown.as_ref(), fb, &mut self.pending)?;
        self.write_pending()?;

        // The caller's next render resizes and clears whatever it gets back.
        let spare = shown.unwrap_or_else(|| FrameBuffer::new(0, 0));
        self.last = Some(std::mem::replace(fb, spare));
        Ok(())
    }

    fn write_pending(&mut self) -> Result<()> {
        self.stdout.write_all(&self.pending)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode the commands that turn `shown` into `next` on screen.
///
/// `None`, or a frame of another size, means the screen content is unknown:
/// it is cleared and every row is written.
pub fn encode_frame(
    shown: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut pen = Pen::new(out);
    match shown {
        Some(shown) if shown.width() == next.width() && shown.height() == next.height() => {
            for (x, y, len) in ChangedRuns::new(shown, next) {
                pen.run(next, x, y, len)?;
            }
        }
        _ => {
            pen.out.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..next.height() {
                pen.run(next, 0, y, next.width())?;
            }
        }
    }
    pen.finish()
}

/// Writes runs of cells, switching colors only when the style changes.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn run(&mut self, fb: &FrameBuffer, x: u16, y: u16, len: u16) -> Result<()> {
        if len == 0 {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(x, y))?;
        for cell in (x..x.saturating_add(len)).filter_map(|cx| fb.get(cx, y)) {
            if self.style != Some(cell.style) {
                self.switch_to(cell.style)?;
            }
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn switch_to(&mut self, style: CellStyle) -> Result<()> {
        // An attribute reset also drops the colors, so it goes first.
        self.out
            .queue(SetAttribute(Attribute::Reset))?
            .queue(SetColors(Colors::new(style.fg.into(), style.bg.into())))?;
        if style.bold {
            self.out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.style = Some(style);
        Ok(())
    }

    /// Leave the terminal in its default style if anything was drawn.
    fn finish(self) -> Result<()> {
        if self.style.is_some() {
            self.out
                .queue(SetAttribute(Attribute::Reset))?
                .queue(ResetColor)?;
        }
        Ok(())
    }
}

/// Maximal runs of cells that differ between two frames of the same size,
/// as `(x, y, len)`, row by row.
struct ChangedRuns<'a> {
    shown: &'a FrameBuffer,
    next: &'a FrameBuffer,
    x: u16,
    y: u16,
}

impl<'a> ChangedRuns<'a> {
    fn new(shown: &'a FrameBuffer, next: &'a FrameBuffer) -> Self {
        Self {
            shown,
            next,
            x: 0,
            y: 0,
        }
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = (u16, u16, u16);

    fn next(&mut self) -> Option<Self::Item> {
        let (shown, next) = (self.shown, self.next);
        while self.y < next.height() {
            let y = self.y;
            let differs = |x: u16| shown.get(x, y) != next.get(x, y);
            while self.x < next.width() && !differs(self.x) {
                self.x += 1;
            }
            if self.x < next.width() {
                let start = self.x;
                while self.x < next.width() && differs(self.x) {
                    self.x += 1;
                }
                return Some((start, y, self.x - start));
            }
            self.x = 0;
            self.y += 1;
        }
        None
    }
}
