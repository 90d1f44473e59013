//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Every draw repaints the whole frame, row by row, but the screen is only
//! cleared when the frame size changes. Commands are queued into a byte buffer
//! first so each frame reaches the terminal in a single write.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb, Weight};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
    /// Size of the last frame drawn; `None` forces a clear.
    last_size: Option<(u16, u16)>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(64 * 1024),
            last_size: None,
        }
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.last_size = None;
        self.flush_buf()
    }

    /// Restore the terminal. Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        let size = (fb.width(), fb.height());
        let resized = self.last_size != Some(size);
        self.last_size = Some(size);

        self.buf.clear();
        encode_frame_into(fb, resized, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a whole frame into `out` without touching stdout.
///
/// Glyphs sharing a style are printed as one run, and a style change only
/// emits the parts that differ from the previous style.
pub fn encode_frame_into(fb: &FrameBuffer, clear_screen: bool, out: &mut Vec<u8>) -> Result<()> {
    if clear_screen {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut current: Option<CellStyle> = None;
    let mut run = String::new();
    let width = fb.width().max(1) as usize;
    for (y, row) in fb.glyphs().chunks(width).enumerate() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        for glyph in row {
            if current != Some(glyph.style) {
                flush_run(out, &mut run)?;
                style_transition_into(out, current, glyph.style)?;
                current = Some(glyph.style);
            }
            run.push(glyph.ch);
        }
        flush_run(out, &mut run)?;
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn flush_run(out: &mut Vec<u8>, run: &mut String) -> Result<()> {
    if !run.is_empty() {
        out.queue(Print(run.as_str()))?;
        run.clear();
    }
    Ok(())
}

fn style_transition_into(out: &mut Vec<u8>, prev: Option<CellStyle>, next: CellStyle) -> Result<()> {
    // An attribute reset also drops both colors, so they are re-sent with it.
    let reset = prev.map_or(true, |prev| prev.weight != next.weight);
    if reset {
        out.queue(SetAttribute(Attribute::Reset))?;
        match next.weight {
            Weight::Normal => {}
            Weight::Bold => {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            Weight::Dim => {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
    }
    if reset || prev.map(|prev| prev.fg) != Some(next.fg) {
        out.queue(SetForegroundColor(rgb_to_color(next.fg)))?;
    }
    if reset || prev.map(|prev| prev.bg) != Some(next.bg) {
        out.queue(SetBackgroundColor(rgb_to_color(next.bg)))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
