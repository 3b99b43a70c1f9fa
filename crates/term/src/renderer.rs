//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are written as runs of changed cells against the frame already on
//! screen. Between line clears almost nothing moves except the falling piece,
//! the flashing row and a few particles, so a frame is usually a handful of
//! short runs. With nothing on screen (first frame, resize, [`TerminalRenderer::invalidate`])
//! every row is one run after a clear.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Unchanged cells shorter than this between two changed ones are rewritten
/// instead of jumping the cursor over them.
const MERGE_GAP: u16 = 4;

/// A horizontal stretch of cells to repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Changed runs of `next` against `prev`, top to bottom, left to right.
///
/// Without a comparable previous frame every row is a single run.
pub struct ChangedRuns<'a> {
    prev: Option<&'a FrameBuffer>,
    next: &'a FrameBuffer,
    x: u16,
    y: u16,
}

impl<'a> ChangedRuns<'a> {
    pub fn new(prev: Option<&'a FrameBuffer>, next: &'a FrameBuffer) -> Self {
        let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
        Self { prev, next, x: 0, y: 0 }
    }

    fn differs(&self, prev: &FrameBuffer, x: u16) -> bool {
        prev.get(x, self.y) != self.next.get(x, self.y)
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let width = self.next.width();
        while self.y < self.next.height() {
            let Some(prev) = self.prev else {
                let run = Run { x: 0, y: self.y, len: width };
                self.y += 1;
                if width == 0 {
                    continue;
                }
                return Some(run);
            };

            while self.x < width && !self.differs(prev, self.x) {
                self.x += 1;
            }
            if self.x == width {
                self.x = 0;
                self.y += 1;
                continue;
            }

            let start = self.x;
            let mut end = start + 1;
            let mut scan = end;
            while scan < width && scan - end < MERGE_GAP {
                if self.differs(prev, scan) {
                    end = scan + 1;
                }
                scan += 1;
            }
            self.x = end;
            return Some(Run { x: start, y: self.y, len: end - start });
        }
        None
    }
}

/// Queues cells while remembering the cursor and style already sent.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    cursor: Option<(u16, u16)>,
    style: Option<CellStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, cursor: None, style: None }
    }

    fn paint(&mut self, x: u16, y: u16, cell: Cell) -> io::Result<()> {
        if self.cursor != Some((x, y)) {
            queue!(self.out, cursor::MoveTo(x, y))?;
        }
        if self.style != Some(cell.style) {
            let style = cell.style;
            queue!(
                self.out,
                SetAttribute(Attribute::Reset),
                SetForegroundColor(color(style.fg)),
                SetBackgroundColor(color(style.bg))
            )?;
            if style.bold {
                queue!(self.out, SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                queue!(self.out, SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        queue!(self.out, Print(cell.ch))?;
        self.cursor = Some((x.saturating_add(1), y));
        Ok(())
    }

    fn finish(self) -> io::Result<()> {
        if self.style.is_some() {
            queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.r, g: rgb.g, b: rgb.b }
}

/// Encode `next` into `out` as the changes from `prev`, without touching stdout.
///
/// `None` (or a frame of another size) means the screen content is unknown:
/// the screen is cleared and repainted. Returns the number of runs written.
pub fn encode_frame_into(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<usize> {
    let runs = ChangedRuns::new(prev, next);
    if runs.prev.is_none() {
        queue!(out, terminal::Clear(terminal::ClearType::All))?;
    }

    let mut painter = Painter::new(out);
    let mut count = 0;
    for run in runs {
        for x in run.x..run.x + run.len {
            painter.paint(x, run.y, next.get(x, run.y).unwrap_or_default())?;
        }
        count += 1;
    }
    painter.finish()?;
    Ok(count)
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: FrameBuffer,
    /// False until `shown` matches what is actually on screen.
    in_sync: bool,
    buf: Vec<u8>,
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
            shown: FrameBuffer::new(0, 0),
            in_sync: false,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        queue!(self.buf, terminal::EnterAlternateScreen, cursor::Hide, terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.in_sync = false;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        queue!(
            self.buf,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget what is on screen; the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.in_sync = false;
    }

    /// Draw `fb` and swap it with the frame previously on screen.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame; afterwards it
    /// holds the old frame, ready to be rendered into again. Returns the number
    /// of runs written.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<usize> {
        self.buf.clear();
        let prev = self.in_sync.then_some(&self.shown);
        let runs = encode_frame_into(prev, fb, &mut self.buf)?;
        if !self.buf.is_empty() {
            self.flush_buf()?;
        }

        std::mem::swap(&mut self.shown, fb);
        if fb.width() != self.shown.width() || fb.height() != self.shown.height() {
            fb.resize(self.shown.width(), self.shown.height());
        }
        self.in_sync = true;
        Ok(runs)
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(width: u16, height: u16, cells: &[(u16, u16)]) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);
        for &(x, y) in cells {
            fb.put_char(x, y, '#', CellStyle::default());
        }
        fb
    }

    fn runs(prev: Option<&FrameBuffer>, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
        ChangedRuns::new(prev, next).map(|r| (r.x, r.y, r.len)).collect()
    }

    #[test]
    fn adjacent_changes_form_one_run() {
        let a = FrameBuffer::new(12, 2);
        let b = marked(12, 2, &[(1, 0), (2, 0), (3, 0), (11, 1)]);
        assert_eq!(runs(Some(&a), &b), vec![(1, 0, 3), (11, 1, 1)]);
    }

    #[test]
    fn short_gaps_are_bridged_long_ones_split() {
        let a = FrameBuffer::new(20, 1);
        // Gap of 3 unchanged cells is painted over; gap of 8 is skipped.
        let b = marked(20, 1, &[(0, 0), (4, 0), (13, 0)]);
        assert_eq!(runs(Some(&a), &b), vec![(0, 0, 5), (13, 0, 1)]);
    }

    #[test]
    fn unknown_screen_repaints_every_row() {
        let b = marked(5, 3, &[(2, 1)]);
        assert_eq!(runs(None, &b), vec![(0, 0, 5), (0, 1, 5), (0, 2, 5)]);

        let other_size = FrameBuffer::new(4, 3);
        assert_eq!(runs(Some(&other_size), &b).len(), 3);
    }

    #[test]
    fn identical_frames_encode_nothing() {
        let a = marked(8, 4, &[(3, 3)]);
        let mut out = Vec::new();
        assert_eq!(encode_frame_into(Some(&a), &a.clone(), &mut out).unwrap(), 0);
        assert!(out.is_empty());

        let mut full = Vec::new();
        assert_eq!(encode_frame_into(None, &a, &mut full).unwrap(), 4);
        assert!(!full.is_empty());
    }

    #[test]
    fn one_changed_cell_is_a_small_write() {
        let a = FrameBuffer::new(40, 20);
        let b = marked(40, 20, &[(10, 7)]);

        let mut diff = Vec::new();
        assert_eq!(encode_frame_into(Some(&a), &b, &mut diff).unwrap(), 1);
        let mut full = Vec::new();
        encode_frame_into(None, &b, &mut full).unwrap();
        assert!(diff.len() * 10 < full.len());
    }
}
