//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The board is stored with row 0 at the bottom; the framebuffer has row 0 at
//! the top, so board rows are flipped on the way out.

use crate::core::{GameSnapshot, QueuedPiece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Category, BOARD_HEIGHT, BOARD_WIDTH};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const BLOCK: char = '█';
const FLASH: char = '▓';
const PARTICLE: char = '*';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Driver-side state drawn around the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudView<'a> {
    pub paused: bool,
    pub show_particles: bool,
    pub best_score: Option<u32>,
    /// Latest achievement unlock, shown under the board.
    pub toast: Option<&'a str>,
    /// One-line status such as "Game saved".
    pub status: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the board and its side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Screen-space origin of the board frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, hud: &HudView<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let frame = self.frame(viewport);
        self.draw_border(fb, frame);

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let cell = snap.board[y as usize][x as usize];
                match cell.category.filter(|_| cell.occupied) {
                    Some(category) => self.draw_block(fb, frame, x, y, BLOCK, category, false),
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        // Flash the row being recycled.
        if let (Some(row), Some(category)) = (snap.animation.row(), snap.animation.category()) {
            for x in 0..BOARD_WIDTH {
                if snap.animation.step() % 2 == 0 {
                    let style = CellStyle {
                        fg: Rgb::new(255, 255, 255),
                        bg: BOARD_BG,
                        bold: true,
                        dim: false,
                    };
                    self.fill_cell_rect(fb, frame, x, row, FLASH, style);
                } else {
                    self.draw_block(fb, frame, x, row, FLASH, category, true);
                }
            }
        }

        if hud.show_particles {
            for particle in &snap.particles {
                if particle.x < 0.0 || particle.y < 0.0 {
                    continue;
                }
                let (x, y) = (particle.x as u8, particle.y as u8);
                if x >= BOARD_WIDTH || y >= BOARD_HEIGHT || snap.board[y as usize][x as usize].occupied {
                    continue;
                }
                self.draw_block(fb, frame, x, y, PARTICLE, particle.category, false);
            }
        }

        if let Some(active) = snap.active {
            for (&(x, y), &category) in active.blocks().iter().zip(active.categories.iter()) {
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    self.draw_block(fb, frame, x as u8, y as u8, BLOCK, category, true);
                }
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, frame);
        self.draw_messages(fb, hud, viewport, frame);

        if hud.paused {
            self.draw_overlay_text(fb, frame, 0, "PAUSED");
        } else if snap.game_over {
            self.draw_overlay_text(fb, frame, 0, "GAME OVER");
            self.draw_overlay_text(fb, frame, 1, "R to restart");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &HudView<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame) {
        let Frame { x, y, w, h } = frame;
        let style = CellStyle::fg(Rgb::new(200, 200, 200));

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u8, y: u8) {
        let style = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: BOARD_BG,
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u8, y: u8, ch: char, category: Category, bold: bool) {
        let style = CellStyle {
            fg: Rgb::from_cell_color(category.color()),
            bg: BOARD_BG,
            bold,
            dim: false,
        };
        self.fill_cell_rect(fb, frame, x, y, ch, style);
    }

    /// `y` is a board row (0 at the bottom).
    fn fill_cell_rect(&self, fb: &mut FrameBuffer, frame: Frame, x: u8, y: u8, ch: char, style: CellStyle) {
        let screen_row = u16::from(BOARD_HEIGHT - 1 - y);
        let px = frame.x + 1 + u16::from(x) * self.cell_w;
        let py = frame.y + 1 + screen_row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, hud: &HudView<'_>, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 14 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let dim = CellStyle { dim: true, ..value };

        let mut y = frame.y;
        let stat = |fb: &mut FrameBuffer, y: &mut u16, name: &str, n: u32| {
            let end = fb.put_str(panel_x, *y, name, label);
            fb.put_u32(end.max(panel_x + 7), *y, n, value);
            *y = y.saturating_add(1);
        };
        stat(fb, &mut y, "SCORE", snap.score);
        if let Some(best) = hud.best_score {
            stat(fb, &mut y, "BEST", best.max(snap.score));
        }
        stat(fb, &mut y, "LEVEL", snap.level);
        stat(fb, &mut y, "LINES", snap.lines);
        stat(fb, &mut y, "COMBO", snap.combo);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_queued(fb, panel_x, y, snap.next, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        match snap.hold {
            Some(held) => self.draw_queued(fb, panel_x, y, held, if snap.can_hold { value } else { dim }),
            None => {
                fb.put_str(panel_x, y, "-", value);
            }
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "RECYCLED", label);
        y = y.saturating_add(1);
        for category in Category::ALL {
            if y >= viewport.height {
                break;
            }
            let style = CellStyle::fg(Rgb::from_cell_color(category.color()));
            fb.put_str(panel_x, y, category.display_name(), style);
            fb.put_u32(panel_x + 9, y, snap.recycled_count(category), value);
            y = y.saturating_add(1);
        }
    }

    /// Shape letter followed by one swatch per block category.
    fn draw_queued(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: QueuedPiece, style: CellStyle) {
        let mut cx = fb.put_str(x, y, piece.shape.as_str(), style) + 1;
        for category in piece.categories {
            let swatch = CellStyle {
                fg: Rgb::from_cell_color(category.color()),
                ..style
            };
            fb.put_char(cx, y, '■', swatch);
            cx = cx.saturating_add(1);
        }
    }

    fn draw_messages(&self, fb: &mut FrameBuffer, hud: &HudView<'_>, viewport: Viewport, frame: Frame) {
        let mut y = frame.y.saturating_add(frame.h);
        if let Some(toast) = hud.toast {
            if y < viewport.height {
                let style = CellStyle {
                    fg: Rgb::new(255, 215, 0),
                    bold: true,
                    ..CellStyle::default()
                };
                let end = fb.put_str(frame.x, y, "Achievement: ", style);
                fb.put_str(end, y, toast, style);
                y = y.saturating_add(1);
            }
        }
        if let Some(status) = hud.status {
            if y < viewport.height {
                fb.put_str(frame.x, y, status, CellStyle::default());
            }
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, line: u16, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bold: true,
            ..CellStyle::default()
        };
        fb.put_str(x, mid_y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, LineClearAnimation, Particle};

    const VIEW: Viewport = Viewport { width: 60, height: 24 };

    /// Screen position of the left column of board cell (x, y) in `VIEW`.
    fn screen(x: u16, y: u16) -> (u16, u16) {
        (19 + 1 + x * 2, 1 + 1 + (19 - y))
    }

    fn ch_at(fb: &FrameBuffer, x: u16, y: u16) -> char {
        let (sx, sy) = screen(x, y);
        fb.get(sx, sy).map(|c| c.ch).unwrap_or('?')
    }

    #[test]
    fn frozen_blocks_use_category_colour_with_row_zero_at_bottom() {
        let mut snap = GameSnapshot::default();
        snap.board[0][0] = Cell::frozen(Category::Plastic, Some(1));

        let fb = GameView::default().render(&snap, &HudView::default(), VIEW);
        let (sx, sy) = screen(0, 0);
        let cell = fb.get(sx, sy).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, Rgb::new(255, 0, 0));
        assert_eq!(sy, 21);
        assert_eq!(ch_at(&fb, 0, 19), '·');
        assert_eq!(fb.get(19, 1).map(|c| c.ch), Some('┌'));
    }

    #[test]
    fn active_piece_is_drawn() {
        let game = crate::core::GameState::new(5);
        let snap = game.snapshot();
        let fb = GameView::default().render(&snap, &HudView::default(), VIEW);
        let active = snap.active.unwrap();
        for (x, y) in active.blocks() {
            assert_eq!(ch_at(&fb, x as u16, y as u16), '█');
        }
    }

    #[test]
    fn animating_row_flashes() {
        let mut snap = GameSnapshot::default();
        snap.animation = LineClearAnimation::start(0, Category::Glass);
        let fb = GameView::default().render(&snap, &HudView::default(), VIEW);
        for x in 0..10 {
            assert_eq!(ch_at(&fb, x, 0), '▓');
        }
        assert_eq!(ch_at(&fb, 0, 1), '·');
    }

    #[test]
    fn particles_follow_the_toggle() {
        let mut snap = GameSnapshot::default();
        snap.particles.push(Particle {
            x: 3.5,
            y: 5.5,
            vx: 0.0,
            vy: 0.0,
            life: 1.0,
            size: 0.1,
            category: Category::Metal,
        });
        let view = GameView::default();

        let hidden = view.render(&snap, &HudView::default(), VIEW);
        assert_eq!(ch_at(&hidden, 3, 5), '·');

        let hud = HudView {
            show_particles: true,
            ..HudView::default()
        };
        let shown = view.render(&snap, &hud, VIEW);
        assert_eq!(ch_at(&shown, 3, 5), '*');
    }

    #[test]
    fn panel_and_overlays() {
        let mut snap = GameSnapshot::default();
        snap.score = 4_025;
        snap.game_over = true;
        let hud = HudView {
            toast: Some("First Step"),
            ..HudView::default()
        };
        let fb = GameView::default().render(&snap, &hud, VIEW);

        assert!(fb.row_text(1).contains("SCORE  4025"));
        assert!(fb.row_text(12).contains("GAME OVER"));
        assert!(fb.row_text(23).contains("Achievement: First Step"));

        let paused = HudView {
            paused: true,
            ..HudView::default()
        };
        let fb = GameView::default().render(&snap, &paused, VIEW);
        assert!(fb.row_text(12).contains("PAUSED"));
        assert!(!fb.row_text(12).contains("GAME OVER"));
    }
}
