//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{format_u64, CellStyle, FrameBuffer, Rgb};
use crate::types::{GameOverReason, Phase, GRID_SIZE};

const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Renders the 4x4 board with a side panel and phase overlays.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Roughly square tiles on a typical terminal font.
        Self { cell_w: 7, cell_h: 3 }
    }
}

/// Upper bounds on the tile size. Keeps frame arithmetic within `u16`.
const MAX_CELL_W: u16 = 32;
const MAX_CELL_H: u16 = 16;

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_W),
            cell_h: cell_h.clamp(1, MAX_CELL_H),
        }
    }

    /// Board frame size including the one-cell border.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            GRID_SIZE as u16 * self.cell_w + 2,
            GRID_SIZE as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let frame = CellStyle::new(BOARD_BG, SCREEN_BG);
        fb.fill_rect(start_x, start_y, frame_w, frame_h, ' ', CellStyle::new(BOARD_BG, BOARD_BG));
        draw_border(fb, start_x, start_y, frame_w, frame_h, frame);

        for (row, values) in snap.board.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                self.draw_tile(fb, start_x, start_y, row as u16, col as u16, value);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x.saturating_add(frame_w + 2), start_y);

        match snap.phase {
            Phase::Idle => overlay(fb, start_x, start_y, frame_w, frame_h, "PRESS SPACE", None),
            Phase::Countdown => {
                let mut digits = [0u8; 20];
                let len = format_u64(snap.countdown as u64, &mut digits);
                let text = std::str::from_utf8(&digits[..len]).unwrap_or("");
                overlay(fb, start_x, start_y, frame_w, frame_h, text, Some("GET READY"));
            }
            Phase::Playing if snap.paused => {
                overlay(fb, start_x, start_y, frame_w, frame_h, "PAUSED", Some("P TO RESUME"))
            }
            Phase::Playing => {}
            Phase::GameOver => {
                let detail = match snap.game_over_reason {
                    Some(GameOverReason::TimeExpired) => Some("TIME UP"),
                    Some(GameOverReason::NoMovesLeft) => Some("NO MOVES LEFT"),
                    None => None,
                };
                overlay(fb, start_x, start_y, frame_w, frame_h, "GAME OVER", detail);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, row: u16, col: u16, value: u32) {
        let px = start_x + 1 + col * self.cell_w;
        let py = start_y + 1 + row * self.cell_h;
        // One column of board background between tiles.
        let inner_w = self.cell_w.saturating_sub(1).max(1);
        let mid_y = py + self.cell_h / 2;

        if value == 0 {
            let style = CellStyle::new(Rgb::new(170, 160, 150), EMPTY_BG).dim();
            fb.fill_rect(px, py, inner_w, self.cell_h, ' ', style);
            fb.put_char(px + inner_w / 2, mid_y, '·', style);
            return;
        }

        let (fg, bg) = tile_colors(value);
        let style = CellStyle::new(fg, bg).bold();
        fb.fill_rect(px, py, inner_w, self.cell_h, ' ', style);

        let mut digits = [0u8; 20];
        let len = format_u64(value as u64, &mut digits) as u16;
        let x = px + inner_w.saturating_sub(len) / 2;
        // Clip wide values to the tile.
        for (i, &d) in digits[..len.min(inner_w) as usize].iter().enumerate() {
            fb.put_char(x + i as u16, mid_y, char::from(d), style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(PANEL_W) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let hint = value.dim();

        let mut y = start_y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("BEST", snap.high_score),
            ("TIME", snap.time_left as u64),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u64(panel_x, y + 1, number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "STREAK", label);
        if snap.merge_streak > 0 {
            fb.put_char(panel_x, y + 1, 'x', value);
            fb.put_u64(panel_x + 1, y + 1, snap.merge_streak as u64, value);
        } else {
            fb.put_char(panel_x, y + 1, '-', value);
        }
        y = y.saturating_add(3);

        for line in ["arrows move", "space start", "p pause", "r reset", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }
}

/// Width reserved for the side panel.
const PANEL_W: u16 = 13;

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '╭', style);
    fb.put_char(x + w - 1, y, '╮', style);
    fb.put_char(x, y + h - 1, '╰', style);
    fb.put_char(x + w - 1, y + h - 1, '╯', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn overlay(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str, detail: Option<&str>) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    let mid_y = y.saturating_add(h / 2);
    let banner_w = w.saturating_sub(4);
    fb.fill_rect(x + 2, mid_y.saturating_sub(1), banner_w, 3, ' ', style);
    match detail {
        Some(detail) => {
            fb.put_str_centered(x, mid_y.saturating_sub(1), w, text, style);
            fb.put_str_centered(x, mid_y, w, detail, CellStyle { bold: false, ..style });
        }
        None => fb.put_str_centered(x, mid_y, w, text, style),
    }
}

/// Foreground and background for a tile value.
pub fn tile_colors(value: u32) -> (Rgb, Rgb) {
    let dark = Rgb::new(119, 110, 101);
    let light = Rgb::new(249, 246, 242);
    match value {
        2 => (dark, Rgb::new(238, 228, 218)),
        4 => (dark, Rgb::new(237, 224, 200)),
        8 => (light, Rgb::new(242, 177, 121)),
        16 => (light, Rgb::new(245, 149, 99)),
        32 => (light, Rgb::new(246, 124, 95)),
        64 => (light, Rgb::new(246, 94, 59)),
        128 => (light, Rgb::new(237, 207, 114)),
        256 => (light, Rgb::new(237, 204, 97)),
        512 => (light, Rgb::new(237, 200, 80)),
        1024 => (light, Rgb::new(237, 197, 63)),
        2048 => (light, Rgb::new(237, 194, 46)),
        _ => (light, Rgb::new(60, 58, 50)),
    }
}
