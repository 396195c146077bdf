//! GameView: lays out a `GameSnapshot` in a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested. The two fields sit side by side with
//! their info panels between them:
//!
//! ```text
//! ┌────────┐ PLAYER 1      PLAYER 2 ┌────────┐
//! │ field  │ SCORE         SCORE    │ field  │
//! │        │ ...           ...      │        │
//! └────────┘                        └────────┘
//! ```

use crate::core::geometry::{cells_at, preview_pivot};
use crate::core::snapshot::{GameSnapshot, PlayerSnapshot};
use crate::fb::{piece_color, CellStyle, FrameBuffer, Rgb, FIELD_BG, STACK_FG};
use crate::types::{PlayerIndex, GRID_HEIGHT, GRID_WIDTH};

const PANEL_W: u16 = 16;
const PANEL_GAP: u16 = 1;
const CENTER_GAP: u16 = 2;
const BLOCK: char = '█';

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

/// Screen rectangle of one player's bordered field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldRect {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

pub struct GameView {
    /// Grid cell width in terminal columns
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    fn field_size(&self) -> (u16, u16) {
        (GRID_WIDTH as u16 * self.cell_w + 2, GRID_HEIGHT as u16 + 2)
    }

    /// Total width and height the layout needs
    pub fn required_size(&self) -> (u16, u16) {
        let (fw, fh) = self.field_size();
        (2 * (fw + PANEL_GAP + PANEL_W) + CENTER_GAP, fh)
    }

    fn field_rect(&self, player: PlayerIndex, viewport: Viewport) -> FieldRect {
        let (fw, fh) = self.field_size();
        let (total_w, total_h) = self.required_size();
        let x0 = viewport.width.saturating_sub(total_w) / 2;
        let y0 = viewport.height.saturating_sub(total_h) / 2;
        let x = match player {
            PlayerIndex::One => x0,
            PlayerIndex::Two => x0 + total_w - fw,
        };
        FieldRect { x, y: y0, w: fw, h: fh }
    }

    fn panel_x(&self, player: PlayerIndex, field: FieldRect) -> u16 {
        match player {
            PlayerIndex::One => field.x + field.w + PANEL_GAP,
            PlayerIndex::Two => field.x.saturating_sub(PANEL_GAP + PANEL_W),
        }
    }

    /// Render a frame into an existing framebuffer (no allocation once sized).
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        for player in PlayerIndex::ALL {
            let field = self.field_rect(player, viewport);
            let view = snap.player(player);
            self.draw_field(fb, field, view);
            self.draw_panel(fb, player, self.panel_x(player, field), field.y, view, snap);

            if snap.game_over {
                self.draw_overlay_text(fb, field, "GAME OVER");
            } else if snap.paused {
                self.draw_overlay_text(fb, field, "PAUSE");
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_field(&self, fb: &mut FrameBuffer, field: FieldRect, view: &PlayerSnapshot) {
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let empty = CellStyle::new(Rgb::new(80, 80, 95), FIELD_BG).dim();
        let stack = CellStyle::new(STACK_FG, FIELD_BG);
        let shadow = CellStyle::new(Rgb::new(140, 140, 140), FIELD_BG).dim();

        draw_border(fb, field.x, field.y, field.w, field.h, border);

        for (y, row) in view.grid.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let (ch, style) = match code {
                    2 => (BLOCK, stack),
                    _ => ('·', empty),
                };
                self.fill_cell(fb, field, x as i8, y as i8, ch, style);
            }
        }

        if let Some(landing) = view.landing {
            for (x, y) in landing {
                if view.grid[y as usize][x as usize] == 0 {
                    self.fill_cell(fb, field, x, y, '░', shadow);
                }
            }
        }

        if let Some(active) = view.active {
            let style = CellStyle::new(piece_color(active.color), FIELD_BG).bold();
            for (x, y) in active.cells {
                self.fill_cell(fb, field, x, y, BLOCK, style);
            }
        }
    }

    /// Fill one grid cell; coordinates outside the grid are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, field: FieldRect, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || y < 0 || x >= GRID_WIDTH as i8 || y >= GRID_HEIGHT as i8 {
            return;
        }
        let px = field.x + 1 + x as u16 * self.cell_w;
        let py = field.y + 1 + y as u16;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        player: PlayerIndex,
        x: u16,
        top: u16,
        view: &PlayerSnapshot,
        snap: &GameSnapshot,
    ) {
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.put_str(x, top, "PLAYER", label);
        fb.put_u32(x + 7, top, player.index() as u32 + 1, label);

        fb.put_str(x, top + 2, "SCORE", label);
        fb.put_u32(x, top + 3, view.score, value);
        fb.put_str(x, top + 5, "LINES", label);
        fb.put_u32(x, top + 6, view.lines, value);

        fb.put_str(x, top + 8, "NEXT", label);
        let preview_top = top + 9;
        for (slot, (kind, color)) in view.previews().enumerate() {
            let style = CellStyle::new(piece_color(color), Rgb::new(0, 0, 0));
            for (px, py) in cells_at(kind, preview_pivot(slot)) {
                if px >= 0 && py >= 0 && (px as u16) < PANEL_W {
                    fb.put_char(x + px as u16, preview_top + py as u16, BLOCK, style);
                }
            }
        }

        fb.put_str(x, top + 13, "LEVEL", label);
        fb.put_u32(x, top + 14, snap.level, value);
        fb.put_str(x, top + 16, "SPEED", label);
        fb.put_u32(x, top + 17, snap.tick_interval_ms, value);
        fb.put_str(x + 6, top + 17, "ms", value.dim());
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, field: FieldRect, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = field.x + field.w.saturating_sub(text_w) / 2;
        let y = field.y + field.h / 2;
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, y, text, style);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
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
