use engine::font;
use engine::graphics::{BLACK, Color, Renderer2d};
use engine::ui::Rect;

use crate::board::{Board, COLS, ROWS};
use crate::images::ImageRegistry;
use crate::piece::{ActivePiece, Vec2i, color_for_piece_type};
use crate::view::GameView;

pub const BLOCK_SIZE: u32 = 30;
pub const BORDER_WIDTH: u32 = 5;
pub const CELL_STROKE: u32 = 2;

pub const COLOR_BACKGROUND: Color = [236, 236, 236, 255];
const COLOR_OVERLAY_TEXT: Color = [24, 24, 32, 255];
const COLOR_OVERLAY_PANEL: Color = [250, 250, 250, 255];

const TEXT_SCALE: u32 = 3;
const TEXT_LINE_GAP: u32 = 8;
const PANEL_PADDING: u32 = 10;

/// Everything a frame needs; borrowed from the loop controller for the duration of one draw.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub board: Option<&'a Board>,
    pub piece: Option<(&'a ActivePiece, Vec2i)>,
    pub images: &'a ImageRegistry,
    pub view: GameView,
    pub cell_size: u32,
}

/// Outer window size for a well of `cell_size` pixels per cell, border included.
pub fn window_size(cell_size: u32) -> (u32, u32) {
    (
        COLS as u32 * cell_size + 2 * BORDER_WIDTH,
        ROWS as u32 * cell_size + 2 * BORDER_WIDTH,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub well: Rect,
    pub cell_size: u32,
}

impl BoardLayout {
    /// Centers the well (plus its border) in a `width`x`height` surface.
    pub fn compute(width: u32, height: u32, cell_size: u32) -> Self {
        let (outer_w, outer_h) = window_size(cell_size);
        let outer = Rect::from_size(width, height).centered(outer_w, outer_h);
        Self {
            well: outer.inset(BORDER_WIDTH),
            cell_size,
        }
    }

    /// Pixel rect of a grid cell; `None` above the top of the well.
    pub fn cell_rect(&self, cell: Vec2i) -> Option<Rect> {
        let col = u32::try_from(cell.x).ok()?;
        let row = u32::try_from(cell.y).ok()?;
        Some(Rect::new(
            self.well.x + col * self.cell_size,
            self.well.y + row * self.cell_size,
            self.cell_size,
            self.cell_size,
        ))
    }

    pub fn border(&self) -> Rect {
        Rect::new(
            self.well.x.saturating_sub(BORDER_WIDTH),
            self.well.y.saturating_sub(BORDER_WIDTH),
            self.well.w + 2 * BORDER_WIDTH,
            self.well.h + 2 * BORDER_WIDTH,
        )
    }
}

pub fn draw_scene(gfx: &mut dyn Renderer2d, scene: &Scene<'_>) {
    let size = gfx.size();
    let layout = BoardLayout::compute(size.width, size.height, scene.cell_size);

    gfx.clear(COLOR_BACKGROUND);

    if let Some(board) = scene.board {
        draw_board(gfx, &layout, board, scene.images);
    }
    if let Some((piece, anchor)) = scene.piece {
        draw_piece(gfx, &layout, piece, anchor, scene.images);
    }

    gfx.stroke_rect(layout.border(), BLACK, BORDER_WIDTH);

    match scene.view {
        GameView::Title => draw_overlay(gfx, layout.well, &["PRESS ENTER TO PLAY"]),
        GameView::GameOver => draw_overlay(gfx, layout.well, &["GAME OVER", "PRESS R TO RETRY"]),
        GameView::Playing => {}
    }
}

fn draw_board(
    gfx: &mut dyn Renderer2d,
    layout: &BoardLayout,
    board: &Board,
    images: &ImageRegistry,
) {
    for (r, row) in board.rows().iter().enumerate() {
        for (c, &cell) in row.iter().enumerate() {
            if cell == 0 {
                continue;
            }
            let Some(rect) = layout.cell_rect(Vec2i::new(c as i32, r as i32)) else {
                continue;
            };
            // Settled cells look their image up by piece type, not by the index the piece had.
            let image = images.resolve(usize::from(cell) - 1);
            draw_block(gfx, rect, image, color_for_piece_type(cell));
        }
    }
}

fn draw_piece(
    gfx: &mut dyn Renderer2d,
    layout: &BoardLayout,
    piece: &ActivePiece,
    anchor: Vec2i,
    images: &ImageRegistry,
) {
    let image = piece.image_index.and_then(|i| images.resolve(i));
    for cell in piece.cells(anchor) {
        if let Some(rect) = layout.cell_rect(cell) {
            draw_block(gfx, rect, image, piece.color());
        }
    }
}

fn draw_block(
    gfx: &mut dyn Renderer2d,
    rect: Rect,
    image: Option<&engine::image::RgbaImage>,
    color: Option<Color>,
) {
    if let Some(image) = image {
        gfx.draw_image(image, rect);
        return;
    }
    gfx.fill_rect(rect, color.unwrap_or(COLOR_BACKGROUND));
    gfx.stroke_rect(rect, BLACK, CELL_STROKE);
}

fn draw_overlay(gfx: &mut dyn Renderer2d, area: Rect, lines: &[&str]) {
    let line_h = font::GLYPH_H * TEXT_SCALE;
    let widest = lines
        .iter()
        .map(|l| font::text_width(l, TEXT_SCALE))
        .max()
        .unwrap_or(0);
    let n = lines.len() as u32;
    let text_h = n * line_h + n.saturating_sub(1) * TEXT_LINE_GAP;

    let panel = area.centered(widest + 2 * PANEL_PADDING, text_h + 2 * PANEL_PADDING);
    gfx.fill_rect(panel, COLOR_OVERLAY_PANEL);
    gfx.stroke_rect(panel, BLACK, 2);

    let mut y = panel.y + PANEL_PADDING;
    for line in lines {
        let w = font::text_width(line, TEXT_SCALE);
        let x = panel.x + panel.w.saturating_sub(w) / 2;
        gfx.draw_text(x, y, line, COLOR_OVERLAY_TEXT, TEXT_SCALE);
        y += line_h + TEXT_LINE_GAP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_fills_a_window_of_exact_size() {
        let (w, h) = window_size(BLOCK_SIZE);
        assert_eq!((w, h), (310, 610));

        let layout = BoardLayout::compute(w, h, BLOCK_SIZE);
        assert_eq!(layout.well, Rect::new(5, 5, 300, 600));
        assert_eq!(layout.border(), Rect::new(0, 0, 310, 610));
    }

    #[test]
    fn layout_centers_in_larger_surface() {
        let layout = BoardLayout::compute(410, 710, BLOCK_SIZE);
        assert_eq!(layout.well, Rect::new(55, 55, 300, 600));
    }

    #[test]
    fn cells_above_the_well_have_no_rect() {
        let layout = BoardLayout::compute(310, 610, BLOCK_SIZE);
        assert_eq!(layout.cell_rect(Vec2i::new(4, -1)), None);
        assert_eq!(
            layout.cell_rect(Vec2i::new(2, 3)),
            Some(Rect::new(65, 95, 30, 30))
        );
    }
}
