//! Score overlay drawn with a 3x5 block font
//!
//! Every lit cell of a glyph is one unit cube scaled to the cell size and
//! drawn under an orthographic projection in window pixels.

use glam::{Mat4, Vec3};

use crate::renderer::{CubeRenderer, colors};

/// Pixel size of one glyph cell
pub const CELL_WIDTH: f32 = 6.0;
pub const CELL_HEIGHT: f32 = 8.0;
pub const DIGIT_COLS: usize = 3;
pub const DIGIT_ROWS: usize = 5;
/// Horizontal gap between digits, in pixels
pub const DIGIT_GAP: f32 = 4.0;
/// x of the first digit's left column
pub const ANCHOR_X: f32 = 20.0;
/// Distance from the top of the window to the first glyph row
pub const TOP_MARGIN: f32 = 28.0;

/// Glyph rows top to bottom, bit 2 is the left column
pub const GLYPHS: [[u8; DIGIT_ROWS]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

/// Glyph for `ch`; anything that is not a decimal digit renders as '0'
pub fn glyph(ch: char) -> &'static [u8; DIGIT_ROWS] {
    let index = ch.to_digit(10).unwrap_or(0) as usize;
    &GLYPHS[index]
}

#[inline]
fn lit(row_bits: u8, col: usize) -> bool {
    row_bits & (1 << (DIGIT_COLS - 1 - col)) != 0
}

/// Pixel-space projection, origin bottom-left
pub fn overlay_projection(viewport: (u32, u32)) -> Mat4 {
    Mat4::orthographic_rh(0.0, viewport.0 as f32, 0.0, viewport.1 as f32, -1.0, 1.0)
}

/// Model matrices for every lit cell of `score`, left to right, top to bottom
pub fn cell_transforms(score: i64, viewport: (u32, u32)) -> Vec<Mat4> {
    let text = score.max(0).to_string();
    let digit_spacing = DIGIT_COLS as f32 * CELL_WIDTH + DIGIT_GAP;
    let anchor_y = viewport.1 as f32 - TOP_MARGIN;
    let scale = Mat4::from_scale(Vec3::new(CELL_WIDTH * 0.5, CELL_HEIGHT * 0.5, 1.0));

    let mut transforms = Vec::new();
    for (i, ch) in text.chars().enumerate() {
        let base_x = ANCHOR_X + i as f32 * digit_spacing;
        for (row, &bits) in glyph(ch).iter().enumerate() {
            for col in (0..DIGIT_COLS).filter(|&c| lit(bits, c)) {
                let x = base_x + col as f32 * CELL_WIDTH;
                let y = anchor_y - row as f32 * CELL_HEIGHT;
                transforms.push(Mat4::from_translation(Vec3::new(x, y, 0.0)) * scale);
            }
        }
    }
    transforms
}

/// Draw `score` in the top-left corner. Leaves the overlay view and
/// projection set; the caller restores its own at the next frame.
pub fn draw_score<R: CubeRenderer>(renderer: &mut R, score: i64, viewport: (u32, u32)) {
    renderer.set_projection(overlay_projection(viewport));
    renderer.set_view(Mat4::IDENTITY);
    for model in cell_transforms(score, viewport) {
        renderer.draw_cube(model, colors::HUD);
    }
}
