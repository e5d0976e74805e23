use crate::font::{self, GLYPH_H, GLYPH_W};
use crate::image::RgbaImage;
use crate::surface::SurfaceSize;
use crate::ui::Rect;

pub type Color = [u8; 4];

pub const BLACK: Color = [0, 0, 0, 255];

/// The drawing surface a game renders into once per frame.
///
/// Game code only talks to this trait; `CpuRenderer` is the implementation used both for the
/// window (through `pixels`) and for headless tests.
pub trait Renderer2d {
    fn size(&self) -> SurfaceSize;

    /// Opaque fill, clipped to the surface.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Scales `image` into `rect` (nearest neighbour), alpha-blending over existing pixels.
    fn draw_image(&mut self, image: &RgbaImage, rect: Rect);

    /// Outline drawn on the inside of `rect`, `thickness` pixels wide.
    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: u32) {
        if rect.w == 0 || rect.h == 0 || thickness == 0 {
            return;
        }
        let t_x = thickness.min(rect.w);
        let t_y = thickness.min(rect.h);

        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t_y), color);
        self.fill_rect(
            Rect::new(rect.x, rect.bottom().saturating_sub(t_y), rect.w, t_y),
            color,
        );
        self.fill_rect(Rect::new(rect.x, rect.y, t_x, rect.h), color);
        self.fill_rect(
            Rect::new(rect.right().saturating_sub(t_x), rect.y, t_x, rect.h),
            color,
        );
    }

    fn clear_rect(&mut self, rect: Rect, color: Color) {
        self.fill_rect(rect, color);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.clear_rect(Rect::from_size(s.width, s.height), color);
    }

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let mut cursor_x = x;
        for ch in text.chars() {
            let g = font::glyph(ch);
            for row in 0..GLYPH_H {
                for col in 0..GLYPH_W {
                    if !font::glyph_bit(g, col, row) {
                        continue;
                    }
                    self.fill_rect(
                        Rect::new(
                            cursor_x.saturating_add(col * scale),
                            y.saturating_add(row * scale),
                            scale,
                            scale,
                        ),
                        color,
                    );
                }
            }
            cursor_x = cursor_x.saturating_add((GLYPH_W + 1) * scale);
        }
    }
}

/// Renderer that writes straight into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    /// Clips `rect` to the surface, returning `None` when nothing remains or the buffer is too
    /// small for the declared size.
    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        if self.frame.len() < self.size.rgba_len() || self.size.is_empty() {
            return None;
        }
        let max_x = rect.right().min(self.size.width);
        let max_y = rect.bottom().min(self.size.height);
        if rect.x >= max_x || rect.y >= max_y {
            return None;
        }
        Some((rect.x, rect.y, max_x, max_y))
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.size.width as usize + x as usize) * 4
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let row_bytes = (x1 - x0) as usize * 4;
        for y in y0..y1 {
            let start = self.offset(x0, y);
            for px in self.frame[start..start + row_bytes].chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, rect: Rect) {
        if image.width() == 0 || image.height() == 0 || rect.w == 0 || rect.h == 0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };

        for y in y0..y1 {
            let src_y = ((y - rect.y) as u64 * image.height() as u64 / rect.h as u64) as u32;
            for x in x0..x1 {
                let src_x = ((x - rect.x) as u64 * image.width() as u64 / rect.w as u64) as u32;
                let [r, g, b, a] = image.pixel(src_x, src_y);
                let i = self.offset(x, y);
                let dst = &mut self.frame[i..i + 4];
                match a {
                    0 => {}
                    255 => dst.copy_from_slice(&[r, g, b, 255]),
                    _ => {
                        let a = a as u32;
                        let inv = 255 - a;
                        for (d, s) in dst.iter_mut().zip([r, g, b]) {
                            *d = ((*d as u32 * inv + s as u32 * a + 127) / 255) as u8;
                        }
                        dst[3] = 255;
                    }
                }
            }
        }
    }
}
