use log::debug;
use pixels::Pixels;

use crate::error::EngineError;
use crate::graphics::{CpuRenderer, Renderer2d};
use crate::surface::{Surface, SurfaceSize};

/// Windowed presentation built on `pixels`.
///
/// The pixel buffer always matches the window size one-to-one, so game code draws in window
/// pixels through the CPU renderer and `present` uploads the finished frame.
pub struct PixelsRenderer2d {
    pixels: Pixels,
    size: SurfaceSize,
}

impl PixelsRenderer2d {
    pub fn new(mut pixels: Pixels, size: SurfaceSize) -> Result<Self, EngineError> {
        pixels.resize_buffer(size.width.max(1), size.height.max(1))?;
        Ok(Self { pixels, size })
    }

    pub fn draw_frame<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut dyn Renderer2d) -> R,
    {
        let mut cpu = CpuRenderer::new(self.pixels.frame_mut(), self.size);
        f(&mut cpu)
    }
}

impl Surface for PixelsRenderer2d {
    type Error = EngineError;

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn frame_mut(&mut self) -> &mut [u8] {
        self.pixels.frame_mut()
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), Self::Error> {
        // Minimised windows report a zero size; keep the old buffer until a real size arrives.
        if size.is_empty() {
            debug!("ignoring resize to empty surface {size:?}");
            return Ok(());
        }
        self.size = size;
        self.pixels.resize_surface(size.width, size.height)?;
        self.pixels.resize_buffer(size.width, size.height)?;
        Ok(())
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.pixels.render()?;
        Ok(())
    }
}
