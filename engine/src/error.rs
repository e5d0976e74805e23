use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("pixel surface error: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("pixel buffer resize failed: {0}")]
    Texture(#[from] pixels::TextureError),
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode png: {0}")]
    Png(#[from] png::DecodingError),
    #[error("unsupported png color type {0:?}")]
    UnsupportedColor(png::ColorType),
    #[error("image {width}x{height} exceeds the decode size limit")]
    ImageTooLarge { width: u32, height: u32 },
    #[error("image dimensions {width}x{height} do not match {len} bytes of pixel data")]
    ImageSize { width: u32, height: u32, len: usize },
}
