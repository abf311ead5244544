use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("Unknown side {0:?}, expected one of left, right, top, bottom")]
    UnknownSide(String),
    #[error("Relationship references table {0} which is not part of the schema")]
    MissingTable(String),
    #[error("Scale must be a finite number greater than zero, got {0}")]
    InvalidScale(f32),
    #[error("Canvas of {width}x{height} px exceeds the {max} px limit per side")]
    CanvasTooLarge { width: f32, height: f32, max: f32 },
    #[error("Failed to allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },
    #[error("Invalid SVG: {0}")]
    Svg(String),
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),
    #[error("PNG output requires the `png` feature")]
    PngUnsupported,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
