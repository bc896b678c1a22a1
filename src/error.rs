use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid pixel size: width={width}, height={height}")]
    InvalidPixelSize { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("render context unavailable")]
    ContextUnavailable,
}
