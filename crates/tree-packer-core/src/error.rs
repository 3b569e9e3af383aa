use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreePackerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Nothing to pack")]
    EmptyInput,
    #[error("Item '{id}' has invalid dimensions {width}x{height}")]
    InvalidDimensions { id: String, width: u32, height: u32 },
    #[error("Item id '{id}' is used more than once")]
    DuplicateId { id: String },
    #[error("Item '{id}' ({width}x{height}) does not fit in an empty atlas")]
    ItemExceedsAtlas { id: String, width: u32, height: u32 },
    #[error("Item '{id}' could not be placed, even in a new atlas")]
    InsertionFailed { id: String },
    #[error("No image registered for item '{id}'")]
    MissingImage { id: String },
}

pub type Result<T> = std::result::Result<T, TreePackerError>;
