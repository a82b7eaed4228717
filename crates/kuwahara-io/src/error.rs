/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode or encode the image.
    #[error("Failed to decode or encode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] kuwahara_image::ImageError),

    /// Error when the pixel buffer does not match the image dimensions.
    #[error("Image buffer size does not match the image dimensions")]
    InvalidImageBuffer,
}
