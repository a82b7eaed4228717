use std::path::Path;

use kuwahara_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as RGB8.
///
/// The method tries to read from any image format supported by the image
/// crate, converting the decoded pixels to 8-bit RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the decoded pixel data.
pub fn read_image_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    // decode the data directly from memory
    let img = image::ImageReader::new(std::io::Cursor::new(&mmap))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Writes an RGB8 image to the given file path.
///
/// The output format is derived from the file extension, any format the
/// image crate can encode is accepted.
///
/// # Arguments
///
/// * `file_path` - The path where the image is written.
/// * `image` - The image containing the pixel data.
pub fn write_image_rgb8(file_path: impl AsRef<Path>, image: &Image<u8, 3>) -> Result<(), IoError> {
    let buffer = image::RgbImage::from_raw(
        image.width() as u32,
        image.height() as u32,
        image.as_slice().to_vec(),
    )
    .ok_or(IoError::InvalidImageBuffer)?;

    buffer.save(file_path)?;

    Ok(())
}
