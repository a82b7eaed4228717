use kuwahara_image::Image;
use rayon::prelude::*;

/// Define the RGB weights for the luminosity computation.
const RW: f64 = 0.299;
const GW: f64 = 0.587;
const BW: f64 = 0.114;

/// Compute the luminosity of an RGB8 pixel using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// The result lies in `[0, 255]` and is used only to compare quadrant
/// homogeneity, never to produce output colors.
///
/// # Arguments
///
/// * `pixel` - The pixel channel values in RGB order.
///
/// Precondition: the pixel slice must have at least 3 channels.
///
/// # Example
///
/// ```
/// use kuwahara_imgproc::color::luminosity;
///
/// assert_eq!(luminosity(&[0, 0, 0]), 0.0);
/// assert!((luminosity(&[255, 255, 255]) - 255.0).abs() < 1e-9);
/// ```
pub fn luminosity(pixel: &[u8]) -> f64 {
    RW * f64::from(pixel[0]) + GW * f64::from(pixel[1]) + BW * f64::from(pixel[2])
}

/// Compute the luminosity plane of an RGB8 image.
///
/// Each input pixel's luminosity is computed exactly once per filter pass and
/// shared read-only by all windows that visit the pixel.
///
/// # Arguments
///
/// * `src` - The input RGB8 image.
///
/// # Returns
///
/// A row-major vector with one luminosity value per pixel.
pub fn luminosity_plane(src: &Image<u8, 3>) -> Vec<f64> {
    // parallelize by rows, same order as the pixel buffer
    src.as_slice()
        .par_chunks_exact(3 * src.cols())
        .flat_map_iter(|row| row.chunks_exact(3).map(luminosity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kuwahara_image::{ImageError, ImageSize};

    #[test]
    fn luminosity_weights_sum_to_one() {
        assert_relative_eq!(luminosity(&[255, 255, 255]), 255.0, epsilon = 1e-9);
    }

    #[test]
    fn luminosity_single_channels() {
        assert_relative_eq!(luminosity(&[100, 0, 0]), 29.9, epsilon = 1e-9);
        assert_relative_eq!(luminosity(&[0, 100, 0]), 58.7, epsilon = 1e-9);
        assert_relative_eq!(luminosity(&[0, 0, 100]), 11.4, epsilon = 1e-9);
    }

    #[test]
    fn luminosity_plane_matches_per_pixel() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![
                10, 20, 30, 40, 50, 60, 70, 80, 90, //
                90, 80, 70, 60, 50, 40, 30, 20, 10,
            ],
        )?;

        let plane = luminosity_plane(&image);
        assert_eq!(plane.len(), 6);

        for (chunk, luma) in image.as_slice().chunks_exact(3).zip(plane.iter()) {
            assert_relative_eq!(luminosity(chunk), *luma);
        }

        Ok(())
    }
}
