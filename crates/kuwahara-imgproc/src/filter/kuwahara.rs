use kuwahara_image::{Image, ImageError};
use thiserror::Error;

use super::quadrant::{classify, Quadrant};
use super::welford::QuadrantStats;
use crate::color;
use crate::parallel::{self, ExecutionStrategy, ParallelError};

/// Errors that can occur while applying the Kuwahara filter.
#[derive(Error, Debug)]
pub enum KuwaharaError {
    /// The window size is not an odd value of at least 3.
    #[error("window size must be an odd value of at least 3, got {0}")]
    InvalidWindowSize(usize),

    /// No quadrant of a pixel's neighborhood collected enough samples.
    ///
    /// This indicates a window/geometry configuration bug, not a recoverable
    /// runtime condition; no default pixel is substituted.
    #[error("no quadrant with at least 2 samples for the pixel at row {row}, col {col}")]
    EmptyNeighborhood {
        /// Row of the affected output pixel.
        row: usize,
        /// Column of the affected output pixel.
        col: usize,
    },

    /// Error from the image buffers.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error from the execution strategy.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

/// Apply the Kuwahara filter to an RGB8 image with the default strategy.
///
/// See [`kuwahara_with`] for the full documentation.
pub fn kuwahara(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    window_size: usize,
) -> Result<(), KuwaharaError> {
    kuwahara_with(src, dst, window_size, ExecutionStrategy::default())
}

/// Apply the Kuwahara edge-preserving filter to an RGB8 image.
///
/// For every pixel the square neighborhood of side `window_size` is split
/// into four overlapping quadrants; the pixel is replaced by the channel
/// average of the quadrant with the lowest luminosity variance. Flat regions
/// are smoothed while edges survive, because the lowest-variance quadrant
/// tends to lie entirely on one side of an edge.
///
/// Neighbors outside the image are skipped, so windows near the border are
/// asymmetric and truncated. The output does not depend on the execution
/// strategy.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
/// * `dst` - The destination image with shape (H, W, 3). Must be a distinct
///   buffer: the scan for one pixel reads neighbors another pixel overwrites.
/// * `window_size` - The side length of the filter window, odd and >= 3.
/// * `strategy` - How the per-pixel work is scheduled.
///
/// # Errors
///
/// Fails if the images differ in size, the window size is invalid, or some
/// pixel ends up with no quadrant holding at least two samples (only
/// reachable with degenerate image/window geometry).
///
/// # Example
///
/// ```
/// use kuwahara_image::{Image, ImageSize};
/// use kuwahara_imgproc::filter::kuwahara;
///
/// let size = ImageSize { width: 4, height: 4 };
/// let src = Image::<u8, 3>::from_size_val(size, 128).unwrap();
/// let mut dst = Image::<u8, 3>::from_size_val(size, 0).unwrap();
///
/// kuwahara(&src, &mut dst, 3).unwrap();
/// assert_eq!(dst.as_slice(), src.as_slice());
/// ```
pub fn kuwahara_with(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    window_size: usize,
    strategy: ExecutionStrategy,
) -> Result<(), KuwaharaError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    if window_size % 2 == 0 || window_size < 3 {
        return Err(KuwaharaError::InvalidWindowSize(window_size));
    }

    // extent of each quadrant arm from the center
    let radius = window_size.div_ceil(2);

    let luma = color::luminosity_plane(src);
    let rows = src.rows();
    let cols = src.cols();
    let src_data = src.as_slice();

    parallel::try_for_each_pixel(dst.as_slice_mut(), cols, 3, strategy, |row, col, pixel| {
        filter_pixel(src_data, &luma, rows, cols, radius, row, col, pixel)
    })
}

/// Compute one output pixel from its quadrant statistics.
///
/// Scans every offset of the window except the center, folds in-bounds
/// samples into the quadrant accumulators, then writes the channel average
/// of the minimum-variance quadrant.
#[allow(clippy::too_many_arguments)]
fn filter_pixel(
    src: &[u8],
    luma: &[f64],
    rows: usize,
    cols: usize,
    radius: usize,
    row: usize,
    col: usize,
    pixel: &mut [u8],
) -> Result<(), KuwaharaError> {
    let mut stats = [QuadrantStats::default(); 4];
    let arm = radius as isize - 1;

    for di in -arm..=arm {
        for dj in -arm..=arm {
            if di == 0 && dj == 0 {
                continue;
            }

            let r = row as isize + di;
            let c = col as isize + dj;
            if r < 0 || r >= rows as isize || c < 0 || c >= cols as isize {
                // truncated window at the border, no substitute sample
                continue;
            }

            let idx = r as usize * cols + c as usize;
            let sample = &src[idx * 3..idx * 3 + 3];

            let (q1, q2) = classify(di, dj);
            stats[q1 as usize].fold(sample, luma[idx]);
            if let Some(q2) = q2 {
                stats[q2 as usize].fold(sample, luma[idx]);
            }
        }
    }

    // scan in the fixed quadrant order; strict improvement keeps the first on ties
    let mut winner: Option<(f64, &QuadrantStats)> = None;
    for quadrant in Quadrant::ALL {
        let candidate = &stats[quadrant as usize];
        if let Some(variance) = candidate.variance() {
            match winner {
                Some((best, _)) if variance >= best => {}
                _ => winner = Some((variance, candidate)),
            }
        }
    }

    let Some((_, best)) = winner else {
        return Err(KuwaharaError::EmptyNeighborhood { row, col });
    };

    pixel.copy_from_slice(&best.average());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuwahara_image::ImageSize;

    const BLACK: [u8; 3] = [0, 0, 0];
    const WHITE: [u8; 3] = [255, 255, 255];

    fn image_from_pixels(
        width: usize,
        height: usize,
        pixels: &[[u8; 3]],
    ) -> Result<Image<u8, 3>, ImageError> {
        Image::new(
            ImageSize { width, height },
            pixels.iter().flatten().copied().collect(),
        )
    }

    #[test]
    fn all_black_stays_black() -> Result<(), KuwaharaError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let src = Image::<u8, 3>::from_size_val(size, 0)?;
        let mut dst = Image::<u8, 3>::from_size_val(size, 7)?;

        kuwahara(&src, &mut dst, 3)?;
        assert_eq!(dst.as_slice(), src.as_slice());

        Ok(())
    }

    #[test]
    fn uniform_image_is_a_fixed_point() -> Result<(), KuwaharaError> {
        let size = ImageSize {
            width: 6,
            height: 4,
        };
        let src = Image::<u8, 3>::from_size_val(size, 200)?;
        let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;

        kuwahara(&src, &mut dst, 5)?;
        assert_eq!(dst.as_slice(), src.as_slice());

        Ok(())
    }

    #[test]
    fn edge_is_preserved_not_blended() -> Result<(), KuwaharaError> {
        // 5x5 image, black on the left two columns, white on the rest
        let mut pixels = Vec::new();
        for _row in 0..5 {
            for col in 0..5 {
                pixels.push(if col < 2 { BLACK } else { WHITE });
            }
        }
        let src = image_from_pixels(5, 5, &pixels)?;
        let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;

        kuwahara(&src, &mut dst, 5)?;

        // the pixel on the boundary column snaps to pure white: the quadrant
        // covering rows above, columns right is all white with zero variance.
        // A box blur would produce a gray blend here.
        assert_eq!(dst.pixel(2, 2)?, WHITE);

        // pixels on either side of the edge keep their side's color
        assert_eq!(dst.pixel(0, 2)?, BLACK);
        assert_eq!(dst.pixel(1, 2)?, BLACK);
        assert_eq!(dst.pixel(3, 2)?, WHITE);
        assert_eq!(dst.pixel(4, 2)?, WHITE);

        Ok(())
    }

    #[test]
    fn border_windows_are_truncated_not_fatal() -> Result<(), KuwaharaError> {
        // window larger than the whole image still works, every pixel keeps
        // at least one quadrant with two in-bounds samples
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let src = Image::<u8, 3>::from_size_val(size, 42)?;
        let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;

        kuwahara(&src, &mut dst, 9)?;
        assert_eq!(dst.as_slice(), src.as_slice());

        Ok(())
    }

    #[test]
    fn corner_pixel_selects_the_inward_quadrant() -> Result<(), KuwaharaError> {
        // corner (0, 0): only offsets (0,1), (1,0) and (1,1) are in bounds,
        // so only the quadrant extending down-right reaches count >= 2
        let pixels = [
            [10, 10, 10],
            [20, 20, 20],
            [30, 30, 30], //
            [40, 40, 40],
            [50, 50, 50],
            [60, 60, 60], //
            [70, 70, 70],
            [80, 80, 80],
            [90, 90, 90],
        ];
        let src = image_from_pixels(3, 3, &pixels)?;
        let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;

        kuwahara(&src, &mut dst, 3)?;

        // samples folded down-right of the corner: (0,1)=20, (1,0)=40, (1,1)=50
        // truncated average: 110 / 3 = 36
        assert_eq!(dst.pixel(0, 0)?, [36, 36, 36]);

        Ok(())
    }

    #[test]
    fn single_pixel_image_is_fatal() -> Result<(), KuwaharaError> {
        let size = ImageSize {
            width: 1,
            height: 1,
        };
        let src = Image::<u8, 3>::from_size_val(size, 0)?;
        let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;

        let res = kuwahara(&src, &mut dst, 3);
        assert!(matches!(
            res,
            Err(KuwaharaError::EmptyNeighborhood { row: 0, col: 0 })
        ));

        Ok(())
    }

    #[test]
    fn even_window_is_rejected() -> Result<(), KuwaharaError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let src = Image::<u8, 3>::from_size_val(size, 0)?;
        let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;

        let res = kuwahara(&src, &mut dst, 8);
        assert!(matches!(res, Err(KuwaharaError::InvalidWindowSize(8))));

        let res = kuwahara(&src, &mut dst, 1);
        assert!(matches!(res, Err(KuwaharaError::InvalidWindowSize(1))));

        Ok(())
    }

    #[test]
    fn size_mismatch_is_rejected() -> Result<(), KuwaharaError> {
        let src = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0,
        )?;
        let mut dst = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 3,
                height: 4,
            },
            0,
        )?;

        let res = kuwahara(&src, &mut dst, 3);
        assert!(matches!(res, Err(KuwaharaError::Image(_))));

        Ok(())
    }

    #[test]
    fn tie_break_picks_the_first_quadrant() -> Result<(), KuwaharaError> {
        // the top-left and bottom-right quadrants of the center pixel share
        // no samples, so both can be uniform (zero variance) with different
        // colors; the fixed enumeration order makes the top-left one win
        let pixels = [
            [10, 10, 10],
            [10, 10, 10],
            [99, 99, 99], //
            [10, 10, 10],
            [0, 0, 0],
            [40, 40, 40], //
            [99, 99, 99],
            [40, 40, 40],
            [40, 40, 40],
        ];
        let src = image_from_pixels(3, 3, &pixels)?;
        let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;

        kuwahara(&src, &mut dst, 3)?;

        // top-left quadrant: samples (0,0), (0,1), (1,0) = all 10, variance 0
        // bottom-right quadrant: samples (1,2), (2,1), (2,2) = all 40, variance 0
        assert_eq!(dst.pixel(1, 1)?, [10, 10, 10]);

        Ok(())
    }
}
