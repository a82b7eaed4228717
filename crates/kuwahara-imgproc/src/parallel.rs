use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how per-pixel operations are executed.
///
/// Every strategy dispatches the same per-pixel function over a disjoint
/// partition of the output buffer, so the result is byte-identical
/// regardless of the strategy. An accelerator offload (upload the input,
/// run one synchronous kernel, download the output) would plug in here as
/// one more variant without touching the per-pixel algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    ///
    /// This is often more cache-friendly than [`ExecutionStrategy::ParallelPixels`].
    #[default]
    ParallelRows,

    /// Use the global Rayon thread pool to process every pixel in parallel.
    ///
    /// This maximizes parallelism but may have overhead for small images.
    ParallelPixels,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of
    /// parallelization outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Apply a fallible function to each pixel of the destination buffer.
///
/// The buffer is interpreted with shape (H, W, `channels`) and the function
/// receives the (row, col) coordinates together with the mutable channel
/// slice of that pixel. Each pixel is owned by exactly one task, so no
/// synchronization is needed beyond the final join.
///
/// # Arguments
///
/// * `dst` - The destination buffer, partitioned by pixel ownership.
/// * `cols` - The number of pixels per row.
/// * `channels` - The number of channels per pixel.
/// * `strategy` - The execution strategy.
/// * `op` - The operation to perform on each pixel.
///
/// # Errors
///
/// The first error returned by `op`, or a [`ParallelError`] if the strategy
/// itself is invalid.
pub fn try_for_each_pixel<T, E, F>(
    dst: &mut [T],
    cols: usize,
    channels: usize,
    strategy: ExecutionStrategy,
    op: F,
) -> Result<(), E>
where
    T: Send,
    E: From<ParallelError> + Send,
    F: Fn(usize, usize, &mut [T]) -> Result<(), E> + Send + Sync,
{
    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(cols * channels)
                .enumerate()
                .try_for_each(|(r, row)| {
                    row.chunks_exact_mut(channels)
                        .enumerate()
                        .try_for_each(|(c, pixel)| op(r, c, pixel))
                })
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_exact_mut(cols * channels)
                .enumerate()
                .try_for_each(|(r, row)| {
                    row.chunks_exact_mut(channels)
                        .enumerate()
                        .try_for_each(|(c, pixel)| op(r, c, pixel))
                })
        }
        ExecutionStrategy::ParallelPixels => dst
            .par_chunks_exact_mut(channels)
            .enumerate()
            .try_for_each(|(i, pixel)| op(i / cols, i % cols, pixel)),
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n).into());
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_exact_mut(cols * channels)
                    .enumerate()
                    .try_for_each(|(r, row)| {
                        row.chunks_exact_mut(channels)
                            .enumerate()
                            .try_for_each(|(c, pixel)| op(r, c, pixel))
                    })
            })
        }
    }
}
