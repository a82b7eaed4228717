/// Running statistics for one quadrant of the filter window.
///
/// Tracks the per-channel sums for averaging and a single-pass Welford
/// mean/M2 accumulator over luminosity for the variance. The single-pass
/// update avoids storing the samples and a second pass over the window.
///
/// The accumulator is reset (via `Default`) at the start of every output
/// pixel and never reused across pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuadrantStats {
    channel_sum: [u32; 3],
    count: u32,
    mean: f64,
    m2: f64,
}

impl QuadrantStats {
    /// Fold one neighbor sample into the statistics.
    ///
    /// # Arguments
    ///
    /// * `pixel` - The sample's channel values.
    /// * `luma` - The sample's precomputed luminosity.
    ///
    /// Precondition: the pixel slice must have at least 3 channels.
    pub fn fold(&mut self, pixel: &[u8], luma: f64) {
        self.count += 1;
        for (sum, &ch) in self.channel_sum.iter_mut().zip(pixel.iter()) {
            *sum += u32::from(ch);
        }

        // Welford's online update
        let delta = luma - self.mean;
        self.mean += delta / f64::from(self.count);
        let delta2 = luma - self.mean;
        self.m2 += delta * delta2;
    }

    /// The number of samples folded in so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The luminosity variance `m2 / count` of the folded samples.
    ///
    /// Returns `None` for fewer than two samples, in which case the quadrant
    /// has no valid variance and must not take part in selection.
    pub fn variance(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        Some(self.m2 / f64::from(self.count))
    }

    /// The channel-wise average of the folded samples, truncated to u8.
    ///
    /// Precondition: `count >= 1`.
    pub fn average(&self) -> [u8; 3] {
        debug_assert!(self.count >= 1, "average of an empty quadrant");
        [
            (self.channel_sum[0] / self.count) as u8,
            (self.channel_sum[1] / self.count) as u8,
            (self.channel_sum[2] / self.count) as u8,
        ]
    }
}
