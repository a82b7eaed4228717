/// One of the four overlapping quadrants of the filter window.
///
/// Each quadrant is anchored at the center pixel and extends into one
/// diagonal direction. The discriminant doubles as the accumulator index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// Offsets with negative row and column deltas.
    TopLeft = 0,
    /// Offsets with positive row and negative column deltas.
    TopRight = 1,
    /// Offsets with negative row and positive column deltas.
    BottomLeft = 2,
    /// Offsets with positive row and column deltas.
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in the fixed enumeration order used for selection.
    ///
    /// The minimum-variance search scans this order and updates only on
    /// strict improvement, so the first quadrant wins ties.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];
}

/// Classify a neighborhood offset into the quadrants it belongs to.
///
/// Diagonal offsets belong to exactly one quadrant. Axis-aligned offsets
/// (one zero component) belong to two, so the four quadrants overlap along
/// the cross through the center, per the standard definition of the filter.
///
/// # Arguments
///
/// * `di` - The row delta relative to the center pixel.
/// * `dj` - The column delta relative to the center pixel.
///
/// # Panics
///
/// Panics on the center offset (0, 0). The window scan never emits it, so
/// reaching it is a logic error and must not continue with an undefined
/// quadrant assignment.
pub fn classify(di: isize, dj: isize) -> (Quadrant, Option<Quadrant>) {
    match (di.signum(), dj.signum()) {
        (-1, -1) => (Quadrant::TopLeft, None),
        (1, -1) => (Quadrant::TopRight, None),
        (-1, 1) => (Quadrant::BottomLeft, None),
        (1, 1) => (Quadrant::BottomRight, None),
        (0, -1) => (Quadrant::TopLeft, Some(Quadrant::TopRight)),
        (0, 1) => (Quadrant::BottomLeft, Some(Quadrant::BottomRight)),
        (-1, 0) => (Quadrant::TopLeft, Some(Quadrant::BottomLeft)),
        (1, 0) => (Quadrant::TopRight, Some(Quadrant::BottomRight)),
        _ => unreachable!("offset (0, 0) does not belong to any quadrant"),
    }
}
