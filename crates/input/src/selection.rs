use marionette_kernel::SegmentId;

/// Order in which selection cycles through the figure.
pub const SELECTION_ORDER: [SegmentId; SegmentId::COUNT] = [
    SegmentId::Torso,
    SegmentId::Head,
    SegmentId::LeftForearm,
    SegmentId::LeftArm,
    SegmentId::RightArm,
    SegmentId::RightForearm,
    SegmentId::LeftShin,
    SegmentId::LeftThigh,
    SegmentId::RightThigh,
    SegmentId::RightShin,
];

/// The currently selected segment, cycling in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    cursor: usize,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the cycle at `id`.
    pub fn at(id: SegmentId) -> Self {
        let cursor = SELECTION_ORDER
            .iter()
            .position(|s| *s == id)
            .unwrap_or_default();
        Self { cursor }
    }

    pub fn current(&self) -> SegmentId {
        SELECTION_ORDER[self.cursor]
    }

    pub fn next(&mut self) -> SegmentId {
        self.cursor = (self.cursor + 1) % SELECTION_ORDER.len();
        self.current()
    }

    pub fn previous(&mut self) -> SegmentId {
        self.cursor = (self.cursor + SELECTION_ORDER.len() - 1) % SELECTION_ORDER.len();
        self.current()
    }
}
