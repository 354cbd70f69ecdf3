/// Tuning knobs for a [`Buffer`](crate::Buffer).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BufferConfig {
    /// Copying appends extend the last chunk while it is shorter than this
    /// many bytes; otherwise they start a new chunk.
    pub coalesce_limit: usize,
}

impl BufferConfig {
    /// Default value of [`coalesce_limit`](Self::coalesce_limit).
    pub const DEFAULT_COALESCE_LIMIT: usize = 4096;
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            coalesce_limit: Self::DEFAULT_COALESCE_LIMIT,
        }
    }
}
