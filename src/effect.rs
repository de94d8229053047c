//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Read a `FetchState` snapshot from disk
    LoadSnapshot { path: String },
}
