use thiserror::Error;

/// Data-quality failures of the filtering pipeline.
///
/// Neither variant is fatal: the dashboard turns them into status lines and
/// keeps running in a degraded state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// A required column is absent from the loaded table.
    #[error("'{column}' column missing in the dataset")]
    Schema { column: String },

    /// The table is empty or a required column has no usable values.
    #[error("{0}")]
    Data(String),
}

impl DashboardError {
    pub fn data(msg: impl Into<String>) -> Self {
        DashboardError::Data(msg.into())
    }
}
