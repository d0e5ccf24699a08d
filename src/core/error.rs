use std::fmt::Display;
use thiserror::Error;

/// Which of the four inventory collections an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Items,
    Entries,
    Exits,
    Suppliers,
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SourceKind::Items => "stock items",
                SourceKind::Entries => "stock entries",
                SourceKind::Exits => "stock exits",
                SourceKind::Suppliers => "suppliers",
            }
        )
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to read {source_kind}: {source}")]
    SourceRead {
        source_kind: SourceKind,
        #[source]
        source: anyhow::Error,
    },
}

impl ChartError {
    pub fn source_read(source_kind: SourceKind, source: anyhow::Error) -> Self {
        ChartError::SourceRead {
            source_kind,
            source,
        }
    }

    pub fn source_kind(&self) -> SourceKind {
        match self {
            ChartError::SourceRead { source_kind, .. } => *source_kind,
        }
    }
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
