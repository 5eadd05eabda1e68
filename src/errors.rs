#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Invalid document URL: {0}")]
    InvalidUrl(String),

    #[error("Document not found")]
    DocumentNotFound,

    #[error("Jar store refused to provision a jar")]
    StoreRefused,

    #[error("Internal document error")]
    Internal,
}
