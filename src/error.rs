//! Error types for the schematic compactor.

use thiserror::Error;

/// Result type alias using CompactorError.
pub type Result<T> = std::result::Result<T, CompactorError>;

/// Main error type for resolution and compaction operations.
///
/// Every variant is terminal for the current request: no error is retried or
/// recovered, and a failed region produces no partial output.
#[derive(Error, Debug)]
pub enum CompactorError {
    /// Failed to read or parse a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid asset store structure.
    #[error("Invalid asset store: {0}")]
    InvalidAssetStore(String),

    /// A model document was not found in the asset store.
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// A blockstate document was not found in the asset store.
    #[error("Blockstate not found: {0}")]
    BlockstateNotFound(String),

    /// No variant key matched the block's property set.
    #[error("No matching variant for {block} with properties {properties:?}")]
    VariantNotFound {
        block: String,
        properties: Vec<(String, String)>,
    },

    /// A model's parent chain revisited an already-seen model id.
    #[error("Cyclic parent reference in model chain at: {0}")]
    CyclicParentReference(String),

    /// A concrete texture id has no file in the asset store.
    #[error("Texture not found: {0}")]
    TextureNotFound(String),

    /// A `#name` indirection survived the single substitution pass.
    #[error("Unresolved texture reference: {0}")]
    UnresolvedTextureReference(String),

    /// A face referenced a symbolic key absent from the resolved texture map.
    #[error("Texture key not found in model definition: {0}")]
    TextureKeyNotFound(String),

    /// An elementless block had no matching tile entity in the region.
    #[error("Tile entity not found for block: {0}")]
    TileEntityNotFound(String),
}
