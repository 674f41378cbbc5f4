use crate::item::ItemId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating inventories and definitions.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested item ID does not exist in the inventory.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// A combatant definition failed validation.
    #[error("invalid definition \"{name}\": {reason}")]
    InvalidDefinition {
        /// The combatant name, or an empty string if the name itself is missing.
        name: String,
        /// What is wrong with the definition.
        reason: String,
    },

    /// A definition could not be parsed from JSON.
    #[error("malformed definition: {0}")]
    Parse(#[from] serde_json::Error),
}
