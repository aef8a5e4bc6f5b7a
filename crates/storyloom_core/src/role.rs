//! Chat participant roles.

use serde::{Deserialize, Serialize};

/// Who authored a chat message.
///
/// Serialized lowercase, which is what OpenAI-compatible endpoints expect.
///
/// ```
/// use storyloom_core::Role;
///
/// assert_eq!(Role::System.to_string(), "system");
/// assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the whole exchange
    #[display("system")]
    System,
    /// The request written by the pipeline
    #[display("user")]
    User,
    /// Text produced by the model
    #[display("assistant")]
    Assistant,
}
