use serde::{Deserialize, Serialize};

use chronicle_types::Isolation;

/// Plain-data settings for a [`Chronicle`](crate::Chronicle).
///
/// Hooks and comparators live on [`ChronicleOptions`](crate::ChronicleOptions);
/// this part can be loaded from configuration files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChronicleConfig {
    /// Whether stored values are deep-copied on the way in and out.
    pub isolation: Isolation,
}

impl ChronicleConfig {
    /// Configuration that stores and returns values without deep copies.
    pub fn shared() -> Self {
        Self {
            isolation: Isolation::Shared,
        }
    }
}
