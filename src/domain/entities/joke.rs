use serde::{Deserialize, Serialize};

/// A joke record from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: i64,
    pub text: String,
    /// Number of times this joke has been delivered
    pub used_count: u64,
}

impl Joke {
    pub fn new(id: i64, text: impl Into<String>, used_count: u64) -> Self {
        Self {
            id,
            text: text.into(),
            used_count,
        }
    }
}
