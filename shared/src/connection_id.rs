use std::fmt;

use rand::{Rng, distr::Alphanumeric, rng};
use serde::{Deserialize, Serialize};

pub const CONNECTION_ID_LENGTH: usize = 20;
const SHORT_ID_LENGTH: usize = 5;

/// Opaque identifier of one live transport session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn generate() -> Self {
        let id = rng()
            .sample_iter(&Alphanumeric)
            .take(CONNECTION_ID_LENGTH)
            .map(char::from)
            .collect();

        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First few characters, used to build default sender names.
    pub fn short_id(&self) -> &str {
        match self.0.char_indices().nth(SHORT_ID_LENGTH) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConnectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ConnectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
