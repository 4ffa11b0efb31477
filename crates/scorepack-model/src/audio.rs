//! Audio payload attached to a score

use serde::{Deserialize, Serialize};

/// Opaque audio payload carried by a score document.
///
/// The slot is declared while the score content is parsed; the bytes are
/// attached afterwards by the load orchestrator. Codec behavior is outside
/// this subsystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    data: Vec<u8>,
}

impl Audio {
    /// Create an empty audio slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the payload bytes.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    /// The payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether no payload has been attached.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
