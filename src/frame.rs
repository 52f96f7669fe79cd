//! Wire-format frame carried between interface tasks and the upper layer.
//!
//! A `RadioFrame` is one IEEE 802.15.4 PSDU held in a fixed-size buffer so
//! frames move through queues without additional copying. Received frames
//! arrive paired with the link quality the radio reported for them.

/// Maximum PSDU size of an IEEE 802.15.4 frame.
pub const FRAME_SIZE: usize = 127;

/// One frame in transit, in wire format.
///
/// The `data` and `length` fields are intentionally public for zero-copy
/// access from radio driver glue.
#[derive(Clone)]
#[cfg_attr(feature = "std", derive(Debug))]
pub struct RadioFrame {
    pub data: [u8; FRAME_SIZE],
    pub length: usize,
}

impl RadioFrame {
    /// Build a frame from a payload slice, truncating to [`FRAME_SIZE`].
    pub fn new_from_slice(payload: &[u8]) -> Self {
        let length = payload.len().min(FRAME_SIZE);
        let mut data = [0u8; FRAME_SIZE];
        data[..length].copy_from_slice(&payload[..length]);
        RadioFrame { data, length }
    }

    pub fn payload(&self) -> &[u8] {
        &self.data[..self.length.min(FRAME_SIZE)]
    }
}

/// A frame the radio received, with its link quality indicator.
#[derive(Clone)]
#[cfg_attr(feature = "std", derive(Debug))]
pub struct ReceivedFrame {
    pub frame: RadioFrame,
    pub link_quality: u8,
}
