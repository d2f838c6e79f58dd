//! Connectionless radio link abstractions
//!
//! Models a link layer like ESP-NOW: unicast frames to a 6-byte hardware
//! address, one payload per frame, with a link-layer acknowledgment on the
//! transmit side. There is no encryption, sequencing or fragmentation.

use core::fmt;

/// Largest payload carried by one frame (ESP-NOW v1 limit)
pub const MAX_FRAME_PAYLOAD: usize = 250;

/// 6-byte hardware address of a radio peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerAddress(pub [u8; 6]);

impl PeerAddress {
    /// Create a peer address from raw bytes
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes
    pub const fn octets(&self) -> &[u8; 6] {
        &self.0
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PeerAddress {
    fn format(&self, f: defmt::Formatter) {
        let b = &self.0;
        defmt::write!(
            f,
            "{=u8:02X}:{=u8:02X}:{=u8:02X}:{=u8:02X}:{=u8:02X}:{=u8:02X}",
            b[0],
            b[1],
            b[2],
            b[3],
            b[4],
            b[5]
        );
    }
}

/// Radio link errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Radio stack failed to initialize
    Init,
    /// Peer could not be registered
    PeerRegistration,
    /// Frame was not acknowledged by the peer
    NotAcknowledged,
    /// Payload larger than one frame
    PayloadTooLarge,
    /// Receive buffer smaller than the incoming frame
    BufferTooSmall,
    /// Any other driver failure
    Driver,
}

/// Metadata of a received frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceivedFrame {
    /// Sender address
    pub source: PeerAddress,
    /// Number of payload bytes copied into the caller's buffer
    pub len: usize,
}

/// Transmit side of the link
pub trait RadioTx {
    /// Send one frame to `peer`
    ///
    /// Resolves once the link layer reports delivery status: `Ok(())` when
    /// the peer acknowledged, [`RadioError::NotAcknowledged`] otherwise.
    fn send(
        &mut self,
        peer: &PeerAddress,
        payload: &[u8],
    ) -> impl core::future::Future<Output = Result<(), RadioError>>;
}

/// Receive side of the link
pub trait RadioRx {
    /// Wait for the next frame and copy its payload into `buf`
    fn receive(
        &mut self,
        buf: &mut [u8],
    ) -> impl core::future::Future<Output = Result<ReceivedFrame, RadioError>>;
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_peer_display() {
        let peer = PeerAddress::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(peer.to_string(), "00:11:22:33:44:55");
    }
}
