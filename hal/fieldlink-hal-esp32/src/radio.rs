//! ESP-NOW radio implementation
//!
//! esp-wifi splits an `EspNow` instance into a manager, a sender and a
//! receiver. The sender and receiver halves are wrapped here so the node
//! loops only see the `RadioTx` / `RadioRx` traits.

use esp_wifi::esp_now::{EspNowError, EspNowManager, EspNowReceiver, EspNowSender, PeerInfo};
use fieldlink_hal::radio::{
    PeerAddress, RadioError, RadioRx, RadioTx, ReceivedFrame, MAX_FRAME_PAYLOAD,
};

/// Register a unicast peer, unencrypted, on the current channel
pub fn register_peer(manager: &EspNowManager<'_>, peer: &PeerAddress) -> Result<(), RadioError> {
    if manager.peer_exists(peer.octets()) {
        return Ok(());
    }
    manager
        .add_peer(PeerInfo {
            peer_address: *peer.octets(),
            lmk: None,
            channel: None,
            encrypt: false,
        })
        .map_err(|_| RadioError::PeerRegistration)
}

fn map_error(err: EspNowError) -> RadioError {
    match err {
        EspNowError::SendFailed => RadioError::NotAcknowledged,
        _ => RadioError::Driver,
    }
}

/// Transmit half
pub struct EspNowTx<'d> {
    sender: EspNowSender<'d>,
}

impl<'d> EspNowTx<'d> {
    pub fn new(sender: EspNowSender<'d>) -> Self {
        Self { sender }
    }
}

impl RadioTx for EspNowTx<'_> {
    async fn send(&mut self, peer: &PeerAddress, payload: &[u8]) -> Result<(), RadioError> {
        if payload.len() > MAX_FRAME_PAYLOAD {
            return Err(RadioError::PayloadTooLarge);
        }
        self.sender
            .send_async(peer.octets(), payload)
            .await
            .map_err(map_error)
    }
}

/// Receive half
pub struct EspNowRx<'d> {
    receiver: EspNowReceiver<'d>,
}

impl<'d> EspNowRx<'d> {
    pub fn new(receiver: EspNowReceiver<'d>) -> Self {
        Self { receiver }
    }
}

impl RadioRx for EspNowRx<'_> {
    async fn receive(&mut self, buf: &mut [u8]) -> Result<ReceivedFrame, RadioError> {
        let frame = self.receiver.receive_async().await;
        let data = frame.data();
        if data.len() > buf.len() {
            return Err(RadioError::BufferTooSmall);
        }
        buf[..data.len()].copy_from_slice(data);
        Ok(ReceivedFrame {
            source: PeerAddress::new(frame.info.src_address),
            len: data.len(),
        })
    }
}
