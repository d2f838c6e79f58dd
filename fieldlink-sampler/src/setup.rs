//! Peripheral bring-up
//!
//! Only radio failures abort setup. A missing IMU or GPS, or an
//! uncalibrated gas sensor, degrades the record but the loop still runs.

use defmt::*;
use esp_hal::peripherals::WIFI;
use esp_wifi::esp_now::EspNow;
use esp_wifi::EspWifiController;

use fieldlink_hal::radio::{PeerAddress, RadioError};
use fieldlink_hal_esp32::{register_peer, EspNowTx};

/// Setup failures that keep the sampling loop from starting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum SetupError {
    /// Wi-Fi / ESP-NOW stack failed to start
    Radio,
    /// Presenter could not be added as a peer
    Peer(RadioError),
}

/// Start ESP-NOW and register the presenter as the only peer
pub fn radio(
    wifi: &'static EspWifiController<'static>,
    device: WIFI,
    peer: &PeerAddress,
) -> Result<EspNowTx<'static>, SetupError> {
    let esp_now = EspNow::new(wifi, device).map_err(|e| {
        error!("ESP-NOW init failed: {:?}", e);
        SetupError::Radio
    })?;
    if let Ok(version) = esp_now.version() {
        info!("ESP-NOW version {}", version);
    }

    let (manager, sender, _receiver) = esp_now.split();
    register_peer(&manager, peer).map_err(SetupError::Peer)?;
    info!("Peer {} registered", peer);

    Ok(EspNowTx::new(sender))
}
