//! UART implementation

use embedded_io_async::Read;
use esp_hal::uart::{Error, UartRx};
use esp_hal::Async;
use fieldlink_hal::uart::{ByteSource, UartError};

/// Receive half of an async UART
pub struct UartSource<'d> {
    rx: UartRx<'d, Async>,
}

impl<'d> UartSource<'d> {
    pub fn new(rx: UartRx<'d, Async>) -> Self {
        Self { rx }
    }
}

impl ByteSource for UartSource<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, UartError> {
        Read::read(&mut self.rx, buf).await.map_err(|e| match e {
            Error::RxFifoOvf => UartError::Overrun,
            _ => UartError::Driver,
        })
    }
}
