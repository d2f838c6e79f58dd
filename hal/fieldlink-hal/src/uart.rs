//! Serial byte stream abstractions

/// Errors from a serial receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// Receive FIFO overflowed; bytes were lost
    Overrun,
    /// Any other driver failure
    Driver,
}

/// Asynchronous source of received bytes
pub trait ByteSource {
    /// Wait for at least one byte and copy what is available into `buf`
    ///
    /// Returns the number of bytes written (at least 1 on success).
    fn read(
        &mut self,
        buf: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, UartError>>;
}

/// A receiver that failed to come up never produces bytes
impl<S: ByteSource> ByteSource for Option<S> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, UartError> {
        match self {
            Some(source) => source.read(buf).await,
            None => core::future::pending().await,
        }
    }
}
