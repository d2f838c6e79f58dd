//! Fixed-window GPS drain
//!
//! Each sampler cycle gives the receiver a fixed slice of time. Every byte
//! arriving within it goes to the decoder, and the slice is always used up
//! whether the stream is busy, quiet or failing.

use core::future::Future;
use core::pin::pin;

use embassy_futures::select::{select, Either};
use embassy_futures::yield_now;
use fieldlink_core::traits::FixDecoder;
use fieldlink_hal::uart::ByteSource;

/// Bytes requested per read
const CHUNK: usize = 64;

/// What one window saw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainReport {
    /// Bytes handed to the decoder
    pub bytes: usize,
    /// Failed reads
    pub errors: u32,
}

/// Feed `decoder` from `source` until `window` resolves
///
/// `window` is typically a timer for the drain period. It is checked
/// before every read, so a stream that is always ready cannot hold the
/// drain open. A failed read yields to the executor before the next
/// attempt.
pub async fn drain<S, D, W>(source: &mut S, decoder: &mut D, window: W) -> DrainReport
where
    S: ByteSource,
    D: FixDecoder,
    W: Future<Output = ()>,
{
    let mut window = pin!(window);
    let mut buf = [0u8; CHUNK];
    let mut report = DrainReport::default();

    loop {
        let event = select(window.as_mut(), source.read(&mut buf)).await;
        match event {
            Either::First(()) => return report,
            Either::Second(Ok(n)) => {
                decoder.feed_bytes(&buf[..n]);
                report.bytes += n;
            }
            Either::Second(Err(_)) => {
                report.errors += 1;
                yield_now().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::NmeaDecoder;
    use core::cell::Cell;
    use core::pin::Pin;
    use core::task::{Context, Poll};
    use embassy_futures::block_on;
    use fieldlink_core::traits::GpsFix;
    use fieldlink_hal::uart::UartError;

    const GGA_FIX: &[u8] =
        b"$GPGGA,120000.00,5027.0000,N,03031.2000,E,1,07,1.0,180.2,M,27.0,M,,*64\r\n";

    /// Serial line replaying fixed bytes, then silent
    struct Replay {
        data: &'static [u8],
        pos: usize,
        reads: u32,
        fail: bool,
    }

    impl Replay {
        fn new(data: &'static [u8]) -> Self {
            Self {
                data,
                pos: 0,
                reads: 0,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(b"")
            }
        }
    }

    impl ByteSource for Replay {
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, UartError> {
            self.reads += 1;
            if self.fail {
                return Err(UartError::Overrun);
            }
            if self.pos == self.data.len() {
                return core::future::pending().await;
            }
            let n = buf.len().min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    /// Window that closes after a number of polls
    struct Countdown<'a> {
        left: &'a Cell<u32>,
    }

    impl Future for Countdown<'_> {
        type Output = ();

        fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            let left = self.left.get();
            if left == 0 {
                return Poll::Ready(());
            }
            self.left.set(left - 1);
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }

    #[test]
    fn test_window_used_up_after_early_data() {
        let left = Cell::new(50);
        let mut source = Replay::new(GGA_FIX);
        let mut decoder = NmeaDecoder::new();

        let report = block_on(drain(&mut source, &mut decoder, Countdown { left: &left }));

        assert_eq!(report.bytes, GGA_FIX.len());
        assert_eq!(report.errors, 0);
        assert!(decoder.fix().has_location());
        // Data was all there at the start; the drain still waited it out
        assert_eq!(left.get(), 0);
        assert!(source.reads > 2);
    }

    #[test]
    fn test_failing_line_still_waits_out_window() {
        let left = Cell::new(20);
        let mut source = Replay::failing();
        let mut decoder = NmeaDecoder::new();

        let report = block_on(drain(&mut source, &mut decoder, Countdown { left: &left }));

        assert_eq!(report.bytes, 0);
        assert!(report.errors > 0);
        assert_eq!(left.get(), 0);
    }

    #[test]
    fn test_absent_receiver_leaves_fix_empty() {
        let left = Cell::new(10);
        let mut source: Option<Replay> = None;
        let mut decoder = NmeaDecoder::new();

        let report = block_on(drain(&mut source, &mut decoder, Countdown { left: &left }));

        assert_eq!(report, DrainReport::default());
        assert_eq!(left.get(), 0);
        assert_eq!(decoder.fix(), GpsFix::default());
    }

    #[test]
    fn test_closed_window_reads_nothing() {
        let left = Cell::new(0);
        let mut source = Replay::new(GGA_FIX);
        let mut decoder = NmeaDecoder::new();

        let report = block_on(drain(&mut source, &mut decoder, Countdown { left: &left }));

        assert_eq!(report, DrainReport::default());
        assert_eq!(source.reads, 0);
    }

    #[test]
    fn test_always_ready_line_cannot_hold_window_open() {
        static STREAM: [u8; 4096] = [b'x'; 4096];
        let left = Cell::new(3);
        let mut source = Replay::new(&STREAM);
        let mut decoder = NmeaDecoder::new();

        let report = block_on(drain(&mut source, &mut decoder, Countdown { left: &left }));

        assert_eq!(report.bytes, 3 * CHUNK);
        assert!(source.pos < STREAM.len());
    }
}
