/// Errors reported by indicator operations
///
/// `E` is the error type of the underlying [`LedTransport`](crate::LedTransport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// A flash sequence is active; the request was rejected without effect.
    Busy,
    /// The transport was not ready when the indicator was brought up.
    DeviceNotReady,
    /// A flash was requested with a zero on-duration.
    ZeroDuration,
    /// The transport failed to write the pixel.
    Transport(E),
}

impl<E> Error<E> {
    /// Transport error, if this is one
    pub fn transport(&self) -> Option<&E> {
        match self {
            Error::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Busy => write!(f, "indicator is busy with a flash sequence"),
            Error::DeviceNotReady => write!(f, "led transport is not ready"),
            Error::ZeroDuration => write!(f, "flash on-duration must be non-zero"),
            Error::Transport(err) => write!(f, "led transport write failed: {:?}", err),
        }
    }
}
