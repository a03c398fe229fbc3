//! Unified error type for hidkit.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

use core::fmt;

/// Top-level error type used across the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Report list
    /// Combined report bytes do not fit the 16-bit `wDescriptorLength` field.
    Oversize { total: usize },

    /// The class descriptor length `6 + 3 * count` does not fit `bLength`.
    TooManyReports { count: usize },

    /// More endpoints than `bNumEndpoints` can describe.
    TooManyEndpoints { count: usize },

    // Buffers
    /// Caller-supplied output buffer is shorter than the bytes to write.
    BufferTooSmall { required: usize, available: usize },

    // Control transfers
    /// SETUP packet shorter than 8 bytes.
    MalformedSetup { len: usize },

    /// The control pipe failed to transmit the reply.
    Transport,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Oversize { total } => {
                write!(f, "report descriptors total {total} bytes, limit is 65535")
            }
            Error::TooManyReports { count } => {
                write!(f, "{count} reports do not fit a HID class descriptor")
            }
            Error::TooManyEndpoints { count } => {
                write!(f, "{count} endpoints do not fit an interface descriptor")
            }
            Error::BufferTooSmall {
                required,
                available,
            } => write!(f, "buffer too small: need {required} bytes, have {available}"),
            Error::MalformedSetup { len } => write!(f, "setup packet is {len} bytes, expected 8"),
            Error::Transport => f.write_str("control pipe transmit failed"),
        }
    }
}

/// Fails with [`Error::BufferTooSmall`] unless `buf` holds at least `required` bytes.
pub(crate) fn ensure_capacity(buf: &[u8], required: usize) -> Result<(), Error> {
    if buf.len() < required {
        return Err(Error::BufferTooSmall {
            required,
            available: buf.len(),
        });
    }
    Ok(())
}
