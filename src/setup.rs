//! Control-endpoint requests for a HID interface.
//!
//! The USB stack owns endpoint 0. It hands us the 8-byte SETUP packet and
//! a scratch buffer; we fill the buffer with the requested descriptor and
//! hand back the slice to transmit, clamped to the host's `wLength`.

use crate::descriptor::{HID_DESCRIPTOR_TYPE, REPORT_DESCRIPTOR_TYPE};
use crate::error::Error;
use crate::interface::HidInterface;

/// Standard request code `GET_DESCRIPTOR`.
pub const GET_DESCRIPTOR: u8 = 0x06;

/// `bmRequestType` direction bit: device-to-host.
const DIR_DEVICE_TO_HOST: u8 = 0x80;
/// `bmRequestType` type field mask (bits 5..6); 0 = standard.
const TYPE_MASK: u8 = 0x60;
/// `bmRequestType` recipient field mask (bits 0..4).
const RECIPIENT_MASK: u8 = 0x1F;
const RECIPIENT_INTERFACE: u8 = 0x01;

/// A decoded SETUP packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetupPacket {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
}

impl SetupPacket {
    pub const LEN: usize = 8;

    /// Standard device-to-host request addressed to an interface.
    pub const fn standard_interface_in(request: u8, value: u16, index: u16, length: u16) -> Self {
        Self {
            request_type: DIR_DEVICE_TO_HOST | RECIPIENT_INTERFACE,
            request,
            value,
            index,
            length,
        }
    }

    /// Standard `GET_DESCRIPTOR` addressed to interface `interface`.
    pub const fn get_interface_descriptor(
        descriptor_type: u8,
        interface: u8,
        length: u16,
    ) -> Self {
        Self::standard_interface_in(
            GET_DESCRIPTOR,
            (descriptor_type as u16) << 8,
            interface as u16,
            length,
        )
    }

    /// Decode the little-endian wire form. Extra trailing bytes are ignored.
    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        if data.len() < Self::LEN {
            return Err(Error::MalformedSetup { len: data.len() });
        }
        Ok(Self {
            request_type: data[0],
            request: data[1],
            value: u16::from_le_bytes([data[2], data[3]]),
            index: u16::from_le_bytes([data[4], data[5]]),
            length: u16::from_le_bytes([data[6], data[7]]),
        })
    }

    /// Descriptor type requested by `GET_DESCRIPTOR` (high byte of `wValue`).
    pub const fn descriptor_type(&self) -> u8 {
        (self.value >> 8) as u8
    }

    /// Descriptor index (low byte of `wValue`).
    pub const fn descriptor_index(&self) -> u8 {
        self.value as u8
    }

    pub const fn is_device_to_host(&self) -> bool {
        self.request_type & DIR_DEVICE_TO_HOST != 0
    }

    pub const fn is_standard(&self) -> bool {
        self.request_type & TYPE_MASK == 0
    }

    pub const fn is_for_interface(&self, interface: u8) -> bool {
        self.request_type & RECIPIENT_MASK == RECIPIENT_INTERFACE
            && self.index as u8 == interface
    }
}

/// The control-endpoint transport: sends an IN data stage.
pub trait ControlPipe {
    fn send_data(&mut self, data: &[u8]) -> Result<(), Error>;
}

/// Bytes to transmit for a reply of `written` bytes when the host asked
/// for `requested`. A short reply is not flagged separately.
pub fn clamp_reply(requested: u16, written: usize) -> usize {
    written.min(usize::from(requested))
}

impl<'a> HidInterface<'a> {
    /// Answer a HID `GET_DESCRIPTOR` request using `scratch` as the output
    /// buffer.
    ///
    /// Returns `Ok(None)` for requests this interface does not serve, so
    /// the caller can pass them on (or stall).
    pub fn respond<'b>(
        &self,
        setup: &SetupPacket,
        scratch: &'b mut [u8],
    ) -> Result<Option<&'b [u8]>, Error> {
        if setup.request != GET_DESCRIPTOR
            || !setup.is_device_to_host()
            || !setup.is_standard()
            || !setup.is_for_interface(self.number)
        {
            return Ok(None);
        }

        let written = match setup.descriptor_type() {
            REPORT_DESCRIPTOR_TYPE => self.write_reports(scratch)?,
            HID_DESCRIPTOR_TYPE => self.hid.fill(scratch)?,
            _ => return Ok(None),
        };

        let len = clamp_reply(setup.length, usize::from(written));
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "HID interface {}: descriptor {=u8:#x}, {} of {} bytes",
            self.number,
            setup.descriptor_type(),
            len,
            written
        );

        Ok(Some(&scratch[..len]))
    }

    /// [`respond`](Self::respond), then transmit the reply over `pipe`.
    ///
    /// Returns `true` if the request was handled.
    pub fn handle_setup<P: ControlPipe>(
        &self,
        setup: &SetupPacket,
        scratch: &mut [u8],
        pipe: &mut P,
    ) -> Result<bool, Error> {
        match self.respond(setup, scratch)? {
            Some(reply) => {
                pipe.send_data(reply)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
