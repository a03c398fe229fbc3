//! Full HID interface descriptor: interface, HID class descriptor and
//! endpoints, in the order the host expects them inside a configuration
//! descriptor.

use crate::descriptor::{HidClassDescriptor, HID_HEADER_LEN, SUB_DESCRIPTOR_LEN};
use crate::error::{ensure_capacity, Error};

/// `bDescriptorType` of an interface descriptor.
pub const INTERFACE_DESCRIPTOR_TYPE: u8 = 0x04;

/// `bDescriptorType` of an endpoint descriptor.
pub const ENDPOINT_DESCRIPTOR_TYPE: u8 = 0x05;

/// `bInterfaceClass` for HID.
pub const HID_INTERFACE_CLASS: u8 = 0x03;

/// Direction bit of `bEndpointAddress` for IN (device-to-host) endpoints.
const ENDPOINT_DIR_IN: u8 = 0x80;

/// `bmAttributes` transfer type: interrupt.
const TRANSFER_INTERRUPT: u8 = 0x03;

/// Most endpoints an interface may declare (15 IN + 15 OUT).
const MAX_ENDPOINTS: usize = 30;

/// `bInterfaceSubClass` values defined for HID.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InterfaceSubclass {
    None = 0x00,
    /// Supports the BIOS boot protocol.
    Boot = 0x01,
}

/// `bInterfaceProtocol` values; only meaningful with [`InterfaceSubclass::Boot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InterfaceProtocol {
    None = 0x00,
    Keyboard = 0x01,
    Mouse = 0x02,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceDescriptor {
    pub interface_num: u8,
    pub alternate_setting: u8,
    pub num_endpoints: u8,
    pub interface_class: u8,
    pub interface_subclass: u8,
    pub interface_protocol: u8,
    pub interface_name_idx: u8,
}

impl InterfaceDescriptor {
    pub const LEN: usize = 9;

    pub const fn to_arr(&self) -> [u8; Self::LEN] {
        [
            Self::LEN as u8,
            INTERFACE_DESCRIPTOR_TYPE,
            self.interface_num,
            self.alternate_setting,
            self.num_endpoints,
            self.interface_class,
            self.interface_subclass,
            self.interface_protocol,
            self.interface_name_idx,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EndpointDescriptor {
    pub endpoint_addr: u8,
    pub attributes: u8,
    pub max_packet_size: u16,
    pub interval: u8,
}

impl EndpointDescriptor {
    pub const LEN: usize = 7;

    /// Interrupt IN endpoint `number` (0x80 | number), polled every `interval` ms.
    pub const fn interrupt_in(number: u8, max_packet_size: u16, interval: u8) -> Self {
        Self {
            endpoint_addr: ENDPOINT_DIR_IN | (number & 0x0F),
            attributes: TRANSFER_INTERRUPT,
            max_packet_size,
            interval,
        }
    }

    /// Interrupt OUT endpoint `number`, polled every `interval` ms.
    pub const fn interrupt_out(number: u8, max_packet_size: u16, interval: u8) -> Self {
        Self {
            endpoint_addr: number & 0x0F,
            attributes: TRANSFER_INTERRUPT,
            max_packet_size,
            interval,
        }
    }

    pub const fn is_in(&self) -> bool {
        self.endpoint_addr & ENDPOINT_DIR_IN != 0
    }

    pub const fn to_arr(&self) -> [u8; Self::LEN] {
        let max_packet_size = self.max_packet_size.to_le_bytes();
        [
            Self::LEN as u8,
            ENDPOINT_DESCRIPTOR_TYPE,
            self.endpoint_addr,
            self.attributes,
            max_packet_size[0],
            max_packet_size[1],
            self.interval,
        ]
    }
}

/// A HID interface: its class descriptor, its reports and its endpoints.
///
/// Setup requests addressed to this interface are answered by
/// [`HidInterface::respond`] (see `setup.rs`).
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidInterface<'a> {
    pub number: u8,
    pub alternate_setting: u8,
    pub subclass: InterfaceSubclass,
    pub protocol: InterfaceProtocol,
    pub hid: HidClassDescriptor<'a>,
    pub endpoints: &'a [EndpointDescriptor],
}

impl<'a> HidInterface<'a> {
    /// Bytes written by [`fill_descriptor`](Self::fill_descriptor):
    /// `9 + (6 + 3 * reports) + 7 * endpoints`.
    pub const fn descriptor_len(&self) -> usize {
        InterfaceDescriptor::LEN
            + HID_HEADER_LEN
            + SUB_DESCRIPTOR_LEN * self.hid.reports.len()
            + EndpointDescriptor::LEN * self.endpoints.len()
    }

    fn interface_descriptor(&self) -> Result<InterfaceDescriptor, Error> {
        if self.endpoints.len() > MAX_ENDPOINTS {
            return Err(Error::TooManyEndpoints {
                count: self.endpoints.len(),
            });
        }
        Ok(InterfaceDescriptor {
            interface_num: self.number,
            alternate_setting: self.alternate_setting,
            num_endpoints: self.endpoints.len() as u8,
            interface_class: HID_INTERFACE_CLASS,
            interface_subclass: self.subclass as u8,
            interface_protocol: self.protocol as u8,
            interface_name_idx: 0,
        })
    }

    /// Write interface, HID class and endpoint descriptors back to back.
    ///
    /// Returns the total length. Nothing is written if `out` is too short.
    pub fn fill_descriptor(&self, out: &mut [u8]) -> Result<u16, Error> {
        let interface = self.interface_descriptor()?;
        let total = self.descriptor_len();
        ensure_capacity(out, total)?;

        let (head, rest) = out.split_at_mut(InterfaceDescriptor::LEN);
        head.copy_from_slice(&interface.to_arr());

        let hid_len = usize::from(self.hid.fill(rest)?);

        let endpoints = &mut rest[hid_len..total - InterfaceDescriptor::LEN];
        for (slot, endpoint) in endpoints
            .chunks_exact_mut(EndpointDescriptor::LEN)
            .zip(self.endpoints)
        {
            slot.copy_from_slice(&endpoint.to_arr());
        }

        Ok(total as u16)
    }

    /// Length of the report blob served for `GET_DESCRIPTOR(Report)`.
    pub const fn report_blob_len(&self) -> u16 {
        self.hid.report_blob_len()
    }

    /// Write the report blob into `out`; returns its length.
    pub fn write_reports(&self, out: &mut [u8]) -> Result<u16, Error> {
        self.hid.write_reports(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Report, ReportList};

    const KB: Report<'static> = Report::new("kb", &[0x05, 0x01, 0x09, 0x06]);
    const REPORTS: &[Report<'static>] = &[KB];

    fn keyboard_interface(endpoints: &[EndpointDescriptor]) -> HidInterface<'_> {
        HidInterface {
            number: 2,
            alternate_setting: 0,
            subclass: InterfaceSubclass::Boot,
            protocol: InterfaceProtocol::Keyboard,
            hid: HidClassDescriptor::new(ReportList::new(REPORTS).unwrap()),
            endpoints,
        }
    }

    #[test]
    fn endpoint_direction_bits() {
        let ep_in = EndpointDescriptor::interrupt_in(1, 8, 10);
        assert_eq!(ep_in.endpoint_addr, 0x81);
        assert!(ep_in.is_in());

        let ep_out = EndpointDescriptor::interrupt_out(2, 64, 1);
        assert_eq!(ep_out.endpoint_addr, 0x02);
        assert!(!ep_out.is_in());
        assert_eq!(ep_out.to_arr(), [0x07, 0x05, 0x02, 0x03, 0x40, 0x00, 0x01]);
    }

    #[test]
    fn interface_descriptor_reflects_interface_fields() {
        let endpoints = [EndpointDescriptor::interrupt_in(1, 8, 10)];
        let desc = keyboard_interface(&endpoints).interface_descriptor().unwrap();
        let copy = desc;
        assert_eq!(
            copy,
            InterfaceDescriptor {
                interface_num: 2,
                alternate_setting: 0,
                num_endpoints: 1,
                interface_class: HID_INTERFACE_CLASS,
                interface_subclass: 0x01,
                interface_protocol: 0x01,
                interface_name_idx: 0,
            }
        );
        assert_eq!(desc.to_arr(), [0x09, 0x04, 0x02, 0x00, 0x01, 0x03, 0x01, 0x01, 0x00]);
    }

    #[test]
    fn fill_descriptor_layout() {
        let endpoints = [EndpointDescriptor::interrupt_in(1, 8, 10)];
        let iface = keyboard_interface(&endpoints);
        assert_eq!(iface.descriptor_len(), 9 + 9 + 7);

        let mut buf = [0u8; 32];
        let written = iface.fill_descriptor(&mut buf).unwrap();
        assert_eq!(written, 25);
        assert_eq!(
            buf[..25],
            [
                // Interface
                0x09, 0x04, 0x02, 0x00, 0x01, 0x03, 0x01, 0x01, 0x00,
                // HID class
                0x09, 0x21, 0x00, 0x02, 0x00, 0x01, 0x22, 0x04, 0x00,
                // Endpoint
                0x07, 0x05, 0x81, 0x03, 0x08, 0x00, 0x0A,
            ]
        );
    }

    #[test]
    fn fill_descriptor_without_endpoints() {
        let iface = keyboard_interface(&[]);
        let mut buf = [0u8; 18];
        assert_eq!(iface.fill_descriptor(&mut buf), Ok(18));
        assert_eq!(buf[4], 0); // bNumEndpoints
    }

    #[test]
    fn fill_descriptor_rejects_short_buffer() {
        let endpoints = [EndpointDescriptor::interrupt_in(1, 8, 10)];
        let iface = keyboard_interface(&endpoints);
        let mut buf = [0xAAu8; 24];
        assert_eq!(
            iface.fill_descriptor(&mut buf),
            Err(Error::BufferTooSmall {
                required: 25,
                available: 24
            })
        );
        assert_eq!(buf, [0xAA; 24]);
    }

    #[test]
    fn fill_descriptor_rejects_endpoint_overflow() {
        let endpoints = [EndpointDescriptor::interrupt_in(1, 8, 10); 31];
        let iface = keyboard_interface(&endpoints);
        let mut buf = [0u8; 256];
        assert_eq!(
            iface.fill_descriptor(&mut buf),
            Err(Error::TooManyEndpoints { count: 31 })
        );
    }
}
