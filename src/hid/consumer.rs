//! Consumer Control report descriptor - media keys, volume, etc.
//!
//! Consumer Control is a separate HID usage page (0x0C). The input report
//! is a single little-endian 16-bit usage code (0 = released).

use crate::report::Report;

/// Input report size in bytes.
pub const CONSUMER_INPUT_REPORT_SIZE: usize = 2;

/// USB HID Report Descriptor for Consumer Control.
///
/// This is a minimal descriptor for a single 16-bit usage.
pub const CONSUMER_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x0C, // Usage Page (Consumer)
    0x09, 0x01, // Usage (Consumer Control)
    0xA1, 0x01, // Collection (Application)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x03, //   Logical Maximum (1023)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0xFF, 0x03, //   Usage Maximum (1023)
    0x75, 0x10, //   Report Size (16)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x00, //   Input (Data, Array, Absolute)
    0xC0, // End Collection
];

pub const CONSUMER: Report<'static> = Report::new("consumer", CONSUMER_REPORT_DESCRIPTOR);
