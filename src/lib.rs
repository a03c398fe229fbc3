//! USB HID class descriptor assembler.
//!
//! Builds byte-exact HID class descriptors and report descriptor blobs from
//! an ordered list of raw report descriptors, and answers the
//! `GET_DESCRIPTOR` control requests that read them back.
//!
//! ```
//! use hidkit::{fill_hid_descriptor, write_reports_blob, Report};
//!
//! let reports = [
//!     Report::new("desktop", &[0x05, 0x01, 0x09, 0x06]),
//!     Report::new("vendor", &[0x06, 0x00, 0xFF]),
//! ];
//!
//! let mut desc = [0u8; 12];
//! assert_eq!(fill_hid_descriptor(&reports, 0x0200, &mut desc), Ok(12));
//! assert_eq!(desc, [0x0C, 0x21, 0x00, 0x02, 0x00, 0x02, 0x22, 0x04, 0x00, 0x22, 0x03, 0x00]);
//!
//! let mut blob = [0u8; 7];
//! assert_eq!(write_reports_blob(&reports, &mut blob), Ok(7));
//! ```
//!
//! The library is `no_std` and allocation-free; all buffers are supplied by
//! the caller. The embedded demo binary (`--features embedded`) lives in
//! `main.rs`.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod descriptor;
pub mod error;
pub mod hid;
pub mod interface;
pub mod report;
pub mod setup;

pub use descriptor::{
    fill_hid_descriptor, reports_blob_size, write_reports_blob, write_sub_descriptors,
    HidClassDescriptor, HidDescriptorHeader, ReportSubDescriptor, HID_DESCRIPTOR_TYPE,
    REPORT_DESCRIPTOR_TYPE,
};
pub use error::Error;
pub use interface::{
    EndpointDescriptor, HidInterface, InterfaceDescriptor, InterfaceProtocol, InterfaceSubclass,
    HID_INTERFACE_CLASS,
};
pub use report::{Report, ReportList, MAX_REPORTS};
pub use setup::{clamp_reply, ControlPipe, SetupPacket, GET_DESCRIPTOR};
