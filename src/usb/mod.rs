//! USB Device subsystem - presents a HID keyboard to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`. The HID class descriptor written into the configuration
//! descriptor, and the report descriptor served on `GET_DESCRIPTOR`, are
//! both assembled by `hidkit` from the same report list.

pub mod hid_device;
