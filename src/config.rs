//! Application-wide constants and compile-time configuration.
//!
//! USB identity, HID class parameters and buffer sizes live here so they
//! can be tuned in one place.

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "hidkit";
pub const USB_PRODUCT: &str = "hidkit HID Keyboard";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// Bus power draw advertised in the configuration descriptor (mA).
pub const USB_MAX_POWER_MA: u16 = 100;

/// Control endpoint max packet size.
pub const USB_EP0_MAX_PACKET: u8 = 64;

// HID class

/// `bcdHID` written into every HID class descriptor (HID 2.00).
pub const HID_VERSION: u16 = 0x0200;

/// `bCountryCode` (0 = not localized).
pub const HID_COUNTRY_CODE: u8 = 0x00;

/// Interface number of the HID interface. Embassy numbers interfaces in
/// creation order, so this is the first one.
pub const HID_INTERFACE_NUMBER: u8 = 0;

/// Interrupt IN endpoint number (direction bit is added by the descriptor).
pub const HID_ENDPOINT_NUMBER: u8 = 1;

/// Interrupt IN endpoint max packet size. A boot keyboard report is 8 bytes.
pub const HID_ENDPOINT_MAX_PACKET: u16 = 8;

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 10;

// Buffers

/// Control transfer scratch buffer. Must hold the largest report blob served.
pub const CONTROL_BUFFER_LEN: usize = 128;

/// Buffer for the assembled HID class descriptor (6 + 3 bytes per report).
pub const HID_CLASS_DESCRIPTOR_CAPACITY: usize = 32;
