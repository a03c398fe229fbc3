//! Built-in HID report descriptors and ready-made report lists.

pub mod consumer;
pub mod keyboard;
pub mod mouse;


use crate::report::{Report, ReportList};

pub use consumer::CONSUMER;
pub use keyboard::KEYBOARD;
pub use mouse::MOUSE;

const BOOT_KEYBOARD_REPORTS: &[Report<'static>] = &[KEYBOARD];
const BOOT_MOUSE_REPORTS: &[Report<'static>] = &[MOUSE];

/// Single boot keyboard report.
pub const BOOT_KEYBOARD: ReportList<'static> = match ReportList::new(BOOT_KEYBOARD_REPORTS) {
    Ok(list) => list,
    Err(_) => panic!("boot keyboard report table is invalid"),
};

/// Single boot mouse report.
pub const BOOT_MOUSE: ReportList<'static> = match ReportList::new(BOOT_MOUSE_REPORTS) {
    Ok(list) => list,
    Err(_) => panic!("boot mouse report table is invalid"),
};
