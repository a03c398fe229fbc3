//! hidkit demo firmware for the nRF52840.
//!
//! Enumerates as a boot keyboard whose HID class descriptor and report
//! descriptor are assembled by the `hidkit` library, then streams idle
//! reports on the interrupt endpoint.
//!
//! Build: `cargo build --release --features embedded --target thumbv7em-none-eabihf`

#![no_std]
#![no_main]

mod usb;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::config::{Config as NrfConfig, HfclkSource};
use usb::hid_device::{KeyboardEndpoint, UsbDriver};
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::task]
async fn usb_task(device: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    usb::hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn report_task(endpoint: KeyboardEndpoint) -> ! {
    usb::hid_device::idle_report_task(endpoint).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // USB needs the external high-frequency crystal.
    let mut nrf_config = NrfConfig::default();
    nrf_config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(nrf_config);

    info!("hidkit starting");

    let usb = unwrap!(usb::hid_device::init(p.USBD));

    unwrap!(spawner.spawn(usb_task(usb.device)));
    unwrap!(spawner.spawn(report_task(usb.keyboard_endpoint)));
}
