//! USB HID keyboard device.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral, registers one HID interface with an interrupt IN endpoint,
//! and answers HID descriptor requests through [`HidInterface::respond`].

use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Timer;
use embassy_usb::control::{InResponse, OutResponse, Recipient, Request, RequestType};
use embassy_usb::driver::{Endpoint, EndpointError, EndpointIn};
use embassy_usb::{Builder, Config, Handler, UsbDevice};
use hidkit::config;
use hidkit::hid::keyboard::KEYBOARD_INPUT_REPORT_SIZE;
use hidkit::hid::BOOT_KEYBOARD;
use hidkit::{
    EndpointDescriptor, Error, HidClassDescriptor, HidInterface, InterfaceProtocol,
    InterfaceSubclass, SetupPacket, HID_DESCRIPTOR_TYPE, HID_INTERFACE_CLASS,
};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;
pub type KeyboardEndpoint = <UsbDriver as embassy_usb::driver::Driver<'static>>::EndpointIn;

/// HID class request `SET_IDLE`.
const HID_REQ_SET_IDLE: u8 = 0x0A;

const KEYBOARD_ENDPOINTS: &[EndpointDescriptor] = &[EndpointDescriptor::interrupt_in(
    config::HID_ENDPOINT_NUMBER,
    config::HID_ENDPOINT_MAX_PACKET,
    config::USB_HID_POLL_MS,
)];

static KEYBOARD_INTERFACE: HidInterface<'static> = HidInterface {
    number: config::HID_INTERFACE_NUMBER,
    alternate_setting: 0,
    subclass: InterfaceSubclass::Boot,
    protocol: InterfaceProtocol::Keyboard,
    hid: HidClassDescriptor::new(BOOT_KEYBOARD),
    endpoints: KEYBOARD_ENDPOINTS,
};

static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; config::CONTROL_BUFFER_LEN]> = StaticCell::new();
static USB_REQUEST_HANDLER: StaticCell<HidRequestHandler> = StaticCell::new();
static USB_SUSPEND_SIGNAL: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// Serves HID descriptor requests for one interface and tracks bus suspend.
struct HidRequestHandler {
    interface: &'static HidInterface<'static>,
}

impl Handler for HidRequestHandler {
    fn suspended(&mut self, suspended: bool) {
        USB_SUSPEND_SIGNAL.signal(suspended);
    }

    fn control_out(&mut self, req: Request, _data: &[u8]) -> Option<OutResponse> {
        if req.request_type == RequestType::Class
            && req.recipient == Recipient::Interface
            && req.index as u8 == self.interface.number
            && req.request == HID_REQ_SET_IDLE
        {
            return Some(OutResponse::Accepted);
        }
        None
    }

    fn control_in<'a>(&'a mut self, req: Request, buf: &'a mut [u8]) -> Option<InResponse<'a>> {
        if req.request_type != RequestType::Standard || req.recipient != Recipient::Interface {
            return None;
        }

        // control_in is always device-to-host; type and recipient checked above.
        let setup =
            SetupPacket::standard_interface_in(req.request, req.value, req.index, req.length);

        match self.interface.respond(&setup, buf) {
            Ok(Some(reply)) => Some(InResponse::Accepted(reply)),
            Ok(None) => None,
            Err(e) => {
                warn!("HID descriptor request rejected: {}", e);
                Some(InResponse::Rejected)
            }
        }
    }
}

/// Build result containing the USB device runner and the keyboard endpoint.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard_endpoint: KeyboardEndpoint,
}

/// Initialise the USB stack and register the HID keyboard interface.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> Result<UsbHidDevice, Error> {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = config::USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = config::USB_EP0_MAX_PACKET;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; config::CONTROL_BUFFER_LEN]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let handler = USB_REQUEST_HANDLER.init(HidRequestHandler {
        interface: &KEYBOARD_INTERFACE,
    });
    builder.handler(handler);

    let mut class_desc = [0u8; config::HID_CLASS_DESCRIPTOR_CAPACITY];
    let class_len = usize::from(KEYBOARD_INTERFACE.hid.fill(&mut class_desc)?);

    let subclass = KEYBOARD_INTERFACE.subclass as u8;
    let protocol = KEYBOARD_INTERFACE.protocol as u8;
    let endpoint = KEYBOARD_ENDPOINTS[0];

    let keyboard_endpoint = {
        let mut func = builder.function(HID_INTERFACE_CLASS, subclass, protocol);
        let mut iface = func.interface();
        defmt::assert_eq!(iface.interface_number().0, KEYBOARD_INTERFACE.number);
        let mut alt = iface.alt_setting(HID_INTERFACE_CLASS, subclass, protocol, None);
        // Embassy writes bLength and bDescriptorType itself.
        alt.descriptor(HID_DESCRIPTOR_TYPE, &class_desc[2..class_len]);
        alt.endpoint_interrupt_in(endpoint.max_packet_size, endpoint.interval)
    };

    let device = builder.build();

    info!(
        "USB HID keyboard initialised: interface {} bytes, report descriptor {} bytes",
        KEYBOARD_INTERFACE.descriptor_len(),
        KEYBOARD_INTERFACE.report_blob_len()
    );

    Ok(UsbHidDevice {
        device,
        keyboard_endpoint,
    })
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, and endpoint servicing.
/// It runs forever (or until the USB cable is disconnected).
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Write an all-keys-released report every poll interval while the bus is
/// configured and not suspended.
pub async fn idle_report_task(mut endpoint: KeyboardEndpoint) -> ! {
    let idle = [0u8; KEYBOARD_INPUT_REPORT_SIZE];
    let mut suspended = false;

    loop {
        endpoint.wait_enabled().await;
        info!("HID endpoint enabled");

        loop {
            if let Some(state) = USB_SUSPEND_SIGNAL.try_take() {
                suspended = state;
            }

            if !suspended {
                match endpoint.write(&idle).await {
                    Ok(()) => {}
                    Err(EndpointError::Disabled) => {
                        warn!("HID endpoint disabled");
                        break;
                    }
                    Err(EndpointError::BufferOverflow) => warn!("USB keyboard write failed"),
                }
            }

            Timer::after_millis(u64::from(config::USB_HID_POLL_MS)).await;
        }
    }
}
