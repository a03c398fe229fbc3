//! HID class descriptor assembly.
//!
//! Wire layout (little-endian), as read by the host during
//! `GET_DESCRIPTOR`:
//! ```text
//! Byte 0      bLength             6 + 3 * N
//! Byte 1      bDescriptorType     0x21 (HID)
//! Byte 2-3    bcdHID              class version, default 0x0200
//! Byte 4      bCountryCode        0x00
//! Byte 5      bNumDescriptors     N
//! Byte 6+3i   bDescriptorType[i]  0x22 (Report)
//! Byte 7+3i   wDescriptorLength[i] length of report i
//! ```
//! The report blob served by `GET_DESCRIPTOR(Report)` is the reports'
//! raw bytes concatenated in the same order as the entries above.
//!
//! None of these functions log or keep state; each call writes the same
//! bytes for the same input.

use crate::config;
use crate::error::{ensure_capacity, Error};
use crate::report::{Report, ReportList, MAX_REPORTS};

/// `bDescriptorType` of the HID class descriptor.
pub const HID_DESCRIPTOR_TYPE: u8 = 0x21;

/// `bDescriptorType` of a report descriptor.
pub const REPORT_DESCRIPTOR_TYPE: u8 = 0x22;

/// Fixed part of the HID class descriptor.
pub const HID_HEADER_LEN: usize = 6;

/// One `(bDescriptorType, wDescriptorLength)` entry per report.
pub const SUB_DESCRIPTOR_LEN: usize = 3;

/// Fixed 6-byte head of the HID class descriptor.
///
/// Built through [`HidDescriptorHeader::new`], which caps `report_count` at
/// [`MAX_REPORTS`] so `bLength` is always `6 + 3 * report_count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidDescriptorHeader {
    pub version: u16,
    pub country_code: u8,
    report_count: u8,
}

impl HidDescriptorHeader {
    pub const LEN: usize = HID_HEADER_LEN;

    /// Fails with [`Error::TooManyReports`] if `6 + 3 * report_count` does
    /// not fit `bLength`.
    pub const fn new(version: u16, country_code: u8, report_count: usize) -> Result<Self, Error> {
        if report_count > MAX_REPORTS {
            return Err(Error::TooManyReports {
                count: report_count,
            });
        }
        Ok(Self {
            version,
            country_code,
            report_count: report_count as u8,
        })
    }

    /// `bNumDescriptors`.
    pub const fn report_count(&self) -> u8 {
        self.report_count
    }

    /// `bLength`: the header plus one sub-descriptor per report.
    pub const fn length(&self) -> u8 {
        Self::LEN as u8 + SUB_DESCRIPTOR_LEN as u8 * self.report_count
    }

    pub const fn to_arr(&self) -> [u8; Self::LEN] {
        let version = self.version.to_le_bytes();
        [
            self.length(),
            HID_DESCRIPTOR_TYPE,
            version[0],
            version[1],
            self.country_code,
            self.report_count,
        ]
    }
}

/// Per-report entry following the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportSubDescriptor {
    pub length: u16,
}

impl ReportSubDescriptor {
    pub const LEN: usize = SUB_DESCRIPTOR_LEN;

    pub const fn to_arr(&self) -> [u8; Self::LEN] {
        let length = self.length.to_le_bytes();
        [REPORT_DESCRIPTOR_TYPE, length[0], length[1]]
    }
}

fn report_len(report: &Report<'_>) -> Result<u16, Error> {
    u16::try_from(report.len()).map_err(|_| Error::Oversize {
        total: report.len(),
    })
}

/// Total length of the concatenated report blob.
///
/// Fails with [`Error::Oversize`] when the sum exceeds `u16::MAX`, since
/// `wDescriptorLength` is 16 bits wide.
pub fn reports_blob_size(reports: &[Report<'_>]) -> Result<u16, Error> {
    let total = reports
        .iter()
        .try_fold(0usize, |acc, report| acc.checked_add(report.len()))
        .ok_or(Error::Oversize { total: usize::MAX })?;
    u16::try_from(total).map_err(|_| Error::Oversize { total })
}

/// Write one 3-byte report entry per report, in list order.
///
/// Returns the bytes written (`3 * reports.len()`). Nothing is written if
/// `out` is too short.
pub fn write_sub_descriptors(reports: &[Report<'_>], out: &mut [u8]) -> Result<u16, Error> {
    let required = SUB_DESCRIPTOR_LEN * reports.len();
    ensure_capacity(out, required)?;
    let written = u16::try_from(required).map_err(|_| Error::Oversize { total: required })?;
    for report in reports {
        report_len(report)?;
    }

    for (entry, report) in out[..required]
        .chunks_exact_mut(SUB_DESCRIPTOR_LEN)
        .zip(reports)
    {
        let sub = ReportSubDescriptor {
            length: report.len() as u16,
        };
        entry.copy_from_slice(&sub.to_arr());
    }

    Ok(written)
}

/// Copy every report's bytes, in list order, to the front of `out`.
///
/// Returns the blob length, identical to [`reports_blob_size`]. Nothing is
/// written if `out` is too short.
pub fn write_reports_blob(reports: &[Report<'_>], out: &mut [u8]) -> Result<u16, Error> {
    let total = reports_blob_size(reports)?;
    ensure_capacity(out, usize::from(total))?;

    let mut cursor = 0;
    for report in reports {
        let end = cursor + report.len();
        out[cursor..end].copy_from_slice(report.data);
        cursor = end;
    }

    Ok(total)
}

fn write_class_descriptor(
    reports: &[Report<'_>],
    version: u16,
    country_code: u8,
    out: &mut [u8],
) -> Result<u16, Error> {
    let header = HidDescriptorHeader::new(version, country_code, reports.len())?;
    let total = usize::from(header.length());
    ensure_capacity(out, total)?;

    let written = write_sub_descriptors(reports, &mut out[HID_HEADER_LEN..total])?;
    out[..HID_HEADER_LEN].copy_from_slice(&header.to_arr());

    Ok(HID_HEADER_LEN as u16 + written)
}

/// Write the complete HID class descriptor (country code 0).
///
/// Returns `6 + 3 * reports.len()`, which is also the `bLength` written
/// in byte 0. More than [`MAX_REPORTS`] reports fail with
/// [`Error::TooManyReports`].
pub fn fill_hid_descriptor(
    reports: &[Report<'_>],
    version: u16,
    out: &mut [u8],
) -> Result<u16, Error> {
    write_class_descriptor(reports, version, 0x00, out)
}

/// A HID class descriptor bound to its report list.
///
/// Both request paths (class descriptor and report blob) walk the same
/// [`ReportList`], so the entries and the blob always agree on order.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidClassDescriptor<'a> {
    pub reports: ReportList<'a>,
    pub version: u16,
    pub country_code: u8,
}

impl<'a> HidClassDescriptor<'a> {
    /// Uses the configured `bcdHID` and country code.
    pub const fn new(reports: ReportList<'a>) -> Self {
        Self {
            reports,
            version: config::HID_VERSION,
            country_code: config::HID_COUNTRY_CODE,
        }
    }

    pub const fn with_version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    pub const fn with_country_code(mut self, country_code: u8) -> Self {
        self.country_code = country_code;
        self
    }

    pub const fn header(&self) -> HidDescriptorHeader {
        // ReportList already holds at most MAX_REPORTS entries.
        HidDescriptorHeader {
            version: self.version,
            country_code: self.country_code,
            report_count: self.reports.len() as u8,
        }
    }

    /// `bLength` of the class descriptor.
    pub const fn len(&self) -> u8 {
        self.reports.descriptor_len()
    }

    /// Length of the report blob.
    pub const fn report_blob_len(&self) -> u16 {
        self.reports.blob_len()
    }

    /// Write the class descriptor; returns its length.
    pub fn fill(&self, out: &mut [u8]) -> Result<u16, Error> {
        write_class_descriptor(
            self.reports.as_slice(),
            self.version,
            self.country_code,
            out,
        )
    }

    /// Write the concatenated report blob; returns its length.
    pub fn write_reports(&self, out: &mut [u8]) -> Result<u16, Error> {
        write_reports_blob(self.reports.as_slice(), out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KB: Report<'static> = Report::new("kb", &[0x05, 0x01, 0x09, 0x06]);
    const VENDOR: Report<'static> = Report::new("vendor", &[0x06, 0x00, 0xFF]);

    // ═══════════════════════════════════════════════════════════════════════
    // Header / entry layout
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn header_layout() {
        let header = HidDescriptorHeader::new(0x0111, 0x21, 2).unwrap();
        assert_eq!(header.to_arr(), [0x0C, 0x21, 0x11, 0x01, 0x21, 0x02]);
    }

    #[test]
    fn header_length_tracks_report_count_up_to_limit() {
        let header = HidDescriptorHeader::new(0x0200, 0, MAX_REPORTS).unwrap();
        assert_eq!(header.report_count(), 83);
        assert_eq!(header.length(), 255);
        assert_eq!(
            usize::from(header.length()),
            HID_HEADER_LEN + SUB_DESCRIPTOR_LEN * usize::from(header.report_count())
        );
    }

    #[test]
    fn header_rejects_count_that_overflows_b_length() {
        assert_eq!(
            HidDescriptorHeader::new(0x0200, 0, 100),
            Err(Error::TooManyReports { count: 100 })
        );
        assert_eq!(
            HidDescriptorHeader::new(0x0200, 0, MAX_REPORTS + 1),
            Err(Error::TooManyReports { count: 84 })
        );
    }

    #[test]
    fn sub_descriptor_is_little_endian() {
        let sub = ReportSubDescriptor { length: 0x1234 };
        assert_eq!(sub.to_arr(), [0x22, 0x34, 0x12]);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Assembler
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn fill_two_reports() {
        let mut buf = [0u8; 16];
        let written = fill_hid_descriptor(&[KB, VENDOR], 0x0200, &mut buf).unwrap();
        assert_eq!(written, 12);
        assert_eq!(
            buf[..12],
            [0x0C, 0x21, 0x00, 0x02, 0x00, 0x02, 0x22, 0x04, 0x00, 0x22, 0x03, 0x00]
        );
        // Untouched past the descriptor.
        assert_eq!(buf[12..], [0; 4]);
    }

    #[test]
    fn fill_empty_list_writes_header_only() {
        let mut buf = [0xAAu8; 6];
        let written = fill_hid_descriptor(&[], 0x0200, &mut buf).unwrap();
        assert_eq!(written, 6);
        assert_eq!(buf, [0x06, 0x21, 0x00, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn fill_rejects_short_buffer_without_writing() {
        let mut buf = [0xAAu8; 11];
        let err = fill_hid_descriptor(&[KB, VENDOR], 0x0200, &mut buf).unwrap_err();
        assert_eq!(
            err,
            Error::BufferTooSmall {
                required: 12,
                available: 11
            }
        );
        assert_eq!(buf, [0xAA; 11]);
    }

    #[test]
    fn sub_descriptors_follow_list_order() {
        let mut buf = [0u8; 9];
        let written = write_sub_descriptors(&[VENDOR, KB, VENDOR], &mut buf).unwrap();
        assert_eq!(written, 9);
        assert_eq!(buf, [0x22, 0x03, 0x00, 0x22, 0x04, 0x00, 0x22, 0x03, 0x00]);
    }

    #[test]
    fn sub_descriptors_reject_short_buffer() {
        let mut buf = [0u8; 5];
        assert_eq!(
            write_sub_descriptors(&[KB, VENDOR], &mut buf),
            Err(Error::BufferTooSmall {
                required: 6,
                available: 5
            })
        );
    }

    #[test]
    fn sub_descriptors_have_no_report_count_limit() {
        let reports = [Report::new("byte", &[0x00]); 84];
        let mut buf = [0xAAu8; 252];
        assert_eq!(write_sub_descriptors(&reports, &mut buf), Ok(252));
        assert!(buf
            .chunks_exact(SUB_DESCRIPTOR_LEN)
            .all(|entry| entry == [0x22, 0x01, 0x00]));
    }

    #[test]
    fn fill_rejects_more_than_max_reports_without_writing() {
        let reports = [Report::new("byte", &[0x00]); MAX_REPORTS + 1];
        let mut buf = [0xAAu8; 300];
        assert_eq!(
            fill_hid_descriptor(&reports, 0x0200, &mut buf),
            Err(Error::TooManyReports { count: 84 })
        );
        assert!(buf.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn report_longer_than_u16_is_oversize() {
        static HUGE: [u8; 70_000] = [0u8; 70_000];
        let reports = [KB, Report::new("huge", &HUGE)];

        let mut entries = [0xAAu8; 6];
        assert_eq!(
            write_sub_descriptors(&reports, &mut entries),
            Err(Error::Oversize { total: 70_000 })
        );
        assert_eq!(entries, [0xAA; 6]);

        let mut desc = [0xAAu8; 12];
        assert_eq!(
            fill_hid_descriptor(&reports, 0x0200, &mut desc),
            Err(Error::Oversize { total: 70_000 })
        );
        assert_eq!(desc, [0xAA; 12]);
    }

    #[test]
    fn blob_concatenates_in_order() {
        let mut buf = [0u8; 7];
        let written = write_reports_blob(&[KB, VENDOR], &mut buf).unwrap();
        assert_eq!(written, 7);
        assert_eq!(buf, [0x05, 0x01, 0x09, 0x06, 0x06, 0x00, 0xFF]);
    }

    #[test]
    fn blob_of_empty_list_is_empty() {
        let mut buf = [0u8; 0];
        assert_eq!(write_reports_blob(&[], &mut buf), Ok(0));
        assert_eq!(reports_blob_size(&[]), Ok(0));
    }

    #[test]
    fn blob_rejects_short_buffer_without_writing() {
        let mut buf = [0xAAu8; 6];
        assert_eq!(
            write_reports_blob(&[KB, VENDOR], &mut buf),
            Err(Error::BufferTooSmall {
                required: 7,
                available: 6
            })
        );
        assert_eq!(buf, [0xAA; 6]);
    }

    #[test]
    fn blob_size_overflow_is_reported() {
        static BIG: [u8; 33_000] = [0u8; 33_000];
        let reports = [Report::new("a", &BIG), Report::new("b", &BIG)];
        assert_eq!(
            reports_blob_size(&reports),
            Err(Error::Oversize { total: 66_000 })
        );

        let mut buf = [0u8; 4];
        assert_eq!(
            write_reports_blob(&reports, &mut buf),
            Err(Error::Oversize { total: 66_000 })
        );
    }

    // ═══════════════════════════════════════════════════════════════════════
    // HidClassDescriptor
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn class_descriptor_uses_configured_defaults() {
        let reports = [KB];
        let hid = HidClassDescriptor::new(ReportList::new(&reports).unwrap());
        assert_eq!(hid.version, 0x0200);
        assert_eq!(hid.country_code, 0);
        assert_eq!(hid.len(), 9);
        assert_eq!(hid.report_blob_len(), 4);
    }

    #[test]
    fn class_descriptor_writes_country_code() {
        let reports = [KB];
        let hid = HidClassDescriptor::new(ReportList::new(&reports).unwrap())
            .with_version(0x0111)
            .with_country_code(0x09);
        let mut buf = [0u8; 9];
        assert_eq!(hid.fill(&mut buf), Ok(9));
        assert_eq!(buf, [0x09, 0x21, 0x11, 0x01, 0x09, 0x01, 0x22, 0x04, 0x00]);
        assert_eq!(hid.header().to_arr(), [0x09, 0x21, 0x11, 0x01, 0x09, 0x01]);
    }
}
