//! HID reports and the validated, ordered report list.
//!
//! A [`Report`] is an opaque HID report descriptor: the assembler never
//! inspects the item grammar, it only needs the bytes and their length.
//! A [`ReportList`] fixes the order once, at configuration time, and checks
//! that the list fits the descriptor's length fields before any request
//! is served.

use core::slice;

use crate::descriptor::{HID_HEADER_LEN, SUB_DESCRIPTOR_LEN};
use crate::error::Error;

/// Most reports a single HID class descriptor can list: `6 + 3 * N`
/// must fit the 8-bit `bLength` field.
pub const MAX_REPORTS: usize = (u8::MAX as usize - HID_HEADER_LEN) / SUB_DESCRIPTOR_LEN;

/// An immutable, named HID report descriptor.
///
/// Two reports are equal when their bytes are equal; the name is only a
/// label for logs.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report<'a> {
    pub name: &'static str,
    pub data: &'a [u8],
}

impl<'a> Report<'a> {
    pub const fn new(name: &'static str, data: &'a [u8]) -> Self {
        Self { name, data }
    }

    /// Length of the raw report descriptor in bytes.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl PartialEq for Report<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Report<'_> {}

/// Ordered, immutable list of reports whose sizes have been checked
/// against the 16-bit blob length and the 8-bit descriptor length.
///
/// Order is significant: it is the order of the sub-descriptor entries
/// and of the concatenated report blob. Duplicates are kept as given.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportList<'a> {
    reports: &'a [Report<'a>],
    blob_len: u16,
}

impl<'a> ReportList<'a> {
    /// Validate `reports` and fix their order.
    ///
    /// Usable in a `const` item so a bad static table fails the build:
    ///
    /// ```
    /// use hidkit::{Report, ReportList};
    ///
    /// const REPORTS: &[Report<'static>] = &[Report::new("vendor", &[0x06, 0x00, 0xFF])];
    /// const LIST: ReportList<'static> = match ReportList::new(REPORTS) {
    ///     Ok(list) => list,
    ///     Err(_) => panic!("report table does not fit a HID descriptor"),
    /// };
    /// assert_eq!(LIST.blob_len(), 3);
    /// ```
    pub const fn new(reports: &'a [Report<'a>]) -> Result<Self, Error> {
        if reports.len() > MAX_REPORTS {
            return Err(Error::TooManyReports {
                count: reports.len(),
            });
        }

        let mut total: usize = 0;
        let mut i = 0;
        while i < reports.len() {
            total = total.saturating_add(reports[i].data.len());
            i += 1;
        }

        if total > u16::MAX as usize {
            return Err(Error::Oversize { total });
        }

        Ok(Self {
            reports,
            blob_len: total as u16,
        })
    }

    /// A list with no reports: a 6-byte class descriptor and an empty blob.
    pub const fn empty() -> Self {
        Self {
            reports: &[],
            blob_len: 0,
        }
    }

    pub const fn as_slice(&self) -> &'a [Report<'a>] {
        self.reports
    }

    pub fn iter(&self) -> slice::Iter<'a, Report<'a>> {
        self.reports.iter()
    }

    pub const fn len(&self) -> usize {
        self.reports.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Total bytes of the concatenated report blob.
    pub const fn blob_len(&self) -> u16 {
        self.blob_len
    }

    /// Length of the HID class descriptor for this list (`6 + 3 * N`).
    pub const fn descriptor_len(&self) -> u8 {
        (HID_HEADER_LEN + SUB_DESCRIPTOR_LEN * self.reports.len()) as u8
    }
}

impl<'a> IntoIterator for &ReportList<'a> {
    type Item = &'a Report<'a>;
    type IntoIter = slice::Iter<'a, Report<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
