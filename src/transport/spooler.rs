//! Windows print spooler backend.
//!
//! Jobs go through the installed driver as `RAW` documents, so the ESC/POS
//! bytes reach the printer untouched. Status comes from `PRINTER_INFO_6`.

use core::ffi::c_void;

use tracing::debug;
use windows::Win32::Graphics::Printing::{
    ClosePrinter, DOC_INFO_1W, EndDocPrinter, EndPagePrinter, GetPrinterW, OpenPrinterW,
    PRINTER_HANDLE, PRINTER_INFO_6, StartDocPrinterW, StartPagePrinter, WritePrinter,
};
use windows::core::{PCWSTR, PWSTR};

use crate::error::PrintError;

use super::{DeviceProvider, DeviceStatus, PrintDevice};

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Resolves installed printer names through `OpenPrinterW`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpoolerProvider;

impl SpoolerProvider {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceProvider for SpoolerProvider {
    type Device = SpoolerDevice;

    fn resolve(&self, name: &str) -> Result<SpoolerDevice, PrintError> {
        let name_w = to_wide(name);
        let mut handle = PRINTER_HANDLE::default();

        unsafe {
            OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None)
                .map_err(|_| PrintError::DeviceNotFound)?;
        }

        debug!(printer = name, "Opened printer handle");
        Ok(SpoolerDevice {
            name: name.to_string(),
            handle,
            doc_open: false,
            page_open: false,
        })
    }
}

/// An open spooler handle. `ClosePrinter` runs on drop.
#[derive(Debug)]
pub struct SpoolerDevice {
    name: String,
    handle: PRINTER_HANDLE,
    doc_open: bool,
    page_open: bool,
}

impl SpoolerDevice {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PrintDevice for SpoolerDevice {
    fn query_status(&mut self) -> Result<DeviceStatus, PrintError> {
        unsafe {
            let mut needed: u32 = 0;
            let _ = GetPrinterW(self.handle, 6, None, &mut needed);
            if needed == 0 {
                return Err(PrintError::PrintFailure(
                    "GetPrinterW failed to report status".to_string(),
                ));
            }

            let mut buf: Vec<u8> = vec![0; needed as usize];
            GetPrinterW(self.handle, 6, Some(buf.as_mut_slice()), &mut needed)
                .map_err(|e| PrintError::PrintFailure(format!("GetPrinterW failed: {}", e)))?;

            let info = std::ptr::read_unaligned(buf.as_ptr() as *const PRINTER_INFO_6);
            Ok(DeviceStatus::from_bits(info.dwStatus))
        }
    }

    fn open_job(&mut self, doc_name: &str) -> Result<(), PrintError> {
        let doc_name_w = to_wide(doc_name);
        let datatype_w = to_wide("RAW");
        let doc_info = DOC_INFO_1W {
            pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
            pOutputFile: PWSTR::null(),
            pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
        };

        unsafe {
            if StartDocPrinterW(self.handle, 1, &doc_info as *const DOC_INFO_1W) == 0 {
                return Err(PrintError::PrintFailure(
                    "StartDocPrinter failed".to_string(),
                ));
            }
            self.doc_open = true;

            if !StartPagePrinter(self.handle).as_bool() {
                return Err(PrintError::PrintFailure(
                    "StartPagePrinter failed".to_string(),
                ));
            }
            self.page_open = true;
        }
        Ok(())
    }

    fn write_job(&mut self, data: &[u8]) -> Result<usize, PrintError> {
        let len = u32::try_from(data.len())
            .map_err(|_| PrintError::PrintFailure("Job too large".to_string()))?;
        let mut written: u32 = 0;

        let ok = unsafe {
            WritePrinter(
                self.handle,
                data.as_ptr() as *const c_void,
                len,
                &mut written,
            )
        };
        if !ok.as_bool() {
            return Err(PrintError::PrintFailure("WritePrinter failed".to_string()));
        }
        Ok(written as usize)
    }

    fn close_job(&mut self) -> Result<(), PrintError> {
        unsafe {
            if self.page_open {
                self.page_open = false;
                let _ = EndPagePrinter(self.handle);
            }
            if self.doc_open {
                self.doc_open = false;
                if !EndDocPrinter(self.handle).as_bool() {
                    return Err(PrintError::PrintFailure("EndDocPrinter failed".to_string()));
                }
            }
        }
        Ok(())
    }
}

impl Drop for SpoolerDevice {
    fn drop(&mut self) {
        // A failed StartPagePrinter leaves the document open.
        let _ = self.close_job();
        unsafe {
            let _ = ClosePrinter(self.handle);
        }
        debug!(printer = %self.name, "Closed printer handle");
    }
}
