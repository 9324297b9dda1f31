//! Windows adapter: `ReadFile`/`WriteFile` with the offset carried in `OVERLAPPED`
//!
//! Windows 适配器：偏移通过 `OVERLAPPED` 传递的 `ReadFile`/`WriteFile`
//!
//! The `OVERLAPPED` structure is only a vehicle for the file offset. Handles are
//! expected to be opened for synchronous I/O, so every call completes before it
//! returns and there is no completion notification to wait for.
//!
//! `OVERLAPPED` 结构仅用于传递文件偏移。句柄应以同步 I/O 方式打开，
//! 因此每次调用在返回前就已完成，不需要等待任何完成通知。
//!
//! A read at or past the end of file fails with `ERROR_HANDLE_EOF`. The adapter
//! reports it as `Transferred(0)` on purpose, matching Unix `pread` and std's
//! `seek_read`; every other failure is passed through unchanged.
//!
//! 在文件末尾或之后读取会以 `ERROR_HANDLE_EOF` 失败。适配器有意将其报告为
//! `Transferred(0)`，与 Unix `pread` 及标准库的 `seek_read` 一致；其他失败原样传递。

use super::outcome::IoOutcome;
use super::platform::{NativeIo, RawHandle, split_offset};
use std::ptr;
use windows_sys::Win32::Foundation::{ERROR_HANDLE_EOF, GetLastError};
use windows_sys::Win32::Storage::FileSystem::{ReadFile, WriteFile};
use windows_sys::Win32::System::Diagnostics::Debug::{
    FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS, FormatMessageW,
};
use windows_sys::Win32::System::IO::{OVERLAPPED, OVERLAPPED_0, OVERLAPPED_0_0};

/// Native calls backed by kernel32
///
/// 基于 kernel32 的原生调用
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsNative;

/// Zeroed `OVERLAPPED` holding `offset`, no event handle
///
/// 保存 `offset` 的全零 `OVERLAPPED`，不带事件句柄
#[inline]
fn overlapped_at(offset: u64) -> OVERLAPPED {
    let (low, high) = split_offset(offset);
    OVERLAPPED {
        Internal: 0,
        InternalHigh: 0,
        Anonymous: OVERLAPPED_0 {
            Anonymous: OVERLAPPED_0_0 {
                Offset: low,
                OffsetHigh: high,
            },
        },
        hEvent: ptr::null_mut(),
    }
}

#[inline]
fn last_error() -> i32 {
    // SAFETY: no preconditions
    unsafe { GetLastError() as i32 }
}

impl NativeIo for WindowsNative {
    #[inline]
    fn pread(&self, handle: RawHandle, buf: &mut [u8], offset: u64) -> IoOutcome {
        let len = u32::try_from(buf.len()).unwrap_or(u32::MAX);
        let mut overlapped = overlapped_at(offset);
        let mut transferred = 0u32;

        // SAFETY: `buf` and `overlapped` both outlive the synchronous call, `len <= buf.len()`
        let ok = unsafe {
            ReadFile(
                handle,
                buf.as_mut_ptr(),
                len,
                &mut transferred,
                &mut overlapped,
            )
        } != 0;

        match IoOutcome::from_windows(ok, transferred, last_error) {
            // Reading at or past the end of file is a zero-length read, not a failure
            IoOutcome::Failed(code) if code == ERROR_HANDLE_EOF as i32 => IoOutcome::Transferred(0),
            outcome => outcome,
        }
    }

    #[inline]
    fn pwrite(&self, handle: RawHandle, data: &[u8], offset: u64) -> IoOutcome {
        let len = u32::try_from(data.len()).unwrap_or(u32::MAX);
        let mut overlapped = overlapped_at(offset);
        let mut transferred = 0u32;

        // SAFETY: `data` and `overlapped` both outlive the synchronous call, `len <= data.len()`
        let ok = unsafe {
            WriteFile(
                handle,
                data.as_ptr(),
                len,
                &mut transferred,
                &mut overlapped,
            )
        } != 0;

        IoOutcome::from_windows(ok, transferred, last_error)
    }

    fn error_message(&self, code: i32) -> String {
        let mut buf = [0u16; 512];

        // SAFETY: the buffer is valid for `buf.len()` UTF-16 units, no inserts are expanded
        let len = unsafe {
            FormatMessageW(
                FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
                ptr::null(),
                code as u32,
                0,
                buf.as_mut_ptr(),
                buf.len() as u32,
                ptr::null(),
            )
        };
        if len == 0 {
            return format!("Unknown error {code}");
        }

        String::from_utf16_lossy(&buf[..len as usize])
            .trim_end()
            .to_owned()
    }
}
