//! Unix adapter: `pread`/`pwrite` with the offset passed directly
//!
//! Unix 适配器：直接传递偏移的 `pread`/`pwrite`

use super::outcome::IoOutcome;
use super::platform::{NativeIo, RawHandle};
use std::ffi::CStr;
use std::io;

/// Largest request issued in one call, keeps every count representable as `u32`
///
/// 单次调用的最大请求长度，保证字节数可以用 `u32` 表示
const MAX_REQUEST: usize = u32::MAX as usize;

/// Native calls backed by libc
///
/// 基于 libc 的原生调用
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixNative;

#[inline]
fn last_errno() -> i32 {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

impl NativeIo for UnixNative {
    #[inline]
    fn pread(&self, handle: RawHandle, buf: &mut [u8], offset: u64) -> IoOutcome {
        // Offsets that don't fit off_t would wrap negative
        let Ok(offset) = libc::off_t::try_from(offset) else {
            return IoOutcome::Failed(libc::EINVAL);
        };
        let len = buf.len().min(MAX_REQUEST);

        // SAFETY: `buf` is mutably borrowed for the whole call and `len <= buf.len()`
        let ret = unsafe { libc::pread(handle, buf.as_mut_ptr().cast(), len, offset) };
        IoOutcome::from_unix(ret, last_errno)
    }

    #[inline]
    fn pwrite(&self, handle: RawHandle, data: &[u8], offset: u64) -> IoOutcome {
        let Ok(offset) = libc::off_t::try_from(offset) else {
            return IoOutcome::Failed(libc::EINVAL);
        };
        let len = data.len().min(MAX_REQUEST);

        // SAFETY: `data` is borrowed for the whole call and `len <= data.len()`
        let ret = unsafe { libc::pwrite(handle, data.as_ptr().cast(), len, offset) };
        IoOutcome::from_unix(ret, last_errno)
    }

    fn error_message(&self, code: i32) -> String {
        let mut buf = [0 as libc::c_char; 256];

        // SAFETY: the buffer is valid for `buf.len()` bytes, strerror_r NUL-terminates on success
        let rc = unsafe { libc::strerror_r(code, buf.as_mut_ptr(), buf.len()) };
        if rc != 0 {
            return format!("Unknown error {code}");
        }

        // SAFETY: strerror_r returned 0, so `buf` holds a NUL-terminated string
        unsafe { CStr::from_ptr(buf.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }
}
