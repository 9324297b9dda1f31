//! Decoded outcome of a single native positioned call
//!
//! 单次原生定位调用的解码结果

use super::error::{Error, Result};
use super::platform::NativeIo;

/// Result of one pread/pwrite call
///
/// 一次 pread/pwrite 调用的结果
///
/// Exactly one of the byte count or the platform error code is present. The
/// value is `Copy` and never allocates, so adapters can return it by value
/// straight from the system call.
///
/// 字节数和平台错误码只会存在其一。该值是 `Copy` 的且从不分配内存，
/// 适配器可以直接从系统调用按值返回。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOutcome {
    /// Bytes actually transferred
    ///
    /// 实际传输的字节数
    Transferred(u32),

    /// Raw platform error code (errno or Win32 error)
    ///
    /// 原始平台错误码（errno 或 Win32 错误）
    Failed(i32),
}

impl IoOutcome {
    /// Decode the signed return value of `pread`/`pwrite`
    ///
    /// 解码 `pread`/`pwrite` 的有符号返回值
    ///
    /// `errno` is only evaluated for negative returns and must read the
    /// thread's last error before anything else can overwrite it.
    ///
    /// 仅当返回值为负时才调用 `errno`，它必须在其他操作覆盖之前读取线程的最后错误。
    #[inline]
    pub fn from_unix(ret: isize, errno: impl FnOnce() -> i32) -> Self {
        if ret < 0 {
            return IoOutcome::Failed(errno());
        }
        // Requests are clamped to u32::MAX before the call, the count never exceeds the request
        IoOutcome::Transferred(u32::try_from(ret).unwrap_or(u32::MAX))
    }

    /// Decode the `BOOL` + out-parameter pair of `ReadFile`/`WriteFile`
    ///
    /// 解码 `ReadFile`/`WriteFile` 的 `BOOL` 返回值和输出参数
    #[inline]
    pub fn from_windows(ok: bool, transferred: u32, last_error: impl FnOnce() -> i32) -> Self {
        if ok {
            IoOutcome::Transferred(transferred)
        } else {
            IoOutcome::Failed(last_error())
        }
    }

    /// Bytes transferred, if the call succeeded
    ///
    /// 调用成功时返回传输的字节数
    #[inline]
    pub fn transferred(self) -> Option<u32> {
        match self {
            IoOutcome::Transferred(n) => Some(n),
            IoOutcome::Failed(_) => None,
        }
    }

    /// Platform error code, if the call failed
    ///
    /// 调用失败时返回平台错误码
    #[inline]
    pub fn error_code(self) -> Option<i32> {
        match self {
            IoOutcome::Transferred(_) => None,
            IoOutcome::Failed(code) => Some(code),
        }
    }

    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, IoOutcome::Transferred(_))
    }

    /// Turn the outcome into a byte count or an [`Error::Io`]
    ///
    /// 将结果转换为字节数或 [`Error::Io`]
    ///
    /// The message is resolved through `native` only on failure.
    ///
    /// 仅在失败时通过 `native` 解析错误消息。
    #[inline]
    pub fn into_result(self, native: &dyn NativeIo) -> Result<u32> {
        match self {
            IoOutcome::Transferred(n) => Ok(n),
            IoOutcome::Failed(code) => Err(Error::Io {
                code,
                message: native.error_message(code),
            }),
        }
    }
}
