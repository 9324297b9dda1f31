//! Platform identity and the native call seam
//!
//! 平台标识与原生调用接口

use super::outcome::IoOutcome;
use std::sync::OnceLock;

/// OS-level handle value passed to the native calls
///
/// 传给原生调用的操作系统级句柄值
#[cfg(unix)]
pub type RawHandle = std::os::fd::RawFd;

/// OS-level handle value passed to the native calls
///
/// 传给原生调用的操作系统级句柄值
#[cfg(windows)]
pub type RawHandle = std::os::windows::io::RawHandle;

/// OS-level handle value passed to the native calls
///
/// 传给原生调用的操作系统级句柄值
#[cfg(not(any(unix, windows)))]
pub type RawHandle = usize;

/// Platform family that decides which native protocol is used
///
/// 决定使用哪种原生协议的平台族
///
/// Unix passes the offset directly to `pread`/`pwrite`. Windows has no offset
/// parameter on `ReadFile`/`WriteFile`, so the offset travels inside an
/// `OVERLAPPED` structure instead.
///
/// Unix 直接把偏移传给 `pread`/`pwrite`。Windows 的 `ReadFile`/`WriteFile`
/// 没有偏移参数，因此偏移放在 `OVERLAPPED` 结构中传递。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Platform {
    /// Linux, macOS and the BSDs
    ///
    /// Linux、macOS 以及 BSD 系列
    Unix,
    /// Windows (NT family)
    ///
    /// Windows（NT 系列）
    Windows,
    /// Anything else, positioned I/O is unavailable
    ///
    /// 其他平台，定位 I/O 不可用
    Unsupported,
}

impl Platform {
    /// Platform of the build target
    ///
    /// 构建目标所在的平台
    #[inline]
    pub const fn detect() -> Self {
        if cfg!(unix) {
            Platform::Unix
        } else if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unsupported
        }
    }

    /// Platform of the running process, detected once and cached
    ///
    /// 当前进程所在的平台，只检测一次并缓存
    pub fn current() -> Self {
        static CURRENT: OnceLock<Platform> = OnceLock::new();

        *CURRENT.get_or_init(|| {
            let platform = Platform::detect();
            tracing::debug!(?platform, "detected positioned I/O platform");
            platform
        })
    }

    /// Whether positioned I/O can run on this platform
    ///
    /// 此平台是否支持定位 I/O
    #[inline]
    pub fn is_supported(self) -> bool {
        native_for(self).is_some()
    }
}

/// Raw positioned read/write primitives of one platform
///
/// 单个平台的原始定位读写原语
///
/// Each method issues exactly one system call with no retry and no buffering,
/// and never fails on its own: the raw outcome is handed back as an
/// [`IoOutcome`]. The borrowed buffer stays pinned for the whole call.
///
/// 每个方法只发起一次系统调用，不重试也不缓冲，自身从不报错：
/// 原始结果以 [`IoOutcome`] 返回。借用的缓冲区在整个调用期间保持固定。
pub trait NativeIo: Send + Sync {
    /// Read into `buf` from absolute file offset `offset`
    ///
    /// 从文件绝对偏移 `offset` 读取数据到 `buf`
    fn pread(&self, handle: RawHandle, buf: &mut [u8], offset: u64) -> IoOutcome;

    /// Write `data` at absolute file offset `offset`
    ///
    /// 在文件绝对偏移 `offset` 处写入 `data`
    fn pwrite(&self, handle: RawHandle, data: &[u8], offset: u64) -> IoOutcome;

    /// Human-readable message for a platform error code
    ///
    /// 平台错误码对应的可读消息
    fn error_message(&self, code: i32) -> String;
}

/// Adapter for `platform`, if it is the build target
///
/// 如果 `platform` 是构建目标，返回对应的适配器
pub(crate) fn native_for(platform: Platform) -> Option<&'static dyn NativeIo> {
    match platform {
        #[cfg(unix)]
        Platform::Unix => Some(&super::unix::UnixNative),
        #[cfg(windows)]
        Platform::Windows => Some(&super::windows::WindowsNative),
        _ => None,
    }
}

/// Split a 64-bit offset into the `(Offset, OffsetHigh)` halves of `OVERLAPPED`
///
/// 将 64 位偏移拆分为 `OVERLAPPED` 的 `(Offset, OffsetHigh)` 两半
#[cfg_attr(not(windows), allow(dead_code))]
#[inline]
pub(crate) const fn split_offset(offset: u64) -> (u32, u32) {
    ((offset & 0xFFFF_FFFF) as u32, (offset >> 32) as u32)
}
