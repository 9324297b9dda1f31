//! Routes positioned calls to the adapter of the running platform
//!
//! 将定位调用路由到当前平台的适配器

use super::error::{Error, Result};
use super::handle::FileHandle;
use super::platform::{NativeIo, Platform, native_for};
use std::fmt;
use std::io;

/// Entry point for positioned reads and writes
///
/// 定位读写的入口
///
/// A dispatcher is a small `Copy` value holding the platform identity and the
/// matching native adapter. It carries no state between calls, so one value can
/// be shared by any number of threads working on the same handle.
///
/// 分发器是一个小的 `Copy` 值，保存平台标识和对应的原生适配器。
/// 调用之间不保留任何状态，因此一个值可以被操作同一句柄的任意多个线程共享。
///
/// A successful call may transfer fewer bytes than requested. Callers that
/// need the whole buffer filled must loop.
///
/// 成功的调用传输的字节数可能少于请求的字节数。需要填满整个缓冲区的调用者必须自行循环。
///
/// # Examples
///
/// ```
/// # use ranged_pread::{Dispatcher, Result};
/// # use std::io::Write;
/// # fn main() -> Result<()> {
/// let mut file = tempfile::tempfile()?;
/// file.write_all(b"hello world")?;
///
/// let dispatcher = Dispatcher::current();
/// let mut buf = [0u8; 5];
/// let n = dispatcher.read_at(&file, &mut buf, 6)?;
/// assert_eq!(n, 5);
/// assert_eq!(&buf, b"world");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy)]
pub struct Dispatcher {
    platform: Platform,
    native: Option<&'static dyn NativeIo>,
}

impl Dispatcher {
    /// Dispatcher for the running process
    ///
    /// 当前进程的分发器
    #[inline]
    pub fn current() -> Self {
        Self::for_platform(Platform::current())
    }

    /// Dispatcher for an explicit platform identity
    ///
    /// 指定平台标识的分发器
    ///
    /// An identity other than the build target has no adapter; every call on
    /// the resulting dispatcher fails with [`Error::Unsupported`].
    ///
    /// 与构建目标不同的平台标识没有适配器，该分发器上的每次调用都会返回 [`Error::Unsupported`]。
    #[inline]
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            native: native_for(platform),
        }
    }

    /// Dispatcher with an injected adapter
    ///
    /// 注入适配器的分发器
    ///
    /// [`Platform::Unsupported`] still wins: the adapter is ignored.
    ///
    /// [`Platform::Unsupported`] 优先：适配器会被忽略。
    #[inline]
    pub fn with_native(platform: Platform, native: &'static dyn NativeIo) -> Self {
        Self {
            platform,
            native: (platform != Platform::Unsupported).then_some(native),
        }
    }

    #[inline]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Whether calls can be routed at all
    ///
    /// 是否能够路由调用
    #[inline]
    pub fn is_supported(&self) -> bool {
        self.native.is_some()
    }

    #[inline]
    fn native(&self) -> Result<&'static dyn NativeIo> {
        self.native.ok_or(Error::Unsupported)
    }

    /// Read into `buf` from absolute file offset `offset`
    ///
    /// 从文件绝对偏移 `offset` 读取数据到 `buf`
    ///
    /// The handle's own cursor is neither used nor moved.
    ///
    /// 既不使用也不移动句柄自身的游标。
    ///
    /// # Errors
    /// - [`Error::Unsupported`] if no adapter matches the platform
    /// - [`Error::Io`] if the system call fails
    ///
    /// # Errors
    /// - 没有匹配平台的适配器时返回 [`Error::Unsupported`]
    /// - 系统调用失败时返回 [`Error::Io`]
    #[inline]
    pub fn read_at<H: FileHandle + ?Sized>(&self, handle: &H, buf: &mut [u8], offset: u64) -> Result<u32> {
        let native = self.native()?;
        native.pread(handle.raw_handle(), buf, offset).into_result(native)
    }

    /// Write `data` at absolute file offset `offset`
    ///
    /// 在文件绝对偏移 `offset` 处写入 `data`
    ///
    /// # Errors
    /// Same as [`read_at`](Self::read_at).
    ///
    /// # Errors
    /// 与 [`read_at`](Self::read_at) 相同。
    #[inline]
    pub fn write_at<H: FileHandle + ?Sized>(&self, handle: &H, data: &[u8], offset: u64) -> Result<u32> {
        let native = self.native()?;
        native.pwrite(handle.raw_handle(), data, offset).into_result(native)
    }

    /// Message for a platform error code
    ///
    /// 平台错误码对应的消息
    pub fn error_message(&self, code: i32) -> String {
        match self.native {
            Some(native) => native.error_message(code),
            None => io::Error::from_raw_os_error(code).to_string(),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("platform", &self.platform)
            .field("supported", &self.is_supported())
            .finish()
    }
}

/// Whether positioned I/O is available in this process
///
/// 当前进程是否支持定位 I/O
#[inline]
pub fn is_supported() -> bool {
    Dispatcher::current().is_supported()
}

/// Positioned read through the current platform's dispatcher
///
/// 通过当前平台分发器进行定位读取
#[inline]
pub fn read_at<H: FileHandle + ?Sized>(handle: &H, buf: &mut [u8], offset: u64) -> Result<u32> {
    Dispatcher::current().read_at(handle, buf, offset)
}

/// Positioned write through the current platform's dispatcher
///
/// 通过当前平台分发器进行定位写入
#[inline]
pub fn write_at<H: FileHandle + ?Sized>(handle: &H, data: &[u8], offset: u64) -> Result<u32> {
    Dispatcher::current().write_at(handle, data, offset)
}

/// Message the OS associates with `code`
///
/// 操作系统为 `code` 关联的消息
pub fn error_message(code: i32) -> String {
    Dispatcher::current().error_message(code)
}

/// Method-call form of [`read_at`] and [`write_at`] for any [`FileHandle`]
///
/// 为任意 [`FileHandle`] 提供方法调用形式的 [`read_at`] 和 [`write_at`]
///
/// # Examples
///
/// ```
/// # use ranged_pread::{PositionedExt, Result};
/// # fn main() -> Result<()> {
/// let file = tempfile::tempfile()?;
/// file.set_len(16)?;
///
/// assert_eq!(file.pwrite(b"abcd", 8)?, 4);
///
/// let mut buf = [0u8; 4];
/// assert_eq!(file.pread(&mut buf, 8)?, 4);
/// assert_eq!(&buf, b"abcd");
/// # Ok(())
/// # }
/// ```
pub trait PositionedExt: FileHandle {
    #[inline]
    fn pread(&self, buf: &mut [u8], offset: u64) -> Result<u32> {
        read_at(self, buf, offset)
    }

    #[inline]
    fn pwrite(&self, data: &[u8], offset: u64) -> Result<u32> {
        write_at(self, data, offset)
    }
}

impl<H: FileHandle + ?Sized> PositionedExt for H {}
