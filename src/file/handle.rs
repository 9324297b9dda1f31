//! Open file handles that positioned I/O can run against
//!
//! 可以执行定位 I/O 的已打开文件句柄

use super::platform::RawHandle;
use std::io;

/// Access mode a handle was opened with
///
/// 句柄打开时的访问模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Access {
    Read,
    Write,
    ReadWrite,
}

impl Access {
    #[inline]
    pub fn can_read(self) -> bool {
        matches!(self, Access::Read | Access::ReadWrite)
    }

    #[inline]
    pub fn can_write(self) -> bool {
        matches!(self, Access::Write | Access::ReadWrite)
    }
}

/// An already-open, randomly addressable file handle
///
/// 已打开且可随机寻址的文件句柄
///
/// Sections borrow the handle and never open, resize or close it. Keeping the
/// handle alive is the caller's job; the borrow checker enforces it for every
/// [`Section`](super::Section) built from it.
///
/// 区段只借用句柄，从不打开、调整大小或关闭它。保持句柄存活是调用者的责任，
/// 借用检查器会对由它构建的每个 [`Section`](super::Section) 强制这一点。
pub trait FileHandle {
    /// OS-level descriptor or handle value
    ///
    /// 操作系统级描述符或句柄值
    fn raw_handle(&self) -> RawHandle;

    /// Current length of the file in bytes
    ///
    /// 文件当前长度（字节）
    fn current_len(&self) -> io::Result<u64>;

    /// Access mode the handle was opened with
    ///
    /// 句柄打开时的访问模式
    fn access(&self) -> io::Result<Access>;
}

#[cfg(unix)]
impl FileHandle for std::fs::File {
    #[inline]
    fn raw_handle(&self) -> RawHandle {
        std::os::fd::AsRawFd::as_raw_fd(self)
    }

    #[inline]
    fn current_len(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn access(&self) -> io::Result<Access> {
        // SAFETY: F_GETFL only reads the status flags of the descriptor
        let flags = unsafe { libc::fcntl(self.raw_handle(), libc::F_GETFL) };
        if flags < 0 {
            return Err(io::Error::last_os_error());
        }

        match flags & libc::O_ACCMODE {
            libc::O_RDONLY => Ok(Access::Read),
            libc::O_WRONLY => Ok(Access::Write),
            _ => Ok(Access::ReadWrite),
        }
    }
}

#[cfg(windows)]
impl FileHandle for std::fs::File {
    #[inline]
    fn raw_handle(&self) -> RawHandle {
        std::os::windows::io::AsRawHandle::as_raw_handle(self)
    }

    #[inline]
    fn current_len(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn access(&self) -> io::Result<Access> {
        // Win32 has no query for the granted access of a handle; a denied
        // read or write surfaces as an Io error when it is attempted.
        Ok(Access::ReadWrite)
    }
}
