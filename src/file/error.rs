//! Error types for ranged-pread
//!
//! ranged-pread 的错误类型

use std::io;
use thiserror::Error;

/// Error type for ranged-pread operations
///
/// ranged-pread 操作的错误类型
///
/// Range errors are raised locally before any system call is issued.
/// I/O errors come straight from the operating system and are never retried.
///
/// 范围错误在发起任何系统调用之前就在本地产生。
/// I/O 错误直接来自操作系统，不会自动重试。
#[derive(Debug, Error)]
pub enum Error {
    /// Access falls outside the addressed section
    ///
    /// 访问超出了所寻址的区段
    #[error("access of {len} bytes at offset {offset} exceeds section length {bound} / 在偏移 {offset} 处访问 {len} 字节超出区段长度 {bound}")]
    OutOfRange {
        offset: u64,
        len: u64,
        bound: u64,
    },

    /// Cursor position outside `[0, section length]`
    ///
    /// 游标位置超出 `[0, 区段长度]`
    #[error("position {position} is outside section of length {bound} / 位置 {position} 超出长度为 {bound} 的区段")]
    InvalidPosition { position: i128, bound: u64 },

    /// The native positioned call reported failure
    ///
    /// 原生定位调用报告失败
    #[error("{message} (os error {code})")]
    Io {
        /// Raw platform error code (errno or Win32 error)
        ///
        /// 原始平台错误码（errno 或 Win32 错误）
        code: i32,
        message: String,
    },

    /// No positioned I/O implementation for this platform
    ///
    /// 当前平台不支持定位 I/O
    #[error("positioned I/O is not supported on this platform / 当前平台不支持定位 I/O")]
    Unsupported,

    /// Section does not fit inside the file
    ///
    /// 区段超出文件范围
    #[error("section [{start}, {start}+{len}) does not fit in file of {file_len} bytes / 区段 [{start}, {start}+{len}) 超出 {file_len} 字节的文件")]
    InvalidSection {
        start: u64,
        len: u64,
        file_len: u64,
    },

    /// Querying the backing handle failed while building a section
    ///
    /// 构建区段时查询底层句柄失败
    #[error("failed to query file handle: {0}")]
    Handle(#[source] io::Error),

    /// A cursor write transferred fewer bytes than requested
    ///
    /// 游标写入的字节数少于请求的字节数
    #[error("unable to write {requested} bytes, only wrote {written} / 无法写入 {requested} 字节，仅写入 {written}")]
    ShortWrite { requested: u64, written: u64 },

    /// Sections have a fixed extent and cannot be resized
    ///
    /// 区段长度固定，无法调整大小
    #[error("section length is fixed / 区段长度固定")]
    FixedLength,
}

impl Error {
    /// Raw platform error code, if this error came from the OS
    ///
    /// 如果错误来自操作系统，返回原始平台错误码
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Error::Io { code, .. } => Some(*code),
            Error::Handle(err) => err.raw_os_error(),
            _ => None,
        }
    }

    /// Whether this is a local bounds violation
    ///
    /// 是否为本地越界错误
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::OutOfRange { .. } | Error::InvalidPosition { .. })
    }
}

/// Convert from io::Error to Error
///
/// 从 io::Error 转换到 Error
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Handle(err)
    }
}

/// Convert from Error to io::Error so sections plug into `std::io`
///
/// 从 Error 转换到 io::Error，使区段能与 `std::io` 配合使用
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Handle(io_err) => io_err,
            Error::Io { code, .. } => {
                let kind = io::Error::from_raw_os_error(code).kind();
                io::Error::new(kind, err)
            }
            Error::OutOfRange { .. } | Error::InvalidPosition { .. } | Error::InvalidSection { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, err)
            }
            Error::Unsupported | Error::FixedLength => io::Error::new(io::ErrorKind::Unsupported, err),
            Error::ShortWrite { .. } => io::Error::new(io::ErrorKind::WriteZero, err),
        }
    }
}

/// Result type alias using our custom Error type
///
/// 使用自定义 Error 类型的 Result 类型别名
pub type Result<T> = std::result::Result<T, Error>;
