//! Atomic positioned file I/O with bounded sections
//!
//! 原子定位文件 I/O 与有界区段
//!
//! This library reads and writes at explicit file offsets without touching the
//! handle's shared cursor (`pread`/`pwrite` on Unix, `ReadFile`/`WriteFile` with
//! an `OVERLAPPED` offset on Windows), and builds bounded sections on top so
//! several logical readers and writers can share one open file safely.
//!
//! 本库在显式文件偏移处读写，不触碰句柄的共享游标（Unix 上为 `pread`/`pwrite`，
//! Windows 上为带 `OVERLAPPED` 偏移的 `ReadFile`/`WriteFile`），并在此之上
//! 构建有界区段，使多个逻辑读写者可以安全地共享同一个已打开的文件。
//!
//! # Features
//!
//! - **No shared cursor**: Seek + read races disappear, the handle is never seeked
//! - **Bounds checked sections**: Each reader/writer is confined to its own byte range
//! - **No allocation on the hot path**: Results are plain `Copy` values
//! - **Thread-safe sharing**: Sections are `Copy` and can be sent to other threads
//! - **Runtime agnostic**: Plain blocking calls, usable with or without an async runtime
//!
//! # 特性
//!
//! - **无共享游标**：不存在 seek + read 竞争，句柄从不被 seek
//! - **带边界检查的区段**：每个读写者被限制在自己的字节范围内
//! - **热路径无分配**：结果是普通的 `Copy` 值
//! - **线程安全共享**：区段是 `Copy` 的，可以发送到其他线程
//! - **运行时无关**：普通阻塞调用，可在有或无异步运行时的环境中使用
//!
//! # Quick Start
//!
//! ## Positioned calls
//!
//! ## 定位调用
//!
//! ```
//! use ranged_pread::{PositionedExt, Result};
//! # fn main() -> Result<()> {
//! let file = tempfile::tempfile()?;
//! file.set_len(1024)?;
//!
//! // Write and read at offset 512, the file cursor stays where it was
//! // 在偏移 512 处读写，文件游标保持原位
//! file.pwrite(b"hello", 512)?;
//!
//! let mut buf = [0u8; 5];
//! let n = file.pread(&mut buf, 512)?;
//! assert_eq!(&buf[..n as usize], b"hello");
//! # Ok(())
//! # }
//! ```
//!
//! ## Sections
//!
//! ## 区段
//!
//! ```
//! use ranged_pread::{Section, SeekOrigin, Result};
//! # fn main() -> Result<()> {
//! let file = tempfile::tempfile()?;
//! file.set_len(1024)?;
//!
//! // A 256-byte window starting at byte 512
//! // 从字节 512 开始的 256 字节窗口
//! let section = Section::with_range(&file, 512, 256)?;
//! section.write_at(b"abc", 10)?;
//!
//! // Accesses past the window fail before any system call
//! // 越过窗口的访问在任何系统调用之前就会失败
//! assert!(section.read(&mut [0u8; 512]).is_err());
//!
//! // Stream-style access
//! // 流式访问
//! let mut cursor = section.cursor();
//! cursor.seek(10, SeekOrigin::Begin)?;
//! let mut buf = [0u8; 3];
//! cursor.read(&mut buf)?;
//! assert_eq!(&buf, b"abc");
//! assert_eq!(cursor.position(), 13);
//! # Ok(())
//! # }
//! ```
//!
//! # Main Types
//!
//! - [`Section`]: Bounded view over a shared file handle
//! - [`SectionCursor`]: Sequential read/write/seek over a section
//! - [`Dispatcher`]: Routes positioned calls to the platform adapter
//! - [`Platform`]: Platform identity, detected once per process
//! - [`IoOutcome`]: Byte count or platform error code of one native call
//!
//! # 主要类型
//!
//! - [`Section`][]: 共享文件句柄上的有界视图
//! - [`SectionCursor`][]: 区段上的顺序读/写/定位
//! - [`Dispatcher`][]: 将定位调用路由到平台适配器
//! - [`Platform`][]: 平台标识，每个进程只检测一次
//! - [`IoOutcome`][]: 单次原生调用的字节数或平台错误码

mod file;

pub use file::{
    Access, Dispatcher, Error, FileHandle, IoOutcome, NativeIo, Platform, PositionedExt, RawHandle,
    Result, Section, SectionCursor, SectionRange, SeekOrigin, error_message, is_supported, read_at,
    write_at,
};
