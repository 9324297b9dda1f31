//! Positioned file I/O and bounded file sections
//!
//! 定位文件 I/O 与有界文件区段
//!
//! Layers, leaves first:
//! - Native adapters ([`NativeIo`]): one `pread`/`pwrite` system call per
//!   request, Unix through libc and Windows through `ReadFile`/`WriteFile`
//!   with an `OVERLAPPED` offset
//! - [`IoOutcome`]: the decoded byte count or platform error code of one call
//! - [`Dispatcher`]: picks the adapter for the running [`Platform`] and turns
//!   outcomes into [`Result`]s
//! - [`Section`]: a fixed `[start, start + len)` window of a file with bounds
//!   checked positioned reads and writes
//! - [`SectionCursor`]: sequential read/write/seek on top of a section
//!
//! 各层由底向上：
//! - 原生适配器（[`NativeIo`]）：每个请求一次 `pread`/`pwrite` 系统调用，
//!   Unix 通过 libc，Windows 通过带 `OVERLAPPED` 偏移的 `ReadFile`/`WriteFile`
//! - [`IoOutcome`]：单次调用解码后的字节数或平台错误码
//! - [`Dispatcher`]：为当前 [`Platform`] 选择适配器，并把结果转换为 [`Result`]
//! - [`Section`]：文件中固定的 `[start, start + len)` 窗口，提供带边界检查的定位读写
//! - [`SectionCursor`]：构建在区段之上的顺序读/写/定位
//!
//! # Concurrency
//!
//! Dispatchers and sections hold no mutable state, so any number of threads may
//! use them against the same handle as long as each call brings its own buffer.
//! Overlapping concurrent writes are ordered by the OS, not by this crate.
//! A [`SectionCursor`] mutates its position on every call and belongs to one
//! thread at a time.
//!
//! # 并发
//!
//! 分发器和区段不持有可变状态，只要每次调用使用各自的缓冲区，任意多个线程
//! 都可以在同一句柄上使用它们。重叠的并发写入由操作系统决定顺序，而非本库。
//! [`SectionCursor`] 每次调用都会修改位置，同一时间只属于一个线程。
//!
//! ```
//! # use ranged_pread::{Section, Result};
//! # fn main() -> Result<()> {
//! let file = tempfile::tempfile()?;
//! file.set_len(4096)?;
//!
//! let root = Section::new(&file)?;
//! std::thread::scope(|s| {
//!     for i in 0..4u64 {
//!         let part = root.slice(i * 1024, 1024).unwrap();
//!         s.spawn(move || part.write(&[i as u8; 1024]).unwrap());
//!     }
//! });
//!
//! let mut buf = [0u8; 1];
//! root.read_at(&mut buf, 3 * 1024)?;
//! assert_eq!(buf[0], 3);
//! # Ok(())
//! # }
//! ```

mod cursor;
mod dispatcher;
mod error;
mod handle;
mod outcome;
mod platform;
mod range;
mod section;

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(test)]
mod tests;

// Re-export public API
// 重新导出公共 API
pub use cursor::{SectionCursor, SeekOrigin};
pub use dispatcher::{Dispatcher, PositionedExt, error_message, is_supported, read_at, write_at};
pub use error::{Error, Result};
pub use handle::{Access, FileHandle};
pub use outcome::IoOutcome;
pub use platform::{NativeIo, Platform, RawHandle};
pub use range::SectionRange;
pub use section::Section;
