//! Bounded view over a shared file handle
//!
//! 共享文件句柄上的有界视图

use super::cursor::SectionCursor;
use super::dispatcher::Dispatcher;
use super::error::{Error, Result};
use super::handle::FileHandle;
use super::range::SectionRange;
use std::fmt;
use std::ptr;

/// A contiguous, fixed sub-range of a file
///
/// 文件中一段连续且固定的子范围
///
/// All offsets passed to a section are relative to its own start, and every
/// access is checked against its length before a system call is made. Reads and
/// writes are positioned, so any number of sections (and threads) can share one
/// handle without racing on a shared cursor.
///
/// 传给区段的所有偏移都相对于区段自身的起点，每次访问都会在发起系统调用之前
/// 检查区段长度。读写都是定位操作，因此任意多个区段（和线程）可以共享同一个
/// 句柄，而不会在共享游标上产生竞争。
///
/// # Features
///
/// - **Positioned I/O**: Never seeks, the handle's own cursor is left untouched
/// - **Bounds checked**: Out-of-range access fails locally with [`Error::OutOfRange`]
/// - **Cheap to copy**: A section is a borrowed handle plus two offsets
/// - **Nestable**: [`slice`](Self::slice) carves narrower child sections
///
/// # 特性
///
/// - **定位 I/O**：从不执行 seek，句柄自身的游标保持不变
/// - **边界检查**：越界访问在本地以 [`Error::OutOfRange`] 失败
/// - **复制廉价**：区段只是一个借用的句柄加两个偏移
/// - **可嵌套**：[`slice`](Self::slice) 可以切出更窄的子区段
///
/// # Examples
///
/// ```
/// # use ranged_pread::{Section, Result};
/// # fn main() -> Result<()> {
/// let file = tempfile::tempfile()?;
/// file.set_len(1024)?;
///
/// let root = Section::new(&file)?;
/// let header = root.slice(0, 512)?;
/// let body = root.slice(512, 512)?;
///
/// // Concurrent writes to both halves through the same handle
/// // 通过同一个句柄并发写入两半
/// std::thread::scope(|s| {
///     s.spawn(move || header.write(&[1; 512]).unwrap());
///     s.spawn(move || body.write(&[2; 512]).unwrap());
/// });
///
/// let mut buf = [0u8; 4];
/// root.read_at(&mut buf, 510)?;
/// assert_eq!(buf, [1, 1, 2, 2]);
/// # Ok(())
/// # }
/// ```
pub struct Section<'a, H: ?Sized> {
    handle: &'a H,
    range: SectionRange,
    dispatcher: Dispatcher,
}

impl<'a, H: FileHandle + ?Sized> Section<'a, H> {
    /// Section covering the whole current length of the file
    ///
    /// 覆盖文件当前全部长度的区段
    ///
    /// # Errors
    /// [`Error::Handle`] if the file length cannot be queried
    ///
    /// # Errors
    /// 无法查询文件长度时返回 [`Error::Handle`]
    pub fn new(handle: &'a H) -> Result<Self> {
        let file_len = handle.current_len().map_err(Error::Handle)?;
        Self::build(handle, 0, file_len, file_len)
    }

    /// Section of `len` bytes starting at absolute offset `start`
    ///
    /// 从绝对偏移 `start` 开始、长度为 `len` 字节的区段
    ///
    /// # Errors
    /// - [`Error::InvalidSection`] if `start + len` exceeds the current file length
    /// - [`Error::Handle`] if the file length cannot be queried
    ///
    /// # Errors
    /// - 如果 `start + len` 超出当前文件长度，返回 [`Error::InvalidSection`]
    /// - 无法查询文件长度时返回 [`Error::Handle`]
    pub fn with_range(handle: &'a H, start: u64, len: u64) -> Result<Self> {
        let file_len = handle.current_len().map_err(Error::Handle)?;
        Self::build(handle, start, len, file_len)
    }

    fn build(handle: &'a H, start: u64, len: u64, file_len: u64) -> Result<Self> {
        let range = SectionRange::new(start, len)
            .filter(|range| range.end() <= file_len)
            .ok_or(Error::InvalidSection {
                start,
                len,
                file_len,
            })?;

        tracing::trace!(start, len, file_len, "section created");

        Ok(Self {
            handle,
            range,
            dispatcher: Dispatcher::current(),
        })
    }

    /// Replace the dispatcher used for native calls
    ///
    /// 替换用于原生调用的分发器
    #[inline]
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    #[inline]
    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher
    }

    /// Borrowed backing handle
    ///
    /// 借用的底层句柄
    #[inline]
    pub fn handle(&self) -> &'a H {
        self.handle
    }

    /// Absolute start offset in the file
    ///
    /// 在文件中的绝对起始偏移
    #[inline]
    pub fn start(&self) -> u64 {
        self.range.start()
    }

    /// Length of the section in bytes
    ///
    /// 区段长度（字节）
    #[inline]
    pub fn len(&self) -> u64 {
        self.range.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Absolute extent of the section
    ///
    /// 区段的绝对范围
    #[inline]
    pub fn range(&self) -> SectionRange {
        self.range
    }

    /// Read from the start of the section
    ///
    /// 从区段起点读取
    ///
    /// # Errors
    /// - [`Error::OutOfRange`] if `buf` is longer than the section
    /// - [`Error::Io`] / [`Error::Unsupported`] from the dispatcher
    ///
    /// # Errors
    /// - 如果 `buf` 比区段长，返回 [`Error::OutOfRange`]
    /// - 来自分发器的 [`Error::Io`] / [`Error::Unsupported`]
    #[inline]
    pub fn read(&self, buf: &mut [u8]) -> Result<u32> {
        self.read_at(buf, 0)
    }

    /// Read at `offset` relative to the section start
    ///
    /// 在相对区段起点的 `offset` 处读取
    ///
    /// May return fewer bytes than `buf.len()`.
    ///
    /// 返回的字节数可能少于 `buf.len()`。
    ///
    /// # Errors
    /// - [`Error::OutOfRange`] if `offset + buf.len()` exceeds the section length
    /// - [`Error::Io`] / [`Error::Unsupported`] from the dispatcher
    ///
    /// # Errors
    /// - 如果 `offset + buf.len()` 超出区段长度，返回 [`Error::OutOfRange`]
    /// - 来自分发器的 [`Error::Io`] / [`Error::Unsupported`]
    #[inline]
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<u32> {
        let absolute = self.range.locate(offset, buf.len() as u64)?;
        self.dispatcher.read_at(self.handle, buf, absolute)
    }

    /// Write at the start of the section
    ///
    /// 在区段起点写入
    #[inline]
    pub fn write(&self, data: &[u8]) -> Result<u32> {
        self.write_at(data, 0)
    }

    /// Write at `offset` relative to the section start
    ///
    /// 在相对区段起点的 `offset` 处写入
    ///
    /// # Errors
    /// - [`Error::OutOfRange`] if `offset + data.len()` exceeds the section length
    /// - [`Error::Io`] / [`Error::Unsupported`] from the dispatcher
    ///
    /// # Errors
    /// - 如果 `offset + data.len()` 超出区段长度，返回 [`Error::OutOfRange`]
    /// - 来自分发器的 [`Error::Io`] / [`Error::Unsupported`]
    #[inline]
    pub fn write_at(&self, data: &[u8], offset: u64) -> Result<u32> {
        let absolute = self.range.locate(offset, data.len() as u64)?;
        self.dispatcher.write_at(self.handle, data, absolute)
    }

    /// Narrower section at relative `start` with `len` bytes
    ///
    /// 相对起点 `start` 处长度为 `len` 字节的更窄区段
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `start + len` exceeds this section's length
    ///
    /// # Errors
    /// 如果 `start + len` 超出此区段长度，返回 [`Error::OutOfRange`]
    #[inline]
    pub fn slice(&self, start: u64, len: u64) -> Result<Self> {
        let range = self.range.subrange(start, len).ok_or(Error::OutOfRange {
            offset: start,
            len,
            bound: self.len(),
        })?;

        Ok(Self {
            handle: self.handle,
            range,
            dispatcher: self.dispatcher,
        })
    }

    /// Stream-style cursor starting at position 0
    ///
    /// 从位置 0 开始的流式游标
    #[inline]
    pub fn cursor(self) -> SectionCursor<'a, H> {
        SectionCursor::new(self)
    }
}

impl<H: ?Sized> Clone for Section<'_, H> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: ?Sized> Copy for Section<'_, H> {}

/// Two sections are equal when they view the same handle over the same range
///
/// 两个区段在相同句柄上查看相同范围时相等
impl<H: ?Sized> PartialEq for Section<'_, H> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.handle, other.handle) && self.range == other.range
    }
}

impl<H: ?Sized> Eq for Section<'_, H> {}

impl<H: ?Sized> fmt::Debug for Section<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("range", &self.range)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}
