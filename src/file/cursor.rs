//! Stream-style cursor over a section
//!
//! 区段上的流式游标

use super::error::{Error, Result};
use super::handle::{Access, FileHandle};
use super::section::Section;
use std::fmt;
use std::io;

/// Reference point for [`SectionCursor::seek`]
///
/// [`SectionCursor::seek`] 的参考点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeekOrigin {
    /// `position = offset`
    ///
    /// 从区段起点：`position = offset`
    Begin,
    /// `position = position + offset`
    ///
    /// 从当前位置：`position = position + offset`
    Current,
    /// `position = len - offset`
    ///
    /// 从区段末尾向前：`position = len - offset`
    End,
}

/// Sequential read/write/seek over a [`Section`]
///
/// [`Section`] 上的顺序读/写/定位
///
/// The cursor keeps its own position and issues positioned calls at
/// `position`, it never moves the handle's cursor and has no internal buffer.
/// It is not meant to be shared between threads; give each thread its own
/// cursor over the same (or an overlapping) section instead.
///
/// 游标维护自己的位置，并在 `position` 处发起定位调用，从不移动句柄的游标，
/// 也没有内部缓冲区。游标不应在线程间共享；请为每个线程在同一个（或重叠的）
/// 区段上创建各自的游标。
///
/// # Strict vs `std::io`
///
/// The inherent [`read`](Self::read) and [`write`](Self::write) reject any
/// access that would pass the end of the section, and `write` treats a short
/// write as an error. The [`io::Read`] and [`io::Write`] implementations follow
/// the std conventions instead: they transfer at most the remaining bytes and
/// report the end of the section as `Ok(0)`.
///
/// # 严格模式与 `std::io`
///
/// 固有方法 [`read`](Self::read) 和 [`write`](Self::write) 会拒绝任何越过区段
/// 末尾的访问，并且 `write` 将短写视为错误。[`io::Read`] 和 [`io::Write`]
/// 的实现遵循标准库约定：最多传输剩余字节，区段末尾返回 `Ok(0)`。
///
/// # Examples
///
/// ```
/// # use ranged_pread::{Section, SeekOrigin, Result};
/// # fn main() -> Result<()> {
/// let file = tempfile::tempfile()?;
/// file.set_len(1024)?;
///
/// let mut cursor = Section::new(&file)?.cursor();
/// cursor.write(&[b'A'; 512])?;
/// assert_eq!(cursor.position(), 512);
///
/// assert_eq!(cursor.seek(128, SeekOrigin::End)?, 896);
///
/// cursor.set_position(0)?;
/// let mut buf = [0u8; 512];
/// assert_eq!(cursor.read(&mut buf)?, 512);
/// assert!(buf.iter().all(|&b| b == b'A'));
/// # Ok(())
/// # }
/// ```
pub struct SectionCursor<'a, H: ?Sized> {
    section: Section<'a, H>,
    position: u64,
}

impl<'a, H: FileHandle + ?Sized> SectionCursor<'a, H> {
    /// Cursor at position 0 of `section`
    ///
    /// 位于 `section` 位置 0 的游标
    #[inline]
    pub fn new(section: Section<'a, H>) -> Self {
        tracing::trace!(start = section.start(), len = section.len(), "section cursor created");
        Self { section, position: 0 }
    }

    #[inline]
    pub fn section(&self) -> Section<'a, H> {
        self.section
    }

    #[inline]
    pub fn into_section(self) -> Section<'a, H> {
        self.section
    }

    /// Current position relative to the section start
    ///
    /// 相对区段起点的当前位置
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Move to `position`, same as seeking from [`SeekOrigin::Begin`]
    ///
    /// 移动到 `position`，等同于从 [`SeekOrigin::Begin`] 定位
    ///
    /// # Errors
    /// [`Error::InvalidPosition`] if `position` exceeds the section length
    ///
    /// # Errors
    /// 如果 `position` 超出区段长度，返回 [`Error::InvalidPosition`]
    #[inline]
    pub fn set_position(&mut self, position: u64) -> Result<()> {
        self.seek_to(i128::from(position)).map(|_| ())
    }

    /// Section length, fixed for the cursor's lifetime
    ///
    /// 区段长度，在游标生命周期内固定
    #[inline]
    pub fn len(&self) -> u64 {
        self.section.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.section.is_empty()
    }

    /// Bytes between the position and the end of the section
    ///
    /// 当前位置到区段末尾之间的字节数
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.len() - self.position
    }

    /// Read at the current position and advance by the bytes read
    ///
    /// 在当前位置读取，并按读取的字节数前进
    ///
    /// # Errors
    /// - [`Error::OutOfRange`] if `buf` is longer than [`remaining`](Self::remaining)
    /// - [`Error::Io`] / [`Error::Unsupported`] from the dispatcher
    ///
    /// # Errors
    /// - 如果 `buf` 比 [`remaining`](Self::remaining) 长，返回 [`Error::OutOfRange`]
    /// - 来自分发器的 [`Error::Io`] / [`Error::Unsupported`]
    #[inline]
    pub fn read(&mut self, buf: &mut [u8]) -> Result<u32> {
        let read = self.section.read_at(buf, self.position)?;
        self.position += u64::from(read);
        Ok(read)
    }

    /// Write all of `data` at the current position and advance
    ///
    /// 在当前位置写入全部 `data` 并前进
    ///
    /// A short write still advances the position by the bytes that did reach
    /// the file, then fails.
    ///
    /// 短写仍会按实际写入文件的字节数前进，然后返回错误。
    ///
    /// # Errors
    /// - [`Error::OutOfRange`] if `data` is longer than [`remaining`](Self::remaining)
    /// - [`Error::ShortWrite`] if fewer than `data.len()` bytes were written
    /// - [`Error::Io`] / [`Error::Unsupported`] from the dispatcher
    ///
    /// # Errors
    /// - 如果 `data` 比 [`remaining`](Self::remaining) 长，返回 [`Error::OutOfRange`]
    /// - 写入字节数少于 `data.len()` 时返回 [`Error::ShortWrite`]
    /// - 来自分发器的 [`Error::Io`] / [`Error::Unsupported`]
    #[inline]
    pub fn write(&mut self, data: &[u8]) -> Result<u32> {
        let written = self.section.write_at(data, self.position)?;
        self.position += u64::from(written);

        let requested = data.len() as u64;
        if u64::from(written) != requested {
            return Err(Error::ShortWrite {
                requested,
                written: u64::from(written),
            });
        }
        Ok(written)
    }

    /// Move the position and return the new one
    ///
    /// 移动位置并返回新位置
    ///
    /// - `Begin`: `position = offset`
    /// - `Current`: `position += offset`
    /// - `End`: `position = len - offset` (a positive offset moves back from the end)
    ///
    /// - `Begin`：`position = offset`
    /// - `Current`：`position += offset`
    /// - `End`：`position = len - offset`（正偏移表示从末尾向前移动）
    ///
    /// # Errors
    /// [`Error::InvalidPosition`] if the result falls outside `[0, len]`; the
    /// position is left unchanged
    ///
    /// # Errors
    /// 如果结果超出 `[0, len]`，返回 [`Error::InvalidPosition`]，位置保持不变
    #[inline]
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<u64> {
        let offset = i128::from(offset);
        let target = match origin {
            SeekOrigin::Begin => offset,
            SeekOrigin::Current => i128::from(self.position) + offset,
            SeekOrigin::End => i128::from(self.len()) - offset,
        };
        self.seek_to(target)
    }

    #[inline]
    fn seek_to(&mut self, target: i128) -> Result<u64> {
        match u64::try_from(target) {
            Ok(position) if position <= self.len() => {
                self.position = position;
                Ok(position)
            }
            _ => Err(Error::InvalidPosition {
                position: target,
                bound: self.len(),
            }),
        }
    }

    /// Whether the backing handle was opened for reading
    ///
    /// 底层句柄是否以可读方式打开
    #[inline]
    pub fn can_read(&self) -> bool {
        self.section.handle().access().is_ok_and(Access::can_read)
    }

    /// Whether the backing handle was opened for writing
    ///
    /// 底层句柄是否以可写方式打开
    #[inline]
    pub fn can_write(&self) -> bool {
        self.section.handle().access().is_ok_and(Access::can_write)
    }

    /// Always `true`
    #[inline]
    pub fn can_seek(&self) -> bool {
        true
    }

    /// Always fails: a section's extent is fixed at construction
    ///
    /// 总是失败：区段范围在构造时即已固定
    #[inline]
    pub fn set_len(&mut self, _len: u64) -> Result<()> {
        Err(Error::FixedLength)
    }

    /// No-op, the cursor buffers nothing
    ///
    /// 空操作，游标不做任何缓冲
    #[inline]
    pub fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn clamp_to_remaining(&self, len: usize) -> usize {
        usize::try_from(self.remaining()).map_or(len, |remaining| remaining.min(len))
    }
}

impl<H: FileHandle + ?Sized> io::Read for SectionCursor<'_, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = self.clamp_to_remaining(buf.len());
        let read = SectionCursor::read(self, &mut buf[..len])?;
        Ok(read as usize)
    }
}

impl<H: FileHandle + ?Sized> io::Write for SectionCursor<'_, H> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = self.clamp_to_remaining(buf.len());
        let written = self.section.write_at(&buf[..len], self.position)?;
        self.position += u64::from(written);
        Ok(written as usize)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// `SeekFrom::End(n)` follows std: the new position is `len + n`
///
/// `SeekFrom::End(n)` 遵循标准库约定：新位置为 `len + n`
impl<H: FileHandle + ?Sized> io::Seek for SectionCursor<'_, H> {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let target = match pos {
            io::SeekFrom::Start(n) => i128::from(n),
            io::SeekFrom::Current(n) => i128::from(self.position) + i128::from(n),
            io::SeekFrom::End(n) => i128::from(self.len()) + i128::from(n),
        };
        Ok(self.seek_to(target)?)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.position)
    }
}

impl<H: ?Sized> fmt::Debug for SectionCursor<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionCursor")
            .field("section", &self.section)
            .field("position", &self.position)
            .finish()
    }
}
