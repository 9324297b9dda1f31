//! Absolute file extent of a section
//!
//! 区段在文件中的绝对范围

use super::error::{Error, Result};
use std::ops::Range;

/// Absolute byte range `[start, end)` covered by a section
///
/// 区段覆盖的绝对字节范围 `[start, end)`
///
/// # Range Format
///
/// Uses half-open interval `[start, end)`:
/// - `start`: Inclusive start position
/// - `end`: Exclusive end position
///
/// For example: `SectionRange::new(0, 10)` represents bytes 0-9 (10 bytes total)
///
/// # 范围格式
///
/// 使用左闭右开区间 `[start, end)`：
/// - `start`: 包含的起始位置
/// - `end`: 不包含的结束位置
///
/// 例如：`SectionRange::new(0, 10)` 表示字节 0-9（共 10 字节）
///
/// # Examples
///
/// ```
/// # use ranged_pread::SectionRange;
/// let range = SectionRange::new(512, 256).unwrap();
/// assert_eq!(range.start(), 512);
/// assert_eq!(range.end(), 768);
/// assert_eq!(range.len(), 256);
///
/// // Children are addressed relative to the parent
/// // 子范围相对父范围寻址
/// let child = range.subrange(128, 64).unwrap();
/// assert_eq!(child.as_range(), 640..704);
/// assert!(range.contains(&child));
///
/// assert!(range.subrange(128, 256).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionRange {
    /// Range start position (inclusive)
    ///
    /// 范围起始位置（包含）
    start: u64,

    /// Range end position (exclusive)
    ///
    /// 范围结束位置（不包含）
    end: u64,
}

impl SectionRange {
    /// Create a range from a start offset and a length
    ///
    /// 根据起始偏移和长度创建范围
    ///
    /// Returns `None` if `start + len` overflows `u64`.
    ///
    /// 如果 `start + len` 溢出 `u64`，返回 `None`。
    #[inline]
    pub fn new(start: u64, len: u64) -> Option<Self> {
        let end = start.checked_add(len)?;
        Some(Self { start, end })
    }

    /// Get the start position
    ///
    /// 获取起始位置
    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Get the end position (exclusive)
    ///
    /// 获取结束位置（不包含）
    #[inline]
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Get the length of the range in bytes
    ///
    /// 获取范围的长度（字节数）
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn as_range(&self) -> Range<u64> {
        self.start..self.end
    }

    /// Whether `other` lies entirely inside this range
    ///
    /// `other` 是否完全位于此范围内
    #[inline]
    pub fn contains(&self, other: &SectionRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Child range at relative `offset` with `len` bytes
    ///
    /// 相对偏移 `offset` 处长度为 `len` 的子范围
    ///
    /// Returns `None` if the child would reach past this range's end.
    ///
    /// 如果子范围会超出此范围的末尾，返回 `None`。
    #[inline]
    pub fn subrange(&self, offset: u64, len: u64) -> Option<SectionRange> {
        let rel_end = offset.checked_add(len)?;
        if rel_end > self.len() {
            return None;
        }
        Some(SectionRange {
            start: self.start + offset,
            end: self.start + rel_end,
        })
    }

    /// Absolute offset for an access of `len` bytes at relative `offset`
    ///
    /// 在相对偏移 `offset` 处访问 `len` 字节时对应的绝对偏移
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `offset + len` exceeds the range length
    ///
    /// # Errors
    /// 如果 `offset + len` 超出范围长度，返回 [`Error::OutOfRange`]
    #[inline]
    pub(crate) fn locate(&self, offset: u64, len: u64) -> Result<u64> {
        match offset.checked_add(len) {
            Some(rel_end) if rel_end <= self.len() => Ok(self.start + offset),
            _ => Err(Error::OutOfRange {
                offset,
                len,
                bound: self.len(),
            }),
        }
    }
}

impl From<SectionRange> for Range<u64> {
    #[inline]
    fn from(range: SectionRange) -> Self {
        range.as_range()
    }
}
