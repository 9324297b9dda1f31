//! 测试模块

use super::*;
use std::fs::File;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::tempdir;

/// 创建指定大小的临时文件（内容全为 0）
fn sized_file(len: u64) -> File {
    let file = tempfile::tempfile().unwrap();
    file.set_len(len).unwrap();
    file
}

/// 假适配器的行为
#[derive(Debug, Clone, Copy)]
enum FakeMode {
    /// 传输全部请求的字节
    Full,
    /// 只传输一半
    Half,
    /// 总是失败
    Fail(i32),
}

/// 记录调用次数的假适配器，不触碰任何文件
#[derive(Debug)]
struct FakeNative {
    calls: AtomicUsize,
    mode: FakeMode,
}

impl FakeNative {
    fn leak(mode: FakeMode) -> &'static FakeNative {
        Box::leak(Box::new(FakeNative {
            calls: AtomicUsize::new(0),
            mode,
        }))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn outcome(&self, len: usize) -> IoOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            FakeMode::Full => IoOutcome::Transferred(len as u32),
            FakeMode::Half => IoOutcome::Transferred((len / 2) as u32),
            FakeMode::Fail(code) => IoOutcome::Failed(code),
        }
    }
}

impl NativeIo for FakeNative {
    fn pread(&self, _handle: RawHandle, buf: &mut [u8], _offset: u64) -> IoOutcome {
        self.outcome(buf.len())
    }

    fn pwrite(&self, _handle: RawHandle, data: &[u8], _offset: u64) -> IoOutcome {
        self.outcome(data.len())
    }

    fn error_message(&self, code: i32) -> String {
        format!("fake error {code}")
    }
}

fn fake_dispatcher(native: &'static FakeNative) -> Dispatcher {
    Dispatcher::with_native(Platform::detect(), native)
}

/// IoOutcome 测试（结果解码）
#[cfg(test)]
mod outcome_tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_unix_negative_return_reads_errno() {
        let outcome = IoOutcome::from_unix(-1, || 9);
        assert_eq!(outcome, IoOutcome::Failed(9));
        assert_eq!(outcome.error_code(), Some(9));
        assert_eq!(outcome.transferred(), None);
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_unix_success_does_not_touch_errno() {
        let asked = Cell::new(false);
        let outcome = IoOutcome::from_unix(128, || {
            asked.set(true);
            0
        });

        assert_eq!(outcome, IoOutcome::Transferred(128));
        assert!(!asked.get());

        // 0 字节（文件末尾）也是成功
        assert_eq!(IoOutcome::from_unix(0, || 1), IoOutcome::Transferred(0));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_unix_oversized_count_is_clamped() {
        // 超过 u32 的返回值按 u32::MAX 的短传输处理
        let outcome = IoOutcome::from_unix(u32::MAX as isize + 1, || 0);
        assert_eq!(outcome, IoOutcome::Transferred(u32::MAX));
        assert!(outcome.is_success());
    }

    #[test]
    fn test_windows_flag_decoding() {
        assert_eq!(IoOutcome::from_windows(true, 512, || 5), IoOutcome::Transferred(512));
        assert_eq!(IoOutcome::from_windows(false, 0, || 5), IoOutcome::Failed(5));

        // 失败时忽略输出参数
        assert_eq!(IoOutcome::from_windows(false, 77, || 6), IoOutcome::Failed(6));
    }

    #[test]
    fn test_into_result_resolves_message_only_on_failure() {
        let native = FakeNative::leak(FakeMode::Full);

        assert_eq!(IoOutcome::Transferred(3).into_result(native).unwrap(), 3);

        let err = IoOutcome::Failed(13).into_result(native).unwrap_err();
        match err {
            Error::Io { code, ref message } => {
                assert_eq!(code, 13);
                assert_eq!(message, "fake error 13");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.raw_os_error(), Some(13));
    }
}

/// Platform / Dispatcher 测试（平台分发）
#[cfg(test)]
mod platform_tests {
    use super::*;

    #[test]
    fn test_detect_matches_build_target() {
        let platform = Platform::detect();

        #[cfg(unix)]
        assert_eq!(platform, Platform::Unix);
        #[cfg(windows)]
        assert_eq!(platform, Platform::Windows);

        assert_eq!(Platform::current(), platform);
        assert_eq!(Platform::current(), Platform::current());
    }

    #[test]
    fn test_supported_platforms() {
        assert_eq!(is_supported(), cfg!(any(unix, windows)));
        assert!(!Platform::Unsupported.is_supported());
        assert!(!Dispatcher::for_platform(Platform::Unsupported).is_supported());
    }

    #[test]
    fn test_split_offset() {
        assert_eq!(platform::split_offset(0), (0, 0));
        assert_eq!(platform::split_offset(0xFFFF_FFFF), (0xFFFF_FFFF, 0));
        assert_eq!(platform::split_offset(0x1_0000_0002), (2, 1));
        assert_eq!(
            platform::split_offset(0xDEAD_BEEF_0BAD_F00D),
            (0x0BAD_F00D, 0xDEAD_BEEF)
        );
    }

    #[test]
    fn test_unsupported_platform_fails_every_call() {
        let file = sized_file(64);
        let dispatcher = Dispatcher::for_platform(Platform::Unsupported);

        let mut buf = [0u8; 8];
        assert!(matches!(dispatcher.read_at(&file, &mut buf, 0), Err(Error::Unsupported)));
        assert!(matches!(dispatcher.write_at(&file, &buf, 0), Err(Error::Unsupported)));
    }

    #[cfg(unix)]
    #[test]
    fn test_foreign_platform_identity_has_no_adapter() {
        let file = sized_file(64);
        let dispatcher = Dispatcher::for_platform(Platform::Windows);

        assert_eq!(dispatcher.platform(), Platform::Windows);
        assert!(!dispatcher.is_supported());
        assert!(matches!(dispatcher.read_at(&file, &mut [0u8; 8], 0), Err(Error::Unsupported)));
    }

    #[test]
    fn test_injected_adapter_ignored_when_unsupported() {
        let file = sized_file(64);
        let native = FakeNative::leak(FakeMode::Full);
        let dispatcher = Dispatcher::with_native(Platform::Unsupported, native);

        assert!(matches!(dispatcher.read_at(&file, &mut [0u8; 8], 0), Err(Error::Unsupported)));
        assert_eq!(native.calls(), 0);
    }

    #[test]
    fn test_injected_adapter_receives_calls() {
        let file = sized_file(64);
        let native = FakeNative::leak(FakeMode::Fail(28));
        let dispatcher = fake_dispatcher(native);

        let err = dispatcher.write_at(&file, b"data", 0).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(28));
        assert_eq!(native.calls(), 1);

        let io_err: std::io::Error = err.into();
        assert_eq!(io_err.kind(), std::io::Error::from_raw_os_error(28).kind());
    }
}

/// 真实文件上的定位读写测试
#[cfg(test)]
mod dispatcher_tests {
    use super::*;
    use std::io::{Read, Seek, SeekFrom, Write};

    const FILE_SIZE: usize = 1024;
    const OFFSET: usize = 512;
    const DATA_LEN: usize = 128;

    /// 1024 字节，其中 [512, 640) 为 'A'
    fn pattern() -> Vec<u8> {
        let mut data = vec![0u8; FILE_SIZE];
        data[OFFSET..OFFSET + DATA_LEN].fill(b'A');
        data
    }

    #[test]
    fn test_read_at_offset() {
        let mut file = tempfile::tempfile().unwrap();
        let data = pattern();
        file.write_all(&data).unwrap();

        let mut buf = [0u8; DATA_LEN];
        let read = read_at(&file, &mut buf, OFFSET as u64).unwrap();

        assert_eq!(read as usize, DATA_LEN);
        assert_eq!(&buf[..], &data[OFFSET..OFFSET + DATA_LEN]);
    }

    #[test]
    fn test_write_at_offset() {
        let mut file = sized_file(FILE_SIZE as u64);
        let data = pattern();

        let written = write_at(&file, &data[OFFSET..OFFSET + DATA_LEN], OFFSET as u64).unwrap();
        assert_eq!(written as usize, DATA_LEN);

        // 用普通顺序读取验证整个文件
        let mut contents = Vec::new();
        file.seek(SeekFrom::Start(0)).unwrap();
        file.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, data);
    }

    #[test]
    fn test_positioned_read_keeps_file_cursor() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(&pattern()).unwrap();
        file.seek(SeekFrom::Start(10)).unwrap();

        let mut buf = [0u8; 16];
        file.pread(&mut buf, 100).unwrap();
        file.pwrite(&[7u8; 16], 200).unwrap();

        assert_eq!(file.stream_position().unwrap(), 10);
    }

    #[test]
    fn test_read_past_end_returns_zero() {
        let file = sized_file(16);

        let mut buf = [0u8; 8];
        assert_eq!(read_at(&file, &mut buf, 16).unwrap(), 0);
        assert_eq!(read_at(&file, &mut buf, 4096).unwrap(), 0);

        // 跨越末尾的读取只返回剩余部分
        assert_eq!(read_at(&file, &mut buf, 12).unwrap(), 4);
    }

    #[test]
    fn test_write_past_end_extends_file() {
        let file = sized_file(16);

        assert_eq!(write_at(&file, b"tail", 32).unwrap(), 4);
        assert_eq!(file.metadata().unwrap().len(), 36);
    }

    #[test]
    fn test_concurrent_positioned_writes_share_one_handle() {
        let file = sized_file(1000);

        std::thread::scope(|s| {
            for i in 0..10u64 {
                let file = &file;
                s.spawn(move || {
                    let data = vec![i as u8; 100];
                    assert_eq!(file.pwrite(&data, i * 100).unwrap(), 100);
                });
            }
        });

        for i in 0..10u64 {
            let mut buf = vec![0u8; 100];
            file.pread(&mut buf, i * 100).unwrap();
            assert_eq!(buf, vec![i as u8; 100]);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_write_to_read_only_handle_reports_os_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("read_only.bin");
        std::fs::write(&path, [0u8; 32]).unwrap();

        let file = File::open(&path).unwrap();
        let err = write_at(&file, b"nope", 0).unwrap_err();

        assert_eq!(err.raw_os_error(), Some(libc::EBADF));
        match &err {
            Error::Io { message, .. } => assert_eq!(message, &error_message(libc::EBADF)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_offset_beyond_off_t_is_rejected() {
        let file = sized_file(16);

        // 超出 off_t 的偏移在本地以 EINVAL 失败
        let err = write_at(&file, b"x", u64::MAX).unwrap_err();
        assert!(matches!(err, Error::Io { code, .. } if code == libc::EINVAL));
        assert_eq!(err.raw_os_error(), Some(libc::EINVAL));

        let err = read_at(&file, &mut [0u8; 1], i64::MAX as u64 + 1).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EINVAL));

        // 文件未被改动
        assert_eq!(file.metadata().unwrap().len(), 16);
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_error_message() {
        assert_eq!(error_message(2), "No such file or directory");
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_error_message() {
        assert_eq!(error_message(2), "The system cannot find the file specified.");
    }
}

/// Section 测试（有界视图）
#[cfg(test)]
mod section_tests {
    use super::*;

    #[test]
    fn test_whole_file_section() {
        let file = sized_file(1024);
        let root = Section::new(&file).unwrap();

        assert_eq!(root.start(), 0);
        assert_eq!(root.len(), 1024);
        assert_eq!(root.range().as_range(), 0..1024);
        assert!(!root.is_empty());
    }

    #[test]
    fn test_reads_and_writes_within_bounds() {
        let file = sized_file(1024);
        let root = Section::new(&file).unwrap();

        assert_eq!(root.read(&mut [0u8; 512]).unwrap(), 512);
        assert_eq!(root.read_at(&mut [0u8; 512], 256).unwrap(), 512);
        assert_eq!(root.write(&[0u8; 512]).unwrap(), 512);
        assert_eq!(root.write_at(&[0u8; 512], 256).unwrap(), 512);

        // 恰好到达末尾
        assert_eq!(root.write_at(&[1u8; 24], 1000).unwrap(), 24);
    }

    #[test]
    fn test_construction_out_of_range() {
        let file = sized_file(1024);

        let err = Section::with_range(&file, 2048, 0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSection {
                start: 2048,
                len: 0,
                file_len: 1024
            }
        ));

        assert!(matches!(
            Section::with_range(&file, 512, 1024),
            Err(Error::InvalidSection { .. })
        ));
        assert!(matches!(
            Section::with_range(&file, 1, u64::MAX),
            Err(Error::InvalidSection { .. })
        ));

        // 空区段位于文件末尾是合法的
        let empty = Section::with_range(&file, 1024, 0).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_out_of_range_access() {
        let file = sized_file(1024);
        let root = Section::new(&file).unwrap();

        let err = root.read(&mut [0u8; 2048]).unwrap_err();
        assert!(err.is_out_of_range());
        assert!(matches!(
            err,
            Error::OutOfRange {
                offset: 0,
                len: 2048,
                bound: 1024
            }
        ));

        assert!(root.read_at(&mut [0u8; 1024], 512).unwrap_err().is_out_of_range());
        assert!(root.write(&[0u8; 2048]).unwrap_err().is_out_of_range());
        assert!(root.write_at(&[0u8; 1024], 512).unwrap_err().is_out_of_range());
        assert!(root.read_at(&mut [0u8; 1], u64::MAX).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_range_errors_issue_no_native_call() {
        let file = sized_file(1024);
        let native = FakeNative::leak(FakeMode::Full);
        let root = Section::new(&file).unwrap().with_dispatcher(fake_dispatcher(native));

        assert!(root.read(&mut [0u8; 2048]).is_err());
        assert!(root.write_at(&[0u8; 8], 1020).is_err());
        assert!(root.slice(512, 1024).is_err());
        assert_eq!(native.calls(), 0);

        // 合法访问才会到达适配器
        root.read_at(&mut [0u8; 8], 1016).unwrap();
        assert_eq!(native.calls(), 1);
    }

    #[test]
    fn test_io_errors_propagate_unchanged() {
        let file = sized_file(64);
        let native = FakeNative::leak(FakeMode::Fail(5));
        let root = Section::new(&file).unwrap().with_dispatcher(fake_dispatcher(native));

        match root.read(&mut [0u8; 8]).unwrap_err() {
            Error::Io { code, message } => {
                assert_eq!(code, 5);
                assert_eq!(message, "fake error 5");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_slice_addresses_relative_to_parent() {
        let file = sized_file(1024);
        let root = Section::new(&file).unwrap();

        let middle = root.slice(256, 512).unwrap();
        assert_eq!(middle.start(), 256);
        assert_eq!(middle.len(), 512);

        let inner = middle.slice(128, 64).unwrap();
        assert_eq!(inner.start(), 384);
        assert_eq!(inner.len(), 64);
        assert!(root.range().contains(&middle.range()));
        assert!(middle.range().contains(&inner.range()));

        inner.write(b"nested").unwrap();
        let mut buf = [0u8; 6];
        root.read_at(&mut buf, 384).unwrap();
        assert_eq!(&buf, b"nested");
    }

    #[test]
    fn test_slice_out_of_range() {
        let file = sized_file(1024);
        let root = Section::new(&file).unwrap();

        assert!(root.slice(512, 1024).unwrap_err().is_out_of_range());

        let middle = root.slice(256, 512).unwrap();
        // 在父文件范围内，但超出了 middle 的范围
        assert!(middle.slice(256, 512).unwrap_err().is_out_of_range());
        assert!(middle.slice(u64::MAX, 1).unwrap_err().is_out_of_range());
        assert!(middle.slice(512, 0).unwrap().is_empty());
    }

    #[test]
    fn test_slice_invariant_holds_recursively() {
        let file = sized_file(4096);
        let root = Section::new(&file).unwrap();

        let mut current = root;
        for step in 0..8 {
            let start = (step * 7) % 13;
            let len = current.len() - start - (step % 5);
            let child = current.slice(start, len).unwrap();

            assert!(current.range().contains(&child.range()));
            assert_eq!(child.start(), current.start() + start);
            assert!(child.range().end() <= 4096);
            current = child;
        }
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let file = sized_file(1024);
        let section = Section::with_range(&file, 100, 700).unwrap();

        for (offset, len) in [(0u64, 1usize), (0, 700), (13, 200), (350, 350), (699, 1)] {
            let data: Vec<u8> = (0..len).map(|i| (i as u64 * 31 + offset) as u8).collect();
            assert_eq!(section.write_at(&data, offset).unwrap() as usize, len);

            let mut buf = vec![0u8; len];
            assert_eq!(section.read_at(&mut buf, offset).unwrap() as usize, len);
            assert_eq!(buf, data);
        }
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let file = sized_file(512);
        let section = Section::new(&file).unwrap();
        section.write_at(b"same bytes every time", 100).unwrap();

        let mut first = [0u8; 64];
        let mut second = [0u8; 64];
        section.read_at(&mut first, 90).unwrap();
        section.read_at(&mut second, 90).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sections_do_not_touch_outside_bytes() {
        let file = sized_file(300);
        let root = Section::new(&file).unwrap();
        let middle = root.slice(100, 100).unwrap();

        middle.write(&[0xFF; 100]).unwrap();

        let mut buf = vec![0u8; 300];
        root.read(&mut buf).unwrap();
        assert!(buf[..100].iter().all(|&b| b == 0));
        assert!(buf[100..200].iter().all(|&b| b == 0xFF));
        assert!(buf[200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_concurrent_sections_share_one_handle() {
        let num_threads = 16u64;
        let chunk = 4096u64;
        let file = sized_file(num_threads * chunk);
        let root = Section::new(&file).unwrap();

        std::thread::scope(|s| {
            for i in 0..num_threads {
                let part = root.slice(i * chunk, chunk).unwrap();
                s.spawn(move || {
                    let data = vec![i as u8; chunk as usize];
                    assert_eq!(part.write(&data).unwrap() as u64, chunk);
                });
            }
        });

        for i in 0..num_threads {
            let mut buf = vec![0u8; chunk as usize];
            root.read_at(&mut buf, i * chunk).unwrap();
            assert_eq!(buf, vec![i as u8; chunk as usize]);
        }
    }

    #[test]
    fn test_equality_is_handle_and_range() {
        let file = sized_file(64);
        let other = sized_file(64);

        let a = Section::new(&file).unwrap();
        let b = Section::with_range(&file, 0, 64).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, a.slice(0, 32).unwrap());
        assert_ne!(a, Section::new(&other).unwrap());
    }
}

/// SectionCursor 测试（流式游标）
#[cfg(test)]
mod cursor_tests {
    use super::*;
    use std::io::{self, Read, Seek, SeekFrom, Write};

    fn cursor_over(file: &File) -> SectionCursor<'_, File> {
        Section::new(file).unwrap().cursor()
    }

    #[test]
    fn test_cursor_wraps_the_same_section() {
        let file = sized_file(1024);
        let root = Section::new(&file).unwrap();
        let cursor = root.cursor();

        assert_eq!(cursor.section(), root);
        assert_eq!(cursor.into_section(), root);
    }

    #[test]
    fn test_read_write_integration() {
        let file = sized_file(1024);
        let mut cursor = cursor_over(&file);

        let mut data = [b'A'; 512];
        cursor.write(&data).unwrap();

        data[256..].fill(b'B');
        cursor.write(&data[256..]).unwrap();
        assert_eq!(cursor.position(), 768);

        cursor.set_position(0).unwrap();

        assert_eq!(cursor.read(&mut data).unwrap(), 512);
        assert!(data.iter().all(|&b| b == b'A'));

        assert_eq!(cursor.read(&mut data).unwrap(), 512);
        assert!(data[..256].iter().all(|&b| b == b'B'));
        assert!(data[256..].iter().all(|&b| b == 0));
        assert_eq!(cursor.position(), 1024);
    }

    #[test]
    fn test_writes_increase_position() {
        let file = sized_file(1024);
        let mut cursor = cursor_over(&file);
        assert_eq!(cursor.position(), 0);

        cursor.write(&[0u8; 128]).unwrap();
        assert_eq!(cursor.position(), 128);

        cursor.write(&[0u8; 256]).unwrap();
        assert_eq!(cursor.position(), 128 + 256);
    }

    #[test]
    fn test_reads_increase_position() {
        let file = sized_file(1024);
        let mut cursor = cursor_over(&file);

        cursor.read(&mut [0u8; 128]).unwrap();
        assert_eq!(cursor.position(), 128);

        cursor.read(&mut [0u8; 256]).unwrap();
        assert_eq!(cursor.position(), 128 + 256);
    }

    #[test]
    fn test_seek_begin() {
        let file = sized_file(1024);
        let mut cursor = cursor_over(&file);

        assert_eq!(cursor.seek(0, SeekOrigin::Begin).unwrap(), 0);
        assert_eq!(cursor.seek(128, SeekOrigin::Begin).unwrap(), 128);
        assert_eq!(cursor.seek(256, SeekOrigin::Begin).unwrap(), 256);
        assert_eq!(cursor.position(), 256);
    }

    #[test]
    fn test_seek_current() {
        let file = sized_file(1024);
        let mut cursor = cursor_over(&file);

        assert_eq!(cursor.seek(0, SeekOrigin::Current).unwrap(), 0);
        assert_eq!(cursor.seek(128, SeekOrigin::Current).unwrap(), 128);
        assert_eq!(cursor.seek(256, SeekOrigin::Current).unwrap(), 128 + 256);
        assert_eq!(cursor.seek(-384, SeekOrigin::Current).unwrap(), 0);
    }

    #[test]
    fn test_seek_end() {
        let file = sized_file(1024);
        let mut cursor = cursor_over(&file);

        assert_eq!(cursor.seek(0, SeekOrigin::End).unwrap(), 1024);
        assert_eq!(cursor.seek(128, SeekOrigin::End).unwrap(), 1024 - 128);
        assert_eq!(cursor.seek(256, SeekOrigin::End).unwrap(), 1024 - 256);
    }

    #[test]
    fn test_seek_out_of_range_keeps_position() {
        let file = sized_file(1024);
        let mut cursor = cursor_over(&file);
        cursor.set_position(100).unwrap();

        assert!(cursor.seek(-1, SeekOrigin::Begin).unwrap_err().is_out_of_range());
        assert!(cursor.seek(-101, SeekOrigin::Current).unwrap_err().is_out_of_range());
        assert!(cursor.seek(1025, SeekOrigin::Begin).unwrap_err().is_out_of_range());
        assert!(cursor.seek(-1, SeekOrigin::End).unwrap_err().is_out_of_range());
        assert!(cursor.seek(i64::MIN, SeekOrigin::End).unwrap_err().is_out_of_range());
        assert_eq!(cursor.position(), 100);
    }

    #[test]
    fn test_set_position() {
        let file = sized_file(1024);
        let mut cursor = cursor_over(&file);

        cursor.set_position(512).unwrap();
        assert_eq!(cursor.position(), 512);

        // 恰好在末尾是合法的
        cursor.set_position(1024).unwrap();
        assert_eq!(cursor.remaining(), 0);

        let err = cursor.set_position(1025).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidPosition {
                position: 1025,
                bound: 1024
            }
        ));
        assert_eq!(cursor.position(), 1024);
    }

    #[test]
    fn test_set_position_matches_seek_begin() {
        let file = sized_file(1024);
        let mut a = cursor_over(&file);
        let mut b = cursor_over(&file);

        for position in [0u64, 1, 512, 1024] {
            a.set_position(position).unwrap();
            b.seek(position as i64, SeekOrigin::Begin).unwrap();
            assert_eq!(a.position(), b.position());
        }
    }

    #[test]
    fn test_read_fails_on_big_buffer() {
        let file = sized_file(1024);
        let mut cursor = cursor_over(&file);

        assert!(cursor.read(&mut [0u8; 2048]).unwrap_err().is_out_of_range());
        assert_eq!(cursor.position(), 0);

        // 超出剩余空间也会失败，而不是截断
        cursor.set_position(1000).unwrap();
        assert!(cursor.read(&mut [0u8; 25]).unwrap_err().is_out_of_range());
        assert_eq!(cursor.position(), 1000);
    }

    #[test]
    fn test_write_fails_on_big_buffer() {
        let file = sized_file(1024);
        let mut cursor = cursor_over(&file);

        assert!(cursor.write(&[0u8; 2048]).unwrap_err().is_out_of_range());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_short_write_advances_then_fails() {
        let file = sized_file(1024);
        let native = FakeNative::leak(FakeMode::Half);
        let section = Section::new(&file).unwrap().with_dispatcher(fake_dispatcher(native));
        let mut cursor = section.cursor();

        let err = cursor.write(&[0u8; 100]).unwrap_err();
        assert!(matches!(
            err,
            Error::ShortWrite {
                requested: 100,
                written: 50
            }
        ));
        assert_eq!(cursor.position(), 50);

        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::WriteZero);
    }

    #[test]
    fn test_short_read_is_not_an_error() {
        let file = sized_file(1024);
        let native = FakeNative::leak(FakeMode::Half);
        let section = Section::new(&file).unwrap().with_dispatcher(fake_dispatcher(native));
        let mut cursor = section.cursor();

        assert_eq!(cursor.read(&mut [0u8; 100]).unwrap(), 50);
        assert_eq!(cursor.position(), 50);
    }

    #[test]
    fn test_stream_properties() {
        let file = sized_file(1024);
        let root = Section::new(&file).unwrap();
        let mut cursor = root.slice(24, 1000).unwrap().cursor();

        assert!(cursor.can_seek());
        assert_eq!(cursor.len(), 1000);
        assert!(matches!(cursor.set_len(10), Err(Error::FixedLength)));
        cursor.flush().unwrap();

        // tempfile() 以读写方式打开
        assert!(cursor.can_read());
        assert!(cursor.can_write());
    }

    #[cfg(unix)]
    #[test]
    fn test_capabilities_mirror_handle_access() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("access.bin");
        std::fs::write(&path, [0u8; 64]).unwrap();

        let read_only = File::open(&path).unwrap();
        let cursor = Section::new(&read_only).unwrap().cursor();
        assert!(cursor.can_read());
        assert!(!cursor.can_write());

        let write_only = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        let cursor = Section::new(&write_only).unwrap().cursor();
        assert!(!cursor.can_read());
        assert!(cursor.can_write());
    }

    #[test]
    fn test_std_read_stops_at_section_end() {
        let file = sized_file(1024);
        let root = Section::new(&file).unwrap();
        root.write_at(&[9u8; 100], 200).unwrap();

        let mut cursor = root.slice(200, 100).unwrap().cursor();
        let mut contents = Vec::new();
        cursor.read_to_end(&mut contents).unwrap();

        assert_eq!(contents, vec![9u8; 100]);
        assert_eq!(cursor.position(), 100);
        assert_eq!(Read::read(&mut cursor, &mut [0u8; 8]).unwrap(), 0);
    }

    #[test]
    fn test_std_write_all_respects_section_end() {
        let file = sized_file(1024);
        let root = Section::new(&file).unwrap();
        let mut cursor = root.slice(0, 10).unwrap().cursor();

        cursor.write_all(b"0123456789").unwrap();
        assert_eq!(Write::write(&mut cursor, b"x").unwrap(), 0);

        let mut cursor = root.slice(0, 10).unwrap().cursor();
        let err = cursor.write_all(b"0123456789A").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);

        // 区段之后的字节保持不变
        let mut buf = [0u8; 1];
        root.read_at(&mut buf, 10).unwrap();
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn test_std_seek_uses_std_end_semantics() {
        let file = sized_file(1024);
        let mut cursor = cursor_over(&file);

        assert_eq!(Seek::seek(&mut cursor, SeekFrom::End(-128)).unwrap(), 896);
        assert_eq!(Seek::seek(&mut cursor, SeekFrom::Current(4)).unwrap(), 900);
        assert_eq!(Seek::seek(&mut cursor, SeekFrom::Start(0)).unwrap(), 0);
        assert_eq!(cursor.stream_position().unwrap(), 0);

        let err = Seek::seek(&mut cursor, SeekFrom::End(1)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_independent_cursors_over_one_handle() {
        let file = sized_file(2048);
        let root = Section::new(&file).unwrap();

        std::thread::scope(|s| {
            for i in 0..4u64 {
                let mut cursor = root.slice(i * 512, 512).unwrap().cursor();
                s.spawn(move || {
                    for _ in 0..4 {
                        cursor.write(&[i as u8 + 1; 128]).unwrap();
                    }
                    assert_eq!(cursor.position(), 512);
                });
            }
        });

        let mut buf = vec![0u8; 2048];
        root.read(&mut buf).unwrap();
        for (i, chunk) in buf.chunks(512).enumerate() {
            assert!(chunk.iter().all(|&b| b == i as u8 + 1));
        }
    }
}
