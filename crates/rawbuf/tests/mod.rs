use rawbuf::{
    ByteSink, ByteSource, Endian, Error, MMAP_HEADER_SIZE, MmapBuffer, PAGE_SIZE, Result,
    SliceSink, SliceSource, VecSink,
};
use tempfile::TempDir;

/// Helper to create a temporary mmap buffer
fn setup_test_buffer() -> Result<(MmapBuffer, TempDir)> {
    let temp_dir = TempDir::new()?;
    let buffer = MmapBuffer::open(&temp_dir.path().join("data"), 0)?;
    Ok((buffer, temp_dir))
}

#[test]
fn test_vec_sink_writes_in_declared_order() -> Result<()> {
    let mut little = VecSink::new();
    little.write_u32(0x0102_0304)?;
    assert_eq!(little.as_slice(), &[4, 3, 2, 1]);

    let mut big = VecSink::with_endian(Endian::Big);
    big.write_u32(0x0102_0304)?;
    big.write_bytes(b"xy")?;
    assert_eq!(big.as_slice(), &[1, 2, 3, 4, b'x', b'y']);
    assert_eq!(big.position(), 6);
    assert_eq!(big.remaining_capacity(), None);

    Ok(())
}

#[test]
fn test_vec_sink_from_vec_appends() -> Result<()> {
    let mut sink = VecSink::from_vec(vec![9, 9], Endian::Little);
    assert_eq!(sink.position(), 2);
    sink.write_bytes(&[1])?;
    assert_eq!(sink.into_inner(), vec![9, 9, 1]);
    Ok(())
}

#[test]
fn test_slice_sink_overflow_leaves_cursor() -> Result<()> {
    let mut buf = [0u8; 6];
    let mut sink = SliceSink::new(&mut buf);

    sink.write_u32(7)?;
    assert_eq!(sink.position(), 4);
    assert_eq!(sink.remaining_capacity(), Some(2));

    let err = sink.write_bytes(b"abc").unwrap_err();
    assert!(matches!(
        err,
        Error::Overflow {
            position: 4,
            requested: 3,
            available: 2
        }
    ));
    assert_eq!(sink.position(), 4);
    assert!(sink.ensure_capacity(3).is_err());
    assert!(sink.ensure_capacity(2).is_ok());

    sink.write_bytes(b"ab")?;
    assert_eq!(sink.written(), &[7, 0, 0, 0, b'a', b'b']);

    Ok(())
}

#[test]
fn test_slice_source_reads_forward() -> Result<()> {
    let bytes = [0, 0, 0, 2, b'h', b'i', 0xff];
    let mut source = SliceSource::with_endian(&bytes, Endian::Big);

    assert_eq!(source.peek_u32()?, 2);
    assert_eq!(source.position(), 0);

    let len = source.read_u32()? as usize;
    assert_eq!(source.read_bytes(len)?, b"hi");
    assert_eq!(source.position(), 6);
    assert_eq!(source.remaining(), 1);
    assert_eq!(source.remaining_slice(), &[0xff]);

    source.skip(1)?;
    assert!(source.is_exhausted());

    Ok(())
}

#[test]
fn test_slice_source_exhausted_consumes_nothing() -> Result<()> {
    let bytes = [1, 2, 3];
    let mut source = SliceSource::new(&bytes);

    let err = source.read_u32().unwrap_err();
    assert!(matches!(
        err,
        Error::Exhausted {
            position: 0,
            needed: 4,
            remaining: 3
        }
    ));
    assert_eq!(source.position(), 0);

    assert!(source.read_bytes(4).is_err());
    assert!(source.skip(4).is_err());
    assert_eq!(source.position(), 0);
    assert_eq!(source.read_bytes(3)?, &[1, 2, 3]);

    Ok(())
}

#[test]
fn test_slice_source_with_position() -> Result<()> {
    let bytes = [1, 2, 3];
    let source = SliceSource::new(&bytes).with_position(2)?;
    assert_eq!(source.remaining(), 1);
    assert!(matches!(
        SliceSource::new(&bytes).with_position(4),
        Err(Error::PositionOutOfBounds { position: 4, len: 3 })
    ));
    Ok(())
}

#[test]
fn test_dyn_sink_and_source() -> Result<()> {
    let mut sink = VecSink::new();
    {
        let dyn_sink: &mut dyn ByteSink = &mut sink;
        dyn_sink.write_u32(1)?;
    }
    let bytes = sink.into_inner();
    let mut source = SliceSource::new(&bytes);
    let dyn_source: &mut dyn ByteSource = &mut source;
    assert_eq!(dyn_source.read_u32()?, 1);
    Ok(())
}

#[test]
fn test_mmap_starts_empty() -> Result<()> {
    let (buffer, _temp) = setup_test_buffer()?;

    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), PAGE_SIZE - MMAP_HEADER_SIZE);
    assert!(buffer.reader(0)?.is_exhausted());
    assert!(buffer.reader(1).is_err());

    Ok(())
}

#[test]
fn test_mmap_write_then_read() -> Result<()> {
    let (buffer, _temp) = setup_test_buffer()?;

    {
        let mut writer = buffer.writer();
        writer.write_u32(5)?;
        writer.write_bytes(b"hello")?;
        assert_eq!(writer.position(), 9);
    }

    assert_eq!(buffer.len(), 9);

    let mut reader = buffer.reader(0)?;
    let len = reader.read_u32()? as usize;
    assert_eq!(reader.read_bytes(len)?, b"hello");
    assert!(reader.is_exhausted());

    Ok(())
}

#[test]
fn test_mmap_grows() -> Result<()> {
    let (buffer, _temp) = setup_test_buffer()?;

    let data = vec![7u8; PAGE_SIZE * 3];
    buffer.writer().write_bytes(&data)?;

    assert_eq!(buffer.len(), data.len());
    assert!(buffer.capacity() >= data.len());

    let mut reader = buffer.reader(PAGE_SIZE)?;
    assert_eq!(reader.remaining(), PAGE_SIZE * 2);
    assert!(reader.read_bytes(PAGE_SIZE * 2)?.iter().all(|b| *b == 7));

    Ok(())
}

#[test]
fn test_mmap_persists_length() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("nested").join("data");

    {
        let buffer = MmapBuffer::open_with_endian(&path, 64, Endian::Big)?;
        let mut writer = buffer.writer();
        writer.write_u32(0xAABB)?;
        drop(writer);
        buffer.flush()?;
    }

    let buffer = MmapBuffer::open_with_endian(&path, 0, Endian::Big)?;
    assert_eq!(buffer.len(), 4);
    assert_eq!(buffer.reader(0)?.read_u32()?, 0xAABB);

    Ok(())
}

#[test]
fn test_mmap_truncate() -> Result<()> {
    let (buffer, _temp) = setup_test_buffer()?;

    buffer.writer().write_bytes(b"abcdef")?;
    buffer.truncate(2)?;
    assert_eq!(buffer.len(), 2);
    assert!(matches!(
        buffer.truncate(3),
        Err(Error::TruncateInvalid {
            to: 3,
            current_len: 2
        })
    ));

    buffer.writer().write_bytes(b"z")?;
    assert_eq!(buffer.reader(0)?.read_bytes(3)?, b"abz");

    Ok(())
}

#[test]
fn test_mmap_locked_by_other_handle() -> Result<()> {
    let (buffer, _temp) = setup_test_buffer()?;
    assert!(matches!(
        MmapBuffer::open(buffer.path(), 0),
        Err(Error::TryLock(_))
    ));
    Ok(())
}

#[test]
fn test_mmap_endian_is_recorded() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("data");

    {
        let buffer = MmapBuffer::open_with_endian(&path, 0, Endian::Big)?;
        buffer.writer().write_u32(7)?;
        buffer.flush()?;
    }

    assert!(matches!(
        MmapBuffer::open_with_endian(&path, 0, Endian::Little),
        Err(Error::EndianMismatch {
            stored: Endian::Big,
            requested: Endian::Little
        })
    ));

    let buffer = MmapBuffer::open(&path, 0)?;
    assert_eq!(buffer.endian(), Endian::Big);
    assert_eq!(buffer.reader(0)?.read_u32()?, 7);

    Ok(())
}

#[test]
fn test_mmap_new_file_defaults_to_little_endian() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("data");

    drop(MmapBuffer::open(&path, 0)?);

    let buffer = MmapBuffer::open_with_endian(&path, 0, Endian::Little)?;
    assert_eq!(buffer.endian(), Endian::Little);
    drop(buffer);

    assert!(matches!(
        MmapBuffer::open_with_endian(&path, 0, Endian::Big),
        Err(Error::EndianMismatch { .. })
    ));

    Ok(())
}

#[test]
fn test_mmap_alternating_reads_and_writes() -> Result<()> {
    let (buffer, _temp) = setup_test_buffer()?;

    for i in 0..4u32 {
        buffer.writer().write_u32(i)?;

        let mut reader = buffer.reader(0)?;
        for j in 0..=i {
            assert_eq!(reader.read_u32()?, j);
        }
        assert!(reader.is_exhausted());
        drop(reader);
    }

    Ok(())
}
