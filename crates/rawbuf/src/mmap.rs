use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;
use memmap2::{MmapMut, MmapOptions};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    ByteSink, ByteSource, Endian, Error, PAGE_SIZE, PAGE_SIZE_MINUS_1, Result,
    source::check_available,
};

/// Bytes reserved at the start of the file for the buffer header.
pub const MMAP_HEADER_SIZE: usize = 16;

const LEN_OFFSET: usize = 0;
const ENDIAN_OFFSET: usize = size_of::<u64>();

const ENDIAN_UNSET: u8 = 0;
const ENDIAN_LITTLE: u8 = 1;
const ENDIAN_BIG: u8 = 2;

/// File-backed, memory-mapped append buffer.
///
/// The first [`MMAP_HEADER_SIZE`] bytes of the file are the header: the logical
/// length (little-endian `u64`), then one byte recording the buffer's [`Endian`].
/// Data follows. The file grows by doubling, in page-size multiples, when a writer
/// asks for more room than is mapped.
///
/// Lock order is length then map, and guards are not reentrant:
/// - a [`MmapSink`] holds the length exclusively for its whole lifetime, so drop it
///   before calling [`reader`](Self::reader), [`len`](Self::len) or
///   [`truncate`](Self::truncate) on the same thread;
/// - a [`MmapSource`] holds the map shared for its whole lifetime, and every write
///   takes the map exclusively, so drop it before writing through a sink on the
///   same thread.
#[derive(Debug, Clone)]
#[must_use = "MmapBuffer should be stored to keep the file mapped"]
pub struct MmapBuffer(Arc<MmapBufferInner>);

#[derive(Debug)]
struct MmapBufferInner {
    path: PathBuf,
    endian: Endian,
    file: RwLock<File>,
    mmap: RwLock<MmapMut>,
    len: RwLock<usize>,
}

impl MmapBuffer {
    /// Opens or creates a buffer at `path` with room for at least `min_len` bytes.
    ///
    /// An existing file keeps the byte order recorded in its header, a new one is
    /// little-endian.
    pub fn open(path: &Path, min_len: usize) -> Result<Self> {
        Self::open_inner(path, min_len, None)
    }

    /// Like [`open`](Self::open), requiring the byte order to be `endian`.
    ///
    /// Fails with [`Error::EndianMismatch`] when the file was created with the other one.
    pub fn open_with_endian(path: &Path, min_len: usize, endian: Endian) -> Result<Self> {
        Self::open_inner(path, min_len, Some(endian))
    }

    fn open_inner(path: &Path, min_len: usize, requested: Option<Endian>) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
        debug!("File opened.");

        file.try_lock()?;
        debug!("File locked.");

        let wanted = ceil_to_page_size_multiple(MMAP_HEADER_SIZE + min_len);
        let file_len = file.metadata()?.len() as usize;
        if file_len < wanted {
            file.set_len(wanted as u64)?;
            debug!("File extended to {wanted} bytes.");
            file.sync_all()?;
        }

        let mut mmap = create_mmap(&file)?;
        debug!("Mmap created.");

        let endian = match (read_endian(&mmap)?, requested) {
            (Some(stored), Some(requested)) if stored != requested => {
                return Err(Error::EndianMismatch { stored, requested });
            }
            (Some(stored), _) => stored,
            (None, requested) => {
                let endian = requested.unwrap_or_default();
                write_endian(&mut mmap, endian);
                debug!("Endian recorded as {endian:?}.");
                endian
            }
        };

        let len = read_len(&mmap);
        let capacity = mmap.len() - MMAP_HEADER_SIZE;
        if len > capacity {
            return Err(Error::CorruptedHeader { len, capacity });
        }

        Ok(Self(Arc::new(MmapBufferInner {
            path: path.to_owned(),
            endian,
            file: RwLock::new(file),
            mmap: RwLock::new(mmap),
            len: RwLock::new(len),
        })))
    }

    /// Creates an appending writer positioned at the current logical end.
    ///
    /// The writer is exclusive: other writers and new readers wait until it is dropped.
    #[inline]
    pub fn writer(&self) -> MmapSink<'_> {
        MmapSink {
            buffer: self,
            len: self.0.len.write(),
        }
    }

    /// Creates a reader over `offset..len()`.
    ///
    /// The reader holds a read lock on the map, blocking growth until dropped.
    pub fn reader(&self, offset: usize) -> Result<MmapSource<'_>> {
        let len = *self.0.len.read();
        if offset > len {
            return Err(Error::PositionOutOfBounds {
                position: offset,
                len,
            });
        }
        Ok(MmapSource {
            mmap: self.0.mmap.read(),
            len,
            pos: offset,
            endian: self.0.endian,
        })
    }

    /// Logical length of the data written so far.
    #[inline]
    pub fn len(&self) -> usize {
        *self.0.len.read()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes that fit in the current mapping without growing the file.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.0.mmap.read().len() - MMAP_HEADER_SIZE
    }

    #[inline]
    pub fn endian(&self) -> Endian {
        self.0.endian
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.0.path
    }

    /// Drops everything after `to`. The bytes stay in the file but become unreachable.
    pub fn truncate(&self, to: usize) -> Result<()> {
        let mut len = self.0.len.write();
        if to > *len {
            return Err(Error::TruncateInvalid {
                to,
                current_len: *len,
            });
        }
        write_len(&mut self.0.mmap.write(), to);
        *len = to;
        Ok(())
    }

    /// Flushes the mapped bytes, length header included, to disk.
    pub fn flush(&self) -> Result<()> {
        self.0.mmap.read().flush()?;
        debug!("Mmap flushed.");
        Ok(())
    }

    fn grow(&self, required: usize) -> Result<()> {
        let mut mmap = self.0.mmap.write();
        let current = mmap.len();
        if required <= current {
            return Ok(());
        }

        let mut new_len = current.max(PAGE_SIZE);
        while new_len < required {
            new_len = new_len.checked_mul(2).ok_or(Error::SizeOverflow {
                current,
                requested: required,
            })?;
        }

        let file = self.0.file.write();
        file.set_len(new_len as u64)?;
        *mmap = create_mmap(&file)?;
        debug!("Mmap grown from {current} to {new_len} bytes.");
        Ok(())
    }
}

/// Exclusive appending writer returned by [`MmapBuffer::writer`].
#[derive(Debug)]
pub struct MmapSink<'a> {
    buffer: &'a MmapBuffer,
    len: RwLockWriteGuard<'a, usize>,
}

impl ByteSink for MmapSink<'_> {
    #[inline]
    fn position(&self) -> usize {
        *self.len
    }

    #[inline]
    fn endian(&self) -> Endian {
        self.buffer.endian()
    }

    #[inline]
    fn remaining_capacity(&self) -> Option<usize> {
        None
    }

    fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        let required = (MMAP_HEADER_SIZE + *self.len)
            .checked_add(additional)
            .ok_or(Error::SizeOverflow {
                current: *self.len,
                requested: additional,
            })?;
        self.buffer.grow(required)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_capacity(bytes.len())?;

        let start = MMAP_HEADER_SIZE + *self.len;
        let new_len = *self.len + bytes.len();

        let mut mmap = self.buffer.0.mmap.write();
        mmap[start..start + bytes.len()].copy_from_slice(bytes);
        write_len(&mut mmap, new_len);
        drop(mmap);

        *self.len = new_len;
        Ok(())
    }
}

/// Reader returned by [`MmapBuffer::reader`], bounded by the logical length at creation.
#[derive(Debug)]
pub struct MmapSource<'a> {
    mmap: RwLockReadGuard<'a, MmapMut>,
    len: usize,
    pos: usize,
    endian: Endian,
}

impl ByteSource for MmapSource<'_> {
    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn endian(&self) -> Endian {
        self.endian
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.len - self.pos
    }

    #[inline]
    fn peek(&self, len: usize) -> Result<&[u8]> {
        check_available(self.pos, len, self.remaining())?;
        let start = MMAP_HEADER_SIZE + self.pos;
        Ok(&self.mmap[start..start + len])
    }

    #[inline]
    fn skip(&mut self, len: usize) -> Result<()> {
        check_available(self.pos, len, self.remaining())?;
        self.pos += len;
        Ok(())
    }

    #[inline]
    fn read_bytes(&mut self, len: usize) -> Result<&[u8]> {
        check_available(self.pos, len, self.remaining())?;
        let start = MMAP_HEADER_SIZE + self.pos;
        self.pos += len;
        Ok(&self.mmap[start..start + len])
    }
}

#[inline]
fn create_mmap(file: &File) -> Result<MmapMut> {
    Ok(unsafe { MmapOptions::new().map_mut(file)? })
}

#[inline]
fn ceil_to_page_size_multiple(num: usize) -> usize {
    (num + PAGE_SIZE_MINUS_1) & !PAGE_SIZE_MINUS_1
}

fn read_len(mmap: &MmapMut) -> usize {
    let mut bytes = [0u8; size_of::<u64>()];
    bytes.copy_from_slice(&mmap[LEN_OFFSET..ENDIAN_OFFSET]);
    u64::from_le_bytes(bytes) as usize
}

fn write_len(mmap: &mut MmapMut, len: usize) {
    mmap[LEN_OFFSET..ENDIAN_OFFSET].copy_from_slice(&(len as u64).to_le_bytes());
}

fn read_endian(mmap: &MmapMut) -> Result<Option<Endian>> {
    match mmap[ENDIAN_OFFSET] {
        ENDIAN_UNSET => Ok(None),
        ENDIAN_LITTLE => Ok(Some(Endian::Little)),
        ENDIAN_BIG => Ok(Some(Endian::Big)),
        tag => Err(Error::InvalidEndianTag(tag)),
    }
}

fn write_endian(mmap: &mut MmapMut, endian: Endian) {
    mmap[ENDIAN_OFFSET] = match endian {
        Endian::Little => ENDIAN_LITTLE,
        Endian::Big => ENDIAN_BIG,
    };
}
