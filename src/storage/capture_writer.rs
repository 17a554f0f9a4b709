use super::{CaptureHeader, invalid_data, map_file, unmap};
use crate::sample::Sample;
use crate::sink::SampleSink;
use std::fs::{File, OpenOptions};
use std::io;
use std::marker::PhantomData;
use std::path::Path;

/// Appends samples to a memory-mapped capture file.
pub struct CaptureWriter<T: Sample> {
    _file: File,
    mmap_ptr: *mut u8,
    mmap_len: usize,
    header: CaptureHeader,
    _samples: PhantomData<T>,
}

impl<T: Sample> CaptureWriter<T> {
    /// `capacity` is the file size in bytes, header included.
    pub fn create<P: AsRef<Path>>(
        path: P,
        capacity: usize,
        channels: u16,
        sample_rate: u32,
    ) -> io::Result<Self> {
        let capacity = capacity.max(4096);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(capacity as u64)?;

        let mmap_ptr = map_file(&file, capacity, true)?;

        let created_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as i64)
            .unwrap_or(0);

        let mut writer = Self {
            _file: file,
            mmap_ptr,
            mmap_len: capacity,
            header: CaptureHeader::new(T::FORMAT, channels, sample_rate, created_at),
            _samples: PhantomData,
        };
        writer.store_header();

        Ok(writer)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let capacity = file.metadata()?.len() as usize;

        if capacity < CaptureHeader::SIZE {
            return Err(invalid_data("File too small for header"));
        }

        let mmap_ptr = map_file(&file, capacity, true)?;
        let bytes = unsafe { std::slice::from_raw_parts(mmap_ptr, CaptureHeader::SIZE) };

        let header = match CaptureHeader::decode(bytes) {
            Some(header) if !header.validate() => Err(invalid_data("Invalid file header")),
            Some(header) if header.sample_format() != Some(T::FORMAT) => {
                Err(invalid_data("Sample format mismatch"))
            }
            Some(header) if header.write_offset as usize > capacity => {
                Err(invalid_data("Write offset past end of file"))
            }
            Some(header) => Ok(header),
            None => Err(invalid_data("File too small for header")),
        };

        match header {
            Ok(header) => Ok(Self {
                _file: file,
                mmap_ptr,
                mmap_len: capacity,
                header,
                _samples: PhantomData,
            }),
            Err(err) => {
                unmap(mmap_ptr, capacity);
                Err(err)
            }
        }
    }

    /// Free space in bytes.
    #[inline]
    pub fn available(&self) -> usize {
        self.mmap_len - self.header.write_offset as usize
    }

    /// Writes all of `samples` or nothing. Returns false when they do not fit.
    #[inline]
    pub fn write_samples(&mut self, samples: &[T]) -> bool {
        let total_size = samples.len() * T::SIZE;

        if total_size > self.available() {
            return false;
        }

        let start = self.header.write_offset as usize;
        let dst = unsafe { std::slice::from_raw_parts_mut(self.mmap_ptr.add(start), total_size) };
        for (sample, out) in samples.iter().zip(dst.chunks_exact_mut(T::SIZE)) {
            sample.write_le(out);
        }

        self.header.write_offset += total_size as u64;
        self.header.sample_count += samples.len() as u64;
        self.store_header();

        true
    }

    pub fn sync(&self) -> io::Result<()> {
        self.msync(libc::MS_SYNC)
    }

    pub fn sync_async(&self) -> io::Result<()> {
        self.msync(libc::MS_ASYNC)
    }

    #[inline]
    pub fn sample_count(&self) -> u64 {
        self.header.sample_count
    }

    #[inline]
    pub fn header(&self) -> CaptureHeader {
        self.header
    }

    fn msync(&self, flags: libc::c_int) -> io::Result<()> {
        let result =
            unsafe { libc::msync(self.mmap_ptr as *mut libc::c_void, self.mmap_len, flags) };

        if result == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    #[inline]
    fn store_header(&mut self) {
        let encoded = self.header.encode();
        let dst = unsafe { std::slice::from_raw_parts_mut(self.mmap_ptr, CaptureHeader::SIZE) };
        dst.copy_from_slice(&encoded);
    }
}

impl<T: Sample> Drop for CaptureWriter<T> {
    fn drop(&mut self) {
        let _ = self.sync();
        unmap(self.mmap_ptr, self.mmap_len);
    }
}

unsafe impl<T: Sample> Send for CaptureWriter<T> {}

/// Records every drained chunk into a capture file.
///
/// The first chunk that does not fit closes the sink, so the file never holds
/// a later chunk after a gap.
pub struct CaptureSink<T: Sample> {
    writer: CaptureWriter<T>,
    rejected: u64,
    full: bool,
}

impl<T: Sample> CaptureSink<T> {
    pub fn new(writer: CaptureWriter<T>) -> Self {
        Self {
            writer,
            rejected: 0,
            full: false,
        }
    }

    pub fn writer(&self) -> &CaptureWriter<T> {
        &self.writer
    }

    /// Chunks dropped because the file was full.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

impl<T: Sample> SampleSink<T> for CaptureSink<T> {
    fn consume(&mut self, samples: &[T]) -> bool {
        let ok = !self.full && self.writer.write_samples(samples);
        if !ok {
            self.rejected += 1;
            self.full = true;
        }
        ok
    }

    fn flush(&mut self) {
        if let Err(err) = self.writer.sync_async() {
            tracing::warn!(?err, "capture sync failed");
        }
    }

    fn is_full(&self) -> bool {
        self.full
    }

    fn name(&self) -> &str {
        "capture"
    }
}
