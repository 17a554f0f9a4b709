use super::{CaptureHeader, invalid_data, map_file, unmap};
use crate::sample::Sample;
use std::fs::File;
use std::io;
use std::marker::PhantomData;
use std::path::Path;

pub struct CaptureReader<T: Sample> {
    _file: File,
    mmap_ptr: *const u8,
    mmap_len: usize,
    header: CaptureHeader,
    _samples: PhantomData<T>,
}

impl<T: Sample> CaptureReader<T> {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len() as usize;

        if len < CaptureHeader::SIZE {
            return Err(invalid_data("File too small for header"));
        }

        let mmap_ptr = map_file(&file, len, false)?;
        let bytes = unsafe { std::slice::from_raw_parts(mmap_ptr as *const u8, CaptureHeader::SIZE) };

        let header = match CaptureHeader::decode(bytes) {
            Some(header) if !header.validate() => Err(invalid_data("Invalid file header")),
            Some(header) if header.sample_format() != Some(T::FORMAT) => {
                Err(invalid_data("Sample format mismatch"))
            }
            Some(header) if header.write_offset as usize > len => {
                Err(invalid_data("Write offset past end of file"))
            }
            Some(header) => Ok(header),
            None => Err(invalid_data("File too small for header")),
        };

        match header {
            Ok(header) => Ok(Self {
                _file: file,
                mmap_ptr: mmap_ptr as *const u8,
                mmap_len: len,
                header,
                _samples: PhantomData,
            }),
            Err(err) => {
                unmap(mmap_ptr, len);
                Err(err)
            }
        }
    }

    #[inline]
    pub fn sample_count(&self) -> u64 {
        self.header.sample_count
    }

    #[inline]
    pub fn created_at(&self) -> i64 {
        self.header.created_at
    }

    #[inline]
    pub fn channels(&self) -> u16 {
        self.header.channels
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.header.sample_rate
    }

    pub fn samples(&self) -> Vec<T> {
        self.data().chunks_exact(T::SIZE).map(T::read_le).collect()
    }

    /// Iterates in chunks of `chunk` samples; the last one may be shorter.
    pub fn chunks(&self, chunk: usize) -> CaptureChunks<'_, T> {
        CaptureChunks {
            data: self.data(),
            chunk_bytes: chunk.max(1) * T::SIZE,
            _samples: PhantomData,
        }
    }

    /// Feeds every chunk to `callback` and returns the number of samples replayed.
    pub fn replay<F>(&self, chunk: usize, mut callback: F) -> u64
    where
        F: FnMut(&[T]),
    {
        let mut count = 0;
        for samples in self.chunks(chunk) {
            count += samples.len() as u64;
            callback(&samples);
        }
        count
    }

    pub fn advise_sequential(&self) {
        unsafe {
            libc::madvise(
                self.mmap_ptr as *mut libc::c_void,
                self.mmap_len,
                libc::MADV_SEQUENTIAL,
            );
        }
    }

    fn data(&self) -> &[u8] {
        let end = self.header.write_offset as usize;
        let body = unsafe { std::slice::from_raw_parts(self.mmap_ptr, end) };
        let whole = (end - CaptureHeader::SIZE) / T::SIZE * T::SIZE;
        &body[CaptureHeader::SIZE..CaptureHeader::SIZE + whole]
    }
}

impl<T: Sample> Drop for CaptureReader<T> {
    fn drop(&mut self) {
        unmap(self.mmap_ptr as *mut u8, self.mmap_len);
    }
}

unsafe impl<T: Sample> Send for CaptureReader<T> {}
unsafe impl<T: Sample> Sync for CaptureReader<T> {}

pub struct CaptureChunks<'a, T> {
    data: &'a [u8],
    chunk_bytes: usize,
    _samples: PhantomData<T>,
}

impl<T: Sample> Iterator for CaptureChunks<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.is_empty() {
            return None;
        }

        let take = self.chunk_bytes.min(self.data.len());
        let (head, rest) = self.data.split_at(take);
        self.data = rest;
        Some(head.chunks_exact(T::SIZE).map(T::read_le).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.len().div_ceil(self.chunk_bytes);
        (remaining, Some(remaining))
    }
}
