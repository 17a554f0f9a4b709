pub mod capture_reader;
pub mod capture_writer;
pub mod header;

pub use capture_reader::{CaptureChunks, CaptureReader};
pub use capture_writer::{CaptureSink, CaptureWriter};
pub use header::CaptureHeader;

use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;
use std::ptr;

fn map_file(file: &File, len: usize, writable: bool) -> io::Result<*mut u8> {
    let prot = if writable {
        libc::PROT_READ | libc::PROT_WRITE
    } else {
        libc::PROT_READ
    };

    let mmap_ptr = unsafe {
        libc::mmap(
            ptr::null_mut(),
            len,
            prot,
            libc::MAP_SHARED,
            file.as_raw_fd(),
            0,
        )
    };

    if mmap_ptr == libc::MAP_FAILED {
        return Err(io::Error::last_os_error());
    }

    Ok(mmap_ptr as *mut u8)
}

fn unmap(mmap_ptr: *mut u8, len: usize) {
    unsafe {
        libc::munmap(mmap_ptr as *mut libc::c_void, len);
    }
}

fn invalid_data(msg: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}
