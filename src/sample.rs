/// Element formats a capture file can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    U8,
    I16,
    F32,
}

impl SampleFormat {
    pub fn tag(self) -> u32 {
        match self {
            Self::U8 => 1,
            Self::I16 => 2,
            Self::F32 => 3,
        }
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            1 => Some(Self::U8),
            2 => Some(Self::I16),
            3 => Some(Self::F32),
            _ => None,
        }
    }
}

/// A plain-data ring element with a fixed little-endian encoding.
pub trait Sample: Copy + Default + Send + 'static {
    const FORMAT: SampleFormat;
    const SIZE: usize;

    /// `out` is exactly `SIZE` bytes.
    fn write_le(self, out: &mut [u8]);

    /// `bytes` is exactly `SIZE` bytes.
    fn read_le(bytes: &[u8]) -> Self;
}

impl Sample for u8 {
    const FORMAT: SampleFormat = SampleFormat::U8;
    const SIZE: usize = 1;

    #[inline]
    fn write_le(self, out: &mut [u8]) {
        out[0] = self;
    }

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl Sample for i16 {
    const FORMAT: SampleFormat = SampleFormat::I16;
    const SIZE: usize = 2;

    #[inline]
    fn write_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        i16::from_le_bytes([bytes[0], bytes[1]])
    }
}

impl Sample for f32 {
    const FORMAT: SampleFormat = SampleFormat::F32;
    const SIZE: usize = 4;

    #[inline]
    fn write_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}
