use crate::sample::SampleFormat;

/// Fixed 64-byte little-endian header at the start of a capture file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub format: u32,
    pub channels: u16,
    pub sample_rate: u32,
    pub created_at: i64,
    pub sample_count: u64,
    pub write_offset: u64,
}

impl CaptureHeader {
    pub const SIZE: usize = 64;
    pub const MAGIC: [u8; 4] = *b"SRCP";
    pub const VERSION: u32 = 1;

    pub fn new(format: SampleFormat, channels: u16, sample_rate: u32, created_at: i64) -> Self {
        Self {
            magic: Self::MAGIC,
            version: Self::VERSION,
            format: format.tag(),
            channels,
            sample_rate,
            created_at,
            sample_count: 0,
            write_offset: Self::SIZE as u64,
        }
    }

    #[inline]
    pub fn validate(&self) -> bool {
        self.magic == Self::MAGIC
            && self.version == Self::VERSION
            && SampleFormat::from_tag(self.format).is_some()
            && self.write_offset >= Self::SIZE as u64
    }

    pub fn sample_format(&self) -> Option<SampleFormat> {
        SampleFormat::from_tag(self.format)
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..4].copy_from_slice(&self.magic);
        out[4..8].copy_from_slice(&self.version.to_le_bytes());
        out[8..12].copy_from_slice(&self.format.to_le_bytes());
        out[12..14].copy_from_slice(&self.channels.to_le_bytes());
        out[16..20].copy_from_slice(&self.sample_rate.to_le_bytes());
        out[24..32].copy_from_slice(&self.created_at.to_le_bytes());
        out[32..40].copy_from_slice(&self.sample_count.to_le_bytes());
        out[40..48].copy_from_slice(&self.write_offset.to_le_bytes());
        out
    }

    /// Returns `None` if `bytes` is shorter than [`CaptureHeader::SIZE`].
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; Self::SIZE] = bytes.get(..Self::SIZE)?.try_into().ok()?;
        let u32_at = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        let u64_at = |at: usize| {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[at..at + 8]);
            u64::from_le_bytes(word)
        };

        Some(Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u32_at(4),
            format: u32_at(8),
            channels: u16::from_le_bytes([bytes[12], bytes[13]]),
            sample_rate: u32_at(16),
            created_at: u64_at(24) as i64,
            sample_count: u64_at(32),
            write_offset: u64_at(40),
        })
    }
}
