/// Luminance at or above this value thresholds to 1.
pub const LUMA_THRESHOLD: u8 = 128;

/// Binary image with row-major pixel data.
///
/// Pixels are 0 or 1. After [`Bitmap::binarize`], 1 is foreground ink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub buf: Vec<u8>,
}

impl Bitmap {
    /// Create a new bitmap filled with background.
    pub fn new(width: u32, height: u32) -> Self {
        let buf = vec![0u8; (width * height) as usize];
        Self { width, height, buf }
    }

    /// Create a bitmap from existing 0/1 pixel data.
    ///
    /// `buf` must contain exactly `width * height` values. Non-zero values
    /// are normalized to 1.
    pub fn from_buf(width: u32, height: u32, mut buf: Vec<u8>) -> Self {
        assert_eq!(buf.len(), (width * height) as usize);
        for v in &mut buf {
            *v = (*v != 0) as u8;
        }
        Self { width, height, buf }
    }

    /// Threshold 8-bit luminance data into a bitmap.
    ///
    /// Bright pixels (>= [`LUMA_THRESHOLD`]) become 1, dark pixels 0.
    pub fn from_luma(width: u32, height: u32, luma: &[u8]) -> Self {
        assert_eq!(luma.len(), (width * height) as usize);
        let buf = luma.iter().map(|&l| (l >= LUMA_THRESHOLD) as u8).collect();
        Self { width, height, buf }
    }

    /// Get the pixel value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.buf[(y * self.width + x) as usize]
    }

    /// Set the pixel value at (x, y).
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, val: u8) {
        self.buf[(y * self.width + x) as usize] = (val != 0) as u8;
    }

    /// Number of pixels equal to 1.
    pub fn count_ones(&self) -> usize {
        self.buf.iter().filter(|&&v| v == 1).count()
    }

    /// Make the sparser value the foreground.
    ///
    /// If 1 is strictly more frequent than 0, every pixel is complemented.
    /// Ties and all-zero images are left untouched; an all-one image turns
    /// into all background. Returns whether the bitmap was flipped.
    pub fn binarize(&mut self) -> bool {
        let ones = self.count_ones();
        let zeros = self.buf.len() - ones;
        if ones > zeros {
            for v in &mut self.buf {
                *v = 1 - *v;
            }
            true
        } else {
            false
        }
    }
}
