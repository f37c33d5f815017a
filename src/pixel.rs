/// Pixel memory layout of a decoded image.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// One byte per pixel, a palette index (1 to 8 bitplanes).
    Indexed8,
    /// 3 channels, 8-bit RGB (24 bitplanes).
    Rgb8,
    /// 4 channels, 8-bit RGBA (32 bitplanes).
    Rgba8,
    /// Any other deep image: one byte per group of 8 bitplanes.
    Direct { bytes_per_pixel: u8 },
}

impl PixelLayout {
    /// Layout produced for a given bitplane count.
    pub fn from_planes(planes: u8) -> Self {
        match planes {
            0..=8 => Self::Indexed8,
            24 => Self::Rgb8,
            32 => Self::Rgba8,
            n => Self::Direct {
                bytes_per_pixel: n >> 3,
            },
        }
    }

    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Indexed8 => 1,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
            Self::Direct { bytes_per_pixel } => usize::from(*bytes_per_pixel),
        }
    }

    pub fn bits_per_pixel(&self) -> usize {
        self.bytes_per_pixel() * 8
    }

    /// Whether pixel values index into the palette.
    pub fn is_indexed(&self) -> bool {
        matches!(self, Self::Indexed8)
    }
}

/// Pixel types that decoded data can be viewed as.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    fn layout() -> PixelLayout;

    #[doc(hidden)]
    fn cast_slice(bytes: &[u8]) -> &[Self];
}

#[cfg(feature = "rgb")]
impl DecodePixel for u8 {
    fn layout() -> PixelLayout {
        PixelLayout::Indexed8
    }

    fn cast_slice(bytes: &[u8]) -> &[Self] {
        bytes
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }

    fn cast_slice(bytes: &[u8]) -> &[Self] {
        use rgb::FromSlice as _;
        bytes.as_rgb()
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }

    fn cast_slice(bytes: &[u8]) -> &[Self] {
        use rgb::FromSlice as _;
        bytes.as_rgba()
    }
}
