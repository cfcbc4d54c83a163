/// A packed 0xAARRGGBB color.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ColorRef(u32);

impl ColorRef {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> ColorRef {
        Self::from_argb(0xff, r, g, b)
    }

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> ColorRef {
        ColorRef(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Bits 24..31 are A
    /// Bits 16..23 are R
    /// Bits 8..15 are G
    /// Bits 0..7 are B
    pub const fn from_u32_argb(u: u32) -> Self {
        Self(u)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

macro_rules! well_known_colors {
    (
        $($name:ident = $hex:expr,)*
    ) => {
        impl ColorRef {
            $(
                pub const $name: ColorRef = ColorRef::from_u32_argb($hex);
            )*
        }
    }
}

well_known_colors! {
    TRANSPARENT = 0x00_00_00_00,
    BLACK = 0xff_00_00_00,
    WHITE = 0xff_ff_ff_ff,
    GRAY = 0xff_88_88_88,
    LIGHT_GRAY = 0xff_cc_cc_cc,
    RED = 0xff_ff_00_00,
    GREEN = 0xff_00_ff_00,
    BLUE = 0xff_00_00_ff,
}
