use super::*;

/// The render target handed to the grid by the host when it draws.
pub trait Canvas {
    fn fill_rect(&mut self, rect: &Rect, color: ColorRef);
}

/// Something that can be drawn into a rectangle, such as a separator.
pub trait Drawable {
    /// Natural width in pixels. Negative means the drawable has no intrinsic
    /// width.
    fn intrinsic_width(&self) -> i32 {
        -1
    }

    /// Natural height in pixels. Negative means the drawable has no intrinsic
    /// height.
    fn intrinsic_height(&self) -> i32 {
        -1
    }

    fn draw(&self, canvas: &mut dyn Canvas, rect: &Rect);
}

impl core::fmt::Debug for dyn Drawable {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            fmt,
            "Drawable({}x{})",
            self.intrinsic_width(),
            self.intrinsic_height()
        )
    }
}

/// Fills its bounds with a solid color.
///
/// Without an intrinsic size the grid falls back to the configured separator
/// size, so a plain color separator is usually paired with an explicit
/// `SeparatorSize::Px`.
#[derive(Clone, Debug)]
pub struct ColorDrawable {
    color: ColorRef,
    intrinsic: Option<Size>,
}

impl ColorDrawable {
    pub fn new(color: ColorRef) -> Self {
        Self {
            color,
            intrinsic: None,
        }
    }

    /// A color separator that reports `size` as its intrinsic size.
    pub fn with_intrinsic_size(color: ColorRef, size: Size) -> Self {
        Self {
            color,
            intrinsic: Some(size),
        }
    }

    pub fn color(&self) -> ColorRef {
        self.color
    }
}

impl Drawable for ColorDrawable {
    fn intrinsic_width(&self) -> i32 {
        self.intrinsic.map_or(-1, |size| size.width)
    }

    fn intrinsic_height(&self) -> i32 {
        self.intrinsic.map_or(-1, |size| size.height)
    }

    fn draw(&self, canvas: &mut dyn Canvas, rect: &Rect) {
        if rect.is_empty() || self.color.alpha() == 0 {
            return;
        }
        canvas.fill_rect(rect, self.color);
    }
}
