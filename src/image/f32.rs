//! Owned single-channel f32 raster in row-major layout (stride == width).
//!
//! Backs both the depth map (`NaN` marks unknown depth) and the orientation
//! map (degrees, `NaN` where the gradient direction is undefined).
use crate::error::{Result, SamplerError};

#[derive(Clone, Debug)]
pub struct ImageF32 {
    /// Image width in pixels (columns)
    pub w: usize,
    /// Image height in pixels (rows)
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, 0.0)
    }

    /// Construct a `w × h` buffer with every pixel set to `value`.
    pub fn filled(w: usize, h: usize, value: f32) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![value; w * h],
        }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != w * h {
            return Err(SamplerError::BufferSize {
                w,
                h,
                actual: data.len(),
            });
        }
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

impl crate::image::traits::ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
