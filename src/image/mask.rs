//! Owned boolean raster used for the edge map.
use crate::error::{Result, SamplerError};

/// `true` marks a pixel lying on a depth discontinuity.
#[derive(Clone, Debug)]
pub struct ImageMask {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: Vec<bool>,
}

impl ImageMask {
    /// An all-`false` mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![false; w * h],
        }
    }

    pub fn from_vec(w: usize, h: usize, data: Vec<bool>) -> Result<Self> {
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
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.stride + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: bool) {
        self.data[y * self.stride + x] = v;
    }
}

impl crate::image::traits::ImageView for ImageMask {
    type Pixel = bool;

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
    fn row(&self, y: usize) -> &[bool] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
