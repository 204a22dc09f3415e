/// Read-only, row-major view over a single-channel raster.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    /// True when `(x, y)` addresses a pixel of the raster.
    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// Bounds-checked lookup with signed coordinates.
    #[inline]
    fn get_signed(&self, x: i32, y: i32) -> Option<Self::Pixel> {
        if self.contains(x, y) {
            Some(self.row(y as usize)[x as usize])
        } else {
            None
        }
    }

    fn same_dims<O: ImageView>(&self, other: &O) -> bool
    where
        Self: Sized,
    {
        self.width() == other.width() && self.height() == other.height()
    }
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}
