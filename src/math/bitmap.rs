// Copyright 2020 @TwoCookingMice

use super::constants::Vector3f;

use std::ops;
use std::vec::Vec;

/// Row-major grid of three-component cells. Used for fitted coefficient
/// tables: `x` runs over roughness, `y` over the incident cosine.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    data: Vec<Vector3f>,
    height: usize,
    width: usize
}

impl ops::Index<(usize, usize)> for Bitmap {
    type Output = Vector3f;

    fn index(&self, index: (usize, usize)) -> &Vector3f {
        assert!(index.0 < self.width && index.1 < self.height);
        &self.data[index.0 + self.width * index.1]
    }
}

impl ops::IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Vector3f {
        assert!(index.0 < self.width && index.1 < self.height);
        &mut self.data[index.0 + self.width * index.1]
    }
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        let pixel_number = width * height;
        Self { data: vec!(Vector3f::zeros(); pixel_number),
               width: width,
               height: height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Overwrite row `y` with `row`, which must hold `width` cells.
    pub fn set_row(&mut self, y: usize, row: &[Vector3f]) {
        assert_eq!(row.len(), self.width);
        let start = y * self.width;
        self.data[start..start + self.width].copy_from_slice(row);
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.iter().all(|c| c.is_finite()))
    }
}
