//! Connected component bounding boxes
//!
//! Components are discovered in raster order of their first pixel, so the
//! returned boxes are ordered top-to-bottom by their topmost pixel.

use crate::{ImageOpResult, check_binary};
use glyphtrain_core::{Box, Boxa, Pix};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl ConnectivityType {
    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
            ConnectivityType::EightWay => &[
                (-1, -1),
                (0, -1),
                (1, -1),
                (-1, 0),
                (1, 0),
                (-1, 1),
                (0, 1),
                (1, 1),
            ],
        }
    }
}

/// Find the bounding box of every connected component in a binary image
///
/// # Arguments
///
/// * `pix` - 1 bpp input image
/// * `connectivity` - Neighborhood used to join pixels
///
/// # Returns
///
/// One box per component, in raster order of each component's first pixel.
///
/// # Errors
///
/// Returns an error if the image is not 1 bpp.
pub fn conncomp_boxes(pix: &Pix, connectivity: ConnectivityType) -> ImageOpResult<Boxa> {
    check_binary(pix)?;
    let (w, h) = (pix.width() as i32, pix.height() as i32);
    let mut visited = vec![false; (w * h) as usize];
    let mut boxa = Boxa::new();
    let mut stack: Vec<(i32, i32)> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            if visited[idx] || pix.get_pixel_unchecked(x as u32, y as u32) == 0 {
                continue;
            }
            visited[idx] = true;
            stack.push((x, y));
            let (mut xmin, mut ymin, mut xmax, mut ymax) = (x, y, x, y);

            while let Some((cx, cy)) = stack.pop() {
                xmin = xmin.min(cx);
                xmax = xmax.max(cx);
                ymin = ymin.min(cy);
                ymax = ymax.max(cy);
                for &(dx, dy) in connectivity.offsets() {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        continue;
                    }
                    let nidx = (ny * w + nx) as usize;
                    if !visited[nidx] && pix.get_pixel_unchecked(nx as u32, ny as u32) != 0 {
                        visited[nidx] = true;
                        stack.push((nx, ny));
                    }
                }
            }
            boxa.push(Box::new_unchecked(xmin, ymin, xmax - xmin + 1, ymax - ymin + 1));
        }
    }
    Ok(boxa)
}
