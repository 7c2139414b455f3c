//! Black-and-white document style.
//!
//! The image is reduced to luma and then run through contrast-limited
//! adaptive histogram equalization (CLAHE). Each tile of an `n x n` grid gets
//! its own equalization curve, with histogram bins capped at
//! `clip_limit * tile_area / 256` and the clipped excess spread back over all
//! bins. Pixels blend the curves of the four nearest tile centers
//! bilinearly, which avoids seams at tile borders.
//!
//! The result lifts faint pencil or print on unevenly lit photos of paper
//! without blowing out flat regions the way global equalization does.

use crate::config::MonochromeOptions;
use crate::decode::DecodedImage;
use crate::luminance::{luma_to_rgb, rgb_to_luma};

const BINS: usize = 256;

/// Render an RGB image in the black-and-white style.
///
/// The output is still RGB (three equal channels) so it flows through the
/// rest of the pipeline and the PDF encoder like any other render.
pub fn apply_black_and_white(image: &DecodedImage, options: &MonochromeOptions) -> DecodedImage {
    if image.is_empty() {
        return image.clone();
    }

    let luma = rgb_to_luma(&image.pixels);
    let equalized = clahe(&luma, image.width, image.height, options);
    DecodedImage::new(image.width, image.height, luma_to_rgb(&equalized))
}

/// Tile layout for a `width x height` plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TileGrid {
    tile_w: u32,
    tile_h: u32,
    cols: u32,
    rows: u32,
}

impl TileGrid {
    fn new(width: u32, height: u32, grid: u32) -> Self {
        let grid = grid.max(1);
        let tile_w = width.div_ceil(grid.min(width)).max(1);
        let tile_h = height.div_ceil(grid.min(height)).max(1);
        Self {
            tile_w,
            tile_h,
            cols: width.div_ceil(tile_w),
            rows: height.div_ceil(tile_h),
        }
    }
}

/// Contrast-limited adaptive histogram equalization of a luma plane.
pub fn clahe(luma: &[u8], width: u32, height: u32, options: &MonochromeOptions) -> Vec<u8> {
    if luma.is_empty() || width == 0 || height == 0 {
        return luma.to_vec();
    }

    let grid = TileGrid::new(width, height, options.tile_grid);
    let luts = build_tile_luts(luma, width, height, grid, options.clip_limit);

    let mut output = vec![0u8; luma.len()];
    let cols = grid.cols as usize;

    for y in 0..height {
        let (row0, row1, fy) = neighbours(y, grid.tile_h, grid.rows);
        for x in 0..width {
            let (col0, col1, fx) = neighbours(x, grid.tile_w, grid.cols);
            let idx = (y * width + x) as usize;
            let v = luma[idx] as usize;

            let top = luts[row0 * cols + col0][v] as f32 * (1.0 - fx)
                + luts[row0 * cols + col1][v] as f32 * fx;
            let bottom = luts[row1 * cols + col0][v] as f32 * (1.0 - fx)
                + luts[row1 * cols + col1][v] as f32 * fx;

            output[idx] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
        }
    }

    output
}

/// Indices of the two tiles whose centers bracket `pos`, plus the weight of
/// the second one.
#[inline]
fn neighbours(pos: u32, tile_size: u32, count: u32) -> (usize, usize, f32) {
    let t = (pos as f32 + 0.5) / tile_size as f32 - 0.5;
    let last = count as i64 - 1;
    let lo = t.floor() as i64;
    let first = lo.clamp(0, last) as usize;
    let second = (lo + 1).clamp(0, last) as usize;
    let weight = if lo < 0 || lo >= last {
        0.0
    } else {
        t - lo as f32
    };
    (first, second, weight)
}

fn build_tile_luts(
    luma: &[u8],
    width: u32,
    height: u32,
    grid: TileGrid,
    clip_limit: f32,
) -> Vec<[u8; BINS]> {
    let mut luts = Vec::with_capacity((grid.cols * grid.rows) as usize);

    for row in 0..grid.rows {
        let y0 = row * grid.tile_h;
        let y1 = (y0 + grid.tile_h).min(height);
        for col in 0..grid.cols {
            let x0 = col * grid.tile_w;
            let x1 = (x0 + grid.tile_w).min(width);

            let mut hist = [0u32; BINS];
            for y in y0..y1 {
                let start = (y * width) as usize;
                for &v in &luma[start + x0 as usize..start + x1 as usize] {
                    hist[v as usize] += 1;
                }
            }

            let area = (x1 - x0) * (y1 - y0);
            clip_histogram(&mut hist, clip_limit, area);
            luts.push(equalization_lut(&hist, area));
        }
    }

    luts
}

/// Cap every bin and redistribute the excess evenly.
///
/// A non-positive clip limit disables clipping (plain adaptive equalization).
fn clip_histogram(hist: &mut [u32; BINS], clip_limit: f32, area: u32) {
    if clip_limit <= 0.0 {
        return;
    }

    let limit = ((clip_limit * area as f32 / BINS as f32) as u32).max(1);

    let mut excess = 0u32;
    for bin in hist.iter_mut() {
        if *bin > limit {
            excess += *bin - limit;
            *bin = limit;
        }
    }

    let per_bin = excess / BINS as u32;
    let residual = (excess % BINS as u32) as usize;
    for bin in hist.iter_mut() {
        *bin += per_bin;
    }
    if residual > 0 {
        let step = (BINS / residual).max(1);
        for bin in hist.iter_mut().step_by(step).take(residual) {
            *bin += 1;
        }
    }
}

/// Cumulative distribution scaled to 0..255.
fn equalization_lut(hist: &[u32; BINS], area: u32) -> [u8; BINS] {
    let mut lut = [0u8; BINS];
    let scale = 255.0 / area.max(1) as f32;
    let mut cumulative = 0u32;
    for (entry, &count) in lut.iter_mut().zip(hist.iter()) {
        cumulative += count;
        *entry = (cumulative as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}
