//! Procedural textures for spheres without an image on disk.
//!
//! The default is a UV test grid: a checkerboard with `cells_u` columns and
//! `cells_v` rows, so seams, pole pinching and winding problems are visible
//! at a glance.

/// Texels per grid cell along each axis when the cap allows it.
pub const UV_GRID_TEXELS_PER_CELL: u32 = 16;

/// Upper bound on either side of a generated UV grid.
pub const MAX_UV_GRID_DIMENSION: u32 = 2048;

/// RGBA pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: (r.clamp(0.0, 1.0) * 255.0) as u8,
            g: (g.clamp(0.0, 1.0) * 255.0) as u8,
            b: (b.clamp(0.0, 1.0) * 255.0) as u8,
            a: 255,
        }
    }

    pub fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// CPU-side RGBA8 texture, row-major from the top-left texel.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}

impl TextureData {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::new(0, 0, 0, 255); width as usize * height as usize],
        }
    }

    /// Two-colour checkerboard. Zero-sized inputs are clamped to 1.
    pub fn checkerboard(width: u32, height: u32, cells_u: u32, cells_v: u32, even: Pixel, odd: Pixel) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let cells_u = cells_u.max(1);
        let cells_v = cells_v.max(1);

        let mut tex = Self::new(width, height);
        for y in 0..height {
            let row = u64::from(y) * u64::from(cells_v) / u64::from(height);
            for x in 0..width {
                let col = u64::from(x) * u64::from(cells_u) / u64::from(width);
                let pixel = if (row + col) % 2 == 0 { even } else { odd };
                tex.set_pixel(x, y, pixel);
            }
        }
        tex
    }

    /// Checkerboard sized for a sphere with the given resolution: one cell
    /// per sector and per stack.
    ///
    /// Each side is capped at `max_dimension` (the device's 2D texture limit)
    /// and at [`MAX_UV_GRID_DIMENSION`]. Past the cap, cells shrink below
    /// [`UV_GRID_TEXELS_PER_CELL`] texels.
    pub fn uv_grid(sector_count: u32, stack_count: u32, max_dimension: u32) -> Self {
        let cap = max_dimension.clamp(1, MAX_UV_GRID_DIMENSION);
        let side = |cells: u32| cells.max(1).saturating_mul(UV_GRID_TEXELS_PER_CELL).min(cap);
        Self::checkerboard(
            side(sector_count),
            side(stack_count),
            sector_count,
            stack_count,
            Pixel::from_rgb(0.85, 0.78, 0.55),
            Pixel::from_rgb(0.25, 0.35, 0.6),
        )
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = pixel;
        }
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        if x < self.width && y < self.height {
            self.pixels[self.index(x, y)]
        } else {
            Pixel::new(0, 0, 0, 255)
        }
    }

    /// Nearest-texel lookup with wrapping, matching a repeat sampler.
    pub fn sample(&self, u: f32, v: f32) -> Pixel {
        let x = ((u.fract() + 1.0).fract() * self.width as f32) as u32 % self.width;
        let y = ((v.fract() + 1.0).fract() * self.height as f32) as u32 % self.height;
        self.get_pixel(x, y)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.to_bytes());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Pixel = Pixel::new(255, 255, 255, 255);
    const BLACK: Pixel = Pixel::new(0, 0, 0, 255);

    #[test]
    fn checkerboard_alternates_cells() {
        let tex = TextureData::checkerboard(4, 4, 2, 2, WHITE, BLACK);
        assert_eq!(tex.get_pixel(0, 0), WHITE);
        assert_eq!(tex.get_pixel(1, 1), WHITE);
        assert_eq!(tex.get_pixel(2, 0), BLACK);
        assert_eq!(tex.get_pixel(0, 2), BLACK);
        assert_eq!(tex.get_pixel(3, 3), WHITE);
    }

    #[test]
    fn uv_grid_has_one_cell_per_sector_and_stack() {
        let tex = TextureData::uv_grid(8, 4, 8192);
        assert_eq!(tex.width, 8 * UV_GRID_TEXELS_PER_CELL);
        assert_eq!(tex.height, 4 * UV_GRID_TEXELS_PER_CELL);
        assert_ne!(tex.sample(0.01, 0.01), tex.sample(0.01 + 1.0 / 8.0, 0.01));
    }

    #[test]
    fn uv_grid_for_largest_sphere_stays_within_cap() {
        assert!(crate::SphereParams::new(1.0, 4096, 4096).validate().is_ok());
        let tex = TextureData::uv_grid(4096, 4096, 8192);
        assert_eq!((tex.width, tex.height), (MAX_UV_GRID_DIMENSION, MAX_UV_GRID_DIMENSION));
        assert_eq!(tex.pixels.len(), (MAX_UV_GRID_DIMENSION * MAX_UV_GRID_DIMENSION) as usize);
    }

    #[test]
    fn uv_grid_respects_device_limit() {
        // 600 x 300 cells would need 9600 x 4800 texels uncapped.
        let tex = TextureData::uv_grid(600, 300, 1024);
        assert_eq!((tex.width, tex.height), (1024, 1024));

        let tex = TextureData::uv_grid(40, 20, 512);
        assert_eq!((tex.width, tex.height), (512, 320));
    }

    #[test]
    fn uv_grid_handles_huge_sector_count() {
        // Two stacks allow close to u32::MAX / 3 sectors.
        let sectors = u32::MAX / 3 - 1;
        assert!(crate::SphereParams::new(1.0, sectors, 2).validate().is_ok());
        let tex = TextureData::uv_grid(sectors, 2, 256);
        assert_eq!((tex.width, tex.height), (256, 32));
    }

    #[test]
    fn sample_wraps_at_seam() {
        let tex = TextureData::checkerboard(4, 4, 2, 2, WHITE, BLACK);
        assert_eq!(tex.sample(1.1, 0.1), tex.sample(0.1, 0.1));
        assert_eq!(tex.sample(-0.9, 0.1), tex.sample(0.1, 0.1));
    }

    #[test]
    fn bytes_are_rgba8() {
        let tex = TextureData::checkerboard(2, 1, 2, 1, WHITE, BLACK);
        assert_eq!(tex.to_bytes(), vec![255, 255, 255, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn zero_size_is_clamped() {
        let tex = TextureData::checkerboard(0, 0, 0, 0, WHITE, BLACK);
        assert_eq!((tex.width, tex.height), (1, 1));
        assert_eq!(tex.pixels.len(), 1);
    }
}
