//! Separable Gaussian blur.
//!
//! The kernel's standard deviation equals the requested radius and spans
//! about three sigmas on each side. Rows are convolved first, then columns,
//! with edge pixels repeated past the border. Every channel, alpha included,
//! is filtered independently.

use crate::colorspace::displayable;
use crate::error::{EditError, EditResult};
use crate::raster::RasterImage;

/// Largest radius accepted by [`gaussian_blur`].
pub const MAX_BLUR_RADIUS: f32 = 250.0;

/// Build a normalized 1D Gaussian kernel with odd length.
pub fn gaussian_kernel_1d(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }

    // 6 sigma covers 99.7% of the distribution
    let kernel_size = ((sigma * 6.0).ceil() as usize) | 1;
    let half = kernel_size / 2;

    let mut kernel: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }
    kernel
}

/// Blur an image with a Gaussian of standard deviation `radius`.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `radius` is below 1, above
/// [`MAX_BLUR_RADIUS`], or not finite.
pub fn gaussian_blur(image: &RasterImage, radius: f32) -> EditResult<RasterImage> {
    if !radius.is_finite() || !(1.0..=MAX_BLUR_RADIUS).contains(&radius) {
        return Err(EditError::invalid(
            "radius",
            format!("blur radius must be between 1 and {MAX_BLUR_RADIUS}, got {radius}"),
        ));
    }

    let source = displayable(image);
    let kernel = gaussian_kernel_1d(radius);
    let half = (kernel.len() / 2) as i64;

    let (w, h) = (source.width() as usize, source.height() as usize);
    let c = source.channels();
    let input = source.pixels();

    // Horizontal pass into a float buffer
    let mut temp = vec![0.0f32; w * h * c];
    for y in 0..h {
        let row = y * w;
        for x in 0..w {
            for ch in 0..c {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let sx = (x as i64 + ki as i64 - half).clamp(0, w as i64 - 1) as usize;
                    sum += input[(row + sx) * c + ch] as f32 * kv;
                }
                temp[(row + x) * c + ch] = sum;
            }
        }
    }

    // Vertical pass back to bytes
    let mut output = vec![0u8; w * h * c];
    for y in 0..h {
        for x in 0..w {
            for ch in 0..c {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let sy = (y as i64 + ki as i64 - half).clamp(0, h as i64 - 1) as usize;
                    sum += temp[(sy * w + x) * c + ch] * kv;
                }
                output[(y * w + x) * c + ch] = sum.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Ok(RasterImage::from_raw_parts(
        source.width(),
        source.height(),
        source.color_space(),
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ColorSpace;

    fn checkerboard(size: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((size * size * 3) as usize);
        for y in 0..size {
            for x in 0..size {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        RasterImage::new(size, size, ColorSpace::Rgb, pixels).unwrap()
    }

    /// Sum of absolute differences between horizontal neighbours.
    fn roughness(img: &RasterImage) -> u64 {
        let c = img.channels();
        img.pixels()
            .chunks_exact(img.width() as usize * c)
            .flat_map(|row| row.windows(c + 1).map(move |w| (w[0] as i64 - w[c] as i64).unsigned_abs()))
            .sum()
    }

    #[test]
    fn test_kernel_is_normalized_and_odd() {
        for sigma in [1.0f32, 2.5, 5.0, 20.0] {
            let k = gaussian_kernel_1d(sigma);
            assert_eq!(k.len() % 2, 1);
            let sum: f32 = k.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_kernel_is_symmetric_and_peaked() {
        let k = gaussian_kernel_1d(3.0);
        let n = k.len();
        for i in 0..n / 2 {
            assert!((k[i] - k[n - 1 - i]).abs() < 1e-7);
        }
        assert!(k[n / 2] > k[0]);
    }

    #[test]
    fn test_blur_uniform_image_unchanged() {
        let img = RasterImage::filled(16, 9, ColorSpace::Rgba, &[40, 80, 120, 200]).unwrap();
        assert_eq!(gaussian_blur(&img, 5.0).unwrap(), img);
    }

    #[test]
    fn test_blur_smooths_checkerboard() {
        let img = checkerboard(16);
        let out = gaussian_blur(&img, 1.0).unwrap();
        assert!(roughness(&out) < roughness(&img));
    }

    #[test]
    fn test_larger_radius_smooths_more() {
        let img = checkerboard(24);
        let soft = gaussian_blur(&img, 1.0).unwrap();
        let softer = gaussian_blur(&img, 4.0).unwrap();
        assert!(roughness(&softer) <= roughness(&soft));
    }

    #[test]
    fn test_blur_preserves_shape() {
        let img = RasterImage::filled(7, 3, ColorSpace::Gray, &[9]).unwrap();
        let out = gaussian_blur(&img, 2.0).unwrap();
        assert_eq!((out.width(), out.height()), (7, 3));
        assert_eq!(out.color_space(), ColorSpace::Gray);
    }

    #[test]
    fn test_blur_rejects_small_radius() {
        let img = checkerboard(4);
        for r in [0.0f32, 0.5, -3.0, f32::NAN] {
            assert!(matches!(
                gaussian_blur(&img, r),
                Err(EditError::InvalidParameter { name: "radius", .. })
            ));
        }
    }
}
