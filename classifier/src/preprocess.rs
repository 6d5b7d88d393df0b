use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::ClassifierError;
use crate::Array4F;

pub const INPUT_WIDTH: u32 = 224;
pub const INPUT_HEIGHT: u32 = 224;

/// ImageNet channel means in BGR order; the model was trained on inputs with
/// flipped channels and these means subtracted, without further scaling.
pub const CHANNEL_MEANS_BGR: [f32; 3] = [103.939, 116.779, 123.68];

/// Decode an image file and turn it into a model input tensor.
pub fn load_input(path: &Path) -> Result<Array4F, ClassifierError> {
    let img = image::open(path).map_err(|e| ClassifierError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(image_to_input(&img))
}

/// Resize to the model resolution and normalize into an NHWC batch of one.
pub fn image_to_input(img: &DynamicImage) -> Array4F {
    // Nearest-neighbour matches the resizing the model saw during training.
    let resized = img.resize_exact(INPUT_WIDTH, INPUT_HEIGHT, FilterType::Nearest);
    let rgb = resized.to_rgb8();

    let mut input = Array4F::zeros((1, INPUT_HEIGHT as usize, INPUT_WIDTH as usize, 3));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        input[[0, y, x, 0]] = pixel[2] as f32 - CHANNEL_MEANS_BGR[0];
        input[[0, y, x, 1]] = pixel[1] as f32 - CHANNEL_MEANS_BGR[1];
        input[[0, y, x, 2]] = pixel[0] as f32 - CHANNEL_MEANS_BGR[2];
    }
    input
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;

    const EPSILON: f32 = 0.001;

    #[test]
    fn input_has_model_shape() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(640, 480));
        let input = image_to_input(&img);

        assert_eq!(input.shape(), &[1, 224, 224, 3]);
    }

    #[test]
    fn channels_are_flipped_and_centered() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([10, 20, 200])));
        let input = image_to_input(&img);

        // Every pixel of a solid image normalizes to the same BGR triple.
        assert!((input[[0, 0, 0, 0]] - (200.0 - 103.939)).abs() < EPSILON);
        assert!((input[[0, 0, 0, 1]] - (20.0 - 116.779)).abs() < EPSILON);
        assert!((input[[0, 0, 0, 2]] - (10.0 - 123.68)).abs() < EPSILON);
        assert!((input[[0, 223, 223, 0]] - (200.0 - 103.939)).abs() < EPSILON);
    }

    #[test]
    fn resize_keeps_corner_pixels() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 1, Rgb([0, 0, 255]));
        let input = image_to_input(&DynamicImage::ImageRgb8(img));

        // Nearest-neighbour maps the output corners back onto the source corners.
        assert!((input[[0, 0, 0, 2]] - (255.0 - 123.68)).abs() < EPSILON);
        assert!((input[[0, 223, 223, 0]] - (255.0 - 103.939)).abs() < EPSILON);
    }
}
