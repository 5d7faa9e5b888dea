use crate::error::LoadError;
use crate::store::DecodedImage;
use serde_json::Value;

pub(crate) fn decode_image(locator: &str, bytes: &[u8]) -> Result<DecodedImage, LoadError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| LoadError::decode(locator, e))?
        .to_rgba8();

    let (width, height) = img.dimensions();
    Ok(DecodedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

pub(crate) fn decode_json(locator: &str, bytes: &[u8]) -> Result<Value, LoadError> {
    serde_json::from_slice(bytes).map_err(|e| LoadError::parse(locator, e))
}

#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
    let mut buff = Cursor::new(vec![]);
    img.write_to(&mut buff, ImageFormat::Png).unwrap();
    buff.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_png() {
        let img = decode_image("hero.png", &png_bytes(3, 2)).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.pixels.len(), 3 * 2 * 4);
        assert_eq!(&img.pixels[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_image_error() {
        let err = decode_image("broken.png", b"not an image").unwrap_err();
        assert!(matches!(err, LoadError::Decode { ref locator, .. } if locator == "broken.png"));
    }

    #[test]
    fn test_decode_json() {
        let value = decode_json("config.json", br#"{"a":1}"#).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_decode_json_error() {
        let err = decode_json("config.json", b"{a:").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
