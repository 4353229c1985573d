use crate::error::RenderError;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Document, ObjectId, Stream, dictionary};
use shotdoc_resource::{ImagePayload, PreparedImage};
use std::io::Write;

/// Adds an image XObject (and its soft mask, if any) to `doc`.
///
/// JPEG payloads are stored as-is with `DCTDecode`; raw samples are
/// flate-compressed, with alpha split into a grayscale `/SMask`.
pub(crate) fn add_image_xobject(doc: &mut Document, image: &PreparedImage) -> Result<ObjectId, RenderError> {
    let (width, height) = (i64::from(image.width), i64::from(image.height));

    match &image.payload {
        ImagePayload::Jpeg { data, components } => {
            let color_space = if *components == 1 { "DeviceGray" } else { "DeviceRGB" };
            let dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => color_space,
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            };
            Ok(doc.add_object(Stream::new(dict, data.clone())))
        }
        ImagePayload::Pixels { rgb, alpha } => {
            let pixels = image.width as usize * image.height as usize;
            if rgb.len() != pixels * 3 {
                return Err(RenderError::ImageData(image.width, image.height, rgb.len(), pixels * 3));
            }

            let mut dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            };

            if let Some(alpha) = alpha {
                if alpha.len() != pixels {
                    return Err(RenderError::ImageData(image.width, image.height, alpha.len(), pixels));
                }
                let mask = dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => width,
                    "Height" => height,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                    "Filter" => "FlateDecode",
                };
                let mask_id = doc.add_object(Stream::new(mask, deflate(alpha)?));
                dict.set("SMask", mask_id);
            }

            Ok(doc.add_object(Stream::new(dict, deflate(rgb)?)))
        }
    }
}

pub(crate) fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_with_alpha_get_a_soft_mask() {
        let mut doc = Document::with_version("1.7");
        let image = PreparedImage {
            width: 2,
            height: 1,
            payload: ImagePayload::Pixels {
                rgb: vec![255, 0, 0, 0, 255, 0],
                alpha: Some(vec![255, 0]),
            },
            reencoded: false,
        };
        let id = add_image_xobject(&mut doc, &image).unwrap();
        let stream = doc.get_object(id).unwrap().as_stream().unwrap();
        let mask_id = stream.dict.get(b"SMask").unwrap().as_reference().unwrap();
        let mask = doc.get_object(mask_id).unwrap().as_stream().unwrap();
        assert_eq!(mask.dict.get(b"ColorSpace").unwrap().as_name().unwrap(), b"DeviceGray");
    }

    #[test]
    fn rejects_truncated_samples() {
        let mut doc = Document::with_version("1.7");
        let image = PreparedImage {
            width: 4,
            height: 4,
            payload: ImagePayload::Pixels {
                rgb: vec![0; 10],
                alpha: None,
            },
            reencoded: false,
        };
        assert!(matches!(
            add_image_xobject(&mut doc, &image),
            Err(RenderError::ImageData(4, 4, 10, 48))
        ));
    }

    #[test]
    fn jpeg_is_stored_unchanged() {
        let mut doc = Document::with_version("1.7");
        let data = vec![0xFF, 0xD8, 0xFF, 0xD9];
        let image = PreparedImage {
            width: 1,
            height: 1,
            payload: ImagePayload::Jpeg {
                data: data.clone(),
                components: 3,
            },
            reencoded: false,
        };
        let id = add_image_xobject(&mut doc, &image).unwrap();
        let stream = doc.get_object(id).unwrap().as_stream().unwrap();
        assert_eq!(stream.content, data);
        assert_eq!(stream.dict.get(b"Filter").unwrap().as_name().unwrap(), b"DCTDecode");
    }
}
