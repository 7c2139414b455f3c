//! PDF assembly.
//!
//! Pages are written with `lopdf`: one JPEG image XObject per page, drawn by
//! a four-operator content stream (`q cm Do Q`) that scales the unit square
//! to the media box.

use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use super::{encode_jpeg, EncodeError};
use crate::config::ExportOptions;
use crate::decode::DecodedImage;

/// PDF version written into the header.
pub const PDF_VERSION: &str = "1.7";

/// Producer string stored in the document info dictionary.
pub const PRODUCER: &str = "PagePress";

/// Resource name of the page image inside each page's XObject dictionary.
const IMAGE_NAME: &str = "Im0";

/// Incremental builder for an image-per-page PDF.
///
/// Pages appear in the order they are added.
pub struct PdfBuilder {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    options: ExportOptions,
}

impl PdfBuilder {
    pub fn new(options: ExportOptions) -> Self {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
            options,
        }
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Append one page showing `image` at full bleed.
    ///
    /// # Errors
    ///
    /// Returns the JPEG encoder's error if the image is empty or its pixel
    /// buffer does not match its dimensions.
    pub fn add_page(&mut self, image: &DecodedImage) -> Result<(), EncodeError> {
        let jpeg = encode_jpeg(
            &image.pixels,
            image.width,
            image.height,
            self.options.jpeg_quality,
        )?;

        let scale = self.options.points_per_pixel();
        let page_w = image.width as f32 * scale;
        let page_h = image.height as f32 * scale;

        let image_stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        )
        .with_compression(false);
        let image_id = self.doc.add_object(image_stream);

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(page_w),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(page_h),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_bytes = content
            .encode()
            .map_err(|e| EncodeError::PdfWriteFailed(e.to_string()))?;
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content_bytes));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page_w),
                Object::Real(page_h),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    IMAGE_NAME => image_id,
                },
            },
        });
        self.page_ids.push(page_id);

        debug!(
            "pdf page {}: {}x{} px -> {:.1}x{:.1} pt",
            self.page_ids.len(),
            image.width,
            image.height,
            page_w,
            page_h
        );
        Ok(())
    }

    /// Write the page tree, catalog and info dictionary and serialize.
    pub fn finish(mut self) -> Result<Vec<u8>, EncodeError> {
        if self.page_ids.is_empty() {
            return Err(EncodeError::NoPages);
        }

        let count = self.page_ids.len() as i64;
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let info_id = self.doc.add_object(dictionary! {
            "Producer" => Object::string_literal(PRODUCER),
        });
        self.doc.trailer.set("Info", info_id);

        self.doc.compress();

        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| EncodeError::PdfWriteFailed(e.to_string()))?;
        Ok(buffer)
    }
}

/// Encode one image as a single-page PDF.
pub fn image_to_pdf(image: &DecodedImage, options: &ExportOptions) -> Result<Vec<u8>, EncodeError> {
    images_to_pdf([image], options)
}

/// Encode a sequence of images as one PDF, one page per image, in order.
pub fn images_to_pdf<'a, I>(images: I, options: &ExportOptions) -> Result<Vec<u8>, EncodeError>
where
    I: IntoIterator<Item = &'a DecodedImage>,
{
    let mut builder = PdfBuilder::new(*options);
    for image in images {
        builder.add_page(image)?;
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{gradient_image, solid_image};

    fn number(obj: &Object) -> f32 {
        match obj {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            other => panic!("expected a number, got {:?}", other),
        }
    }

    /// Media box sizes of every page, in page order.
    fn page_sizes(bytes: &[u8]) -> Vec<(f32, f32)> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|id| {
                let page = doc.get_dictionary(*id).unwrap();
                let mbox = page.get(b"MediaBox").unwrap().as_array().unwrap();
                (number(&mbox[2]), number(&mbox[3]))
            })
            .collect()
    }

    #[test]
    fn test_single_page() {
        let bytes = image_to_pdf(&gradient_image(40, 30), &ExportOptions::default()).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert_eq!(page_sizes(&bytes), vec![(40.0, 30.0)]);
    }

    #[test]
    fn test_pages_keep_order() {
        let a = solid_image(10, 20, [255, 0, 0]);
        let b = solid_image(30, 15, [0, 0, 255]);
        let c = solid_image(5, 5, [0, 255, 0]);

        let bytes = images_to_pdf([&a, &b, &c], &ExportOptions::default()).unwrap();

        assert_eq!(
            page_sizes(&bytes),
            vec![(10.0, 20.0), (30.0, 15.0), (5.0, 5.0)]
        );
    }

    #[test]
    fn test_dpi_scales_media_box() {
        let options = ExportOptions {
            dpi: 144.0,
            ..Default::default()
        };
        let bytes = image_to_pdf(&gradient_image(200, 100), &options).unwrap();
        assert_eq!(page_sizes(&bytes), vec![(100.0, 50.0)]);
    }

    #[test]
    fn test_image_is_dct_encoded() {
        let bytes = image_to_pdf(&gradient_image(16, 16), &ExportOptions::default()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        let images: Vec<&Stream> = doc
            .objects
            .values()
            .filter_map(|obj| obj.as_stream().ok())
            .filter(|s| matches!(s.dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Image"))
            .collect();

        assert_eq!(images.len(), 1);
        let filter = images[0].dict.get(b"Filter").unwrap().as_name().unwrap();
        assert_eq!(filter, b"DCTDecode");
        assert_eq!(&images[0].content[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_producer_is_set() {
        let bytes = image_to_pdf(&gradient_image(4, 4), &ExportOptions::default()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_id).unwrap();
        assert_eq!(info.get(b"Producer").unwrap().as_str().unwrap(), PRODUCER.as_bytes());
    }

    #[test]
    fn test_no_pages_is_error() {
        let builder = PdfBuilder::new(ExportOptions::default());
        assert_eq!(builder.page_count(), 0);
        assert_eq!(builder.finish(), Err(EncodeError::NoPages));

        let empty: [&DecodedImage; 0] = [];
        assert_eq!(
            images_to_pdf(empty, &ExportOptions::default()),
            Err(EncodeError::NoPages)
        );
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let mut builder = PdfBuilder::new(ExportOptions::default());
        let result = builder.add_page(&DecodedImage::new(0, 0, vec![]));
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
        assert_eq!(builder.page_count(), 0);
    }
}
