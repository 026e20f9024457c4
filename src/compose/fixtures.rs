//! In-memory PDF fixtures for composition tests

use super::form::{page_box, PageBox};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Build a PDF with one page per size; each page shows `"<label> <n>"`
///
/// Fonts are attached to the Pages node so pages inherit their resources.
pub(crate) fn build_pdf(page_sizes: &[(f32, f32)], label: &str) -> Vec<u8> {
    let boxes: Vec<PageBox> = page_sizes
        .iter()
        .map(|&(width, height)| PageBox { llx: 0.0, lly: 0.0, urx: width, ury: height })
        .collect();
    build_pdf_with_boxes(&boxes, label)
}

/// Like [`build_pdf`], with explicit MediaBoxes
pub(crate) fn build_pdf_with_boxes(boxes: &[PageBox], label: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for (i, media_box) in boxes.iter().enumerate() {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
                Operation::new("Td", vec![Object::Integer(72), Object::Integer(72)]),
                Operation::new("Tj", vec![Object::string_literal(format!("{} {}", label, i + 1))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => media_box.to_object(),
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
            "Resources" => resources_id,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Page sizes of an encoded PDF, in page order
pub(crate) fn page_sizes(bytes: &[u8]) -> Vec<(f32, f32)> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| {
            let b = page_box(&doc, id).unwrap();
            (b.width(), b.height())
        })
        .collect()
}

/// Decoded content stream of every page, in page order
pub(crate) fn page_contents(bytes: &[u8]) -> Vec<Vec<u8>> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| doc.get_page_content(id).unwrap())
        .collect()
}
