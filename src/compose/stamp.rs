//! Layering content pages onto letterhead pages
//!
//! Both inputs are decoded into independent documents, renumbered into
//! disjoint object ranges and merged. Each output page is sized to its
//! letterhead page and draws two Form XObjects: letterhead first, content on
//! top, both at the origin and unscaled.

use super::error::{ComposeError, DocumentRole};
use super::form::{page_form, PageBox};
use super::pages::page_plan;
use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::collections::BTreeMap;

const LETTERHEAD_XOBJECT: &[u8] = b"Lh";
const CONTENT_XOBJECT: &[u8] = b"Ct";

/// A form already added to a document
struct PlacedForm {
    id: ObjectId,
    page_box: PageBox,
}

/// Compose `content` onto `letterhead` and return the encoded document
///
/// All-or-nothing: any failure returns an error and no bytes.
pub fn stamp(content: &[u8], letterhead: &[u8]) -> Result<Vec<u8>, ComposeError> {
    let mut letterhead_doc = decode(letterhead, DocumentRole::Letterhead)?;
    let mut content_doc = decode(content, DocumentRole::Content)?;

    letterhead_doc.renumber_objects_with(1);
    let letterhead_pages: Vec<ObjectId> = letterhead_doc.get_pages().into_values().collect();
    let plan = page_plan(content_doc.get_pages().len(), letterhead_pages.len())?;

    // One form per letterhead page in use, shared by all pages of that role
    let mut letterhead_forms: BTreeMap<usize, PlacedForm> = BTreeMap::new();
    for &index in &plan {
        if letterhead_forms.contains_key(&index) {
            continue;
        }
        let form = page_form(&letterhead_doc, letterhead_pages[index], DocumentRole::Letterhead, index)?;
        let page_box = form.page_box;
        let id = letterhead_doc.add_object(form.stream);
        letterhead_forms.insert(index, PlacedForm { id, page_box });
    }

    content_doc.renumber_objects_with(letterhead_doc.max_id + 1);
    let content_pages: Vec<ObjectId> = content_doc.get_pages().into_values().collect();
    let mut content_forms = Vec::with_capacity(content_pages.len());
    for (index, &page_id) in content_pages.iter().enumerate() {
        let form = page_form(&content_doc, page_id, DocumentRole::Content, index)?;
        let page_box = form.page_box;
        let id = content_doc.add_object(form.stream);
        content_forms.push(PlacedForm { id, page_box });
    }

    let mut output = Document::with_version("1.5");
    output.objects.append(&mut letterhead_doc.objects);
    output.objects.append(&mut content_doc.objects);
    output.max_id = content_doc.max_id;

    let pages_id = output.new_object_id();
    let mut kids = Vec::with_capacity(plan.len());
    for (index, (foreground, letterhead_index)) in content_forms.iter().zip(&plan).enumerate() {
        let background = &letterhead_forms[letterhead_index];
        debug!(
            "page {}: letterhead page {} ({}x{}), content {}x{}",
            index,
            letterhead_index,
            background.page_box.width(),
            background.page_box.height(),
            foreground.page_box.width(),
            foreground.page_box.height(),
        );

        let layers = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new("Do", vec![Object::Name(LETTERHEAD_XOBJECT.to_vec())]),
                Operation::new("Q", vec![]),
                Operation::new("q", vec![]),
                Operation::new("Do", vec![Object::Name(CONTENT_XOBJECT.to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = layers.encode().map_err(|e| ComposeError::Encode(e.to_string()))?;
        let contents_id = output.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = output.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => background.page_box.at_origin().to_object(),
            "Contents" => contents_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    LETTERHEAD_XOBJECT => background.id,
                    CONTENT_XOBJECT => foreground.id,
                },
            },
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    output.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
        }),
    );
    let catalog_id = output.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    output.trailer.set("Root", catalog_id);

    // Drops the source catalogs and page trees
    output.prune_objects();
    output.compress();

    let mut bytes = Vec::new();
    output
        .save_to(&mut bytes)
        .map_err(|e| ComposeError::Encode(e.to_string()))?;
    Ok(bytes)
}

fn decode(bytes: &[u8], role: DocumentRole) -> Result<Document, ComposeError> {
    Document::load_mem(bytes).map_err(|e| ComposeError::Decode {
        role,
        reason: e.to_string(),
    })
}
