//! Turning source pages into Form XObjects
//!
//! A Form XObject carries the page's content stream, its (possibly
//! inherited) resources and its MediaBox as bounding box, so it can be drawn
//! onto another page with a single `Do`. The form matrix moves the lower-left
//! corner of the MediaBox to the origin.

use super::error::{ComposeError, DocumentRole};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Page-tree depth limit when walking `Parent` links
const MAX_TREE_DEPTH: usize = 64;

/// Rectangle in PDF user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub llx: f32,
    pub lly: f32,
    pub urx: f32,
    pub ury: f32,
}

impl PageBox {
    pub fn width(&self) -> f32 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f32 {
        self.ury - self.lly
    }

    pub(crate) fn from_object(doc: &Document, object: &Object) -> Option<Self> {
        let values = resolve(doc, object)?.as_array().ok()?;
        if values.len() != 4 {
            return None;
        }
        let mut coords = [0.0f32; 4];
        for (slot, value) in coords.iter_mut().zip(values) {
            *slot = number(resolve(doc, value)?)?;
        }
        Some(Self {
            llx: coords[0].min(coords[2]),
            lly: coords[1].min(coords[3]),
            urx: coords[0].max(coords[2]),
            ury: coords[1].max(coords[3]),
        })
    }

    /// Same size, lower-left corner at 0,0
    pub fn at_origin(&self) -> Self {
        Self {
            llx: 0.0,
            lly: 0.0,
            urx: self.width(),
            ury: self.height(),
        }
    }

    /// Form matrix drawing this box with its lower-left corner at the origin
    pub fn origin_matrix(&self) -> Object {
        Object::Array(vec![
            Object::Integer(1),
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(1),
            Object::Real(-self.llx),
            Object::Real(-self.lly),
        ])
    }

    pub fn to_object(&self) -> Object {
        Object::Array(vec![
            Object::Real(self.llx),
            Object::Real(self.lly),
            Object::Real(self.urx),
            Object::Real(self.ury),
        ])
    }
}

/// A page converted to a Form XObject, not yet added to any document
pub struct PageForm {
    pub page_box: PageBox,
    pub stream: Stream,
}

/// MediaBox of a page, following the page tree for inherited values
pub fn page_box(doc: &Document, page_id: ObjectId) -> Option<PageBox> {
    inherited(doc, page_id, b"MediaBox").and_then(|object| PageBox::from_object(doc, object))
}

/// Build the Form XObject for one page
pub fn page_form(
    doc: &Document,
    page_id: ObjectId,
    role: DocumentRole,
    index: usize,
) -> Result<PageForm, ComposeError> {
    let page_box = page_box(doc, page_id).ok_or(ComposeError::MissingPageBox { role, page: index })?;

    let content = doc
        .get_page_content(page_id)
        .map_err(|e| ComposeError::PageContent {
            role,
            page: index,
            reason: e.to_string(),
        })?;

    let resources = inherited(doc, page_id, b"Resources")
        .cloned()
        .unwrap_or_else(|| Object::Dictionary(Dictionary::new()));

    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Form",
        "FormType" => Object::Integer(1),
        "BBox" => page_box.to_object(),
        "Matrix" => page_box.origin_matrix(),
        "Resources" => resources,
    };

    Ok(PageForm {
        page_box,
        stream: Stream::new(dict, content),
    })
}

/// Look up a page attribute on the page or its ancestors
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

pub(crate) fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::fixtures::{build_pdf, build_pdf_with_boxes};

    #[test]
    fn test_page_box_from_page() {
        let doc = Document::load_mem(&build_pdf(&[(595.0, 842.0), (612.0, 792.0)], "x")).unwrap();
        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

        let first = page_box(&doc, pages[0]).unwrap();
        assert_eq!((first.width(), first.height()), (595.0, 842.0));
        let second = page_box(&doc, pages[1]).unwrap();
        assert_eq!((second.width(), second.height()), (612.0, 792.0));
    }

    #[test]
    fn test_form_inherits_resources() {
        let doc = Document::load_mem(&build_pdf(&[(595.0, 842.0)], "x")).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();

        let form = page_form(&doc, page_id, DocumentRole::Content, 0).unwrap();
        // Fixture pages only get resources through the Pages node
        assert!(form.stream.dict.get(b"Resources").is_ok());
        assert_eq!(form.stream.dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Form");
        assert!(!form.stream.content.is_empty());
    }

    #[test]
    fn test_offset_page_is_moved_to_origin() {
        let offset = PageBox { llx: 100.0, lly: 100.0, urx: 600.0, ury: 800.0 };
        let doc = Document::load_mem(&build_pdf_with_boxes(&[offset], "x")).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();

        let form = page_form(&doc, page_id, DocumentRole::Content, 0).unwrap();
        let matrix: Vec<f32> = form
            .stream
            .dict
            .get(b"Matrix")
            .and_then(Object::as_array)
            .unwrap()
            .iter()
            .map(|v| number(v).unwrap())
            .collect();
        assert_eq!(matrix, vec![1.0, 0.0, 0.0, 1.0, -100.0, -100.0]);
        assert_eq!(form.page_box, offset);
        assert_eq!(
            offset.at_origin(),
            PageBox { llx: 0.0, lly: 0.0, urx: 500.0, ury: 700.0 }
        );
    }

    #[test]
    fn test_normalizes_flipped_box() {
        let doc = Document::with_version("1.5");
        let flipped = Object::Array(vec![
            Object::Integer(600),
            Object::Integer(800),
            Object::Integer(0),
            Object::Real(0.0),
        ]);
        let b = PageBox::from_object(&doc, &flipped).unwrap();
        assert_eq!((b.llx, b.lly, b.width(), b.height()), (0.0, 0.0, 600.0, 800.0));
    }
}
