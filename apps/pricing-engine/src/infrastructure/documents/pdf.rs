//! PDF invoice identifier stamping.
//!
//! The invoice template prints the order identifier at a fixed position on
//! the first page. Stamping paints a white box over it and prints the new
//! label on top, leaving the original content streams untouched: they are
//! wrapped in `q`/`Q` and a new stream is appended after them.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::application::ports::{DocumentRewriteError, IdentifierStamper};
use crate::domain::documents::IdentifierRegion;
use crate::domain::shared::{ExternalOrderId, LocalOrderId};

const FONT_RESOURCE: &[u8] = b"FOrderId";

/// Stamps the ERP order number onto the first page of an invoice PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfInvoiceRewriter {
    region: IdentifierRegion,
}

impl PdfInvoiceRewriter {
    /// Create a stamper for `region`.
    #[must_use]
    pub const fn new(region: IdentifierRegion) -> Self {
        Self { region }
    }

    fn stamp_operations(&self, external: &ExternalOrderId) -> Vec<Operation> {
        let rect = self.region.redaction_rect();
        let label = self.region.label_for(external.as_str());

        vec![
            Operation::new("q", vec![]),
            Operation::new("rg", vec![1.0.into(), 1.0.into(), 1.0.into()]),
            Operation::new(
                "re",
                vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()],
            ),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
            Operation::new("BT", vec![]),
            Operation::new("rg", vec![0.0.into(), 0.0.into(), 0.0.into()]),
            Operation::new(
                "Tf",
                vec![Object::Name(FONT_RESOURCE.to_vec()), self.region.font_size.into()],
            ),
            Operation::new("Td", vec![self.region.text_x.into(), self.region.text_y.into()]),
            Operation::new("Tj", vec![Object::string_literal(label)]),
            Operation::new("ET", vec![]),
        ]
    }
}

fn parse_err(e: impl std::fmt::Display) -> DocumentRewriteError {
    DocumentRewriteError::Parse(e.to_string())
}

fn first_page(doc: &Document) -> Result<ObjectId, DocumentRewriteError> {
    doc.get_pages()
        .into_values()
        .next()
        .ok_or_else(|| DocumentRewriteError::RegionNotFound("document has no pages".to_string()))
}

/// Resources of `page_id`, following `Parent` links for inherited ones.
fn resolve_resources(doc: &Document, page_id: ObjectId) -> Option<Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    loop {
        if let Ok(resources) = node.get(b"Resources") {
            return Some(resources.clone());
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
}

fn dictionary_mut<'a>(
    doc: &'a mut Document,
    id: ObjectId,
) -> Result<&'a mut Dictionary, DocumentRewriteError> {
    doc.get_object_mut(id)
        .and_then(Object::as_dict_mut)
        .map_err(parse_err)
}

/// Register a Helvetica font under [`FONT_RESOURCE`] in the page resources.
fn install_font(doc: &mut Document, page_id: ObjectId) -> Result<(), DocumentRewriteError> {
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let resources = resolve_resources(doc, page_id).unwrap_or_else(|| Dictionary::new().into());
    let resources_id = match resources {
        Object::Reference(id) => id,
        other => doc.add_object(other),
    };
    dictionary_mut(doc, page_id)?.set("Resources", Object::Reference(resources_id));

    let resources = dictionary_mut(doc, resources_id)?;
    match resources.get(b"Font").cloned() {
        Ok(Object::Reference(fonts_id)) => {
            dictionary_mut(doc, fonts_id)?.set(FONT_RESOURCE, Object::Reference(font_id));
        }
        Ok(Object::Dictionary(mut fonts)) => {
            fonts.set(FONT_RESOURCE, Object::Reference(font_id));
            resources.set("Font", fonts);
        }
        _ => {
            let mut fonts = Dictionary::new();
            fonts.set(FONT_RESOURCE, Object::Reference(font_id));
            resources.set("Font", fonts);
        }
    }
    Ok(())
}

impl IdentifierStamper for PdfInvoiceRewriter {
    fn format(&self) -> &'static str {
        "pdf"
    }

    fn stamp(
        &self,
        document: &[u8],
        _local: &LocalOrderId,
        external: &ExternalOrderId,
    ) -> Result<Vec<u8>, DocumentRewriteError> {
        let mut doc = Document::load_mem(document).map_err(parse_err)?;
        let page_id = first_page(&doc)?;

        install_font(&mut doc, page_id)?;

        let stamp = Content {
            operations: self.stamp_operations(external),
        }
        .encode()
        .map_err(|e| DocumentRewriteError::Encode(e.to_string()))?;

        let mut tail = b"Q\n".to_vec();
        tail.extend_from_slice(&stamp);

        let save_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        let stamp_id = doc.add_object(Stream::new(Dictionary::new(), tail));

        let page = dictionary_mut(&mut doc, page_id)?;
        let mut contents = vec![Object::Reference(save_id)];
        match page.get(b"Contents").cloned() {
            Ok(Object::Array(streams)) => contents.extend(streams),
            Ok(stream) => contents.push(stream),
            Err(_) => {}
        }
        contents.push(Object::Reference(stamp_id));
        page.set("Contents", contents);

        let mut out = Vec::with_capacity(document.len() + 512);
        doc.save_to(&mut out)
            .map_err(|e| DocumentRewriteError::Encode(e.to_string()))?;
        Ok(out)
    }
}
