use lopdf::{Dictionary, Document as LopdfDocument, Object};

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Occurrences of `needle` on each page, in page order.
pub fn occurrences_per_page(doc: &LopdfDocument, needle: &str) -> Vec<usize> {
    doc.get_pages()
        .keys()
        .map(|page| {
            doc.extract_text(&[*page])
                .map(|t| t.matches(needle).count())
                .unwrap_or(0)
        })
        .collect()
}

fn resolve_dict<'a>(doc: &'a LopdfDocument, object: &'a Object) -> Option<&'a Dictionary> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// URIs of every link annotation, in page order.
pub fn extract_link_uris(doc: &LopdfDocument) -> Vec<String> {
    let mut uris = Vec::new();
    for page_id in doc.get_pages().values() {
        let Ok(page) = doc.get_dictionary(*page_id) else {
            continue;
        };
        let Ok(annots) = page.get(b"Annots").and_then(Object::as_array) else {
            continue;
        };
        for annot in annots {
            let Some(annot) = resolve_dict(doc, annot) else {
                continue;
            };
            let uri = annot
                .get(b"A")
                .ok()
                .and_then(|a| resolve_dict(doc, a))
                .and_then(|action| action.get(b"URI").ok())
                .and_then(|uri| uri.as_str().ok())
                .map(|bytes| String::from_utf8_lossy(bytes).to_string());
            if let Some(uri) = uri {
                uris.push(uri);
            }
        }
    }
    uris
}

/// Structure types (`S` entries) of every structure element reachable from the StructTreeRoot.
pub fn structure_types(doc: &LopdfDocument) -> Vec<String> {
    let mut types = Vec::new();
    let Ok(catalog) = doc.catalog() else {
        return types;
    };
    let Some(root) = catalog
        .get(b"StructTreeRoot")
        .ok()
        .and_then(|r| resolve_dict(doc, r))
    else {
        return types;
    };

    let mut pending: Vec<&Object> = root
        .get(b"K")
        .and_then(Object::as_array)
        .map(|kids| kids.iter().collect())
        .unwrap_or_default();
    while let Some(kid) = pending.pop() {
        let Some(element) = resolve_dict(doc, kid) else {
            continue;
        };
        if let Ok(name) = element.get(b"S").and_then(Object::as_name) {
            types.push(String::from_utf8_lossy(name).to_string());
        }
        if let Ok(kids) = element.get(b"K").and_then(Object::as_array) {
            pending.extend(kids.iter().filter(|k| matches!(k, Object::Reference(_))));
        }
    }
    types
}

pub fn is_marked(doc: &LopdfDocument) -> bool {
    doc.catalog()
        .ok()
        .and_then(|c| c.get(b"MarkInfo").ok())
        .and_then(|m| resolve_dict(doc, m))
        .and_then(|m| m.get(b"Marked").ok())
        .and_then(|m| m.as_bool().ok())
        .unwrap_or(false)
}

pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let page_id = *doc.get_pages().get(&page_num)?;
    let page = doc.get_dictionary(page_id).ok()?;
    let media_box = page.get(b"MediaBox").ok()?.as_array().ok()?;
    if media_box.len() < 4 {
        return None;
    }
    Some((media_box[2].as_float().ok()?, media_box[3].as_float().ok()?))
}
