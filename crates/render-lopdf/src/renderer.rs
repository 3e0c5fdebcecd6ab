use crate::helpers::{pdf_date, text_string, to_win_ansi};
use crate::structure::{Marking, StructureTree};
use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::io::Write;
use transcript_render_core::utils::styled_width;
use transcript_render_core::{DrawingSurface, FontWeight, RenderError, StructRole, TextStyle};
use transcript_types::{Color, Point, Rect, Size};

/// Fraction of the font size between the top of a line box and its baseline.
const ASCENT: f32 = 0.8;
const DESCENT: f32 = 0.2;

/// Document-level metadata written to the Info dictionary and the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub author: Option<String>,
    pub creator: String,
    pub lang: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: "Transcript".to_string(),
            author: None,
            creator: "skilltree-transcript".to_string(),
            lang: "en-US".to_string(),
        }
    }
}

struct PageBuffer {
    id: ObjectId,
    operations: Vec<Operation>,
    annotations: Vec<ObjectId>,
    /// Structure element owning each MCID on this page, indexed by MCID.
    mcid_owners: Vec<ObjectId>,
}

/// An in-memory tagged PDF built with `lopdf`.
///
/// Pages are written into the document as soon as the next page starts; the
/// catalog, structure tree and Info dictionary are written by `finish`.
pub struct LopdfSurface {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_size: Size,
    page_ids: Vec<ObjectId>,
    parent_tree: Vec<Vec<ObjectId>>,
    current: Option<PageBuffer>,
    structure: StructureTree,
    info: DocumentInfo,
}

impl LopdfSurface {
    pub fn new(page_size: Size, info: DocumentInfo) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();

        Self {
            document,
            pages_id,
            resources_id,
            page_size,
            page_ids: Vec::new(),
            parent_tree: Vec::new(),
            current: None,
            structure: StructureTree::default(),
            info,
        }
    }

    /// Completes the document and writes it to `writer`.
    pub fn finish<W: Write>(mut self, mut writer: W) -> Result<W, RenderError> {
        self.flush_page()?;
        if self.page_ids.is_empty() {
            return Err(RenderError::NoPage);
        }
        if self.structure.open_depth() > 0 {
            return Err(RenderError::UnbalancedTag(format!(
                "{} tags still open at end of document",
                self.structure.open_depth()
            )));
        }

        let regular_id = self.document.add_object(dictionary! {
            "Type" => "Font", "Subtype" => "Type1", "BaseFont" => "Helvetica", "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = self.document.add_object(dictionary! {
            "Type" => "Font", "Subtype" => "Type1", "BaseFont" => "Helvetica-Bold", "Encoding" => "WinAnsiEncoding",
        });
        self.document.objects.insert(
            self.resources_id,
            Object::Dictionary(dictionary! {
                "Font" => dictionary! { "F1" => regular_id, "F2" => bold_id },
            }),
        );

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.page_ids.len() as i64,
            }),
        );

        let structure = std::mem::take(&mut self.structure);
        let struct_root_id = structure.write(&mut self.document, &self.parent_tree);

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
            "StructTreeRoot" => struct_root_id,
            "MarkInfo" => dictionary! { "Marked" => true },
            "Lang" => text_string(&self.info.lang),
            "ViewerPreferences" => dictionary! { "DisplayDocTitle" => true },
        });
        self.document.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Title" => text_string(&self.info.title),
            "Creator" => text_string(&self.info.creator),
            "Producer" => Object::string_literal("lopdf"),
            "CreationDate" => Object::string_literal(pdf_date(Utc::now())),
        };
        if let Some(author) = &self.info.author {
            info.set("Author", text_string(author));
        }
        let info_id = self.document.add_object(info);
        self.document.trailer.set("Info", info_id);

        log::debug!(
            "[LOPDF] Writing tagged PDF with {} pages.",
            self.page_ids.len()
        );
        self.document.save_to(&mut writer)?;
        Ok(writer)
    }

    /// `finish` into an in-memory buffer.
    pub fn finish_to_vec(self) -> Result<Vec<u8>, RenderError> {
        self.finish(Vec::new())
    }

    fn flush_page(&mut self) -> Result<(), RenderError> {
        let Some(page) = self.current.take() else {
            return Ok(());
        };

        let content = Content {
            operations: page.operations,
        };
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! {}, content.encode()?));

        let struct_parents = self.parent_tree.len() as i64;
        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.page_size.width.into(), self.page_size.height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
            "StructParents" => struct_parents,
            "Tabs" => "S",
        };
        if !page.annotations.is_empty() {
            page_dict.set(
                "Annots",
                Object::Array(page.annotations.into_iter().map(Object::Reference).collect()),
            );
        }
        self.document
            .objects
            .insert(page.id, Object::Dictionary(page_dict));
        self.page_ids.push(page.id);
        self.parent_tree.push(page.mcid_owners);
        Ok(())
    }

    /// Appends `body` to the current page, wrapped in the marked-content
    /// sequence required by the innermost open tag.
    fn emit(&mut self, body: Vec<Operation>) -> Result<(), RenderError> {
        let marking = self.structure.marking();
        let page = self.current.as_mut().ok_or(RenderError::NoPage)?;

        match marking {
            Marking::Untagged => page.operations.extend(body),
            Marking::Artifact(kind) => {
                page.operations.push(Operation::new(
                    "BDC",
                    vec![
                        Object::Name(b"Artifact".to_vec()),
                        Object::Dictionary(dictionary! { "Type" => kind.pdf_name() }),
                    ],
                ));
                page.operations.extend(body);
                page.operations.push(Operation::new("EMC", vec![]));
            }
            Marking::Content { element, role } => {
                let owner = self.structure.element_id(element).ok_or_else(|| {
                    RenderError::Pdf(format!("unknown structure element {}", element))
                })?;
                let mcid = page.mcid_owners.len() as i64;
                page.mcid_owners.push(owner);
                page.operations.push(Operation::new(
                    "BDC",
                    vec![
                        Object::Name(role.pdf_name().as_bytes().to_vec()),
                        Object::Dictionary(dictionary! { "MCID" => mcid }),
                    ],
                ));
                page.operations.extend(body);
                page.operations.push(Operation::new("EMC", vec![]));
                let page_id = page.id;
                self.structure.add_content(element, page_id, mcid);
            }
        }
        Ok(())
    }

    fn add_link(&mut self, uri: &str, rect: [f32; 4]) -> Result<(), RenderError> {
        if self.current.is_none() {
            return Err(RenderError::NoPage);
        }
        let action_id = self.document.add_object(dictionary! {
            "Type" => "Action",
            "S" => "URI",
            "URI" => Object::string_literal(uri),
        });
        let annot_id = self.document.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => rect.iter().map(|v| Object::from(*v)).collect::<Vec<Object>>(),
            "Border" => vec![0.into(), 0.into(), 0.into()],
            "A" => action_id,
        });
        if let Some(page) = self.current.as_mut() {
            page.annotations.push(annot_id);
        }
        Ok(())
    }
}

fn fill_color(color: Color) -> Operation {
    let [r, g, b] = color.to_unit_rgb();
    Operation::new("rg", vec![r.into(), g.into(), b.into()])
}

impl DrawingSurface for LopdfSurface {
    fn page_size(&self) -> Size {
        self.page_size
    }

    fn begin_page(&mut self) -> Result<(), RenderError> {
        self.flush_page()?;
        self.current = Some(PageBuffer {
            id: self.document.new_object_id(),
            operations: Vec::new(),
            annotations: Vec::new(),
            mcid_owners: Vec::new(),
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        let y = self.page_size.height - rect.bottom();
        self.emit(vec![
            fill_color(color),
            Operation::new(
                "re",
                vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()],
            ),
            Operation::new("f", vec![]),
        ])
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &TextStyle,
        link: Option<&str>,
    ) -> Result<(), RenderError> {
        let font = match style.weight {
            FontWeight::Regular => "F1",
            FontWeight::Bold => "F2",
        };
        let baseline = self.page_size.height - (origin.y + style.font_size * ASCENT);
        self.emit(vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(font.as_bytes().to_vec()), style.font_size.into()],
            ),
            fill_color(style.color),
            Operation::new("Td", vec![origin.x.into(), baseline.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ])?;

        if let Some(uri) = link {
            let width = styled_width(text, style);
            self.add_link(
                uri,
                [
                    origin.x,
                    baseline - style.font_size * DESCENT,
                    origin.x + width,
                    baseline + style.font_size * ASCENT,
                ],
            )?;
        }
        Ok(())
    }

    fn begin_tag(&mut self, role: StructRole, title: Option<&str>) -> Result<(), RenderError> {
        self.structure.open(&mut self.document, role, title);
        Ok(())
    }

    fn end_tag(&mut self) -> Result<(), RenderError> {
        self.structure.close()
    }

    fn page_count(&self) -> usize {
        self.page_ids.len() + usize::from(self.current.is_some())
    }
}
