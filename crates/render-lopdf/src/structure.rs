//! The logical structure tree of a tagged PDF.
//!
//! Tags opened on the surface become structure elements; every drawing
//! primitive issued inside an element becomes one marked-content sequence whose
//! MCID is recorded both on the element (as a marked-content reference) and in
//! the page's ParentTree entry. Primitives inside an artifact tag are marked as
//! artifacts and never enter the tree.

use crate::helpers::text_string;
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use transcript_render_core::{ArtifactKind, RenderError, StructRole};

enum Kid {
    Element(usize),
    Content { page_id: ObjectId, mcid: i64 },
}

struct StructElement {
    id: ObjectId,
    role: StructRole,
    title: Option<String>,
    parent: Option<usize>,
    kids: Vec<Kid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenTag {
    Element(usize),
    Artifact(ArtifactKind),
}

/// How the next drawing primitive must be marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marking {
    Untagged,
    Artifact(ArtifactKind),
    Content { element: usize, role: StructRole },
}

#[derive(Default)]
pub(crate) struct StructureTree {
    elements: Vec<StructElement>,
    roots: Vec<usize>,
    stack: Vec<OpenTag>,
}

impl StructureTree {
    pub fn open(&mut self, document: &mut Document, role: StructRole, title: Option<&str>) {
        let current = self.stack.last().copied();
        let tag = match (role, current) {
            (StructRole::Artifact(kind), _) => OpenTag::Artifact(kind),
            // Everything nested in an artifact is an artifact too.
            (_, Some(OpenTag::Artifact(kind))) => OpenTag::Artifact(kind),
            (_, parent) => {
                let index = self.elements.len();
                let parent = match parent {
                    Some(OpenTag::Element(p)) => Some(p),
                    _ => None,
                };
                self.elements.push(StructElement {
                    id: document.new_object_id(),
                    role,
                    title: title.map(str::to_string),
                    parent,
                    kids: Vec::new(),
                });
                match parent {
                    Some(p) => self.elements[p].kids.push(Kid::Element(index)),
                    None => self.roots.push(index),
                }
                OpenTag::Element(index)
            }
        };
        self.stack.push(tag);
    }

    pub fn close(&mut self) -> Result<(), RenderError> {
        self.stack
            .pop()
            .map(|_| ())
            .ok_or_else(|| RenderError::UnbalancedTag("end_tag called with no open tag".to_string()))
    }

    pub fn open_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn marking(&self) -> Marking {
        match self.stack.last() {
            None => Marking::Untagged,
            Some(OpenTag::Artifact(kind)) => Marking::Artifact(*kind),
            Some(OpenTag::Element(index)) => Marking::Content {
                element: *index,
                role: self.elements[*index].role,
            },
        }
    }

    pub fn element_id(&self, element: usize) -> Option<ObjectId> {
        self.elements.get(element).map(|e| e.id)
    }

    /// Records that `mcid` on `page_id` belongs to `element`.
    pub fn add_content(&mut self, element: usize, page_id: ObjectId, mcid: i64) {
        if let Some(e) = self.elements.get_mut(element) {
            e.kids.push(Kid::Content { page_id, mcid });
        }
    }

    /// Writes every element and the StructTreeRoot, returning the root's id.
    ///
    /// `parent_tree` holds, per page (indexed by the page's StructParents key),
    /// the structure element owning each MCID on that page.
    pub fn write(self, document: &mut Document, parent_tree: &[Vec<ObjectId>]) -> ObjectId {
        let root_id = document.new_object_id();

        for element in &self.elements {
            let parent = match element.parent {
                Some(p) => self.elements[p].id,
                None => root_id,
            };
            let kids: Vec<Object> = element
                .kids
                .iter()
                .map(|kid| match kid {
                    Kid::Element(i) => Object::Reference(self.elements[*i].id),
                    Kid::Content { page_id, mcid } => Object::Dictionary(dictionary! {
                        "Type" => "MCR",
                        "Pg" => *page_id,
                        "MCID" => *mcid,
                    }),
                })
                .collect();
            let mut dict = dictionary! {
                "Type" => "StructElem",
                "S" => element.role.pdf_name(),
                "P" => parent,
                "K" => kids,
            };
            if let Some(title) = &element.title {
                dict.set("T", text_string(title));
            }
            document.objects.insert(element.id, Object::Dictionary(dict));
        }

        let mut nums = Vec::with_capacity(parent_tree.len() * 2);
        for (key, owners) in parent_tree.iter().enumerate() {
            nums.push(Object::Integer(key as i64));
            nums.push(Object::Array(
                owners.iter().map(|id| Object::Reference(*id)).collect(),
            ));
        }

        let root: Dictionary = dictionary! {
            "Type" => "StructTreeRoot",
            "K" => self.roots.iter().map(|i| Object::Reference(self.elements[*i].id)).collect::<Vec<Object>>(),
            "ParentTree" => dictionary! { "Nums" => nums },
            "ParentTreeNextKey" => parent_tree.len() as i64,
        };
        document.objects.insert(root_id, Object::Dictionary(root));
        root_id
    }
}
