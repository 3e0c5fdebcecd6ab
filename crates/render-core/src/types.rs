use transcript_types::Color;

/// Why a drawn region is an artifact rather than real content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Decorative layout such as row banding.
    Layout,
    /// Running page furniture such as headers and footers.
    Pagination,
}

impl ArtifactKind {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ArtifactKind::Layout => "Layout",
            ArtifactKind::Pagination => "Pagination",
        }
    }
}

/// The semantic role of a tagged region, used to build a screen-reader navigable structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructRole {
    Document,
    Section,
    Heading(u8),
    Paragraph,
    Table,
    TableRow,
    TableHeaderCell,
    TableDataCell,
    Artifact(ArtifactKind),
}

impl StructRole {
    /// The standard structure type name for this role.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            StructRole::Document => "Document",
            StructRole::Section => "Sect",
            StructRole::Heading(1) => "H1",
            StructRole::Heading(2) => "H2",
            StructRole::Heading(3) => "H3",
            StructRole::Heading(_) => "H",
            StructRole::Paragraph => "P",
            StructRole::Table => "Table",
            StructRole::TableRow => "TR",
            StructRole::TableHeaderCell => "TH",
            StructRole::TableDataCell => "TD",
            StructRole::Artifact(_) => "Artifact",
        }
    }

    pub fn is_artifact(&self) -> bool {
        matches!(self, StructRole::Artifact(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub weight: FontWeight,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font_size: f32, color: Color) -> Self {
        Self {
            font_size,
            weight: FontWeight::Regular,
            color,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }
}
