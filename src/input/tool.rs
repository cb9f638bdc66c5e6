//! Tool selection and the palettes offered to the user.

use crate::draw::AnnotationKind;

/// Annotation tool selection.
///
/// The active tool determines what happens on the next pointer interaction:
/// markers are placed on release, shapes are dragged out, text opens an entry
/// box, and `Move` drags existing annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Power socket marker (single click)
    Socket,
    /// Light switch marker (single click)
    Switch,
    /// Network outlet marker (single click)
    Lan,
    /// TV outlet marker (single click)
    Tv,
    /// Text label (click to place, then type)
    Text,
    /// Straight line (drag)
    Line,
    /// Arrow with filled head at the release point (drag)
    Arrow,
    /// Rectangle outline (drag)
    Frame,
    /// Drag existing annotations
    Move,
}

const ELECTRICS_TOOLS: [Tool; 9] = [
    Tool::Socket,
    Tool::Switch,
    Tool::Lan,
    Tool::Tv,
    Tool::Text,
    Tool::Line,
    Tool::Arrow,
    Tool::Frame,
    Tool::Move,
];

const ANNOTATE_TOOLS: [Tool; 5] = [Tool::Text, Tool::Line, Tool::Arrow, Tool::Frame, Tool::Move];

impl Tool {
    /// Button label shown in the tool palette.
    pub fn label(self) -> &'static str {
        match self {
            Tool::Socket => "Розетка",
            Tool::Switch => "Выключатель",
            Tool::Lan => "Интернет",
            Tool::Tv => "ТВ",
            Tool::Text => "Текст",
            Tool::Line => "Линия",
            Tool::Arrow => "Стрелка",
            Tool::Frame => "Рамка",
            Tool::Move => "Переместить",
        }
    }

    /// Swatch color of the tool button, as `#rrggbb`.
    pub fn color(self) -> &'static str {
        match self.annotation_kind() {
            Some(kind) => crate::draw::style::kind_color_hex(kind),
            None => "#64748b",
        }
    }

    /// The annotation kind this tool creates; `None` for `Move`.
    pub fn annotation_kind(self) -> Option<AnnotationKind> {
        match self {
            Tool::Socket => Some(AnnotationKind::Socket),
            Tool::Switch => Some(AnnotationKind::Switch),
            Tool::Lan => Some(AnnotationKind::Lan),
            Tool::Tv => Some(AnnotationKind::Tv),
            Tool::Text => Some(AnnotationKind::Text),
            Tool::Line => Some(AnnotationKind::Line),
            Tool::Arrow => Some(AnnotationKind::Arrow),
            Tool::Frame => Some(AnnotationKind::Frame),
            Tool::Move => None,
        }
    }

    /// Icon markers are placed with a single click.
    pub fn is_marker(self) -> bool {
        self.annotation_kind().is_some_and(AnnotationKind::is_marker)
    }

    /// Shapes are dragged out from a start point.
    pub fn is_shape(self) -> bool {
        matches!(self, Tool::Line | Tool::Arrow | Tool::Frame)
    }

    /// Whether the color picker applies to this tool.
    pub fn shows_color_picker(self) -> bool {
        matches!(self, Tool::Text | Tool::Line | Tool::Arrow | Tool::Frame)
    }

    /// Whether the font size picker applies to this tool.
    pub fn shows_size_picker(self) -> bool {
        self == Tool::Text
    }
}

/// Which set of tools the editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteMode {
    /// Electrical markers followed by the general annotation tools
    #[default]
    Electrics,
    /// General annotation tools only
    Annotate,
}

impl PaletteMode {
    /// Tools in display order.
    pub fn tools(self) -> &'static [Tool] {
        match self {
            PaletteMode::Electrics => &ELECTRICS_TOOLS,
            PaletteMode::Annotate => &ANNOTATE_TOOLS,
        }
    }

    pub fn contains(self, tool: Tool) -> bool {
        self.tools().contains(&tool)
    }
}

impl std::str::FromStr for PaletteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "electrics" => Ok(PaletteMode::Electrics),
            "annotate" => Ok(PaletteMode::Annotate),
            other => Err(format!(
                "Unknown palette mode '{other}' (expected 'electrics' or 'annotate')"
            )),
        }
    }
}

/// Preset label sizes offered by the size picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [FontSize::Small, FontSize::Medium, FontSize::Large];

    pub fn pixels(self) -> f64 {
        match self {
            FontSize::Small => 24.0,
            FontSize::Medium => 32.0,
            FontSize::Large => 48.0,
        }
    }
}
