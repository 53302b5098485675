use crate::DocumentError;
use crate::composition::CompositionPayload;
use carelabel_style::{
    Alignment, BreakSymbol, Length, LineBreakConfig, OverflowOption, Padding, Typography,
};
use carelabel_types::{BlockId, Size};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Placement rules of a block inside its region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockLayout {
    #[serde(default = "default_true")]
    pub full_width: bool,
    #[serde(default = "default_true")]
    pub full_height: bool,
    #[serde(default = "Length::full")]
    pub width: Length,
    #[serde(default = "Length::full")]
    pub height: Length,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub padding: Padding,
}

impl Default for BlockLayout {
    fn default() -> Self {
        Self {
            full_width: true,
            full_height: true,
            width: Length::full(),
            height: Length::full(),
            alignment: Alignment::default(),
            padding: Padding::default(),
        }
    }
}

impl BlockLayout {
    /// A layout with explicit width and height rules.
    pub fn sized(width: Length, height: Length) -> Self {
        Self {
            full_width: false,
            full_height: false,
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Resolves the block's outer size in mm; full flags force 100% of the region.
    pub fn resolve_size(&self, region: Size) -> Size {
        let width = if self.full_width {
            region.width
        } else {
            self.width.resolve(region.width)
        };
        let height = if self.full_height {
            region.height
        } else {
            self.height.resolve(region.height)
        };
        Size::new(width, height)
    }

    pub fn validate(&self) -> Result<(), DocumentError> {
        if !self.full_width {
            self.width.validate("width")?;
        }
        if !self.full_height {
            self.height.validate("height")?;
        }
        self.padding.validate()?;
        Ok(())
    }
}

/// Text payload shared by the single-line and multi-line block kinds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextPayload {
    pub text: String,
    /// The text already carries its final line breaks and must not be re-wrapped.
    #[serde(default, rename = "isPreWrapped", skip_serializing_if = "is_false")]
    pub pre_wrapped: bool,
    /// Wrapped lines committed by the last save.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,
}

impl TextPayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// A payload whose lines are final, joined into `text` with `symbol`.
    pub fn pre_wrapped(lines: Vec<String>, symbol: &BreakSymbol) -> Self {
        Self {
            text: symbol.join(&lines),
            pre_wrapped: true,
            lines,
        }
    }
}

/// The closed set of content kinds a region can host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentKind {
    SingleLine(TextPayload),
    MultiLine(TextPayload),
    Composition(CompositionPayload),
}

impl ContentKind {
    pub fn kind(&self) -> &'static str {
        match self {
            ContentKind::SingleLine(_) => "single-line",
            ContentKind::MultiLine(_) => "multi-line",
            ContentKind::Composition(_) => "composition",
        }
    }

    /// The raw text to lay out, with composition entries rendered as text.
    pub fn source_text(&self, symbol: &BreakSymbol) -> String {
        match self {
            ContentKind::SingleLine(p) | ContentKind::MultiLine(p) => p.text.clone(),
            ContentKind::Composition(c) => c.text(symbol),
        }
    }

    pub fn is_pre_wrapped(&self) -> bool {
        match self {
            ContentKind::SingleLine(p) | ContentKind::MultiLine(p) => p.pre_wrapped,
            ContentKind::Composition(_) => false,
        }
    }

    pub fn lines(&self) -> &[String] {
        match self {
            ContentKind::SingleLine(p) | ContentKind::MultiLine(p) => &p.lines,
            ContentKind::Composition(c) => &c.lines,
        }
    }

    pub fn set_lines(&mut self, lines: Vec<String>) {
        match self {
            ContentKind::SingleLine(p) | ContentKind::MultiLine(p) => p.lines = lines,
            ContentKind::Composition(c) => c.lines = lines,
        }
    }

    /// Keeps only `lines`: text payloads are rewritten to them, compositions
    /// keep their materials and store the lines.
    pub fn retain_lines(&mut self, lines: Vec<String>, symbol: &BreakSymbol) {
        match self {
            ContentKind::SingleLine(p) | ContentKind::MultiLine(p) => {
                p.text = symbol.join(&lines);
                p.lines = lines;
            }
            ContentKind::Composition(c) => c.lines = lines,
        }
    }

    /// The payload a continuation block carries after a split: same text kind,
    /// pre-wrapped. Compositions continue as multi-line text.
    pub fn continuation(&self, lines: Vec<String>, symbol: &BreakSymbol) -> ContentKind {
        let payload = TextPayload::pre_wrapped(lines, symbol);
        match self {
            ContentKind::SingleLine(_) => ContentKind::SingleLine(payload),
            ContentKind::MultiLine(_) | ContentKind::Composition(_) => {
                ContentKind::MultiLine(payload)
            }
        }
    }
}

/// One placed, typed piece of content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub id: BlockId,
    #[serde(default)]
    pub layout: BlockLayout,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default)]
    pub line_break: LineBreakConfig,
    #[serde(default)]
    pub overflow_option: OverflowOption,
    #[serde(flatten)]
    pub content: ContentKind,
}

impl ContentBlock {
    pub fn new(content: ContentKind) -> Self {
        Self {
            id: BlockId::generate(),
            layout: BlockLayout::default(),
            typography: Typography::default(),
            line_break: LineBreakConfig::default(),
            overflow_option: OverflowOption::default(),
            content,
        }
    }

    pub fn multi_line(text: impl Into<String>) -> Self {
        Self::new(ContentKind::MultiLine(TextPayload::new(text)))
    }

    pub fn single_line(text: impl Into<String>) -> Self {
        Self::new(ContentKind::SingleLine(TextPayload::new(text)))
    }

    pub fn composition(payload: CompositionPayload) -> Self {
        Self::new(ContentKind::Composition(payload))
    }

    pub fn with_layout(mut self, layout: BlockLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_typography(mut self, typography: Typography) -> Self {
        self.typography = typography;
        self
    }

    pub fn with_line_break(mut self, line_break: LineBreakConfig) -> Self {
        self.line_break = line_break;
        self
    }

    pub fn with_overflow(mut self, option: OverflowOption) -> Self {
        self.overflow_option = option;
        self
    }

    pub fn source_text(&self) -> String {
        self.content.source_text(&self.line_break.symbol)
    }

    /// Dialog-boundary validation; nothing invalid reaches the layout engine.
    pub fn validate(&self) -> Result<(), DocumentError> {
        self.layout.validate()?;
        self.typography.validate()?;
        self.line_break.validate()?;
        if let ContentKind::Composition(c) = &self.content {
            c.validate()?;
        }
        Ok(())
    }

    /// A continuation of this block carrying `lines`, with a fresh id and the
    /// same layout, typography and line-break configuration.
    pub fn continuation(&self, lines: Vec<String>) -> ContentBlock {
        ContentBlock {
            id: BlockId::generate(),
            content: self.content.continuation(lines, &self.line_break.symbol),
            ..self.clone()
        }
    }
}
