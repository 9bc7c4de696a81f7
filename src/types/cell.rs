use serde_json::Value;

/// A value written into one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    /// A styled cell with no value.
    Empty,
}

impl CellValue {
    /// Map a JSON scalar onto a cell. Arrays and objects become compact JSON text.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n
                .as_f64()
                .map_or_else(|| Self::Text(n.to_string()), Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Text(value.to_string()),
        }
    }

    /// Text shown for the value, as used by the in-memory grid and tests.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Bool(true) => "TRUE".to_string(),
            Self::Bool(false) => "FALSE".to_string(),
            Self::Empty => String::new(),
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u64> for CellValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: u64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Presentation category requested for a write; the sink resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleCategory {
    /// No formatting.
    #[default]
    Plain,
    /// Bold, right-aligned captions.
    Label,
    /// Centered series values on a tinted, bordered background.
    Data,
    /// Bordered cells on a green background, for solutions.
    Highlight,
}

impl StyleCategory {
    /// All categories, in `cellXfs` order.
    pub const ALL: [StyleCategory; 4] = [Self::Plain, Self::Label, Self::Data, Self::Highlight];

    /// Index of the category in the generated `cellXfs` table.
    #[must_use]
    pub fn xf_index(self) -> u32 {
        match self {
            Self::Plain => 0,
            Self::Label => 1,
            Self::Data => 2,
            Self::Highlight => 3,
        }
    }
}
