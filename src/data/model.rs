use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single table cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring what the loaders can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for statistics and colouring.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

// ---------------------------------------------------------------------------
// GroupKey – identifies the statistical group of a row
// ---------------------------------------------------------------------------

/// One label value as it takes part in a group key.
///
/// Unlike [`CellValue`]'s display text this is lossless: floats compare by
/// their bits, and the variant keeps `1` apart from `"1"` and `Null` apart
/// from `""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyPart {
    Null,
    Bool(bool),
    Integer(i64),
    Float(u64),
    Text(String),
}

impl KeyPart {
    pub fn float(v: f64) -> Self {
        // -0.0 and 0.0 label the same group
        let v = if v == 0.0 { 0.0 } else { v };
        KeyPart::Float(v.to_bits())
    }
}

impl From<&CellValue> for KeyPart {
    fn from(value: &CellValue) -> Self {
        match value {
            CellValue::String(s) => KeyPart::Text(s.clone()),
            CellValue::Integer(i) => KeyPart::Integer(*i),
            CellValue::Float(v) => KeyPart::float(*v),
            CellValue::Bool(b) => KeyPart::Bool(*b),
            CellValue::Null => KeyPart::Null,
        }
    }
}

impl From<&str> for KeyPart {
    fn from(s: &str) -> Self {
        KeyPart::Text(s.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(s: String) -> Self {
        KeyPart::Text(s)
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Null => Ok(()),
            KeyPart::Bool(b) => write!(f, "{b}"),
            KeyPart::Integer(i) => write!(f, "{i}"),
            KeyPart::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            KeyPart::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Composite key built from a row's label columns.
///
/// Components are kept separate so that `("ab", "c")` and `("a", "bc")`
/// stay distinct groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(Vec<KeyPart>);

impl GroupKey {
    pub fn new<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<KeyPart>,
    {
        GroupKey(parts.into_iter().map(Into::into).collect())
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// The label values concatenated without a separator.
    pub fn joined(&self) -> String {
        self.0.iter().map(KeyPart::to_string).collect()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(KeyPart::to_string).collect();
        write!(f, "({})", parts.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Row – one line of the table
// ---------------------------------------------------------------------------

/// A single row. Values are aligned with [`Dataset::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<CellValue>,
}

impl Row {
    pub fn new(values: Vec<CellValue>) -> Self {
        Row { values }
    }

    /// Key formed from the first `label_columns` values.
    pub fn group_key(&self, label_columns: usize) -> GroupKey {
        GroupKey::new(
            self.values
                .iter()
                .take(label_columns)
                .map(KeyPart::from),
        )
    }

    /// Numeric measurements after the label columns; non-numeric cells are skipped.
    pub fn measurements(&self, label_columns: usize) -> Vec<f64> {
        self.values
            .iter()
            .skip(label_columns)
            .filter_map(CellValue::as_f64)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// All rows, each padded to `columns.len()`.
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, padding short rows with `Null`.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.values.len() < width {
                    row.values.resize(width, CellValue::Null);
                }
                row
            })
            .collect();
        Dataset { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
