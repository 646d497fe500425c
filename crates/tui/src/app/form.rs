use engine::{Record, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Coffee,
    Books,
    Trips,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Coffee, FormField::Books, FormField::Trips];

    pub fn label(self) -> &'static str {
        match self {
            Self::Coffee => "Coffee",
            Self::Books => "Books",
            Self::Trips => "Trips",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Coffee => 0,
            Self::Books => 1,
            Self::Trips => 2,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Coffee => Self::Books,
            Self::Books => Self::Trips,
            Self::Trips => Self::Coffee,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Coffee => Self::Trips,
            Self::Books => Self::Coffee,
            Self::Trips => Self::Books,
        }
    }
}

/// Record being edited: its id and the fixed creation date shown in the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub id: RecordId,
    pub date: String,
}

/// Text typed into the entry form. Values stay raw until submit so the
/// engine does the parsing.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: [String; 3],
    pub focus: FormField,
    pub editing: Option<EditTarget>,
    pub error: Option<String>,
}

impl FormState {
    pub fn new_entry() -> Self {
        Self::default()
    }

    /// Prefilled with the record's current values.
    pub fn for_record(record: &Record) -> Self {
        Self {
            values: [
                record.coffee().to_string(),
                record.books().to_string(),
                record.trips().to_string(),
            ],
            focus: FormField::Coffee,
            editing: Some(EditTarget {
                id: record.id(),
                date: record.date().to_string(),
            }),
            error: None,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    pub fn title(&self) -> String {
        match &self.editing {
            Some(target) => format!("Edit entry of {}", target.date),
            None => "New entry".to_string(),
        }
    }

    /// Accept characters that can appear in a number; everything else is
    /// dropped.
    pub fn input(&mut self, ch: char) {
        if ch.is_ascii_digit() || matches!(ch, '.' | ',' | '-' | '+') {
            self.values[self.focus.index()].push(ch);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        self.values[self.focus.index()].pop();
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }
}
