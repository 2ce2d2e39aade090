//! Error blocks shown to the user when a run halts
//!
//! Which fields are shown depends only on the error kind.

use super::stage::Stage;
use crate::error::{ErrorKind, Field, ScaffoldError};
use std::fmt;

/// Fields displayed for each kind of error
pub const fn visible_fields(kind: ErrorKind) -> &'static [Field] {
    match kind {
        ErrorKind::Environment => &[Field::Message],
        ErrorKind::Network => &[Field::Code, Field::Syscall, Field::Message],
        ErrorKind::Filesystem => &[Field::Code, Field::Message],
        ErrorKind::Setup => &[Field::ExitCode, Field::ShortMessage],
        ErrorKind::InputAborted => &[Field::Message],
    }
}

/// Formatted view of a halting error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub stage: Stage,
    pub kind: ErrorKind,
    /// Visible fields that have a value, in policy order
    pub fields: Vec<(Field, String)>,
}

impl ErrorReport {
    pub fn new(stage: Stage, error: &ScaffoldError) -> Self {
        let kind = error.kind();
        let fields = visible_fields(kind)
            .iter()
            .filter_map(|field| error.field(*field).map(|value| (*field, value)))
            .collect();
        Self {
            stage,
            kind,
            fields,
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(f, _)| f.label()).collect()
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (halted at {})", self.kind, self.stage)?;
        for (field, value) in &self.fields {
            let mut lines = value.lines();
            write!(f, "\n  {}: {}", field.label(), lines.next().unwrap_or(""))?;
            for line in lines {
                write!(f, "\n    {}", line)?;
            }
        }
        Ok(())
    }
}
