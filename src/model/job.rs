use std::fmt::Display;

/// Line that marks the end of a job's content.
pub const TERMINATOR: &str = "<FIN>";

/// A single print request: the file's base name and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    pub filename: String,
    pub content: String,
}

impl PrintJob {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Number of characters in the content, line breaks included.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// The lines a client puts on the wire for this job, sentinel included.
    pub fn wire_lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.filename.as_str())
            .chain(self.content.lines())
            .chain(std::iter::once(TERMINATOR))
    }
}

impl Display for PrintJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [chars={}]", self.filename, self.char_count())
    }
}
