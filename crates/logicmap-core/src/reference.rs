//! Bibliographic references owned by nodes.
//!
//! A [`Reference`] is one bibliography entry: a required link (URL or DOI),
//! an optional title, an optional attached file, and a free-text note. The
//! "link must not be empty" rule is enforced at the store boundary, not
//! here, so that documents written by older versions can still be loaded
//! as-is.

use crate::identifier::Id;

/// A single bibliographic entry attached to a node.
///
/// References keep their insertion order within a node; the id only serves
/// to address an entry for update or removal.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    id: Id,
    title: String,
    link: String,
    file: Option<String>,
    note: String,
}

impl Reference {
    /// Creates a new reference with a fresh id and the given link.
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            id: Id::generate(),
            title: String::new(),
            link: link.into(),
            file: None,
            note: String::new(),
        }
    }

    /// Reconstructs a reference with a known id, as stored in a document.
    pub fn with_id(
        id: Id,
        title: impl Into<String>,
        link: impl Into<String>,
        file: Option<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            link: link.into(),
            file,
            note: note.into(),
        }
    }

    /// Sets the title, returning the modified reference.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the note, returning the modified reference.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Returns the reference id.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the title; may be empty.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the link (URL or DOI).
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Returns the stored attachment file name, if any.
    ///
    /// The name is relative; it resolves under the owning node's attachment
    /// directory.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Returns the free-text note; may be empty.
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the link.
    pub fn set_link(&mut self, link: impl Into<String>) {
        self.link = link.into();
    }

    /// Records the attachment file name, or clears it with `None`.
    pub fn set_file(&mut self, file: Option<String>) {
        self.file = file;
    }

    /// Replaces the note.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Returns the title if present, or a placeholder for display lists.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(No Title)"
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reference() {
        let reference = Reference::new("https://doi.org/10.1000/demo");

        assert_eq!(reference.link(), "https://doi.org/10.1000/demo");
        assert_eq!(reference.title(), "");
        assert_eq!(reference.note(), "");
        assert_eq!(reference.file(), None);
    }

    #[test]
    fn test_builder_style_fields() {
        let reference = Reference::new("doi:10.1/x")
            .with_title("A Survey")
            .with_note("chapter 3 is relevant");

        assert_eq!(reference.title(), "A Survey");
        assert_eq!(reference.note(), "chapter 3 is relevant");
    }

    #[test]
    fn test_with_id_preserves_identity() {
        let id = Id::new("ref-1");
        let reference =
            Reference::with_id(id, "T", "L", Some("paper.pdf".to_string()), "N");

        assert_eq!(reference.id(), id);
        assert_eq!(reference.file(), Some("paper.pdf"));
    }

    #[test]
    fn test_display_title_placeholder() {
        let untitled = Reference::new("doi:1");
        assert_eq!(untitled.display_title(), "(No Title)");

        let titled = Reference::new("doi:1").with_title("Named");
        assert_eq!(titled.display_title(), "Named");
    }
}
