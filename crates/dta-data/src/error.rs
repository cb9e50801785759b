use crate::section::SectionTag;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected end of data at offset {offset} (wanted {wanted} bytes, {remaining} left)")]
    UnexpectedEof {
        offset: usize,
        wanted: usize,
        remaining: usize,
    },
    #[error("unknown section tag {tag:?} at offset {offset}")]
    UnknownSectionTag { tag: String, offset: usize },
    #[error("unknown {field} value {value} at offset {offset}")]
    UnknownFieldValue {
        field: &'static str,
        value: u32,
        offset: usize,
    },
    #[error("malformed {what} count {count} at offset {offset}")]
    MalformedRecordCount {
        what: &'static str,
        count: usize,
        offset: usize,
    },
    #[error("malformed {what} length {length} at offset {offset}")]
    MalformedLength {
        what: &'static str,
        length: usize,
        offset: usize,
    },
    #[error("expected magic {expected:?}, found {found:?} at offset {offset}")]
    BadMagic {
        expected: String,
        found: String,
        offset: usize,
    },
    #[error("{tag} section at offset {offset}: {source}")]
    Section {
        tag: SectionTag,
        offset: usize,
        #[source]
        source: Box<DecodeError>,
    },
    #[error("reading container: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// The failure underneath any section context.
    pub fn innermost(&self) -> &DecodeError {
        match self {
            Self::Section { source, .. } => source.innermost(),
            other => other,
        }
    }

    /// Tag of the section the failure happened in, if it happened inside one.
    pub fn section(&self) -> Option<SectionTag> {
        match self {
            Self::Section { tag, .. } => Some(*tag),
            _ => None,
        }
    }

    pub(crate) fn in_section(self, tag: SectionTag, offset: usize) -> Self {
        Self::Section {
            tag,
            offset,
            source: Box::new(self),
        }
    }
}
