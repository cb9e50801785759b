use serde::Serialize;

/// A byte code that either maps onto a known enum variant or is kept verbatim.
///
/// The container format is only partially understood, so decoders preserve
/// codes they cannot name instead of failing on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Coded<T> {
    Known(T),
    Unrecognized(u16),
}

impl<T: Copy> Coded<T> {
    /// Map `code` through `lookup`, falling back to [`Coded::Unrecognized`].
    pub fn from_code(code: u16, lookup: impl FnOnce(u16) -> Option<T>) -> Self {
        match lookup(code) {
            Some(known) => Self::Known(known),
            None => Self::Unrecognized(code),
        }
    }

    pub fn known(self) -> Option<T> {
        match self {
            Self::Known(known) => Some(known),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }
}
