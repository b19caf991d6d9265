use kenari_ir::DefRef;
use std::fmt::Display;

/// Fatal internal-consistency failure: the declaration tree handed to this
/// crate violated its contract. Never retried; the whole serialization
/// request fails.
#[derive(Debug)]
pub struct LinkageError<'a> {
    pub def: DefRef<'a>,
    pub kind: LinkageErrorKind,
}

impl<'a> LinkageError<'a> {
    pub fn new(def: DefRef<'a>, kind: LinkageErrorKind) -> Self {
        Self { def, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkageErrorKind {
    UnexpectedClassifier,
    TypeParameterOutOfScope,
    UnexpectedTypeParameterParent,
    MissingSignature,
    UnresolvedAccessorProperty,
}

impl Display for LinkageError<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let def = self.def;
        match self.kind {
            LinkageErrorKind::UnexpectedClassifier => write!(
                f,
                "Type refers to {} {}, which is neither a class nor a type parameter",
                def.kind.label(),
                def.name
            ),
            LinkageErrorKind::TypeParameterOutOfScope => write!(
                f,
                "Type parameter {} is not in scope of the declaration being mangled",
                def.name
            ),
            LinkageErrorKind::UnexpectedTypeParameterParent => {
                write!(f, "Type parameter {} is not owned by a declaration", def.name)
            }
            LinkageErrorKind::MissingSignature => {
                write!(f, "Function {} has no signature", def.name)
            }
            LinkageErrorKind::UnresolvedAccessorProperty => {
                write!(f, "Accessor {} has no resolvable property", def.name)
            }
        }
    }
}

impl std::error::Error for LinkageError<'_> {}

/// Failure of one module-serialization request: either a linkage error from
/// this crate, or the per-file serializer's own error, kept intact.
#[derive(Debug)]
pub enum SerializeError<'a, E> {
    Linkage(LinkageError<'a>),
    File(E),
}

impl<'a, E> From<LinkageError<'a>> for SerializeError<'a, E> {
    fn from(err: LinkageError<'a>) -> Self {
        SerializeError::Linkage(err)
    }
}

impl<E: Display> Display for SerializeError<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializeError::Linkage(err) => err.fmt(f),
            SerializeError::File(err) => write!(f, "Cannot serialize file: {err}"),
        }
    }
}

impl<E: std::fmt::Debug + Display> std::error::Error for SerializeError<'_, E> {}
