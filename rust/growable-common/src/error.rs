use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn out_of_memory(requested_bytes: usize) -> Error {
        Error(ErrorKind::OutOfMemory { requested_bytes }.into())
    }

    pub fn index_out_of_range(index: usize, length: usize) -> Error {
        Error(ErrorKind::IndexOutOfRange { index, length }.into())
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    /// Returns `true` for allocation failures.
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfMemory { .. })
    }

    /// Returns `true` for out-of-range indices.
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::IndexOutOfRange { .. })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The allocator could not provide `requested_bytes` (or the byte size of the
    /// request does not fit in an allocation at all).
    #[error("out of memory: failed to allocate {requested_bytes} bytes")]
    OutOfMemory { requested_bytes: usize },

    #[error("index {index} out of range for length {length}")]
    IndexOutOfRange { index: usize, length: usize },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
