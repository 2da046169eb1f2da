use failure::Fail;

use crate::vertex::attribute_format::IncompatibleInterpretation;

/// The two categories of failure that can be reported by this crate.
///
/// See [Error::kind].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    /// The caller supplied a configuration that violates a documented precondition. These
    /// failures can always be prevented by correcting the input.
    InvalidArgument,

    /// The context or driver could not satisfy the request. These failures cannot be prevented by
    /// input validation alone.
    Runtime,
}

/// Error returned when creating or configuring a [VertexArray].
#[derive(Fail, Clone, PartialEq, Debug)]
pub enum Error {
    #[fail(display = "Stride must be greater than 0, got {}.", stride_in_bytes)]
    InvalidStride { stride_in_bytes: i32 },

    #[fail(
        display = "Offset of the attribute at location {} may not be less than 0, got {}.",
        location, offset_in_bytes
    )]
    NegativeOffset { location: u32, offset_in_bytes: i32 },

    #[fail(
        display = "The current context does not support attribute locations over {}, got {}.",
        max_location, location
    )]
    LocationOutOfRange { location: u32, max_location: u32 },

    #[fail(
        display = "The attribute at location {} requests {} components, but only 1 to 4 are \
                   allowed.",
        location, component_count
    )]
    InvalidComponentCount { location: u32, component_count: i32 },

    #[fail(display = "{}", _0)]
    IncompatibleInterpretation(#[cause] IncompatibleInterpretation),

    #[fail(display = "`{:#06x}` is not a known vertex attribute type.", gl_enum)]
    UnknownAttributeType { gl_enum: u32 },

    #[fail(
        display = "Attribute {} ends at byte {}, which exceeds the stride of {} bytes.",
        position, end_in_bytes, stride_in_bytes
    )]
    ExceedsStride {
        position: usize,
        end_in_bytes: i64,
        stride_in_bytes: i32,
    },

    #[fail(display = "Attributes {} and {} overlap.", first, second)]
    Overlap { first: usize, second: usize },

    #[fail(display = "Could not query MAX_VERTEX_ATTRIBS.")]
    MaxVertexAttributesUnavailable,

    #[fail(
        display = "The current context does not support {} vertex attributes. Max allowed are: \
                   {}. At least 16 are guaranteed.",
        requested, supported
    )]
    TooManyAttributes { requested: usize, supported: u32 },

    #[fail(display = "Could not create a vertex array object.")]
    ObjectCreationFailed,

    #[fail(
        display = "Native call `{}({})` failed with error code {:#06x}.",
        call, arguments, code
    )]
    NativeCallFailed {
        call: &'static str,
        arguments: String,
        code: u32,
    },
}

impl Error {
    /// Returns the [ErrorKind] this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidStride { .. }
            | Error::NegativeOffset { .. }
            | Error::LocationOutOfRange { .. }
            | Error::InvalidComponentCount { .. }
            | Error::IncompatibleInterpretation(_)
            | Error::UnknownAttributeType { .. }
            | Error::ExceedsStride { .. }
            | Error::Overlap { .. } => ErrorKind::InvalidArgument,
            Error::MaxVertexAttributesUnavailable
            | Error::TooManyAttributes { .. }
            | Error::ObjectCreationFailed
            | Error::NativeCallFailed { .. } => ErrorKind::Runtime,
        }
    }

    /// Returns `true` if this error is of the [ErrorKind::InvalidArgument] kind.
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}

impl From<IncompatibleInterpretation> for Error {
    fn from(error: IncompatibleInterpretation) -> Self {
        Error::IncompatibleInterpretation(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::{AttributeInterpretation, AttributeType};

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::InvalidStride { stride_in_bytes: 0 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            Error::Overlap {
                first: 0,
                second: 1
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            Error::TooManyAttributes {
                requested: 17,
                supported: 16
            }
            .kind(),
            ErrorKind::Runtime
        );
        assert_eq!(
            Error::MaxVertexAttributesUnavailable.kind(),
            ErrorKind::Runtime
        );
    }

    #[test]
    fn test_display_names_counts() {
        let message = Error::TooManyAttributes {
            requested: 20,
            supported: 16,
        }
        .to_string();

        assert!(message.contains("20"));
        assert!(message.contains("16"));
    }

    #[test]
    fn test_incompatible_interpretation_conversion() {
        let error: Error = AttributeType::Double
            .check_interpretation(AttributeInterpretation::Integer)
            .unwrap_err()
            .into();

        assert!(error.is_invalid_argument());
        assert_eq!(
            error.to_string(),
            "Can't use type Double with Integer interpretation!"
        );
    }
}
