//! Describes vertex attribute layouts and applies them to vertex array objects.

pub mod attribute_format;
pub use self::attribute_format::{
    native_enum, scalar_size, AttributeInterpretation, AttributeType, IncompatibleInterpretation,
};

mod error;
pub use self::error::{Error, ErrorKind};

mod layout_descriptor;
pub use self::layout_descriptor::{AttributeLayout, AttributeLayoutBuilder, VertexAttributeDescriptor};

mod vertex_array;
pub use self::vertex_array::VertexArray;
