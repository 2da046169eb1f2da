use std::convert::TryFrom;
use std::fmt;

use failure::Fail;
use web_sys::WebGl2RenderingContext as Gl;

use crate::vertex::Error;

/// `GL_DOUBLE`, not exposed by WebGL 2.0.
pub const DOUBLE: u32 = 0x140A;

/// `GL_FIXED`, not exposed by WebGL 2.0.
pub const FIXED: u32 = 0x140C;

/// Enumerates the scalar types in which vertex attribute data may be stored in a buffer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AttributeType {
    /// `GL_BYTE`
    Byte,
    /// `GL_UNSIGNED_BYTE`
    UnsignedByte,
    /// `GL_SHORT`
    Short,
    /// `GL_UNSIGNED_SHORT`
    UnsignedShort,
    /// `GL_INT`
    Int,
    /// `GL_UNSIGNED_INT`
    UnsignedInt,
    /// `GL_HALF_FLOAT`
    HalfFloat,
    /// `GL_FLOAT`
    Float,
    /// `GL_DOUBLE`
    Double,
    /// `GL_FIXED`
    Fixed,
}

impl AttributeType {
    /// The size in bytes of a single scalar value of this type.
    pub fn size_in_bytes(&self) -> u8 {
        match self {
            AttributeType::Byte => 1,
            AttributeType::UnsignedByte => 1,
            AttributeType::Short => 2,
            AttributeType::UnsignedShort => 2,
            AttributeType::Int => 4,
            AttributeType::UnsignedInt => 4,
            AttributeType::HalfFloat => 2,
            AttributeType::Float => 4,
            AttributeType::Double => 8,
            AttributeType::Fixed => 4,
        }
    }

    /// The GL token that identifies this type in native calls.
    pub fn gl_enum(&self) -> u32 {
        match self {
            AttributeType::Byte => Gl::BYTE,
            AttributeType::UnsignedByte => Gl::UNSIGNED_BYTE,
            AttributeType::Short => Gl::SHORT,
            AttributeType::UnsignedShort => Gl::UNSIGNED_SHORT,
            AttributeType::Int => Gl::INT,
            AttributeType::UnsignedInt => Gl::UNSIGNED_INT,
            AttributeType::HalfFloat => Gl::HALF_FLOAT,
            AttributeType::Float => Gl::FLOAT,
            AttributeType::Double => DOUBLE,
            AttributeType::Fixed => FIXED,
        }
    }

    /// Recovers an [AttributeType] from its GL token.
    ///
    /// Returns [Error::UnknownAttributeType] if `gl_enum` does not identify one of the supported
    /// attribute types.
    pub fn from_gl_enum(gl_enum: u32) -> Result<Self, Error> {
        match gl_enum {
            Gl::BYTE => Ok(AttributeType::Byte),
            Gl::UNSIGNED_BYTE => Ok(AttributeType::UnsignedByte),
            Gl::SHORT => Ok(AttributeType::Short),
            Gl::UNSIGNED_SHORT => Ok(AttributeType::UnsignedShort),
            Gl::INT => Ok(AttributeType::Int),
            Gl::UNSIGNED_INT => Ok(AttributeType::UnsignedInt),
            Gl::HALF_FLOAT => Ok(AttributeType::HalfFloat),
            Gl::FLOAT => Ok(AttributeType::Float),
            DOUBLE => Ok(AttributeType::Double),
            FIXED => Ok(AttributeType::Fixed),
            _ => Err(Error::UnknownAttributeType { gl_enum }),
        }
    }

    /// Whether data of this type may be read by a shader with the given `interpretation`.
    ///
    /// Every type may be read as a float. Floating point and fixed point types have no integer
    /// attribute pointer and may not be read as integers.
    pub fn is_compatible(&self, interpretation: AttributeInterpretation) -> bool {
        self.check_interpretation(interpretation).is_ok()
    }

    /// Like [AttributeType::is_compatible], but returns an error that describes the
    /// incompatibility.
    pub fn check_interpretation(
        &self,
        interpretation: AttributeInterpretation,
    ) -> Result<(), IncompatibleInterpretation> {
        match (interpretation, self) {
            (AttributeInterpretation::Integer, AttributeType::HalfFloat)
            | (AttributeInterpretation::Integer, AttributeType::Float)
            | (AttributeInterpretation::Integer, AttributeType::Double)
            | (AttributeInterpretation::Integer, AttributeType::Fixed) => {
                Err(IncompatibleInterpretation {
                    attribute_type: *self,
                    interpretation,
                })
            }
            _ => Ok(()),
        }
    }
}

impl TryFrom<u32> for AttributeType {
    type Error = Error;

    fn try_from(gl_enum: u32) -> Result<Self, Self::Error> {
        AttributeType::from_gl_enum(gl_enum)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Returns the size in bytes of the attribute type identified by the GL token `gl_enum`.
///
/// Fails with [Error::UnknownAttributeType] if the token is not a supported attribute type.
pub fn scalar_size(gl_enum: u32) -> Result<u8, Error> {
    AttributeType::from_gl_enum(gl_enum).map(|t| t.size_in_bytes())
}

/// Validates the GL token `gl_enum` as an attribute type and returns it unchanged.
///
/// Fails with [Error::UnknownAttributeType] if the token is not a supported attribute type.
pub fn native_enum(gl_enum: u32) -> Result<u32, Error> {
    AttributeType::from_gl_enum(gl_enum).map(|t| t.gl_enum())
}

/// Describes how attribute data is read by a shader.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AttributeInterpretation {
    /// The data is read as floating point values. Integer data may optionally be normalized, see
    /// [VertexAttributeDescriptor::normalized].
    Float,

    /// The data is read as integer values.
    Integer,
}

impl fmt::Display for AttributeInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Error returned by [AttributeType::check_interpretation].
#[derive(Fail, Clone, Copy, PartialEq, Debug)]
#[fail(
    display = "Can't use type {} with {} interpretation!",
    attribute_type, interpretation
)]
pub struct IncompatibleInterpretation {
    pub attribute_type: AttributeType,
    pub interpretation: AttributeInterpretation,
}
