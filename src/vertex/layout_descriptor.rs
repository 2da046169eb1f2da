use crate::vertex::{AttributeInterpretation, AttributeType};

#[cfg(debug_assertions)]
use crate::vertex::Error;

/// Describes how the data for a single vertex attribute is laid out within one vertex record.
///
/// See [VertexArray::set_attributes] for the rules a descriptor has to satisfy.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct VertexAttributeDescriptor {
    /// The shader location the attribute is bound to.
    pub location: u32,

    /// The number of components of the attribute, must be in the range `1..=4` (e.g. `3` for a
    /// `vec3`).
    pub component_count: i32,

    /// The scalar type in which the attribute data is stored.
    pub attribute_type: AttributeType,

    /// How the stored data is read by the shader.
    pub interpretation: AttributeInterpretation,

    /// Whether integer data read with [AttributeInterpretation::Float] is mapped into `[-1, 1]`
    /// (signed) or `[0, 1]` (unsigned). Ignored for [AttributeInterpretation::Integer].
    pub normalized: bool,

    /// The offset in bytes of the attribute from the start of a vertex record.
    pub offset_in_bytes: i32,
}

impl VertexAttributeDescriptor {
    /// Describes an attribute that is read as floating point data.
    pub fn float(
        location: u32,
        component_count: i32,
        attribute_type: AttributeType,
        offset_in_bytes: i32,
    ) -> Self {
        VertexAttributeDescriptor {
            location,
            component_count,
            attribute_type,
            interpretation: AttributeInterpretation::Float,
            normalized: false,
            offset_in_bytes,
        }
    }

    /// Describes an attribute that is read as integer data.
    pub fn integer(
        location: u32,
        component_count: i32,
        attribute_type: AttributeType,
        offset_in_bytes: i32,
    ) -> Self {
        VertexAttributeDescriptor {
            location,
            component_count,
            attribute_type,
            interpretation: AttributeInterpretation::Integer,
            normalized: false,
            offset_in_bytes,
        }
    }

    /// Returns a copy of this descriptor with normalization enabled.
    pub fn normalized(mut self) -> Self {
        self.normalized = true;

        self
    }

    /// The number of bytes the attribute occupies within a vertex record.
    pub fn size_in_bytes(&self) -> i64 {
        self.attribute_type.size_in_bytes() as i64 * self.component_count as i64
    }

    #[cfg(any(debug_assertions, test))]
    fn end_in_bytes(&self) -> i64 {
        self.offset_in_bytes as i64 + self.size_in_bytes()
    }
}

/// A set of [VertexAttributeDescriptor]s together with the stride of the vertex records they
/// describe.
///
/// # Example
///
/// ```
/// use glitz_vertex::vertex::{AttributeLayout, AttributeType, VertexAttributeDescriptor};
///
/// let layout = AttributeLayout::builder(20)
///     .add_attribute(VertexAttributeDescriptor::float(0, 3, AttributeType::Float, 0))
///     .add_attribute(VertexAttributeDescriptor::float(1, 4, AttributeType::UnsignedByte, 12).normalized())
///     .add_attribute(VertexAttributeDescriptor::integer(2, 2, AttributeType::Short, 16))
///     .finish();
///
/// assert_eq!(layout.attributes().len(), 3);
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct AttributeLayout {
    stride_in_bytes: i32,
    attributes: Vec<VertexAttributeDescriptor>,
}

impl AttributeLayout {
    pub fn new(stride_in_bytes: i32, attributes: Vec<VertexAttributeDescriptor>) -> Self {
        AttributeLayout {
            stride_in_bytes,
            attributes,
        }
    }

    /// Returns a builder for an [AttributeLayout] with the given stride.
    pub fn builder(stride_in_bytes: i32) -> AttributeLayoutBuilder {
        AttributeLayoutBuilder {
            stride_in_bytes,
            attributes: Vec::new(),
        }
    }

    /// The distance in bytes between the starts of consecutive vertex records.
    pub fn stride_in_bytes(&self) -> i32 {
        self.stride_in_bytes
    }

    /// The attribute descriptors in the order they will be applied.
    pub fn attributes(&self) -> &[VertexAttributeDescriptor] {
        &self.attributes
    }
}

/// Builds an [AttributeLayout], see [AttributeLayout::builder].
pub struct AttributeLayoutBuilder {
    stride_in_bytes: i32,
    attributes: Vec<VertexAttributeDescriptor>,
}

impl AttributeLayoutBuilder {
    /// Appends an attribute descriptor to the layout.
    ///
    /// No validation happens here; descriptors are validated when the layout is applied to a
    /// [VertexArray].
    pub fn add_attribute(mut self, attribute: VertexAttributeDescriptor) -> Self {
        self.attributes.push(attribute);

        self
    }

    pub fn finish(self) -> AttributeLayout {
        AttributeLayout {
            stride_in_bytes: self.stride_in_bytes,
            attributes: self.attributes,
        }
    }
}

/// Verifies that every attribute fits within the stride and that no two attributes overlap.
///
/// Only compiled into debug builds.
#[cfg(debug_assertions)]
pub(crate) fn check_integrity(
    attributes: &[VertexAttributeDescriptor],
    stride_in_bytes: i32,
) -> Result<(), Error> {
    for (i, a) in attributes.iter().enumerate() {
        let end = a.end_in_bytes();

        if end > stride_in_bytes as i64 {
            return Err(Error::ExceedsStride {
                position: i,
                end_in_bytes: end,
                stride_in_bytes,
            });
        }

        for (j, b) in attributes.iter().enumerate() {
            if i == j {
                continue;
            }

            if a.offset_in_bytes <= b.offset_in_bytes && end > b.offset_in_bytes as i64 {
                return Err(Error::Overlap {
                    first: i,
                    second: j,
                });
            }
        }
    }

    Ok(())
}
