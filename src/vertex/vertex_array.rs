use log::debug;

use crate::runtime::{checked_call, max_vertex_attributes, Bindable, GlContext};
use crate::vertex::{AttributeInterpretation, AttributeLayout, Error, VertexAttributeDescriptor};

/// Owns a native vertex array object and deletes it when dropped.
struct VertexArrayObject<C>
where
    C: GlContext,
{
    context: C,
    handle: C::VertexArrayObject,
}

impl<C> VertexArrayObject<C>
where
    C: GlContext,
{
    fn new(context: C) -> Result<Self, Error> {
        let handle = context
            .create_vertex_array()
            .ok_or(Error::ObjectCreationFailed)?;

        Ok(VertexArrayObject { context, handle })
    }
}

impl<C> Drop for VertexArrayObject<C>
where
    C: GlContext,
{
    fn drop(&mut self) {
        self.context.delete_vertex_array(&self.handle);
    }
}

/// Wraps a native vertex array object and the attribute layout configured on it.
///
/// A [VertexArray] is move-only: it uniquely owns its native object, which is deleted when the
/// [VertexArray] is dropped. It must be dropped before the context that created it is destroyed;
/// this is not checked.
///
/// # Example
///
/// ```no_run
/// use glitz_vertex::vertex::{AttributeLayout, AttributeType, VertexArray, VertexAttributeDescriptor};
/// # fn wrapper(context: web_sys::WebGl2RenderingContext) -> Result<(), glitz_vertex::vertex::Error> {
///
/// let mut vertex_array = VertexArray::new(context)?;
///
/// let layout = AttributeLayout::builder(16)
///     .add_attribute(VertexAttributeDescriptor::float(0, 3, AttributeType::Float, 0))
///     .add_attribute(VertexAttributeDescriptor::float(1, 4, AttributeType::UnsignedByte, 12).normalized())
///     .finish();
///
/// vertex_array.apply_layout(&layout)?;
///
/// assert_eq!(vertex_array.enabled_attributes(), &[0, 1]);
/// # Ok(())
/// # }
/// ```
pub struct VertexArray<C>
where
    C: GlContext,
{
    object: VertexArrayObject<C>,
    enabled_attributes: Vec<u32>,
}

impl<C> VertexArray<C>
where
    C: GlContext,
{
    /// Creates a new vertex array object on the `context`, with no attributes enabled.
    pub fn new(context: C) -> Result<Self, Error> {
        Ok(VertexArray {
            object: VertexArrayObject::new(context)?,
            enabled_attributes: Vec::new(),
        })
    }

    /// The context this vertex array was created on.
    pub fn context(&self) -> &C {
        &self.object.context
    }

    /// The native vertex array object.
    pub fn handle(&self) -> &C::VertexArrayObject {
        &self.object.handle
    }

    /// The attribute locations currently enabled on this vertex array, in the order in which they
    /// were enabled.
    pub fn enabled_attributes(&self) -> &[u32] {
        &self.enabled_attributes
    }

    /// Configures the vertex attributes of this vertex array from the `layout`.
    ///
    /// See [VertexArray::set_attributes].
    pub fn apply_layout(&mut self, layout: &AttributeLayout) -> Result<(), Error> {
        self.set_attributes(layout.attributes(), layout.stride_in_bytes())
    }

    /// Configures the vertex attributes of this vertex array, replacing the previous
    /// configuration.
    ///
    /// For each descriptor, the shader input at its location reads `component_count` values of
    /// its type from the currently bound array buffer, starting `offset_in_bytes` into each vertex
    /// record and advancing `stride_in_bytes` per vertex.
    ///
    /// Attributes enabled by a previous configuration are disabled before the new attributes are
    /// enabled. Calling this function binds this vertex array.
    ///
    /// # Errors
    ///
    /// Before any state is changed:
    ///
    /// - [Error::InvalidStride] if `stride_in_bytes` is not greater than `0`.
    /// - [Error::MaxVertexAttributesUnavailable] if the attribute limit could not be queried.
    /// - [Error::TooManyAttributes] if more attributes are given than the context supports (at
    ///   least 16 are guaranteed).
    ///
    /// In debug builds only, after the previous configuration was disabled:
    ///
    /// - [Error::ExceedsStride] if an attribute does not fit within `stride_in_bytes`.
    /// - [Error::Overlap] if two attributes occupy overlapping bytes.
    /// - [Error::NativeCallFailed] if the driver raises an error for any native call.
    ///
    /// Per descriptor, in order:
    ///
    /// - [Error::NegativeOffset] if the offset is less than `0`.
    /// - [Error::LocationOutOfRange] if the location is not supported by the context.
    /// - [Error::InvalidComponentCount] if the component count is not in `1..=4`.
    /// - [Error::IncompatibleInterpretation] if the type can't be read with the requested
    ///   interpretation.
    ///
    /// Descriptors that precede a failing descriptor remain enabled and configured; no rollback
    /// is performed.
    pub fn set_attributes(
        &mut self,
        attributes: &[VertexAttributeDescriptor],
        stride_in_bytes: i32,
    ) -> Result<(), Error> {
        if stride_in_bytes <= 0 {
            return Err(Error::InvalidStride { stride_in_bytes });
        }

        let gl = &self.object.context;
        let max_attributes = max_vertex_attributes(gl)?;

        if attributes.len() > max_attributes as usize {
            return Err(Error::TooManyAttributes {
                requested: attributes.len(),
                supported: max_attributes,
            });
        }

        debug!(
            "Applying {} vertex attributes with a stride of {} bytes",
            attributes.len(),
            stride_in_bytes
        );

        self.bind()?;
        self.disable_enabled_attributes()?;

        #[cfg(debug_assertions)]
        crate::vertex::layout_descriptor::check_integrity(attributes, stride_in_bytes)?;

        let gl = &self.object.context;

        for attribute in attributes {
            let VertexAttributeDescriptor {
                location,
                component_count,
                attribute_type,
                interpretation,
                normalized,
                offset_in_bytes,
            } = *attribute;

            if offset_in_bytes < 0 {
                return Err(Error::NegativeOffset {
                    location,
                    offset_in_bytes,
                });
            }

            if location >= max_attributes {
                return Err(Error::LocationOutOfRange {
                    location,
                    max_location: max_attributes,
                });
            }

            if component_count < 1 || component_count > 4 {
                return Err(Error::InvalidComponentCount {
                    location,
                    component_count,
                });
            }

            checked_call(
                gl,
                "enableVertexAttribArray",
                || location.to_string(),
                |gl| gl.enable_vertex_attrib_array(location),
            )?;

            if !self.enabled_attributes.contains(&location) {
                self.enabled_attributes.push(location);
            }

            attribute_type.check_interpretation(interpretation)?;

            let type_ = attribute_type.gl_enum();

            match interpretation {
                AttributeInterpretation::Integer => checked_call(
                    gl,
                    "vertexAttribIPointer",
                    || {
                        format!(
                            "{}, {}, {:#06x}, {}, {}",
                            location, component_count, type_, stride_in_bytes, offset_in_bytes
                        )
                    },
                    |gl| {
                        gl.vertex_attrib_i_pointer(
                            location,
                            component_count,
                            type_,
                            stride_in_bytes,
                            offset_in_bytes,
                        )
                    },
                )?,
                AttributeInterpretation::Float => checked_call(
                    gl,
                    "vertexAttribPointer",
                    || {
                        format!(
                            "{}, {}, {:#06x}, {}, {}, {}",
                            location,
                            component_count,
                            type_,
                            normalized,
                            stride_in_bytes,
                            offset_in_bytes
                        )
                    },
                    |gl| {
                        gl.vertex_attrib_pointer(
                            location,
                            component_count,
                            type_,
                            normalized,
                            stride_in_bytes,
                            offset_in_bytes,
                        )
                    },
                )?,
            }
        }

        Ok(())
    }

    /// Clears the vertex array binding of the context if it is bound.
    ///
    /// Like [Bindable::bind], this mutates global context state.
    pub fn unbind(&self) -> Result<(), Error> {
        checked_call(
            &self.object.context,
            "bindVertexArray",
            || "null".to_string(),
            |gl| gl.bind_vertex_array(None),
        )
    }

    fn disable_enabled_attributes(&mut self) -> Result<(), Error> {
        if !self.enabled_attributes.is_empty() {
            debug!(
                "Disabling {} previously enabled vertex attributes",
                self.enabled_attributes.len()
            );
        }

        // A location stays tracked until its disable succeeds, so a failed disable is retried by
        // the next reconfiguration.
        while let Some(&location) = self.enabled_attributes.first() {
            checked_call(
                &self.object.context,
                "disableVertexAttribArray",
                || location.to_string(),
                |gl| gl.disable_vertex_attrib_array(location),
            )?;

            self.enabled_attributes.remove(0);
        }

        Ok(())
    }
}

impl<C> Bindable for VertexArray<C>
where
    C: GlContext,
{
    fn bind(&self) -> Result<(), Error> {
        checked_call(
            &self.object.context,
            "bindVertexArray",
            || "vertex array".to_string(),
            |gl| gl.bind_vertex_array(Some(&self.object.handle)),
        )
    }
}
