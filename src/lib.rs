//! Vertex attribute layouts for WebGL 2.0 and OpenGL vertex array objects.
//!
//! A [vertex::VertexArray] owns a native vertex array object. A layout of
//! [vertex::VertexAttributeDescriptor]s is validated and applied to it with
//! [vertex::VertexArray::set_attributes]. The native driver is reached through the
//! [runtime::GlContext] trait, which is implemented for [web_sys::WebGl2RenderingContext].
//!
//! Debug builds additionally check that attributes fit within the stride and do not overlap, and
//! turn driver error flags into errors. Release builds skip both.

pub mod runtime;
pub mod vertex;
