//! The seam between this crate and the native graphics driver.
//!
//! All operations here act on the thread that owns the context; neither the driver nor this crate
//! synchronizes access.

#[cfg(debug_assertions)]
use log::{trace, warn};
use web_sys::WebGl2RenderingContext as Gl;

use crate::vertex::Error;

mod webgl;

#[cfg(test)]
pub(crate) mod recording;

/// The native operations needed to create and configure vertex array objects.
///
/// Implemented for [web_sys::WebGl2RenderingContext]. Arguments are passed through unchanged, so
/// implementations for other GL bindings are expected to behave like the corresponding GL entry
/// points.
pub trait GlContext {
    /// The native handle type for vertex array objects.
    type VertexArrayObject;

    fn create_vertex_array(&self) -> Option<Self::VertexArrayObject>;

    fn delete_vertex_array(&self, vertex_array: &Self::VertexArrayObject);

    /// Makes `vertex_array` the current vertex array object of the context, or unbinds the
    /// current vertex array object if `None`.
    fn bind_vertex_array(&self, vertex_array: Option<&Self::VertexArrayObject>);

    /// Queries an integer parameter, returns `None` if the query produced no value.
    fn get_integer(&self, parameter: u32) -> Option<i32>;

    fn enable_vertex_attrib_array(&self, location: u32);

    fn disable_vertex_attrib_array(&self, location: u32);

    /// `glVertexAttribPointer`, with `offset` as a byte displacement into each vertex record.
    fn vertex_attrib_pointer(
        &self,
        location: u32,
        size: i32,
        type_: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    /// `glVertexAttribIPointer`, with `offset` as a byte displacement into each vertex record.
    fn vertex_attrib_i_pointer(&self, location: u32, size: i32, type_: u32, stride: i32, offset: i32);

    /// Returns and clears one pending error flag, or `NO_ERROR`.
    fn get_error(&self) -> u32;
}

/// A native object that can be made the current object of its binding point.
///
/// Binding mutates global context state: it replaces whichever object was previously bound to the
/// same binding point. Binding an object that is already bound has no further effect.
pub trait Bindable {
    fn bind(&self) -> Result<(), Error>;
}

/// Queries the number of vertex attribute locations the context supports.
///
/// Fails with [Error::MaxVertexAttributesUnavailable] if the context does not produce a
/// non-negative value.
pub fn max_vertex_attributes<C>(gl: &C) -> Result<u32, Error>
where
    C: GlContext + ?Sized,
{
    let value = checked_call(
        gl,
        "getParameter",
        || "MAX_VERTEX_ATTRIBS".to_string(),
        |gl| gl.get_integer(Gl::MAX_VERTEX_ATTRIBS),
    )?;

    match value {
        Some(max) if max >= 0 => Ok(max as u32),
        _ => Err(Error::MaxVertexAttributesUnavailable),
    }
}

// Bounds the number of stale error flags drained before a checked call; a lost context may keep
// reporting errors indefinitely.
#[cfg(debug_assertions)]
const MAX_STALE_ERRORS: usize = 32;

/// Performs a native call through `f`.
///
/// In debug builds stale error flags are cleared before the call and the error flag is checked
/// after it; a raised flag is returned as [Error::NativeCallFailed] carrying the name of the call
/// and its formatted `arguments`. Release builds only perform the call.
#[cfg(debug_assertions)]
pub(crate) fn checked_call<C, A, F, R>(
    gl: &C,
    call: &'static str,
    arguments: A,
    f: F,
) -> Result<R, Error>
where
    C: GlContext + ?Sized,
    A: FnOnce() -> String,
    F: FnOnce(&C) -> R,
{
    for _ in 0..MAX_STALE_ERRORS {
        if gl.get_error() == Gl::NO_ERROR {
            break;
        }
    }

    let arguments = arguments();

    trace!("{}({})", call, arguments);

    let result = f(gl);
    let code = gl.get_error();

    if code != Gl::NO_ERROR {
        warn!("{}({}) raised error {:#06x}", call, arguments, code);

        return Err(Error::NativeCallFailed {
            call,
            arguments,
            code,
        });
    }

    Ok(result)
}

#[cfg(not(debug_assertions))]
#[inline]
pub(crate) fn checked_call<C, A, F, R>(
    gl: &C,
    _call: &'static str,
    _arguments: A,
    f: F,
) -> Result<R, Error>
where
    C: GlContext + ?Sized,
    A: FnOnce() -> String,
    F: FnOnce(&C) -> R,
{
    Ok(f(gl))
}

#[cfg(test)]
mod tests {
    use super::recording::{Call, RecordingContext};
    use super::*;
    use crate::vertex::ErrorKind;

    #[test]
    fn test_max_vertex_attributes() {
        let context = RecordingContext::new(16);

        assert_eq!(max_vertex_attributes(&context), Ok(16));
        assert_eq!(
            context.calls(),
            vec![Call::GetInteger(Gl::MAX_VERTEX_ATTRIBS)]
        );
    }

    #[test]
    fn test_max_vertex_attributes_unavailable() {
        let context = RecordingContext::new(16);

        context.set_max_vertex_attributes(None);

        assert_eq!(
            max_vertex_attributes(&context),
            Err(Error::MaxVertexAttributesUnavailable)
        );

        context.set_max_vertex_attributes(Some(-1));

        let error = max_vertex_attributes(&context).unwrap_err();

        assert_eq!(error, Error::MaxVertexAttributesUnavailable);
        assert_eq!(error.kind(), ErrorKind::Runtime);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_checked_call_reports_native_error() {
        let context = RecordingContext::new(16);

        context.fail_next("getParameter", Gl::INVALID_ENUM);

        assert_eq!(
            max_vertex_attributes(&context),
            Err(Error::NativeCallFailed {
                call: "getParameter",
                arguments: "MAX_VERTEX_ATTRIBS".to_string(),
                code: Gl::INVALID_ENUM,
            })
        );

        // The flag is consumed, the next query succeeds.
        assert_eq!(max_vertex_attributes(&context), Ok(16));
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_checked_call_clears_stale_errors() {
        let context = RecordingContext::new(16);

        context.raise_stale_error(Gl::INVALID_OPERATION);

        assert_eq!(max_vertex_attributes(&context), Ok(16));
    }
}
