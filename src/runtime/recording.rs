use std::cell::RefCell;
use std::rc::Rc;

use web_sys::WebGl2RenderingContext as Gl;

use crate::runtime::GlContext;

/// A native call as observed by a [RecordingContext].
#[derive(Clone, PartialEq, Debug)]
pub(crate) enum Call {
    CreateVertexArray(u32),
    DeleteVertexArray(u32),
    BindVertexArray(Option<u32>),
    GetInteger(u32),
    EnableVertexAttribArray(u32),
    DisableVertexAttribArray(u32),
    VertexAttribPointer {
        location: u32,
        size: i32,
        type_: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    VertexAttribIPointer {
        location: u32,
        size: i32,
        type_: u32,
        stride: i32,
        offset: i32,
    },
}

struct Recording {
    calls: Vec<Call>,
    max_vertex_attributes: Option<i32>,
    next_object_id: u32,
    object_creation_fails: bool,
    armed_failures: Vec<(&'static str, u32)>,
    error_flag: Option<u32>,
}

/// A [GlContext] that records every call instead of talking to a driver.
///
/// Vertex array objects are numbered from `1` in creation order. Clones share the same
/// recording.
#[derive(Clone)]
pub(crate) struct RecordingContext {
    recording: Rc<RefCell<Recording>>,
}

impl RecordingContext {
    pub(crate) fn new(max_vertex_attributes: i32) -> Self {
        RecordingContext {
            recording: Rc::new(RefCell::new(Recording {
                calls: Vec::new(),
                max_vertex_attributes: Some(max_vertex_attributes),
                next_object_id: 1,
                object_creation_fails: false,
                armed_failures: Vec::new(),
                error_flag: None,
            })),
        }
    }

    pub(crate) fn set_max_vertex_attributes(&self, max: Option<i32>) {
        self.recording.borrow_mut().max_vertex_attributes = max;
    }

    pub(crate) fn fail_object_creation(&self) {
        self.recording.borrow_mut().object_creation_fails = true;
    }

    /// Raises `code` after the next invocation of the native call named `call`.
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    pub(crate) fn fail_next(&self, call: &'static str, code: u32) {
        self.recording.borrow_mut().armed_failures.push((call, code));
    }

    /// Raises `code` immediately, as if an earlier unrelated call had failed.
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    pub(crate) fn raise_stale_error(&self, code: u32) {
        self.recording.borrow_mut().error_flag = Some(code);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.recording.borrow().calls.clone()
    }

    /// Returns the recorded calls and clears the record.
    pub(crate) fn take_calls(&self) -> Vec<Call> {
        let mut recording = self.recording.borrow_mut();

        recording.calls.drain(..).collect()
    }

    fn record(&self, name: &'static str, call: Call) {
        let mut recording = self.recording.borrow_mut();

        recording.calls.push(call);

        if let Some(position) = recording
            .armed_failures
            .iter()
            .position(|(armed, _)| *armed == name)
        {
            let (_, code) = recording.armed_failures.remove(position);

            recording.error_flag = Some(code);
        }
    }
}

impl GlContext for RecordingContext {
    type VertexArrayObject = u32;

    fn create_vertex_array(&self) -> Option<u32> {
        if self.recording.borrow().object_creation_fails {
            return None;
        }

        let id = {
            let mut recording = self.recording.borrow_mut();
            let id = recording.next_object_id;

            recording.next_object_id += 1;

            id
        };

        self.record("createVertexArray", Call::CreateVertexArray(id));

        Some(id)
    }

    fn delete_vertex_array(&self, vertex_array: &u32) {
        self.record("deleteVertexArray", Call::DeleteVertexArray(*vertex_array));
    }

    fn bind_vertex_array(&self, vertex_array: Option<&u32>) {
        self.record(
            "bindVertexArray",
            Call::BindVertexArray(vertex_array.cloned()),
        );
    }

    fn get_integer(&self, parameter: u32) -> Option<i32> {
        self.record("getParameter", Call::GetInteger(parameter));

        if parameter == Gl::MAX_VERTEX_ATTRIBS {
            self.recording.borrow().max_vertex_attributes
        } else {
            None
        }
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        self.record(
            "enableVertexAttribArray",
            Call::EnableVertexAttribArray(location),
        );
    }

    fn disable_vertex_attrib_array(&self, location: u32) {
        self.record(
            "disableVertexAttribArray",
            Call::DisableVertexAttribArray(location),
        );
    }

    fn vertex_attrib_pointer(
        &self,
        location: u32,
        size: i32,
        type_: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(
            "vertexAttribPointer",
            Call::VertexAttribPointer {
                location,
                size,
                type_,
                normalized,
                stride,
                offset,
            },
        );
    }

    fn vertex_attrib_i_pointer(&self, location: u32, size: i32, type_: u32, stride: i32, offset: i32) {
        self.record(
            "vertexAttribIPointer",
            Call::VertexAttribIPointer {
                location,
                size,
                type_,
                stride,
                offset,
            },
        );
    }

    fn get_error(&self) -> u32 {
        self.recording
            .borrow_mut()
            .error_flag
            .take()
            .unwrap_or(Gl::NO_ERROR)
    }
}
