use wasm_bindgen::JsValue;
use web_sys::{WebGl2RenderingContext as Gl, WebGlVertexArrayObject};

use crate::runtime::GlContext;

impl GlContext for Gl {
    type VertexArrayObject = WebGlVertexArrayObject;

    fn create_vertex_array(&self) -> Option<WebGlVertexArrayObject> {
        Gl::create_vertex_array(self)
    }

    fn delete_vertex_array(&self, vertex_array: &WebGlVertexArrayObject) {
        Gl::delete_vertex_array(self, Some(vertex_array));
    }

    fn bind_vertex_array(&self, vertex_array: Option<&WebGlVertexArrayObject>) {
        Gl::bind_vertex_array(self, vertex_array);
    }

    fn get_integer(&self, parameter: u32) -> Option<i32> {
        self.get_parameter(parameter)
            .ok()
            .and_then(|value: JsValue| value.as_f64())
            .map(|value| value as i32)
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        Gl::enable_vertex_attrib_array(self, location);
    }

    fn disable_vertex_attrib_array(&self, location: u32) {
        Gl::disable_vertex_attrib_array(self, location);
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
        self.vertex_attrib_pointer_with_i32(location, size, type_, normalized, stride, offset);
    }

    fn vertex_attrib_i_pointer(&self, location: u32, size: i32, type_: u32, stride: i32, offset: i32) {
        self.vertex_attrib_i_pointer_with_i32(location, size, type_, stride, offset);
    }

    fn get_error(&self) -> u32 {
        Gl::get_error(self)
    }
}
