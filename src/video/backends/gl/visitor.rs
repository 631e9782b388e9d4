use std::ffi::CString;
use std::os::raw::c_void;
use std::ptr;

use gl;
use gl::types::*;

use crate::errors::*;

use super::super::super::assets::prelude::*;
use super::super::{ActiveUniform, Limits, ProgramId, RenderFlags, StageId, Visitor};
use super::capabilities::{Capabilities, Version};
use super::types;

struct GLMutableState {
    flags: RenderFlags,
    patch_vertices: u8,
    binded_program: Option<GLuint>,
    binded_spec: Option<VertexSpec>,
    enabled_attributes: usize,
}

/// The OpenGL driver. Every vertex stream is uploaded into one streaming
/// buffer, which is described by a single vertex array object.
pub struct GLVisitor {
    state: GLMutableState,
    capabilities: Capabilities,
    vao: GLuint,
    vbo: GLuint,
    vbo_capacity: usize,
    uploaded: usize,
}

impl GLVisitor {
    pub unsafe fn new() -> Result<Self> {
        let capabilities = Capabilities::parse()?;
        info!("GLVisitor {:#?}", capabilities);
        check_capabilities(&capabilities)?;

        let state = GLMutableState {
            flags: RenderFlags::default(),
            patch_vertices: 0,
            binded_program: None,
            binded_spec: None,
            enabled_attributes: 0,
        };

        let mut vao = 0;
        gl::GenVertexArrays(1, &mut vao);
        gl::BindVertexArray(vao);

        let mut vbo = 0;
        gl::GenBuffers(1, &mut vbo);
        gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
        check()?;

        let mut visitor = GLVisitor {
            state,
            capabilities,
            vao,
            vbo,
            vbo_capacity: 0,
            uploaded: 0,
        };

        Self::reset_render_state(&mut visitor.state, visitor.capabilities.version)?;
        Ok(visitor)
    }

    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

impl Drop for GLVisitor {
    fn drop(&mut self) {
        unsafe {
            gl::BindVertexArray(0);
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
        }
    }
}

impl Visitor for GLVisitor {
    fn limits(&self) -> Limits {
        self.capabilities.limits()
    }

    unsafe fn compile_stage(&mut self, stage: Stage, file: &str, src: &str) -> Result<StageId> {
        let caps = &self.capabilities;
        let supported = match stage {
            Stage::TessControl | Stage::TessEvaluation => caps.has_tessellation(),
            Stage::Geometry => caps.has_geometry_shader(),
            Stage::Compute => caps.has_compute_shader(),
            Stage::Vertex | Stage::Fragment => true,
        };

        if !supported {
            return Err(Error::Requirement(format!("{:?} stage of {}", stage, file)));
        }

        Self::compile(stage.into(), file, src)
    }

    unsafe fn delete_stage(&mut self, id: StageId) -> Result<()> {
        gl::DeleteShader(id);
        check()
    }

    unsafe fn link(&mut self, name: &str, stages: &[StageId]) -> Result<(ProgramId, String)> {
        let program = gl::CreateProgram();
        for &stage in stages {
            gl::AttachShader(program, stage);
        }

        gl::LinkProgram(program);

        // Stages might be shared with other programs.
        for &stage in stages {
            gl::DetachShader(program, stage);
        }

        let mut status = GLint::from(gl::FALSE);
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

        let log = program_log(program);
        if status != GLint::from(gl::TRUE) {
            gl::DeleteProgram(program);
            return Err(Error::Link {
                program: name.into(),
                log,
            });
        }

        check()?;
        Ok((program, log))
    }

    unsafe fn delete_program(&mut self, id: ProgramId) -> Result<()> {
        if self.state.binded_program == Some(id) {
            gl::UseProgram(0);
            self.state.binded_program = None;
        }

        gl::DeleteProgram(id);
        check()
    }

    unsafe fn active_uniforms(&mut self, id: ProgramId) -> Result<Vec<ActiveUniform>> {
        let mut count = 0;
        gl::GetProgramiv(id, gl::ACTIVE_UNIFORMS, &mut count);
        let mut max_len = 0;
        gl::GetProgramiv(id, gl::ACTIVE_UNIFORM_MAX_LENGTH, &mut max_len);
        check()?;

        let mut uniforms = Vec::with_capacity(count.max(0) as usize);
        for i in 0..count.max(0) {
            let mut buf = vec![0u8; max_len.max(1) as usize];
            let (mut len, mut size, mut tp) = (0, 0, 0);
            gl::GetActiveUniform(
                id,
                i as GLuint,
                max_len,
                &mut len,
                &mut size,
                &mut tp,
                buf.as_mut_ptr() as *mut GLchar,
            );

            buf.truncate(len.max(0) as usize);
            let mut name = String::from_utf8_lossy(&buf).into_owned();
            if name.ends_with("[0]") {
                let base = name.len() - 3;
                name.truncate(base);
            }

            let c_name = CString::new(name.as_bytes())
                .map_err(|_| Error::Backend(format!("uniform name {:?} is malformed", name)))?;

            // Members of uniform blocks have no location.
            let location = gl::GetUniformLocation(id, c_name.as_ptr());
            if location < 0 {
                continue;
            }

            uniforms.push(ActiveUniform {
                name,
                location,
                variable_type: types::uniform_type(tp),
                type_name: format!("0x{:04X}", tp),
            });
        }

        check()?;
        Ok(uniforms)
    }

    unsafe fn bind_program(
        &mut self,
        id: ProgramId,
        flags: RenderFlags,
        mode: DrawMode,
    ) -> Result<()> {
        Self::bind_shader(&mut self.state, id)?;
        Self::set_color_blend(&mut self.state, flags.blending)?;
        Self::set_depth_test(&mut self.state, flags.depth_test)?;
        Self::set_polygon_offset(&mut self.state, flags.polygon_offset)?;

        if let DrawMode::Patches(n) = mode {
            Self::set_patch_vertices(&mut self.state, n)?;
        }

        Ok(())
    }

    unsafe fn set_uniform(
        &mut self,
        id: ProgramId,
        location: i32,
        variable: &UniformVariable,
    ) -> Result<()> {
        Self::bind_shader(&mut self.state, id)?;
        Self::bind_uniform_variable(location, variable)
    }

    unsafe fn update_vertex_buffer(&mut self, bytes: &[u8]) -> Result<()> {
        self.uploaded = bytes.len();
        if bytes.is_empty() {
            return Ok(());
        }

        gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo);
        let data = bytes.as_ptr() as *const c_void;
        if bytes.len() > self.vbo_capacity {
            gl::BufferData(gl::ARRAY_BUFFER, bytes.len() as isize, data, gl::STREAM_DRAW);
            self.vbo_capacity = bytes.len();
        } else {
            gl::BufferSubData(gl::ARRAY_BUFFER, 0, bytes.len() as isize, data);
        }

        check()
    }

    unsafe fn draw(
        &mut self,
        id: ProgramId,
        mode: DrawMode,
        spec: VertexSpec,
        first: u32,
        count: u32,
    ) -> Result<u32> {
        if count == 0 {
            return Ok(0);
        }

        super::super::check_range(spec, first, count, self.uploaded)?;

        Self::bind_shader(&mut self.state, id)?;
        Self::bind_spec(&mut self.state, self.vbo, spec)?;

        gl::DrawArrays(mode.into(), first as GLint, count as GLsizei);
        check()?;
        Ok(mode.assemble(count))
    }

    unsafe fn flush(&mut self) -> Result<()> {
        gl::Finish();
        check()
    }

    unsafe fn advance(&mut self) -> Result<()> {
        gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT | gl::STENCIL_BUFFER_BIT);
        check()
    }
}

impl GLVisitor {
    unsafe fn bind_shader(state: &mut GLMutableState, id: GLuint) -> Result<()> {
        if state.binded_program == Some(id) {
            return Ok(());
        }

        gl::UseProgram(id);
        check()?;

        state.binded_program = Some(id);
        Ok(())
    }

    unsafe fn bind_uniform_variable(location: GLint, variable: &UniformVariable) -> Result<()> {
        match *variable {
            UniformVariable::I32(v) | UniformVariable::Sampler(v) => gl::Uniform1i(location, v),
            UniformVariable::F32(v) => gl::Uniform1f(location, v),
            UniformVariable::Vector2f(v) => gl::Uniform2f(location, v[0], v[1]),
            UniformVariable::Vector3f(v) => gl::Uniform3f(location, v[0], v[1], v[2]),
            UniformVariable::Vector4f(v) => gl::Uniform4f(location, v[0], v[1], v[2], v[3]),
            UniformVariable::Matrix4f(v) => {
                gl::UniformMatrix4fv(location, 1, gl::FALSE, v[0].as_ptr())
            }
        }

        check()
    }

    unsafe fn bind_spec(state: &mut GLMutableState, vbo: GLuint, spec: VertexSpec) -> Result<()> {
        if state.binded_spec == Some(spec) {
            return Ok(());
        }

        gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

        let attributes = spec.attributes();
        let stride = spec.stride() as GLsizei;
        let mut offset = 0usize;

        for (i, v) in attributes.iter().enumerate() {
            let location = i as GLuint;
            let pointer = offset as *const u8 as *const c_void;
            gl::EnableVertexAttribArray(location);

            if v.integral {
                gl::VertexAttribIPointer(
                    location,
                    GLint::from(v.dimension),
                    v.format.into(),
                    stride,
                    pointer,
                );
            } else {
                let normalized = v.format != VertexFormat::Float;
                gl::VertexAttribPointer(
                    location,
                    GLint::from(v.dimension),
                    v.format.into(),
                    normalized as GLboolean,
                    stride,
                    pointer,
                );
            }

            offset += v.size as usize;
        }

        for i in attributes.len()..state.enabled_attributes {
            gl::DisableVertexAttribArray(i as GLuint);
        }

        check()?;
        state.enabled_attributes = attributes.len();
        state.binded_spec = Some(spec);
        Ok(())
    }
}

impl GLVisitor {
    unsafe fn reset_render_state(state: &mut GLMutableState, version: Version) -> Result<()> {
        gl::Disable(gl::CULL_FACE);

        gl::Disable(gl::DEPTH_TEST);
        gl::DepthFunc(gl::LESS);
        gl::Disable(gl::POLYGON_OFFSET_FILL);

        gl::Disable(gl::BLEND);
        gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        gl::BlendEquation(gl::FUNC_ADD);

        // Point sizes are written by the vertex stage.
        if let Version::GL(_, _) = version {
            gl::Enable(gl::PROGRAM_POINT_SIZE);
        }

        state.flags = RenderFlags::default();
        check()
    }

    unsafe fn set_color_blend(state: &mut GLMutableState, blending: bool) -> Result<()> {
        if state.flags.blending != blending {
            if blending {
                gl::Enable(gl::BLEND);
            } else {
                gl::Disable(gl::BLEND);
            }

            state.flags.blending = blending;
            check()?;
        }

        Ok(())
    }

    unsafe fn set_depth_test(state: &mut GLMutableState, depth_test: bool) -> Result<()> {
        if state.flags.depth_test != depth_test {
            if depth_test {
                gl::Enable(gl::DEPTH_TEST);
                gl::DepthMask(gl::TRUE);
            } else {
                gl::Disable(gl::DEPTH_TEST);
                gl::DepthMask(gl::FALSE);
            }

            state.flags.depth_test = depth_test;
            check()?;
        }

        Ok(())
    }

    /// Set `offset` to address the scale and units used to calculate depth values.
    unsafe fn set_polygon_offset(
        state: &mut GLMutableState,
        offset: Option<(f32, f32)>,
    ) -> Result<()> {
        if state.flags.polygon_offset != offset {
            match offset {
                Some(v) if v.0 != 0.0 || v.1 != 0.0 => {
                    gl::Enable(gl::POLYGON_OFFSET_FILL);
                    gl::PolygonOffset(v.0, v.1);
                }
                _ => gl::Disable(gl::POLYGON_OFFSET_FILL),
            }

            state.flags.polygon_offset = offset;
            check()?;
        }

        Ok(())
    }

    unsafe fn set_patch_vertices(state: &mut GLMutableState, n: u8) -> Result<()> {
        if state.patch_vertices != n {
            gl::PatchParameteri(gl::PATCH_VERTICES, GLint::from(n));
            state.patch_vertices = n;
            check()?;
        }

        Ok(())
    }
}

impl GLVisitor {
    unsafe fn compile(stage: GLenum, file: &str, src: &str) -> Result<GLuint> {
        let c_str = CString::new(src.as_bytes()).map_err(|_| Error::Compile {
            source: file.into(),
            log: "source contains a nul byte".into(),
        })?;

        let shader = gl::CreateShader(stage);
        gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
        gl::CompileShader(shader);

        let mut status = GLint::from(gl::FALSE);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

        if status != GLint::from(gl::TRUE) {
            let log = shader_log(shader);
            gl::DeleteShader(shader);
            return Err(Error::Compile {
                source: file.into(),
                log,
            });
        }

        check()?;
        Ok(shader)
    }
}

unsafe fn shader_log(shader: GLuint) -> String {
    let mut len = 0;
    gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    if len <= 1 {
        return String::new();
    }

    let mut written = 0;
    let mut buf = vec![0u8; len as usize];
    gl::GetShaderInfoLog(shader, len, &mut written, buf.as_mut_ptr() as *mut GLchar);
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).trim().to_owned()
}

unsafe fn program_log(program: GLuint) -> String {
    let mut len = 0;
    gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
    if len <= 1 {
        return String::new();
    }

    let mut written = 0;
    let mut buf = vec![0u8; len as usize];
    gl::GetProgramInfoLog(program, len, &mut written, buf.as_mut_ptr() as *mut GLchar);
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).trim().to_owned()
}

fn check_capabilities(caps: &Capabilities) -> Result<()> {
    if caps.version < Version::GL(1, 5)
        && caps.version < Version::ES(2, 0)
        && !caps.extensions.gl_arb_vertex_buffer_object
    {
        return Err(Error::Requirement("vertex buffer objects".into()));
    }

    if caps.version < Version::GL(2, 0)
        && caps.version < Version::ES(2, 0)
        && (!caps.extensions.gl_arb_shader_objects
            || !caps.extensions.gl_arb_vertex_shader
            || !caps.extensions.gl_arb_fragment_shader)
    {
        return Err(Error::Requirement("shader objects".into()));
    }

    if caps.version < Version::GL(3, 0)
        && caps.version < Version::ES(3, 0)
        && !caps.extensions.gl_arb_vertex_array_object
        && !caps.extensions.gl_apple_vertex_array_object
    {
        return Err(Error::Requirement("vertex array objects".into()));
    }

    if !caps.has_tessellation() {
        warn!("Tessellation is not supported, bezier programs will fail to load.");
    }

    Ok(())
}

unsafe fn check() -> Result<()> {
    let reason = match gl::GetError() {
        gl::NO_ERROR => return Ok(()),
        gl::INVALID_ENUM => "[GL] An unacceptable value is specified for an enumerated argument.",
        gl::INVALID_VALUE => "[GL] A numeric argument is out of range.",
        gl::INVALID_OPERATION => {
            "[GL] The specified operation is not allowed in the current state."
        }
        gl::INVALID_FRAMEBUFFER_OPERATION => {
            "[GL] The command is trying to render to or read from the framebuffer while the \
             currently bound framebuffer is not framebuffer complete."
        }
        gl::OUT_OF_MEMORY => "[GL] There is not enough memory left to execute the command.",
        _ => "[GL] Oops, Unknown OpenGL error.",
    };

    Err(Error::Backend(reason.into()))
}
