#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use lux::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Link(String),
    DeleteStage(StageId),
    DeleteProgram(ProgramId),
    Bind(ProgramId),
    SetUniform(ProgramId, i32, UniformVariable),
    Upload(usize),
    Draw(ProgramId, DrawMode, u32, u32),
}

pub type Calls = Rc<RefCell<Vec<Call>>>;

/// A headless driver that records every call that reaches it.
pub struct Recorder {
    inner: HeadlessVisitor,
    calls: Calls,
    link_log: String,
    limits: Limits,
}

impl Recorder {
    pub fn new() -> (Self, Calls) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let recorder = Recorder {
            inner: HeadlessVisitor::new(),
            calls: calls.clone(),
            link_log: String::new(),
            limits: Limits::default(),
        };

        (recorder, calls)
    }

    /// Reports `log` as the info log of every successful link.
    pub fn with_link_log<T: Into<String>>(mut self, log: T) -> Self {
        self.link_log = log.into();
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Visitor for Recorder {
    fn limits(&self) -> Limits {
        self.limits
    }

    unsafe fn compile_stage(&mut self, stage: Stage, file: &str, src: &str) -> Result<StageId> {
        self.inner.compile_stage(stage, file, src)
    }

    unsafe fn delete_stage(&mut self, id: StageId) -> Result<()> {
        self.record(Call::DeleteStage(id));
        self.inner.delete_stage(id)
    }

    unsafe fn link(&mut self, name: &str, stages: &[StageId]) -> Result<(ProgramId, String)> {
        self.record(Call::Link(name.to_owned()));
        let (id, _) = self.inner.link(name, stages)?;
        Ok((id, self.link_log.clone()))
    }

    unsafe fn delete_program(&mut self, id: ProgramId) -> Result<()> {
        self.record(Call::DeleteProgram(id));
        self.inner.delete_program(id)
    }

    unsafe fn active_uniforms(&mut self, id: ProgramId) -> Result<Vec<ActiveUniform>> {
        self.inner.active_uniforms(id)
    }

    unsafe fn bind_program(
        &mut self,
        id: ProgramId,
        flags: RenderFlags,
        mode: DrawMode,
    ) -> Result<()> {
        self.record(Call::Bind(id));
        self.inner.bind_program(id, flags, mode)
    }

    unsafe fn set_uniform(
        &mut self,
        id: ProgramId,
        location: i32,
        variable: &UniformVariable,
    ) -> Result<()> {
        self.record(Call::SetUniform(id, location, *variable));
        self.inner.set_uniform(id, location, variable)
    }

    unsafe fn update_vertex_buffer(&mut self, bytes: &[u8]) -> Result<()> {
        self.record(Call::Upload(bytes.len()));
        self.inner.update_vertex_buffer(bytes)
    }

    unsafe fn draw(
        &mut self,
        id: ProgramId,
        mode: DrawMode,
        spec: VertexSpec,
        first: u32,
        count: u32,
    ) -> Result<u32> {
        self.record(Call::Draw(id, mode, first, count));
        self.inner.draw(id, mode, spec, first, count)
    }

    unsafe fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }

    unsafe fn advance(&mut self) -> Result<()> {
        self.inner.advance()
    }
}

/// A context over the builtin shaders, loading every program of the index.
pub fn context() -> (RenderContext, Calls) {
    context_with(Settings::default())
}

pub fn context_with(settings: Settings) -> (RenderContext, Calls) {
    let _ = env_logger::try_init();

    let (recorder, calls) = Recorder::new();
    let ctx = RenderContext::new(
        settings,
        Box::new(recorder),
        Box::new(Embedded::builtin()),
    ).unwrap();

    calls.borrow_mut().clear();
    (ctx, calls)
}

pub fn count<F: Fn(&Call) -> bool>(calls: &Calls, f: F) -> usize {
    calls.borrow().iter().filter(|v| f(*v)).count()
}

pub fn uniform_writes(calls: &Calls) -> usize {
    count(calls, |v| match v {
        Call::SetUniform(..) => true,
        _ => false,
    })
}

pub fn draws(calls: &Calls) -> Vec<(ProgramId, DrawMode, u32, u32)> {
    calls
        .borrow()
        .iter()
        .filter_map(|v| match *v {
            Call::Draw(id, mode, first, count) => Some((id, mode, first, count)),
            _ => None,
        }).collect()
}
