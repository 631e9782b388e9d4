//! A driver that never touches a GPU.
//!
//! Stages are "compiled" by scanning their `uniform` declarations, which lets
//! programs be loaded and their uniforms be introspected without a context.

use super::super::assets::prelude::*;
use super::{ActiveUniform, ProgramId, RenderFlags, StageId, Visitor};

use crate::errors::*;
use crate::utils::prelude::{FastHashMap, FastHashSet};

#[derive(Debug, Clone)]
struct HeadlessStage {
    stage: Stage,
    uniforms: Vec<(String, String)>,
}

#[derive(Debug, Default)]
pub struct HeadlessVisitor {
    stages: FastHashMap<StageId, HeadlessStage>,
    programs: FastHashMap<ProgramId, Vec<ActiveUniform>>,
    counter: u32,
    uploaded: usize,
}

impl HeadlessVisitor {
    pub fn new() -> Self {
        Default::default()
    }

    fn next_id(&mut self) -> u32 {
        self.counter += 1;
        self.counter
    }

    fn program(&self, id: ProgramId) -> Result<&Vec<ActiveUniform>> {
        self.programs
            .get(&id)
            .ok_or_else(|| Error::Backend(format!("program {} does not exist", id)))
    }
}

impl Visitor for HeadlessVisitor {
    unsafe fn compile_stage(&mut self, stage: Stage, file: &str, src: &str) -> Result<StageId> {
        if !src.contains("main") {
            return Err(Error::Compile {
                source: file.into(),
                log: "entry point `main` is not defined".into(),
            });
        }

        let id = self.next_id();
        let uniforms = scan_uniforms(src);
        self.stages.insert(id, HeadlessStage { stage, uniforms });
        Ok(id)
    }

    unsafe fn delete_stage(&mut self, id: StageId) -> Result<()> {
        self.stages.remove(&id);
        Ok(())
    }

    unsafe fn link(&mut self, name: &str, stages: &[StageId]) -> Result<(ProgramId, String)> {
        let mut declared = Vec::new();
        let mut entry = false;

        for id in stages {
            let stage = self.stages.get(id).ok_or_else(|| Error::Link {
                program: name.into(),
                log: format!("stage {} does not exist", id),
            })?;

            entry |= stage.stage == Stage::Vertex || stage.stage == Stage::Compute;
            declared.extend(stage.uniforms.iter().cloned());
        }

        if !entry {
            return Err(Error::Link {
                program: name.into(),
                log: "program has neither a vertex nor a compute stage".into(),
            });
        }

        let mut names = FastHashSet::default();
        let mut uniforms = Vec::new();
        for (type_name, name) in declared {
            if names.insert(name.clone()) {
                uniforms.push(ActiveUniform {
                    location: uniforms.len() as i32,
                    variable_type: uniform_type(&type_name),
                    name,
                    type_name,
                });
            }
        }

        let id = self.next_id();
        self.programs.insert(id, uniforms);
        Ok((id, String::new()))
    }

    unsafe fn delete_program(&mut self, id: ProgramId) -> Result<()> {
        self.programs.remove(&id);
        Ok(())
    }

    unsafe fn active_uniforms(&mut self, id: ProgramId) -> Result<Vec<ActiveUniform>> {
        self.program(id).map(|v| v.clone())
    }

    unsafe fn bind_program(&mut self, id: ProgramId, _: RenderFlags, _: DrawMode) -> Result<()> {
        self.program(id).map(|_| ())
    }

    unsafe fn set_uniform(
        &mut self,
        id: ProgramId,
        location: i32,
        _: &UniformVariable,
    ) -> Result<()> {
        if self.program(id)?.iter().any(|v| v.location == location) {
            Ok(())
        } else {
            Err(Error::Backend(format!(
                "location {} is not active in program {}",
                location, id
            )))
        }
    }

    unsafe fn update_vertex_buffer(&mut self, bytes: &[u8]) -> Result<()> {
        self.uploaded = bytes.len();
        Ok(())
    }

    unsafe fn draw(
        &mut self,
        id: ProgramId,
        mode: DrawMode,
        spec: VertexSpec,
        first: u32,
        count: u32,
    ) -> Result<u32> {
        self.program(id)?;

        super::check_range(spec, first, count, self.uploaded)?;
        Ok(mode.assemble(count))
    }

    unsafe fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    unsafe fn advance(&mut self) -> Result<()> {
        Ok(())
    }
}

fn uniform_type(name: &str) -> Option<UniformVariableType> {
    match name {
        "int" => Some(UniformVariableType::I32),
        "float" => Some(UniformVariableType::F32),
        "vec2" => Some(UniformVariableType::Vector2f),
        "vec3" => Some(UniformVariableType::Vector3f),
        "vec4" => Some(UniformVariableType::Vector4f),
        "mat4" => Some(UniformVariableType::Matrix4f),
        _ if name.starts_with("sampler") => Some(UniformVariableType::Sampler),
        _ => None,
    }
}

/// Collects `(type, name)` of every `uniform` declaration in `src`. Array
/// uniforms are reported under their base name.
fn scan_uniforms(src: &str) -> Vec<(String, String)> {
    let mut uniforms = Vec::new();

    let code: String = src
        .lines()
        .map(|v| v.split("//").next().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n");

    for statement in code.split(';') {
        let mut tokens = statement
            .split_whitespace()
            .skip_while(|&v| v != "uniform")
            .skip(1)
            .skip_while(|&v| v == "lowp" || v == "mediump" || v == "highp");

        if let (Some(tp), Some(name)) = (tokens.next(), tokens.next()) {
            let name = name.split('[').next().unwrap_or(name);
            let identifier = !name.is_empty()
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

            if identifier {
                uniforms.push((tp.to_owned(), name.to_owned()));
            }
        }
    }

    uniforms
}
