//! Uniform variables and the per-program cache of their last written values.

use crate::math::prelude::{Color, Matrix4, Vector2, Vector3, Vector4};
use crate::utils::prelude::FastHashMap;

/// Float-based uniforms within this distance per component are considered
/// unchanged.
pub const UNIFORM_EPSILON: f32 = 1e-6;

/// Uniform variable type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UniformVariableType {
    I32,
    F32,
    Vector2f,
    Vector3f,
    Vector4f,
    Matrix4f,
    Sampler,
}

impl UniformVariableType {
    /// The zero value a freshly linked program holds for this type.
    pub fn zero(self) -> UniformVariable {
        match self {
            UniformVariableType::I32 => UniformVariable::I32(0),
            UniformVariableType::F32 => UniformVariable::F32(0.0),
            UniformVariableType::Vector2f => UniformVariable::Vector2f([0.0; 2]),
            UniformVariableType::Vector3f => UniformVariable::Vector3f([0.0; 3]),
            UniformVariableType::Vector4f => UniformVariable::Vector4f([0.0; 4]),
            UniformVariableType::Matrix4f => UniformVariable::Matrix4f([[0.0; 4]; 4]),
            UniformVariableType::Sampler => UniformVariable::Sampler(0),
        }
    }
}

/// Uniform variable for program object. Matrices are column major, the way
/// `cgmath` stores them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformVariable {
    I32(i32),
    F32(f32),
    Vector2f([f32; 2]),
    Vector3f([f32; 3]),
    Vector4f([f32; 4]),
    Matrix4f([[f32; 4]; 4]),
    /// The texture unit a sampler reads from.
    Sampler(i32),
}

impl UniformVariable {
    pub fn variable_type(&self) -> UniformVariableType {
        match *self {
            UniformVariable::I32(_) => UniformVariableType::I32,
            UniformVariable::F32(_) => UniformVariableType::F32,
            UniformVariable::Vector2f(_) => UniformVariableType::Vector2f,
            UniformVariable::Vector3f(_) => UniformVariableType::Vector3f,
            UniformVariable::Vector4f(_) => UniformVariableType::Vector4f,
            UniformVariable::Matrix4f(_) => UniformVariableType::Matrix4f,
            UniformVariable::Sampler(_) => UniformVariableType::Sampler,
        }
    }

    /// Returns true if writing `other` over `self` would not change anything.
    /// Integers compare exactly, floats within `UNIFORM_EPSILON`. Values of
    /// different types are never the same.
    pub fn same(&self, other: &UniformVariable) -> bool {
        match (self, other) {
            (UniformVariable::I32(a), UniformVariable::I32(b)) => a == b,
            (UniformVariable::Sampler(a), UniformVariable::Sampler(b)) => a == b,
            (UniformVariable::F32(a), UniformVariable::F32(b)) => close(&[*a], &[*b]),
            (UniformVariable::Vector2f(a), UniformVariable::Vector2f(b)) => close(a, b),
            (UniformVariable::Vector3f(a), UniformVariable::Vector3f(b)) => close(a, b),
            (UniformVariable::Vector4f(a), UniformVariable::Vector4f(b)) => close(a, b),
            (UniformVariable::Matrix4f(a), UniformVariable::Matrix4f(b)) => {
                a.iter().zip(b.iter()).all(|(a, b)| close(a, b))
            }
            _ => false,
        }
    }
}

#[inline]
fn close(a: &[f32], b: &[f32]) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(a, b)| (a - b).abs() <= UNIFORM_EPSILON)
}

impl Into<UniformVariable> for i32 {
    fn into(self) -> UniformVariable {
        UniformVariable::I32(self)
    }
}

impl Into<UniformVariable> for f32 {
    fn into(self) -> UniformVariable {
        UniformVariable::F32(self)
    }
}

impl Into<UniformVariable> for [f32; 2] {
    fn into(self) -> UniformVariable {
        UniformVariable::Vector2f(self)
    }
}

impl Into<UniformVariable> for Vector2<f32> {
    fn into(self) -> UniformVariable {
        UniformVariable::Vector2f(self.into())
    }
}

impl Into<UniformVariable> for [f32; 3] {
    fn into(self) -> UniformVariable {
        UniformVariable::Vector3f(self)
    }
}

impl Into<UniformVariable> for Vector3<f32> {
    fn into(self) -> UniformVariable {
        UniformVariable::Vector3f(self.into())
    }
}

impl Into<UniformVariable> for [f32; 4] {
    fn into(self) -> UniformVariable {
        UniformVariable::Vector4f(self)
    }
}

impl Into<UniformVariable> for Vector4<f32> {
    fn into(self) -> UniformVariable {
        UniformVariable::Vector4f(self.into())
    }
}

impl Into<UniformVariable> for Color {
    fn into(self) -> UniformVariable {
        UniformVariable::Vector4f(self.rgba())
    }
}

impl Into<UniformVariable> for [[f32; 4]; 4] {
    fn into(self) -> UniformVariable {
        UniformVariable::Matrix4f(self)
    }
}

impl Into<UniformVariable> for Matrix4<f32> {
    fn into(self) -> UniformVariable {
        UniformVariable::Matrix4f(self.into())
    }
}

/// One active uniform of a linked program.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformSlot {
    pub name: String,
    pub variable_type: UniformVariableType,
    pub location: i32,
    /// The value last written to `location`.
    pub value: UniformVariable,
}

/// The uniforms of one program, addressed by slot index or by name. Every slot
/// remembers what was last written to the driver.
#[derive(Debug, Clone, Default)]
pub struct UniformStore {
    slots: Vec<UniformSlot>,
    names: FastHashMap<String, usize>,
}

impl UniformStore {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers a uniform with a zero cached value, returning its slot. A name
    /// registered twice keeps its first slot.
    pub fn insert<T>(&mut self, name: T, variable_type: UniformVariableType, location: i32) -> usize
    where
        T: Into<String>,
    {
        let name = name.into();
        if let Some(&slot) = self.names.get(&name) {
            return slot;
        }

        let slot = self.slots.len();
        self.names.insert(name.clone(), slot);
        self.slots.push(UniformSlot {
            name,
            variable_type,
            location,
            value: variable_type.zero(),
        });

        slot
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> ::std::slice::Iter<UniformSlot> {
        self.slots.iter()
    }

    /// Finds the slot of the named uniform.
    #[inline]
    pub fn slot(&self, name: &str) -> Option<usize> {
        self.names.get(name).cloned()
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<&UniformSlot> {
        self.slots.get(slot)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut UniformSlot> {
        self.slots.get_mut(slot)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn same() {
        let a = UniformVariable::F32(1.0);
        assert!(a.same(&UniformVariable::F32(1.0)));
        assert!(a.same(&UniformVariable::F32(1.0 + UNIFORM_EPSILON / 2.0)));
        assert!(!a.same(&UniformVariable::F32(1.1)));
        assert!(!a.same(&UniformVariable::I32(1)));

        let s = UniformVariable::Sampler(1);
        assert!(s.same(&UniformVariable::Sampler(1)));
        assert!(!s.same(&UniformVariable::Sampler(2)));

        let mut m = [[0.0; 4]; 4];
        let a = UniformVariable::Matrix4f(m);
        m[3][2] = 0.5;
        assert!(!a.same(&UniformVariable::Matrix4f(m)));
    }

    #[test]
    fn store() {
        let mut store = UniformStore::new();
        let color = store.insert("uColor", UniformVariableType::Vector4f, 3);
        let width = store.insert("uWidth", UniformVariableType::F32, 7);
        assert_eq!(store.insert("uColor", UniformVariableType::Vector4f, 3), color);

        assert_eq!(store.len(), 2);
        assert_eq!(store.slot("uColor"), Some(color));
        assert_eq!(store.slot("uWidth"), Some(width));
        assert_eq!(store.slot("uMissing"), None);
        assert_eq!(store.slot("ucolor"), None);

        let slot = store.get(width).unwrap();
        assert_eq!(slot.location, 7);
        assert_eq!(slot.value, UniformVariable::F32(0.0));
    }
}
