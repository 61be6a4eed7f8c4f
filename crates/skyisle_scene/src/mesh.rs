use glam::{Vec3, Vec4};

/// Metallic-roughness surface parameters of a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardMaterial {
    pub base_color: Vec4,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: Vec3,
}

impl StandardMaterial {
    #[must_use]
    pub fn new(base_color: Vec4) -> Self {
        Self {
            base_color,
            roughness: 1.0,
            metalness: 1.0,
            emissive: Vec3::ZERO,
        }
    }

    pub fn set_roughness(&mut self, roughness: f32) {
        self.roughness = roughness.clamp(0.0, 1.0);
    }

    pub fn set_metalness(&mut self, metalness: f32) {
        self.metalness = metalness.clamp(0.0, 1.0);
    }
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self::new(Vec4::ONE)
    }
}

/// Shadow participation of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadowFlags {
    pub cast: bool,
    pub receive: bool,
}

impl ShadowFlags {
    pub const NONE: Self = Self {
        cast: false,
        receive: false,
    };
    pub const BOTH: Self = Self {
        cast: true,
        receive: true,
    };
}

/// One drawable primitive of a loaded model.
///
/// Geometry is kept as counts and bounds only; vertex data stays with the
/// render step.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub material: Option<StandardMaterial>,
    pub shadows: ShadowFlags,
    pub vertex_count: usize,
    pub index_count: usize,
    /// Local-space bounding box `(min, max)`, if the model declared one.
    pub bounds: Option<(Vec3, Vec3)>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<String>, material: Option<StandardMaterial>) -> Self {
        Self {
            name: name.into(),
            material,
            shadows: ShadowFlags::NONE,
            vertex_count: 0,
            index_count: 0,
            bounds: None,
        }
    }
}
