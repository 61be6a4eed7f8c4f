//! Scene configuration.
//!
//! Every field has a default matching the stock scene, so a partial JSON
//! document only needs the values it changes.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyisle_core::{Error, Result};
use skyisle_scene::{CameraRig, StandardMaterial};

use crate::motion::{BirdFlight, IslandMotion};

/// Surface values forced onto every mesh of a loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialOverride {
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for MaterialOverride {
    fn default() -> Self {
        Self {
            roughness: 0.8,
            metalness: 0.2,
        }
    }
}

impl MaterialOverride {
    /// Writes roughness and metalness into `material`. Meshes without a
    /// material are left alone.
    pub fn apply(&self, material: &mut Option<StandardMaterial>) {
        if let Some(mat) = material {
            mat.set_roughness(self.roughness);
            mat.set_metalness(self.metalness);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandConfig {
    pub asset: PathBuf,
    pub spawn_position: Vec3,
    pub material: MaterialOverride,
    pub motion: IslandMotion,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            asset: PathBuf::from("assets/ISLA_FLOTANTE.glb"),
            spawn_position: Vec3::new(0.0, -5.0, 0.0),
            material: MaterialOverride::default(),
            motion: IslandMotion::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirdConfig {
    pub asset: PathBuf,
    pub spawn_position: Vec3,
    pub scale: f32,
    pub material: MaterialOverride,
    /// Playback speed of the model's first animation clip.
    pub animation_time_scale: f32,
    pub flight: BirdFlight,
}

impl Default for BirdConfig {
    fn default() -> Self {
        Self {
            asset: PathBuf::from("assets/peregrinefalcon.glb"),
            spawn_position: Vec3::new(15.0, 5.0, 0.0),
            scale: 0.5,
            material: MaterialOverride {
                roughness: 0.6,
                metalness: 0.3,
            },
            animation_time_scale: 0.2,
            flight: BirdFlight::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 20.0, 75.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraConfig {
    #[must_use]
    pub fn to_rig(&self) -> CameraRig {
        CameraRig::new_perspective(self.fov_degrees, self.aspect, self.near, self.far)
            .looking_at(self.position, self.target)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub island: IslandConfig,
    pub bird: BirdConfig,
    pub camera: CameraConfig,
}

impl SceneConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded scene config from '{}'", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values that would produce NaN transforms or a degenerate
    /// camera.
    pub fn validate(&self) -> Result<()> {
        let island = &self.island;
        check_finite("island.spawn_position", island.spawn_position)?;
        check_material("island.material", island.material)?;
        for (field, value) in [
            ("island.motion.base_height", island.motion.base_height),
            ("island.motion.amplitude", island.motion.amplitude),
            ("island.motion.frequency", island.motion.frequency),
        ] {
            check_scalar(field, value)?;
        }

        let bird = &self.bird;
        check_finite("bird.spawn_position", bird.spawn_position)?;
        check_material("bird.material", bird.material)?;
        check_scalar("bird.animation_time_scale", bird.animation_time_scale)?;
        check_scalar("bird.scale", bird.scale)?;
        if bird.scale <= 0.0 {
            return Err(Error::Config(format!("bird.scale must be positive, got {}", bird.scale)));
        }
        let flight = &bird.flight;
        for (field, value) in [
            ("bird.flight.radius", flight.radius),
            ("bird.flight.angular_speed", flight.angular_speed),
            ("bird.flight.base_height", flight.base_height),
            ("bird.flight.bob_amplitude", flight.bob_amplitude),
            ("bird.flight.bob_frequency", flight.bob_frequency),
            ("bird.flight.bank_factor", flight.bank_factor),
        ] {
            check_scalar(field, value)?;
        }
        if flight.radius < 0.0 {
            return Err(Error::Config(format!(
                "bird.flight.radius must not be negative, got {}",
                flight.radius
            )));
        }

        let camera = &self.camera;
        check_finite("camera.position", camera.position)?;
        check_finite("camera.target", camera.target)?;
        for (field, value) in [
            ("camera.fov_degrees", camera.fov_degrees),
            ("camera.aspect", camera.aspect),
            ("camera.near", camera.near),
            ("camera.far", camera.far),
        ] {
            check_scalar(field, value)?;
        }
        if camera.near <= 0.0 || camera.far <= camera.near {
            return Err(Error::Config(format!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                camera.near, camera.far
            )));
        }
        if camera.fov_degrees <= 0.0 || camera.fov_degrees >= 180.0 {
            return Err(Error::Config(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                camera.fov_degrees
            )));
        }
        if camera.aspect <= 0.0 {
            return Err(Error::Config(format!("camera.aspect must be positive, got {}", camera.aspect)));
        }
        if camera.position == camera.target {
            return Err(Error::Config("camera.position and camera.target coincide".to_string()));
        }

        Ok(())
    }
}

fn check_scalar(field: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::Config(format!("{field} must be finite, got {value}")))
    }
}

fn check_finite(field: &str, value: Vec3) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::Config(format!("{field} must be finite, got {value}")))
    }
}

fn check_material(field: &str, material: MaterialOverride) -> Result<()> {
    for value in [material.roughness, material.metalness] {
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::Config(format!("{field} values must be within [0, 1], got {value}")));
        }
    }
    Ok(())
}
