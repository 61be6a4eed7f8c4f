//! Scene Configuration Tests
//!
//! Tests for:
//! - stock defaults
//! - partial JSON documents falling back to defaults
//! - validation failures
//! - material override
//! - file loading

use glam::{Vec3, Vec4};

use skyisle::scene::StandardMaterial;
use skyisle::{Error, MaterialOverride, SceneConfig};

const EPSILON: f32 = 1e-6;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn defaults_match_stock_scene() {
    let config = SceneConfig::default();

    assert_eq!(config.island.spawn_position, Vec3::new(0.0, -5.0, 0.0));
    assert!(approx(config.island.material.roughness, 0.8));
    assert!(approx(config.island.material.metalness, 0.2));
    assert!(approx(config.island.motion.amplitude, 0.5));

    assert_eq!(config.bird.spawn_position, Vec3::new(15.0, 5.0, 0.0));
    assert!(approx(config.bird.scale, 0.5));
    assert!(approx(config.bird.material.roughness, 0.6));
    assert!(approx(config.bird.material.metalness, 0.3));
    assert!(approx(config.bird.animation_time_scale, 0.2));
    assert!(approx(config.bird.flight.radius, 15.0));

    assert_eq!(config.camera.position, Vec3::new(0.0, 20.0, 75.0));
    assert!(approx(config.camera.fov_degrees, 75.0));
    assert!(config.validate().is_ok());
}

#[test]
fn camera_rig_from_config() {
    let rig = SceneConfig::default().camera.to_rig();
    assert_eq!(rig.position, Vec3::new(0.0, 20.0, 75.0));
    assert_eq!(rig.target, Vec3::ZERO);
    assert!(approx(rig.near, 0.1));
    assert!(approx(rig.far, 1000.0));
    assert!(approx(rig.fov, 75.0_f32.to_radians()));
}

// ============================================================================
// Material override
// ============================================================================

#[test]
fn material_override_adjusts_existing_material() {
    let mut material = Some(StandardMaterial::new(Vec4::new(0.5, 0.4, 0.3, 1.0)));
    MaterialOverride { roughness: 0.6, metalness: 0.3 }.apply(&mut material);

    let mat = material.unwrap();
    assert!(approx(mat.roughness, 0.6));
    assert!(approx(mat.metalness, 0.3));
    assert_eq!(mat.base_color, Vec4::new(0.5, 0.4, 0.3, 1.0));
}

#[test]
fn material_override_skips_meshes_without_material() {
    let mut material: Option<StandardMaterial> = None;
    MaterialOverride::default().apply(&mut material);
    assert!(material.is_none());
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn empty_document_is_default() -> anyhow::Result<()> {
    let config = SceneConfig::from_json_str("{}")?;
    assert_eq!(config, SceneConfig::default());
    Ok(())
}

#[test]
fn partial_document_keeps_other_defaults() -> anyhow::Result<()> {
    let config = SceneConfig::from_json_str(
        r#"{
            "bird": { "flight": { "radius": 30.0 }, "asset": "models/hawk.glb" },
            "island": { "motion": { "amplitude": 2.0 } }
        }"#,
    )?;

    assert!(approx(config.bird.flight.radius, 30.0));
    assert!(approx(config.bird.flight.angular_speed, 0.5));
    assert_eq!(config.bird.asset.to_str(), Some("models/hawk.glb"));
    assert!(approx(config.bird.scale, 0.5));
    assert!(approx(config.island.motion.amplitude, 2.0));
    assert!(approx(config.island.motion.base_height, -5.0));
    Ok(())
}

#[test]
fn vectors_are_arrays() -> anyhow::Result<()> {
    let config = SceneConfig::from_json_str(r#"{ "camera": { "position": [1.0, 2.0, 3.0] } }"#)?;
    assert_eq!(config.camera.position, Vec3::new(1.0, 2.0, 3.0));
    Ok(())
}

#[test]
fn serialized_config_parses_back() -> anyhow::Result<()> {
    let mut config = SceneConfig::default();
    config.bird.flight.bank_factor = 0.25;
    let json = config.to_json_string()?;
    assert_eq!(SceneConfig::from_json_str(&json)?, config);
    Ok(())
}

#[test]
fn malformed_json_is_json_error() {
    let err = SceneConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, Error::Json(_)), "got {err:?}");
}

// ============================================================================
// Validation
// ============================================================================

fn assert_config_error(config: &SceneConfig) {
    let err = config.validate().unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {err:?}");
}

#[test]
fn negative_radius_rejected() {
    let mut config = SceneConfig::default();
    config.bird.flight.radius = -1.0;
    assert_config_error(&config);
}

#[test]
fn non_positive_scale_rejected() {
    let mut config = SceneConfig::default();
    config.bird.scale = 0.0;
    assert_config_error(&config);
}

#[test]
fn non_finite_values_rejected() {
    let mut config = SceneConfig::default();
    config.island.motion.frequency = f32::NAN;
    assert_config_error(&config);

    let mut config = SceneConfig::default();
    config.bird.spawn_position = Vec3::new(f32::INFINITY, 0.0, 0.0);
    assert_config_error(&config);
}

#[test]
fn bad_camera_planes_rejected() {
    let mut config = SceneConfig::default();
    config.camera.near = 0.0;
    assert_config_error(&config);

    let mut config = SceneConfig::default();
    config.camera.far = 0.05;
    assert_config_error(&config);
}

#[test]
fn material_out_of_range_rejected() {
    let mut config = SceneConfig::default();
    config.island.material.roughness = 1.5;
    assert_config_error(&config);
}

#[test]
fn invalid_json_values_fail_validation() {
    let err = SceneConfig::from_json_str(r#"{ "camera": { "near": -1.0 } }"#).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {err:?}");
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn load_from_file() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("skyisle_config_{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("scene.json");
    std::fs::write(&path, r#"{ "bird": { "scale": 2.0 } }"#)?;

    let config = SceneConfig::from_json_file(&path)?;
    assert!(approx(config.bird.scale, 2.0));
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let err = SceneConfig::from_json_file("/nonexistent/skyisle/scene.json").unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {err:?}");
}
