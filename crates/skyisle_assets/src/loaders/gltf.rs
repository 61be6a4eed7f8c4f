use std::path::Path;
use std::sync::Arc;

use base64::Engine as _;
use glam::{Quat, Vec3, Vec4};
use gltf::animation::util::ReadOutputs;
use skyisle_animation::{
    AnimationClip, InterpolationMode, KeyframeTrack, TargetPath, Track, TrackData, TrackMeta,
};
use skyisle_core::{AssetError, Result};
use skyisle_scene::{Mesh, StandardMaterial};

use crate::prefab::{Prefab, PrefabNode};

/// Decodes glTF 2.0 documents (`.gltf` JSON or `.glb` binary) into a [`Prefab`].
///
/// Geometry is summarized as counts and bounds; textures are not decoded.
pub struct GltfLoader;

impl GltfLoader {
    /// Parses `bytes`. External buffers are resolved against `base_dir`.
    pub fn parse(bytes: &[u8], base_dir: &Path, name: &str) -> Result<Prefab> {
        let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| AssetError::Gltf(e.to_string()))?;
        let buffers = Self::load_buffers(&gltf, base_dir)?;

        let mut prefab = Prefab::new(name);
        prefab.nodes = gltf.nodes().map(|node| Self::load_node(&node)).collect();
        prefab.root_indices = Self::root_indices(&gltf);
        prefab.animations = Self::load_animations(&gltf, &buffers)?
            .into_iter()
            .map(Arc::new)
            .collect();

        log::debug!(
            "Parsed glTF '{}': {} nodes, {} meshes, {} animations",
            name,
            prefab.nodes.len(),
            prefab.mesh_count(),
            prefab.animations.len()
        );

        Ok(prefab)
    }

    fn load_buffers(gltf: &gltf::Gltf, base_dir: &Path) -> Result<Vec<Vec<u8>>> {
        let mut buffer_data = Vec::new();
        for buffer in gltf.buffers() {
            let data = match buffer.source() {
                gltf::buffer::Source::Bin => gltf
                    .blob
                    .as_deref()
                    .map(<[u8]>::to_vec)
                    .ok_or_else(|| AssetError::Format("Missing GLB binary chunk".to_string()))?,
                gltf::buffer::Source::Uri(uri) => Self::load_uri(uri, base_dir)?,
            };

            if data.len() < buffer.length() {
                return Err(AssetError::InvalidData(format!(
                    "Buffer {} holds {} bytes, expected {}",
                    buffer.index(),
                    data.len(),
                    buffer.length()
                ))
                .into());
            }
            buffer_data.push(data);
        }
        Ok(buffer_data)
    }

    fn load_uri(uri: &str, base_dir: &Path) -> Result<Vec<u8>> {
        if let Some(rest) = uri.strip_prefix("data:") {
            let Some((_, payload)) = rest.split_once(";base64,") else {
                return Err(AssetError::Format(format!("Unsupported data URI: {uri:.40}")).into());
            };
            return base64::engine::general_purpose::STANDARD
                .decode(payload)
                .map_err(|e| AssetError::InvalidData(format!("Bad base64 buffer: {e}")).into());
        }

        let path = base_dir.join(uri);
        std::fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(path.display().to_string()).into()
            } else {
                AssetError::Io {
                    path: path.display().to_string(),
                    source,
                }
                .into()
            }
        })
    }

    fn node_name(node: &gltf::Node) -> String {
        node.name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Node_{}", node.index()))
    }

    fn load_node(node: &gltf::Node) -> PrefabNode {
        let mut prefab_node = PrefabNode::new(Self::node_name(node));

        let (t, r, s) = node.transform().decomposed();
        prefab_node.transform.position = Vec3::from_array(t);
        prefab_node.transform.rotation = Quat::from_array(r);
        prefab_node.transform.scale = Vec3::from_array(s);

        prefab_node.children_indices = node.children().map(|c| c.index()).collect();

        if let Some(mesh) = node.mesh() {
            let mesh_name = mesh
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Mesh_{}", mesh.index()));
            prefab_node.meshes = mesh
                .primitives()
                .map(|primitive| Self::load_primitive(&mesh_name, &primitive))
                .collect();
        }

        prefab_node
    }

    fn load_primitive(mesh_name: &str, primitive: &gltf::Primitive) -> Mesh {
        let material = primitive.material();
        let pbr = material.pbr_metallic_roughness();

        let mut engine_mat = StandardMaterial::new(Vec4::from_array(pbr.base_color_factor()));
        engine_mat.set_roughness(pbr.roughness_factor());
        engine_mat.set_metalness(pbr.metallic_factor());
        engine_mat.emissive = Vec3::from_array(material.emissive_factor());

        let mut mesh = Mesh::new(mesh_name, Some(engine_mat));
        mesh.vertex_count = primitive
            .get(&gltf::Semantic::Positions)
            .map_or(0, |accessor| accessor.count());
        mesh.index_count = primitive.indices().map_or(0, |accessor| accessor.count());

        let bounds = primitive.bounding_box();
        mesh.bounds = Some((Vec3::from_array(bounds.min), Vec3::from_array(bounds.max)));

        mesh
    }

    /// Top-level nodes of the default scene, or of the first scene, or every
    /// parentless node when the document declares no scenes.
    fn root_indices(gltf: &gltf::Gltf) -> Vec<usize> {
        if let Some(scene) = gltf.default_scene().or_else(|| gltf.scenes().next()) {
            return scene.nodes().map(|n| n.index()).collect();
        }

        let mut has_parent = vec![false; gltf.nodes().len()];
        for node in gltf.nodes() {
            for child in node.children() {
                has_parent[child.index()] = true;
            }
        }
        has_parent
            .iter()
            .enumerate()
            .filter(|&(_, &p)| !p)
            .map(|(i, _)| i)
            .collect()
    }

    fn load_animations(gltf: &gltf::Gltf, buffers: &[Vec<u8>]) -> Result<Vec<AnimationClip>> {
        let mut animations = Vec::new();

        for anim in gltf.animations() {
            let clip_name = anim
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Animation_{}", anim.index()));
            let mut tracks = Vec::new();

            for channel in anim.channels() {
                let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));
                let node_name = Self::node_name(&channel.target().node());

                let Some(inputs) = reader.read_inputs() else {
                    log::warn!("Animation '{clip_name}': channel without keyframe times, skipped");
                    continue;
                };
                let times: Vec<f32> = inputs.collect();

                let interpolation = match channel.sampler().interpolation() {
                    gltf::animation::Interpolation::Linear => InterpolationMode::Linear,
                    gltf::animation::Interpolation::Step => InterpolationMode::Step,
                    gltf::animation::Interpolation::CubicSpline => InterpolationMode::CubicSpline,
                };

                let (target, data) = match reader.read_outputs() {
                    Some(ReadOutputs::Translations(iter)) => {
                        let values: Vec<Vec3> = iter.map(Vec3::from_array).collect();
                        Self::check_value_count(&clip_name, times.len(), values.len(), interpolation)?;
                        (
                            TargetPath::Translation,
                            TrackData::Vector3(KeyframeTrack::new(times, values, interpolation)),
                        )
                    }
                    Some(ReadOutputs::Rotations(iter)) => {
                        let values: Vec<Quat> = iter.into_f32().map(Quat::from_array).collect();
                        Self::check_value_count(&clip_name, times.len(), values.len(), interpolation)?;
                        (
                            TargetPath::Rotation,
                            TrackData::Quaternion(KeyframeTrack::new(times, values, interpolation)),
                        )
                    }
                    Some(ReadOutputs::Scales(iter)) => {
                        let values: Vec<Vec3> = iter.map(Vec3::from_array).collect();
                        Self::check_value_count(&clip_name, times.len(), values.len(), interpolation)?;
                        (
                            TargetPath::Scale,
                            TrackData::Vector3(KeyframeTrack::new(times, values, interpolation)),
                        )
                    }
                    Some(ReadOutputs::MorphTargetWeights(_)) => {
                        log::debug!("Animation '{clip_name}': morph weight channel on '{node_name}' skipped");
                        continue;
                    }
                    None => {
                        log::warn!("Animation '{clip_name}': channel without output values, skipped");
                        continue;
                    }
                };

                tracks.push(Track {
                    meta: TrackMeta { node_name, target },
                    data,
                });
            }

            animations.push(AnimationClip::new(clip_name, tracks));
        }

        Ok(animations)
    }

    fn check_value_count(
        clip_name: &str,
        keyframes: usize,
        values: usize,
        interpolation: InterpolationMode,
    ) -> Result<()> {
        let expected = match interpolation {
            InterpolationMode::CubicSpline => keyframes * 3,
            _ => keyframes,
        };
        if values == expected {
            Ok(())
        } else {
            Err(AssetError::InvalidData(format!(
                "Animation '{clip_name}': {keyframes} keyframes but {values} values (expected {expected})"
            ))
            .into())
        }
    }
}
