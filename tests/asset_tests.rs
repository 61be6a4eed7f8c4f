//! Asset Loading Tests
//!
//! Tests for:
//! - GltfLoader: nodes, hierarchy, meshes, materials, animation clips
//! - Buffer sources: data URI, GLB binary chunk, external .bin file
//! - Malformed input rejection
//! - Prefab instantiation into a Scene
//! - FileAssetReader progress reporting
//! - AssetServer event delivery

mod common;

use std::path::Path;

use glam::{Vec3, Vec4};

use skyisle::animation::{TargetPath, TrackData};
use skyisle::assets::{
    AssetReader, AssetServer, FileAssetReader, GltfLoader, LoadEvent, Prefab, PrefabNode,
};
use skyisle::scene::{Mesh, Scene};
use skyisle::{AssetError, Error};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn parse(bytes: &[u8]) -> Prefab {
    GltfLoader::parse(bytes, Path::new("."), "falcon").unwrap()
}

// ============================================================================
// GltfLoader
// ============================================================================

#[test]
fn gltf_nodes_and_hierarchy() {
    let prefab = parse(&common::embedded_gltf());

    assert_eq!(prefab.name, "falcon");
    assert_eq!(prefab.nodes.len(), 2);
    assert_eq!(prefab.root_indices, vec![0]);
    assert_eq!(prefab.nodes[0].name, "Body");
    assert_eq!(prefab.nodes[0].children_indices, vec![1]);
    assert_eq!(prefab.nodes[1].name, "Wing");
    assert_eq!(prefab.nodes[1].transform.position, Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn gltf_mesh_summary_and_material() {
    let prefab = parse(&common::embedded_gltf());

    assert_eq!(prefab.mesh_count(), 1);
    let mesh = &prefab.nodes[0].meshes[0];
    assert_eq!(mesh.name, "BodyMesh");
    assert_eq!(mesh.vertex_count, 3);
    assert_eq!(mesh.index_count, 3);
    assert_eq!(mesh.bounds, Some((Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0))));

    let material = mesh.material.unwrap();
    assert_eq!(material.base_color, Vec4::new(0.5, 0.4, 0.3, 1.0));
    assert!(approx(material.roughness, 0.5));
    assert!(approx(material.metalness, 1.0));
}

#[test]
fn gltf_animation_clip() {
    let prefab = parse(&common::embedded_gltf());

    assert_eq!(prefab.animations.len(), 1);
    let clip = &prefab.animations[0];
    assert_eq!(clip.name, "Flap");
    assert!(approx(clip.duration, 1.0));
    assert_eq!(clip.tracks.len(), 1);

    let track = &clip.tracks[0];
    assert_eq!(track.meta.node_name, "Wing");
    assert_eq!(track.meta.target, TargetPath::Translation);
    let TrackData::Vector3(keys) = &track.data else {
        panic!("translation track should hold Vec3 keys");
    };
    assert_eq!(keys.values, vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)]);
}

#[test]
fn glb_binary_chunk() {
    let prefab = parse(&common::glb());
    assert_eq!(prefab.nodes.len(), 2);
    assert_eq!(prefab.animations.len(), 1);
    assert_eq!(prefab.nodes[0].meshes[0].vertex_count, 3);
}

#[test]
fn external_buffer_resolved_against_base_dir() {
    let dir = common::temp_dir("external_bin");
    std::fs::write(dir.join("falcon.bin"), common::buffer_bytes()).unwrap();
    let json = serde_json::to_vec(&common::document(Some("falcon.bin"))).unwrap();

    let prefab = GltfLoader::parse(&json, &dir, "falcon").unwrap();
    assert_eq!(prefab.animations[0].tracks.len(), 1);
}

#[test]
fn missing_external_buffer_is_not_found() {
    let dir = common::temp_dir("missing_bin");
    let json = serde_json::to_vec(&common::document(Some("absent.bin"))).unwrap();

    let err = GltfLoader::parse(&json, &dir, "falcon").unwrap_err();
    assert!(matches!(err, Error::Asset(AssetError::NotFound(_))), "got {err:?}");
}

#[test]
fn garbage_bytes_rejected() {
    let err = GltfLoader::parse(b"definitely not a model", Path::new("."), "x").unwrap_err();
    assert!(matches!(err, Error::Asset(AssetError::Gltf(_))), "got {err:?}");
}

#[test]
fn short_output_accessor_rejected() {
    let mut doc = common::document(Some(&common::data_uri()));
    doc["accessors"][3]["count"] = serde_json::json!(1);
    let json = serde_json::to_vec(&doc).unwrap();

    let err = GltfLoader::parse(&json, Path::new("."), "x").unwrap_err();
    assert!(matches!(err, Error::Asset(AssetError::InvalidData(_))), "got {err:?}");
}

#[test]
fn truncated_data_uri_rejected() {
    let mut doc = common::document(Some(&common::data_uri()));
    doc["buffers"][0]["byteLength"] = serde_json::json!(common::BUFFER_LEN + 16);
    let json = serde_json::to_vec(&doc).unwrap();

    assert!(GltfLoader::parse(&json, Path::new("."), "x").is_err());
}

// ============================================================================
// Prefab instantiation
// ============================================================================

#[test]
fn instantiate_builds_named_root() {
    let prefab = parse(&common::embedded_gltf());
    let mut scene = Scene::new();

    let root = prefab.instantiate(&mut scene);

    assert_eq!(scene.get_name(root), Some("falcon"));
    let body = scene.get_node(root).unwrap().children()[0];
    assert_eq!(scene.get_name(body), Some("Body"));
    assert!(scene.get_mesh(body).is_some());
    let wing = scene.get_node(body).unwrap().children()[0];
    assert_eq!(scene.get_name(wing), Some("Wing"));
    assert_eq!(scene.root_nodes, vec![root]);
}

#[test]
fn instantiate_twice_gives_independent_subgraphs() {
    let prefab = parse(&common::embedded_gltf());
    let mut scene = Scene::new();

    let a = prefab.instantiate(&mut scene);
    let b = prefab.instantiate(&mut scene);

    assert_ne!(a, b);
    assert_eq!(scene.node_count(), 6);
    assert_eq!(scene.meshes.len(), 2);
}

#[test]
fn instantiate_splits_extra_primitives_into_children() {
    let mut node = PrefabNode::new("Rock");
    node.meshes = vec![Mesh::new("top", None), Mesh::new("bottom", None), Mesh::new("moss", None)];
    let mut prefab = Prefab::new("island");
    prefab.nodes.push(node);
    prefab.root_indices.push(0);

    let mut scene = Scene::new();
    let root = prefab.instantiate(&mut scene);
    let rock = scene.get_node(root).unwrap().children()[0];

    assert_eq!(scene.get_mesh(rock).unwrap().name, "top");
    let extras = scene.get_node(rock).unwrap().children().to_vec();
    assert_eq!(extras.len(), 2);
    assert_eq!(scene.get_mesh(extras[0]).unwrap().name, "bottom");
    assert_eq!(scene.get_mesh(extras[1]).unwrap().name, "moss");
    assert_eq!(scene.for_each_mesh_mut(root, |_| {}), 3);
}

#[test]
fn instantiate_keeps_nodes_outside_scene_list() {
    let mut prefab = Prefab::new("loose");
    prefab.nodes.push(PrefabNode::new("listed"));
    prefab.nodes.push(PrefabNode::new("unlisted"));
    prefab.root_indices.push(0);

    let mut scene = Scene::new();
    let root = prefab.instantiate(&mut scene);

    assert_eq!(scene.root_nodes, vec![root]);
    assert_eq!(scene.subtree(root).len(), 3);
}

// ============================================================================
// FileAssetReader
// ============================================================================

#[test]
fn reader_reports_monotonic_progress() {
    let payload: Vec<u8> = (0..200_000_u32).map(|i| (i % 251) as u8).collect();
    let path = common::write_fixture("reader_progress", "blob.bin", &payload);

    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let reader = FileAssetReader::for_file(&path);
    let mut reports = Vec::new();
    let bytes = runtime
        .block_on(reader.read_bytes("blob.bin", |loaded, total| reports.push((loaded, total))))
        .unwrap();

    assert_eq!(bytes, payload);
    assert!(reports.len() > 1, "expected several chunks, got {reports:?}");
    assert!(reports.windows(2).all(|w| w[0].0 <= w[1].0));
    assert_eq!(reports.last().copied(), Some((200_000, 200_000)));
}

#[test]
fn reader_missing_file_is_not_found() {
    let dir = common::temp_dir("reader_missing");
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let reader = FileAssetReader::new(&dir);

    let err = runtime.block_on(reader.read_bytes("nope.glb", |_, _| {})).unwrap_err();
    assert!(matches!(err, Error::Asset(AssetError::NotFound(_))), "got {err:?}");
}

// ============================================================================
// AssetServer
// ============================================================================

fn drain_until_terminal(server: &mut AssetServer) -> Vec<LoadEvent> {
    let mut events = Vec::new();
    let finished = common::wait_until(|| {
        events.extend(server.poll());
        events.iter().any(LoadEvent::is_terminal)
    });
    assert!(finished, "load did not finish in time");
    events
}

#[test]
fn server_delivers_progress_then_prefab() {
    let bytes = common::glb();
    let path = common::write_fixture("server_ok", "falcon.glb", &bytes);
    let mut server = AssetServer::new();

    let id = server.load_gltf(&path);
    assert_eq!(server.in_flight(), 1);
    let events = drain_until_terminal(&mut server);

    assert!(events.iter().all(|e| e.id() == id));
    let last = events.last().unwrap();
    let LoadEvent::Loaded { prefab, .. } = last else {
        panic!("expected Loaded, got {last:?}");
    };
    assert_eq!(prefab.name, "falcon");
    assert_eq!(prefab.animations.len(), 1);

    let total = bytes.len() as u64;
    assert!(events.iter().any(|e| matches!(e, LoadEvent::Progress { loaded, total: t, .. } if *loaded == total && *t == total)));
    assert_eq!(server.in_flight(), 0);
}

#[test]
fn server_reports_missing_file_as_failure() {
    let dir = common::temp_dir("server_missing");
    let mut server = AssetServer::new();

    let id = server.load_gltf(dir.join("ghost.glb"));
    let events = drain_until_terminal(&mut server);

    assert_eq!(events.len(), 1);
    match &events[0] {
        LoadEvent::Failed { id: failed, error } => {
            assert_eq!(*failed, id);
            assert!(matches!(error, Error::Asset(AssetError::NotFound(_))), "got {error:?}");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(server.in_flight(), 0);
}

#[test]
fn server_ids_are_distinct() {
    let dir = common::temp_dir("server_ids");
    let mut server = AssetServer::new();
    let a = server.load_gltf(dir.join("a.glb"));
    let b = server.load_gltf(dir.join("b.glb"));
    assert_ne!(a, b);
    assert_eq!(server.in_flight(), 2);
}
