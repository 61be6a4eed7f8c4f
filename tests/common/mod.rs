//! glTF fixtures shared by the integration tests.
//!
//! Every model is a single triangle on node "Body" with a child node "Wing"
//! and one "Flap" clip sliding the wing from x = 1 to x = 3 over one second.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use base64::Engine as _;
use serde_json::{Value, json};

pub const BUFFER_LEN: usize = 76;

/// Positions (36 bytes), u16 indices (6 + 2 padding), keyframe times (8),
/// wing translations (24).
pub fn buffer_bytes() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(BUFFER_LEN);
    for v in [0.0_f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    for i in [0_u16, 1, 2] {
        bytes.extend_from_slice(&i.to_le_bytes());
    }
    bytes.extend_from_slice(&[0, 0]);
    for t in [0.0_f32, 1.0] {
        bytes.extend_from_slice(&t.to_le_bytes());
    }
    for v in [1.0_f32, 0.0, 0.0, 3.0, 0.0, 0.0] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    assert_eq!(bytes.len(), BUFFER_LEN);
    bytes
}

/// glTF document. `buffer_uri` of `None` means the GLB binary chunk.
pub fn document(buffer_uri: Option<&str>) -> Value {
    let mut buffer = json!({ "byteLength": BUFFER_LEN });
    if let Some(uri) = buffer_uri {
        buffer["uri"] = json!(uri);
    }

    json!({
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [
            { "name": "Body", "mesh": 0, "children": [1] },
            { "name": "Wing", "translation": [1.0, 0.0, 0.0] }
        ],
        "meshes": [{
            "name": "BodyMesh",
            "primitives": [{
                "attributes": { "POSITION": 0 },
                "indices": 1,
                "material": 0
            }]
        }],
        "materials": [{
            "name": "Feathers",
            "pbrMetallicRoughness": {
                "baseColorFactor": [0.5, 0.4, 0.3, 1.0],
                "roughnessFactor": 0.5,
                "metallicFactor": 1.0
            }
        }],
        "animations": [{
            "name": "Flap",
            "channels": [{ "sampler": 0, "target": { "node": 1, "path": "translation" } }],
            "samplers": [{ "input": 2, "output": 3, "interpolation": "LINEAR" }]
        }],
        "buffers": [buffer],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
            { "buffer": 0, "byteOffset": 36, "byteLength": 6 },
            { "buffer": 0, "byteOffset": 44, "byteLength": 8 },
            { "buffer": 0, "byteOffset": 52, "byteLength": 24 }
        ],
        "accessors": [
            {
                "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
            },
            { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" },
            {
                "bufferView": 2, "componentType": 5126, "count": 2, "type": "SCALAR",
                "min": [0.0], "max": [1.0]
            },
            { "bufferView": 3, "componentType": 5126, "count": 2, "type": "VEC3" }
        ]
    })
}

pub fn data_uri() -> String {
    format!(
        "data:application/octet-stream;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(buffer_bytes())
    )
}

/// `.gltf` JSON with the buffer embedded as a data URI.
pub fn embedded_gltf() -> Vec<u8> {
    serde_json::to_vec(&document(Some(&data_uri()))).unwrap()
}

/// Binary `.glb` container with the buffer in the BIN chunk.
pub fn glb() -> Vec<u8> {
    let mut json = serde_json::to_vec(&document(None)).unwrap();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let mut bin = buffer_bytes();
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2_u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);
    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(b"BIN\0");
    out.extend_from_slice(&bin);
    out
}

/// Fresh, empty directory under the system temp dir.
pub fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("skyisle_{tag}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Writes `bytes` as `file_name` into a fresh temp dir and returns its path.
pub fn write_fixture(tag: &str, file_name: &str, bytes: &[u8]) -> PathBuf {
    let path = temp_dir(tag).join(file_name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Polls `done` every 10 ms for up to five seconds.
pub fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    for _ in 0..500 {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}
