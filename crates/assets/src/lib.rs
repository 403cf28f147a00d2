//! External model sources.
//!
//! World generation asks an [`AssetSource`] for named models before falling
//! back to procedural geometry. A missing source is the expected case, not a
//! failure: callers log [`AssetError`] and build procedurally.
//!
//! Models are identified by a content hash of the file, so the same file
//! loaded twice yields the same [`AssetId`].

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Content-addressed asset ID computed from the asset data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// Material metadata pulled from a glTF document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialInfo {
    pub name: String,
    pub base_color: [f32; 4],
}

/// Metadata for a loaded model. Vertex data stays with the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAsset {
    pub id: AssetId,
    pub name: String,
    pub meshes: Vec<String>,
    pub materials: Vec<MaterialInfo>,
    pub animations: Vec<String>,
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no asset source provides `{0}`")]
    Unavailable(String),
    #[error("glTF parse error: {0}")]
    GltfParse(String),
}

/// A source of named models.
pub trait AssetSource {
    fn load_model(&self, name: &str) -> Result<ModelAsset, AssetError>;
}

/// The empty source: every request is unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAssets;

impl AssetSource for NoAssets {
    fn load_model(&self, name: &str) -> Result<ModelAsset, AssetError> {
        Err(AssetError::Unavailable(name.to_string()))
    }
}

/// Loads `<root>/<name>.gltf` JSON documents from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectoryAssets {
    fn load_model(&self, name: &str) -> Result<ModelAsset, AssetError> {
        let path = self.root.join(format!("{name}.gltf"));
        if !path.exists() {
            return Err(AssetError::Unavailable(name.to_string()));
        }
        let data = std::fs::read(&path)?;
        let model = parse_gltf(name, &data)?;
        tracing::debug!(
            name,
            meshes = model.meshes.len(),
            materials = model.materials.len(),
            "loaded model metadata"
        );
        Ok(model)
    }
}

/// Read mesh, material, and animation names out of a glTF JSON document.
pub fn parse_gltf(name: &str, data: &[u8]) -> Result<ModelAsset, AssetError> {
    let json: serde_json::Value =
        serde_json::from_slice(data).map_err(|e| AssetError::GltfParse(e.to_string()))?;
    if json.get("asset").is_none() {
        return Err(AssetError::GltfParse("missing `asset` header".into()));
    }

    let names = |key: &str| -> Vec<String> {
        json.get(key)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let base = item.get("name").and_then(|n| n.as_str()).unwrap_or("unnamed");
                        format!("{base}_{i}")
                    })
                    .collect()
            })
            .unwrap_or_default()
    };

    let meshes = names("meshes");
    let animations = names("animations");

    let mut materials = Vec::new();
    if let Some(items) = json.get("materials").and_then(|m| m.as_array()) {
        for (i, mat_val) in items.iter().enumerate() {
            let base = mat_val
                .get("name")
                .and_then(|n| n.as_str())
                .unwrap_or("unnamed");
            let base_color = mat_val
                .get("pbrMetallicRoughness")
                .and_then(|pbr| pbr.get("baseColorFactor"))
                .and_then(|c| c.as_array())
                .map(|arr| {
                    let mut color = [0.8f32, 0.8, 0.8, 1.0];
                    for (i, v) in arr.iter().enumerate().take(4) {
                        if let Some(f) = v.as_f64() {
                            color[i] = f as f32;
                        }
                    }
                    color
                })
                .unwrap_or([0.8, 0.8, 0.8, 1.0]);
            materials.push(MaterialInfo {
                name: format!("{base}_{i}"),
                base_color,
            });
        }
    }

    Ok(ModelAsset {
        id: content_hash(data),
        name: name.to_string(),
        meshes,
        materials,
        animations,
    })
}

fn content_hash(data: &[u8]) -> AssetId {
    let result = Sha256::digest(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    AssetId(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASTRONAUT: &str = r#"{
        "asset": { "version": "2.0" },
        "meshes": [{ "name": "Body" }, {}],
        "materials": [{
            "name": "Suit",
            "pbrMetallicRoughness": { "baseColorFactor": [0.9, 0.9, 1.0, 1.0] }
        }],
        "animations": [{ "name": "Idle" }, { "name": "Walk" }]
    }"#;

    #[test]
    fn no_assets_is_always_unavailable() {
        let err = NoAssets.load_model("city").unwrap_err();
        assert!(matches!(err, AssetError::Unavailable(ref n) if n == "city"));
    }

    #[test]
    fn parse_extracts_names() {
        let model = parse_gltf("astronaut", ASTRONAUT.as_bytes()).unwrap();
        assert_eq!(model.meshes, vec!["Body_0", "unnamed_1"]);
        assert_eq!(model.animations, vec!["Idle_0", "Walk_1"]);
        assert_eq!(model.materials[0].name, "Suit_0");
        assert_eq!(model.materials[0].base_color, [0.9, 0.9, 1.0, 1.0]);
    }

    #[test]
    fn parse_rejects_non_gltf() {
        assert!(matches!(
            parse_gltf("x", b"not json"),
            Err(AssetError::GltfParse(_))
        ));
        assert!(matches!(
            parse_gltf("x", br#"{"meshes": []}"#),
            Err(AssetError::GltfParse(_))
        ));
    }

    #[test]
    fn content_addressed_ids() {
        let a = parse_gltf("a", ASTRONAUT.as_bytes()).unwrap();
        let b = parse_gltf("b", ASTRONAUT.as_bytes()).unwrap();
        assert_eq!(a.id, b.id);
        let c = parse_gltf("c", br#"{"asset": {}}"#).unwrap();
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn directory_source_loads_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("astronaut.gltf"), ASTRONAUT).unwrap();
        let source = DirectoryAssets::new(dir.path());

        let model = source.load_model("astronaut").unwrap();
        assert_eq!(model.name, "astronaut");
        assert!(matches!(
            source.load_model("city"),
            Err(AssetError::Unavailable(_))
        ));
    }
}
