// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project data serialization and deserialization.
//!
//! A project file is `{version, output, items}` where each item carries its
//! image as a base64 data URL next to its crop and hotspots. JSON and YAML
//! are both accepted, chosen by file extension. Loading is forgiving:
//! missing fields fall back to defaults and unreadable items are skipped.

use super::media;
use crate::config::PROJECT_VERSION;
use crate::models::item::{Hotspot, HotspotId, ImageItem, ItemId};
use crate::models::project::{OutputConfig, Project};
use crate::models::rect::Rect;
use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// On-disk project record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub items: Vec<ItemRecord>,
}

/// On-disk image item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    /// A crop missing any coordinate is dropped as a whole.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub crop: Option<Rect>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub hotspots: Vec<HotspotRecord>,
}

/// On-disk hotspot: a flat rectangle plus ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotRecord {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<HotspotId>,
    #[serde(default, deserialize_with = "lenient")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub y: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub w: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub h: Option<f64>,
    /// Unparseable ids load as `None`, which behaves like a dangling link.
    #[serde(default, deserialize_with = "lenient")]
    pub target_id: Option<ItemId>,
}

impl HotspotRecord {
    fn rect(&self) -> Option<Rect> {
        Some(Rect::new(self.x?, self.y?, self.w?, self.h?))
    }
}

impl From<&Hotspot> for HotspotRecord {
    fn from(hotspot: &Hotspot) -> Self {
        Self {
            id: Some(hotspot.id),
            x: Some(hotspot.rect.x),
            y: Some(hotspot.rect.y),
            w: Some(hotspot.rect.w),
            h: Some(hotspot.rect.h),
            target_id: hotspot.target_id,
        }
    }
}

/// Read a field, treating a malformed value as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(T::deserialize(value)
        .map_err(|e| log::warn!("Ignoring malformed project field: {}", e))
        .ok())
}

/// Read a list, skipping entries that are malformed.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(entries) = value else {
        if !value.is_null() {
            log::warn!("Ignoring project list that is not a list");
        }
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| {
            T::deserialize(entry)
                .map_err(|e| log::warn!("Skipping malformed project entry: {}", e))
                .ok()
        })
        .collect())
}

/// Encode bytes as a `data:` URL.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decode a base64 `data:` URL back into bytes.
pub fn from_data_url(url: &str) -> Result<Vec<u8>> {
    let rest = url.strip_prefix("data:").ok_or_else(|| anyhow!("Not a data URL"))?;
    let (header, payload) = rest.split_once(',').ok_or_else(|| anyhow!("Malformed data URL"))?;
    if !header.ends_with(";base64") {
        bail!("Only base64 data URLs are supported");
    }
    STANDARD.decode(payload.trim()).context("Invalid base64 payload")
}

/// Build the on-disk record for a project.
pub fn to_file(project: &Project) -> ProjectFile {
    ProjectFile {
        version: Some(PROJECT_VERSION),
        output: Some(project.output.clone()),
        items: project
            .items
            .iter()
            .map(|item| ItemRecord {
                id: Some(item.id),
                name: Some(item.name.clone()),
                data_url: Some(to_data_url(&item.raster.mime, &item.raster.encoded)),
                crop: Some(item.crop),
                hotspots: item.hotspots.iter().map(HotspotRecord::from).collect(),
            })
            .collect(),
    }
}

/// Rebuild a project from its record. Rectangles are taken as stored.
pub fn from_file(file: ProjectFile) -> Project {
    let version = file.version.unwrap_or(PROJECT_VERSION);
    if version > PROJECT_VERSION {
        log::warn!("Project version {} is newer than supported version {}", version, PROJECT_VERSION);
    }
    let mut project = Project::new(file.output.unwrap_or_default());
    for (index, record) in file.items.into_iter().enumerate() {
        let Some(data_url) = record.data_url else {
            log::warn!("Skipping item {}: no image data", index);
            continue;
        };
        let raster = match from_data_url(&data_url).and_then(media::decode_image) {
            Ok(raster) => raster,
            Err(e) => {
                log::warn!("Skipping item {}: {:#}", index, e);
                continue;
            }
        };
        let mut item = ImageItem::new(record.name.unwrap_or_else(|| "image".to_string()), raster);
        if let Some(id) = record.id {
            item.id = id;
        }
        if let Some(crop) = record.crop {
            item.crop = crop;
        }
        for (spot, hotspot) in record.hotspots.into_iter().enumerate() {
            let Some(rect) = hotspot.rect() else {
                log::warn!("Dropping hotspot {} of item {}: incomplete rectangle", spot, index);
                continue;
            };
            item.hotspots.push(Hotspot {
                id: hotspot.id.unwrap_or_default(),
                rect,
                target_id: hotspot.target_id,
            });
        }
        project.items.push(item);
    }
    project
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Export project data to JSON format.
pub fn export_json(project: &Project) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_file(project))?)
}

/// Export project data to YAML format.
pub fn export_yaml(project: &Project) -> Result<String> {
    Ok(serde_yaml::to_string(&to_file(project))?)
}

/// Import project data from JSON format.
pub fn import_json(text: &str) -> Result<Project> {
    let file: ProjectFile = serde_json::from_str(text)?;
    Ok(from_file(file))
}

/// Import project data from YAML format.
pub fn import_yaml(text: &str) -> Result<Project> {
    let file: ProjectFile = serde_yaml::from_str(text)?;
    Ok(from_file(file))
}

/// Save a project, as YAML for `.yaml`/`.yml` paths and JSON otherwise.
pub fn save_project(project: &Project, path: &Path) -> Result<()> {
    let text = if is_yaml(path) {
        export_yaml(project)?
    } else {
        export_json(project)?
    };
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Load a project saved by [`save_project`].
pub fn load_project(path: &Path) -> Result<Project> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let project = if is_yaml(path) {
        import_yaml(&text)
    } else {
        import_json(&text)
    }
    .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(project)
}
