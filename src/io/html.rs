// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interactive HTML export.
//!
//! Renders every item at the export resolution, embeds the PNGs as data
//! URLs and writes a single page whose script swaps images when a hotspot
//! or list entry is clicked.

use super::serialization::to_data_url;
use crate::config::{EXPORT_HEIGHT, EXPORT_WIDTH};
use crate::export::{self, ExportedHotspot, RenderInstruction};
use crate::models::project::Project;
use crate::models::rect::Size;
use anyhow::{bail, Context, Result};
use image::{imageops, Rgba, RgbaImage};
use serde::Serialize;
use std::path::Path;

/// What the viewer script gets per item.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewerItem {
    name: String,
    data_url: String,
    hotspots: Vec<ExportedHotspot>,
}

/// Rasterise one render instruction.
pub fn render(source: &RgbaImage, instruction: &RenderInstruction) -> RgbaImage {
    let dest_w = instruction.dest.w.round().max(1.0) as u32;
    let dest_h = instruction.dest.h.round().max(1.0) as u32;
    let [r, g, b] = instruction.background;
    let mut frame = RgbaImage::from_pixel(dest_w, dest_h, Rgba([r, g, b, 255]));

    // Crop to whole pixels inside the source.
    let (src_w, src_h) = source.dimensions();
    let c = &instruction.source;
    let x0 = (c.x.round().max(0.0) as u32).min(src_w.saturating_sub(1));
    let y0 = (c.y.round().max(0.0) as u32).min(src_h.saturating_sub(1));
    let x1 = ((c.x + c.w).round().max(0.0) as u32).clamp(x0 + 1, src_w.max(x0 + 1));
    let y1 = ((c.y + c.h).round().max(0.0) as u32).clamp(y0 + 1, src_h.max(y0 + 1));
    if src_w == 0 || src_h == 0 {
        return frame;
    }

    let cropped = imageops::crop_imm(source, x0, y0, x1 - x0, y1 - y0).to_image();
    let stretched = imageops::resize(&cropped, dest_w, dest_h, imageops::FilterType::Triangle);
    imageops::overlay(&mut frame, &stretched, 0, 0);
    frame
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(bytes)
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the export page for `project` at `export` resolution.
pub fn build_document(project: &Project, export: Size) -> Result<String> {
    if project.items.is_empty() {
        bail!("Nothing to export: the project has no images");
    }

    let exported = export::export_project(project, export);
    let mut viewer_items = Vec::with_capacity(exported.len());
    for (item, out) in project.items.iter().zip(exported) {
        let frame = render(&item.raster.pixels, &out.render);
        let png = encode_png(&frame).with_context(|| format!("Failed to render '{}'", item.name))?;
        viewer_items.push(ViewerItem {
            name: out.name,
            data_url: to_data_url("image/png", &png),
            hotspots: out.hotspots,
        });
    }

    let bg = escape_html(&project.output.bg);
    page(&viewer_items, export, &bg)
}

/// Write the export page to `path`.
pub fn export_html(project: &Project, path: &Path) -> Result<()> {
    let export = Size::new(EXPORT_WIDTH as f64, EXPORT_HEIGHT as f64);
    let html = build_document(project, export)?;
    std::fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Exported {} images to {}", project.items.len(), path.display());
    Ok(())
}

fn page(items: &[ViewerItem], export: Size, bg: &str) -> Result<String> {
    let list: String = items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let name = escape_html(&item.name);
            format!(
                r#"
      <button class="thumb" data-idx="{idx}">
        <img src="{src}" alt="{name}" />
        <span>{name}</span>
      </button>"#,
                src = item.data_url,
            )
        })
        .collect();

    // Keep `<` out of the inline script so names cannot close the tag.
    let data = serde_json::to_string(items)?.replace('<', "\\u003c");
    let first = &items[0];
    let first_name = escape_html(&first.name);
    let (w, h) = (export.w, export.h);
    let ratio = w / h;
    let open_w = w * 0.85;
    let closed_w = w * 0.92;

    Ok(format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Mock Export</title>
  <style>
    body {{ margin: 0; font-family: 'Segoe UI', sans-serif; background: {bg}; color: #f4f4f4; min-height: 100vh; }}
    .layout {{ display: grid; grid-template-columns: 1fr; min-height: 100vh; }}
    .layout.open {{ grid-template-columns: 280px 1fr; }}
    .toggle {{ position: fixed; top: 16px; left: 16px; z-index: 10; padding: 8px 12px; border-radius: 999px;
      border: 1px solid rgba(255,255,255,0.2); background: rgba(0,0,0,0.35); color: #fff; cursor: pointer; }}
    aside {{ border-right: 1px solid rgba(255,255,255,0.1); padding: 16px; overflow-y: auto;
      background: rgba(0,0,0,0.2); display: none; }}
    .layout.open aside {{ display: block; }}
    main {{ display: grid; place-items: center; padding: 24px; }}
    .viewer {{ max-width: 100%; position: relative; width: min(100vw, calc(100vh * {ratio}), {w}px); aspect-ratio: {w} / {h}; }}
    .layout.open .viewer {{ width: min(calc(100vw - 360px), calc(100vh * {ratio}), {open_w}px); }}
    .layout:not(.open) .viewer {{ width: min(calc(100vw - 48px), calc(100vh * {ratio}), {closed_w}px); }}
    .viewer img {{ position: absolute; inset: 0; width: 100%; height: 100%; border-radius: 12px;
      box-shadow: 0 20px 60px rgba(0,0,0,0.45); display: block; object-fit: contain; }}
    .hotspot-layer {{ position: absolute; inset: 0; }}
    .hotspot {{ position: absolute; border: 1px solid rgba(255,255,255,0.4); background: rgba(255,255,255,0.08); cursor: pointer; }}
    .thumb {{ display: grid; grid-template-columns: 64px 1fr; gap: 12px; width: 100%; text-align: left; align-items: center;
      background: transparent; border: 1px solid transparent; color: inherit; padding: 8px; border-radius: 12px; cursor: pointer; }}
    .thumb img {{ width: 64px; height: 64px; object-fit: cover; border-radius: 10px; }}
    .thumb.active {{ border-color: rgba(255,255,255,0.3); background: rgba(255,255,255,0.05); }}
  </style>
</head>
<body>
  <button id="toggleList" class="toggle">List</button>
  <div id="layout" class="layout">
    <aside>{list}
    </aside>
    <main>
      <div class="viewer">
        <img id="mainImage" src="{first_src}" alt="{first_name}" />
        <div id="hotspotLayer" class="hotspot-layer"></div>
      </div>
    </main>
  </div>
  <script>
    const items = {data};
    const buttons = Array.from(document.querySelectorAll('.thumb'));
    const mainImage = document.getElementById('mainImage');
    const hotspotLayer = document.getElementById('hotspotLayer');
    const layout = document.getElementById('layout');

    function renderHotspots(idx) {{
      hotspotLayer.innerHTML = '';
      (items[idx].hotspots || []).forEach(h => {{
        const div = document.createElement('div');
        div.className = 'hotspot';
        div.style.left = h.x + '%';
        div.style.top = h.y + '%';
        div.style.width = h.w + '%';
        div.style.height = h.h + '%';
        div.addEventListener('click', () => switchTo(h.targetIdx));
        hotspotLayer.appendChild(div);
      }});
    }}

    function switchTo(idx) {{
      mainImage.src = items[idx].dataUrl;
      mainImage.alt = items[idx].name;
      buttons.forEach(b => b.classList.remove('active'));
      if (buttons[idx]) buttons[idx].classList.add('active');
      renderHotspots(idx);
    }}

    buttons.forEach(btn => {{
      btn.addEventListener('click', () => switchTo(parseInt(btn.dataset.idx, 10)));
    }});
    document.getElementById('toggleList').addEventListener('click', () => {{
      layout.classList.toggle('open');
    }});
    switchTo(0);
  </script>
</body>
</html>
"#,
        first_src = first.data_url,
    ))
}
