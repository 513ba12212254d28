//! Mapping between the configured [`DrawMode`], GPU topologies, number keys
//! and the window title.

use planetgen_config::DrawMode;

pub fn topology(mode: DrawMode) -> wgpu::PrimitiveTopology {
    match mode {
        DrawMode::Points => wgpu::PrimitiveTopology::PointList,
        DrawMode::Lines => wgpu::PrimitiveTopology::LineList,
        DrawMode::Triangles => wgpu::PrimitiveTopology::TriangleList,
    }
}

/// `1` points, `2` lines, `3` triangles. Other keys select nothing.
pub fn from_number_key(key: u8) -> Option<DrawMode> {
    match key {
        1 => Some(DrawMode::Points),
        2 => Some(DrawMode::Lines),
        3 => Some(DrawMode::Triangles),
        _ => None,
    }
}

/// `"<base>; <mode>"`, e.g. `Planet thingy; lines`.
pub fn window_title(base: &str, mode: DrawMode) -> String {
    format!("{base}; {}", mode.label())
}
