//! Frame rendering.
//!
//! Reads only the position and edge-index buffers of a `SpringSystem`.
//! Edges are drawn first so nodes sit on top of them. The drawing target
//! is abstracted behind `Surface`; `CanvasSurface` paints onto a browser
//! 2D canvas.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::physics::SpringSystem;

/// Colours and sizes for a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderStyle {
    /// Circle radius per node (default: 20.0).
    pub node_radius: f32,
    /// Node fill colour (default: "#252525").
    pub node_fill: String,
    /// Node outline colour (default: "#252525").
    pub node_stroke: String,
    /// Width of node outlines and edge lines (default: 2.0).
    pub line_width: f32,
    /// Edge colour (default: "blue").
    pub edge_color: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            node_radius: 20.0,
            node_fill: "#252525".to_string(),
            node_stroke: "#252525".to_string(),
            line_width: 2.0,
            edge_color: "blue".to_string(),
        }
    }
}

/// Something a frame can be drawn onto.
pub trait Surface {
    type Error;

    /// Clear the whole surface and start a frame.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Stroke a straight edge.
    fn line(&mut self, from: (f32, f32), to: (f32, f32), style: &RenderStyle) -> Result<(), Self::Error>;

    /// Fill and outline a node.
    fn circle(&mut self, center: (f32, f32), style: &RenderStyle) -> Result<(), Self::Error>;

    /// Finish the frame.
    fn finish(&mut self) -> Result<(), Self::Error>;
}

/// Draw every edge, then every node, at their current positions.
///
/// Once `begin` succeeds, `finish` runs even if a primitive fails; the
/// first error is returned.
pub fn draw<K, S: Surface>(system: &SpringSystem<K>, surface: &mut S, style: &RenderStyle) -> Result<(), S::Error> {
    surface.begin()?;
    let frame = draw_frame(system, surface, style);
    let finished = surface.finish();
    frame.and(finished)
}

fn draw_frame<K, S: Surface>(system: &SpringSystem<K>, surface: &mut S, style: &RenderStyle) -> Result<(), S::Error> {
    let xs = system.positions_x();
    let ys = system.positions_y();

    for (&source, &target) in system.edge_sources().iter().zip(system.edge_targets()) {
        let (s, t) = (source as usize, target as usize);
        surface.line((xs[s], ys[s]), (xs[t], ys[t]), style)?;
    }

    for (&x, &y) in xs.iter().zip(ys) {
        surface.circle((x, y), style)?;
    }

    Ok(())
}

/// `Surface` over a browser 2D canvas context.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface<'_> {
    type Error = JsValue;

    fn begin(&mut self) -> Result<(), JsValue> {
        if let Some(canvas) = self.ctx.canvas() {
            self.ctx
                .clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        }
        self.ctx.save();
        Ok(())
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), style: &RenderStyle) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.set_line_width(style.line_width as f64);
        self.ctx.set_stroke_style_str(&style.edge_color);
        self.ctx.move_to(from.0 as f64, from.1 as f64);
        self.ctx.line_to(to.0 as f64, to.1 as f64);
        self.ctx.stroke();
        Ok(())
    }

    fn circle(&mut self, center: (f32, f32), style: &RenderStyle) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(
            center.0 as f64,
            center.1 as f64,
            style.node_radius as f64,
            0.0,
            std::f64::consts::TAU,
        )?;
        self.ctx.set_fill_style_str(&style.node_fill);
        self.ctx.fill();
        self.ctx.set_line_width(style.line_width as f64);
        self.ctx.set_stroke_style_str(&style.node_stroke);
        self.ctx.stroke();
        Ok(())
    }

    fn finish(&mut self) -> Result<(), JsValue> {
        self.ctx.restore();
        Ok(())
    }
}
