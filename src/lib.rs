//! Spring Graph - WASM Module
//!
//! This module animates a force-directed graph layout. Nodes are joined by
//! damped springs and settle into a 2D arrangement that is redrawn every
//! frame. It is compiled to WebAssembly and exposes a JavaScript-friendly
//! API via wasm-bindgen; the host drives it from `requestAnimationFrame`
//! by calling `update()` then `render()`.
//!
//! # Architecture
//!
//! - `graph`: external id to dense index mapping (topology index)
//! - `physics`: SoA state buffers, spring/repulsion passes, integrator
//! - `network`: scale-free random graph generator and degree queries
//! - `render`: draws edges and nodes from the position buffers
//! - `console`: browser console logging

use js_sys::{Float32Array, Uint32Array};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

pub mod console;
pub mod graph;
pub mod network;
pub mod physics;
pub mod render;

use console::{console_log, console_warn};
use graph::ExternalId;
use network::Network;
use physics::{SimulationConfig, SimulationError, SpringSystem, Viewport};
use render::{CanvasSurface, RenderStyle};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Generate a scale-free `{nodes, edges}` graph as a plain JS object.
#[wasm_bindgen(js_name = generateScaleFree)]
pub fn generate_scale_free(count: usize) -> Result<JsValue, JsError> {
    let mut rng = SmallRng::seed_from_u64(random_seed());
    let network = network::scale_free(count, &mut rng);
    Ok(serde_wasm_bindgen::to_value(&network)?)
}

/// Main entry point for the simulation.
///
/// This struct wraps a SpringSystem and provides the public API exposed
/// to JavaScript.
#[wasm_bindgen]
pub struct SpringGraphWasm {
    system: SpringSystem,
    style: RenderStyle,
    profiling: bool,
}

#[wasm_bindgen]
impl SpringGraphWasm {
    /// Create a simulation from a `{nodes: [{id}], edges: [{source, target, id?}]}`
    /// object, placing nodes randomly inside `width` x `height`.
    ///
    /// Throws if an edge references an unknown node, an id repeats or a
    /// config value is out of range.
    #[wasm_bindgen(constructor)]
    pub fn new(graph: JsValue, width: f32, height: f32) -> Result<SpringGraphWasm, JsError> {
        Self::with_config(graph, width, height, JsValue::UNDEFINED)
    }

    /// Create a simulation with a partial config object, e.g.
    /// `{spring: {stiffness: 5}, repulsion: {enabled: true}}`.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        graph: JsValue,
        width: f32,
        height: f32,
        config: JsValue,
    ) -> Result<SpringGraphWasm, JsError> {
        let network: Network = serde_wasm_bindgen::from_value(graph)?;
        let config: SimulationConfig = if config.is_undefined() || config.is_null() {
            SimulationConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };

        Self::from_network(&network, Viewport::new(width, height), config, random_seed()).map_err(|err| {
            console_warn!("spring graph construction failed: {}", err);
            JsError::from(err)
        })
    }

    /// Create a simulation over a freshly generated scale-free graph.
    #[wasm_bindgen(js_name = scaleFree)]
    pub fn scale_free(count: usize, width: f32, height: f32) -> Result<SpringGraphWasm, JsError> {
        let mut rng = SmallRng::seed_from_u64(random_seed());
        let network = network::scale_free(count, &mut rng);
        Ok(Self::from_network(
            &network,
            Viewport::new(width, height),
            SimulationConfig::default(),
            random_seed(),
        )?)
    }

    // =========================================================================
    // Frame Loop
    // =========================================================================

    /// Advance the simulation by one tick.
    pub fn update(&mut self) {
        if self.profiling {
            console::time("update");
        }
        self.system.update();
        if self.profiling {
            console::time_end("update");
        }
    }

    /// Draw the current positions onto a 2D canvas.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        if self.profiling {
            console::time("render");
        }
        let result = render::draw(&self.system, &mut CanvasSurface::new(ctx), &self.style);
        if self.profiling {
            console::time_end("render");
        }
        result
    }

    /// Toggle `console.time` reporting around `update` and `render`.
    #[wasm_bindgen(js_name = setProfiling)]
    pub fn set_profiling(&mut self, enabled: bool) {
        self.profiling = enabled;
    }

    /// Replace the render style with a partial style object.
    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&mut self, style: JsValue) -> Result<(), JsError> {
        self.style = serde_wasm_bindgen::from_value(style)?;
        Ok(())
    }

    // =========================================================================
    // Topology
    // =========================================================================

    /// Get the number of nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.system.node_count()
    }

    /// Get the number of edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> usize {
        self.system.edge_count()
    }

    /// Dense index of a node id (number or string), if present.
    #[wasm_bindgen(js_name = nodeIndex)]
    pub fn node_index(&self, id: JsValue) -> Option<u32> {
        let id: ExternalId = serde_wasm_bindgen::from_value(id).ok()?;
        self.system.node_index(&id).map(|index| index.raw())
    }

    /// Get node degrees by dense index.
    #[wasm_bindgen(js_name = getNodeDegrees)]
    pub fn get_node_degrees(&self) -> Vec<u32> {
        network::degrees(self.system.topology())
    }

    // =========================================================================
    // Position Buffer Access (Zero-Copy)
    // =========================================================================

    /// Get a zero-copy view of X positions.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Use immediately, do not store.
    #[wasm_bindgen(js_name = getPositionsXView)]
    pub fn get_positions_x_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.system.positions_x()) }
    }

    /// Get a zero-copy view of Y positions.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Use immediately, do not store.
    #[wasm_bindgen(js_name = getPositionsYView)]
    pub fn get_positions_y_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.system.positions_y()) }
    }

    /// Get a zero-copy view of edge source indices.
    #[wasm_bindgen(js_name = getEdgeSourcesView)]
    pub fn get_edge_sources_view(&self) -> Uint32Array {
        unsafe { Uint32Array::view(self.system.edge_sources()) }
    }

    /// Get a zero-copy view of edge target indices.
    #[wasm_bindgen(js_name = getEdgeTargetsView)]
    pub fn get_edge_targets_view(&self) -> Uint32Array {
        unsafe { Uint32Array::view(self.system.edge_targets()) }
    }
}

impl SpringGraphWasm {
    /// Build from already-deserialized input. Usable without a JS host.
    pub fn from_network(
        network: &Network,
        viewport: Viewport,
        config: SimulationConfig,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        let system = SpringSystem::with_seed(&network.nodes, &network.edges, viewport, config, seed)?;
        console_log!(
            "spring graph ready: {}x{} viewport",
            viewport.width,
            viewport.height
        );
        Ok(Self {
            system,
            style: RenderStyle::default(),
            profiling: false,
        })
    }

    pub fn system(&self) -> &SpringSystem {
        &self.system
    }
}

/// Seed drawn from `Math.random()`, covering the 53 bits it provides.
fn random_seed() -> u64 {
    (js_sys::Math::random() * (1u64 << 53) as f64) as u64
}
