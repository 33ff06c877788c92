//! Facade tests that need a JS host. Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Object, Reflect};
use spring_graph_wasm::{SpringGraphWasm, generate_scale_free};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn record(pairs: &[(&str, JsValue)]) -> JsValue {
    let object = Object::new();
    for (key, value) in pairs {
        Reflect::set(&object, &JsValue::from_str(key), value).unwrap();
    }
    object.into()
}

fn triangle() -> JsValue {
    let nodes = Array::new();
    for id in ["a", "b", "c"] {
        nodes.push(&record(&[("id", JsValue::from_str(id))]));
    }
    let edges = Array::new();
    for (source, target) in [("a", "b"), ("b", "c"), ("c", "a")] {
        edges.push(&record(&[
            ("source", JsValue::from_str(source)),
            ("target", JsValue::from_str(target)),
        ]));
    }
    record(&[("nodes", nodes.into()), ("edges", edges.into())])
}

#[wasm_bindgen_test]
fn test_construct_from_js_object() {
    let graph = SpringGraphWasm::new(triangle(), 800.0, 600.0).unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.node_index(JsValue::from_str("c")), Some(2));
    assert_eq!(graph.node_index(JsValue::from_str("missing")), None);
    assert_eq!(graph.get_node_degrees(), vec![2, 2, 2]);
}

#[wasm_bindgen_test]
fn test_views_track_updates() {
    let mut graph = SpringGraphWasm::new(triangle(), 800.0, 600.0).unwrap();
    let before = graph.get_positions_x_view().to_vec();
    assert_eq!(before.len(), 3);
    assert!(before.iter().all(|&x| (0.0f32..800.0).contains(&x)));

    graph.update();
    let after = graph.get_positions_x_view().to_vec();
    assert_ne!(before, after);

    assert_eq!(graph.get_edge_sources_view().to_vec(), vec![0, 1, 2]);
    assert_eq!(graph.get_edge_targets_view().to_vec(), vec![1, 2, 0]);
}

#[wasm_bindgen_test]
fn test_unknown_endpoint_throws() {
    let nodes = Array::new();
    nodes.push(&record(&[("id", JsValue::from_f64(1.0))]));
    let edges = Array::new();
    edges.push(&record(&[
        ("source", JsValue::from_f64(1.0)),
        ("target", JsValue::from_f64(2.0)),
    ]));
    let graph = record(&[("nodes", nodes.into()), ("edges", edges.into())]);

    assert!(SpringGraphWasm::new(graph, 100.0, 100.0).is_err());
}

#[wasm_bindgen_test]
fn test_partial_config() {
    let config = record(&[(
        "repulsion",
        record(&[("enabled", JsValue::TRUE)]),
    )]);
    let mut graph = SpringGraphWasm::with_config(triangle(), 400.0, 400.0, config).unwrap();
    graph.set_profiling(true);
    graph.update();
    assert!(graph.get_positions_y_view().to_vec().iter().all(|y| y.is_finite()));
}

#[wasm_bindgen_test]
fn test_zero_distance_config_throws() {
    let config = record(&[(
        "spring",
        record(&[("zeroDistance", JsValue::from_f64(0.0))]),
    )]);
    assert!(SpringGraphWasm::with_config(triangle(), 400.0, 400.0, config).is_err());
}

#[wasm_bindgen_test]
fn test_scale_free_round_trip() {
    let network = generate_scale_free(50).unwrap();
    let graph = SpringGraphWasm::new(network, 1000.0, 1000.0).unwrap();
    assert_eq!(graph.node_count(), 50);
    assert_eq!(graph.edge_count(), 49);

    let direct = SpringGraphWasm::scale_free(10, 500.0, 500.0).unwrap();
    assert_eq!(direct.edge_count(), 9);
}
