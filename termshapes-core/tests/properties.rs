use std::f64::consts::PI;

use approx::assert_relative_eq;
use termshapes_core::convex::ConvexOcclusion;
use termshapes_core::dedup::Insertion;
use termshapes_core::frame::edge_samples;
use termshapes_core::{
    classify_edge, Axis, CellDeduplicator, EdgeOcclusion, FrameRenderer, Half, Layer,
    OcclusionMode, Occluder, Point, RenderOptions, RenderParams, ScreenCell, Shape, Transform,
    Viewport,
};

const PYRAMID: &str = "5, 8, 5\n\
                       1, 1, -1\n\
                       -1, 1, -1\n\
                       -1, -1, -1\n\
                       1, -1, -1\n\
                       0, 0, 1.5\n\
                       0, 1\n1, 2\n2, 3\n3, 0\n\
                       0, 4\n1, 4\n2, 4\n3, 4\n\
                       \n\
                       0, 3, 2, 1\n\
                       0, 1, 4\n\
                       1, 2, 4\n\
                       2, 3, 4\n\
                       3, 0, 4\n";

fn pyramid() -> Shape {
    Shape::parse(PYRAMID, &RenderParams::default()).unwrap()
}

fn cube() -> Shape {
    Shape::cube(&RenderParams::default())
}

fn assert_same_vertices(a: &Shape, b: &Shape) {
    for (p, q) in a.vertices().iter().zip(b.vertices()) {
        assert_relative_eq!(p, q, epsilon = 1e-9);
    }
}

#[test]
fn rotation_is_undone_by_its_inverse() {
    let mut shape = pyramid();
    Transform::translate(&mut shape, 0.3, Axis::X);
    Transform::translate(&mut shape, -0.2, Axis::Z);
    let before = shape.clone();

    for axis in Axis::ALL {
        for theta in [PI / 200.0, 0.5, 2.0, -1.3] {
            Transform::rotate(&mut shape, theta, axis);
            Transform::rotate(&mut shape, -theta, axis);
            assert_same_vertices(&shape, &before);
        }
    }
    assert_eq!(shape.center(), before.center());
}

#[test]
fn unit_scale_is_identity_and_scales_compose() {
    let mut shape = pyramid();
    Transform::translate(&mut shape, 1.0, Axis::Y);
    let before = shape.clone();

    Transform::scale(&mut shape, 1.0);
    assert_same_vertices(&shape, &before);

    let mut composed = before.clone();
    Transform::scale(&mut shape, 1.1);
    Transform::scale(&mut shape, 0.7);
    Transform::scale(&mut composed, 1.1 * 0.7);
    assert_same_vertices(&shape, &composed);
}

#[test]
fn translation_is_undone_by_its_inverse() {
    let mut shape = pyramid();
    let before = shape.clone();
    for axis in Axis::ALL {
        Transform::translate(&mut shape, 0.1, axis);
        Transform::translate(&mut shape, -0.1, axis);
    }
    assert_same_vertices(&shape, &before);
    assert_relative_eq!(shape.center(), before.center(), epsilon = 1e-12);
}

#[test]
fn no_occlusion_hides_everything() {
    let shape = pyramid();
    for v in shape.vertices() {
        assert!(OcclusionMode::None.is_hidden(&shape, v, None));
    }
    for edge in shape.edges() {
        let (a, b) = shape.edge_points(edge);
        for sample in edge_samples(a, b, 10) {
            assert!(OcclusionMode::None.is_hidden(&shape, &sample, Some(edge)));
        }
    }
}

#[test]
fn cube_back_vertices_are_hidden() {
    let shape = cube();
    for v in shape.vertices() {
        assert_eq!(ConvexOcclusion.is_hidden(&shape, v, None), v.z < 0.0, "vertex {v:?}");
    }
}

#[test]
fn pyramid_seen_from_above() {
    let shape = pyramid();
    // Apex and base corners are on the outline; the base interior is covered.
    for v in shape.vertices() {
        assert!(!ConvexOcclusion.is_hidden(&shape, v, None), "vertex {v:?}");
    }
    assert!(ConvexOcclusion.is_hidden(&shape, &Point::new(0.3, 0.1, -1.0), None));
}

#[test]
fn uniform_classification_matches_every_sample() {
    let mut shape = cube();
    Transform::rotate(&mut shape, 0.4, Axis::X);
    Transform::rotate(&mut shape, 0.9, Axis::Y);

    for edge in shape.edges() {
        let state = classify_edge(&shape, OcclusionMode::Convex, edge);
        let Some(hidden) = state.uniform_hidden() else {
            continue;
        };
        let (a, b) = shape.edge_points(edge);
        if state == EdgeOcclusion::UniformHidden {
            assert!(ConvexOcclusion.is_hidden(&shape, &a, Some(edge)));
            assert!(ConvexOcclusion.is_hidden(&shape, &b, Some(edge)));
            continue;
        }
        for sample in edge_samples(a, b, 50) {
            assert_eq!(ConvexOcclusion.is_hidden(&shape, &sample, Some(edge)), hidden);
        }
    }
}

#[test]
fn cell_merging() {
    let cell = ScreenCell::new(5, 5);

    let mut dedup = CellDeduplicator::new();
    assert_eq!(dedup.insert(Layer::Front, cell, Half::Upper), Insertion::Added);
    assert_eq!(dedup.insert(Layer::Front, cell, Half::Lower), Insertion::Upgraded);
    assert_eq!(dedup.front().len(), 1);

    let mut dedup = CellDeduplicator::new();
    dedup.insert(Layer::Front, cell, Half::Upper);
    assert_eq!(dedup.insert(Layer::Front, cell, Half::Upper), Insertion::Redundant);
    assert_eq!(dedup.front().len(), 1);
}

#[test]
fn frame_cells_are_on_screen_and_unique() {
    let mut shape = pyramid();
    Transform::rotate(&mut shape, 0.8, Axis::X);
    Transform::scale(&mut shape, 3.0);

    let viewport = Viewport::new(40, 12, RenderParams::default().scale);
    let mut renderer = FrameRenderer::new(viewport);
    for mode in OcclusionMode::ALL {
        let options = RenderOptions {
            mode,
            ..RenderOptions::for_shape(&shape)
        };
        let frame = renderer.render(&shape, &options).unwrap();
        for layer in [&frame.front, &frame.behind] {
            let mut cells: Vec<_> = layer.iter().map(|(cell, _)| *cell).collect();
            assert!(cells.iter().all(|&cell| viewport.contains(cell)));
            let before = cells.len();
            cells.sort();
            cells.dedup();
            assert_eq!(cells.len(), before);
        }
    }
}

#[test]
fn description_round_trip() {
    let shape = pyramid();
    let text = shape.to_description().to_string();
    let reloaded = Shape::parse(&text, &RenderParams::default()).unwrap();
    assert_eq!(reloaded.to_description(), shape.to_description());
    assert_eq!(reloaded.vertices()[4], Point::new(0.0, 0.0, 1.5));
}
