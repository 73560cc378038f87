/// Example: render one frame as plain text, without touching terminal modes
///
/// Usage: cargo run --example print_frame -- [path/to/shape.txt] [occlusion-mode]

use std::env;
use termshapes_core::{
    Axis, FrameRenderer, OcclusionMode, RenderOptions, RenderParams, Shape, Transform, Viewport,
};

const WIDTH: u16 = 60;
const HEIGHT: u16 = 24;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let params = RenderParams::default();

    let mut shape = match args.get(1) {
        Some(path) => Shape::load(path, &params)?,
        None => Shape::cube(&params),
    };
    let mode = match args.get(2) {
        Some(name) => name.parse::<OcclusionMode>()?,
        None => OcclusionMode::ConvexRearVisible,
    };

    // Turn the shape a little so three faces show.
    Transform::rotate(&mut shape, 0.5, Axis::X);
    Transform::rotate(&mut shape, 0.6, Axis::Y);

    let options = RenderOptions {
        mode,
        ..RenderOptions::for_shape(&shape)
    };
    let mut renderer = FrameRenderer::new(Viewport::new(WIDTH, HEIGHT, params.scale));
    let frame = renderer.render(&shape, &options)?;

    let mut grid = vec![vec![' '; usize::from(WIDTH)]; usize::from(HEIGHT)];
    // Front glyphs overwrite behind glyphs.
    for &(cell, c) in frame.behind.iter().chain(&frame.front) {
        grid[cell.y as usize][cell.x as usize] = c;
    }
    for (cell, label) in &frame.labels {
        for (i, c) in label.chars().enumerate() {
            if let Some(slot) = grid[cell.y as usize].get_mut(cell.x as usize + i) {
                *slot = c;
            }
        }
    }

    println!("occlusion: {mode}");
    for row in grid {
        println!("{}", row.into_iter().collect::<String>());
    }
    println!(
        "{} samples, {} occlusion tests, {} uniform edges",
        frame.stats.samples, frame.stats.occlusion_tests, frame.stats.uniform_edges
    );
    Ok(())
}
