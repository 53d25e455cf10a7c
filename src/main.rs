use std::env;

use anyhow::{anyhow, Context, Result};
use glam::Vec3;

use objview::{Camera, InputEvent, InputState, KeyCode, Model, ModelTransform, ObjMesh};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let model = Model::load(&options.path)
        .with_context(|| format!("failed to import {}", options.path))?;

    println!(
        "Imported {} ({} vertices, {} triangles)",
        options.path,
        model.mesh.vertex_count(),
        model.mesh.triangle_count()
    );
    let material = &model.material;
    println!(
        "Material: ambient=({:.2}, {:.2}, {:.2}) specular=({:.2}, {:.2}, {:.2}) shininess={:.1}",
        material.ambient.x,
        material.ambient.y,
        material.ambient.z,
        material.specular.x,
        material.specular.y,
        material.specular.z,
        material.shininess
    );
    match &model.texture_path {
        Some(path) => println!("Diffuse texture: {}", path.display()),
        None => println!("Diffuse texture: (none)"),
    }

    if options.print_layout {
        print_layout();
    }
    if options.walkthrough {
        run_walkthrough();
    }
    Ok(())
}

fn print_layout() {
    println!("Vertex stride: {} floats", ObjMesh::FLOATS_PER_VERTEX);
    for (name, attribute) in ["position", "texcoord", "normal"]
        .into_iter()
        .zip(ObjMesh::ATTRIBUTES)
    {
        println!(" - {name}: offset {} len {}", attribute.offset, attribute.len);
    }
}

/// Replays a short scripted input sequence through the event interface
/// the windowing layer would use, stepping the camera and the model
/// transform once per simulated frame.
fn run_walkthrough() {
    const SPEED: f32 = 0.1;
    const FRAME_STEP: f32 = 1.0 / 60.0;

    let input = InputState::new();
    let mut camera = Camera::default();
    let mut transform = ModelTransform::default();

    let script: &[&[InputEvent]] = &[
        &[InputEvent::PointerMoved { x: 400.0, y: 300.0 }],
        &[
            InputEvent::PointerMoved { x: 420.0, y: 290.0 },
            InputEvent::KeyDown(KeyCode::character('w')),
        ],
        &[InputEvent::KeyDown(KeyCode::character('y'))],
        &[
            InputEvent::KeyUp(KeyCode::character('w')),
            InputEvent::KeyDown(KeyCode::character('d')),
        ],
        &[InputEvent::KeyUp(KeyCode::character('d'))],
    ];

    for events in script {
        for event in *events {
            if let InputEvent::KeyDown(key) = event {
                transform.apply_key(*key);
            }
            input.apply(*event);
        }
        if let Some(pointer) = input.pointer_position() {
            camera.pointer_move(pointer.x, pointer.y);
        }
        for direction in input.active_movement() {
            camera.advance(direction, SPEED);
        }
    }

    let position = camera.position();
    println!(
        "Final camera state: pos=({:.2}, {:.2}, {:.2}) yaw={:.2} pitch={:.2}",
        position.x,
        position.y,
        position.z,
        camera.yaw(),
        camera.pitch()
    );
    let spin = match transform.spin {
        Some(axis) => format!("{axis:?}"),
        None => "(none)".to_string(),
    };
    let pivot = transform
        .matrix(script.len() as f32 * FRAME_STEP)
        .transform_point3(Vec3::ZERO);
    println!(
        "Final model transform: spin={} scale={:.2} pivot=({:.2}, {:.2}, {:.2})",
        spin, transform.scale, pivot.x, pivot.y, pivot.z
    );
}

struct CliOptions {
    path: String,
    print_layout: bool,
    walkthrough: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let Some(path) = args.next() else {
            return Err(anyhow!("Usage: objview <model.obj> [--layout] [--walkthrough]"));
        };
        let mut print_layout = false;
        let mut walkthrough = false;
        for arg in args {
            match arg.as_str() {
                "--layout" => print_layout = true,
                "--walkthrough" => walkthrough = true,
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Expected --layout or --walkthrough"
                    ));
                }
            }
        }
        Ok(Self {
            path,
            print_layout,
            walkthrough,
        })
    }
}
