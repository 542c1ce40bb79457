//! Headless planet generation demo
//!
//! Builds the full planet system against the recording host, simulates a
//! camera zooming away from the planet, and logs the LOD passes the detail
//! scheduler runs. Pass `--json` to dump mesh statistics to stdout.
//!
//! Usage:
//!   cargo run --bin generate_planet [-- --json]

use std::time::Instant;

use orbis::core::input::{InputEvent, SliderParam};
use orbis::core::time::FrameTimer;
use orbis::planet::PlanetSystem;
use orbis::scene::{HostedGeometry, RecordingHost};
use orbis::terrain::PlanetConfig;

fn main() {
    orbis::core::logging::init();

    let json_output = std::env::args().any(|a| a == "--json");

    log::info!("building planet system");
    let start = Instant::now();
    let mut system = match PlanetSystem::new(RecordingHost::new(), PlanetConfig::default()) {
        Ok(system) => system,
        Err(e) => {
            log::error!("failed to build planet system: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "planet system ready in {:.2}s ({} geometries attached)",
        start.elapsed().as_secs_f32(),
        system.host().live_count()
    );

    // Zoom all the way out, then let the scheduler react over a short run
    // of frames. The 500ms throttle admits a single LOD pass here.
    for _ in 0..300 {
        if let Err(e) = system.handle_event(InputEvent::Wheel { delta: 1.0 }) {
            log::warn!("input event failed: {e}");
        }
    }
    log::info!(
        "camera at distance {:.1}, detail factor {:.2}",
        system.camera().distance(),
        system.detail_factor()
    );

    let mut timer = FrameTimer::new();
    for _ in 0..12 {
        let now = timer.tick();
        system.update(timer.delta_secs(), now);
    }
    log::info!(
        "after zoom-out: terrain {0}x{0}, water {1}x{1}",
        system.planet().last_resolution(),
        system.water().config().resolution
    );

    // A slider-driven regeneration rebuilds the reference terrain
    let events = [
        InputEvent::Slider { param: SliderParam::HeightScale, value: 3.5 },
        InputEvent::Slider { param: SliderParam::WaterLevel, value: 0.2 },
        InputEvent::Regenerate,
    ];
    for event in events {
        if let Err(e) = system.handle_event(event) {
            log::warn!("regenerate failed: {e}");
        }
    }
    log::info!(
        "regenerated with height scale {:.1}, water level {:.1}",
        system.planet().config().height_scale,
        system.planet().config().water_level
    );

    if json_output {
        let stats: Vec<_> = system
            .host()
            .live
            .iter()
            .map(|(handle, geometry)| match geometry {
                HostedGeometry::Mesh(mesh) => serde_json::json!({
                    "handle": handle.0,
                    "kind": "mesh",
                    "resolution": mesh.resolution,
                    "vertices": mesh.vertex_count(),
                    "triangles": mesh.triangle_count(),
                }),
                HostedGeometry::Points(cloud) => serde_json::json!({
                    "handle": handle.0,
                    "kind": "points",
                    "count": cloud.positions.len(),
                }),
            })
            .collect();
        match serde_json::to_string_pretty(&stats) {
            Ok(out) => println!("{out}"),
            Err(e) => log::error!("failed to serialize stats: {e}"),
        }
    }

    log::info!("done in {:.2}s", start.elapsed().as_secs_f32());
}
