//! Planet system coordinator
//!
//! Owns the five scene entities, the orbit camera, lighting, and the detail
//! scheduler, and turns host callbacks (input events, per-frame updates)
//! into regeneration work.

use std::sync::Arc;
use std::time::Instant;

use crate::core::camera::OrbitCamera;
use crate::core::input::{InputEvent, KeyCommand, SliderParam};
use crate::core::types::{Result, Vec3};
use crate::lod::{detail_factor_for, DetailScheduler};
use crate::planet::atmosphere::{Atmosphere, AtmosphereConfig};
use crate::planet::clouds::{CloudConfig, Clouds};
use crate::planet::stars::{StarConfig, Stars};
use crate::planet::surface::Planet;
use crate::planet::water::{Water, WaterConfig};
use crate::scene::SceneHost;
use crate::terrain::{NoiseField, PlanetConfig, TERRAIN_SEED};

/// Scene lighting parameters, owned here as data; the host applies them
#[derive(Clone, Copy, Debug)]
pub struct LightingState {
    pub sun_direction: Vec3,
    pub sun_intensity: f32,
    pub ambient_intensity: f32,
    pub daytime: bool,
}

impl LightingState {
    /// Daytime preset
    pub fn day() -> Self {
        Self {
            sun_direction: Vec3::new(50.0, 20.0, 50.0).normalize(),
            sun_intensity: 1.2,
            ambient_intensity: 0.6,
            daytime: true,
        }
    }

    /// Nighttime preset
    pub fn night() -> Self {
        Self {
            sun_direction: Vec3::new(-50.0, -20.0, -50.0).normalize(),
            sun_intensity: 0.1,
            ambient_intensity: 0.2,
            daytime: false,
        }
    }
}

impl Default for LightingState {
    fn default() -> Self {
        Self::day()
    }
}

/// The four user-facing sliders, applied on a regenerate request
#[derive(Clone, Copy, Debug)]
pub struct RegenerateOptions {
    /// Vertical exaggeration, `[0.5, 5.0]`
    pub height_scale: f32,
    /// Multiplier over the noise frequency bands, `[0.25, 3.0]`
    pub noise_scale: f32,
    /// Mountain sharpening strength, `[0.5, 4.0]`
    pub mountain_scale: f32,
    /// Sea level offset, `[-0.2, 0.5]`
    pub water_level: f32,
}

impl Default for RegenerateOptions {
    fn default() -> Self {
        Self {
            height_scale: 2.5,
            noise_scale: 1.0,
            mountain_scale: 2.0,
            water_level: 0.1,
        }
    }
}

impl RegenerateOptions {
    /// Clamp every slider into its documented range. Out-of-range input is
    /// corrected with a warning, never rejected at the event boundary.
    pub fn clamped(self) -> Self {
        Self {
            height_scale: clamp_slider("height_scale", self.height_scale, 0.5, 5.0),
            noise_scale: clamp_slider("noise_scale", self.noise_scale, 0.25, 3.0),
            mountain_scale: clamp_slider("mountain_scale", self.mountain_scale, 0.5, 4.0),
            water_level: clamp_slider("water_level", self.water_level, -0.2, 0.5),
        }
    }
}

fn clamp_slider(name: &str, value: f32, min: f32, max: f32) -> f32 {
    if !value.is_finite() {
        log::warn!("{name} is not finite, using {min}");
        return min;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("{name} {value} outside [{min}, {max}], clamped to {clamped}");
    }
    clamped
}

/// The whole planet scene: entities, camera, lighting, and LOD pacing.
pub struct PlanetSystem<H: SceneHost> {
    host: H,
    planet: Planet,
    water: Water,
    clouds: Clouds,
    atmosphere: Atmosphere,
    stars: Stars,
    camera: OrbitCamera,
    scheduler: DetailScheduler,
    lighting: LightingState,
    sliders: RegenerateOptions,
}

impl<H: SceneHost> PlanetSystem<H> {
    /// Build every entity and attach it to the host. The terrain seed is
    /// fixed per process; all entities share one noise field.
    pub fn new(mut host: H, config: PlanetConfig) -> Result<Self> {
        let noise = Arc::new(NoiseField::new(TERRAIN_SEED));

        let planet = Planet::new(&mut host, noise.clone(), config.clone())?;
        let water = Water::new(
            &mut host,
            config.radius,
            WaterConfig {
                water_level: config.water_level,
                ..WaterConfig::default()
            },
        )?;
        let clouds = Clouds::new(&mut host, config.radius, noise, CloudConfig::default())?;
        let atmosphere = Atmosphere::new(&mut host, config.radius, AtmosphereConfig::default())?;
        let stars = Stars::new(&mut host, StarConfig::default())?;

        Ok(Self {
            host,
            sliders: RegenerateOptions {
                height_scale: config.height_scale,
                mountain_scale: config.mountain_scale,
                water_level: config.water_level,
                ..RegenerateOptions::default()
            },
            planet,
            water,
            clouds,
            atmosphere,
            stars,
            camera: OrbitCamera::default(),
            scheduler: DetailScheduler::default(),
            lighting: LightingState::default(),
        })
    }

    /// Consume one discrete input event
    pub fn handle_event(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::PointerDrag { dx, dy } => self.camera.drag(dx, dy),
            InputEvent::Wheel { delta } => self.camera.zoom(delta),
            InputEvent::Key(KeyCommand::RotateFaster) => self.camera.rotate_faster(),
            InputEvent::Key(KeyCommand::RotateSlower) => self.camera.rotate_slower(),
            InputEvent::Key(KeyCommand::ToggleRotation) => self.camera.toggle_rotation(),
            InputEvent::Slider { param, value } => match param {
                SliderParam::HeightScale => self.sliders.height_scale = value,
                SliderParam::NoiseScale => self.sliders.noise_scale = value,
                SliderParam::MountainScale => self.sliders.mountain_scale = value,
                SliderParam::WaterLevel => self.sliders.water_level = value,
            },
            InputEvent::Regenerate => return self.regenerate(self.sliders),
            InputEvent::ToggleDayNight => self.set_day_night(!self.lighting.daytime),
            InputEvent::ResetCamera => self.camera.reset(),
        }
        Ok(())
    }

    /// Per-frame update: advance animations, smooth the camera, and let the
    /// scheduler decide whether this frame runs a regeneration.
    pub fn update(&mut self, dt: f32, now: Instant) {
        self.water.update(dt);
        self.clouds.update(dt);
        self.camera.update();

        let (min_zoom, max_zoom) = self.camera.zoom_range();
        let factor = detail_factor_for(self.camera.distance(), min_zoom, max_zoom);
        if let Some(applied) = self.scheduler.observe(factor, now) {
            self.run_regeneration(applied);
        }
    }

    /// Rebuild the planet from the slider values. Maps the noise-scale
    /// multiplier onto the four frequency bands and moves the waterline; the
    /// terrain reference capture is rebuilt from scratch.
    pub fn regenerate(&mut self, options: RegenerateOptions) -> Result<()> {
        let options = options.clamped();
        self.sliders = options;
        let m = options.noise_scale;

        let config = PlanetConfig {
            height_scale: options.height_scale,
            base_noise_scale: 0.8 * m,
            mountain_noise_scale: 1.6 * m,
            detail_noise_scale: 6.0 * m,
            biome_noise_scale: 0.6 * m,
            mountain_scale: options.mountain_scale,
            water_level: options.water_level,
            ..self.planet.config().clone()
        };

        log::info!(
            "regenerating planet: height {:.2}, noise x{:.2}, mountains {:.2}, water {:.2}",
            options.height_scale,
            options.noise_scale,
            options.mountain_scale,
            options.water_level
        );
        self.planet.regenerate(&mut self.host, config)?;
        self.water.set_water_level(&mut self.host, options.water_level)?;
        Ok(())
    }

    /// Flip scene lighting and propagate the sun flip to every entity
    pub fn set_day_night(&mut self, daytime: bool) {
        self.lighting = if daytime {
            LightingState::day()
        } else {
            LightingState::night()
        };
        self.water.set_day_night(daytime);
        self.clouds.set_day_night(daytime);
        self.atmosphere.set_day_night(daytime);
    }

    /// One regeneration pass over all four LOD-driven subsystems, in
    /// sequence. Failures are isolated: water failing to rebuild must not
    /// stop clouds or the atmosphere from updating, and the in-flight flag
    /// is always released.
    fn run_regeneration(&mut self, factor: f32) {
        if let Err(e) = self.planet.regenerate_with_detail(&mut self.host, factor) {
            log::warn!("terrain regeneration failed: {e}");
        }
        if let Err(e) = self.water.update_resolution(&mut self.host, factor) {
            log::warn!("water regeneration failed: {e}");
        }
        if let Err(e) = self.clouds.update_resolution(&mut self.host, factor) {
            log::warn!("cloud regeneration failed: {e}");
        }
        if let Err(e) = self.atmosphere.update_resolution(&mut self.host, factor) {
            log::warn!("atmosphere regeneration failed: {e}");
        }
        self.scheduler.complete(factor);
    }

    /// The orbit camera
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Mutable camera access for hosts that drive it directly
    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Current lighting state
    pub fn lighting(&self) -> &LightingState {
        &self.lighting
    }

    /// The terrain surface entity
    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    /// The water entity
    pub fn water(&self) -> &Water {
        &self.water
    }

    /// The cloud entity
    pub fn clouds(&self) -> &Clouds {
        &self.clouds
    }

    /// The atmosphere entity
    pub fn atmosphere(&self) -> &Atmosphere {
        &self.atmosphere
    }

    /// The starfield entity
    pub fn stars(&self) -> &Stars {
        &self.stars
    }

    /// The scene host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Detail factor for the current camera distance
    pub fn detail_factor(&self) -> f32 {
        let (min_zoom, max_zoom) = self.camera.zoom_range();
        detail_factor_for(self.camera.distance(), min_zoom, max_zoom)
    }
}
