//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. The defaults reproduce the
//! classic runner feel; a JSON document can override any subset of them.

use serde::{Deserialize, Serialize};

/// Placement class of an obstacle archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchetypeClass {
    /// Rests on the ground band
    Grounded,
    /// Floats in one of the altitude lanes
    Aerial,
}

/// One entry of the spawnable obstacle set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub name: String,
    pub class: ArchetypeClass,
    pub width: f32,
    pub height: f32,
}

impl Archetype {
    pub fn cactus() -> Self {
        Self {
            name: "cactus".to_string(),
            class: ArchetypeClass::Grounded,
            width: 20.0,
            height: 50.0,
        }
    }

    pub fn bird() -> Self {
        Self {
            name: "bird".to_string(),
            class: ArchetypeClass::Aerial,
            width: 40.0,
            height: 30.0,
        }
    }
}

/// Runner geometry (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorGeometry {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub crouch_height: f32,
    /// Extra drawn width while crouched
    pub crouch_widen: f32,
}

impl Default for ActorGeometry {
    fn default() -> Self {
        Self {
            x: 50.0,
            width: 40.0,
            height: 60.0,
            crouch_height: 30.0,
            crouch_widen: 10.0,
        }
    }
}

/// Gameplay configuration, loaded once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to vertical velocity every update (px/frame²)
    pub gravity: f32,
    /// Vertical velocity applied by a jump (negative is up)
    pub jump_impulse: f32,
    /// Height of the ground band at the bottom of the surface
    pub ground_height: f32,
    pub initial_speed: f32,
    pub max_speed: f32,
    /// Speed gained per elapsed millisecond
    pub speed_increment: f32,
    /// Spawn gap at zero speed (ms)
    pub spawn_interval: f64,
    /// Spawn gap floor (ms)
    pub min_spawn_interval: f64,
    /// Score gained per nominal frame at initial speed
    pub score_increment: f64,
    /// Inset applied to every hitbox edge before overlap tests
    pub hitbox_padding: f32,
    pub actor: ActorGeometry,
    pub archetypes: Vec<Archetype>,
    pub sound_enabled: bool,
    pub dark_mode: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_impulse: -15.0,
            ground_height: 20.0,
            initial_speed: 5.0,
            max_speed: 12.0,
            speed_increment: 0.0002,
            spawn_interval: 1500.0,
            min_spawn_interval: 700.0,
            score_increment: 0.1,
            hitbox_padding: 5.0,
            actor: ActorGeometry::default(),
            archetypes: vec![Archetype::cactus()],
            sound_enabled: true,
            dark_mode: false,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validated())
    }

    /// Clamp inconsistent values so downstream formulas stay in range
    pub fn validated(mut self) -> Self {
        if self.max_speed < self.initial_speed {
            log::warn!(
                "max_speed {} below initial_speed {}, raising it",
                self.max_speed,
                self.initial_speed
            );
            self.max_speed = self.initial_speed;
        }
        if self.initial_speed <= 0.0 {
            log::warn!("initial_speed must be positive, using default");
            self.initial_speed = Tuning::default().initial_speed;
            self.max_speed = self.max_speed.max(self.initial_speed);
        }
        if self.min_spawn_interval < 0.0 {
            self.min_spawn_interval = 0.0;
        }
        if self.min_spawn_interval > self.spawn_interval {
            log::warn!(
                "min_spawn_interval {} above spawn_interval {}, swapping",
                self.min_spawn_interval,
                self.spawn_interval
            );
            std::mem::swap(&mut self.min_spawn_interval, &mut self.spawn_interval);
        }
        if self.hitbox_padding < 0.0 {
            self.hitbox_padding = 0.0;
        }
        if self.archetypes.is_empty() {
            log::warn!("empty archetype set, falling back to cactus");
            self.archetypes.push(Archetype::cactus());
        }
        self
    }

    /// Defaults, overridden by `json` when the host supplies one. A bad
    /// override is logged and ignored.
    pub fn load(json: Option<&str>) -> Self {
        let Some(json) = json.map(str::trim).filter(|j| !j.is_empty()) else {
            return Tuning::default();
        };
        match Tuning::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Tuning::default()
            }
        }
    }
}
