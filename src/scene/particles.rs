use bevy::prelude::*;
use bevy_hanabi::prelude::*;
use bevy_hanabi::Gradient as HanabiGradient;
use std::collections::HashMap;

/// Particle effects the unlock core can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Sparkles gathering around a bonus item while it is revealed
    Flourish,
    /// Short burst when a collectible is picked up
    PickupBurst,
}

/// A registered effect and the rate it emits at
#[derive(Debug, Clone)]
pub struct ParticleDef {
    pub effect: Handle<EffectAsset>,
    pub rate: f32,
}

/// Read-only table of particle effects, built once at startup and looked up by kind
#[derive(Resource, Debug, Default)]
pub struct ParticleRegistry {
    defs: HashMap<ParticleKind, ParticleDef>,
}

impl ParticleRegistry {
    pub fn get(&self, kind: ParticleKind) -> Option<&ParticleDef> {
        self.defs.get(&kind)
    }
}

/// An emitter entity that despawns once it has emitted its particle budget
#[derive(Component)]
pub struct ParticleEmitter {
    pub kind: ParticleKind,
    pub lifetime: Timer,
}

impl ParticleEmitter {
    /// Emitter that runs long enough to emit roughly `count` particles at `rate`
    pub fn new(kind: ParticleKind, count: u32, rate: f32) -> Self {
        let secs = if rate > 0.0 { count as f32 / rate } else { 0.0 };
        Self {
            kind,
            lifetime: Timer::from_seconds(secs, TimerMode::Once),
        }
    }
}

const FLOURISH_RATE: f32 = 120.0;
const FLOURISH_LIFETIME: f32 = 1.2;
const PICKUP_BURST_RATE: f32 = 400.0;
const PICKUP_BURST_LIFETIME: f32 = 0.4;

fn create_flourish_effect(effects: &mut Assets<EffectAsset>) -> Handle<EffectAsset> {
    let mut color_gradient = HanabiGradient::<Vec4>::new();
    color_gradient.add_key(0.0, Vec4::new(1.0, 0.95, 0.6, 0.0));
    color_gradient.add_key(0.2, Vec4::new(1.0, 0.9, 0.5, 1.0));
    color_gradient.add_key(1.0, Vec4::new(1.0, 1.0, 1.0, 0.0));

    let mut size_gradient = HanabiGradient::<Vec3>::new();
    size_gradient.add_key(0.0, Vec3::splat(3.0));
    size_gradient.add_key(1.0, Vec3::splat(0.5));

    let writer = ExprWriter::new();

    let init_lifetime = SetAttributeModifier::new(Attribute::LIFETIME, writer.lit(FLOURISH_LIFETIME).expr());

    // Unit ring; the emitter's scale sets the actual spread
    let init_pos = SetPositionCircleModifier {
        center: writer.lit(Vec3::ZERO).expr(),
        axis: writer.lit(Vec3::Z).expr(),
        radius: writer.lit(1.0).expr(),
        dimension: ShapeDimension::Volume,
    };

    // Drift inward so the sparkles gather on the item
    let init_vel = SetVelocitySphereModifier {
        center: writer.lit(Vec3::ZERO).expr(),
        speed: writer.lit(-0.6).expr(),
    };

    let effect = EffectAsset::new(2048, SpawnerSettings::rate(FLOURISH_RATE.into()), writer.finish())
        .with_name("unlock_flourish")
        .with_simulation_space(SimulationSpace::Local)
        .init(init_lifetime)
        .init(init_pos)
        .init(init_vel)
        .render(ColorOverLifetimeModifier {
            gradient: color_gradient,
            blend: ColorBlendMode::Overwrite,
            mask: ColorBlendMask::RGBA,
        })
        .render(SizeOverLifetimeModifier {
            gradient: size_gradient,
            screen_space_size: false,
        });

    effects.add(effect)
}

fn create_pickup_burst_effect(effects: &mut Assets<EffectAsset>) -> Handle<EffectAsset> {
    let mut color_gradient = HanabiGradient::<Vec4>::new();
    color_gradient.add_key(0.0, Vec4::new(0.7, 1.0, 0.8, 1.0));
    color_gradient.add_key(1.0, Vec4::new(0.7, 1.0, 0.8, 0.0));

    let mut size_gradient = HanabiGradient::<Vec3>::new();
    size_gradient.add_key(0.0, Vec3::splat(2.5));
    size_gradient.add_key(1.0, Vec3::splat(0.0));

    let writer = ExprWriter::new();

    let init_lifetime =
        SetAttributeModifier::new(Attribute::LIFETIME, writer.lit(PICKUP_BURST_LIFETIME).expr());
    let init_pos = SetPositionCircleModifier {
        center: writer.lit(Vec3::ZERO).expr(),
        axis: writer.lit(Vec3::Z).expr(),
        radius: writer.lit(0.2).expr(),
        dimension: ShapeDimension::Surface,
    };
    let init_vel = SetVelocitySphereModifier {
        center: writer.lit(Vec3::ZERO).expr(),
        speed: writer.lit(3.0).expr(),
    };

    let effect = EffectAsset::new(512, SpawnerSettings::rate(PICKUP_BURST_RATE.into()), writer.finish())
        .with_name("pickup_burst")
        .with_simulation_space(SimulationSpace::Local)
        .init(init_lifetime)
        .init(init_pos)
        .init(init_vel)
        .render(ColorOverLifetimeModifier {
            gradient: color_gradient,
            blend: ColorBlendMode::Overwrite,
            mask: ColorBlendMask::RGBA,
        })
        .render(SizeOverLifetimeModifier {
            gradient: size_gradient,
            screen_space_size: false,
        });

    effects.add(effect)
}

/// Builds the particle registry once on startup.
/// Uses Option to handle tests that don't have the HanabiPlugin
pub fn setup_particle_registry(
    mut commands: Commands,
    effects: Option<ResMut<Assets<EffectAsset>>>,
) {
    let Some(mut effects) = effects else {
        return;
    };

    let mut defs = HashMap::new();
    defs.insert(
        ParticleKind::Flourish,
        ParticleDef {
            effect: create_flourish_effect(&mut effects),
            rate: FLOURISH_RATE,
        },
    );
    defs.insert(
        ParticleKind::PickupBurst,
        ParticleDef {
            effect: create_pickup_burst_effect(&mut effects),
            rate: PICKUP_BURST_RATE,
        },
    );

    commands.insert_resource(ParticleRegistry { defs });
}

/// Spawns an emitter entity. Without a registry (headless, tests) the emitter has
/// no visual but still exists so callers can own and release it.
pub fn spawn_emitter(
    commands: &mut Commands,
    registry: Option<&ParticleRegistry>,
    kind: ParticleKind,
    count: u32,
    position: Vec2,
    spread: f32,
) -> Entity {
    let def = registry.and_then(|registry| registry.get(kind));
    let rate = def.map_or(FLOURISH_RATE, |def| def.rate);

    let mut emitter = commands.spawn((
        ParticleEmitter::new(kind, count, rate),
        Transform::from_translation(position.extend(5.0)).with_scale(Vec3::splat(spread.max(0.0))),
        Visibility::default(),
    ));
    if let Some(def) = def {
        emitter.insert(ParticleEffect::new(def.effect.clone()));
    }
    emitter.id()
}

/// Despawns emitters whose budget has run out
pub fn expire_particle_emitters(
    mut commands: Commands,
    time: Res<Time<Real>>,
    mut emitters: Query<(Entity, &mut ParticleEmitter)>,
) {
    for (entity, mut emitter) in emitters.iter_mut() {
        if emitter.lifetime.tick(time.delta()).is_finished() {
            commands.entity(entity).despawn();
        }
    }
}
