use actorx_ids::{InstanceID, LightID};
use actorx_world::{Actor, Light, LightKind};
use glam::{Quat, Vec2};

use crate::color::kelvin_to_rgb;
use crate::commands::InstantiationCommand;
use crate::importer::ImportSession;
use crate::providers::AssetProviders;

/// Local rotation given to every light under its owning actor.
pub const LIGHT_ROTATION: Quat = Quat::from_xyzw(0.0, -0.707107, 0.0, 0.707107);

/// Builds the command for one light owned by `actor`. `adjust` is the
/// kind-specific intensity multiplier and must already be above the cutoff.
pub fn light_command(
    id: LightID,
    owner: InstanceID,
    actor: &Actor,
    light: &Light,
    adjust: f32,
) -> InstantiationCommand {
    let color = if actor.use_temperature {
        kelvin_to_rgb(light.temperature)
    } else {
        light.color
    };

    InstantiationCommand::CreateLight {
        light: id,
        owner,
        name: format!("{}_light", actor.name),
        kind: light.kind,
        color,
        energy: light.lumens * adjust,
        cast_shadow: !actor.no_shadow,
        shadow_soft_size: light.shadow_bias,
        spot_size: (light.kind == LightKind::Spot).then_some(light.cone_angle),
        area_size: (light.kind == LightKind::Area)
            .then(|| Vec2::new(light.extent.x, light.extent.y)),
        rotation: LIGHT_ROTATION,
    }
}

impl<P: AssetProviders> ImportSession<'_, P> {
    /// Runs after every actor has an instance handle.
    pub(crate) fn create_lights(&mut self) {
        let world = self.world;

        for (i, light) in world.lights.iter().enumerate() {
            if !self.config.light_enabled(light.kind) {
                self.stats.lights_suppressed += 1;
                continue;
            }

            let Some((actor_index, owner)) = light
                .owner_index()
                .and_then(|a| self.arena.get(a).map(|id| (a, id)))
            else {
                log::warn!("light {i} has no owning actor, skipping");
                self.stats.lights_without_owner += 1;
                continue;
            };

            let id = LightID::from_parts(self.stats.lights_created as u32 + 1, self.generation);
            self.commands.push(light_command(
                id,
                owner,
                &world.actors[actor_index],
                light,
                self.config.intensity_for(light.kind),
            ));
            self.stats.lights_created += 1;
        }
    }
}
