use actorx_io::ByteWriter;

use crate::chunk::*;
use crate::world::*;

/// Encodes `world` in the layout [`crate::parse_world`] reads.
///
/// Sections are always written in actors, lights, landscapes, materials order.
/// Only actors with at least one override get a material entry.
pub fn encode_world(world: &World) -> Vec<u8> {
    let mut w = ByteWriter::new();
    ChunkHeader::new(world.kind.header_id(), world.version, 0, 0).write(&mut w);

    ChunkHeader::new(ACTORS_CHUNK, 0, 0, world.actors.len() as i32).write(&mut w);
    for actor in &world.actors {
        w.write_string(&actor.name);
        w.write_string(&actor.asset_path);
        w.write_i32(actor.parent);
        w.write_vec3(actor.position);
        w.write_quat(actor.rotation);
        w.write_vec3(actor.scale);
        w.write_bool(actor.no_shadow);
        w.write_bool(actor.hidden);
        w.write_bool(actor.use_temperature);
    }

    ChunkHeader::new(LIGHTS_CHUNK, 0, LIGHT_RECORD_SIZE, world.lights.len() as i32).write(&mut w);
    for light in &world.lights {
        w.write_i32(light.owner);
        w.write_rgb(light.color.to_array());
        w.write_i32(light.kind.as_i32());
        w.write_vec3(light.extent);
        w.write_f32(light.attenuation);
        w.write_f32(light.radius);
        w.write_f32(light.temperature);
        w.write_f32(light.shadow_bias);
        w.write_f32(light.lumens);
        w.write_f32(light.cone_angle);
    }

    ChunkHeader::new(LANDSCAPE_CHUNK, 0, 0, world.landscapes.len() as i32).write(&mut w);
    for landscape in &world.landscapes {
        w.write_string(&landscape.texture_path);
        w.write_i32(landscape.owner);
        w.write_vec3(landscape.position);
        w.write_f32(landscape.scale);
        w.write_i32(landscape.kind);
        w.write_i32(landscape.tile.0);
        w.write_i32(landscape.tile.1);
        w.write_f32(landscape.height_bias);
        w.write_vec3(landscape.center_offset);
        w.write_vec2(landscape.dimensions);
    }

    let entries: Vec<(usize, &OverrideMaterials)> = world
        .override_materials
        .iter()
        .enumerate()
        .filter(|(_, slots)| !slots.is_empty())
        .collect();
    ChunkHeader::new(MATERIALS_CHUNK, 0, 0, entries.len() as i32).write(&mut w);
    for (actor, slots) in entries {
        w.write_i32(actor as i32);
        w.write_i32(slots.len() as i32);
        for (slot, path) in slots {
            w.write_string(slot);
            w.write_string(path);
        }
    }

    w.into_inner()
}
