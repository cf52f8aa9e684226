use actorx_io::ByteReader;

use crate::chunk::*;
use crate::error::{Result, WorldError};
use crate::world::*;

pub const SUPPORTED_VERSION: i32 = 20100422;

/// Reads only the header chunk. Used to decide how to treat a file before parsing it.
pub fn peek_data_type(bytes: &[u8]) -> Result<DataType> {
    let mut r = ByteReader::new(bytes);
    let header = ChunkHeader::read(&mut r)?;
    DataType::from_header_id(header.id_str()).ok_or_else(|| {
        WorldError::UnsupportedFormat(format!("unknown header chunk `{}`", header.id_str()))
    })
}

#[derive(Default)]
struct Sections {
    actors: Option<Vec<Actor>>,
    lights: Option<Vec<Light>>,
    landscapes: Option<Vec<Landscape>>,
    overrides: Option<Vec<(i32, OverrideMaterials)>>,
}

/// Deserializes and validates a whole world. Nothing is returned unless every
/// section parsed and every cross-reference checks out.
pub fn parse_world(bytes: &[u8]) -> Result<World> {
    let mut r = ByteReader::new(bytes);

    let header = ChunkHeader::read(&mut r)?;
    let kind = DataType::from_header_id(header.id_str()).ok_or_else(|| {
        WorldError::UnsupportedFormat(format!("unknown header chunk `{}`", header.id_str()))
    })?;
    if kind != DataType::World {
        return Err(WorldError::UnsupportedFormat(format!(
            "expected world data, found {kind:?}"
        )));
    }
    if header.type_flag != SUPPORTED_VERSION {
        return Err(WorldError::UnsupportedFormat(format!(
            "version {} (only {SUPPORTED_VERSION} is supported)",
            header.type_flag
        )));
    }

    let mut sections = Sections::default();
    while !r.is_empty() {
        let offset = r.position();
        let chunk = ChunkHeader::read(&mut r)?;
        let id = chunk.id_str();
        if chunk.data_count < 0 || chunk.data_size < 0 {
            return Err(WorldError::malformed(format!(
                "chunk `{id}` at offset {offset} has negative size {} or count {}",
                chunk.data_size, chunk.data_count
            )));
        }

        match id {
            ACTORS_CHUNK => {
                let records = read_records(&mut r, &chunk, read_actor)?;
                store_once(&mut sections.actors, records, id)?;
            }
            LIGHTS_CHUNK => {
                if chunk.data_count > 0 && chunk.data_size != LIGHT_RECORD_SIZE {
                    return Err(WorldError::malformed(format!(
                        "light records are {LIGHT_RECORD_SIZE} bytes, chunk declares {}",
                        chunk.data_size
                    )));
                }
                let records = read_records(&mut r, &chunk, read_light)?;
                store_once(&mut sections.lights, records, id)?;
            }
            LANDSCAPE_CHUNK => {
                let records = read_records(&mut r, &chunk, read_landscape)?;
                store_once(&mut sections.landscapes, records, id)?;
            }
            MATERIALS_CHUNK => {
                let records = read_records(&mut r, &chunk, read_override_entry)?;
                store_once(&mut sections.overrides, records, id)?;
            }
            _ => skip_unknown(&mut r, &chunk, offset)?,
        }
    }

    let actors = sections.actors.unwrap_or_default();
    let overrides = sections.overrides.unwrap_or_default();
    let override_materials = densify_overrides(actors.len(), overrides)?;

    let world = World {
        kind,
        version: header.type_flag,
        actors,
        lights: sections.lights.unwrap_or_default(),
        landscapes: sections.landscapes.unwrap_or_default(),
        override_materials,
    };
    validate_world(&world)?;

    log::debug!(
        "parsed world: {} actors, {} lights, {} landscapes",
        world.actors.len(),
        world.lights.len(),
        world.landscapes.len()
    );
    Ok(world)
}

fn store_once<T>(slot: &mut Option<Vec<T>>, records: Vec<T>, id: &str) -> Result<()> {
    if slot.is_some() {
        return Err(WorldError::malformed(format!("chunk `{id}` appears twice")));
    }
    *slot = Some(records);
    Ok(())
}

fn read_records<T>(
    r: &mut ByteReader<'_>,
    chunk: &ChunkHeader,
    mut read_one: impl FnMut(&mut ByteReader<'_>) -> Result<T>,
) -> Result<Vec<T>> {
    let count = chunk.data_count as usize;
    // Counts are untrusted; every record takes at least one byte.
    let mut out = Vec::with_capacity(count.min(r.remaining()));
    for _ in 0..count {
        out.push(read_one(r)?);
    }
    Ok(out)
}

fn skip_unknown(r: &mut ByteReader<'_>, chunk: &ChunkHeader, offset: usize) -> Result<()> {
    let id = chunk.id_str();
    if chunk.data_size == 0 {
        if chunk.data_count == 0 {
            log::debug!("skipping empty chunk `{id}` at offset {offset}");
            return Ok(());
        }
        return Err(WorldError::malformed(format!(
            "unknown variable-length chunk `{id}` at offset {offset} cannot be skipped"
        )));
    }

    let len = (chunk.data_size as usize)
        .checked_mul(chunk.data_count as usize)
        .ok_or_else(|| WorldError::malformed(format!("chunk `{id}` size overflows")))?;
    log::debug!("skipping unknown chunk `{id}` ({len} bytes) at offset {offset}");
    r.skip(len)?;
    Ok(())
}

fn read_actor(r: &mut ByteReader<'_>) -> Result<Actor> {
    Ok(Actor {
        name: r.read_string()?,
        asset_path: r.read_string()?,
        parent: r.read_i32()?,
        position: r.read_vec3()?,
        rotation: r.read_quat()?,
        scale: r.read_vec3()?,
        no_shadow: r.read_bool()?,
        hidden: r.read_bool()?,
        use_temperature: r.read_bool()?,
    })
}

fn read_light(r: &mut ByteReader<'_>) -> Result<Light> {
    let offset = r.position();
    let owner = r.read_i32()?;
    let color = Rgb::from_array(r.read_rgb()?);
    let raw_kind = r.read_i32()?;
    let kind = LightKind::from_i32(raw_kind).ok_or_else(|| {
        WorldError::malformed(format!("unknown light type {raw_kind} at offset {offset}"))
    })?;

    Ok(Light {
        owner,
        color,
        kind,
        extent: r.read_vec3()?,
        attenuation: r.read_f32()?,
        radius: r.read_f32()?,
        temperature: r.read_f32()?,
        shadow_bias: r.read_f32()?,
        lumens: r.read_f32()?,
        cone_angle: r.read_f32()?,
    })
}

fn read_landscape(r: &mut ByteReader<'_>) -> Result<Landscape> {
    Ok(Landscape {
        texture_path: r.read_string()?,
        owner: r.read_i32()?,
        position: r.read_vec3()?,
        scale: r.read_f32()?,
        kind: r.read_i32()?,
        tile: (r.read_i32()?, r.read_i32()?),
        height_bias: r.read_f32()?,
        center_offset: r.read_vec3()?,
        dimensions: r.read_vec2()?,
    })
}

fn read_override_entry(r: &mut ByteReader<'_>) -> Result<(i32, OverrideMaterials)> {
    let actor = r.read_i32()?;
    let slot_count = r.read_i32()?;
    if slot_count < 0 {
        return Err(WorldError::malformed(format!(
            "actor {actor} declares {slot_count} material overrides"
        )));
    }

    let mut slots = OverrideMaterials::new();
    for _ in 0..slot_count {
        let slot = r.read_string()?;
        let path = r.read_string()?;
        if let Some(previous) = slots.insert(slot.clone(), path) {
            log::warn!("actor {actor} overrides slot `{slot}` twice, dropping `{previous}`");
        }
    }
    Ok((actor, slots))
}

fn densify_overrides(
    num_actors: usize,
    entries: Vec<(i32, OverrideMaterials)>,
) -> Result<Vec<OverrideMaterials>> {
    let mut dense = vec![OverrideMaterials::new(); num_actors];
    let mut seen = vec![false; num_actors];

    for (actor, slots) in entries {
        let index = actor_index(actor)
            .filter(|&i| i < num_actors)
            .ok_or_else(|| {
                WorldError::malformed(format!(
                    "material override for actor {actor}, world has {num_actors} actors"
                ))
            })?;
        if std::mem::replace(&mut seen[index], true) {
            return Err(WorldError::malformed(format!(
                "actor {actor} has more than one material override entry"
            )));
        }
        dense[index] = slots;
    }
    Ok(dense)
}

fn check_ref(raw: i32, num_actors: usize, what: impl FnOnce() -> String) -> Result<()> {
    if raw == -1 || actor_index(raw).is_some_and(|i| i < num_actors) {
        return Ok(());
    }
    Err(WorldError::malformed(format!(
        "{} references actor {raw}, world has {num_actors} actors",
        what()
    )))
}

/// Checks every actor reference and rejects parent cycles.
///
/// Worlds built in memory go through the same checks as parsed ones before import.
pub fn validate_world(world: &World) -> Result<()> {
    let n = world.actors.len();

    if world.kind != DataType::World {
        return Err(WorldError::UnsupportedFormat(format!(
            "expected world data, found {:?}",
            world.kind
        )));
    }
    if world.override_materials.len() != n {
        return Err(WorldError::malformed(format!(
            "{} override tables for {n} actors",
            world.override_materials.len()
        )));
    }

    for (i, actor) in world.actors.iter().enumerate() {
        check_ref(actor.parent, n, || format!("actor {i} (`{}`) parent", actor.name))?;
        if actor.parent_index() == Some(i) {
            return Err(WorldError::malformed(format!(
                "actor {i} (`{}`) is its own parent",
                actor.name
            )));
        }
    }
    for (i, light) in world.lights.iter().enumerate() {
        check_ref(light.owner, n, || format!("light {i} owner"))?;
    }
    for (i, landscape) in world.landscapes.iter().enumerate() {
        check_ref(landscape.owner, n, || format!("landscape {i} owner"))?;
    }

    check_parent_cycles(&world.actors)
}

/// Every parent chain must reach `-1` within `actors.len()` hops.
fn check_parent_cycles(actors: &[Actor]) -> Result<()> {
    let n = actors.len();
    // Actors whose chain is already known to terminate.
    let mut rooted = vec![false; n];

    for start in 0..n {
        let mut path = Vec::new();
        let mut current = Some(start);

        while let Some(i) = current {
            if rooted[i] {
                break;
            }
            if path.len() >= n {
                return Err(WorldError::malformed(format!(
                    "parent chain of actor {start} (`{}`) loops",
                    actors[start].name
                )));
            }
            path.push(i);
            current = actors[i].parent_index();
        }

        for i in path {
            rooted[i] = true;
        }
    }
    Ok(())
}
