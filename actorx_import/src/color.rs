use actorx_world::Rgb;

pub const MIN_KELVIN: f32 = 1000.0;
pub const MAX_KELVIN: f32 = 40000.0;

/// Black-body colour for a temperature in Kelvin (Tanner Helland's fit).
/// Input is clamped to `[1000, 40000]`; every output channel is in `[0, 1]`.
pub fn kelvin_to_rgb(kelvin: f32) -> Rgb {
    // NaN clamps to NaN; treat it as the low end.
    let kelvin = if kelvin.is_nan() { MIN_KELVIN } else { kelvin };
    let t = f64::from(kelvin.clamp(MIN_KELVIN, MAX_KELVIN)) / 100.0;

    let red = if t <= 66.0 {
        255.0
    } else {
        329.698727446 * (t - 60.0).powf(-0.1332047592)
    };

    let green = if t <= 66.0 {
        99.4708025861 * t.ln() - 161.1195681661
    } else {
        288.1221695283 * (t - 60.0).powf(-0.0755148492)
    };

    let blue = if t >= 66.0 {
        255.0
    } else if t <= 19.0 {
        0.0
    } else {
        138.5177312231 * (t - 10.0).ln() - 305.0447927307
    };

    Rgb::new(channel(red), channel(green), channel(blue))
}

fn channel(value: f64) -> f32 {
    (value.clamp(0.0, 255.0) / 255.0) as f32
}
