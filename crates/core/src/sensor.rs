//! Sensor synthesis: season + fire state -> one plausible measurement set.
//!
//! Baselines are drawn fresh on every call, perturbed either by small ambient
//! noise or by the fire response scaled with intensity, then clamped to the
//! physical range of each channel. Values drifting outside those ranges are a
//! normal consequence of compounding randomness and are silently corrected.

use rand::Rng;

use crate::season::Season;

/// Baseline humidity draw, percent
const HUMIDITY_BASE: (f64, f64) = (40.0, 80.0);
/// Baseline oxygen draw, percent
const OXYGEN_BASE: (f64, f64) = (19.0, 21.0);
/// Baseline CO2 draw, ppm
const CO2_BASE: (f64, f64) = (300.0, 400.0);
/// Fire temperature response, celsius added at full intensity
const FIRE_TEMP_BOOST: (f64, f64) = (30.0, 50.0);

/// The four synthesized channels, already clamped and rounded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub temperature: f64,
    pub humidity: f64,
    pub oxygen: f64,
    pub co2: f64,
}

/// Synthesize one measurement set.
///
/// `intensity` must already be in [0, 1]; the propagation engine guarantees
/// this for every active node. Total over valid input: no error conditions.
pub fn synthesize<R: Rng + ?Sized>(
    season: Season,
    fire_active: bool,
    intensity: f64,
    rng: &mut R,
) -> SensorSample {
    debug_assert!((0.0..=1.0).contains(&intensity));

    let (temp_min, temp_max) = season.temperature_band();
    let base_temp = rng.random_range(temp_min..=temp_max);
    let base_humidity = rng.random_range(HUMIDITY_BASE.0..=HUMIDITY_BASE.1);
    let base_oxygen = rng.random_range(OXYGEN_BASE.0..=OXYGEN_BASE.1);
    let base_co2 = rng.random_range(CO2_BASE.0..=CO2_BASE.1);

    let (temperature, humidity, oxygen, co2) = if fire_active {
        (
            base_temp + intensity * rng.random_range(FIRE_TEMP_BOOST.0..=FIRE_TEMP_BOOST.1),
            base_humidity * (1.0 - intensity * 0.5),
            base_oxygen - intensity * 2.0,
            base_co2 + intensity * 200.0,
        )
    } else {
        (
            base_temp + rng.random_range(-2.0..=2.0),
            base_humidity + rng.random_range(-5.0..=5.0),
            base_oxygen + rng.random_range(-0.2..=0.2),
            base_co2 + rng.random_range(-20.0..=20.0),
        )
    };

    SensorSample {
        temperature: round2(temperature),
        humidity: round2(humidity.clamp(0.0, 100.0)),
        oxygen: round2(oxygen.clamp(10.0, 21.0)),
        co2: round2(co2.max(0.0)),
    }
}

/// Round to two decimal digits, the precision the dataset is emitted at
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
