//! Statistical range validation of the sensor synthesizer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sensor_sim_core::{synthesize, Season};

const DRAWS: usize = 10_000;

#[test]
fn quiet_summer_temperature_stays_in_noisy_band() {
    // Band [15, 35] plus symmetric noise of at most 2 either way
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..DRAWS {
        let sample = synthesize(Season::Summer, false, 0.0, &mut rng);
        assert!(
            (13.0..=37.0).contains(&sample.temperature),
            "temperature {} out of band",
            sample.temperature
        );
    }
}

#[test]
fn full_intensity_oxygen_lands_in_depleted_band() {
    // Baseline min 19.0 minus the full 2.0 depletion, clamped below at 10
    let seasons = [
        Season::Winter,
        Season::Spring,
        Season::Summer,
        Season::Autumn,
    ];
    let mut rng = StdRng::seed_from_u64(2);
    for i in 0..DRAWS {
        let season = seasons[i % seasons.len()];
        let sample = synthesize(season, true, 1.0, &mut rng);
        assert!(
            (10.0..=19.2).contains(&sample.oxygen),
            "oxygen {} out of band",
            sample.oxygen
        );
    }
}

#[test]
fn physical_clamps_hold_under_arbitrary_intensity() {
    let seasons = [
        Season::Winter,
        Season::Spring,
        Season::Summer,
        Season::Autumn,
    ];
    let mut rng = StdRng::seed_from_u64(3);
    for i in 0..DRAWS {
        let season = seasons[i % seasons.len()];
        let fire = rng.random_bool(0.5);
        let intensity = if fire { rng.random_range(0.0..=1.0) } else { 0.0 };

        let sample = synthesize(season, fire, intensity, &mut rng);
        assert!((0.0..=100.0).contains(&sample.humidity));
        assert!((10.0..=21.0).contains(&sample.oxygen));
        assert!(sample.co2 >= 0.0);
    }
}

#[test]
fn fire_depresses_humidity_and_raises_co2() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..DRAWS {
        let sample = synthesize(Season::Summer, true, 1.0, &mut rng);
        // Halved from a [40, 80] baseline
        assert!((20.0..=40.0).contains(&sample.humidity));
        // Raised by the full 200 ppm
        assert!((500.0..=600.0).contains(&sample.co2));
    }
}
