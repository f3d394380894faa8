use rand::Rng;
use tracing::debug;

use crate::heat_index::round_to;
use crate::types::{Neighborhood, NeighborhoodProfile, NeighborhoodTemperature, NeighborhoodTemperatures};

/// Half-width of the uniform micro-variation added to each neighborhood.
pub const JITTER_RANGE_F: f64 = 2.0;

/// Heat-island reference table, one entry per `Neighborhood` in table order.
pub const PROFILES: [NeighborhoodProfile; 10] = [
    profile(Neighborhood::Chinatown, 1.5, 3500, 0.02),
    profile(Neighborhood::Roxbury, 1.4, 8500, 0.08),
    profile(Neighborhood::Dorchester, 1.3, 12000, 0.12),
    profile(Neighborhood::EastBoston, 1.35, 6500, 0.05),
    profile(Neighborhood::Mattapan, 1.25, 5500, 0.15),
    profile(Neighborhood::SouthEnd, 1.3, 4000, 0.06),
    profile(Neighborhood::BackBay, 1.15, 2500, 0.20),
    profile(Neighborhood::JamaicaPlain, 1.1, 5000, 0.35),
    profile(Neighborhood::Charlestown, 1.2, 3000, 0.10),
    profile(Neighborhood::Brighton, 1.05, 6000, 0.25),
];

const fn profile(
    neighborhood: Neighborhood,
    heat_factor: f64,
    vulnerable_population: u32,
    green_space_ratio: f64,
) -> NeighborhoodProfile {
    NeighborhoodProfile {
        neighborhood,
        heat_factor,
        vulnerable_population,
        green_space_ratio,
    }
}

impl Neighborhood {
    pub fn profile(&self) -> &'static NeighborhoodProfile {
        // PROFILES is laid out in discriminant order
        &PROFILES[*self as usize]
    }
}

/// Adjust a city-wide base temperature for every neighborhood, drawing one
/// jitter sample per neighborhood from `rng`.
pub fn adjust_temperatures<R: Rng + ?Sized>(base_temp: f64, rng: &mut R) -> NeighborhoodTemperatures {
    PROFILES
        .iter()
        .map(|p| {
            let jitter = rng.gen_range(-JITTER_RANGE_F..=JITTER_RANGE_F);
            let temperature = round_to(base_temp * p.heat_factor + jitter, 1);
            debug!("{}: base {} x {} -> {}", p.neighborhood, base_temp, p.heat_factor, temperature);
            (
                p.neighborhood,
                NeighborhoodTemperature {
                    temperature,
                    heat_factor: p.heat_factor,
                    vulnerable_population: p.vulnerable_population,
                    green_space_percent: p.green_space_ratio * 100.0,
                },
            )
        })
        .collect()
}

pub fn adjust_temperatures_with_entropy(base_temp: f64) -> NeighborhoodTemperatures {
    adjust_temperatures(base_temp, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_profile_table_invariants() {
        assert_eq!(PROFILES.len(), Neighborhood::ALL.len());
        for (p, n) in PROFILES.iter().zip(Neighborhood::ALL.iter()) {
            assert_eq!(p.neighborhood, *n);
            assert_eq!(n.profile().neighborhood, *n);
            assert!(p.heat_factor > 0.0);
            assert!((0.0..=1.0).contains(&p.green_space_ratio));
        }
        assert_eq!(Neighborhood::Chinatown.profile().heat_factor, 1.5);
        assert_eq!(Neighborhood::Brighton.profile().heat_factor, 1.05);
    }

    #[test]
    fn test_adjusted_temperature_within_jitter_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for base in [-10.0, 0.0, 55.5, 72.0, 89.0, 92.0, 101.3] {
            for _ in 0..50 {
                let temps = adjust_temperatures(base, &mut rng);
                assert_eq!(temps.len(), PROFILES.len());
                for p in PROFILES.iter() {
                    let t = temps[&p.neighborhood].temperature;
                    let center = base * p.heat_factor;
                    // one-decimal rounding may land 0.05 past the raw bound
                    assert!(t >= center - JITTER_RANGE_F - 0.05 - 1e-9, "{} below bound for {}", t, p.neighborhood);
                    assert!(t <= center + JITTER_RANGE_F + 0.05 + 1e-9, "{} above bound for {}", t, p.neighborhood);
                }
            }
        }
    }

    #[test]
    fn test_copied_profile_fields() {
        let temps = adjust_temperatures_with_entropy(80.0);
        let chinatown = temps[&Neighborhood::Chinatown];
        assert_eq!(chinatown.heat_factor, 1.5);
        assert_eq!(chinatown.vulnerable_population, 3500);
        assert!((chinatown.green_space_percent - 2.0).abs() < 1e-9);
        let jp = temps[&Neighborhood::JamaicaPlain];
        assert!((jp.green_space_percent - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_rounded_to_one_decimal() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let temps = adjust_temperatures(87.3, &mut rng);
        for t in temps.values() {
            let scaled = t.temperature * 10.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a = adjust_temperatures(90.0, &mut ChaCha8Rng::seed_from_u64(42));
        let b = adjust_temperatures(90.0, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_clamping_for_pathological_input() {
        let temps = adjust_temperatures(1000.0, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(temps[&Neighborhood::Chinatown].temperature > 1400.0);
    }
}
