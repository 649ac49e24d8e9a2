//! Degraded-mode data used when the prediction service cannot be reached.
//!
//! The estimated history is fabricated: a per-country base growth plus a
//! slow sine cycle and uniform noise. It only exists so the dashboard has
//! something to draw, and callers must flag it as estimated.

use common::{ChartDataPoint, round2};
use rand::Rng;
use tracing::{debug, warn};

/// First and last year of the estimated series.
pub const ESTIMATED_FIRST_YEAR: i32 = 1973;
pub const ESTIMATED_LAST_YEAR: i32 = 2024;

/// Base growth used for countries missing from [`FALLBACK_COUNTRIES`].
pub const DEFAULT_BASE_GROWTH: f64 = 3.0;

/// A country known without asking the service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackCountry {
    pub name: &'static str,
    pub region: &'static str,
    pub avg_growth: f64,
}

pub const FALLBACK_COUNTRIES: [FallbackCountry; 15] = [
    FallbackCountry { name: "United States", region: "Americas", avg_growth: 2.5 },
    FallbackCountry { name: "China", region: "Asia", avg_growth: 8.2 },
    FallbackCountry { name: "India", region: "Asia", avg_growth: 6.8 },
    FallbackCountry { name: "Japan", region: "Asia", avg_growth: 1.2 },
    FallbackCountry { name: "Germany", region: "Europe", avg_growth: 1.8 },
    FallbackCountry { name: "United Kingdom", region: "Europe", avg_growth: 2.1 },
    FallbackCountry { name: "France", region: "Europe", avg_growth: 1.6 },
    FallbackCountry { name: "Brazil", region: "Americas", avg_growth: 2.3 },
    FallbackCountry { name: "Italy", region: "Europe", avg_growth: 0.9 },
    FallbackCountry { name: "Canada", region: "Americas", avg_growth: 2.2 },
    FallbackCountry { name: "South Korea", region: "Asia", avg_growth: 3.5 },
    FallbackCountry { name: "Russia", region: "Europe", avg_growth: 1.7 },
    FallbackCountry { name: "Australia", region: "Oceania", avg_growth: 2.8 },
    FallbackCountry { name: "Spain", region: "Europe", avg_growth: 1.5 },
    FallbackCountry { name: "Mexico", region: "Americas", avg_growth: 2.1 },
];

/// Names of the fallback countries, in table order.
pub fn fallback_country_names() -> Vec<String> {
    FALLBACK_COUNTRIES.iter().map(|c| c.name.to_string()).collect()
}

pub fn find_fallback_country(name: &str) -> Option<&'static FallbackCountry> {
    FALLBACK_COUNTRIES.iter().find(|c| c.name == name)
}

/// Synthesize one point per year from 1973 to 2024 inclusive.
pub fn generate_estimated_history<R: Rng>(country: &str, rng: &mut R) -> Vec<ChartDataPoint> {
    let base_growth = match find_fallback_country(country) {
        Some(known) => known.avg_growth,
        None => {
            warn!(country, "No reference growth for country, using default base");
            DEFAULT_BASE_GROWTH
        }
    };

    let series: Vec<ChartDataPoint> = (ESTIMATED_FIRST_YEAR..=ESTIMATED_LAST_YEAR)
        .map(|year| {
            let random_variation = (rng.random::<f64>() - 0.5) * 4.0;
            let cyclical_pattern = ((year - ESTIMATED_FIRST_YEAR) as f64 / 10.0).sin() * 2.0;
            ChartDataPoint::historical(year, round2(base_growth + random_variation + cyclical_pattern))
        })
        .collect();

    debug!(country, base_growth, len = series.len(), "Generated estimated history");
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_estimated_history_covers_1973_to_2024() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = generate_estimated_history("India", &mut rng);

        assert_eq!(series.len(), 52);
        assert_eq!(series.first().unwrap().year, "1973");
        assert_eq!(series.last().unwrap().year, "2024");
        assert!(series.iter().all(|p| p.is_historical()));
    }

    #[test]
    fn test_estimated_history_stays_within_noise_band() {
        let mut rng = StdRng::seed_from_u64(42);
        let base = find_fallback_country("China").unwrap().avg_growth;
        for point in generate_estimated_history("China", &mut rng) {
            // noise in [-2, 2), cycle in [-2, 2], plus rounding
            assert!(point.growth >= base - 4.01 && point.growth <= base + 4.01, "{point:?}");
        }
    }

    #[test]
    fn test_unknown_country_uses_default_base() {
        let mut rng = StdRng::seed_from_u64(1);
        let series = generate_estimated_history("Atlantis", &mut rng);
        assert_eq!(series.len(), 52);
        let mean: f64 = series.iter().map(|p| p.growth).sum::<f64>() / series.len() as f64;
        assert!((mean - DEFAULT_BASE_GROWTH).abs() < 2.5);
    }

    #[test]
    fn test_same_seed_gives_same_series() {
        let a = generate_estimated_history("Japan", &mut StdRng::seed_from_u64(9));
        let b = generate_estimated_history("Japan", &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_country_names() {
        let names = fallback_country_names();
        assert_eq!(names.len(), 15);
        assert_eq!(names[0], "United States");
        assert_eq!(names[14], "Mexico");
        assert_eq!(find_fallback_country("Spain").unwrap().region, "Europe");
    }
}
