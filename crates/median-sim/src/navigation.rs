//! Turn-by-turn route synthesis.

use rand::Rng;

use median_contracts::simulation::{NavAction, RouteStep};

/// Streets a synthesized route can run along.
pub const STREETS: &[&str] = &[
    "İstiklal Caddesi",
    "Bağdat Caddesi",
    "Barbaros Bulvarı",
    "Büyükdere Caddesi",
    "Vatan Caddesi",
    "Millet Caddesi",
    "Kennedy Caddesi",
    "Ordu Caddesi",
    "Halaskargazi Caddesi",
    "Rıhtım Caddesi",
];

/// Street name on the terminal step.
pub const DESTINATION_STREET: &str = "Destination";

pub const MIN_TURNS: usize = 2;
pub const MAX_TURNS: usize = 4;

/// Leg distances are multiples of this many metres.
pub const DISTANCE_STEP_M: u32 = 50;
pub const MAX_LEG_M: u32 = 1_000;

/// Draw 2 to 4 legs followed by the Destination step.
pub fn synthesize_route<R: Rng + ?Sized>(rng: &mut R) -> Vec<RouteStep> {
    let turns = rng.gen_range(MIN_TURNS..=MAX_TURNS);
    let mut steps = Vec::with_capacity(turns + 1);

    for _ in 0..turns {
        let action = NavAction::TURNS[rng.gen_range(0..NavAction::TURNS.len())];
        let distance_m = DISTANCE_STEP_M * rng.gen_range(1..=MAX_LEG_M / DISTANCE_STEP_M);
        let street = STREETS[rng.gen_range(0..STREETS.len())];
        steps.push(RouteStep {
            action,
            distance_m,
            street: street.to_string(),
        });
    }

    steps.push(RouteStep {
        action: NavAction::Destination,
        distance_m: 0,
        street: DESTINATION_STREET.to_string(),
    });
    steps
}

/// Total route length in metres.
pub fn total_distance_m(steps: &[RouteStep]) -> u32 {
    steps.iter().map(|s| s.distance_m).sum()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn routes_have_two_to_four_legs_and_end_at_destination() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..500 {
            let steps = synthesize_route(&mut rng);
            let (last, legs) = steps.split_last().unwrap();

            assert!((MIN_TURNS..=MAX_TURNS).contains(&legs.len()));
            assert_eq!(last.action, NavAction::Destination);
            assert_eq!(last.distance_m, 0);
            assert_eq!(last.street, DESTINATION_STREET);

            for leg in legs {
                assert!(NavAction::TURNS.contains(&leg.action));
                assert!((DISTANCE_STEP_M..=MAX_LEG_M).contains(&leg.distance_m));
                assert_eq!(leg.distance_m % DISTANCE_STEP_M, 0);
                assert!(STREETS.contains(&leg.street.as_str()));
            }
        }
    }

    #[test]
    fn total_distance_sums_legs() {
        let mut rng = StdRng::seed_from_u64(8);
        let steps = synthesize_route(&mut rng);
        let expected: u32 = steps.iter().map(|s| s.distance_m).sum();
        assert_eq!(total_distance_m(&steps), expected);
        assert!(total_distance_m(&steps) >= 2 * DISTANCE_STEP_M);
    }
}
