use super::{delivery_network::NetworkError, distance_matrix::Cost, weight::Weight};

/// Weight-tiered price per unit of distance.
///
/// Loads up to `allowance` travel at `base_rate`. Every started `tier_size`
/// above the allowance adds `tier_increment` to the rate, so with the default
/// schedule 5 costs 10, anything above 5 up to 10 costs 18, above 10 up to 15
/// costs 26 and so on.
///
/// Legs travelled without any load are billed at the base rate like any light
/// load. Clearing `charge_empty_legs` makes them free instead.
#[derive(Debug, Clone, PartialEq)]
pub struct TariffSchedule {
    allowance: Weight,
    base_rate: Cost,
    tier_size: Weight,
    tier_increment: Cost,
    charge_empty_legs: bool,
}

pub const DEFAULT_ALLOWANCE: Weight = Weight::from_whole_units(5);
pub const DEFAULT_BASE_RATE: Cost = 10.0;
pub const DEFAULT_TIER_SIZE: Weight = Weight::from_whole_units(5);
pub const DEFAULT_TIER_INCREMENT: Cost = 8.0;

impl Default for TariffSchedule {
    fn default() -> Self {
        TariffSchedule {
            allowance: DEFAULT_ALLOWANCE,
            base_rate: DEFAULT_BASE_RATE,
            tier_size: DEFAULT_TIER_SIZE,
            tier_increment: DEFAULT_TIER_INCREMENT,
            charge_empty_legs: true,
        }
    }
}

impl TariffSchedule {
    pub fn new(
        allowance: Weight,
        base_rate: Cost,
        tier_size: Weight,
        tier_increment: Cost,
    ) -> Result<Self, NetworkError> {
        if tier_size.is_zero() {
            return Err(NetworkError::InvalidTariff(
                "tier size must be positive".to_owned(),
            ));
        }

        if !base_rate.is_finite() || base_rate < 0.0 {
            return Err(NetworkError::InvalidTariff(format!(
                "base rate must be a non-negative number, got {base_rate}"
            )));
        }

        if !tier_increment.is_finite() || tier_increment < 0.0 {
            return Err(NetworkError::InvalidTariff(format!(
                "tier increment must be a non-negative number, got {tier_increment}"
            )));
        }

        Ok(TariffSchedule {
            allowance,
            base_rate,
            tier_size,
            tier_increment,
            charge_empty_legs: true,
        })
    }

    pub fn with_empty_legs_charged(mut self, charge_empty_legs: bool) -> Self {
        self.charge_empty_legs = charge_empty_legs;
        self
    }

    /// Number of started tiers above the allowance.
    pub fn tiers(&self, weight: Weight) -> u64 {
        if weight <= self.allowance {
            return 0;
        }

        let excess = weight - self.allowance;
        excess.micros().div_ceil(self.tier_size.micros())
    }

    /// Cost charged per unit of distance for carrying `weight` on one leg.
    pub fn rate(&self, weight: Weight) -> Cost {
        self.base_rate + self.tier_increment * self.tiers(weight) as f64
    }

    /// Rate actually billed on a leg carrying `weight`.
    pub fn leg_rate(&self, weight: Weight) -> Cost {
        if weight.is_zero() && !self.charge_empty_legs {
            return 0.0;
        }

        self.rate(weight)
    }

    pub fn allowance(&self) -> Weight {
        self.allowance
    }

    pub fn base_rate(&self) -> Cost {
        self.base_rate
    }

    pub fn tier_size(&self) -> Weight {
        self.tier_size
    }

    pub fn tier_increment(&self) -> Cost {
        self.tier_increment
    }

    pub fn charges_empty_legs(&self) -> bool {
        self.charge_empty_legs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(units: f64) -> Cost {
        TariffSchedule::default().rate(Weight::from_units(units).unwrap())
    }

    #[test]
    fn test_base_rate_up_to_allowance() {
        assert_eq!(rate(0.0), 10.0);
        assert_eq!(rate(3.0), 10.0);
        assert_eq!(rate(5.0), 10.0);
    }

    #[test]
    fn test_tier_boundaries_are_exact() {
        assert!(rate(5.0001) > 10.0);
        assert_eq!(rate(5.0001), 18.0);
        assert_eq!(rate(10.0), 18.0);
        assert_eq!(rate(10.000001), 26.0);
        assert_eq!(rate(12.0), 26.0);
        assert_eq!(rate(15.0), 26.0);
        assert_eq!(rate(25.0), 42.0);
    }

    #[test]
    fn test_rate_is_non_decreasing() {
        let tariff = TariffSchedule::default();
        let mut previous = tariff.rate(Weight::ZERO);

        for micros in (0..60_000_000u64).step_by(250_001) {
            let current = tariff.rate(Weight::from_micros(micros));
            assert!(current >= previous, "rate decreased at {micros} micros");
            previous = current;
        }
    }

    #[test]
    fn test_custom_schedule() {
        let tariff = TariffSchedule::new(
            Weight::from_whole_units(1),
            2.0,
            Weight::from_units(0.5).unwrap(),
            1.5,
        )
        .unwrap();

        assert_eq!(tariff.rate(Weight::from_whole_units(1)), 2.0);
        assert_eq!(tariff.rate(Weight::from_units(1.5).unwrap()), 3.5);
        assert_eq!(tariff.rate(Weight::from_units(1.6).unwrap()), 5.0);
    }

    #[test]
    fn test_empty_legs_billed_at_base_rate() {
        let tariff = TariffSchedule::default();
        assert!(tariff.charges_empty_legs());
        assert_eq!(tariff.leg_rate(Weight::ZERO), tariff.rate(Weight::ZERO));
        assert_eq!(tariff.leg_rate(Weight::ZERO), 10.0);
    }

    #[test]
    fn test_free_empty_legs() {
        let tariff = TariffSchedule::default().with_empty_legs_charged(false);
        assert!(!tariff.charges_empty_legs());
        assert_eq!(tariff.leg_rate(Weight::ZERO), 0.0);
        assert_eq!(tariff.leg_rate(Weight::from_micros(1)), 10.0);
    }

    #[test]
    fn test_invalid_schedules_are_rejected() {
        assert!(matches!(
            TariffSchedule::new(DEFAULT_ALLOWANCE, 10.0, Weight::ZERO, 8.0),
            Err(NetworkError::InvalidTariff(_))
        ));
        assert!(matches!(
            TariffSchedule::new(DEFAULT_ALLOWANCE, -1.0, DEFAULT_TIER_SIZE, 8.0),
            Err(NetworkError::InvalidTariff(_))
        ));
        assert!(matches!(
            TariffSchedule::new(DEFAULT_ALLOWANCE, 10.0, DEFAULT_TIER_SIZE, f64::NAN),
            Err(NetworkError::InvalidTariff(_))
        ));
    }
}
