use std::ops::Sub;

/// A non-negative weight stored as an exact number of millionths of a unit.
///
/// Keeping weights integral makes tier boundaries exact: `10.0` is exactly
/// twice `5.0`, whatever the float representation of the input was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Weight(u64);

const MICROS_PER_UNIT: u64 = 1_000_000;

impl Weight {
    pub const ZERO: Weight = Weight(0);

    pub const fn from_micros(micros: u64) -> Self {
        Weight(micros)
    }

    pub const fn from_whole_units(units: u64) -> Self {
        Weight(units * MICROS_PER_UNIT)
    }

    /// Converts a weight expressed in units, rounding to the nearest millionth.
    ///
    /// Returns `None` for negative, NaN or infinite values and for values too
    /// large to be represented.
    pub fn from_units(units: f64) -> Option<Self> {
        if !units.is_finite() || units < 0.0 {
            return None;
        }

        let micros = (units * MICROS_PER_UNIT as f64).round();
        if micros >= u64::MAX as f64 {
            return None;
        }

        Some(Weight(micros as u64))
    }

    pub const fn micros(&self) -> u64 {
        self.0
    }

    pub fn value(&self) -> f64 {
        self.0 as f64 / MICROS_PER_UNIT as f64
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `None` when the sum is not representable.
    pub fn checked_add(self, other: Weight) -> Option<Weight> {
        self.0.checked_add(other.0).map(Weight)
    }

    /// Scales a unit weight by a quantity, `None` on overflow.
    pub fn checked_mul(self, quantity: u32) -> Option<Weight> {
        self.0.checked_mul(u64::from(quantity)).map(Weight)
    }
}

/// Floors at zero.
impl Sub for Weight {
    type Output = Weight;

    fn sub(self, other: Weight) -> Weight {
        Weight(self.0.saturating_sub(other.0))
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
