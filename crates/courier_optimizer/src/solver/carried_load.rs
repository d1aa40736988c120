use crate::problem::{order::OrderLine, weight::Weight};

/// Goods on board during a leg. Everything picked up rides along until the
/// next drop at the hub.
#[derive(Debug, Clone, Default)]
pub struct CarriedLoad {
    total_weight: Weight,
}

impl CarriedLoad {
    /// Loads every unit of `line`. Returns `None`, leaving the load untouched,
    /// when the total would not be representable.
    pub fn pick_up(&mut self, line: &OrderLine) -> Option<()> {
        self.total_weight = self.total_weight.checked_add(line.weight())?;
        Some(())
    }

    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    pub fn drop_all(&mut self) {
        self.total_weight = Weight::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: &str, unit_weight: Weight, quantity: u32) -> OrderLine {
        OrderLine::new(product, quantity, unit_weight).unwrap()
    }

    #[test]
    fn test_accumulates_across_centers() {
        let mut load = CarriedLoad::default();

        load.pick_up(&line("A", Weight::from_whole_units(3), 2)).unwrap();
        load.pick_up(&line("G", Weight::from_units(0.5).unwrap(), 3)).unwrap();
        load.pick_up(&line("H", Weight::from_whole_units(1), 1)).unwrap();

        assert_eq!(load.total_weight(), Weight::from_units(8.5).unwrap());

        load.drop_all();
        assert_eq!(load.total_weight(), Weight::ZERO);
    }

    #[test]
    fn test_overflow_leaves_load_untouched() {
        let mut load = CarriedLoad::default();
        let heavy = line("X", Weight::from_micros(u64::MAX / 2 + 1), 1);

        load.pick_up(&heavy).unwrap();
        assert!(load.pick_up(&heavy).is_none());
        assert_eq!(load.total_weight(), heavy.weight());
    }
}
