use thiserror::Error;

use crate::problem::{
    delivery_network::DeliveryNetwork,
    distance_matrix::{Cost, Distance},
    location::LocationIdx,
    order::GroupedOrder,
    weight::Weight,
};

use super::{carried_load::CarriedLoad, route::Route};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataIntegrityError {
    #[error("no distance between {from} and {to}")]
    MissingDistance { from: String, to: String },
    #[error("route visits unknown location {location}")]
    UnknownLocation { location: LocationIdx },
    #[error("load is too heavy to carry after picking up {product}")]
    LoadOverflow { product: String },
}

/// Breakdown of a single travelled leg.
#[derive(Debug, Clone, PartialEq)]
pub struct LegCost {
    pub from: LocationIdx,
    pub to: LocationIdx,
    pub distance: Distance,
    pub carried_weight: Weight,
    pub rate: Cost,
    pub cost: Cost,
}

/// Prices routes for one grouped order.
///
/// Goods are picked up when the route departs their center for the first
/// time and are all dropped when it arrives at the hub. Each leg costs its
/// distance times the tariff rate for the weight on board.
pub struct RouteCostSimulator<'a> {
    network: &'a DeliveryNetwork,
    grouped: &'a GroupedOrder,
}

impl<'a> RouteCostSimulator<'a> {
    pub fn new(network: &'a DeliveryNetwork, grouped: &'a GroupedOrder) -> Self {
        RouteCostSimulator { network, grouped }
    }

    pub fn cost(&self, route: &Route) -> Result<Cost, DataIntegrityError> {
        let mut total = 0.0;
        self.walk(route, |leg| total += leg.cost)?;
        Ok(total)
    }

    pub fn legs(&self, route: &Route) -> Result<Vec<LegCost>, DataIntegrityError> {
        let mut legs = Vec::with_capacity(route.len().saturating_sub(1));
        self.walk(route, |leg| legs.push(leg))?;
        Ok(legs)
    }

    fn walk(
        &self,
        route: &Route,
        mut on_leg: impl FnMut(LegCost),
    ) -> Result<(), DataIntegrityError> {
        let num_locations = self.network.num_locations();
        if let Some(&location) = route.stops().iter().find(|stop| stop.get() >= num_locations) {
            return Err(DataIntegrityError::UnknownLocation { location });
        }

        let tariff = self.network.tariff();
        let mut load = CarriedLoad::default();
        let mut picked_up = vec![false; num_locations];

        for (from, to) in route.legs() {
            if !picked_up[from.get()] {
                picked_up[from.get()] = true;
                for line in self.grouped.lines(from) {
                    load.pick_up(line)
                        .ok_or_else(|| DataIntegrityError::LoadOverflow {
                            product: line.product().to_owned(),
                        })?;
                }
            }

            let distance = self.network.distance(from, to).ok_or_else(|| {
                DataIntegrityError::MissingDistance {
                    from: self.network.location(from).external_id().to_owned(),
                    to: self.network.location(to).external_id().to_owned(),
                }
            })?;

            let carried_weight = load.total_weight();
            let rate = tariff.leg_rate(carried_weight);

            on_leg(LegCost {
                from,
                to,
                distance,
                carried_weight,
                rate,
                cost: rate * distance,
            });

            if self.network.is_hub(to) {
                load.drop_all();
            }
        }

        Ok(())
    }
}
