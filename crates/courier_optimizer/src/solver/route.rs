use crate::problem::{delivery_network::DeliveryNetwork, location::LocationIdx};

/// Ordered stops of a candidate delivery: `[start, hub, c1, hub, ..., hub]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    stops: Vec<LocationIdx>,
}

impl Route {
    pub fn new(stops: Vec<LocationIdx>) -> Self {
        Route { stops }
    }

    pub fn stops(&self) -> &[LocationIdx] {
        &self.stops
    }

    pub fn start(&self) -> Option<LocationIdx> {
        self.stops.first().copied()
    }

    pub fn end(&self) -> Option<LocationIdx> {
        self.stops.last().copied()
    }

    /// Consecutive `(from, to)` pairs.
    pub fn legs(&self) -> impl Iterator<Item = (LocationIdx, LocationIdx)> + '_ {
        self.stops.windows(2).map(|leg| (leg[0], leg[1]))
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn external_ids(&self, network: &DeliveryNetwork) -> Vec<String> {
        self.stops
            .iter()
            .map(|&stop| network.location(stop).external_id().to_owned())
            .collect()
    }
}
