use crate::problem::distance_matrix::Cost;

use super::{route::Route, route_cost::LegCost};

/// Cheapest way found to deliver an order.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    cost: Cost,
    route: Option<Route>,
    legs: Vec<LegCost>,
    routes_evaluated: usize,
}

impl Quote {
    pub fn new(cost: Cost, route: Route, legs: Vec<LegCost>, routes_evaluated: usize) -> Self {
        Quote {
            cost,
            route: Some(route),
            legs,
            routes_evaluated,
        }
    }

    /// Quote for an order with nothing to deliver.
    pub fn empty() -> Self {
        Quote {
            cost: 0.0,
            route: None,
            legs: Vec::new(),
            routes_evaluated: 0,
        }
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn legs(&self) -> &[LegCost] {
        &self.legs
    }

    pub fn routes_evaluated(&self) -> usize {
        self.routes_evaluated
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_none()
    }
}
