use std::{str::FromStr, sync::Arc};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{Level, debug, info, instrument};

use crate::problem::{
    delivery_network::DeliveryNetwork,
    distance_matrix::Cost,
    location::LocationIdx,
    order::{GroupedOrder, Order, ValidationError},
};

use super::{
    quote::Quote,
    route::Route,
    route_cost::{DataIntegrityError, RouteCostSimulator},
    route_generator::{generate_routes, routes_per_start},
};

pub const DEFAULT_MAX_CENTERS: usize = 8;

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),
    #[error("order spans {centers} centers, at most {max_centers} are supported")]
    TooManyCenters { centers: usize, max_centers: usize },
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Threads {
    #[default]
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => *num,
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid thread count {0:?}, expected \"single\", \"auto\" or a positive number")]
pub struct ParseThreadsError(String);

impl FromStr for Threads {
    type Err = ParseThreadsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "1" => Ok(Threads::Single),
            "auto" => Ok(Threads::Auto),
            other => match other.parse::<usize>() {
                Ok(num) if num > 0 => Ok(Threads::Multi(num)),
                _ => Err(ParseThreadsError(s.to_owned())),
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct OptimizerParams {
    /// Orders spanning more distinct centers are rejected, the number of
    /// routes grows factorially with it.
    pub max_centers: usize,
    /// Start centers are searched in parallel when more than one thread is
    /// available.
    pub threads: Threads,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        OptimizerParams {
            max_centers: DEFAULT_MAX_CENTERS,
            threads: Threads::Single,
        }
    }
}

struct StartBest {
    cost: Cost,
    route: Route,
    routes_evaluated: usize,
}

/// Finds the cheapest hub-relayed route for an order by trying every active
/// center as the start and every visiting order of the others.
pub struct Optimizer {
    network: Arc<DeliveryNetwork>,
    params: OptimizerParams,
    thread_pool: Option<rayon::ThreadPool>,
}

impl Optimizer {
    pub fn new(network: Arc<DeliveryNetwork>, params: OptimizerParams) -> Result<Self, OptimizerError> {
        let thread_pool = match params.threads.number_of_threads() {
            0 | 1 => None,
            num_threads => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()?,
            ),
        };

        Ok(Optimizer {
            network,
            params,
            thread_pool,
        })
    }

    pub fn network(&self) -> &Arc<DeliveryNetwork> {
        &self.network
    }

    pub fn params(&self) -> &OptimizerParams {
        &self.params
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(items = order.len()))]
    pub fn optimize(&self, order: &Order) -> Result<Quote, OptimizerError> {
        let grouped = GroupedOrder::from_order(order, &self.network)?;
        self.optimize_grouped(&grouped)
    }

    /// Returns the minimum cost over every start and visiting order.
    ///
    /// An order with no active center gets [`Quote::empty`]. Ties keep the
    /// first route found, starts being tried in ascending index order.
    pub fn optimize_grouped(&self, grouped: &GroupedOrder) -> Result<Quote, OptimizerError> {
        let active = grouped.active_centers();
        if active.is_empty() {
            debug!("Nothing to deliver");
            return Ok(Quote::empty());
        }

        if active.len() > self.params.max_centers {
            return Err(OptimizerError::TooManyCenters {
                centers: active.len(),
                max_centers: self.params.max_centers,
            });
        }

        debug!(
            centers = active.len(),
            routes = active.len() * routes_per_start(active.len()),
            "Searching routes"
        );

        let simulator = RouteCostSimulator::new(&self.network, grouped);
        let hub = self.network.hub();

        let results = match &self.thread_pool {
            Some(thread_pool) => thread_pool.install(|| {
                active
                    .par_iter()
                    .map(|&start| best_from_start(&simulator, start, &active, hub))
                    .collect::<Vec<_>>()
            }),
            None => active
                .iter()
                .map(|&start| best_from_start(&simulator, start, &active, hub))
                .collect::<Vec<_>>(),
        };

        let mut best: Option<StartBest> = None;
        let mut routes_evaluated = 0;
        for result in results {
            let Some(candidate) = result? else {
                continue;
            };

            routes_evaluated += candidate.routes_evaluated;
            if best.as_ref().is_none_or(|best| candidate.cost < best.cost) {
                best = Some(candidate);
            }
        }

        let Some(best) = best else {
            return Ok(Quote::empty());
        };

        let legs = simulator.legs(&best.route)?;

        info!(
            cost = best.cost,
            centers = active.len(),
            routes_evaluated,
            "Found cheapest route"
        );

        Ok(Quote::new(best.cost, best.route, legs, routes_evaluated))
    }
}

fn best_from_start(
    simulator: &RouteCostSimulator<'_>,
    start: LocationIdx,
    active: &[LocationIdx],
    hub: LocationIdx,
) -> Result<Option<StartBest>, DataIntegrityError> {
    let mut best: Option<StartBest> = None;
    let mut routes_evaluated = 0;

    for route in generate_routes(start, active, hub) {
        routes_evaluated += 1;
        let cost = simulator.cost(&route)?;

        if best.as_ref().is_none_or(|best| cost < best.cost) {
            best = Some(StartBest {
                cost,
                route,
                routes_evaluated: 0,
            });
        }
    }

    debug!(%start, routes_evaluated, "Evaluated start center");

    Ok(best.map(|best| StartBest {
        routes_evaluated,
        ..best
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{problem::tariff::TariffSchedule, test_utils};

    fn optimizer(network: DeliveryNetwork) -> Optimizer {
        Optimizer::new(Arc::new(network), OptimizerParams::default()).unwrap()
    }

    #[test]
    fn test_single_item() {
        let optimizer = optimizer(test_utils::reference_network());
        let quote = optimizer.optimize(&Order::new().with_item("A", 1)).unwrap();

        assert_eq!(quote.cost(), 30.0);
        assert_eq!(quote.routes_evaluated(), 1);
        assert_eq!(
            quote.route().unwrap().external_ids(optimizer.network()),
            vec!["C1", "L1"]
        );
        assert_eq!(quote.legs().len(), 1);
    }

    #[test]
    fn test_two_centers() {
        let optimizer = optimizer(test_utils::reference_network());
        let quote = optimizer
            .optimize(&Order::new().with_item("A", 1).with_item("D", 1))
            .unwrap();

        // C1 first: 30 + 2.5 * 10 + 65 = 120, C2 first: 65 + 3 * 10 + 30 = 125.
        assert_eq!(quote.cost(), 120.0);
        assert_eq!(quote.routes_evaluated(), 2);
        assert_eq!(
            quote.route().unwrap().external_ids(optimizer.network()),
            vec!["C1", "L1", "C2", "L1"]
        );
    }

    #[test]
    fn test_tie_keeps_first_start() {
        let mut builder = DeliveryNetwork::builder();
        builder
            .set_hub("H")
            .add_center("X")
            .add_center("Y")
            .add_product("x", "X", 1.0)
            .add_product("y", "Y", 1.0)
            .add_distance("X", "H", 2.0)
            .add_distance("Y", "H", 2.0);
        let optimizer = optimizer(builder.build().unwrap());

        let quote = optimizer
            .optimize(&Order::new().with_item("y", 1).with_item("x", 1))
            .unwrap();

        assert_eq!(quote.cost(), 60.0);
        assert_eq!(
            quote.route().unwrap().external_ids(optimizer.network()),
            vec!["X", "H", "Y", "H"]
        );
    }

    #[test]
    fn test_picks_cheaper_start() {
        let optimizer = optimizer(test_utils::reference_network());

        // C2 first: 2.5 * 26 + 2 * 10 + 2 * 10 = 105, C3 first: 2 * 10 + 2.5 * 10 + 65 = 110.
        let quote = optimizer
            .optimize(&Order::new().with_item("D", 1).with_item("G", 1))
            .unwrap();

        assert_eq!(quote.cost(), 105.0);
        assert_eq!(
            quote.route().unwrap().external_ids(optimizer.network()),
            vec!["C2", "L1", "C3", "L1"]
        );
    }

    #[test]
    fn test_picks_later_start_when_cheaper() {
        let mut builder = DeliveryNetwork::builder();
        builder
            .set_hub("H")
            .add_center("NEAR")
            .add_center("FAR")
            .add_product("n", "NEAR", 1.0)
            .add_product("f", "FAR", 1.0)
            .add_distance("NEAR", "H", 1.0)
            .add_distance("FAR", "H", 4.0);
        let optimizer = optimizer(builder.build().unwrap());

        // NEAR first: 10 + 40 + 40 = 90, FAR first: 40 + 10 + 10 = 60.
        let quote = optimizer
            .optimize(&Order::new().with_item("n", 1).with_item("f", 1))
            .unwrap();

        assert_eq!(quote.cost(), 60.0);
        assert_eq!(
            quote.route().unwrap().external_ids(optimizer.network()),
            vec!["FAR", "H", "NEAR", "H"]
        );
    }

    #[test]
    fn test_free_empty_legs_make_starts_equal() {
        let mut builder = test_utils::reference_network_builder();
        builder.set_tariff(TariffSchedule::default().with_empty_legs_charged(false));
        let optimizer = optimizer(builder.build().unwrap());

        let quote = optimizer
            .optimize(&Order::new().with_item("A", 1).with_item("D", 1))
            .unwrap();

        assert_eq!(quote.cost(), 95.0);
        assert_eq!(
            quote.route().unwrap().external_ids(optimizer.network()),
            vec!["C1", "L1", "C2", "L1"]
        );
    }

    #[test]
    fn test_three_centers_evaluate_every_route() {
        let optimizer = optimizer(test_utils::reference_network());
        let quote = optimizer
            .optimize(&test_utils::order(&[("A", 1), ("D", 1), ("G", 1)]))
            .unwrap();

        assert_eq!(quote.routes_evaluated(), 6);
        // Loaded legs cost 30 + 65 + 20 whatever the order, the empty legs
        // are cheapest when the farthest center (C1) is the start.
        assert_eq!(quote.cost(), 115.0 + 10.0 * (2.5 + 2.0));
        assert_eq!(
            quote.route().unwrap().external_ids(optimizer.network()),
            vec!["C1", "L1", "C2", "L1", "C3", "L1"]
        );
    }

    #[test]
    fn test_empty_orders() {
        let optimizer = optimizer(test_utils::reference_network());

        for order in [Order::new(), Order::new().with_item("A", 0)] {
            let quote = optimizer.optimize(&order).unwrap();
            assert_eq!(quote, Quote::empty());
            assert_eq!(quote.cost(), 0.0);
            assert!(quote.is_empty());
        }
    }

    #[test]
    fn test_unknown_product() {
        let optimizer = optimizer(test_utils::reference_network());
        let error = optimizer
            .optimize(&Order::new().with_item("A", 1).with_item("X", 1))
            .unwrap_err();

        assert!(matches!(
            error,
            OptimizerError::Validation(ValidationError::UnknownProduct { ref product }) if product == "X"
        ));
        assert_eq!(error.to_string(), "Product X not found.");
    }

    #[test]
    fn test_too_many_centers() {
        let optimizer = Optimizer::new(
            Arc::new(test_utils::reference_network()),
            OptimizerParams {
                max_centers: 2,
                ..OptimizerParams::default()
            },
        )
        .unwrap();

        let error = optimizer
            .optimize(&test_utils::order(&[("A", 1), ("D", 1), ("G", 1)]))
            .unwrap_err();

        assert!(matches!(
            error,
            OptimizerError::TooManyCenters {
                centers: 3,
                max_centers: 2
            }
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let network = Arc::new(test_utils::line_network(6));
        let order = test_utils::one_item_per_center(&network);

        let sequential = Optimizer::new(network.clone(), OptimizerParams::default())
            .unwrap()
            .optimize(&order)
            .unwrap();
        let parallel = Optimizer::new(
            network,
            OptimizerParams {
                threads: Threads::Multi(4),
                ..OptimizerParams::default()
            },
        )
        .unwrap()
        .optimize(&order)
        .unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(sequential.routes_evaluated(), 720);
    }

    #[test]
    fn test_parse_threads() {
        assert_eq!("auto".parse::<Threads>().unwrap(), Threads::Auto);
        assert_eq!("Single".parse::<Threads>().unwrap(), Threads::Single);
        assert_eq!("4".parse::<Threads>().unwrap(), Threads::Multi(4));
        assert!("0".parse::<Threads>().is_err());
        assert!("many".parse::<Threads>().is_err());
    }
}
