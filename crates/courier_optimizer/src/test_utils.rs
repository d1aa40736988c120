use crate::{
    problem::{
        delivery_network::{DeliveryNetwork, DeliveryNetworkBuilder},
        order::Order,
        reference_network,
    },
    solver::route::Route,
};

pub fn reference_network() -> DeliveryNetwork {
    reference_network::reference_network().unwrap()
}

pub fn reference_network_builder() -> DeliveryNetworkBuilder {
    reference_network::reference_network_builder()
}

/// Network with `centers` centers `C1..Cn` around hub `H`, `Ci` being `i`
/// away from the hub and stocking product `Pi` weighing `i`.
pub fn line_network(centers: usize) -> DeliveryNetwork {
    let mut builder = DeliveryNetwork::builder();
    builder.set_hub("H");

    for i in 1..=centers {
        let center = format!("C{i}");
        builder
            .add_center(center.clone())
            .add_product(format!("P{i}"), center.clone(), i as f64)
            .add_distance(center, "H", i as f64);
    }

    builder.build().unwrap()
}

/// One unit of the first product of every center.
pub fn one_item_per_center(network: &DeliveryNetwork) -> Order {
    let mut order = Order::new();
    for center in network.centers() {
        if let Some((product, _)) = network
            .catalog()
            .iter()
            .find(|(_, entry)| entry.center() == center)
        {
            order.insert(product, 1);
        }
    }
    order
}

pub fn order(items: &[(&str, u32)]) -> Order {
    items.iter().copied().collect()
}

pub fn route(network: &DeliveryNetwork, stops: &[&str]) -> Route {
    Route::new(
        stops
            .iter()
            .map(|stop| network.location_idx(stop).unwrap())
            .collect(),
    )
}
