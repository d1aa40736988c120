use super::delivery_network::{DeliveryNetwork, DeliveryNetworkBuilder, NetworkError};

pub const REFERENCE_HUB: &str = "L1";
pub const REFERENCE_CENTERS: [&str; 3] = ["C1", "C2", "C3"];

const REFERENCE_PRODUCTS: [(&str, &str, f64); 9] = [
    ("A", "C1", 3.0),
    ("B", "C1", 2.0),
    ("C", "C1", 8.0),
    ("D", "C2", 12.0),
    ("E", "C2", 25.0),
    ("F", "C2", 15.0),
    ("G", "C3", 0.5),
    ("H", "C3", 1.0),
    ("I", "C3", 2.0),
];

const REFERENCE_DISTANCES: [(&str, &str, f64); 6] = [
    ("C1", "L1", 3.0),
    ("C2", "L1", 2.5),
    ("C3", "L1", 2.0),
    ("C1", "C2", 4.0),
    ("C2", "C3", 3.0),
    ("C1", "C3", 7.0),
];

/// The built-in network: three centers relaying through hub `L1`, nine
/// products and the default tariff.
pub fn reference_network() -> Result<DeliveryNetwork, NetworkError> {
    reference_network_builder().build()
}

/// Builder preloaded with the built-in tables, for variations on them.
pub fn reference_network_builder() -> DeliveryNetworkBuilder {
    let mut builder = DeliveryNetwork::builder();
    builder.set_hub(REFERENCE_HUB);

    for center in REFERENCE_CENTERS {
        builder.add_center(center);
    }

    for (product, center, weight) in REFERENCE_PRODUCTS {
        builder.add_product(product, center, weight);
    }

    for (from, to, distance) in REFERENCE_DISTANCES {
        builder.add_distance(from, to, distance);
    }

    builder
}
