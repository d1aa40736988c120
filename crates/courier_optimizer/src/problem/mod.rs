pub mod catalog;
pub mod delivery_network;
pub mod distance_matrix;
pub mod location;
pub mod order;
pub mod reference_network;
pub mod tariff;
pub mod weight;
