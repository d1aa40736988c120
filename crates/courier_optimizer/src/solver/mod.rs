pub mod carried_load;
pub mod optimizer;
pub mod quote;
pub mod route;
pub mod route_cost;
pub mod route_generator;
