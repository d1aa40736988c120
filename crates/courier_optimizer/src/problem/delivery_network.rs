use fxhash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::utils::enumerate_idx::EnumerateIdx;

use super::{
    catalog::{Catalog, CatalogEntry, ProductId},
    distance_matrix::{Distance, DistanceError, DistanceMatrix},
    location::{Location, LocationIdx},
    tariff::TariffSchedule,
    weight::Weight,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("network has no hub")]
    MissingHub,
    #[error("location {location} is declared more than once")]
    DuplicateLocation { location: String },
    #[error("unknown location {location}")]
    UnknownLocation { location: String },
    #[error("product {product} ships from {location}, which is not a center")]
    NotACenter { product: String, location: String },
    #[error("product {product} is declared more than once")]
    DuplicateProduct { product: String },
    #[error("product {product} has invalid weight {weight}")]
    InvalidWeight { product: String, weight: f64 },
    #[error("invalid distance {distance} between {from} and {to}")]
    InvalidDistance {
        from: String,
        to: String,
        distance: Distance,
    },
    #[error("conflicting distances between {from} and {to}: {first} and {second}")]
    ConflictingDistance {
        from: String,
        to: String,
        first: Distance,
        second: Distance,
    },
    #[error("invalid tariff: {0}")]
    InvalidTariff(String),
}

/// Locations, catalog, distances and tariff an order is priced against.
///
/// Centers are indexed first, in declaration order, and the hub takes the
/// last index. Nothing can be changed once built.
#[derive(Debug, Clone)]
pub struct DeliveryNetwork {
    locations: Vec<Location>,
    location_ids: FxHashMap<String, LocationIdx>,
    hub: LocationIdx,
    catalog: Catalog,
    distances: DistanceMatrix,
    tariff: TariffSchedule,
}

impl DeliveryNetwork {
    pub fn builder() -> DeliveryNetworkBuilder {
        DeliveryNetworkBuilder::default()
    }

    pub fn location(&self, index: LocationIdx) -> &Location {
        &self.locations[index]
    }

    pub fn location_idx(&self, external_id: &str) -> Option<LocationIdx> {
        self.location_ids.get(external_id).copied()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    pub fn hub(&self) -> LocationIdx {
        self.hub
    }

    pub fn is_hub(&self, location: LocationIdx) -> bool {
        location == self.hub
    }

    /// Center indices in ascending order.
    pub fn centers(&self) -> impl Iterator<Item = LocationIdx> + '_ {
        self.locations
            .iter()
            .enumerate_idx()
            .filter_map(|(index, location): (LocationIdx, &Location)| {
                location.is_center().then_some(index)
            })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    #[inline(always)]
    pub fn distance(&self, from: LocationIdx, to: LocationIdx) -> Option<Distance> {
        self.distances.distance(from, to)
    }

    pub fn tariff(&self) -> &TariffSchedule {
        &self.tariff
    }
}

struct ProductInput {
    id: ProductId,
    center: String,
    weight: f64,
}

struct DistanceInput {
    from: String,
    to: String,
    distance: Distance,
}

#[derive(Default)]
pub struct DeliveryNetworkBuilder {
    hub: Option<String>,
    centers: Vec<String>,
    products: Vec<ProductInput>,
    distances: Vec<DistanceInput>,
    tariff: Option<TariffSchedule>,
}

impl DeliveryNetworkBuilder {
    pub fn set_hub(&mut self, hub: impl Into<String>) -> &mut DeliveryNetworkBuilder {
        self.hub = Some(hub.into());
        self
    }

    pub fn add_center(&mut self, center: impl Into<String>) -> &mut DeliveryNetworkBuilder {
        self.centers.push(center.into());
        self
    }

    /// Registers a product shipping from `center`, `weight` is the weight of
    /// a single unit.
    pub fn add_product(
        &mut self,
        id: impl Into<ProductId>,
        center: impl Into<String>,
        weight: f64,
    ) -> &mut DeliveryNetworkBuilder {
        self.products.push(ProductInput {
            id: id.into(),
            center: center.into(),
            weight,
        });
        self
    }

    /// Registers an undirected distance, the reverse direction is implied.
    pub fn add_distance(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        distance: Distance,
    ) -> &mut DeliveryNetworkBuilder {
        self.distances.push(DistanceInput {
            from: from.into(),
            to: to.into(),
            distance,
        });
        self
    }

    pub fn set_tariff(&mut self, tariff: TariffSchedule) -> &mut DeliveryNetworkBuilder {
        self.tariff = Some(tariff);
        self
    }

    pub fn build(self) -> Result<DeliveryNetwork, NetworkError> {
        let hub_id = self.hub.ok_or(NetworkError::MissingHub)?;

        let mut locations = self
            .centers
            .into_iter()
            .map(Location::center)
            .collect::<Vec<_>>();
        locations.push(Location::hub(hub_id));

        let mut location_ids: FxHashMap<String, LocationIdx> = FxHashMap::default();
        for (index, location) in locations.iter().enumerate_idx() {
            if location_ids
                .insert(location.external_id().to_owned(), index)
                .is_some()
            {
                return Err(NetworkError::DuplicateLocation {
                    location: location.external_id().to_owned(),
                });
            }
        }

        let hub = LocationIdx::new(locations.len() - 1);
        let resolve = |external_id: &str| {
            location_ids
                .get(external_id)
                .copied()
                .ok_or_else(|| NetworkError::UnknownLocation {
                    location: external_id.to_owned(),
                })
        };

        let mut catalog = Catalog::default();
        for product in self.products {
            let center = resolve(&product.center)?;
            if !locations[center].is_center() {
                return Err(NetworkError::NotACenter {
                    product: product.id,
                    location: product.center,
                });
            }

            let unit_weight = Weight::from_units(product.weight)
                .filter(|weight| !weight.is_zero())
                .ok_or_else(|| NetworkError::InvalidWeight {
                    product: product.id.clone(),
                    weight: product.weight,
                })?;

            let id = product.id.clone();
            if catalog
                .insert(product.id, CatalogEntry::new(center, unit_weight))
                .is_some()
            {
                return Err(NetworkError::DuplicateProduct { product: id });
            }
        }

        let mut distances = DistanceMatrix::new(locations.len());
        for input in self.distances {
            let from = resolve(&input.from)?;
            let to = resolve(&input.to)?;

            distances
                .insert(from, to, input.distance)
                .map_err(|error| match error {
                    DistanceError::Conflicting { existing } => NetworkError::ConflictingDistance {
                        from: input.from,
                        to: input.to,
                        first: existing,
                        second: input.distance,
                    },
                    DistanceError::Invalid | DistanceError::OutOfRange => {
                        NetworkError::InvalidDistance {
                            from: input.from,
                            to: input.to,
                            distance: input.distance,
                        }
                    }
                })?;
        }

        debug!(
            locations = locations.len(),
            products = catalog.len(),
            "Built delivery network"
        );

        Ok(DeliveryNetwork {
            locations,
            location_ids,
            hub,
            catalog,
            distances,
            tariff: self.tariff.unwrap_or_default(),
        })
    }
}
