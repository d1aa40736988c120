use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    problem::{
        delivery_network::{DeliveryNetwork, NetworkError},
        distance_matrix::{Cost, Distance},
        tariff::{self, TariffSchedule},
        weight::Weight,
    },
    solver::{quote::Quote, route_cost::LegCost},
};

pub trait FromNetwork<T> {
    fn from_network(value: T, network: &DeliveryNetwork) -> Self;
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "DeliveryNetwork")]
pub struct JsonDeliveryNetwork {
    /// Identifier of the location every delivery relays through.
    pub hub: String,
    pub centers: Vec<String>,
    pub products: Vec<JsonProduct>,
    /// Undirected, each pair listed once.
    pub distances: Vec<JsonDistance>,
    pub tariff: Option<JsonTariff>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Product")]
pub struct JsonProduct {
    pub id: String,
    pub center: String,
    /// Weight of a single unit.
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Distance")]
pub struct JsonDistance {
    pub from: String,
    pub to: String,
    pub distance: Distance,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Tariff")]
pub struct JsonTariff {
    pub allowance: Option<f64>,
    pub base_rate: Option<Cost>,
    pub tier_size: Option<f64>,
    pub tier_increment: Option<Cost>,
    pub charge_empty_legs: Option<bool>,
}

impl TryFrom<JsonTariff> for TariffSchedule {
    type Error = NetworkError;

    fn try_from(value: JsonTariff) -> Result<Self, Self::Error> {
        let weight = |name: &str, units: Option<f64>, default: Weight| match units {
            None => Ok(default),
            Some(units) => Weight::from_units(units).ok_or_else(|| {
                NetworkError::InvalidTariff(format!("{name} must be a non-negative number"))
            }),
        };

        let schedule = TariffSchedule::new(
            weight("allowance", value.allowance, tariff::DEFAULT_ALLOWANCE)?,
            value.base_rate.unwrap_or(tariff::DEFAULT_BASE_RATE),
            weight("tier size", value.tier_size, tariff::DEFAULT_TIER_SIZE)?,
            value.tier_increment.unwrap_or(tariff::DEFAULT_TIER_INCREMENT),
        )?;

        Ok(schedule.with_empty_legs_charged(value.charge_empty_legs.unwrap_or(true)))
    }
}

impl FromNetwork<&TariffSchedule> for JsonTariff {
    fn from_network(value: &TariffSchedule, _network: &DeliveryNetwork) -> Self {
        JsonTariff {
            allowance: Some(value.allowance().value()),
            base_rate: Some(value.base_rate()),
            tier_size: Some(value.tier_size().value()),
            tier_increment: Some(value.tier_increment()),
            charge_empty_legs: Some(value.charges_empty_legs()),
        }
    }
}

impl JsonDeliveryNetwork {
    #[instrument(skip_all, level = "debug")]
    pub fn build_network(self) -> Result<DeliveryNetwork, NetworkError> {
        let mut builder = DeliveryNetwork::builder();
        builder.set_hub(self.hub);

        for center in self.centers {
            builder.add_center(center);
        }

        for product in self.products {
            builder.add_product(product.id, product.center, product.weight);
        }

        for distance in self.distances {
            builder.add_distance(distance.from, distance.to, distance.distance);
        }

        if let Some(tariff) = self.tariff {
            builder.set_tariff(tariff.try_into()?);
        }

        builder.build()
    }

    pub fn load_file(path: impl AsRef<Path>) -> anyhow::Result<DeliveryNetwork> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open network file {}", path.display()))?;

        let json: JsonDeliveryNetwork = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse network file {}", path.display()))?;

        json.build_network()
            .with_context(|| format!("invalid network in {}", path.display()))
    }
}

impl FromNetwork<&DeliveryNetwork> for JsonDeliveryNetwork {
    fn from_network(value: &DeliveryNetwork, network: &DeliveryNetwork) -> Self {
        let name = |index| network.location(index).external_id().to_owned();

        JsonDeliveryNetwork {
            hub: name(value.hub()),
            centers: value.centers().map(name).collect(),
            products: value
                .catalog()
                .iter()
                .map(|(id, entry)| JsonProduct {
                    id: id.to_owned(),
                    center: name(entry.center()),
                    weight: entry.unit_weight().value(),
                })
                .collect(),
            distances: value
                .distances()
                .pairs()
                .map(|(from, to, distance)| JsonDistance {
                    from: name(from),
                    to: name(to),
                    distance,
                })
                .collect(),
            tariff: Some(JsonTariff::from_network(value.tariff(), network)),
        }
    }
}

impl From<&DeliveryNetwork> for JsonDeliveryNetwork {
    fn from(network: &DeliveryNetwork) -> Self {
        JsonDeliveryNetwork::from_network(network, network)
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename = "Quote")]
pub struct JsonQuote {
    pub minimum_cost: Cost,
    /// Location identifiers in visiting order, empty when there was nothing
    /// to deliver.
    pub route: Vec<String>,
    pub routes_evaluated: usize,
    pub legs: Vec<JsonLeg>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename = "Leg")]
pub struct JsonLeg {
    pub from: String,
    pub to: String,
    pub distance: Distance,
    pub carried_weight: f64,
    pub rate: Cost,
    pub cost: Cost,
}

impl FromNetwork<&LegCost> for JsonLeg {
    fn from_network(value: &LegCost, network: &DeliveryNetwork) -> Self {
        JsonLeg {
            from: network.location(value.from).external_id().to_owned(),
            to: network.location(value.to).external_id().to_owned(),
            distance: value.distance,
            carried_weight: value.carried_weight.value(),
            rate: value.rate,
            cost: value.cost,
        }
    }
}

impl FromNetwork<&Quote> for JsonQuote {
    fn from_network(value: &Quote, network: &DeliveryNetwork) -> Self {
        JsonQuote {
            minimum_cost: value.cost(),
            route: value
                .route()
                .map(|route| route.external_ids(network))
                .unwrap_or_default(),
            routes_evaluated: value.routes_evaluated(),
            legs: value
                .legs()
                .iter()
                .map(|leg| JsonLeg::from_network(leg, network))
                .collect(),
        }
    }
}
