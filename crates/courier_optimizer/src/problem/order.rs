use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    catalog::ProductId, delivery_network::DeliveryNetwork, location::LocationIdx, weight::Weight,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Product {product} not found.")]
    UnknownProduct { product: ProductId },
    #[error("Order weight is too large, overflowed at product {product}.")]
    WeightOverflow { product: ProductId },
}

/// Requested quantity per product, as sent by a client: `{"A": 1, "D": 2}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Order(BTreeMap<ProductId, u32>);

impl Order {
    pub fn new() -> Self {
        Order::default()
    }

    pub fn with_item(mut self, product: impl Into<ProductId>, quantity: u32) -> Self {
        self.insert(product, quantity);
        self
    }

    /// Sets the quantity of a product, replacing any previous value.
    pub fn insert(&mut self, product: impl Into<ProductId>, quantity: u32) {
        self.0.insert(product.into(), quantity);
    }

    pub fn quantity(&self, product: &str) -> Option<u32> {
        self.0.get(product).copied()
    }

    /// Items in product identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0
            .iter()
            .map(|(product, quantity)| (product.as_str(), *quantity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<P: Into<ProductId>> FromIterator<(P, u32)> for Order {
    fn from_iter<T: IntoIterator<Item = (P, u32)>>(iter: T) -> Self {
        Order(
            iter.into_iter()
                .map(|(product, quantity)| (product.into(), quantity))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    product: ProductId,
    weight: Weight,
}

impl OrderLine {
    /// `None` when the line weight is not representable.
    pub fn new(product: impl Into<ProductId>, quantity: u32, unit_weight: Weight) -> Option<Self> {
        Some(OrderLine {
            product: product.into(),
            weight: unit_weight.checked_mul(quantity)?,
        })
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    /// Weight of every unit of the line together.
    pub fn weight(&self) -> Weight {
        self.weight
    }
}

/// An order split by the center each line ships from.
///
/// Every location of the network has a slot, so lookups never miss; only
/// centers ever receive lines.
#[derive(Debug, Clone)]
pub struct GroupedOrder {
    lines: Vec<Vec<OrderLine>>,
}

impl GroupedOrder {
    /// Validates every product against the catalog and groups the lines by
    /// origin center.
    ///
    /// Products are checked in identifier order, so the first unknown one in
    /// that order is reported. Lines with a zero quantity are checked but not
    /// kept. The whole order must weigh a representable amount, so no load
    /// built from it can overflow.
    pub fn from_order(order: &Order, network: &DeliveryNetwork) -> Result<Self, ValidationError> {
        let mut lines = vec![Vec::new(); network.num_locations()];
        let mut total = Weight::ZERO;

        for (product, quantity) in order.iter() {
            let entry = network.catalog().get(product).ok_or_else(|| {
                ValidationError::UnknownProduct {
                    product: product.to_owned(),
                }
            })?;

            if quantity == 0 {
                continue;
            }

            let overflow = || ValidationError::WeightOverflow {
                product: product.to_owned(),
            };
            let line =
                OrderLine::new(product, quantity, entry.unit_weight()).ok_or_else(overflow)?;
            total = total.checked_add(line.weight()).ok_or_else(overflow)?;

            lines[entry.center().get()].push(line);
        }

        Ok(GroupedOrder { lines })
    }

    pub fn lines(&self, center: LocationIdx) -> &[OrderLine] {
        self.lines
            .get(center.get())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Centers with at least one line, in ascending index order.
    pub fn active_centers(&self) -> Vec<LocationIdx> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, lines)| !lines.is_empty())
            .map(|(index, _)| LocationIdx::new(index))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn test_order_deserializes_from_plain_map() {
        let order: Order = serde_json::from_str(r#"{"D": 2, "A": 1}"#).unwrap();

        assert_eq!(order.len(), 2);
        assert_eq!(order.quantity("D"), Some(2));
        assert_eq!(
            order.iter().collect::<Vec<_>>(),
            vec![("A", 1), ("D", 2)]
        );
        assert!(serde_json::from_str::<Order>(r#"{"A": -1}"#).is_err());
    }

    #[test]
    fn test_group_by_center() {
        let network = test_utils::reference_network();
        let order = Order::new()
            .with_item("A", 1)
            .with_item("C", 2)
            .with_item("G", 3);

        let grouped = GroupedOrder::from_order(&order, &network).unwrap();
        let c1 = network.location_idx("C1").unwrap();
        let c3 = network.location_idx("C3").unwrap();

        assert_eq!(grouped.active_centers(), vec![c1, c3]);
        assert_eq!(grouped.lines(c1).len(), 2);
        assert_eq!(grouped.lines(c1)[1].product(), "C");
        assert_eq!(grouped.lines(c1)[1].weight(), Weight::from_whole_units(16));
        assert_eq!(grouped.lines(c3)[0].weight(), Weight::from_units(1.5).unwrap());
        assert!(grouped.lines(network.hub()).is_empty());
    }

    #[test]
    fn test_unknown_product_is_reported() {
        let network = test_utils::reference_network();
        let order: Order = [("Z", 1), ("A", 1), ("Y", 0)].into_iter().collect();

        let error = GroupedOrder::from_order(&order, &network).unwrap_err();
        assert_eq!(
            error,
            ValidationError::UnknownProduct {
                product: "Y".to_owned()
            }
        );
        assert_eq!(error.to_string(), "Product Y not found.");
    }

    #[test]
    fn test_overweight_order_is_rejected() {
        let mut builder = DeliveryNetwork::builder();
        builder
            .set_hub("H")
            .add_center("C")
            .add_product("ingot", "C", 1e12)
            .add_product("slab", "C", 1e12)
            .add_distance("C", "H", 1.0);
        let network = builder.build().unwrap();

        let order = Order::new().with_item("ingot", u32::MAX);
        assert_eq!(
            GroupedOrder::from_order(&order, &network).unwrap_err(),
            ValidationError::WeightOverflow {
                product: "ingot".to_owned()
            }
        );

        // Each line fits on its own, together they do not.
        let order = Order::new()
            .with_item("ingot", 10)
            .with_item("slab", 10);
        assert_eq!(
            GroupedOrder::from_order(&order, &network).unwrap_err(),
            ValidationError::WeightOverflow {
                product: "slab".to_owned()
            }
        );

        let order = Order::new().with_item("ingot", 1).with_item("slab", 1);
        assert!(GroupedOrder::from_order(&order, &network).is_ok());
    }

    #[test]
    fn test_zero_quantities_are_ignored() {
        let network = test_utils::reference_network();
        let order = Order::new().with_item("A", 0).with_item("D", 0);

        let grouped = GroupedOrder::from_order(&order, &network).unwrap();
        assert!(grouped.is_empty());
        assert!(grouped.active_centers().is_empty());
    }
}
