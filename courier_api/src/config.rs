use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use courier_optimizer::{
    json::types::JsonDeliveryNetwork,
    problem::{delivery_network::DeliveryNetwork, reference_network::reference_network},
    solver::optimizer::{DEFAULT_MAX_CENTERS, OptimizerParams, Threads},
};
use tracing::info;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub bind_address: SocketAddr,
    /// Network document loaded at start-up, the built-in network when unset.
    pub network: Option<PathBuf>,
    pub max_centers: usize,
    pub threads: Threads,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_address: SocketAddr = lookup("COURIER_BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned())
            .parse()
            .context("COURIER_BIND_ADDRESS is not a socket address")?;

        let max_centers: usize = match lookup("COURIER_MAX_CENTERS") {
            Some(value) => value
                .parse()
                .context("COURIER_MAX_CENTERS is not a number")?,
            None => DEFAULT_MAX_CENTERS,
        };

        let threads: Threads = match lookup("COURIER_THREADS") {
            Some(value) => value.parse().context("COURIER_THREADS is invalid")?,
            None => Threads::Single,
        };

        Ok(ApiConfig {
            bind_address,
            network: lookup("COURIER_NETWORK").map(PathBuf::from),
            max_centers,
            threads,
        })
    }

    pub fn optimizer_params(&self) -> OptimizerParams {
        OptimizerParams {
            max_centers: self.max_centers,
            threads: self.threads.clone(),
        }
    }

    pub fn load_network(&self) -> anyhow::Result<DeliveryNetwork> {
        match &self.network {
            Some(path) => {
                info!(path = %path.display(), "Loading network");
                JsonDeliveryNetwork::load_file(path)
            }
            None => Ok(reference_network()?),
        }
    }
}
