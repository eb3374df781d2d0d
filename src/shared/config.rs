use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::domain::round::{DealerPolicy, DuplicatePolicy};

#[derive(Debug, Parser)]
#[command(name = "blackjack-backend", about = "Camera-fed blackjack table tracker")]
pub struct Config {
    /// Address to serve on.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Base URL of the hosted inference endpoint.
    #[arg(long, env = "CLASSIFIER_URL", default_value = "https://serverless.roboflow.com")]
    pub classifier_url: String,

    /// Model identifier on the inference endpoint.
    #[arg(long, env = "CLASSIFIER_MODEL", default_value = "playing-cards-ow27d/4")]
    pub classifier_model: String,

    /// API key for the inference endpoint.
    #[arg(long, env = "CLASSIFIER_API_KEY")]
    pub classifier_api_key: String,

    /// Classifier request timeout in seconds.
    #[arg(long, env = "CLASSIFIER_TIMEOUT_SECS", default_value_t = 10)]
    pub classifier_timeout_secs: u64,

    /// How repeated card detections are rejected.
    #[arg(long, value_enum, default_value = "single-deck")]
    pub duplicate_policy: DuplicatePolicy,

    /// How the dealer hand is completed at settlement.
    #[arg(long, value_enum, default_value = "manual")]
    pub dealer_policy: DealerPolicy,
}

impl Config {
    pub fn classifier_timeout(&self) -> Duration {
        Duration::from_secs(self.classifier_timeout_secs)
    }
}
