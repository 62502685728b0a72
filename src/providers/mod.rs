//! Typed, provider-organized model of the scanned infrastructure.
//!
//! Adapters produce a `State`. Rules consume a `State`. Nothing else flows
//! between the two halves of the pipeline.

pub mod aws;
pub mod azure;
pub mod github;
pub mod google;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Cloud or SaaS provider a rule or entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Azure,
    Google,
    GitHub,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aws => write!(f, "aws"),
            Self::Azure => write!(f, "azure"),
            Self::Google => write!(f, "google"),
            Self::GitHub => write!(f, "github"),
        }
    }
}

/// Everything one scan knows about. Built once, then only read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub aws: aws::Aws,
    pub azure: azure::Azure,
    pub google: google::Google,
    pub github: github::GitHub,
}

impl State {
    /// Top-level entity count per provider and service.
    pub fn entity_counts(&self) -> BTreeMap<Provider, BTreeMap<&'static str, usize>> {
        let mut counts = BTreeMap::new();
        counts.insert(
            Provider::Aws,
            BTreeMap::from([
                ("api-gateway", self.aws.apigateway.apis.len()),
                ("msk", self.aws.msk.clusters.len()),
                (
                    "vpc",
                    self.aws.vpc.network_acls.len() + self.aws.vpc.security_groups.len(),
                ),
            ]),
        );
        counts.insert(
            Provider::Azure,
            BTreeMap::from([
                ("appservice", self.azure.appservice.function_apps.len()),
                ("monitor", self.azure.monitor.log_profiles.len()),
                ("storage", self.azure.storage.accounts.len()),
            ]),
        );
        counts.insert(
            Provider::Google,
            BTreeMap::from([("gke", self.google.gke.clusters.len())]),
        );
        counts.insert(
            Provider::GitHub,
            BTreeMap::from([("repositories", self.github.repositories.len())]),
        );
        counts
    }

    pub fn total_entities(&self) -> usize {
        self.entity_counts()
            .values()
            .flat_map(|services| services.values())
            .sum()
    }

    /// Merge another state in, keeping encounter order.
    pub fn extend(&mut self, other: State) {
        self.aws.apigateway.apis.extend(other.aws.apigateway.apis);
        self.aws.msk.clusters.extend(other.aws.msk.clusters);
        self.aws.vpc.network_acls.extend(other.aws.vpc.network_acls);
        self.aws
            .vpc
            .security_groups
            .extend(other.aws.vpc.security_groups);
        self.azure
            .appservice
            .function_apps
            .extend(other.azure.appservice.function_apps);
        self.azure
            .monitor
            .log_profiles
            .extend(other.azure.monitor.log_profiles);
        self.azure.storage.accounts.extend(other.azure.storage.accounts);
        self.google.gke.clusters.extend(other.google.gke.clusters);
        self.github.repositories.extend(other.github.repositories);
    }
}
