use crate::providers::aws::msk::{CLIENT_BROKER_PLAINTEXT, CLIENT_BROKER_TLS_PLAINTEXT};
use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-AWS-0073: client/broker traffic must be TLS only.
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-AWS-0073",
        provider: Provider::Aws,
        service: "msk",
        short_code: "enable-in-transit-encryption",
        summary: "A MSK cluster allows unencrypted data in transit.",
        impact: "Intercepted data can be read in transit",
        resolution: "Enable in transit encryption",
        explanation: "Encryption should be forced for Kafka clusters, including for \
                      communication between nodes. This ensure sensitive data is kept private.",
        links: &["https://docs.aws.amazon.com/msk/latest/developerguide/msk-encryption.html"],
        severity: Severity::High,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for cluster in &state.aws.msk.clusters {
        if cluster.metadata.is_unmanaged() {
            continue;
        }
        let client_broker = &cluster.encryption_in_transit.client_broker;
        if client_broker.is_one_of(&[CLIENT_BROKER_PLAINTEXT, CLIENT_BROKER_TLS_PLAINTEXT]) {
            results.add("Cluster allows plaintext communication.", client_broker);
        } else {
            results.add_passed(&cluster.metadata);
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::adapt;
    use crate::block::{Block, Module};

    fn cluster(in_transit: Option<Block>) -> State {
        let mut resource = Block::resource("aws_msk_cluster", "c");
        if let Some(block) = in_transit {
            resource = resource.with_block(Block::nested("encryption_info").with_block(block));
        }
        adapt(&[Module::root(vec![resource])])
    }

    #[test]
    fn missing_encryption_info_fails() {
        let results = CHECK.run(&cluster(None));
        assert_eq!(results.failed().count(), 1);
        assert!(results.failed().next().unwrap().metadata.is_default());
    }

    #[test]
    fn plaintext_fails() {
        let state = cluster(Some(
            Block::nested("encryption_in_transit").with_attribute("client_broker", "PLAINTEXT"),
        ));
        assert_eq!(CHECK.run(&state).failed().count(), 1);
    }

    #[test]
    fn tls_passes() {
        let explicit = cluster(Some(
            Block::nested("encryption_in_transit").with_attribute("client_broker", "TLS"),
        ));
        assert_eq!(CHECK.run(&explicit).passed().count(), 1);
    }

    #[test]
    fn in_transit_block_without_client_broker_fails() {
        let state = cluster(Some(
            Block::nested("encryption_in_transit").with_attribute("in_cluster", true),
        ));
        let results = CHECK.run(&state);
        assert_eq!(results.failed().count(), 1);
        assert!(results.failed().next().unwrap().metadata.is_default());
    }
}
