use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

pub const CLIENT_BROKER_TLS: &str = "TLS";
pub const CLIENT_BROKER_TLS_PLAINTEXT: &str = "TLS_PLAINTEXT";
pub const CLIENT_BROKER_PLAINTEXT: &str = "PLAINTEXT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Msk {
    pub clusters: Vec<Cluster>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub metadata: Metadata,
    pub encryption_in_transit: EncryptionInTransit,
    pub logging: Logging,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptionInTransit {
    pub metadata: Metadata,
    pub client_broker: StringValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logging {
    pub metadata: Metadata,
    pub broker: BrokerLogging,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerLogging {
    pub metadata: Metadata,
    pub s3: LogSink,
    pub cloudwatch: LogSink,
    pub firehose: LogSink,
}

impl BrokerLogging {
    pub fn any_enabled(&self) -> bool {
        [&self.s3, &self.cloudwatch, &self.firehose]
            .iter()
            .any(|sink| sink.enabled.is_true())
    }
}

/// One of the S3 / CloudWatch / Firehose broker log destinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSink {
    pub metadata: Metadata,
    pub enabled: BoolValue,
}
