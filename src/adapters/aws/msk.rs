use crate::adapters::{AdaptFn, Adapted};
use crate::block::{AttrValue, Block, BlockRef};
use crate::providers::aws::msk::{
    BrokerLogging, Cluster, EncryptionInTransit, LogSink, Logging, CLIENT_BROKER_TLS,
    CLIENT_BROKER_TLS_PLAINTEXT,
};
use crate::types::StringValue;

pub(crate) const ADAPTERS: &[(&str, AdaptFn)] = &[("aws_msk_cluster", cluster)];

fn cluster(block: &Block) -> Adapted {
    Adapted::MskCluster(adapt_cluster(block.view()))
}

/// `aws_msk_cluster`.
///
/// Client/broker encryption is `TLS_PLAINTEXT` unless `client_broker` is
/// set and non-null; a value that cannot be read as a string falls back to `TLS`. Every
/// broker log sink is disabled unless enabled explicitly.
pub fn adapt_cluster(resource: BlockRef<'_>) -> Cluster {
    let in_transit = resource
        .get_block("encryption_info")
        .get_block("encryption_in_transit");
    let attr = in_transit.get_attribute("client_broker");
    let client_broker = if attr.value().map_or(true, |v| *v == AttrValue::Null) {
        StringValue::new_default(CLIENT_BROKER_TLS_PLAINTEXT.into(), &in_transit.metadata())
    } else {
        attr.as_string_or_default(CLIENT_BROKER_TLS, in_transit)
    };

    let logging = resource.get_block("logging_info");
    let broker = logging.get_block("broker_logs");

    Cluster {
        metadata: resource.metadata(),
        encryption_in_transit: EncryptionInTransit {
            metadata: in_transit.metadata(),
            client_broker,
        },
        logging: Logging {
            metadata: logging.metadata(),
            broker: BrokerLogging {
                metadata: broker.metadata(),
                s3: adapt_sink(broker, "s3"),
                cloudwatch: adapt_sink(broker, "cloudwatch_logs"),
                firehose: adapt_sink(broker, "firehose"),
            },
        },
    }
}

fn adapt_sink(broker: BlockRef<'_>, name: &str) -> LogSink {
    let sink = broker.get_block(name);
    LogSink {
        metadata: sink.metadata(),
        enabled: sink.get_attribute("enabled").as_bool_or_default(false, sink),
    }
}
