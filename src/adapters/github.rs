use crate::adapters::{AdaptFn, Adapted};
use crate::block::{Block, BlockRef};
use crate::providers::github::Repository;
use crate::types::BoolValue;

pub(crate) const ADAPTERS: &[(&str, AdaptFn)] = &[("github_repository", repository)];

fn repository(block: &Block) -> Adapted {
    Adapted::Repository(adapt_repository(block.view()))
}

/// `github_repository`. `visibility` wins over the older `private` flag;
/// with neither set the repository is public.
pub fn adapt_repository(resource: BlockRef<'_>) -> Repository {
    let visibility = resource
        .get_attribute("visibility")
        .as_string_or_default("", resource);
    let public = if visibility.is_explicit() {
        BoolValue::new(visibility.equal_to("public"), visibility.metadata().clone())
    } else {
        let private = resource
            .get_attribute("private")
            .as_bool_or_default(false, resource);
        BoolValue::new(private.is_false(), private.metadata().clone())
    };

    Repository {
        metadata: resource.metadata(),
        name: resource.get_attribute("name").as_string_or_default("", resource),
        public,
        vulnerability_alerts: resource
            .get_attribute("vulnerability_alerts")
            .as_bool_or_default(false, resource),
    }
}
