use crate::adapters::{AdaptFn, Adapted};
use crate::block::{Block, BlockRef};
use crate::providers::azure::appservice::{Authentication, FunctionApp};

pub(crate) const ADAPTERS: &[(&str, AdaptFn)] = &[
    ("azurerm_function_app", function_app),
    ("azurerm_linux_function_app", function_app),
    ("azurerm_windows_function_app", function_app),
];

fn function_app(block: &Block) -> Adapted {
    Adapted::FunctionApp(adapt_function_app(block.view()))
}

/// Any of the function app resource kinds. Authentication and HTTPS-only
/// are off unless set.
pub fn adapt_function_app(resource: BlockRef<'_>) -> FunctionApp {
    let auth = resource.get_block("auth_settings");
    FunctionApp {
        metadata: resource.metadata(),
        name: resource.get_attribute("name").as_string_or_default("", resource),
        https_only: resource
            .get_attribute("https_only")
            .as_bool_or_default(false, resource),
        authentication: Authentication {
            metadata: auth.metadata(),
            enabled: auth.get_attribute("enabled").as_bool_or_default(false, auth),
        },
    }
}
