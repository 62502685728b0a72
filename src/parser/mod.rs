//! Loader for pre-resolved configuration graphs.
//!
//! The configuration language itself is parsed and evaluated elsewhere. This
//! module only reads the exported block graph, as JSON, in one of three
//! shapes:
//!
//! - `{"modules": [{"path": "root", "blocks": [...]}, ...]}`
//! - a single module: `{"path": "module.vpc", "blocks": [...]}`
//! - a bare array of blocks, taken as the root module.

use std::path::Path;

use serde::Deserialize;

use crate::block::{Block, Module};
use crate::error::{Result, ShieldError};

const MAX_FILE_BYTES: u64 = 32 * 1_048_576;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModule {
    #[serde(default)]
    path: String,
    blocks: Vec<Block>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Graph { modules: Vec<RawModule> },
    Module(RawModule),
    Blocks(Vec<Block>),
}

impl RawModule {
    fn into_module(self) -> Module {
        let path = if self.path.is_empty() {
            "root".to_string()
        } else {
            self.path
        };
        Module::new(path, self.blocks)
    }
}

/// Parse one exported document.
pub fn parse_str(content: &str, file: &str) -> Result<Vec<Module>> {
    let document: Document = serde_json::from_str(content).map_err(|e| ShieldError::Parse {
        file: file.to_string(),
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })?;
    let modules = match document {
        Document::Graph { modules } => modules.into_iter().map(RawModule::into_module).collect(),
        Document::Module(raw) => vec![raw.into_module()],
        Document::Blocks(blocks) => vec![Module::root(blocks)],
    };
    Ok(modules)
}

/// Load modules from a JSON file, or from every `.json` file under a
/// directory. Directory entries that fail to parse are skipped with a
/// warning; a file given directly must parse.
pub fn load(path: &Path) -> Result<Vec<Module>> {
    let modules = if path.is_file() {
        let content = std::fs::read_to_string(path)?;
        parse_str(&content, &path.display().to_string())?
    } else {
        load_dir(path)?
    };

    if modules.is_empty() {
        return Err(ShieldError::NoModules(path.display().to_string()));
    }
    tracing::debug!(path = %path.display(), modules = modules.len(), "configuration loaded");
    Ok(modules)
}

fn load_dir(root: &Path) -> Result<Vec<Module>> {
    if !root.is_dir() {
        return Err(ShieldError::NoModules(root.display().to_string()));
    }

    let walker = ignore::WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .max_depth(Some(8))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut modules = Vec::new();
    for entry in walker.flatten() {
        let file = entry.path();
        if !file.is_file() || file.extension().map_or(true, |ext| ext != "json") {
            continue;
        }
        if std::fs::metadata(file)?.len() > MAX_FILE_BYTES {
            tracing::warn!(file = %file.display(), "file too large, skipping");
            continue;
        }

        let content = std::fs::read_to_string(file)?;
        match parse_str(&content, &file.display().to_string()) {
            Ok(parsed) => modules.extend(parsed),
            Err(e) => tracing::warn!(error = %e, "not a configuration graph, skipping"),
        }
    }
    Ok(modules)
}
