use serde::{Deserialize, Serialize};

/// A member pulled out of an imported module, optionally renamed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportMember {
    pub name: String,
    pub alias: String,
}

impl ImportMember {
    pub fn new(name: &str) -> Self {
        Self::aliased(name, name)
    }

    pub fn aliased(name: &str, alias: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: alias.to_string(),
        }
    }

    /// `*` imports the whole module under `alias`.
    pub fn namespace(alias: &str) -> Self {
        Self::aliased("*", alias)
    }
}

/// A declaration hoisted to the top of the output whenever a node type that
/// requires it is used. Deduplicated structurally within one compile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrepareItem {
    Import {
        module: String,
        member: Option<ImportMember>,
        /// Pinned version, appended to skypack CDN sources as `@version`.
        version: Option<String>,
    },
    Function {
        name: String,
        parameters: Vec<String>,
        body: String,
    },
}

impl PrepareItem {
    pub fn import(module: &str, member: Option<ImportMember>) -> Self {
        PrepareItem::Import {
            module: module.to_string(),
            member,
            version: None,
        }
    }

    pub fn versioned_import(module: &str, version: &str, member: Option<ImportMember>) -> Self {
        PrepareItem::Import {
            module: module.to_string(),
            member,
            version: Some(version.to_string()),
        }
    }

    pub fn function(name: &str, parameters: &[&str], body: &str) -> Self {
        PrepareItem::Function {
            name: name.to_string(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            body: body.to_string(),
        }
    }
}
