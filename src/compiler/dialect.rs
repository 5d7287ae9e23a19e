use super::prepare::PrepareList;
use super::text::indent_block;
use crate::definition::{ImportMember, PrepareItem};
use crate::graph::{Variable, VariableType};
use crate::value::Value;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub const SKYPACK_CDN: &str = "https://cdn.skypack.dev/";
pub const DEFAULT_NAMESPACE: &str = "my_mod";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
    #[default]
    EsModule,
    CommonJs,
}

/// What kind of HOI4 script file is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptType {
    #[default]
    Event,
    Decision,
    NationalFocus,
    Idea,
}

impl ScriptType {
    pub fn as_str(self) -> &'static str {
        match self {
            ScriptType::Event => "event",
            ScriptType::Decision => "decision",
            ScriptType::NationalFocus => "national_focus",
            ScriptType::Idea => "idea",
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// The target language of a compile, with its per-target settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Dialect {
    #[serde(rename = "javascript")]
    JavaScript {
        #[serde(default)]
        module_type: ModuleType,
        #[serde(default)]
        use_skypack: bool,
    },
    Hoi4 {
        #[serde(default = "default_namespace")]
        namespace: String,
        #[serde(default)]
        script_type: ScriptType,
    },
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::JavaScript {
            module_type: ModuleType::EsModule,
            use_skypack: false,
        }
    }
}

impl Dialect {
    pub fn hoi4() -> Self {
        Dialect::Hoi4 {
            namespace: default_namespace(),
            script_type: ScriptType::Event,
        }
    }

    pub fn indent_width(&self) -> usize {
        match self {
            Dialect::JavaScript { .. } => 2,
            Dialect::Hoi4 { .. } => 4,
        }
    }

    /// A single-line comment, newline included.
    pub fn comment(&self, text: &str) -> String {
        match self {
            Dialect::JavaScript { .. } => format!("// {}\n", text),
            Dialect::Hoi4 { .. } => format!("# {}\n", text),
        }
    }

    /// Renders a literal in the target's syntax.
    pub fn render_literal(&self, value: &Value) -> String {
        match self {
            Dialect::JavaScript { .. } => match value {
                Value::Unset => "undefined".to_string(),
                other => serde_json::Value::from(other.clone()).to_string(),
            },
            Dialect::Hoi4 { .. } => render_hoi4_literal(value),
        }
    }

    /// The declarations for every variable, in table order, followed by a
    /// blank line. Empty when there are no variables.
    pub fn variable_section(&self, variables: &[Variable]) -> String {
        if variables.is_empty() {
            return String::new();
        }

        let lines: Vec<String> = match self {
            Dialect::JavaScript { .. } => variables
                .iter()
                .map(|v| {
                    if v.default_value.is_unset() {
                        format!("let {};", v.name)
                    } else {
                        format!("let {} = {};", v.name, self.render_literal(&v.default_value))
                    }
                })
                .collect(),
            Dialect::Hoi4 { .. } => std::iter::once("# Variable Definitions".to_string())
                .chain(variables.iter().map(|v| {
                    if v.default_value.is_unset() {
                        format!("# {} = undefined", v.name)
                    } else if v.var_type == VariableType::Number {
                        format!(
                            "set_variable = {{ var = {} value = {} }}",
                            v.name, v.default_value
                        )
                    } else {
                        format!("# {} = {}", v.name, v.default_value)
                    }
                }))
                .collect(),
        };

        format!("{}\n\n", lines.join("\n"))
    }

    /// Everything placed before the variable section: hoisted declarations
    /// and any boilerplate the target needs.
    pub fn prelude(&self, prepares: &PrepareList) -> String {
        match self {
            Dialect::JavaScript {
                module_type,
                use_skypack,
            } => javascript_prelude(prepares, *module_type, *use_skypack),
            Dialect::Hoi4 {
                namespace,
                script_type,
            } => hoi4_prelude(prepares, namespace, *script_type),
        }
    }
}

fn render_hoi4_literal(value: &Value) -> String {
    match value {
        Value::Unset => "\"\"".to_string(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::Number(_) => value.to_string(),
        Value::Text(s) => format!("\"{}\"", s.replace('"', "\\\"")),
        Value::Array(items) if items.is_empty() => "{ }".to_string(),
        Value::Array(items) => format!("{{ {} }}", items.iter().map(render_hoi4_literal).join(" ")),
        Value::Object(map) if map.is_empty() => "{ }".to_string(),
        Value::Object(map) => format!(
            "{{ {} }}",
            map.iter()
                .map(|(k, v)| format!("{} = {}", k, render_hoi4_literal(v)))
                .join(" ")
        ),
    }
}

/// Imports of one module, members deduplicated.
struct ImportGroup<'p> {
    module: &'p str,
    /// The first version any import of the module asked for.
    version: Option<&'p str>,
    members: Vec<&'p ImportMember>,
}

/// Imports grouped per module in first-seen order.
fn group_imports(prepares: &PrepareList) -> Vec<ImportGroup<'_>> {
    let mut groups: Vec<ImportGroup<'_>> = Vec::new();
    for item in prepares.iter() {
        let PrepareItem::Import {
            module,
            member,
            version,
        } = item
        else {
            continue;
        };
        let index = match groups.iter().position(|g| g.module == module.as_str()) {
            Some(index) => index,
            None => {
                groups.push(ImportGroup {
                    module: module.as_str(),
                    version: None,
                    members: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];
        if group.version.is_none() {
            group.version = version.as_deref();
        }
        if let Some(member) = member {
            if !group.members.contains(&member) {
                group.members.push(member);
            }
        }
    }
    groups
}

fn javascript_prelude(prepares: &PrepareList, module_type: ModuleType, use_skypack: bool) -> String {
    let mut import_lines = Vec::new();
    for ImportGroup {
        module,
        version,
        members,
    } in group_imports(prepares)
    {
        match module_type {
            ModuleType::CommonJs => {
                if members.is_empty() {
                    import_lines.push(format!("require('{}');", module));
                }
                for member in members {
                    if member.name == "*" {
                        import_lines.push(format!("const {} = require('{}');", member.alias, module));
                    } else {
                        import_lines.push(format!(
                            "const {} = require('{}').{};",
                            member.alias, module, member.name
                        ));
                    }
                }
            }
            ModuleType::EsModule => {
                let source = match (use_skypack, version) {
                    (true, Some(version)) => format!("{}{}@{}", SKYPACK_CDN, module, version),
                    (true, None) => format!("{}{}", SKYPACK_CDN, module),
                    (false, _) => module.to_string(),
                };
                if members.is_empty() {
                    import_lines.push(format!("import '{}';", source));
                    continue;
                }

                let (namespaces, named): (Vec<&ImportMember>, Vec<&ImportMember>) =
                    members.into_iter().partition(|m| m.name == "*");
                for member in namespaces {
                    import_lines.push(format!("import * as {} from '{}';", member.alias, source));
                }
                if !named.is_empty() {
                    let list = named
                        .iter()
                        .map(|m| {
                            if m.name != "default" && m.name == m.alias {
                                m.name.clone()
                            } else {
                                format!("{} as {}", m.name, m.alias)
                            }
                        })
                        .join(", ");
                    import_lines.push(format!("import {{ {} }} from '{}';", list, source));
                }
            }
        }
    }

    let functions: Vec<String> = prepares
        .iter()
        .filter_map(|item| match item {
            PrepareItem::Function {
                name,
                parameters,
                body,
            } => Some(format!(
                "function {}({}) {{\n{}\n}}",
                name,
                parameters.join(", "),
                indent_block(body, 2)
            )),
            PrepareItem::Import { .. } => None,
        })
        .collect();

    let mut out = String::new();
    if !import_lines.is_empty() {
        out.push_str(&import_lines.join("\n"));
        out.push_str("\n\n");
    }
    if !functions.is_empty() {
        out.push_str(&functions.join("\n\n"));
        out.push_str("\n\n");
    }
    out
}

fn hoi4_prelude(prepares: &PrepareList, namespace: &str, script_type: ScriptType) -> String {
    let mut out = String::new();
    out.push_str("# HOI4 MOD Script\n");
    out.push_str("# Generated by Codeck Visual Blueprint Editor\n");
    out.push_str(&format!("# Namespace: {}\n", namespace));
    out.push_str(&format!("# Type: {}\n", script_type.as_str()));
    out.push('\n');

    if script_type == ScriptType::Event {
        out.push_str(&format!("add_namespace = {}\n\n", namespace));
    }

    let requires: Vec<String> = group_imports(prepares)
        .into_iter()
        .map(|group| format!("# requires: {}", group.module))
        .collect();
    if !requires.is_empty() {
        out.push_str(&requires.join("\n"));
        out.push_str("\n\n");
    }

    // Hoisted functions become scripted effects; parameters are passed as
    // scoped variables by the caller.
    for item in prepares.iter() {
        if let PrepareItem::Function { name, body, .. } = item {
            out.push_str(&format!("{} = {{\n{}\n}}\n\n", name, indent_block(body, 4)));
        }
    }
    out
}
