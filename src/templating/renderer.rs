//! Tera rendering with structured errors.

use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;
use strsim::levenshtein;
use tera::{Context as TeraContext, Template, Tera};

use super::error::TemplateError;

/// A suggestion may differ from the unknown name by at most this share of
/// its length.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

const MAX_SUGGESTIONS: usize = 3;

static VARIABLE_NOT_FOUND: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Variable `([^`]+)` not found").ok());

static TEMPLATE_NOT_FOUND: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Template '([^']+)' not found").ok());

static LINE_COLUMN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+):(\d+)").ok());

/// Every template of one tree, addressable by its `/`-separated relative path.
///
/// Templates can `include`, `import` or `extend` each other by that path.
/// A file that does not parse, or that depends on one that is missing or does
/// not parse, is kept aside: the error only surfaces when that file is
/// rendered or pulled in by the file being rendered.
#[derive(Debug)]
pub struct TemplateSet {
    tera: Tera,
    unusable: BTreeMap<String, TemplateError>,
    load_error: Option<TemplateError>,
}

impl TemplateSet {
    /// Parses `sources`, given as `(name, content)` pairs.
    pub fn from_sources<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut unusable = BTreeMap::new();
        let mut parsed: BTreeMap<String, (String, Template)> = BTreeMap::new();

        for (name, content) in sources {
            let template = Template::new(&name, None, &content)
                .map_err(|e| tera::Error::chain(format!("Failed to parse '{name}'"), e));
            match template {
                Ok(template) => {
                    parsed.insert(name, (content, template));
                }
                Err(e) => {
                    tracing::debug!("{name} is not a valid template: {e}");
                    let error = syntax_error(&e);
                    unusable.insert(name, error);
                }
            }
        }

        // Drop templates whose parent or macro file is unavailable, until
        // nothing changes
        loop {
            let available: HashSet<&str> = parsed.keys().map(String::as_str).collect();
            let broken: Vec<(String, String)> = parsed
                .iter()
                .filter_map(|(name, (_, template))| {
                    template
                        .parent
                        .iter()
                        .chain(template.imported_macro_files.iter().map(|(file, _)| file))
                        .find(|dep| !available.contains(dep.as_str()))
                        .map(|dep| (name.clone(), dep.clone()))
                })
                .collect();
            if broken.is_empty() {
                break;
            }
            for (name, dep) in broken {
                parsed.remove(&name);
                let reason = unusable.get(&dep).map_or_else(
                    || "which does not exist".to_string(),
                    |e: &TemplateError| format!("which is invalid: {e}"),
                );
                unusable.insert(
                    name,
                    TemplateError::SyntaxError {
                        message: format!("depends on '{dep}', {reason}"),
                        line: None,
                    },
                );
            }
        }

        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        let load_error = tera
            .add_raw_templates(parsed.iter().map(|(name, (content, _))| (name, content)))
            .err()
            .map(|e| syntax_error(&e));

        Self {
            tera,
            unusable,
            load_error,
        }
    }

    /// Whether `name` was loaded, usable or not.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.unusable.contains_key(name) || self.tera.get_template_names().any(|n| n == name)
    }

    /// Renders the template `name` against `context`.
    pub fn render(&self, name: &str, context: &TeraContext) -> Result<String, TemplateError> {
        if let Some(error) = self.unusable.get(name) {
            return Err(error.clone());
        }
        if let Some(error) = &self.load_error {
            return Err(error.clone());
        }

        self.tera.render(name, context).map_err(|e| {
            let messages = error_messages(&e);
            let dependency = messages.iter().find_map(|msg| extract_template_name(msg));
            match dependency.and_then(|dep| self.unusable.get(&dep).map(|err| (dep, err))) {
                Some((dep, err)) => TemplateError::SyntaxError {
                    message: format!("included template '{dep}' is invalid: {err}"),
                    line: None,
                },
                None => parse_tera_error(&e, context),
            }
        })
    }
}

fn syntax_error(error: &tera::Error) -> TemplateError {
    TemplateError::SyntaxError {
        message: format_tera_error(error),
        line: extract_line_from_tera_error(error),
    }
}

fn parse_tera_error(error: &tera::Error, context: &TeraContext) -> TemplateError {
    if let Some(variable) = error_messages(error).iter().find_map(|msg| extract_variable_name(msg)) {
        let available_variables = available_variables(context);
        let suggestions = find_similar_variables(&variable, &available_variables);
        return TemplateError::VariableNotFound {
            variable,
            suggestions,
            available_variables,
        };
    }

    syntax_error(error)
}

/// The message of `error` followed by the messages of its sources.
fn error_messages(error: &tera::Error) -> Vec<String> {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }
    messages
}

fn extract_variable_name(message: &str) -> Option<String> {
    let re = VARIABLE_NOT_FOUND.as_ref()?;
    re.captures(message).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

fn extract_template_name(message: &str) -> Option<String> {
    let re = TEMPLATE_NOT_FOUND.as_ref()?;
    re.captures(message).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

/// Tera puts `line:column` into parse errors.
fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
    let re = LINE_COLUMN.as_ref()?;
    error_messages(error).iter().find_map(|msg| {
        re.captures(msg).and_then(|caps| caps.get(1)).and_then(|m| m.as_str().parse().ok())
    })
}

/// Every leaf of the context as a dotted path, sorted.
fn available_variables(context: &TeraContext) -> Vec<String> {
    fn collect(prefix: &str, value: &serde_json::Value, out: &mut Vec<String>) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    collect(&path, child, out);
                }
            }
            _ if !prefix.is_empty() => out.push(prefix.to_string()),
            _ => {}
        }
    }

    let mut vars = Vec::new();
    collect("", &context.clone().into_json(), &mut vars);
    vars.sort();
    vars
}

fn find_similar_variables(target: &str, available: &[String]) -> Vec<String> {
    let max_distance = target.len() * SIMILARITY_THRESHOLD_PERCENT / 100;
    let mut scored: Vec<(usize, &String)> =
        available.iter().map(|var| (levenshtein(target, var), var)).collect();
    scored.sort();

    scored
        .into_iter()
        .filter(|(distance, _)| *distance <= max_distance)
        .take(MAX_SUGGESTIONS)
        .map(|(_, var)| var.clone())
        .collect()
}

/// Joins the Tera error chain into one readable message.
fn format_tera_error(error: &tera::Error) -> String {
    let messages: Vec<String> = error_messages(error)
        .into_iter()
        .map(|msg| msg.trim().to_string())
        .filter(|msg| !msg.is_empty())
        .collect();

    if messages.is_empty() {
        "Template syntax error".to_string()
    } else {
        messages.join("\n  → ")
    }
}
