use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Version tag of the templates compiled into the binary.
pub const BUILTIN_VERSION: &str = "builtin-v1";

const CHAT_ASSISTANT: &str = include_str!("templates/chat-assistant.txt");
const REPORT_REACTION: &str = include_str!("templates/report-reaction.txt");

/// Identity of a prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptTemplate {
    ChatAssistant,
    ReportReaction,
}

impl PromptTemplate {
    pub const ALL: [PromptTemplate; 2] = [PromptTemplate::ChatAssistant, PromptTemplate::ReportReaction];

    pub fn name(&self) -> &'static str {
        match self {
            PromptTemplate::ChatAssistant => "chat-assistant",
            PromptTemplate::ReportReaction => "report-reaction",
        }
    }

    fn builtin_text(&self) -> &'static str {
        match self {
            PromptTemplate::ChatAssistant => CHAT_ASSISTANT,
            PromptTemplate::ReportReaction => REPORT_REACTION,
        }
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to read prompt template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Template name → template text, loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct PromptRegistry {
    version: String,
    templates: HashMap<PromptTemplate, String>,
}

impl PromptRegistry {
    pub fn builtin() -> Self {
        let templates = PromptTemplate::ALL
            .iter()
            .map(|t| (*t, t.builtin_text().to_string()))
            .collect();
        Self { version: BUILTIN_VERSION.to_string(), templates }
    }

    /// Starts from the built-in set and replaces every template for which
    /// `<dir>/<template-name>.txt` exists.
    pub fn load(dir: Option<&Path>) -> Result<Self, PromptError> {
        let mut registry = Self::builtin();
        let Some(dir) = dir else {
            return Ok(registry);
        };

        let mut overridden = Vec::new();
        for template in PromptTemplate::ALL {
            let path = dir.join(format!("{}.txt", template.name()));
            if !path.is_file() {
                continue;
            }
            let text = std::fs::read_to_string(&path)
                .map_err(|source| PromptError::Read { path: path.clone(), source })?;
            info!("Prompt template '{template}' overridden from {}", path.display());
            registry.templates.insert(template, text);
            overridden.push(template.name());
        }

        if !overridden.is_empty() {
            registry.version = format!("custom:{}", dir.display());
        }
        Ok(registry)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn text(&self, template: PromptTemplate) -> &str {
        self.templates
            .get(&template)
            .map(String::as_str)
            .unwrap_or_else(|| template.builtin_text())
    }

    /// Substitutes `{{name}}` placeholders with the matching value.
    pub fn render(&self, template: PromptTemplate, vars: &[(&str, &str)]) -> String {
        render_template(self.text(template), vars)
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Single pass over the template, so placeholder-like text inside a
/// substituted value is never expanded again. Unknown placeholders stay as-is.
fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find("}}") {
            Some(end) => {
                let key = after_open[..end].trim();
                match vars.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after_open[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_template_embeds_message() {
        let registry = PromptRegistry::builtin();
        let prompt = registry.render(PromptTemplate::ChatAssistant, &[("message", "Is this loan risky?")]);

        assert!(prompt.starts_with("System Prompt: You are InsuPro AI assistant."));
        assert!(prompt.contains("User Message: \"Is this loan risky?\""));
        assert!(prompt.trim_end().ends_with("Response:"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn reaction_template_embeds_report_and_examples() {
        let registry = PromptRegistry::builtin();
        let prompt = registry.render(
            PromptTemplate::ReportReaction,
            &[
                ("risk_score", "85"),
                ("summary", "A car loan"),
                ("risks", "Floating rate"),
                ("hidden_charges", "Processing fee"),
            ],
        );

        assert!(prompt.contains("- Risk Score: 85/100"));
        assert!(prompt.contains("- Summary: A car loan"));
        assert!(prompt.contains("- Risks: Floating rate"));
        assert!(prompt.contains("- Hidden Charges: Processing fee"));
        assert!(prompt.contains("High Risk:"));
        assert!(prompt.contains("Medium Risk:"));
        assert!(prompt.contains("Low Risk:"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let registry = PromptRegistry::builtin();
        let vars = [("message", "hello")];
        assert_eq!(
            registry.render(PromptTemplate::ChatAssistant, &vars),
            registry.render(PromptTemplate::ChatAssistant, &vars)
        );
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        let out = render_template("a {{x}} b {{y}}", &[("x", "{{y}}"), ("y", "Y")]);
        assert_eq!(out, "a {{y}} b Y");
    }

    #[test]
    fn unknown_and_unterminated_placeholders_are_kept() {
        assert_eq!(render_template("{{nope}} and {{open", &[]), "{{nope}} and {{open");
    }

    #[test]
    fn empty_values_render_as_empty() {
        assert_eq!(render_template("[{{summary}}]", &[("summary", "")]), "[]");
    }

    #[test]
    fn load_without_dir_is_builtin() {
        let registry = PromptRegistry::load(None).unwrap();
        assert_eq!(registry.version(), BUILTIN_VERSION);
    }

    #[test]
    fn load_overrides_from_directory() {
        let dir = std::env::temp_dir().join(format!("finguardian-prompts-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("chat-assistant.txt"), "Q: {{message}}").unwrap();

        let registry = PromptRegistry::load(Some(dir.as_path())).unwrap();
        assert_eq!(registry.render(PromptTemplate::ChatAssistant, &[("message", "hi")]), "Q: hi");
        assert_eq!(registry.text(PromptTemplate::ReportReaction), REPORT_REACTION);
        assert!(registry.version().starts_with("custom:"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_with_empty_directory_keeps_builtin_version() {
        let dir = std::env::temp_dir().join(format!("finguardian-prompts-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let registry = PromptRegistry::load(Some(dir.as_path())).unwrap();
        assert_eq!(registry.version(), BUILTIN_VERSION);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
