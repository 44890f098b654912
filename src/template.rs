//! Placeholder extraction and field mapping for message templates.
//!
//! A template body carries `{{name}}` tokens. Each token is mapped to a
//! contact schema field key on the provider entry that selected the
//! template.

use std::sync::LazyLock;

use regex::Regex;

use crate::campaign::provider::{FieldMappings, ProviderEntry};
use crate::catalog;
use crate::error::Error;

/// `{{` then one or more ascii word characters then `}}`.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{([A-Za-z0-9_]+)\}\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Placeholder names in order of appearance.
///
/// A name used twice is listed twice.
pub fn extract_placeholders(body: &str) -> Vec<String> {
    PLACEHOLDER_RE
        .captures_iter(body)
        .map(|captures| captures[1].to_string())
        .collect()
}

/// Placeholders that have no field assigned yet, in template order.
pub fn unmapped_placeholders<'a>(
    placeholders: &'a [String],
    mappings: &FieldMappings,
) -> Vec<&'a str> {
    placeholders
        .iter()
        .filter(|placeholder| !mappings.contains_key(placeholder.as_str()))
        .map(String::as_str)
        .collect()
}

/// Placeholders of the template currently selected on the entry. Empty for
/// push entries and for template ids the catalog does not know.
pub fn entry_placeholders(entry: &ProviderEntry) -> Vec<String> {
    entry
        .config
        .template_id()
        .and_then(|template_id| catalog::find_template(entry.kind(), template_id))
        .map(|template| extract_placeholders(template.body))
        .unwrap_or_default()
}

/// Assigns `field_key` to `placeholder`, replacing any earlier assignment.
#[tracing::instrument(skip(entry), fields(provider_id = %entry.id))]
pub fn set_mapping(
    mut entry: ProviderEntry,
    placeholder: &str,
    field_key: &str,
) -> Result<ProviderEntry, Error> {
    let kind = entry.kind();
    let provider_id = entry.id.clone();
    let (_, mappings) = entry
        .config
        .template_mut()
        .ok_or_else(|| Error::ProviderHasNoTemplate { provider_id, kind })?;

    mappings.insert(placeholder.to_string(), field_key.to_string());

    Ok(entry)
}

/// Selects a template. Mappings belong to the template they were made for,
/// so switching to a different template drops all of them.
#[tracing::instrument(skip(entry), fields(provider_id = %entry.id))]
pub fn select_template(mut entry: ProviderEntry, template_id: &str) -> Result<ProviderEntry, Error> {
    let kind = entry.kind();
    let provider_id = entry.id.clone();
    let (current, mappings) = entry
        .config
        .template_mut()
        .ok_or_else(|| Error::ProviderHasNoTemplate { provider_id, kind })?;

    if current.as_str() != template_id {
        tracing::debug!(from = %current, to = %template_id, dropped = mappings.len(), "switching template");
        *current = template_id.to_string();
        mappings.clear();
    }

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::provider::{
        AiAgentConfig, EmailConfig, ProviderConfig, ProviderEntryId, ProviderKind, PushConfig,
        WhatsAppConfig,
    };

    fn whatsapp_entry(template_id: &str) -> ProviderEntry {
        ProviderEntry {
            id: ProviderEntryId::new(),
            label: "WhatsApp".into(),
            config: ProviderConfig::WhatsApp(WhatsAppConfig {
                provider_id: "wpp_meta_01".into(),
                template_id: template_id.into(),
                ..Default::default()
            }),
        }
    }

    fn push_entry() -> ProviderEntry {
        ProviderEntry {
            id: ProviderEntryId::new(),
            label: "Push Notification".into(),
            config: ProviderConfig::Push(PushConfig::default()),
        }
    }

    #[test]
    fn extracts_names_in_order() {
        assert_eq!(
            extract_placeholders("Hello {{name}}, offer {{creditvalue}} at {{credittax}}"),
            vec!["name", "creditvalue", "credittax"]
        );
    }

    #[test]
    fn no_tokens_yields_nothing() {
        assert!(extract_placeholders("No tokens here").is_empty());
        assert!(extract_placeholders("").is_empty());
    }

    #[test]
    fn repeated_names_are_kept() {
        assert_eq!(
            extract_placeholders("{{name}} and {{name}} again, {{other}}"),
            vec!["name", "name", "other"]
        );
    }

    #[test]
    fn malformed_tokens_are_ignored() {
        assert_eq!(
            extract_placeholders("{{}} {name} {{first name}} {{a-b}} {{ok_1}} {{{x}}}"),
            vec!["ok_1", "x"]
        );
        assert!(extract_placeholders("{{nomé}}").is_empty());
    }

    #[test]
    fn unmapped_lists_missing_placeholders() {
        let placeholders = extract_placeholders("{{name}} {{creditvalue}} {{credittax}}");
        let mut mappings = FieldMappings::new();
        mappings.insert("creditvalue".into(), "m_tiervalue".into());

        assert_eq!(
            unmapped_placeholders(&placeholders, &mappings),
            vec!["name", "credittax"]
        );
    }

    #[test]
    fn entry_placeholders_follow_the_catalog() {
        assert_eq!(
            entry_placeholders(&whatsapp_entry("tpl_card_offer")),
            vec!["name", "tradingname", "limite"]
        );
        assert!(entry_placeholders(&whatsapp_entry("tpl_removed")).is_empty());
        assert!(entry_placeholders(&push_entry()).is_empty());

        let email = ProviderEntry {
            id: ProviderEntryId::new(),
            label: "Email".into(),
            config: ProviderConfig::Email(EmailConfig {
                template_id: "tpl_email_bf_offer".into(),
                ..Default::default()
            }),
        };
        assert_eq!(
            entry_placeholders(&email),
            vec!["name", "creditvalue", "credittax"]
        );
    }

    #[test]
    fn set_mapping_inserts_and_overwrites() {
        let entry = whatsapp_entry("tpl_bf_offer");

        let entry = set_mapping(entry, "name", "d_trading_name").unwrap();
        let entry = set_mapping(entry, "name", "d_first_name").unwrap();
        let entry = set_mapping(entry, "credittax", "m_credit_tax").unwrap();

        let mappings = entry.config.field_mappings().unwrap();
        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings["name"], "d_first_name");
        assert_eq!(mappings["credittax"], "m_credit_tax");
    }

    #[test]
    fn set_mapping_applies_to_every_templated_kind() {
        let entry = ProviderEntry {
            id: ProviderEntryId::new(),
            label: "Agente de IA".into(),
            config: ProviderConfig::AiAgent(AiAgentConfig {
                template_id: "tpl_card_offer".into(),
                ..Default::default()
            }),
        };

        let entry = set_mapping(entry, "limite", "m_credit_card_limit_approved").unwrap();

        assert_eq!(
            entry.config.field_mappings().unwrap()["limite"],
            "m_credit_card_limit_approved"
        );
    }

    #[test]
    fn push_entries_reject_mappings() {
        let entry = push_entry();
        let provider_id = entry.id.clone();

        assert_eq!(
            set_mapping(entry.clone(), "name", "d_first_name").unwrap_err(),
            Error::ProviderHasNoTemplate {
                provider_id: provider_id.clone(),
                kind: ProviderKind::Push,
            }
        );
        assert_eq!(
            select_template(entry, "tpl_bf_offer").unwrap_err(),
            Error::ProviderHasNoTemplate {
                provider_id,
                kind: ProviderKind::Push,
            }
        );
    }

    #[test]
    fn changing_template_clears_mappings() {
        let entry = set_mapping(whatsapp_entry("tpl_bf_offer"), "name", "d_first_name").unwrap();
        assert!(!entry.config.field_mappings().unwrap().is_empty());

        let entry = select_template(entry, "tpl_credit_approval").unwrap();

        assert_eq!(
            entry.config.template_id().map(String::as_str),
            Some("tpl_credit_approval")
        );
        assert!(entry.config.field_mappings().unwrap().is_empty());
    }

    #[test]
    fn reselecting_same_template_keeps_mappings() {
        let entry = set_mapping(whatsapp_entry("tpl_bf_offer"), "name", "d_first_name").unwrap();

        let entry = select_template(entry, "tpl_bf_offer").unwrap();

        assert_eq!(entry.config.field_mappings().unwrap().len(), 1);
    }
}
