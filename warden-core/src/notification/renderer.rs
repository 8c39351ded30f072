use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::NotificationContext;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(domain|ip|userAgent|accountIdentifier|failedAttemptsThreshold|time)\}")
        .expect("placeholder pattern is valid")
});

/// Substitutes `{domain}`, `{ip}`, `{userAgent}`, `{accountIdentifier}`,
/// `{failedAttemptsThreshold}` and `{time}` in a template.
///
/// Substitution is a single left-to-right pass, so a value that itself contains a
/// placeholder is inserted literally. Any other braces are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationRenderer;

impl NotificationRenderer {
    pub fn render(template: &str, context: &NotificationContext) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| {
                context.value(&caps[1]).unwrap_or_default().to_string()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> NotificationContext {
        NotificationContext {
            domain: "example.com".to_string(),
            ip: "10.0.0.5".to_string(),
            user_agent: "curl/8.0".to_string(),
            account_identifier: "alice".to_string(),
            failed_attempts_threshold: "5".to_string(),
            time: "2024-01-01 10:00".to_string(),
        }
    }

    #[test]
    fn test_render_example() {
        let context = NotificationContext {
            account_identifier: "alice".to_string(),
            ip: "10.0.0.5".to_string(),
            time: "2024-01-01 10:00".to_string(),
            ..Default::default()
        };

        assert_eq!(
            NotificationRenderer::render("Account {accountIdentifier} locked from {ip} at {time}", &context),
            "Account alice locked from 10.0.0.5 at 2024-01-01 10:00"
        );
    }

    #[test]
    fn test_render_without_placeholders_is_identity() {
        let context = context();
        for template in [
            "",
            "plain text",
            "braces { } and {unknown}",
            "json {\"a\": 1}",
            "{ domain } {Domain} {IP} {time",
        ] {
            assert_eq!(NotificationRenderer::render(template, &context), template);
        }
    }

    #[test]
    fn test_doubled_braces_keep_outer_brace() {
        assert_eq!(
            NotificationRenderer::render("{{domain}}", &context()),
            "{example.com}"
        );
    }

    #[test]
    fn test_render_all_placeholders() {
        let rendered = NotificationRenderer::render(
            "{domain}|{ip}|{userAgent}|{accountIdentifier}|{failedAttemptsThreshold}|{time}",
            &context(),
        );

        assert_eq!(
            rendered,
            "example.com|10.0.0.5|curl/8.0|alice|5|2024-01-01 10:00"
        );
    }

    #[test]
    fn test_render_repeated_placeholder() {
        assert_eq!(
            NotificationRenderer::render("{ip} and {ip}", &context()),
            "10.0.0.5 and 10.0.0.5"
        );
    }

    #[test]
    fn test_unknown_placeholders_untouched() {
        assert_eq!(
            NotificationRenderer::render("{user} {accountIdentifier} {host}", &context()),
            "{user} alice {host}"
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let context = NotificationContext {
            user_agent: "evil {accountIdentifier}".to_string(),
            account_identifier: "alice".to_string(),
            ..Default::default()
        };

        assert_eq!(
            NotificationRenderer::render("{userAgent} / {accountIdentifier}", &context),
            "evil {accountIdentifier} / alice"
        );
    }
}
