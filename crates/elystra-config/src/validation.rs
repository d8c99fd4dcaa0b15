//! Full configuration validation.
//!
//! Checks endpoint and link URL schemes, timing values, and team identities.
//! All problems are collected and reported together.

use crate::schema::ElystraConfig;
use elystra_common::ConfigError;
use url::Url;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ElystraConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_url(&mut errors, "site.base_url", &config.site.base_url, &["http", "https"]);
    validate_url(
        &mut errors,
        "presence.api_base_url",
        &config.presence.api_base_url,
        &["http", "https"],
    );
    validate_url(
        &mut errors,
        "presence.socket_url",
        &config.presence.socket_url,
        &["ws", "wss"],
    );

    validate_nonzero(&mut errors, "presence.reconnect_delay_ms", config.presence.reconnect_delay_ms);
    validate_nonzero(
        &mut errors,
        "presence.request_timeout_secs",
        config.presence.request_timeout_secs,
    );
    validate_nonzero(
        &mut errors,
        "presence.connect_timeout_secs",
        config.presence.connect_timeout_secs,
    );

    for (i, member) in config.team.iter().enumerate() {
        if member.identity.trim().is_empty() {
            errors.push(format!("team[{i}].identity must not be empty"));
        }
    }

    for (i, link) in config.contact.iter().enumerate() {
        if link.label.trim().is_empty() {
            errors.push(format!("contact[{i}].label must not be empty"));
        }
        validate_url(
            &mut errors,
            &format!("contact[{i}].url"),
            &link.url,
            &["http", "https", "mailto"],
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_url(errors: &mut Vec<String>, name: &str, value: &str, schemes: &[&str]) {
    match Url::parse(value) {
        Ok(url) if schemes.contains(&url.scheme()) => {}
        Ok(url) => errors.push(format!(
            "{name} = {value} has scheme '{}', expected one of {schemes:?}",
            url.scheme()
        )),
        Err(e) => errors.push(format!("{name} = {value} is not a valid URL: {e}")),
    }
}

fn validate_nonzero(errors: &mut Vec<String>, name: &str, value: u64) {
    if value == 0 {
        errors.push(format!("{name} must be greater than 0"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ContactLink, TeamMemberConfig};

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&ElystraConfig::default()).is_ok());
    }

    #[test]
    fn empty_identity_is_rejected() {
        let mut config = ElystraConfig::default();
        config.team.push(TeamMemberConfig {
            identity: "  ".into(),
            role: "Ghost".into(),
            description: None,
        });
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("team[1].identity"), "{err}");
    }

    #[test]
    fn socket_url_must_be_websocket() {
        let mut config = ElystraConfig::default();
        config.presence.socket_url = "https://api.lanyard.rest/socket".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("presence.socket_url"), "{err}");
    }

    #[test]
    fn zero_reconnect_delay_is_rejected() {
        let mut config = ElystraConfig::default();
        config.presence.reconnect_delay_ms = 0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("reconnect_delay_ms"), "{err}");
    }

    #[test]
    fn contact_links_need_a_label_and_a_known_scheme() {
        let mut config = ElystraConfig::default();
        config.contact.push(ContactLink {
            label: "Email".into(),
            url: "mailto:team@elystra.dev".into(),
        });
        assert!(validate(&config).is_ok());

        config.contact.push(ContactLink {
            label: "".into(),
            url: "ftp://elystra.dev".into(),
        });
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("contact[3].label"), "{err}");
        assert!(err.contains("contact[3].url"), "{err}");
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = ElystraConfig::default();
        config.site.base_url = "not a url".into();
        config.presence.request_timeout_secs = 0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("site.base_url"));
        assert!(err.contains("request_timeout_secs"));
    }
}
