//! Commented default config written on first run.

/// Generate the default TOML config content with comments.
pub(super) fn default_config_toml() -> &'static str {
    r##"# Elystra Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[site]
# base_url = "https://elystra.vercel.app/"
# title = "Elystra | Project Under Development"
# description = "Still unknow."
# site_name = "Elystra"
# locale = "en_US"
# icon = "/icon.png"
# icon_size = 512
# twitter_handle = "@4levyz"

[presence]
# api_base_url = "https://api.lanyard.rest"
# socket_url = "wss://api.lanyard.rest/socket"
# reconnect_delay_ms = 5000     # fixed, no backoff
# request_timeout_secs = 10
# connect_timeout_secs = 5

# One [[team]] table per tracked member. Members whose presence cannot be
# fetched are left off the about view.
[[team]]
identity = "874898422233178142"
role = "Lead Developer"
description = "Responsible for application architecture and frontend development. Experienced in React, Next.js, and TypeScript."

# Contact links listed under the about section. Any [[contact]] entry
# replaces the default Discord and GitHub links.
# [[contact]]
# label = "Email"
# url = "mailto:you@example.com"
"##
}
