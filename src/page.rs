//! Dashboard page rendering
//!
//! The page is a single embedded template; the dashboard settings are
//! injected as a JSON object that the page script reads on load.

use crate::config::DashboardSettings;

const TEMPLATE: &str = include_str!("../templates/index.html");

const SETTINGS_PLACEHOLDER: &str = "{{ settings_json }}";
const THEME_PLACEHOLDER: &str = "{{ theme }}";

/// Render the dashboard page for the given settings
#[must_use]
pub fn render_index(settings: &DashboardSettings) -> String {
    let theme = if settings.dark_mode { "dark" } else { "light" };

    TEMPLATE
        .replace(THEME_PLACEHOLDER, theme)
        .replace(SETTINGS_PLACEHOLDER, &settings_script_literal(settings))
}

/// Settings as a JSON literal that is safe inside a `<script>` element
fn settings_script_literal(settings: &DashboardSettings) -> String {
    // serializing plain strings and bools cannot fail
    serde_json::to_string(settings)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}
