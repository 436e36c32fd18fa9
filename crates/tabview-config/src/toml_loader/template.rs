//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# tabview configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# Settings are captured when a tab is created.

[view]
# bounces = true            # iOS only: rubber-band scrolling
# transparent = false
# devtools = false          # on by default in debug builds
# user_agent = "MyApp/1.0"
# clipboard = true
# autoplay = false
# file_read_access = true   # set false on macOS older than 10.11
# scale_factor = 1.0        # 0.5-4.0, used for snapshots

[platform]
# profile = "auto"          # auto | appkit | uikit | composited

[logging]
# level = "tabview=info"
"##
}
