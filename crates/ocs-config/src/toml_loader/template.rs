//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# ocs-sim configuration
# Only override what you want to change -- missing fields use defaults.
# API keys do not belong here: set OCS_API_KEY and ATHINA_API_KEY in the
# settings file ([secrets] settings_path) or the environment.

[api]
# base_url = "https://chatbots.dimagi.com"
# timeout_seconds = 300     # 1-3600
# num_retries = 3           # total attempts per request, 1-20
# retry_wait_seconds = 2    # 0-300

[simulation]
# experiment_id = ""        # the assistant under test
# user_experiment_id = ""   # the bot that plays the user
# participant_id = ""
# max_exchanges = 20        # 1-1000
# continue_on_error = true

[dataset]
# base_url = "https://log.athina.ai"
# name = "ocs-simulations"
# description = "Bot-to-bot simulated conversations"

[secrets]
# settings_path = "~/.config/ocs-sim/.env"

[logging]
# level = "info"            # trace, debug, info, warn, error
"##
    .to_string()
}
