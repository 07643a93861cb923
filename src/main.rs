// Entrypoint for the CLI application.
// - Keeps `main` small: read config, build the controller and hand it to
//   the UI loop.

use masterblog_cli::{api::ApiClient, config::Config, controller::Controller, logging, ui::main_menu};

fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    // `MASTERBLOG_API_URL` seeds the base URL when no session was saved;
    // `MASTERBLOG_SESSION_FILE` moves the session file.
    let config = Config::from_env();
    let api = ApiClient::new()?;
    let controller = Controller::new(api, config.session_store(), config.default_base_url.as_deref());

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(controller)?;
    Ok(())
}
