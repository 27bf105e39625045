use std::env;

/// Start the logger. It is configured with the RUST_LOG env var
/// which defaults to "info".
pub fn start() {

    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }

    // a logger may already be running, e.g. when tests start the
    // service more than once
    let _ = pretty_env_logger::try_init();

}
