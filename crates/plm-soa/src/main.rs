//! PLM SOA CLI
//!
//! Binary name: `plm-soa`

use std::process;

use plm_soa::cli::{build_cli, handlers::run_cli, setup::init_tracing};

#[tokio::main]
async fn main() {
    if let Err(e) = init_tracing() {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Warning: {e}");
        }
    }

    let matches = build_cli().get_matches();

    let code = match run_cli(&matches).await {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            tracing::error!("{e:#}");
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Error: {e:#}");
            }
            1
        }
    };

    #[allow(clippy::exit)]
    process::exit(code);
}
