use anyhow::Result;
use clap::Parser;
use covgate::cli::Cli;
use covgate::config::{load_file_options, parse_options, CiEnvironment};
use covgate::report::{config_warnings, emit, Annotation, GitHubClient, ReviewClient};
use covgate::{GateError, GateStatus};
use std::io::Write;

// Main orchestrator function
fn main() {
    install_panic_hook();
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(status) => status.exit_code(),
        Err(e) => {
            report_fatal(&e);
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<GateStatus> {
    let (file_options, mut warnings) = load_file_options(cli.config.as_deref());
    let raw = cli.raw_options().or(file_options);
    let (config, parse_warnings) = parse_options(&raw)?;
    warnings.extend(parse_warnings);

    init_logging(config.debug_mode);
    log::debug!("Resolved configuration: {:?}", config.thresholds);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    emit(&mut out, &config_warnings(&warnings))?;

    let ci = CiEnvironment::from_env();
    let client = config
        .github_token
        .as_deref()
        .map(|token| GitHubClient::new(ci.api_url.clone(), token));
    let review = client.as_ref().map(|c| c as &dyn ReviewClient);

    let outcome = covgate::run_gate(&config, &ci, review, &mut out)?;
    out.flush()?;

    log::info!(
        "Run '{}': {:?}, summary written: {}, comment posted: {}",
        outcome.run_id,
        outcome.status,
        outcome.summary_written,
        outcome.comment_posted
    );
    Ok(outcome.status)
}

// Side effect function for logger setup (I/O at edges)
fn init_logging(debug_mode: bool) {
    let default_filter = if debug_mode { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

// Fatal errors become a single error annotation so the runner shows them.
fn report_fatal(error: &anyhow::Error) {
    let message = match error.downcast_ref::<GateError>() {
        Some(gate_error) => format!("[{}] {}", gate_error.code(), gate_error),
        None => format!("{error:#}"),
    };
    log::error!("{message}");
    println!("{}", Annotation::error(message));
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        println!(
            "{}",
            Annotation::error(format!("covgate crashed unexpectedly: {info}"))
        );
        std::process::exit(1);
    }));
}
