use clap::Parser;
use small_car::utils::error::ErrorSeverity;
use small_car::utils::{logger, validation::Validate};
use small_car::{CarError, CliConfig, ScenarioConfig, ScenarioRunner, StdoutReporter};

fn load_scenario(config: &CliConfig) -> Result<ScenarioConfig, CarError> {
    let scenario = match &config.scenario {
        Some(path) => {
            tracing::info!("📁 Loading scenario from: {}", path.display());
            ScenarioConfig::from_file(path)?
        }
        None => {
            tracing::debug!("No scenario file given, using the built-in showroom");
            ScenarioConfig::showroom()
        }
    };
    scenario.validate()?;
    Ok(scenario)
}

fn run(config: &CliConfig) -> Result<(), CarError> {
    let scenario = load_scenario(config)?;

    if config.dry_run {
        tracing::info!("🔍 Dry run, scenario '{}' is valid", scenario.scenario.display_name());
        for line in ScenarioRunner::<StdoutReporter>::plan(&scenario) {
            println!("{}", line);
        }
        return Ok(());
    }

    let mut runner = ScenarioRunner::new(StdoutReporter::new(), config.format);
    let summary = runner.run(&scenario)?;
    tracing::debug!("Final cars: {:?}", summary.cars);
    Ok(())
}

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ small-car failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}
