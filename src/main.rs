use chrono::Local;
use clap::Parser;
use delivery_filter::app::prompt::{collect_criteria, Overrides, Prompter};
use delivery_filter::core::ConfigProvider;
use delivery_filter::utils::logger;
use delivery_filter::{CliConfig, DeliveryPipeline, EtlEngine, FilterCriteria, LocalStorage};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Settings come first: the logging format is one of them.
    let resolved = cli.resolve().and_then(|config| {
        let start = cli.start_override(config.timestamp_format())?;
        Ok((config, start))
    });
    let (config, start_override) = match resolved {
        Ok(resolved) => resolved,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if config.json_logging() {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::info!("Starting delivery-filter");
    tracing::debug!("Resolved config: {:?}", config);

    let now = Local::now().naive_local();
    let overrides = Overrides {
        district: cli.district.clone(),
        start: start_override,
    };

    let criteria = if config.prompts_enabled() {
        let stdin = std::io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), std::io::stdout(), config.prompt.max_attempts);
        collect_criteria(
            &mut prompter,
            config.default_district(),
            now,
            config.timestamp_format(),
            overrides,
        )
    } else {
        FilterCriteria {
            district: config.default_district().to_string(),
            start: overrides.start.unwrap_or(now),
        }
    };
    tracing::info!(
        "Filtering district {} from {}",
        criteria.district,
        config.timestamp_format().format(&criteria.start)
    );

    let output_path = config.output_path().to_string();
    let storage = LocalStorage::new(".");
    let pipeline = DeliveryPipeline::new(storage, config, criteria);
    let journal = pipeline.journal().clone();
    let summary = EtlEngine::new(pipeline, journal).run();

    tracing::info!(
        "Run finished: {} loaded, {} rejected, {} matched, written: {:?}",
        summary.loaded,
        summary.rejected,
        summary.matched,
        summary.written
    );
    println!("Filtering finished. Check the output file: {}", output_path);

    Ok(())
}
