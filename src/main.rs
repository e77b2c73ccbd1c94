use clap::Parser;
use html_script_obfuscator::core::engine::write_report;
use html_script_obfuscator::utils::{logger, validation::Validate};
use html_script_obfuscator::{
    CliConfig, HtmlPipeline, JavascriptObfuscatorCli, LocalStorage, ObfuscationEngine, Result,
    RunSummary,
};

fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_format);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    std::process::exit(match run(&cli) {
        Ok(summary) => {
            tracing::debug!("{} of {} files changed", summary.changed_files(), summary.files.len());
            0
        }
        Err(e) => {
            tracing::error!("Obfuscation run failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            1
        }
    });
}

fn run(cli: &CliConfig) -> Result<RunSummary> {
    let config = cli.resolve()?;
    config.validate()?;

    let obfuscator = JavascriptObfuscatorCli::new(
        config.obfuscator_command.clone(),
        config.obfuscator_args.clone(),
    );
    if !config.dry_run && !obfuscator.is_available() {
        tracing::warn!(
            "'{}' was not found on PATH; inline scripts will be copied unchanged",
            obfuscator.program()
        );
    }

    let pipeline = HtmlPipeline::new(LocalStorage, obfuscator, config);
    let summary = ObfuscationEngine::new(pipeline).run()?;

    if let Some(path) = &cli.report {
        write_report(&LocalStorage, path, &summary)?;
    }

    Ok(summary)
}
