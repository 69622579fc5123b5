use clap::Parser;
use serde_json::{Map, Value};
use shell_manager::config::cli::Command;
use shell_manager::utils::logger;
use shell_manager::{
    get_bundle, get_config, get_problem, sanitize_name, CliConfig, DeployConfig,
    HacksportsLayout, ShellError,
};

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(config.command) {
        tracing::error!("❌ {} (Severity: {})", e, e.severity());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(command: Command) -> Result<(), ShellError> {
    let layout = HacksportsLayout::from_env();

    match command {
        Command::Problem { dir } => {
            let problem = get_problem(&dir)?;
            display_spec_summary("problem", &problem);
            if let Some(name) = problem.get("name").and_then(Value::as_str) {
                let install = layout.problem_install_path(name, true)?;
                println!("  Install path: {}", install.display());
            }
        }
        Command::Bundle { dir } => {
            let bundle = get_bundle(&dir)?;
            display_spec_summary("bundle", &bundle);
            if let Some(name) = bundle.get("name").and_then(Value::as_str) {
                let install = layout.bundle_install_path(name, true)?;
                println!("  Install path: {}", install.display());
            }
        }
        Command::Config { path } => {
            let deploy_config = get_config(&path)?;
            display_config_summary(&deploy_config);
        }
        Command::Sanitize { name } => println!("{}", sanitize_name(&name)?),
        Command::ProblemRoot { name, absolute } => {
            println!("{}", layout.problem_install_path(&name, absolute)?.display())
        }
        Command::BundleRoot { name, absolute } => {
            println!("{}", layout.bundle_install_path(&name, absolute)?.display())
        }
    }

    Ok(())
}

fn display_spec_summary(kind: &str, spec: &Map<String, Value>) {
    println!("✅ Valid {kind} object");
    for key in ["name", "author", "category", "version"] {
        if let Some(value) = spec.get(key).and_then(Value::as_str) {
            println!("  {key}: {value}");
        }
    }
    for key in ["problems", "categories", "hints"] {
        if let Some(items) = spec.get(key).and_then(Value::as_array) {
            println!("  {key}: {} entries", items.len());
        }
    }
}

fn display_config_summary(config: &DeployConfig) {
    println!("📋 Configuration Summary:");
    println!("  Hostname: {}", config.hostname);
    println!("  Web server: {}", config.web_server);
    println!("  Default user: {}", config.default_user);
    println!("  Web root: {}", config.web_root);
    println!("  Problem directory root: {}", config.problem_directory_root);
    println!(
        "  Obfuscate problem directories: {}",
        config.obfuscate_problem_directories
    );

    if config.banned_ports.is_empty() {
        println!("  Banned ports: none");
    } else {
        println!("  Banned ports:");
        for range in &config.banned_ports {
            println!("    {} -> {}", range.start, range.end);
        }
    }

    if !config.extra.is_empty() {
        let keys: Vec<&str> = config.extra.keys().map(String::as_str).collect();
        println!("  Extra keys: {}", keys.join(", "));
    }
}
