use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use log::{debug, info, warn};

use guestbook::GuestbookApp;
use guestbook::cli::Args;
use guestbook::config;
use guestbook::dialogs::prefs::KioskSettings;

fn main() -> Result<()> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = config::PathConfig::from_env_and_cli(args.config_dir.clone());

    // Ensure directories exist
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {:#}", e);
    }

    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // Initialize logger based on --log flag
    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| config::data_file("guestbook.log", &path_config));

        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info)
            .filter_module("eframe", log::LevelFilter::Info)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        // Console logging (respects RUST_LOG if set)
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info)
            .filter_module("eframe", log::LevelFilter::Info)
            .format_timestamp_millis()
            .init();
    }

    info!("Guestbook kiosk starting...");
    debug!("Command-line args: {:?}", args);

    let settings_path = config::config_file("guestbook.json", &path_config);
    info!("Config path: {}", settings_path.display());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Guestbook v{}", env!("CARGO_PKG_VERSION")))
            .with_inner_size([1280.0, 720.0])
            .with_resizable(true),
        persist_window: true,
        persistence_path: Some(settings_path),
        ..Default::default()
    };

    eframe::run_native(
        "Guestbook",
        native_options,
        Box::new(move |cc| {
            // Load persisted settings if available, otherwise defaults
            let mut settings: KioskSettings = cc
                .storage
                .and_then(|storage| storage.get_string(eframe::APP_KEY))
                .and_then(|json| match serde_json::from_str(&json) {
                    Ok(settings) => Some(settings),
                    Err(e) => {
                        warn!("Ignoring unreadable saved settings: {}", e);
                        None
                    }
                })
                .unwrap_or_else(|| {
                    info!("No persisted settings found, using defaults");
                    KioskSettings::default()
                });

            // CLI arguments have priority
            args.apply_to(&mut settings);
            info!(
                "Applied settings: window={:.1}s policy={} workers={}",
                settings.enlarge_secs,
                settings.enlarge_policy.as_str(),
                settings.decode_workers
            );

            let mut app = GuestbookApp::new(settings);

            if args.fullscreen {
                app.set_cinema_mode(&cc.egui_ctx, true);
            }

            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {}", e))?;

    info!("Application exiting");
    Ok(())
}
