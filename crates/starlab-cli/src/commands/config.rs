//! Config command implementation.

use anyhow::Result;

use crate::config::Config;

/// Show the effective configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("Starlab Configuration");
    println!("{:-<40}", "");
    println!(
        "Bundle:          {}",
        config
            .bundle
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("Start screen:    {}", config.start);
    println!(
        "Canvas:          {} x {}",
        config.session.canvas_width, config.session.canvas_height
    );
    println!("Point radius:    {}", config.session.point_radius);
    println!("Window padding:  {}", config.session.window_padding);
    println!("Timer delay:     {} ms", config.session.timer_delay_ms);
    println!(
        "Animation:       {} ms ({} frames)",
        config.session.animation_ms,
        config.session.total_frames()
    );

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }
    Ok(())
}

/// Print the effective configuration as JSON.
pub fn dump(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
