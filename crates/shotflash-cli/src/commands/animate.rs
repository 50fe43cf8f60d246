//! Animate command implementation.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use shotflash_core::{AnimationConfig, Animator, BackendDescriptor, Counts, Playback, get_sample};

use super::common::{load_backend, load_config, load_counts};
use crate::AnimateArgs;

/// Execute the animate command.
pub fn execute(args: &AnimateArgs) -> Result<()> {
    let counts = load_counts(&args.input)?;
    let config = build_config(args, &counts)?;

    println!(
        "{} Animating {} on {} ({} mode)",
        style("→").cyan().bold(),
        style(args.input.display()).green(),
        style(if config.device.is_empty() {
            "x-ray chip"
        } else {
            config.device.as_str()
        })
        .yellow(),
        config.mode
    );
    println!(
        "  Loaded: {} outcomes, {} shots",
        counts.len(),
        counts.total_shots()
    );

    let animator = Animator::new(&config).context("Invalid animation settings")?;
    let frames = animator.frame_count(&counts);

    let bar = ProgressBar::new(frames);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} frames")?
            .progress_chars("=> "),
    );

    let saved = animator
        .on_frame(|done, _| bar.set_position(done as u64))
        .save(&counts)?;
    bar.finish_and_clear();

    if !saved {
        anyhow::bail!("Could not create animation {}", config.output.display());
    }

    println!(
        "{} Saved {} ({} frames at {} fps)",
        style("✓").green().bold(),
        style(config.output.display()).cyan(),
        frames,
        config.fps.max(1)
    );
    Ok(())
}

/// Merge config file, environment and command-line flags, in rising
/// precedence.
pub fn build_config(args: &AnimateArgs, counts: &Counts) -> Result<AnimationConfig> {
    let mut config = load_config(args.config.as_deref())?;
    config.apply_env()?;

    if let Some(output) = &args.output {
        config.output.clone_from(output);
    }
    if let Some(mode) = &args.mode {
        config.mode.clone_from(mode);
    }
    if let Some(device) = &args.device {
        config.device.clone_from(device);
    }
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    if let Some(color) = &args.color {
        config.color = Some(color.clone());
    }
    if let Some(intensity) = args.intensity {
        config.intensity = Some(intensity);
    }
    if args.unlabelled {
        config.labelled = Some(false);
    }
    if let Some(dir) = &args.assets {
        config.assets_dir = Some(dir.clone());
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.sequential {
        config.playback = Playback::Sequential;
    }

    if config.device.trim().eq_ignore_ascii_case("auto") {
        let backend = match &args.backend {
            Some(path) => load_backend(path)?,
            None => BackendDescriptor::simulator(),
        };
        config.device = get_sample(&backend, counts)?.to_string();
    }

    Ok(config)
}
