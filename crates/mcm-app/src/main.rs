// ABOUTME: Main application entry point.
// ABOUTME: Dispatches mcm subcommands over the colour engine and paint series.

mod args;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use args::{Args, Command, ConfigCommand, NudgeOp, SeriesCommand, SessionCommand};
use mcm_core::{Config, Hcv, Rgb16, Rgb8, RgbManipulator, StepSize, WheelDirection};
use mcm_paint::{MixedColour, MixingSession, NamedMixedColour, PaintBlob, PaintSeries};

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::load_or_default()),
    }
}

fn rotate(config: &Config, rgb: Rgb16, degrees: f64, wheel: bool) {
    let mut radians = degrees.to_radians();
    if wheel {
        radians = WheelDirection::Clockwise.signed(
            radians,
            config.colour_wheel.red_to_yellow_clockwise,
        );
    }
    let rotated = Hcv::new(rgb).rotated_rgb(radians);
    print!("{}", report::describe(rotated));
}

fn nudge(config: &Config, rgb: Rgb16, size: StepSize, ops: &[NudgeOp]) {
    let steps = &config.steps;
    let clockwise = config.colour_wheel.red_to_yellow_clockwise;
    let mut manipulator = RgbManipulator::new(rgb);
    for op in ops {
        let changed = match op {
            NudgeOp::ValueUp => manipulator.increment_value(steps.value_delta(size)),
            NudgeOp::ValueDown => manipulator.decrement_value(steps.value_delta(size)),
            NudgeOp::ChromaUp => manipulator.increment_chroma(steps.chroma_delta(size)),
            NudgeOp::ChromaDown => manipulator.decrement_chroma(steps.chroma_delta(size)),
            NudgeOp::HueClockwise => manipulator.rotate_hue(
                WheelDirection::Clockwise.signed(steps.hue_delta(size), clockwise),
            ),
            NudgeOp::HueAntiClockwise => manipulator.rotate_hue(
                WheelDirection::AntiClockwise.signed(steps.hue_delta(size), clockwise),
            ),
        };
        if !changed {
            // terminal bell
            eprint!("\x07");
            tracing::warn!(
                "{} ({} step) refused at {}",
                op,
                size.label(),
                manipulator.rgb::<u16>()
            );
        }
    }
    print!("{}", report::describe(manipulator.rgb()));
}

fn load_series_set(config: &Config, files: &[PathBuf], ideal: bool) -> Result<Vec<PaintSeries>> {
    let files = if files.is_empty() {
        &config.series_files[..]
    } else {
        files
    };
    let mut series = files
        .iter()
        .map(|file| {
            PaintSeries::load(file)
                .with_context(|| format!("Failed to load series {}", file.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    if ideal || series.is_empty() {
        series.push(PaintSeries::ideal());
    }
    Ok(series)
}

struct MixRequest<'a> {
    files: &'a [PathBuf],
    ideal: bool,
    simplify: bool,
    save: Option<&'a str>,
    notes: &'a str,
    components: &'a [args::Component],
}

fn mix(config: &Config, request: MixRequest<'_>) -> Result<()> {
    let series = load_series_set(config, request.files, request.ideal)?;
    let components = request.components;
    let blobs = components
        .iter()
        .map(|component| {
            series
                .iter()
                .find_map(|s| s.get(&component.name))
                .map(|paint| PaintBlob::new(paint.clone(), component.parts))
                .with_context(|| format!("No paint named {:?} in the loaded series", component.name))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut mixture = MixedColour::new(blobs);
    if request.simplify {
        mixture = mixture.simplified();
    }
    print!("{}", report::mixture(&mixture));

    if let Some(name) = request.save {
        let mut session = MixingSession::load_from_default().unwrap_or_default();
        let files = if request.files.is_empty() {
            &config.series_files[..]
        } else {
            request.files
        };
        for file in files {
            if !session.series_files.contains(file) {
                session.series_files.push(file.clone());
            }
        }
        session.add_mixture(&NamedMixedColour {
            name: name.to_string(),
            notes: request.notes.to_string(),
            mixture,
        });
        let path = session.save_to_default()?;
        tracing::info!("Saved mixture {:?} to {}", name, path.display());
    }
    Ok(())
}

fn parse_samples(text: &str) -> Result<Vec<Rgb8>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(|(index, line)| {
            let channels = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|part| !part.is_empty())
                .map(str::parse::<u8>)
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("Line {}: bad channel in {:?}", index + 1, line))?;
            match channels[..] {
                [red, green, blue] => Ok(Rgb8::new(red, green, blue)),
                _ => bail!("Line {}: expected three channels, got {:?}", index + 1, line),
            }
        })
        .collect()
}

fn sample(config: &Config, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read samples {}", file.display()))?;
    let samples = parse_samples(&text)?;
    let count = samples.len();
    let Some(mean) = Rgb8::mean(samples) else {
        bail!("No samples in {}", file.display());
    };
    tracing::info!("Averaged {} samples to {}", count, mean);

    let mut rgb: Rgb16 = mean.convert();
    if !config.matcher.auto_match_raw {
        rgb = Hcv::new(rgb).hue_rgb_for_value(None);
    }
    print!("{}", report::describe(rgb));
    Ok(())
}

fn series_command(command: SeriesCommand) -> Result<()> {
    match command {
        SeriesCommand::Show { file } => {
            let series = PaintSeries::load(&file)
                .with_context(|| format!("Failed to load series {}", file.display()))?;
            print!("{}", report::series(&series));
        }
        SeriesCommand::Convert { file, output } => {
            let series = PaintSeries::load(&file)
                .with_context(|| format!("Failed to load series {}", file.display()))?;
            match output {
                Some(output) => {
                    series
                        .save(&output)
                        .with_context(|| format!("Failed to write {}", output.display()))?;
                    tracing::info!("Wrote {} paints to {}", series.len(), output.display());
                }
                None => print!("{}", series.definition_text()?),
            }
        }
    }
    Ok(())
}

fn session_command(command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Show { file: Some(file) } => {
            let session = MixingSession::load(&file)
                .with_context(|| format!("Failed to load session {}", file.display()))?;
            print!("{}", report::session(&session));
        }
        SessionCommand::Show { file: None } => match MixingSession::load_from_default() {
            Some(session) => print!("{}", report::session(&session)),
            None => println!("No saved session"),
        },
    }
    Ok(())
}

fn config_command(config: &Config, path: Option<&Path>, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => print!("{}", toml::to_string_pretty(config)?),
        ConfigCommand::Init { force } => {
            let path = match path {
                Some(path) => path.to_path_buf(),
                None => Config::default_path().context("Could not determine config directory")?,
            };
            if path.exists() && !force {
                bail!("{} already exists, use --force to overwrite", path.display());
            }
            Config::default().save(&path)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config_path = args.config.as_deref();

    let config = match &args.command {
        // init must not trip over a broken file it is about to replace
        Command::Config {
            command: ConfigCommand::Init { .. },
        } => Config::default(),
        _ => load_config(config_path)?,
    };

    match args.command {
        Command::Describe { colour } => {
            let rgb = colour.rgb().map_err(anyhow::Error::msg)?;
            print!("{}", report::describe(rgb));
        }
        Command::Rotate {
            colour,
            degrees,
            wheel,
        } => {
            let rgb = colour.rgb().map_err(anyhow::Error::msg)?;
            rotate(&config, rgb, degrees, wheel);
        }
        Command::Nudge { colour, step, ops } => {
            let rgb = colour.rgb().map_err(anyhow::Error::msg)?;
            nudge(&config, rgb, step.into(), &ops);
        }
        Command::Mix {
            series,
            ideal,
            simplify,
            save,
            notes,
            components,
        } => mix(
            &config,
            MixRequest {
                files: &series,
                ideal,
                simplify,
                save: save.as_deref(),
                notes: &notes,
                components: &components,
            },
        )?,
        Command::Series { command } => series_command(command)?,
        Command::Sample { file } => sample(&config, &file)?,
        Command::Session { command } => session_command(command)?,
        Command::Config { command } => config_command(&config, config_path, command)?,
    }

    Ok(())
}
