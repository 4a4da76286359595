use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use anpr_reader::layout::{self, BRAND_MARK, BRAND_NAME};
use anpr_reader::presentation::{PAGE_SUBTITLE, PAGE_TITLE, ResultView};
use anpr_reader::settings::{self, FilePreferenceStore, Theme, ThemeSettings};
use anpr_reader::upload;
use anpr_reader::{AnprPipeline, MockRecognizer, Route, StepTimings, UploadSource};

#[derive(Parser)]
#[command(name = "anpr-reader")]
#[command(about = "Detect and read license plates from images")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings directory (defaults to the platform config directory)
    #[arg(long, value_name = "DIR", global = true)]
    settings_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the recognition pipeline on an image
    Process {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        /// Treat the file as drag-and-dropped (non-images are ignored)
        #[arg(long)]
        drop: bool,

        /// Print the result payload as JSON
        #[arg(long)]
        json: bool,

        /// Skip the simulated step durations
        #[arg(long)]
        instant: bool,
    },

    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Open the graphical interface (requires the `gui` feature)
    Gui {
        /// Page to open
        #[arg(long, value_name = "PATH", default_value = "/")]
        route: Route,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Set the theme
    Set {
        #[arg(value_enum)]
        theme: Theme,
    },
    /// Switch between light and dark
    Toggle,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    anpr_reader::logging::init(args.verbose)?;

    let settings_dir = args
        .settings_dir
        .unwrap_or_else(settings::default_settings_dir);
    tracing::debug!("Settings directory: {:?}", settings_dir);

    match args.command {
        Command::Process {
            image_path,
            drop,
            json,
            instant,
        } => process(&settings_dir, &image_path, drop, json, instant),
        Command::Theme { action } => theme(&settings_dir, action.unwrap_or(ThemeAction::Show)),
        Command::Gui { route } => gui(settings_dir, route),
    }
}

fn process(
    settings_dir: &Path,
    image_path: &Path,
    drop: bool,
    json: bool,
    instant: bool,
) -> anyhow::Result<()> {
    let config = settings::load_config(settings_dir);
    let timings = if instant {
        StepTimings::instant()
    } else {
        config.simulation.timings()
    };
    let source = if drop {
        UploadSource::Drop
    } else {
        UploadSource::Picker
    };

    // A rejected upload is a no-op, not an error
    let Some(image) = upload::read_upload(Some(image_path), source) else {
        tracing::info!("Nothing to process: {:?} was not accepted", image_path);
        return Ok(());
    };

    if !json {
        println!("{}  {}", BRAND_MARK, BRAND_NAME);
        println!("\n{}\n{}\n", PAGE_TITLE, PAGE_SUBTITLE);
        println!("Image: {} ({}, {} bytes)\n", image.name(), image.mime(), image.len());
    }

    let mut pipeline = AnprPipeline::new(timings);
    pipeline.select_image(image);

    // Single-threaded event loop, like the page it stands in for
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(pipeline.run_observed(&MockRecognizer, |step| {
        if !json {
            println!("[{:>10}] {}", step.status(), step.title());
        }
    }))?;

    let result = pipeline
        .result()
        .ok_or_else(|| anyhow::anyhow!("Pipeline finished without a result"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("\n{}", ResultView::from_run(result));
        println!("{}", layout::copyright_line(layout::current_year()));
    }

    Ok(())
}

fn theme(settings_dir: &Path, action: ThemeAction) -> anyhow::Result<()> {
    let mut settings = ThemeSettings::load(FilePreferenceStore::new(settings_dir));

    match action {
        ThemeAction::Show => {}
        ThemeAction::Set { theme } => settings.set_theme(theme)?,
        ThemeAction::Toggle => {
            settings.toggle()?;
        }
    }

    println!("{}", settings.theme());
    Ok(())
}

#[cfg(feature = "gui")]
fn gui(settings_dir: PathBuf, route: Route) -> anyhow::Result<()> {
    anpr_reader::gui::run(settings_dir, route)
}

#[cfg(not(feature = "gui"))]
fn gui(_settings_dir: PathBuf, _route: Route) -> anyhow::Result<()> {
    anyhow::bail!("This build has no graphical interface; rebuild with `--features gui`")
}
