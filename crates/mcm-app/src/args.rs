// ABOUTME: Command line arguments for the mcm binary.
// ABOUTME: Parses colours, nudge operations and paint components from the command line.

use std::path::PathBuf;

use mcm_core::{Rgb16, Rgb8, StepSize};

#[derive(Debug, clap::Parser)]
#[command(name = "mcm", version, about = "Modellers' colour mixer")]
pub struct Args {
    /// config file, defaults to ~/.config/mcm/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Show hue, chroma and value of a colour
    Describe {
        #[command(flatten)]
        colour: ColourArgs,
    },

    /// Rotate the hue of a colour keeping its value
    Rotate {
        #[command(flatten)]
        colour: ColourArgs,

        #[arg(long, allow_negative_numbers = true)]
        degrees: f64,

        /// treat the angle as a clockwise turn of the drawn hue wheel
        #[arg(long)]
        wheel: bool,
    },

    /// Apply step-wise edits: value+ value- chroma+ chroma- hue+ hue-
    Nudge {
        #[command(flatten)]
        colour: ColourArgs,

        #[arg(long, value_enum, default_value_t = Step::Normal)]
        step: Step,

        #[arg(required = true)]
        ops: Vec<NudgeOp>,
    },

    /// Mix series paints given as NAME=PARTS
    Mix {
        /// series file, may be repeated; defaults to the configured series
        #[arg(long = "series")]
        series: Vec<PathBuf>,

        /// include the ideal paint series
        #[arg(long)]
        ideal: bool,

        /// divide all parts by their greatest common divisor
        #[arg(long)]
        simplify: bool,

        /// record the mixture under this name in the saved session
        #[arg(long)]
        save: Option<String>,

        #[arg(long, default_value = "", requires = "save")]
        notes: String,

        #[arg(required = true)]
        components: Vec<Component>,
    },

    /// Work with paint series files
    Series {
        #[command(subcommand)]
        command: SeriesCommand,
    },

    /// Average 8-bit samples, one "r g b" per line
    Sample { file: PathBuf },

    /// Inspect a saved mixing session
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, clap::Subcommand)]
pub enum SeriesCommand {
    /// List the paints in a series file
    Show { file: PathBuf },

    /// Rewrite a series file (legacy files included) in the current format
    Convert {
        file: PathBuf,

        /// write here instead of standard output
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, clap::Subcommand)]
pub enum SessionCommand {
    /// List saved mixtures, defaults to the session in the state directory
    Show { file: Option<PathBuf> },
}

#[derive(Debug, clap::Subcommand)]
pub enum ConfigCommand {
    Show,

    /// Write the default configuration
    Init {
        /// overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct ColourArgs {
    pub red: u16,
    pub green: u16,
    pub blue: u16,

    /// bits per channel of the given values
    #[arg(long, value_enum, default_value_t = Depth::Eight)]
    pub depth: Depth,
}

impl ColourArgs {
    pub fn rgb(&self) -> Result<Rgb16, String> {
        match self.depth {
            Depth::Sixteen => Ok(Rgb16::new(self.red, self.green, self.blue)),
            Depth::Eight => {
                let channel = |c: u16| {
                    u8::try_from(c).map_err(|_| format!("{c} does not fit in 8 bits"))
                };
                let rgb = Rgb8::new(channel(self.red)?, channel(self.green)?, channel(self.blue)?);
                Ok(rgb.convert())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Depth {
    #[value(name = "8")]
    Eight,
    #[value(name = "16")]
    Sixteen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[clap(rename_all = "snake_case")]
pub enum Step {
    Fine,
    Normal,
    Coarse,
}

impl From<Step> for StepSize {
    fn from(value: Step) -> Self {
        match value {
            Step::Fine => StepSize::Fine,
            Step::Normal => StepSize::Normal,
            Step::Coarse => StepSize::Coarse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeOp {
    ValueUp,
    ValueDown,
    ChromaUp,
    ChromaDown,
    /// clockwise on the drawn wheel
    HueClockwise,
    HueAntiClockwise,
}

impl std::str::FromStr for NudgeOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value+" => Ok(NudgeOp::ValueUp),
            "value-" => Ok(NudgeOp::ValueDown),
            "chroma+" => Ok(NudgeOp::ChromaUp),
            "chroma-" => Ok(NudgeOp::ChromaDown),
            "hue+" => Ok(NudgeOp::HueClockwise),
            "hue-" => Ok(NudgeOp::HueAntiClockwise),
            _ => Err(format!("unknown operation {s:?}")),
        }
    }
}

impl std::fmt::Display for NudgeOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            NudgeOp::ValueUp => "value+",
            NudgeOp::ValueDown => "value-",
            NudgeOp::ChromaUp => "chroma+",
            NudgeOp::ChromaDown => "chroma-",
            NudgeOp::HueClockwise => "hue+",
            NudgeOp::HueAntiClockwise => "hue-",
        };
        write!(f, "{text}")
    }
}

/// `NAME=PARTS`; the name may itself contain `=`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub parts: u32,
}

impl std::str::FromStr for Component {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, parts) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected NAME=PARTS, got {s:?}"))?;
        let parts = parts
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("{e}"))?;
        Ok(Component {
            name: name.trim().to_string(),
            parts,
        })
    }
}
