use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use ezid::{BitWidth, FormatConfig, Separator, layout};

/// Command-line arguments for the `ezid` binary.
///
/// Every flag falls back to an `EZID_*` environment variable, which may also
/// be supplied through a `.env` file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ezid",
    version,
    about = "Generate and inspect compact, typo-resistant identifiers"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Allocate new ids and print them, one per line.
    Generate(GenerateArgs),
    /// Decode existing ids and print their components.
    Inspect(InspectArgs),
}

/// Text layout flags shared by both subcommands.
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Raw id width: 64 (snowflake) or 96 (time-random).
    ///
    /// Environment variable: `EZID_BITS`
    #[arg(long, env = "EZID_BITS", default_value = "64")]
    pub bits: BitWidth,

    /// Separator character: none, dash or underscore.
    ///
    /// Environment variable: `EZID_SEPARATOR`
    #[arg(long, env = "EZID_SEPARATOR", default_value = "dash")]
    pub separator: Separator,

    /// Comma-separated separator offsets into the formatted text.
    ///
    /// Defaults to `3,11` for 64-bit ids and `5,16` for 96-bit ids, or to no
    /// positions when the separator is `none`.
    ///
    /// Environment variable: `EZID_POSITIONS`
    #[arg(long, env = "EZID_POSITIONS", value_delimiter = ',')]
    pub positions: Option<Vec<u8>>,

    /// Print JSON instead of plain text.
    ///
    /// Environment variable: `EZID_JSON`
    #[arg(long, env = "EZID_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub format: FormatArgs,

    /// Number of ids to allocate.
    ///
    /// Environment variable: `EZID_COUNT`
    #[arg(short = 'n', long, env = "EZID_COUNT", default_value_t = 1)]
    pub count: usize,

    /// Generator id. 64-bit ids accept `0..=1023` and default to 0; 96-bit ids
    /// accept any 40-bit value and default to a random one.
    ///
    /// Environment variable: `EZID_GENERATOR_ID`
    #[arg(short, long, env = "EZID_GENERATOR_ID", allow_negative_numbers = true)]
    pub generator_id: Option<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub format: FormatArgs,

    /// Formatted ids to decode.
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
}

/// Validated configuration; building it is the only place user input is
/// rejected.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub format: FormatConfig,
    pub json: bool,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Generate {
        count: usize,
        generator_id: Option<u64>,
    },
    Inspect {
        ids: Vec<String>,
    },
}

impl TryFrom<FormatArgs> for FormatConfig {
    type Error = anyhow::Error;

    fn try_from(args: FormatArgs) -> Result<Self, Self::Error> {
        let positions = match (args.positions, args.separator) {
            (Some(positions), _) => positions,
            (None, Separator::None) => Vec::new(),
            (None, _) => FormatConfig::default_for(args.bits).positions().collect(),
        };
        FormatConfig::new(args.bits, args.separator, &positions)
            .context("invalid EZID_SEPARATOR / EZID_POSITIONS combination")
    }
}

impl TryFrom<CliArgs> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        match args.command {
            Command::Generate(args) => {
                if args.count == 0 {
                    bail!("EZID_COUNT must be greater than 0");
                }

                let max = match args.format.bits {
                    BitWidth::Bits64 => layout::MAX_GENERATOR_ID,
                    BitWidth::Bits96 => layout::MAX_EZID_GENERATOR_ID,
                };
                let generator_id = match args.generator_id {
                    Some(id) => match u64::try_from(id) {
                        Ok(id) if id <= max => Some(id),
                        _ => bail!(
                            "EZID_GENERATOR_ID ({id}) is out of range for {}-bit ids (expected 0..={max})",
                            args.format.bits
                        ),
                    },
                    None => None,
                };

                Ok(Self {
                    json: args.format.json,
                    format: args.format.try_into()?,
                    action: Action::Generate {
                        count: args.count,
                        generator_id,
                    },
                })
            }
            Command::Inspect(args) => Ok(Self {
                json: args.format.json,
                format: args.format.try_into()?,
                action: Action::Inspect { ids: args.ids },
            }),
        }
    }
}
