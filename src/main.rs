use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use dns_header_codec::{split_header, Header, Opcode};

#[derive(Parser, Debug)]
#[command(name = "dns-header", about = "Inspect and build DNS message headers")]
struct Args {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a header from hex bytes (e.g. "12 34 01 00 00 01 00 00 00 00 00 00")
    Decode {
        #[arg(required = true)]
        hex: Vec<String>,
    },
    /// Encode a header and print it as hex
    Encode {
        #[arg(long)]
        id: u16,
        #[arg(long, value_enum, default_value_t = OpcodeArg::Query)]
        opcode: OpcodeArg,
        /// Mark the header as a response (QR=1)
        #[arg(long)]
        response: bool,
        /// Clear the recursion desired bit
        #[arg(long)]
        no_recursion: bool,
        #[arg(long, default_value_t = 0)]
        questions: u16,
        #[arg(long, default_value_t = 0)]
        answers: u16,
        #[arg(long, default_value_t = 0)]
        authority: u16,
        #[arg(long, default_value_t = 0)]
        additional: u16,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OpcodeArg {
    Query,
    Iquery,
    Status,
}

impl From<OpcodeArg> for Opcode {
    fn from(arg: OpcodeArg) -> Self {
        match arg {
            OpcodeArg::Query => Opcode::Query,
            OpcodeArg::Iquery => Opcode::IQuery,
            OpcodeArg::Status => Opcode::Status,
        }
    }
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to initialize logger");

    if let Err(err) = run(args.command) {
        error!("{:#}", err);

        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Decode { hex } => {
            let bytes = parse_hex(&hex.join(""))?;
            let (header, rest) = split_header(&bytes).context("Failed to decode header")?;

            println!("{}", header);
            if !rest.is_empty() {
                info!("{} bytes follow the header", rest.len());
            }
        }
        Command::Encode {
            id,
            opcode,
            response,
            no_recursion,
            questions,
            answers,
            authority,
            additional,
        } => {
            let header = Header::builder()
                .id(id)
                .request(!response)
                .opcode(opcode.into())
                .recursion_desired(!no_recursion)
                .question_entries(questions)
                .answer_entries(answers)
                .authority_records(authority)
                .additional_records(additional)
                .build();

            println!("{}", format_hex(&header.to_bytes()));
        }
    }

    Ok(())
}

fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let digits: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(bad) = digits.iter().find(|c| !c.is_ascii_hexdigit()) {
        bail!("Invalid hex digit {:?}", bad);
    }
    if digits.len() % 2 != 0 {
        bail!("Odd number of hex digits");
    }

    digits
        .chunks(2)
        .map(|pair| {
            let s: String = pair.iter().collect();
            u8::from_str_radix(&s, 16).with_context(|| format!("Invalid hex byte {:?}", s))
        })
        .collect()
}

fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
