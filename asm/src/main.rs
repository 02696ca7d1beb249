use color_print::ceprintln;
use dmasm::{assemble, read_lines, util, Config, Error};
use std::error::Error as _;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Assembly source file
    input: String,

    /// Output file for resolved assembly [default: stdout]
    output: Option<String>,

    /// YAML config file
    #[clap(short, long)]
    config: Option<String>,

    /// Give up after this many errors (overrides config)
    #[clap(short, long)]
    error_limit: Option<usize>,

    /// Write the symbol table as YAML
    #[clap(short, long)]
    symbols: Option<String>,

    /// Dump resolved listing to stderr
    #[clap(short, long)]
    dump: bool,

    /// Debug logging
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            for msg in err.msgs() {
                msg.diag(&args.input);
            }
            match &err {
                Error::TooManyErrors(_) => ceprintln!("<red,bold>fatal</>: {}", err),
                _ => ceprintln!("<red,bold>error</>: {}", err),
            }
            let mut source = err.source();
            while let Some(cause) = source {
                ceprintln!("  <blue>caused by</>: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(limit) = args.error_limit {
        config.error_limit = limit;
    }
    log::debug!("{:?}", config);

    log::info!("1. Read {}", args.input);
    let mut text = String::new();
    File::open(&args.input)
        .map_err(|e| Error::FileOpen(args.input.clone(), e))?
        .read_to_string(&mut text)
        .map_err(|e| Error::FileRead(args.input.clone(), e))?;
    let lines = read_lines(&text);

    log::info!("2. Resolve labels in {} line(s)", lines.len());
    let asm = assemble(&lines, &config)?;

    if args.dump {
        util::print_dump(&args.input, &lines, &asm);
    }

    if let Some(path) = &args.symbols {
        log::info!("   > {}", path);
        let yaml = asm.table.to_yaml().map_err(Error::Symbols)?;
        std::fs::write(path, yaml).map_err(|e| Error::FileCreate(path.clone(), e))?;
    }

    log::info!("3. Write resolved source");
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| Error::FileCreate(path.clone(), e))?;
            emit(BufWriter::new(file), &asm.lines).map_err(|e| Error::FileWrite(path.clone(), e))
        }
        None => emit(std::io::stdout().lock(), &asm.lines)
            .map_err(|e| Error::FileWrite("<stdout>".to_string(), e)),
    }
}

fn emit<W: Write>(mut out: W, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
