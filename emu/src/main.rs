use arch::Target;
use clap::Parser;
use color_print::ceprintln;
use log::info;
use mincemu::hooks::{dump::Dump, trace::Trace, Hook};
use mincemu::{parse_words, Error, Snapshot, State};
use std::io::Read;

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Hex words, one per line; stdin when omitted or `-`
    input: Option<String>,

    /// Instruction set the words are encoded for
    #[arg(short, long, default_value = "reg")]
    target: Target,

    /// Cycle limit
    #[arg(long, default_value_t = 1_000_000)]
    tmax: u64,

    /// Print every executed instruction to stderr
    #[arg(long)]
    trace: bool,

    /// YAML file of dump points
    #[arg(short, long)]
    dump_cfg: Option<String>,

    /// Dump registers after every instruction
    #[arg(short = 'a', long)]
    dump_all: bool,

    /// Print the final state as YAML
    #[arg(long)]
    yaml: bool,
}

fn read_input(input: Option<&str>) -> Result<String, Error> {
    let mut text = String::new();
    match input {
        None | Some("-") => {
            std::io::stdin().read_to_string(&mut text)?;
        }
        Some(path) => text = std::fs::read_to_string(path)?,
    }
    Ok(text)
}

fn run(args: &Args) -> Result<Snapshot, Error> {
    let words = parse_words(&read_input(args.input.as_deref())?)?;
    info!("loaded {} words for {}", words.len(), args.target);

    let mut hooks: Vec<Box<dyn Hook>> = vec![Box::new(Dump::arg(args.dump_cfg.clone(), args.dump_all)?)];
    if args.trace {
        hooks.push(Box::new(Trace));
    }

    let mut state = State::new(args.target, &words);
    let steps = state.run(args.tmax, &mut hooks)?;
    info!("halted after {} steps", steps);
    Ok(state.snapshot())
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(&args) {
        Ok(snapshot) if args.yaml => match serde_yaml::to_string(&snapshot) {
            Ok(yaml) => print!("{}", yaml),
            Err(e) => {
                ceprintln!("<red,bold>error</>: {}", e);
                std::process::exit(1);
            }
        },
        Ok(snapshot) => println!("{}", snapshot),
        Err(e) => {
            ceprintln!("<red,bold>error</>: {}", e);
            std::process::exit(1);
        }
    }
}
