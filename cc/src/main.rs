use arch::Target;
use clap::Parser;
use color_print::ceprintln;
use log::{debug, info};
use mincc::{Codegen, Error};
use std::io::Read;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
struct Args {
    /// Input file, stdin when omitted or `-`
    input: Option<String>,

    /// Instruction set to generate
    #[clap(short, long, default_value = "reg")]
    target: Target,

    /// Print the syntax tree and variable slots to stderr
    #[clap(short, long)]
    verbose: bool,
}

fn read_input(input: Option<&str>) -> Result<(String, String), Error> {
    match input {
        None | Some("-") => {
            let mut code = String::new();
            std::io::stdin().read_to_string(&mut code)?;
            Ok(("<stdin>".to_string(), code))
        }
        Some(path) => Ok((path.to_string(), std::fs::read_to_string(path)?)),
    }
}

fn main() {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let (file, code) = match read_input(args.input.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            ceprintln!("<red,bold>error</>: {}", e);
            std::process::exit(1);
        }
    };

    // 1. Parse
    let program = match mincc::parse(&code) {
        Ok(program) => program,
        Err(e) => {
            e.print_diag(&file, &code);
            std::process::exit(1);
        }
    };
    if args.verbose {
        eprintln!("{:#?}", program);
    }

    // 2. Generate code
    let mut codegen = Codegen::new(args.target);
    let items = match codegen.program(&program) {
        Ok(items) => items,
        Err(e) => {
            e.print_diag(&file, &code);
            std::process::exit(1);
        }
    };
    for (name, slot) in codegen.variables() {
        debug!("{:>4}: {}", slot, name);
    }
    info!("{} lines for {}", items.len(), args.target);

    let text: String = items.iter().map(|item| format!("{item}\n")).collect();
    print!("{text}");
}
