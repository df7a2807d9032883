use arch::Target;
use clap::Parser;
use color_print::{ceprintln, cformat};
use log::info;
use mincasm::{util, Assembler};
use std::io::{Read, Write};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file, stdin when omitted or `-`
    input: Option<String>,

    /// Output file, stdout when omitted
    #[clap(short, long)]
    output: Option<String>,

    /// Instruction set to assemble for
    #[clap(short, long, default_value = "reg")]
    target: Target,

    /// Dump assembly listing to stderr
    #[clap(short, long)]
    dump: bool,
}

fn fail(msg: String) -> ! {
    ceprintln!("{}", msg);
    std::process::exit(1);
}

fn main() {
    let args: Args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // 1. Read source
    let (path, code) = match args.input.as_deref() {
        None | Some("-") => {
            let mut code = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut code) {
                fail(cformat!("<r,s>Failed to read stdin</>: {}", e));
            }
            ("<stdin>".to_string(), code)
        }
        Some(path) => match std::fs::read_to_string(path) {
            Ok(code) => (path.to_string(), code),
            Err(e) => fail(cformat!("<r,s>Failed to open File</>: {}: {}", path, e)),
        },
    };

    // 2. Assemble line by line
    let mut assembler = Assembler::new(args.target);
    for line in code.lines() {
        assembler.feed(line);
    }
    let output = match assembler.finish() {
        Ok(output) => output,
        Err(diags) => {
            for diag in &diags {
                diag.print_diag(&path);
            }
            ceprintln!("<red,bold>error</>: {} error(s), no output written", diags.len());
            std::process::exit(1);
        }
    };
    info!("{}: {} words for {}", path, output.words.len(), args.target);

    if args.dump {
        util::print_dump(&path, &output);
    }

    // 3. Write words
    let text: String = output
        .words
        .iter()
        .map(|w| format!("{}\n", args.target.hex(*w)))
        .collect();
    let written = match &args.output {
        Some(file) => std::fs::write(file, text),
        None => std::io::stdout().write_all(text.as_bytes()),
    };
    if let Err(e) = written {
        fail(cformat!("<r,s>Failed to write output</>: {}", e));
    }
}
