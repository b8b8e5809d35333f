// minicc: MiniC to LLVM-flavoured IR, one fatal diagnostic at a time

mod diagnostics;
mod ir;
mod parser;
mod sema;

use std::fs;
use std::path::Path;
use std::process;

use diagnostics::Reporter;
use log::debug;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("minicc");
        eprintln!("Usage: {} <file.c>", program_name);
        process::exit(1);
    }

    let input_file = &args[1];
    if !Path::new(input_file).exists() {
        eprintln!("Error: File '{}' not found", input_file);
        process::exit(1);
    }

    let source = fs::read_to_string(input_file)?;
    let reporter = Reporter::new(input_file, &source);

    debug!("compiling {}", input_file);

    let program = match parser::parse(&source) {
        Ok(program) => program,
        Err(e) => {
            reporter.emit(&e);
            process::exit(1);
        }
    };

    println!("Parsing Finished");
    print!("{}", program);

    let module = match sema::compile(&program) {
        Ok(module) => module,
        Err(e) => {
            reporter.emit(&e);
            process::exit(1);
        }
    };

    fs::write("output.ll", format!("{}", module))?;
    debug!("wrote output.ll");

    Ok(())
}
