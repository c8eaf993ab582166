#[macro_use]
extern crate clap;

use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::Arg;
use log::info;

use masm::{encode_program, Lexer, Parser, SourceError};

#[derive(Debug)]
enum IOErrorContext {
    ReadInput,
    WriteOutput,
}

#[derive(Debug)]
enum Error {
    Io(std::io::Error, IOErrorContext, PathBuf),
    Assembly(usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err, context, path) => writeln!(
                f,
                "{} file \"{}\" failed: {}",
                match context {
                    IOErrorContext::ReadInput => "Reading input",
                    IOErrorContext::WriteOutput => "Writing output",
                },
                path.display(),
                err
            ),
            Error::Assembly(count) => writeln!(f, "assembly failed with {} error(s)", count),
        }
    }
}

struct Options {
    labels: bool,
    rodata: bool,
    tokens: bool,
    instructions: bool,
    encode: bool,
}

fn main() {
    pretty_env_logger::init();

    // Parse command line arguments
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("labels")
                .long("labels")
                .help("Dumps the label map"),
        )
        .arg(
            Arg::with_name("rodata")
                .long("rodata")
                .help("Emits the .bin and .dat data images next to the source"),
        )
        .arg(
            Arg::with_name("tokens")
                .long("tokens")
                .help("Dumps the token stream"),
        )
        .arg(
            Arg::with_name("instructions")
                .long("instructions")
                .help("Dumps the parsed instructions with their addresses"),
        )
        .arg(
            Arg::with_name("no-encode")
                .long("no-encode")
                .help("Skips emitting the .cod file"),
        )
        .get_matches();

    let input = matches.value_of("INPUT").unwrap();
    let options = Options {
        labels: matches.is_present("labels"),
        rodata: matches.is_present("rodata"),
        tokens: matches.is_present("tokens"),
        instructions: matches.is_present("instructions"),
        encode: !matches.is_present("no-encode"),
    };

    if let Err(err) = asm(input, &options) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn print_errors(errors: &[SourceError]) {
    for error in errors {
        eprintln!("{}", error);
    }
}

fn asm(input: &str, options: &Options) -> Result<(), Error> {
    let input_path = Path::new(input);

    // Read input file
    let input_file = File::open(input_path)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, input_path.to_owned()))?;
    let mut buf_reader = BufReader::new(input_file);
    let mut source = String::new();

    buf_reader
        .read_to_string(&mut source)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, input_path.to_owned()))?;

    let mut lexer = Lexer::new(&source, input);
    lexer.tokenize();

    if options.tokens {
        for token in lexer.tokens() {
            println!("{}", token);
        }
    }
    if !lexer.is_ok() {
        print_errors(lexer.errors());
        return Err(Error::Assembly(lexer.errors().len()));
    }

    let mut parser = Parser::new(&lexer);
    parser.parse();
    let (instructions, labels, data, errors) = parser.into_parts();

    if options.instructions {
        for instruction in &instructions {
            println!("0x{:04X}: {}", instruction.pc_address, instruction);
        }
    }
    if options.labels {
        for label in &labels {
            println!("0x{:04X}: {}", label.address, label.name);
        }
    }
    if !errors.is_empty() {
        print_errors(&errors[..]);
        return Err(Error::Assembly(errors.len()));
    }

    if options.encode {
        let code = encode_program(&instructions[..]);
        let code_path = input_path.with_extension("cod");
        mimg::write_code_file(&code_path, &code[..])
            .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, code_path.clone()))?;
        info!(target: "asm", "wrote {} instruction words to {}", code.len(), code_path.display());
    }

    if options.rodata {
        let bin_path = input_path.with_extension("bin");
        std::fs::write(&bin_path, data.written())
            .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, bin_path.clone()))?;

        let dat_path = input_path.with_extension("dat");
        mimg::write_data_file(&dat_path, data.written())
            .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, dat_path.clone()))?;
        info!(target: "asm", "wrote {} data bytes to {}", data.limit(), dat_path.display());
    }

    Ok(())
}
