#[macro_use]
extern crate clap;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Arg;
use log::info;

use mcpu::{Cpu, ExitCode};
use msim::run_logged;

const DUMP_PATH: &str = "dump.txt";
const MEMDUMP_PATH: &str = "memdump.dat";

#[derive(Debug)]
enum Error {
    Io(std::io::Error, PathBuf),
    Load(mcpu::Error),
    Runtime(ExitCode),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err, path) => {
                writeln!(f, "Accessing \"{}\" failed: {}", path.display(), err)
            }
            Error::Load(err) => writeln!(f, "Loading the data image failed: {}", err),
            Error::Runtime(code) => writeln!(f, "Execution stopped: {:?}", code),
        }
    }
}

fn main() {
    pretty_env_logger::init();

    let matches = app_from_crate!()
        .arg(
            Arg::with_name("code")
                .long("code")
                .takes_value(true)
                .value_name("CODE")
                .required(true)
                .help("Sets the code image (.cod) to execute"),
        )
        .arg(
            Arg::with_name("rodata")
                .long("rodata")
                .takes_value(true)
                .value_name("RODATA")
                .required(true)
                .help("Sets the data image (.dat) to load"),
        )
        .arg(
            Arg::with_name("insn")
                .long("insn")
                .help("Prints each executed instruction"),
        )
        .get_matches();

    let code = matches.value_of("code").unwrap();
    let rodata = matches.value_of("rodata").unwrap();
    let insn = matches.is_present("insn");

    if let Err(err) = sim(code, rodata, insn) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn sim(code_path: &str, rodata_path: &str, insn: bool) -> Result<(), Error> {
    let code = mimg::read_code_file(code_path)
        .map_err(|err| Error::Io(err, PathBuf::from(code_path)))?;
    let data = mimg::read_data_file(rodata_path)
        .map_err(|err| Error::Io(err, PathBuf::from(rodata_path)))?;
    info!(target: "sim", "loaded {} instructions, {} data bytes", code.len(), data.len());

    let mut cpu = Cpu::new();
    cpu.load_data(&data[..]).map_err(Error::Load)?;

    let mut log = BufWriter::new(
        File::create(DUMP_PATH).map_err(|err| Error::Io(err, PathBuf::from(DUMP_PATH)))?,
    );
    let exit_code = run_logged(&mut cpu, &code[..], &mut log, insn)
        .map_err(|err| Error::Io(err, PathBuf::from(DUMP_PATH)))?;
    log.flush()
        .map_err(|err| Error::Io(err, PathBuf::from(DUMP_PATH)))?;

    mimg::write_memdump_file(MEMDUMP_PATH, cpu.memory().data())
        .map_err(|err| Error::Io(err, PathBuf::from(MEMDUMP_PATH)))?;

    println!("Exit code: {:?}", exit_code);
    info!(target: "sim", "{} clock ticks", cpu.clock());

    match exit_code {
        ExitCode::Halted => Ok(()),
        other => Err(Error::Runtime(other)),
    }
}
