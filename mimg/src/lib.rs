//! File formats of the toolchain artifacts.
//!
//! Three formats exist, all line- or byte-oriented:
//!
//! * `.cod`: the code image, one 32-bit instruction per line as eight
//!   zero-padded hex nybbles.
//! * `.dat`: the data image, one little-endian 64-bit word per line as
//!   sixteen zero-padded hex nybbles.
//! * memory dumps: the `.dat` format with a leading four-nybble byte
//!   address per line, written by the simulator on halt.
//!
//! The raw `.bin` form of the data image is a plain byte dump and needs no
//! helper beyond `std::fs::write`.

use byteorder::ByteOrder;
use std::fs::File;
use std::io::prelude::*;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use mcpu::{Endian, Word};

const DWORD_BYTES: usize = 8;

fn invalid_line(line: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("not a hex word: {:?}", line),
    )
}

/// Writes a code image, one instruction per line.
pub fn write_code<W: Write>(writer: &mut W, code: &[Word]) -> io::Result<()> {
    for word in code {
        writeln!(writer, "{:08x}", word)?;
    }
    Ok(())
}

/// Reads a code image. Blank lines are skipped; anything that does not
/// parse as a hex word is an error.
pub fn read_code<R: BufRead>(reader: &mut R) -> io::Result<Vec<Word>> {
    let mut code = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let word = Word::from_str_radix(line, 16).map_err(|_| invalid_line(line))?;
        code.push(word);
    }
    Ok(code)
}

/// Writes a data image as 64-bit words. A trailing partial word is padded
/// with zeroes.
pub fn write_data<W: Write>(writer: &mut W, data: &[u8]) -> io::Result<()> {
    for chunk in data.chunks(DWORD_BYTES) {
        let mut padded = [0u8; DWORD_BYTES];
        padded[..chunk.len()].copy_from_slice(chunk);
        writeln!(writer, "{:016x}", Endian::read_u64(&padded))?;
    }
    Ok(())
}

/// Reads a data image back into little-endian bytes.
pub fn read_data<R: BufRead>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value = u64::from_str_radix(line, 16).map_err(|_| invalid_line(line))?;
        let start = data.len();
        data.resize(start + DWORD_BYTES, 0);
        Endian::write_u64(&mut data[start..], value);
    }
    Ok(data)
}

/// Writes a memory dump: the data image format with a leading byte address.
pub fn write_memdump<W: Write>(writer: &mut W, memory: &[u8]) -> io::Result<()> {
    for (index, chunk) in memory.chunks(DWORD_BYTES).enumerate() {
        let mut padded = [0u8; DWORD_BYTES];
        padded[..chunk.len()].copy_from_slice(chunk);
        writeln!(
            writer,
            "{:04X} {:016X}",
            index * DWORD_BYTES,
            Endian::read_u64(&padded)
        )?;
    }
    Ok(())
}

pub fn read_code_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    read_code(&mut BufReader::new(File::open(path)?))
}

pub fn write_code_file<P: AsRef<Path>>(path: P, code: &[Word]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_code(&mut writer, code)?;
    writer.flush()
}

pub fn read_data_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
    read_data(&mut BufReader::new(File::open(path)?))
}

pub fn write_data_file<P: AsRef<Path>>(path: P, data: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_data(&mut writer, data)?;
    writer.flush()
}

pub fn write_memdump_file<P: AsRef<Path>>(path: P, memory: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_memdump(&mut writer, memory)?;
    writer.flush()
}
