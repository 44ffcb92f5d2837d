#[macro_use]
extern crate log;

mod config;
mod result;

use std::env;
use std::io::{self, Read, Write};
use std::process;

use wirecodec::encoding::TextCodec;

use crate::result::{Error, Result};

const USAGE: &str = "wirecodec <encode|decode> [base16|base32|base64|base64url]";

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mode {
    Encode,
    Decode,
}

/// A parsed command line.
#[derive(Debug, PartialEq)]
struct Command {
    mode: Mode,
    codec: TextCodec,
}

impl Command {
    /// Parses the arguments following the program name.
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut args = args.into_iter();

        let mode = match args.next().as_deref() {
            Some("encode") => Mode::Encode,
            Some("decode") => Mode::Decode,
            Some(other) => {
                return Err(Error::UsageError(format!("unknown mode {:?}", other)));
            }
            None => return Err(Error::UsageError("missing mode".to_string())),
        };

        let codec = match args.next() {
            Some(name) => name.parse()?,
            None => config::DEFAULT_CODEC,
        };

        if let Some(extra) = args.next() {
            return Err(Error::UsageError(format!(
                "unexpected argument {:?}",
                extra
            )));
        }

        Ok(Command { mode, codec })
    }

    /// Transforms `input` into the bytes to write out.
    fn run(&self, input: &[u8]) -> Result<Vec<u8>> {
        match self.mode {
            Mode::Encode => {
                let mut output = self.codec.encode(input).into_bytes();
                output.push(b'\n');
                Ok(output)
            }
            Mode::Decode => {
                let output = self.codec.decode(trim_end(input))?;
                Ok(output)
            }
        }
    }
}

/// Strips trailing whitespace, such as the newline left by `echo`.
fn trim_end(input: &[u8]) -> &[u8] {
    let end = input
        .iter()
        .rposition(|byte| !byte.is_ascii_whitespace())
        .map_or(0, |position| position + 1);
    &input[..end]
}

fn read_input<R: Read>(reader: R) -> Result<Vec<u8>> {
    let mut input = Vec::new();

    // Read one byte past the limit so that oversized input is detected.
    reader
        .take(config::MAX_INPUT_LEN as u64 + 1)
        .read_to_end(&mut input)?;

    if input.len() > config::MAX_INPUT_LEN {
        return Err(Error::InputTooLarge {
            limit: config::MAX_INPUT_LEN,
        });
    }
    Ok(input)
}

fn run() -> Result<()> {
    let command = Command::parse(env::args().skip(1))?;

    let stdin = io::stdin();
    let input = read_input(stdin.lock())?;
    info!(
        "{:?} {} bytes of input with {}",
        command.mode,
        input.len(),
        command.codec
    );

    let output = command.run(&input)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(&output)?;
    handle.flush()?;
    Ok(())
}

fn main() {
    env_logger::init();

    match run() {
        Ok(()) => (),
        Err(error @ Error::UsageError(_)) | Err(error @ Error::UnknownCodecError(_)) => {
            error!("{}", error);
            eprintln!("usage: {}", USAGE);
            process::exit(2);
        }
        Err(error) => {
            error!("{}", error);
            process::exit(1);
        }
    }
}
