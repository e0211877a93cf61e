use crate::environment::Environment;
use crate::interpreter;
use ansi_term::Colour::Red;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::rc::Rc;
use std::{fmt, fs, io};

pub struct Config {
    pub application: &'static str,
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            application: "conslisp",
            prompt: String::from(">> "),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Program(interpreter::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Program(e) => write!(f, "{}", e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

pub fn setup(config: &Config) -> io::Result<Interface<DefaultTerminal>> {
    let interface = Interface::new(config.application)?;
    interface.set_prompt(&config.prompt)?;
    Ok(interface)
}

fn paint_error(message: String) -> String {
    match atty::is(atty::Stream::Stdout) {
        true => Red.paint(message).to_string(),
        false => message,
    }
}

/// Feeds each line to `processor` until `exit` or end of input. History lives only as long
/// as the interface.
pub fn repl<T: Terminal>(
    interface: &Interface<T>,
    processor: impl Fn(&str) -> Result<String, String>,
) {
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                if line.trim() == "exit" {
                    break;
                }
                interface.add_history_unique(line.clone());
                match processor(&line) {
                    Ok(output) => writeln!(interface, "{}", output).ok(),
                    Err(message) => writeln!(interface, "{}", paint_error(message)).ok(),
                };
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}

fn run_file(path: &str, env: &Rc<Environment>) -> Result<(), Error> {
    let text = fs::read_to_string(path)?;
    let result = interpreter::evaluate_program(&text, env).map_err(Error::Program)?;
    println!("{}", result);
    Ok(())
}

/// With a path argument, evaluates that file as one program; otherwise starts the REPL.
pub fn launch(args: Vec<String>, env: &Rc<Environment>) -> Result<(), Error> {
    match args.get(1) {
        Some(path) => run_file(path, env),
        None => {
            let interface = setup(&Config::default())?;
            repl(&interface, |line| interpreter::rep(line, env));
            Ok(())
        }
    }
}
