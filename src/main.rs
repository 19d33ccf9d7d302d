//! Command line driver for the chess rules library.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::{File, read_to_string};
use std::path::PathBuf;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand, crate_version};
use log::{info, warn};
use serde::Deserialize;
use simplelog::{WriteLogger, LevelFilter, Config};
use chess_rules::chess::{self, Position, MoveBuilder, san, variations};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn main() -> Result<(), Error> {
    let matches =
        App::new("chess-rules")
            .version(crate_version!())
            .author("Mike Leany")
            .about("Move generation and notation for standard chess")
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .default_value("chess-rules.log")
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .default_value("info")
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .help("Sets the log level if logging is turned on"))
            .subcommand(SubCommand::with_name("counts")
                .about("Counts the number of variations from a given starting position \
                        to a specified\ndepth. Defaults to the standard starting position.")
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .required(true)
                    .help("Depth to search the position"))
                .arg(Arg::with_name("parallel")
                    .long("parallel")
                    .short("p")
                    .help("Counts the variations of each root move in parallel"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(START_FEN)
                    .hide_default_value(true)
                    .multiple(true)
                    .help("Position to search in Forsyth-Edwards Notation (FEN)")))
            .subcommand(SubCommand::with_name("suite")
                .about("Runs a YAML file of positions and their expected variation counts")
                .arg(Arg::with_name("file")
                    .value_name("FILE")
                    .required(true)
                    .help("YAML list of entries with `fen` and `depths` keys"))
                .arg(Arg::with_name("parallel")
                    .long("parallel")
                    .short("p")
                    .help("Counts the variations of each root move in parallel"))
                .arg(Arg::with_name("max-depth")
                    .long("max-depth")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .help("Skips expected counts deeper than DEPTH")))
            .subcommand(SubCommand::with_name("san")
                .about("Converts moves in coordinate notation (eg e2e4) to Standard Algebraic \
                        Notation,\nplaying each in turn")
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .required(true)
                    .help("Starting position in Forsyth-Edwards Notation (FEN)"))
                .arg(Arg::with_name("moves")
                    .value_name("MOVE")
                    .multiple(true)
                    .help("Moves to convert")))
            .subcommand(SubCommand::with_name("validate")
                .about("Checks whether positions could occur in a game")
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .required(true)
                    .multiple(true)
                    .help("Position to check in Forsyth-Edwards Notation (FEN)")))
            .get_matches();

    let log_file = PathBuf::from(matches.value_of_os("log-file").expect("INFALLIBLE"));
    let log_level = match matches.value_of("log-level") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(level) => return Err(Error(format!("{}: invalid log level", level))),
        None => unreachable!(),
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink())
    };

    match matches.subcommand() {
        ("counts", Some(matches)) => counts(matches),
        ("suite", Some(matches)) => suite(matches),
        ("san", Some(matches)) => convert_to_san(matches),
        ("validate", Some(matches)) => validate(matches),
        _ => unreachable!(),
    }
}

fn parse_position(fen: &str) -> Result<Position, Error> {
    fen.parse().map_err(|err| Error(format!("{}: {}", fen, err)))
}

fn parse_depth(matches: &ArgMatches, name: &str) -> Result<Option<usize>, Error> {
    matches.value_of(name)
        .map(|depth| depth.parse().map_err(|_| Error(format!("{} must be numeric", name))))
        .transpose()
}

fn counts(matches: &ArgMatches) -> Result<(), Error> {
    let depth = parse_depth(matches, "depth")?.expect("INFALLIBLE");

    println!();
    for fen in matches.values_of("fen").expect("INFALLIBLE") {
        let pos = parse_position(fen)?;
        println!("{}", fen);
        let count = if matches.is_present("parallel") {
            variations::count_parallel(&pos, depth)
        } else {
            variations::print(&pos, depth)
        };
        info!("{}: {} variations of depth {}", fen, count, depth);
        println!("Depth {} total:\t{:12}\n", depth, count);
    }

    Ok(())
}

/// An entry in a perft suite: the expected number of variations at depth `i + 1` is `depths[i]`
#[derive(Debug, Deserialize)]
struct SuiteEntry {
    fen: String,
    depths: Vec<usize>,
}

fn suite(matches: &ArgMatches) -> Result<(), Error> {
    let path = matches.value_of("file").expect("INFALLIBLE");
    let max_depth = parse_depth(matches, "max-depth")?.unwrap_or(usize::MAX);
    let count: fn(&Position, usize) -> usize = if matches.is_present("parallel") {
        variations::count_parallel
    } else {
        variations::count
    };

    let entries: Vec<SuiteEntry> = serde_yaml::from_str(&read_to_string(path)?)?;
    let mut failures = 0;

    for entry in &entries {
        let pos = parse_position(&entry.fen)?;
        for (depth, &expected) in (1..=max_depth).zip(&entry.depths) {
            let actual = count(&pos, depth);
            if actual == expected {
                println!("ok      {:2}  {:12}  {}", depth, actual, entry.fen);
            } else {
                warn!("{}: expected {} at depth {}, found {}", entry.fen, expected, depth, actual);
                println!("FAILED  {:2}  {:12}  {}  (expected {})",
                         depth, actual, entry.fen, expected);
                failures += 1;
            }
        }
    }

    if failures == 0 {
        Ok(())
    } else {
        Err(Error(format!("{} mismatched counts", failures)))
    }
}

fn convert_to_san(matches: &ArgMatches) -> Result<(), Error> {
    let mut pos = parse_position(matches.value_of("fen").expect("INFALLIBLE"))?;
    let mut line = Vec::new();

    for text in matches.values_of("moves").into_iter().flatten() {
        let mv = text.parse::<MoveBuilder>()?.validate(&pos)
            .map_err(|err| Error(format!("{}: {}", text, err)))?;
        line.push(san::to_san(&pos, mv)?);
        pos = pos.make_move(mv)?;
    }

    println!("{}", line.join(" "));
    println!("{}", pos);
    Ok(())
}

fn validate(matches: &ArgMatches) -> Result<(), Error> {
    for fen in matches.values_of("fen").expect("INFALLIBLE") {
        let pos = parse_position(fen)?;
        println!("{}: {}", fen, pos.legality());
    }

    Ok(())
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<chess::Error> for Error {
    fn from(err: chess::Error) -> Self {
        Error(err.to_string())
    }
}
