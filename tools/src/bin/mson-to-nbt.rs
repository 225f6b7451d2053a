use std::fs::File;
use std::io::{self, Read};

use clap::{App, Arg};
use env_logger::Env;
use log::info;
use mcnbt::{mson::Parser, Config, DEFAULT_MAX_DEPTH};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = App::new("mson-to-nbt")
        .about("Convert a Mojangson document into binary NBT")
        .arg(
            Arg::with_name("file")
                .takes_value(true)
                .required(false)
                .help("Mojangson file to read, stdin if absent"),
        )
        .arg(
            Arg::with_name("out")
                .long("out")
                .short("o")
                .takes_value(true)
                .required(false)
                .help("where to write the NBT, stdout if absent"),
        )
        .arg(
            Arg::with_name("gzip")
                .long("gzip")
                .takes_value(false)
                .required(false),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .takes_value(true)
                .required(false),
        )
        .get_matches();

    let mut text = String::new();
    match matches.value_of("file") {
        Some(path) => File::open(path)?.read_to_string(&mut text)?,
        None => io::stdin().read_to_string(&mut text)?,
    };

    let max_depth: usize = match matches.value_of("max-depth") {
        Some(depth) => depth.parse()?,
        None => DEFAULT_MAX_DEPTH,
    };

    let nbt = Parser::new(&text).with_max_depth(max_depth).parse()?;
    let config = Config::default()
        .with_compression(matches.is_present("gzip"))
        .with_max_depth(max_depth);

    match matches.value_of("out") {
        Some(path) => mcnbt::to_writer(File::create(path)?, &nbt, &config)?,
        None => {
            let stdout = io::stdout();
            mcnbt::to_writer(stdout.lock(), &nbt, &config)?
        }
    };

    info!(
        "converted {} named {:?} (gzip: {})",
        nbt.value().tag(),
        nbt.name(),
        config.compressed
    );
    Ok(())
}
