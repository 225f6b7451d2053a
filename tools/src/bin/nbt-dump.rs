use std::fs::File;
use std::io::{self, Read};

use clap::{App, Arg};
use env_logger::Env;
use flate2::read::GzDecoder;
use log::info;
use mcnbt::{io::Decoder, mson, DEFAULT_MAX_DEPTH};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = App::new("nbt-dump")
        .about("Print binary NBT as Mojangson, one document per line")
        .arg(
            Arg::with_name("file")
                .takes_value(true)
                .required(false)
                .help("NBT file to read, stdin if absent"),
        )
        .arg(
            Arg::with_name("pretty")
                .long("pretty")
                .short("p")
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

    let mut data = vec![];
    match matches.value_of("file") {
        Some(path) => File::open(path)?.read_to_end(&mut data)?,
        None => io::stdin().read_to_end(&mut data)?,
    };

    // Most files on disk are gzipped, but not all of them.
    let data = if data.starts_with(&[0x1f, 0x8b]) {
        info!("input is gzip compressed");
        let mut raw = vec![];
        GzDecoder::new(data.as_slice()).read_to_end(&mut raw)?;
        raw
    } else {
        data
    };

    let max_depth: usize = match matches.value_of("max-depth") {
        Some(depth) => depth.parse()?,
        None => DEFAULT_MAX_DEPTH,
    };

    let pretty = matches.is_present("pretty");
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut decoder = Decoder::new(data.as_slice()).with_max_depth(max_depth);
    let mut count = 0;
    while let Some(nbt) = decoder.next_named()? {
        mson::to_writer(&mut out, &nbt, pretty)?;
        count += 1;
    }

    info!("dumped {} top-level tags from {} bytes", count, data.len());
    Ok(())
}
