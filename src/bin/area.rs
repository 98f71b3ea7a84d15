extern crate mandelbrot_area;

use env_logger::Env;
use mandelbrot_area::{config, run, Config};

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
}

fn main() {
    let matches = config::app().get_matches();
    let config = match Config::from_matches(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    init_logger(config.verbose);

    match run(&config) {
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        Ok(estimate) => println!("{}", config.format.render(&estimate)),
    }
}
