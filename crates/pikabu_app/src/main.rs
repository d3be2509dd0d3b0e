mod report;

use engine_logging::engine_error;
use log::LevelFilter;
use pikabu_engine::{ParserConfig, PostParser};

const LISTING_URL: &str = "https://pikabu.ru";

fn main() {
    engine_logging::initialize_stdout(LevelFilter::Info);

    println!("{}", report::STARTED);

    let posts = match PostParser::new(ParserConfig::new(LISTING_URL)) {
        Ok(parser) => run(&parser),
        Err(err) => {
            engine_error!("parser setup failed: {err}");
            Vec::new()
        }
    };

    for line in report::render(&posts, &report::timestamp()) {
        println!("{line}");
    }
}

fn run(parser: &PostParser) -> Vec<pikabu_engine::PostRecord> {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            engine_error!("failed to start runtime: {err}");
            return Vec::new();
        }
    };
    runtime.block_on(parser.get_posts())
}
