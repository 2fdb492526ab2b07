use chunkstream::gpu::core::RunOptions;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match RunOptions::from_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("usage: chunkstream [config.json] [frames]\n{}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = chunkstream::gpu::run(options) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
