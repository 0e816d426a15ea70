fn main() {
    env_logger::init();

    if let Err(err) = gemstage::run(std::env::args_os()) {
        println!("{err}");
        tracing::debug!("{:?}", err);
        std::process::exit(-1);
    }
}
