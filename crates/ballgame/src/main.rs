fn main() {
    env_logger::init();

    if let Err(err) = ballgame::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
