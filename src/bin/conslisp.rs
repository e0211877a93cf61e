use conslisp::{cmdline, environment};

fn main() -> Result<(), cmdline::Error> {
    pretty_env_logger::init();
    let env = environment::Environment::standard();
    let args = std::env::args().collect();
    cmdline::launch(args, &env)
}
