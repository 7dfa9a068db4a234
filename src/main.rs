use std::env;

use ib_core_basic::config::Config;
use ib_core_basic::interpreter::Interpreter;
use ib_core_basic::io::StdConsoleIO;
use ib_core_basic::repl;

fn main() {
    let config = Config::from_args(env::args().skip(1));
    let mut interp = Interpreter::new(config, StdConsoleIO::new());
    interp.print_banner();
    repl::run(interp);
}
