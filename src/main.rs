use std::io::{self, Read};

use log::debug;

/// Reads one program from stdin, runs it, and reports failures as one of the
/// two surface verdicts. Exits 0 in every case; diagnostics beyond the
/// verdict line go to the `log` facade (stderr), never stdout.
fn main() {
    env_logger::init();

    let mut source = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut source) {
        debug!("failed to read stdin: {}", e);
        println!("syntax error");
        return;
    }

    let stdout = io::stdout();
    match minilisp::run(&source, stdout.lock()) {
        Ok(()) => {},
        Err(e) if e.is_type_error() => {
            debug!("aborted: {}", e);
            println!("Type error!");
        },
        Err(e) => {
            debug!("aborted: {}", e);
            println!("syntax error");
        },
    }
}
