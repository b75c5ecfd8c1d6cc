//! rContaPyme main entrypoint.

use rcontapyme::run;
use rcontapyme::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
