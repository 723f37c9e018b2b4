mod catalog;
mod config;
mod error;
mod library;
mod report;
mod resolve;
mod runtime;

fn main() {
    if let Err(e) = runtime::run() {
        eprintln!("relink: {e}");
    }
}
