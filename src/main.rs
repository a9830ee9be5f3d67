use std::time::Instant;

fn main() {
    let start = Instant::now();

    if let Err(err) = convbench::cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }

    eprintln!("Took: {:?}", start.elapsed());
}
