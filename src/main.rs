fn main() {
    if let Err(err) = dataset_inspect::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
