fn main() {
    if let Err(err) = flexinfer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
