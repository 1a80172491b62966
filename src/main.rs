fn main() {
    if let Err(err) = downline_chart::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
