mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        if e.is_fetch_error() {
            eprintln!("Could not reach the character catalog. Run the command again to retry.");
        }
        std::process::exit(1);
    }
}
