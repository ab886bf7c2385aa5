//! pixivdl main entrypoint.

fn main() {
    println!();
    std::process::exit(pixivdl::run());
}
