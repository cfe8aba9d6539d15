fn main() {
    leetfresh::cli::run();
}
