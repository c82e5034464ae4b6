fn main() {
    lidar_dimension::cli::run();
}
