use kmeans::cli::{self, CliError, RunConfig};
use kmeans::{KMeans, KMeansConfig};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        // Diagnostics go to stdout, not stderr
        println!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = RunConfig::from_args(&args)?;
    log::debug!(
        "clustering {} points of dimension {} into {} clusters (max {} iterations)",
        config.sample_cnt, config.sample_dims, config.cluster_cnt, config.max_iter
    );

    let stdin = std::io::stdin();
    let samples = cli::read_points(stdin.lock(), config.sample_cnt, config.sample_dims)?;

    let kmean = KMeans::new(samples, config.sample_cnt, config.sample_dims);
    let result = kmean
        .kmeans_lloyd(config.cluster_cnt, config.max_iter, KMeans::init_first_k, &KMeansConfig::default())
        .map_err(|_| CliError::Generic)?;
    log::debug!("run finished after {} iterations: {:?}", result.iterations, result.outcome);

    let stdout = std::io::stdout();
    cli::write_centroids(stdout.lock(), &result.centroids, config.sample_dims)
}
