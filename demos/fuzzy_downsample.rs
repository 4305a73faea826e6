use fuzzycloud::{score_cloud, FuzzyDownsampleParams, ImportanceEngine, PointCloud};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Optional TOML parameter file as the first argument.
    let params = match std::env::args().nth(1) {
        Some(path) => FuzzyDownsampleParams::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => FuzzyDownsampleParams {
            importance_threshold: 0.5,
            ..Default::default()
        },
    };
    tracing::info!(?params, "parameters");

    // A dense core, a sparse shell and a few stray points.
    let n = 1000;
    let mut points: Vec<[f32; 3]> = (0..n)
        .map(|i| {
            let t = i as f32;
            let r = if i % 4 == 0 { 4.0 } else { 1.0 };
            [
                r * ((t * 0.731) % 2.0 - 1.0),
                r * ((t * 0.419) % 2.0 - 1.0),
                r * ((t * 0.257) % 2.0 - 1.0),
            ]
        })
        .collect();
    points.extend([[12.0, 0.0, 0.0], [0.0, -10.0, 3.0], [7.0, 7.0, 7.0]]);
    let cloud = PointCloud::from_points(&points);
    println!("Original cloud: {} points", cloud.len());

    let scored = score_cloud(&cloud, &params)?;
    let kept: Vec<usize> = scored
        .iter()
        .filter(|p| p.is_kept(params.importance_threshold))
        .map(|p| p.index)
        .collect();
    println!(
        "Kept {} of {} points (importance > {})",
        kept.len(),
        cloud.len(),
        params.importance_threshold
    );

    let engine = ImportanceEngine::standard();
    for p in scored.iter().rev().take(3) {
        println!("point {} at {:?}", p.index, p.position);
        println!("{}", engine.explain(p.density, p.distance));
    }
    Ok(())
}
