use std::env;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // HELIOS_SEED pins the orbit phases, star field, and surface textures
    let app = match env::var("HELIOS_SEED").ok().and_then(|s| s.parse().ok()) {
        Some(seed) => pollster::block_on(helios::HeliosApp::with_seed(seed)),
        None => helios::default(),
    };

    app.run()
}
