use dashboard::{settings::Settings, startup::App};
use gatewatch_core::ConfigSource;

#[tokio::main]
async fn main() {
    let source = ConfigSource::new().unwrap();
    gatewatch_core::init_tracer("gatewatch-dashboard");

    let settings = Settings::new(source).unwrap();

    let app = App::build(settings);

    app.run().await;
}
