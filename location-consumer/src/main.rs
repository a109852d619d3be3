use gatewatch_core::ConfigSource;
use location_consumer::{settings::Settings, startup::App};

#[tokio::main]
async fn main() {
    let source = ConfigSource::new().unwrap();
    gatewatch_core::init_tracer("gatewatch-location-consumer");

    let settings = Settings::new(source).unwrap();

    let app = App::build(settings).await;

    app.run().await;
}
