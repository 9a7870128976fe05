use log::info;

mod logging;

#[tokio::main]
async fn main() {
    logging::init_logger();

    info!("Starting gigboard...");
    gigboard_server::run_server().await;
}
