#[tokio::main]
async fn main() -> anyhow::Result<()> {
    image_factory_console::run_server().await
}
