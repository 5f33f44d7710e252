use auth_core::frameworks::app;

#[tokio::main]
async fn main() {
    app::run().await;
}
