#[actix_web::main]
async fn main() -> std::io::Result<()> {
    story_server::run().await
}
