#[tokio::main]
async fn main() {
    hall_booking_backend::run().await;
}
