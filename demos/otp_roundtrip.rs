use std::io::{self, BufRead, Write};

use clickatell::{GatewayClientBuilder, OtpCode, RawPhoneNumber, SendOtp, SendOtpOptions, VerifyOtp};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let phone_raw = std::env::var("CLICKATELL_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLICKATELL_TO environment variable is required",
        )
    })?;
    let phone = RawPhoneNumber::new(phone_raw)?;

    let mut client = GatewayClientBuilder::from_env()?.build()?;
    client.authenticate().await?;

    let sent = client
        .send_otp(SendOtp::new(phone.clone(), SendOtpOptions::default()))
        .await?;
    println!("otp sent, id: {}", sent.id.as_str());

    print!("code: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let verified = client
        .verify_otp(VerifyOtp::new(phone, OtpCode::new(line.trim())?))
        .await?;
    println!("verified: {}", verified.detail.as_deref().unwrap_or("OK"));

    Ok(())
}
