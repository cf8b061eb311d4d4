use std::io;

use clickatell::{GatewayClientBuilder, MessageText, RawPhoneNumber, SendMessage, SendOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let phones = std::env::var("CLICKATELL_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLICKATELL_TO environment variable is required (comma-separated)",
        )
    })?;
    let message = std::env::var("CLICKATELL_MESSAGE")
        .unwrap_or_else(|_| "Hello from the clickatell demo.".to_owned());

    let mut client = GatewayClientBuilder::from_env()?.build()?;
    if client.session().is_none() {
        client.authenticate().await?;
    }

    let recipients = phones
        .split(',')
        .map(RawPhoneNumber::new)
        .collect::<Result<Vec<_>, _>>()?;
    let request = SendMessage::new(recipients, MessageText::new(message)?, SendOptions::default())?;

    let response = client.send_message(request).await?;
    for message in &response.messages {
        let to = message.to.as_ref().map(RawPhoneNumber::raw).unwrap_or("-");
        match &message.outcome {
            Ok(id) => println!("{to}: queued as {}", id.as_str()),
            Err(err) => println!("{to}: rejected ({err})"),
        }
    }

    Ok(())
}
