use vzaar::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let token = std::env::var("VZAAR_TOKEN").expect("VZAAR_TOKEN must be set");
    let secret = std::env::var("VZAAR_SECRET").expect("VZAAR_SECRET must be set");

    let client = vzaar::default_client(token, secret);

    let login = client.who_am_i().await?;
    println!("authenticated as {login}");

    Ok(())
}
