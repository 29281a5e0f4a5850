use vzaar::{Profile, Result, VideoProcess};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let token = std::env::var("VZAAR_TOKEN").expect("VZAAR_TOKEN must be set");
    let secret = std::env::var("VZAAR_SECRET").expect("VZAAR_SECRET must be set");
    let path = std::env::args().nth(1).expect("usage: upload <file>");

    let client = vzaar::default_client(token, secret);

    // Phase one and two: fetch a signed policy, POST the file to storage.
    let guid = client.upload_video(&path).await?;
    println!("uploaded, guid {guid}");

    // Processing is a separate, caller-driven step.
    let id = client
        .process_video(
            &VideoProcess::new(guid, "Uploaded from the example", "", "examples")
                .with_profile(Profile::Medium),
        )
        .await?;
    println!("video {id} queued for encoding");

    Ok(())
}
