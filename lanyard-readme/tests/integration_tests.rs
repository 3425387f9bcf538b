// ABOUTME: End-to-end tests for embed rendering and the transcode command
// ABOUTME: Exercises config precedence, snapshot output, and mock-served images

use image::{DynamicImage, ImageFormat, RgbaImage};
use lanyard_readme::commands::{self, TranscodeArgs};
use lanyard_readme::config::Config;
use lanyard_readme::embed::{EmbedFormat, EmbedRequest};
use mockito::Server;
use std::io::Cursor;
use tempfile::TempDir;

const USER_ID: &str = "94490510688792576";

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        image::Rgba([88, 101, 242, 255]),
    ))
    .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
    .unwrap();
    buffer
}

#[test]
fn test_markdown_embed_snapshot() {
    let request = EmbedRequest::new(USER_ID, None).unwrap();
    insta::assert_snapshot!(
        request.render(EmbedFormat::Markdown),
        @"[![Discord Presence](https://lanyard.cnrad.dev/api/94490510688792576)](https://discord.com/users/94490510688792576)"
    );
}

#[test]
fn test_html_embed_snapshot() {
    let request = EmbedRequest::new(USER_ID, None).unwrap();
    insta::assert_snapshot!(
        request.render(EmbedFormat::Html),
        @r#"<a href="https://discord.com/users/94490510688792576"><img src="https://lanyard.cnrad.dev/api/94490510688792576" /></a>"#
    );
}

#[test]
fn test_url_embed_snapshot() {
    let request = EmbedRequest::new(USER_ID, Some("http://localhost:3000/")).unwrap();
    insta::assert_snapshot!(
        request.render(EmbedFormat::Url),
        @"http://localhost:3000/api/94490510688792576"
    );
}

#[test]
fn test_embed_uses_config_file() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let path = temp_dir.path().join("lanyard-readme.toml");
    std::fs::write(
        &path,
        r#"
        base_url = "https://self-hosted.example.com"
        default_format = "url"
    "#,
    )
    .expect("Should write config");

    let config = Config::load_from_file(&path).expect("Should load config");
    let text = commands::embed(USER_ID, None, None, &config).unwrap();

    assert_eq!(
        text,
        "https://self-hosted.example.com/api/94490510688792576"
    );
}

#[tokio::test]
async fn test_transcode_command_writes_webp_file() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/avatar.png")
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(png_bytes(200, 100))
        .create_async()
        .await;

    let args = TranscodeArgs {
        url: format!("{}/avatar.png", server.url()),
        size: Some(50),
        ..Default::default()
    };
    let image = commands::transcode(&args, &Config::default())
        .await
        .expect("transcode should succeed");
    mock.assert_async().await;

    let temp_dir = TempDir::new().expect("Should create temp dir");
    let out = temp_dir.path().join("avatar.webp");
    commands::write_output(&image, &out).expect("Should write output");

    let written = std::fs::read(&out).unwrap();
    assert_eq!(image::guess_format(&written).unwrap(), ImageFormat::WebP);
    let decoded = image::load_from_memory(&written).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (50, 25));
}

#[tokio::test]
async fn test_transcode_command_uses_config_default_size() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/avatar.png")
        .with_status(200)
        .with_body(png_bytes(40, 40))
        .create_async()
        .await;

    let config = Config {
        default_size: Some(16),
        ..Default::default()
    };
    let args = TranscodeArgs {
        url: format!("{}/avatar.png", server.url()),
        ..Default::default()
    };

    let image = commands::transcode(&args, &config).await.unwrap();
    assert_eq!((image.width, image.height), (16, 16));
    assert!(image.to_data_uri().starts_with("data:image/webp;base64,"));
}

#[tokio::test]
async fn test_transcode_command_reports_http_errors() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/missing.png")
        .with_status(404)
        .create_async()
        .await;

    let args = TranscodeArgs {
        url: format!("{}/missing.png", server.url()),
        ..Default::default()
    };

    let err = commands::transcode(&args, &Config::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("404"));
    assert!(err
        .downcast_ref::<card_transcoder::TranscodeError>()
        .is_some());
}

#[tokio::test]
async fn test_transcode_command_enforces_max_size_flag() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/big.png")
        .with_status(200)
        .with_body(png_bytes(256, 256))
        .create_async()
        .await;

    let args = TranscodeArgs {
        url: format!("{}/big.png", server.url()),
        max_size: Some("64".to_string()),
        ..Default::default()
    };

    let err = commands::transcode(&args, &Config::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("byte limit"));
}
