#![allow(dead_code)]

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgb, RgbImage};
use serde_json::json;
use shotdoc::{BuildRequest, SchemaType, ShotRecord};
use std::io::Cursor;

/// A solid-color PNG of the given size as a data URL
pub fn png_data_url(width: u32, height: u32) -> String {
    let image = RgbImage::from_pixel(width, height, Rgb([200, 80, 40]));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).expect("encode test png");
    format!("data:image/png;base64,{}", STANDARD.encode(bytes.into_inner()))
}

pub fn shot(id: &str, label: &str, width: u32, height: u32) -> ShotRecord {
    ShotRecord {
        label: Some(label.to_string()),
        timecode: Some("00:10".to_string()),
        ..ShotRecord::new(id, png_data_url(width, height))
    }
}

/// A tutorial with a title, three headings (Steps, Step 1, Step 2) and one screenshot per step
pub fn tutorial_text() -> String {
    json!({
        "title": "Deploy the App",
        "summary": "How to ship a release. Docs live at https://example.com/deploy.",
        "steps": [
            {"title": "Build", "description": "Run the release build.", "screenshotIds": ["s1"]},
            {"title": "Publish", "description": "Upload the artifacts.", "screenshotIds": ["s2"]}
        ]
    })
    .to_string()
}

pub fn tutorial_request() -> BuildRequest {
    let mut request = BuildRequest::new(SchemaType::Tutorial, tutorial_text());
    request.shots = vec![shot("s1", "Build output", 640, 400), shot("s2", "Upload dialog", 400, 300)];
    request.generated_at = Some("2026-10-17T09:30:00Z".parse().expect("valid timestamp"));
    request
}

/// A tutorial with `count` steps and no screenshots
pub fn long_tutorial_request(count: usize) -> BuildRequest {
    let steps: Vec<_> = (1..=count)
        .map(|i| json!({"title": format!("Task {}", i), "description": "Do the thing."}))
        .collect();
    let text = json!({"title": "Long Guide", "steps": steps}).to_string();
    BuildRequest::new(SchemaType::Tutorial, text)
}
