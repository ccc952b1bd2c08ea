//! Render a wrapped, outlined caption with inline emoji to a PNG.
//!
//! Run with: cargo run -p horizon-imagetext --example caption -- <font.ttf> [emoji-dir] [out.png]
//!
//! `emoji-dir` is a directory of Twemoji-style `<codepoints>.png` files.

use horizon_imagetext::text::{EmojiOptions, EmojiRegistry, EmojiSource, Font};
use horizon_imagetext::{Canvas, Color, Paint, Point, TextAlign, TextStyle, draw_text_wrapped};

const CAPTION: &str = "When the build is green on the first try :tada:\nno one believes it \u{1F602}";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut args = std::env::args().skip(1);
    let font_path = args.next().ok_or("usage: caption <font.ttf> [emoji-dir] [out.png]")?;
    let emoji_dir = args.next();
    let out = args.next().unwrap_or_else(|| "caption.png".to_string());

    let font = Font::from_files(font_path, &[] as &[&str])?;
    let mut emojis = EmojiRegistry::new();
    if let Some(dir) = emoji_dir {
        let loaded = emojis.load_dir(EmojiSource::Twitter, dir)?;
        tracing::info!(loaded, "loaded emoji images");
    }

    let (width, height) = (640, 240);
    let mut canvas = Canvas::new(width, height, Color::from_hex("1E1E2E")?)?;
    let style = TextStyle::new(&font, 36.0)
        .fill(Paint::rainbow(Point::new(40.0, 0.0), Point::new(600.0, 0.0)))
        .stroke(2.0, Color::BLACK)
        .align(TextAlign::Center)
        .line_spacing(1.2)
        .emojis(&emojis)
        .emoji_options(EmojiOptions::default().scale(1.1));

    let bounds = draw_text_wrapped(
        &mut canvas,
        CAPTION,
        width as f32 / 2.0,
        height as f32 / 2.0,
        (0.5, 0.5),
        560.0,
        &style,
    )?;
    tracing::info!(?bounds, "drew caption");

    canvas.save(&out)?;
    println!("Saved {out}");
    Ok(())
}
